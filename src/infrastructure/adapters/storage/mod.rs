//! Storage Adapters - 对象存储

mod s3_presigner;

pub use s3_presigner::{S3Presigner, S3PresignerConfig, DEFAULT_PRESIGN_EXPIRES_SECS};
