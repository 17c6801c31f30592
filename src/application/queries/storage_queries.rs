//! Storage Queries

/// 获取对象的预签名访问 URL
#[derive(Debug, Clone)]
pub struct GetPresignedUrl {
    pub key: String,
}
