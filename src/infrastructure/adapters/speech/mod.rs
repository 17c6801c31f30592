//! Speech Adapters - 后端语音服务客户端

mod http_speech_client;

pub use http_speech_client::{HttpSpeechClient, HttpSpeechClientConfig};
