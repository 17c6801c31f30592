//! Voice Queries

/// 列出 Perzona Library 全部预置音色
#[derive(Debug, Clone)]
pub struct ListLibraryVoices;

/// 获取单个预置音色
#[derive(Debug, Clone)]
pub struct GetLibraryVoice {
    pub voice_id: String,
}
