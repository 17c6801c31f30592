//! Speech Commands

/// 生成语音命令
///
/// voice_id 指向 Perzona Library 中的预置音色，voice_s3_key 指向用户上传的音色；
/// 两者最多给一个，都不给时使用默认声音
#[derive(Debug, Clone)]
pub struct GenerateSpeech {
    pub text: String,
    pub voice_id: Option<String>,
    pub voice_s3_key: Option<String>,
}

/// 照片生成口播视频命令
#[derive(Debug, Clone)]
pub struct GeneratePortraitVideo {
    pub transcript: String,
    pub photo_s3_key: String,
    pub audio_s3_key: String,
}

/// 从 URL 导入文件命令
#[derive(Debug, Clone)]
pub struct ImportFile {
    pub url: String,
}
