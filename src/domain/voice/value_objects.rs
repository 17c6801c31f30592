//! Voice Context - Value Objects

use serde::{Deserialize, Serialize};
use url::Url;

use super::VoiceError;

/// 音色 - 可选择的声音身份（名称 + 试听样本 + 元数据）
///
/// 不变量:
/// - 构造后不可变
/// - audio_src 是完整的 http(s) URL，同时作为"正在播放"的身份键
/// - s3_key 是不透明的存储位置，与 audio_src 相互独立
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    id: String,
    name: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    accent: String,
    #[serde(default)]
    flag: String,
    audio_src: String,
    s3_key: String,
}

impl Voice {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        tags: Vec<String>,
        accent: impl Into<String>,
        flag: impl Into<String>,
        audio_src: impl Into<String>,
        s3_key: impl Into<String>,
    ) -> Result<Self, VoiceError> {
        let voice = Self {
            id: id.into(),
            name: name.into(),
            tags,
            accent: accent.into(),
            flag: flag.into(),
            audio_src: audio_src.into(),
            s3_key: s3_key.into(),
        };
        voice.validate()?;
        Ok(voice)
    }

    /// 校验字段（反序列化得到的音色在进入目录前也要走这里）
    pub fn validate(&self) -> Result<(), VoiceError> {
        if self.id.trim().is_empty() {
            return Err(VoiceError::Invalid("音色 ID 不能为空".to_string()));
        }
        if self.name.trim().is_empty() {
            return Err(VoiceError::Invalid(format!("音色 {} 缺少名称", self.id)));
        }
        if self.s3_key.trim().is_empty() {
            return Err(VoiceError::Invalid(format!("音色 {} 缺少 s3_key", self.id)));
        }

        let url = Url::parse(&self.audio_src).map_err(|e| {
            VoiceError::Invalid(format!("音色 {} 的 audio_src 无效: {}", self.id, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(VoiceError::Invalid(format!(
                "音色 {} 的 audio_src 必须是 http(s) 地址",
                self.id
            )));
        }

        Ok(())
    }

    /// 内置数据专用，不做校验（由目录测试覆盖）
    pub(super) fn from_static(
        id: &str,
        name: &str,
        tags: &[&str],
        accent: &str,
        flag: &str,
        audio_src: String,
        s3_key: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            accent: accent.to_string(),
            flag: flag.to_string(),
            audio_src,
            s3_key: s3_key.to_string(),
        }
    }

    /// 展示名: flag + 空格 + name
    pub fn display_name(&self) -> String {
        if self.flag.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.flag, self.name)
        }
    }

    /// 标签按顺序以 ", " 连接
    pub fn tags_text(&self) -> String {
        self.tags.join(", ")
    }

    // Getters
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn accent(&self) -> &str {
        &self.accent
    }

    pub fn flag(&self) -> &str {
        &self.flag
    }

    pub fn audio_src(&self) -> &str {
        &self.audio_src
    }

    pub fn s3_key(&self) -> &str {
        &self.s3_key
    }
}
