//! Voice Context - Catalog
//!
//! Perzona Library: 面向所有用户的固定预置音色集合。
//! 进程内只加载一次，之后只读。

use std::collections::HashSet;
use std::sync::OnceLock;

use super::{Voice, VoiceError};

const SAMPLE_BASE: &str = "https://perzona-bucket.s3.eu-west-3.amazonaws.com/samples/voices";

static LIBRARY: OnceLock<VoiceCatalog> = OnceLock::new();

/// 音色目录
///
/// 不变量:
/// - id 在目录内唯一
/// - audio_src 在目录内唯一（播放状态以它为身份键）
/// - 顺序即展示顺序
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceCatalog {
    voices: Vec<Voice>,
}

impl VoiceCatalog {
    /// 校验并创建目录
    pub fn new(voices: Vec<Voice>) -> Result<Self, VoiceError> {
        let mut ids = HashSet::new();
        let mut sources = HashSet::new();

        for voice in &voices {
            voice.validate()?;
            if !ids.insert(voice.id()) {
                return Err(VoiceError::DuplicateId(voice.id().to_string()));
            }
            if !sources.insert(voice.audio_src()) {
                return Err(VoiceError::DuplicateAudioSource(
                    voice.audio_src().to_string(),
                ));
            }
        }

        Ok(Self { voices })
    }

    /// 内置目录
    pub fn builtin() -> Self {
        Self {
            voices: builtin_voices(),
        }
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    pub fn iter(&self) -> impl Iterator<Item = &Voice> {
        self.voices.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Voice> {
        self.voices.iter().find(|v| v.id() == id)
    }

    pub fn find_by_audio_src(&self, audio_src: &str) -> Option<&Voice> {
        self.voices.iter().find(|v| v.audio_src() == audio_src)
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }
}

/// 内置的 Perzona Library 音色
pub fn builtin_voices() -> Vec<Voice> {
    vec![
        Voice::from_static(
            "v1",
            "Jeff",
            &["Deep", "American", "Assertive"],
            "American",
            "🇺🇸",
            format!("{}/2.wav", SAMPLE_BASE),
            "samples/voices/bezos.wav",
        ),
        Voice::from_static(
            "v2",
            "Kamala",
            &["Articulate", "American"],
            "American",
            "🇺🇸",
            format!("{}/harris.wav", SAMPLE_BASE),
            "samples/voices/harris.wav",
        ),
        Voice::from_static(
            "v3",
            "Mark",
            &["Direct", "American"],
            "American",
            "🇺🇸",
            format!("{}/zuck.wav", SAMPLE_BASE),
            "samples/voices/zuck.wav",
        ),
    ]
}

/// 安装进程级音色目录（启动时从配置加载，最多一次）
///
/// 必须在第一次调用 [`library`] 之前执行，否则返回 `AlreadyInstalled`
pub fn install_library(catalog: VoiceCatalog) -> Result<(), VoiceError> {
    LIBRARY
        .set(catalog)
        .map_err(|_| VoiceError::AlreadyInstalled)
}

/// 进程级音色目录，未安装时退回内置目录
pub fn library() -> &'static VoiceCatalog {
    LIBRARY.get_or_init(VoiceCatalog::builtin)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voice(id: &str, src: &str) -> Voice {
        Voice::new(id, "Name", Vec::new(), "", "", src, "k").unwrap()
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let builtin = VoiceCatalog::builtin();
        let checked = VoiceCatalog::new(builtin_voices()).unwrap();
        assert_eq!(builtin, checked);
        assert_eq!(builtin.len(), 3);
    }

    #[test]
    fn test_builtin_order_and_contents() {
        let catalog = VoiceCatalog::builtin();
        let ids: Vec<&str> = catalog.iter().map(|v| v.id()).collect();
        assert_eq!(ids, vec!["v1", "v2", "v3"]);

        let jeff = catalog.get("v1").unwrap();
        assert_eq!(jeff.name(), "Jeff");
        assert_eq!(jeff.s3_key(), "samples/voices/bezos.wav");
        assert_eq!(
            jeff.audio_src(),
            "https://perzona-bucket.s3.eu-west-3.amazonaws.com/samples/voices/2.wav"
        );
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = VoiceCatalog::new(vec![
            voice("a", "https://x.test/1.wav"),
            voice("a", "https://x.test/2.wav"),
        ]);
        assert_eq!(result, Err(VoiceError::DuplicateId("a".to_string())));
    }

    #[test]
    fn test_duplicate_audio_src_rejected() {
        let result = VoiceCatalog::new(vec![
            voice("a", "https://x.test/1.wav"),
            voice("b", "https://x.test/1.wav"),
        ]);
        assert_eq!(
            result,
            Err(VoiceError::DuplicateAudioSource(
                "https://x.test/1.wav".to_string()
            ))
        );
    }

    #[test]
    fn test_find_by_audio_src() {
        let catalog = VoiceCatalog::builtin();
        let src = catalog.get("v3").unwrap().audio_src().to_string();
        assert_eq!(catalog.find_by_audio_src(&src).unwrap().id(), "v3");
        assert!(catalog.find_by_audio_src("https://nowhere.test/x.wav").is_none());
    }

    #[test]
    fn test_install_after_first_use_fails() {
        let _ = library();
        let result = install_library(VoiceCatalog::builtin());
        assert_eq!(result, Err(VoiceError::AlreadyInstalled));
    }
}
