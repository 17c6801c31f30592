//! Choose Voice Modal - 选择音色弹窗
//!
//! 两个互斥的标签页:
//! - My Voices: 承载上传 / 录音组件，拿到音频后转交父级并请求关闭
//! - Perzona Library: 预置音色卡片，选择后转交父级但不关闭
//!
//! 弹窗的打开状态完全由父级持有，这里只镜像并发出关闭请求

use crate::domain::playback::AudioPlayer;
use crate::domain::voice::{library, Voice, VoiceCatalog};

use super::card::{CardIntent, CardTarget, CardView, VoiceCard};

pub const MODAL_TITLE: &str = "Choose Voice";

/// 上传 / 录音产物的固定文件名
pub const CUSTOM_VOICE_FILENAME: &str = "custom_voice.wav";

/// 标签页
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalTab {
    MyVoices,
    #[default]
    PerzonaLibrary,
}

impl ModalTab {
    pub const ALL: [ModalTab; 2] = [ModalTab::MyVoices, ModalTab::PerzonaLibrary];

    pub fn value(&self) -> &'static str {
        match self {
            ModalTab::MyVoices => "my-voices",
            ModalTab::PerzonaLibrary => "perzona-library",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ModalTab::MyVoices => "My Voices",
            ModalTab::PerzonaLibrary => "Perzona Library",
        }
    }
}

/// 上传 / 录音组件产出的原始音频
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioBlob {
    pub data: Vec<u8>,
    /// 声明的媒体类型，原样透传
    pub content_type: String,
}

impl AudioBlob {
    pub fn new(data: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            data,
            content_type: content_type.into(),
        }
    }
}

/// 交给父级的上传文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl UploadedFile {
    pub fn from_blob(blob: AudioBlob) -> Self {
        Self {
            name: CUSTOM_VOICE_FILENAME.to_string(),
            content_type: blob.content_type,
            data: blob.data,
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// 弹窗向父级发出的事件
pub trait ChooseVoiceListener {
    /// 弹窗请求改变打开状态（目前只会请求关闭）
    fn on_open_change(&mut self, open: bool);

    fn on_voice_selected(&mut self, voice: Voice);

    fn on_audio_uploaded(&mut self, file: UploadedFile);
}

/// 选择音色弹窗
pub struct ChooseVoiceModal<'c, L: ChooseVoiceListener> {
    catalog: &'c VoiceCatalog,
    listener: L,
    open: bool,
    active_tab: ModalTab,
    player: AudioPlayer,
}

impl<L: ChooseVoiceListener> ChooseVoiceModal<'static, L> {
    /// 使用进程级音色目录
    pub fn new(listener: L) -> Self {
        ChooseVoiceModal::with_catalog(library(), listener)
    }
}

impl<'c, L: ChooseVoiceListener> ChooseVoiceModal<'c, L> {
    pub fn with_catalog(catalog: &'c VoiceCatalog, listener: L) -> Self {
        Self::with_player(catalog, listener, AudioPlayer::new())
    }

    pub fn with_player(catalog: &'c VoiceCatalog, listener: L, player: AudioPlayer) -> Self {
        Self {
            catalog,
            listener,
            open: false,
            active_tab: ModalTab::default(),
            player,
        }
    }

    pub fn title(&self) -> &'static str {
        MODAL_TITLE
    }

    // ========== 打开状态（父级持有） ==========

    /// 镜像父级传入的 open
    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// 用户关闭弹窗（遮罩 / Esc / 关闭按钮），只发出请求
    pub fn dismiss(&mut self) {
        self.listener.on_open_change(false);
    }

    // ========== 标签页 ==========

    pub fn active_tab(&self) -> ModalTab {
        self.active_tab
    }

    pub fn select_tab(&mut self, tab: ModalTab) {
        self.active_tab = tab;
    }

    // ========== 播放 ==========

    pub fn player(&self) -> &AudioPlayer {
        &self.player
    }

    pub fn playing_src(&self) -> Option<&str> {
        self.player.playing_src()
    }

    // ========== Perzona Library ==========

    /// 按目录顺序渲染所有卡片
    pub fn library_cards(&self) -> Vec<CardView> {
        self.catalog
            .iter()
            .map(|voice| VoiceCard::new(voice, self.player.is_playing(voice.audio_src())).view())
            .collect()
    }

    /// 点击卡片
    ///
    /// 返回是否被处理；弹窗关闭或不在音色库标签页时忽略
    pub fn click_card(&mut self, voice_id: &str, target: CardTarget) -> bool {
        if !self.open || self.active_tab != ModalTab::PerzonaLibrary {
            tracing::debug!(voice_id = %voice_id, "Card click ignored, library not visible");
            return false;
        }

        let catalog = self.catalog;
        let Some(voice) = catalog.get(voice_id) else {
            tracing::debug!(voice_id = %voice_id, "Card click for unknown voice");
            return false;
        };

        let card = VoiceCard::new(voice, self.player.is_playing(voice.audio_src()));
        match card.click(target) {
            CardIntent::Select(voice) => {
                tracing::info!(voice_id = %voice.id(), "Voice selected");
                self.listener.on_voice_selected(voice.clone());
            }
            CardIntent::TogglePlay(voice) => {
                self.player.toggle(voice.audio_src());
            }
        }

        true
    }

    // ========== My Voices ==========

    /// 上传 / 录音组件完成回调
    ///
    /// 包装成 custom_voice.wav，转交父级，然后请求关闭。
    /// 弹窗已关闭时到达的音频直接丢弃。
    pub fn on_audio_ready(&mut self, blob: AudioBlob) -> bool {
        if !self.open {
            tracing::warn!(
                size = blob.data.len(),
                "Audio arrived after dialog was dismissed, dropping"
            );
            return false;
        }

        let file = UploadedFile::from_blob(blob);
        tracing::info!(
            name = %file.name,
            content_type = %file.content_type,
            size = file.size(),
            "Custom voice audio ready"
        );

        self.listener.on_audio_uploaded(file);
        self.listener.on_open_change(false);
        true
    }

    // ========== Listener ==========

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn into_listener(self) -> L {
        self.listener
    }
}
