//! Chooser Context - "Choose Voice" 弹窗
//!
//! 无界面渲染的视图模型:
//! - card: 单个音色卡片（选择 / 试听切换，两者互斥）
//! - modal: 两个标签页的选择弹窗（上传录音 / 预置音色库）

mod card;
mod modal;

pub use card::{CardIntent, CardTarget, CardView, PlayIcon, VoiceCard, PUBLIC_BADGE};
pub use modal::{
    AudioBlob, ChooseVoiceListener, ChooseVoiceModal, ModalTab, UploadedFile, CUSTOM_VOICE_FILENAME,
    MODAL_TITLE,
};
