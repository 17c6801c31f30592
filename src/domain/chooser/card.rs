//! Voice Card - 单个音色卡片

use serde::Serialize;

use crate::domain::voice::Voice;

/// 预置音色卡片上的徽标
pub const PUBLIC_BADGE: &str = "Public";

/// 播放控件图标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayIcon {
    Play,
    Pause,
}

/// 点击落点
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardTarget {
    /// 卡片主体（播放控件以外的任意位置）
    Body,
    /// 内嵌的播放 / 暂停控件
    PlayControl,
}

/// 卡片向上转发的意图
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardIntent<'a> {
    Select(&'a Voice),
    TogglePlay(&'a Voice),
}

/// 卡片渲染结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub voice_id: String,
    pub badge: &'static str,
    pub title: String,
    pub subtitle: String,
    pub icon: PlayIcon,
}

/// 音色卡片
///
/// 没有内部状态，渲染结果完全由输入决定
#[derive(Debug, Clone, Copy)]
pub struct VoiceCard<'a> {
    voice: &'a Voice,
    is_playing: bool,
}

impl<'a> VoiceCard<'a> {
    pub fn new(voice: &'a Voice, is_playing: bool) -> Self {
        Self { voice, is_playing }
    }

    pub fn voice(&self) -> &'a Voice {
        self.voice
    }

    pub fn view(&self) -> CardView {
        CardView {
            voice_id: self.voice.id().to_string(),
            badge: PUBLIC_BADGE,
            title: self.voice.display_name(),
            subtitle: self.voice.tags_text(),
            icon: if self.is_playing {
                PlayIcon::Pause
            } else {
                PlayIcon::Play
            },
        }
    }

    /// 处理点击
    ///
    /// 播放控件消费掉自己的点击，不会再冒泡成选择
    pub fn click(&self, target: CardTarget) -> CardIntent<'a> {
        match target {
            CardTarget::PlayControl => CardIntent::TogglePlay(self.voice),
            CardTarget::Body => CardIntent::Select(self.voice),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::voice::VoiceCatalog;

    #[test]
    fn test_view_reflects_inputs() {
        let catalog = VoiceCatalog::builtin();
        let jeff = catalog.get("v1").unwrap();

        let idle = VoiceCard::new(jeff, false).view();
        assert_eq!(idle.badge, "Public");
        assert_eq!(idle.title, "🇺🇸 Jeff");
        assert_eq!(idle.subtitle, "Deep, American, Assertive");
        assert_eq!(idle.icon, PlayIcon::Play);

        let playing = VoiceCard::new(jeff, true).view();
        assert_eq!(playing.icon, PlayIcon::Pause);
    }

    #[test]
    fn test_click_targets_are_exclusive() {
        let catalog = VoiceCatalog::builtin();
        let mark = catalog.get("v3").unwrap();
        let card = VoiceCard::new(mark, false);

        assert_eq!(card.click(CardTarget::Body), CardIntent::Select(mark));
        assert_eq!(
            card.click(CardTarget::PlayControl),
            CardIntent::TogglePlay(mark)
        );
    }
}
