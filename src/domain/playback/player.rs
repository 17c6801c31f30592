//! Audio Player - 单音源播放切换

use std::fmt;

/// 播放状态
///
/// 显式的两态值，只能通过 [`AudioPlayer::toggle`] 改变
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing(String),
}

impl PlaybackState {
    pub fn playing_src(&self) -> Option<&str> {
        match self {
            PlaybackState::Idle => None,
            PlaybackState::Playing(src) => Some(src),
        }
    }

    pub fn is_playing(&self, src: &str) -> bool {
        self.playing_src() == Some(src)
    }
}

/// 实际发声的一端（浏览器 audio 元素、本地播放器等）
pub trait PlaybackSink {
    fn start(&mut self, src: &str);

    fn stop(&mut self, src: &str);
}

/// 不发声的默认实现，只维护状态
#[derive(Debug, Default)]
pub struct SilentSink;

impl PlaybackSink for SilentSink {
    fn start(&mut self, _src: &str) {}

    fn stop(&mut self, _src: &str) {}
}

/// 试听播放器
///
/// 非可重入，只支持顺序调用
pub struct AudioPlayer {
    state: PlaybackState,
    sink: Box<dyn PlaybackSink>,
}

impl AudioPlayer {
    pub fn new() -> Self {
        Self::with_sink(SilentSink)
    }

    pub fn with_sink(sink: impl PlaybackSink + 'static) -> Self {
        Self {
            state: PlaybackState::Idle,
            sink: Box::new(sink),
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn playing_src(&self) -> Option<&str> {
        self.state.playing_src()
    }

    pub fn is_playing(&self, src: &str) -> bool {
        self.state.is_playing(src)
    }

    /// 切换播放
    ///
    /// - src 正在播放: 停止，回到 Idle
    /// - 其他情况: 先停掉当前音源（如有），再播放 src
    pub fn toggle(&mut self, src: &str) -> &PlaybackState {
        match std::mem::take(&mut self.state) {
            PlaybackState::Playing(current) if current == src => {
                self.sink.stop(&current);
                tracing::debug!(src = %current, "Playback stopped");
            }
            previous => {
                if let PlaybackState::Playing(current) = previous {
                    self.sink.stop(&current);
                    tracing::debug!(src = %current, "Playback replaced");
                }
                self.sink.start(src);
                self.state = PlaybackState::Playing(src.to_string());
                tracing::debug!(src = %src, "Playback started");
            }
        }

        &self.state
    }
}

impl Default for AudioPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AudioPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioPlayer")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
