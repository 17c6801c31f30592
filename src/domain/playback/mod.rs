//! Playback Context - 试听播放
//!
//! 同一时刻最多只有一个音频源处于播放状态

mod player;

pub use player::{AudioPlayer, PlaybackSink, PlaybackState, SilentSink};
