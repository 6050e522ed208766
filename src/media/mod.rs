// SPDX-License-Identifier: MPL-2.0
//! Media element contract and the native element backing the player.
//!
//! The player never decodes anything itself. It reads and writes the
//! standard properties of a [`MediaElement`] and listens to its events;
//! [`NativeVideo`] is the desktop implementation, driving an FFmpeg decode
//! loop and a cpal audio stream on a blocking thread.

pub mod audio_output;
pub mod element;
mod engine;
pub mod listeners;
pub mod native;
pub mod subscription;
mod transport;

pub use element::{MediaElement, MediaEventKind};
pub use engine::{init_ffmpeg, VideoFrame};
pub use listeners::{EventTarget, ListenerGuard};
pub use native::{NativeOptions, NativeVideo};
pub use subscription::{media_session, EventSink, MediaMessage};

/// Identifies one mount of the player on one media source.
///
/// Each new source gets a fresh id so the subscription is recreated and
/// events from a previous source can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    #[must_use]
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the id that follows this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
