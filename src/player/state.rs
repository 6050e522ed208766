// SPDX-License-Identifier: MPL-2.0
//! Display state mirrored from the media element.

use crate::app::config::DEFAULT_VOLUME;

/// What the controls show. Owned by one player and reset on unmount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState {
    pub is_playing: bool,

    /// Seconds; whatever the element reported last, NaN included.
    pub duration: f64,

    /// Seconds, as read from the element on the last `timeupdate`.
    pub current_time: f64,

    /// Fill of the progress track, 0 to 100.
    pub progress_percent: f64,

    /// Last value chosen on the volume slider.
    pub volume: f64,

    pub volume_slider_visible: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(DEFAULT_VOLUME)
    }
}

impl PlaybackState {
    #[must_use]
    pub fn new(volume: f64) -> Self {
        Self {
            is_playing: false,
            duration: 0.0,
            current_time: 0.0,
            progress_percent: 0.0,
            volume,
            volume_slider_visible: false,
        }
    }

    /// The volume button shows the muted icon exactly at zero.
    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.volume == 0.0
    }

    /// Progress track fill as a 0.0 to 1.0 ratio for drawing.
    #[must_use]
    pub fn progress_ratio(&self) -> f32 {
        (self.progress_percent / 100.0).clamp(0.0, 1.0) as f32
    }
}

/// `current / duration * 100`, or `None` when `duration` is not a finite
/// positive number and the previous progress should stand.
#[must_use]
pub fn progress_percent(current_time: f64, duration: f64) -> Option<f64> {
    if duration.is_finite() && duration > 0.0 {
        Some(current_time / duration * 100.0)
    } else {
        None
    }
}
