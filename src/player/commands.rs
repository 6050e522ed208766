// SPDX-License-Identifier: MPL-2.0
//! Command dispatcher: user actions become element and provider calls.
//!
//! Element commands do nothing while no element is mounted. Seek and volume
//! values are passed through unclamped; range handling belongs to the
//! element.

use super::Player;
use crate::fullscreen::{FullscreenApi, FullscreenProvider};
use crate::media::MediaElement;

impl<E: MediaElement> Player<E> {
    /// Plays when the element reports paused, pauses otherwise.
    pub fn play_and_pause(&mut self) {
        let Some(element) = &self.element else {
            return;
        };
        if element.paused() {
            element.play();
            self.state.is_playing = true;
        } else {
            element.pause();
            self.state.is_playing = false;
        }
    }

    /// Moves the playback position by `delta_secs`.
    pub fn seek(&mut self, delta_secs: f64) {
        let Some(element) = &self.element else {
            return;
        };
        element.set_current_time(element.current_time() + delta_secs);
    }

    /// Seeks to the point of the progress track at `click_x` out of `width`.
    ///
    /// Uses the mirrored duration. A zero width or unknown duration yields
    /// NaN, which is handed to the element as is.
    pub fn update_progress_on_click(&mut self, click_x: f64, width: f64) {
        let Some(element) = &self.element else {
            return;
        };
        let target = click_x / width * self.state.duration;
        element.set_current_time(target);
    }

    /// Applies a volume slider value to both the display and the element.
    pub fn volume_control(&mut self, value: f64) {
        let Some(element) = &self.element else {
            return;
        };
        self.state.volume = value;
        element.set_volume(value);
    }

    pub fn toggle_volume_slider(&mut self) {
        self.state.volume_slider_visible = !self.state.volume_slider_visible;
    }

    /// Enters fullscreen when nothing is fullscreen, exits otherwise.
    /// Returns the API variant used, if any was supported.
    pub fn fullscreen<P: FullscreenProvider>(&self, provider: &mut P) -> Option<FullscreenApi> {
        provider.toggle_fullscreen()
    }
}
