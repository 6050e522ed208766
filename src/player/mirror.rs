// SPDX-License-Identifier: MPL-2.0
//! Mirrors element timing into [`PlaybackState`].

use super::state::{progress_percent, PlaybackState};
use super::Player;
use crate::media::{MediaElement, MediaEventKind, SessionId, VideoFrame};
use iced::widget::image;
use std::sync::Arc;

impl<E: MediaElement> Player<E> {
    /// Attaches the player to `element` for `session`.
    ///
    /// Registers the `loadedmetadata` and `timeupdate` listeners; each one
    /// calls `notify` with its event kind, and the parent routes that back
    /// into [`Self::handle_event`] on the UI thread. Mounting over an
    /// existing session unmounts it first.
    ///
    /// Metadata that arrived before the listeners existed is picked up
    /// immediately.
    pub fn mount<F>(&mut self, session: SessionId, element: E, notify: F)
    where
        F: Fn(MediaEventKind) + Clone + Send + Sync + 'static,
    {
        if self.session.is_some() {
            self.unmount();
        }

        let on_metadata = notify.clone();
        let on_time = notify;
        self.listeners = vec![
            element.add_event_listener(
                MediaEventKind::LoadedMetadata,
                Box::new(move || on_metadata(MediaEventKind::LoadedMetadata)),
            ),
            element.add_event_listener(
                MediaEventKind::TimeUpdate,
                Box::new(move || on_time(MediaEventKind::TimeUpdate)),
            ),
        ];

        let metadata_known = !element.duration().is_nan();
        self.element = Some(element);
        self.session = Some(session);
        tracing::debug!(%session, metadata_known, "player mounted");

        if metadata_known {
            self.on_loaded_metadata();
            self.on_time_update();
        }
    }

    /// Detaches both listeners, drops the element handle and resets state.
    pub fn unmount(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::debug!(%session, "player unmounted");
        }
        self.listeners.clear();
        self.element = None;
        self.surface = None;
        self.state = PlaybackState::new(self.settings.initial_volume);
    }

    /// Whether `session` is the one currently mounted.
    #[must_use]
    pub fn is_current(&self, session: SessionId) -> bool {
        self.session == Some(session)
    }

    /// Routes an element event to its handler. Events from any session
    /// other than the mounted one are discarded.
    pub fn handle_event(&mut self, session: SessionId, kind: MediaEventKind) {
        if !self.is_current(session) {
            tracing::trace!(%session, event = kind.name(), "discarding stale event");
            return;
        }
        match kind {
            MediaEventKind::LoadedMetadata => self.on_loaded_metadata(),
            MediaEventKind::TimeUpdate => self.on_time_update(),
        }
    }

    /// Replaces the video surface with `frame` if it belongs to the mounted session.
    pub fn present_frame(&mut self, session: SessionId, frame: VideoFrame) {
        if !self.is_current(session) {
            return;
        }
        let pixels = Arc::unwrap_or_clone(frame.rgba);
        self.surface = Some(image::Handle::from_rgba(frame.width, frame.height, pixels));
    }

    fn on_loaded_metadata(&mut self) {
        let Some(element) = &self.element else {
            return;
        };
        self.state.duration = element.duration();
        tracing::debug!(duration = self.state.duration, "loadedmetadata");
    }

    fn on_time_update(&mut self) {
        let Some(element) = &self.element else {
            return;
        };
        let current_time = element.current_time();
        self.state.current_time = current_time;
        if let Some(percent) = progress_percent(current_time, element.duration()) {
            self.state.progress_percent = percent;
        }
        tracing::trace!(current_time, progress = self.state.progress_percent, "timeupdate");
    }
}
