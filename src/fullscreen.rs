// SPDX-License-Identifier: MPL-2.0
//! Fullscreen provider capability.
//!
//! Hosts expose up to four fullscreen API variants. The provider tries them
//! in a fixed priority order and uses the first one the host supports; a
//! host supporting none of them makes every request a silent no-op.

use iced::{window, Task};

/// Variants of the fullscreen API, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FullscreenApi {
    Standard,
    Moz,
    Webkit,
    Ms,
}

impl FullscreenApi {
    pub const PRIORITY: [FullscreenApi; 4] = [
        FullscreenApi::Standard,
        FullscreenApi::Moz,
        FullscreenApi::Webkit,
        FullscreenApi::Ms,
    ];

    #[must_use]
    pub fn request_method(self) -> &'static str {
        match self {
            FullscreenApi::Standard => "requestFullscreen",
            FullscreenApi::Moz => "mozRequestFullScreen",
            FullscreenApi::Webkit => "webkitRequestFullscreen",
            FullscreenApi::Ms => "msRequestFullscreen",
        }
    }

    #[must_use]
    pub fn exit_method(self) -> &'static str {
        match self {
            FullscreenApi::Standard => "exitFullscreen",
            FullscreenApi::Moz => "mozCancelFullScreen",
            FullscreenApi::Webkit => "webkitExitFullscreen",
            FullscreenApi::Ms => "msExitFullscreen",
        }
    }
}

/// What a platform offers for fullscreen. Requests are fire-and-forget.
pub trait FullscreenHost {
    /// Whether some element currently occupies the display.
    fn fullscreen_element_present(&self) -> bool;

    fn supports_request(&self, api: FullscreenApi) -> bool;

    /// Asks the host to make the player container fullscreen via `api`.
    fn request(&mut self, api: FullscreenApi);

    fn supports_exit(&self, api: FullscreenApi) -> bool;

    fn exit(&mut self, api: FullscreenApi);
}

/// Fullscreen operations used by the player.
pub trait FullscreenProvider {
    fn is_fullscreen(&self) -> bool;

    /// Requests fullscreen through the first supported variant and returns it.
    fn request_fullscreen(&mut self) -> Option<FullscreenApi>;

    /// Exits fullscreen through the first supported variant and returns it.
    fn exit_fullscreen(&mut self) -> Option<FullscreenApi>;

    /// Enters fullscreen when nothing is fullscreen, exits otherwise.
    fn toggle_fullscreen(&mut self) -> Option<FullscreenApi> {
        if self.is_fullscreen() {
            self.exit_fullscreen()
        } else {
            self.request_fullscreen()
        }
    }
}

impl<H: FullscreenHost> FullscreenProvider for H {
    fn is_fullscreen(&self) -> bool {
        self.fullscreen_element_present()
    }

    fn request_fullscreen(&mut self) -> Option<FullscreenApi> {
        let api = FullscreenApi::PRIORITY
            .into_iter()
            .find(|api| self.supports_request(*api));
        match api {
            Some(api) => {
                tracing::debug!(method = api.request_method(), "requesting fullscreen");
                self.request(api);
            }
            None => tracing::debug!("no fullscreen request variant supported"),
        }
        api
    }

    fn exit_fullscreen(&mut self) -> Option<FullscreenApi> {
        let api = FullscreenApi::PRIORITY
            .into_iter()
            .find(|api| self.supports_exit(*api));
        match api {
            Some(api) => {
                tracing::debug!(method = api.exit_method(), "exiting fullscreen");
                self.exit(api);
            }
            None => tracing::debug!("no fullscreen exit variant supported"),
        }
        api
    }
}

/// Fullscreen host backed by the application window.
///
/// Only the standard variant exists, and only once the window id is known.
/// Mode changes are queued and turned into an iced task by [`Self::take_task`].
///
/// The window can leave fullscreen without going through the host (window
/// manager shortcuts, the title bar button), so the flag is only a cache of
/// the real mode: [`Self::query_mode`] reads it back and [`Self::sync_mode`]
/// stores what was read.
#[derive(Debug, Default)]
pub struct WindowHost {
    window_id: Option<window::Id>,
    fullscreen: bool,
    pending: Option<window::Mode>,
}

impl WindowHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the window the host acts on. The first id seen wins.
    pub fn set_window_id(&mut self, id: window::Id) {
        if self.window_id.is_none() {
            self.window_id = Some(id);
        }
    }

    #[must_use]
    pub fn window_id(&self) -> Option<window::Id> {
        self.window_id
    }

    /// Asks the window for its current mode. `None` until the window id is known.
    pub fn query_mode<M, F>(&self, on_mode: F) -> Option<Task<M>>
    where
        M: Send + 'static,
        F: Fn(window::Mode) -> M + Send + 'static,
    {
        self.window_id.map(|id| window::mode(id).map(on_mode))
    }

    /// Records the mode the window actually reported.
    pub fn sync_mode(&mut self, mode: window::Mode) {
        let fullscreen = mode == window::Mode::Fullscreen;
        if fullscreen != self.fullscreen {
            tracing::debug!(?mode, "window mode changed outside the player");
        }
        self.fullscreen = fullscreen;
    }

    /// Returns the queued mode change, if any, as a window task.
    pub fn take_task<M: Send + 'static>(&mut self) -> Task<M> {
        match (self.pending.take(), self.window_id) {
            (Some(mode), Some(id)) => window::set_mode(id, mode),
            _ => Task::none(),
        }
    }

    #[cfg(test)]
    fn pending(&self) -> Option<window::Mode> {
        self.pending
    }
}

impl FullscreenHost for WindowHost {
    fn fullscreen_element_present(&self) -> bool {
        self.fullscreen
    }

    fn supports_request(&self, api: FullscreenApi) -> bool {
        api == FullscreenApi::Standard && self.window_id.is_some()
    }

    fn request(&mut self, _api: FullscreenApi) {
        self.fullscreen = true;
        self.pending = Some(window::Mode::Fullscreen);
    }

    fn supports_exit(&self, api: FullscreenApi) -> bool {
        api == FullscreenApi::Standard && self.window_id.is_some()
    }

    fn exit(&mut self, _api: FullscreenApi) {
        self.fullscreen = false;
        self.pending = Some(window::Mode::Windowed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records calls; supports exactly the listed variants.
    #[derive(Default)]
    struct RecordingHost {
        fullscreen: bool,
        supported: Vec<FullscreenApi>,
        requests: Vec<FullscreenApi>,
        exits: Vec<FullscreenApi>,
    }

    impl RecordingHost {
        fn supporting(supported: &[FullscreenApi]) -> Self {
            Self {
                supported: supported.to_vec(),
                ..Self::default()
            }
        }
    }

    impl FullscreenHost for RecordingHost {
        fn fullscreen_element_present(&self) -> bool {
            self.fullscreen
        }

        fn supports_request(&self, api: FullscreenApi) -> bool {
            self.supported.contains(&api)
        }

        fn request(&mut self, api: FullscreenApi) {
            self.requests.push(api);
            self.fullscreen = true;
        }

        fn supports_exit(&self, api: FullscreenApi) -> bool {
            self.supported.contains(&api)
        }

        fn exit(&mut self, api: FullscreenApi) {
            self.exits.push(api);
            self.fullscreen = false;
        }
    }

    #[test]
    fn toggle_prefers_standard_variant() {
        let mut host = RecordingHost::supporting(&FullscreenApi::PRIORITY);
        assert_eq!(host.toggle_fullscreen(), Some(FullscreenApi::Standard));
        assert_eq!(host.requests, vec![FullscreenApi::Standard]);
    }

    #[test]
    fn toggle_falls_back_in_priority_order() {
        let mut host = RecordingHost::supporting(&[FullscreenApi::Ms, FullscreenApi::Webkit]);
        assert_eq!(host.toggle_fullscreen(), Some(FullscreenApi::Webkit));

        host.supported = vec![FullscreenApi::Ms];
        assert_eq!(host.toggle_fullscreen(), Some(FullscreenApi::Ms));
        assert_eq!(host.exits, vec![FullscreenApi::Ms]);
    }

    #[test]
    fn unsupported_host_does_nothing() {
        let mut host = RecordingHost::supporting(&[]);
        assert_eq!(host.toggle_fullscreen(), None);
        assert!(host.requests.is_empty());

        host.fullscreen = true;
        assert_eq!(host.toggle_fullscreen(), None);
        assert!(host.exits.is_empty());
        assert!(host.is_fullscreen());
    }

    #[test]
    fn toggle_exits_when_fullscreen() {
        let mut host = RecordingHost::supporting(&[FullscreenApi::Moz]);
        host.fullscreen = true;
        assert_eq!(host.toggle_fullscreen(), Some(FullscreenApi::Moz));
        assert!(!host.is_fullscreen());
    }

    #[test]
    fn api_method_names() {
        assert_eq!(FullscreenApi::Moz.request_method(), "mozRequestFullScreen");
        assert_eq!(FullscreenApi::Webkit.exit_method(), "webkitExitFullscreen");
    }

    #[test]
    fn window_host_without_window_is_unsupported() {
        let mut host = WindowHost::new();
        assert_eq!(host.toggle_fullscreen(), None);
        assert!(!host.is_fullscreen());
        assert!(host.pending().is_none());
    }

    #[test]
    fn window_host_supports_only_standard() {
        let mut host = WindowHost::new();
        host.set_window_id(window::Id::unique());
        assert!(host.supports_request(FullscreenApi::Standard));
        assert!(!host.supports_request(FullscreenApi::Webkit));
        assert!(!host.supports_exit(FullscreenApi::Ms));
    }

    #[test]
    fn window_host_queues_mode_changes() {
        let mut host = WindowHost::new();
        host.set_window_id(window::Id::unique());

        host.toggle_fullscreen();
        assert!(host.is_fullscreen());
        assert_eq!(host.pending(), Some(window::Mode::Fullscreen));

        let _task: Task<()> = host.take_task();
        assert!(host.pending().is_none());

        host.toggle_fullscreen();
        assert_eq!(host.pending(), Some(window::Mode::Windowed));
    }

    #[test]
    fn window_host_requests_again_after_external_exit() {
        let mut host = WindowHost::new();
        host.set_window_id(window::Id::unique());
        host.toggle_fullscreen();
        let _task: Task<()> = host.take_task();

        // The window manager took the window out of fullscreen.
        host.sync_mode(window::Mode::Windowed);
        assert!(!host.is_fullscreen());

        assert_eq!(host.toggle_fullscreen(), Some(FullscreenApi::Standard));
        assert_eq!(host.pending(), Some(window::Mode::Fullscreen));
    }

    #[test]
    fn window_host_exits_after_external_enter() {
        let mut host = WindowHost::new();
        host.set_window_id(window::Id::unique());

        host.sync_mode(window::Mode::Fullscreen);
        host.toggle_fullscreen();
        assert_eq!(host.pending(), Some(window::Mode::Windowed));
    }

    #[test]
    fn mode_query_needs_a_window() {
        let mut host = WindowHost::new();
        assert!(host.query_mode(|_| ()).is_none());

        host.set_window_id(window::Id::unique());
        assert!(host.query_mode(|_| ()).is_some());
    }

    #[test]
    fn window_host_keeps_first_window_id() {
        let mut host = WindowHost::new();
        let first = window::Id::unique();
        host.set_window_id(first);
        host.set_window_id(window::Id::unique());
        assert_eq!(host.window_id(), Some(first));
    }
}
