// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::media::MediaMessage;
use crate::player;
use iced::window;
use std::path::PathBuf;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    /// A control widget was used.
    Player(player::Message),
    /// Element attachment, listener notifications and frames of a media session.
    Media(MediaMessage),
    /// A keyboard shortcut was pressed outside any focused widget.
    Shortcut {
        window: window::Id,
        shortcut: Shortcut,
    },
    /// The main window exists; fullscreen becomes available.
    WindowOpened(window::Id),
    /// The window was resized, possibly by entering or leaving fullscreen.
    WindowResized(window::Id),
    /// The window reported its mode, read before acting on `intent`.
    WindowModeRead {
        intent: FullscreenIntent,
        mode: window::Mode,
    },
    /// A file was dropped on the window.
    FileDropped(PathBuf),
    /// Window close was requested (user clicked X or pressed Alt+F4).
    WindowCloseRequested(window::Id),
}

/// Keyboard shortcuts, resolved to player commands in `App::update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    PlayPause,
    StepBack,
    StepForward,
    ToggleFullscreen,
    ExitFullscreen,
}

/// What to do once the real window mode is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenIntent {
    Toggle,
    /// Leave fullscreen, if the window is in it.
    Exit,
    /// Only refresh the cached mode.
    Sync,
}

/// Runtime flags passed in from the CLI or launcher to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional media path to open on startup.
    pub file_path: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `ICED_MARQUEE_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
}
