// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration around the player.
//!
//! The `App` struct wires together the player, the media session, the
//! window-backed fullscreen provider, localization and configuration, and
//! translates messages into side effects like window mode changes or config
//! persistence.

pub mod config;
pub mod i18n;
mod message;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{Flags, FullscreenIntent, Message, Shortcut};

use crate::fullscreen::{FullscreenProvider, WindowHost};
use crate::media::{NativeOptions, NativeVideo, SessionId};
use crate::player::{Player, PlayerSettings};
use crate::ui::theming::ThemeMode;
use config::Config;
use i18n::fluent::I18n;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    config: Config,
    config_dir: Option<PathBuf>,
    player: Player<NativeVideo>,
    session: SessionId,
    source: PathBuf,
    fullscreen: WindowHost,
    theme_mode: ThemeMode,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("session", &self.session)
            .field("source", &self.source)
            .field("fullscreen", &self.fullscreen.is_fullscreen())
            .finish()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 450;
pub const WINDOW_DEFAULT_WIDTH: u32 = 800;
pub const MIN_WINDOW_HEIGHT: u32 = 240;
pub const MIN_WINDOW_WIDTH: u32 = 420;

/// Builds the window settings.
///
/// Closing is handled by the app so the volume can be saved first.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        exit_on_close_request: false,
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires an Fn boot function; flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

/// Media source to open: the CLI path, then `[player] source`, then the
/// built-in default.
pub fn resolve_source(cli_path: Option<&str>, config: &config::PlayerConfig) -> PathBuf {
    cli_path
        .map(PathBuf::from)
        .or_else(|| config.source.clone())
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_MEDIA_SOURCE))
}

impl App {
    /// Loads configuration and localization and picks the first source.
    /// The media session itself starts from [`App::subscription`].
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let config_dir = flags.config_dir.map(PathBuf::from);
        let (config, config_warning) = config::load_with_override(config_dir.clone());
        let i18n = I18n::new(flags.lang, &config);

        if let Some(key) = config_warning {
            tracing::warn!("{}", i18n.tr(&key));
        }

        let source = resolve_source(flags.file_path.as_deref(), &config.player);
        tracing::info!(source = %source.display(), "starting player");

        let app = App {
            i18n,
            player: Player::new(PlayerSettings::from_config(&config.player)),
            session: SessionId::new(1),
            source,
            fullscreen: WindowHost::new(),
            theme_mode: config.general.theme_mode,
            config,
            config_dir,
        };

        (app, Task::none())
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");
        match self.source.file_name().and_then(|name| name.to_str()) {
            Some(name) => format!("{name} - {app_name}"),
            None => app_name,
        }
    }

    fn theme(&self) -> Theme {
        self.theme_mode.to_theme()
    }

    fn native_options(&self) -> NativeOptions {
        NativeOptions {
            initial_volume: self.player.settings().initial_volume,
            timeupdate_interval: Duration::from_millis(
                self.config.player.effective_timeupdate_interval_ms(),
            ),
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_window_subscription(),
            subscription::create_media_subscription(
                &self.source,
                self.session,
                self.native_options(),
            ),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = update::UpdateContext {
            player: &mut self.player,
            fullscreen: &mut self.fullscreen,
            session: &mut self.session,
            source: &mut self.source,
            config: &mut self.config,
            config_dir: self.config_dir.as_ref(),
        };

        match message {
            Message::Player(player_message) => {
                update::handle_player_message(&mut ctx, player_message)
            }
            Message::Media(media_message) => update::handle_media_message(&mut ctx, media_message),
            Message::Shortcut { window, shortcut } => {
                update::handle_shortcut(&mut ctx, window, shortcut)
            }
            Message::WindowOpened(window) => {
                ctx.fullscreen.set_window_id(window);
                Task::none()
            }
            Message::WindowResized(window) => update::handle_window_resized(&mut ctx, window),
            Message::WindowModeRead { intent, mode } => {
                update::handle_window_mode_read(&mut ctx, intent, mode)
            }
            Message::FileDropped(path) => update::handle_file_dropped(&mut ctx, path),
            Message::WindowCloseRequested(window) => {
                update::handle_close_requested(&mut ctx, window)
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            player: &self.player,
            fullscreen: self.fullscreen.is_fullscreen(),
        })
    }

    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{EventSink, MediaElement, MediaEventKind, MediaMessage};
    use crate::player;
    use crate::test_utils::assert_abs_diff_eq;
    use tempfile::tempdir;

    fn app_in(dir: &Path, file_path: Option<&str>) -> App {
        let (app, _task) = App::new(Flags {
            lang: Some("en-US".to_string()),
            file_path: file_path.map(String::from),
            config_dir: Some(dir.to_string_lossy().into_owned()),
        });
        app
    }

    /// Attaches a detached native element to the app's current session.
    fn attach(app: &mut App, duration: f64) -> NativeVideo {
        let (video, _commands) = NativeVideo::detached(0.5);
        video.shared().props().duration = duration;
        let (events, _rx) = EventSink::detached();
        let _ = app.update(Message::Media(MediaMessage::Attached {
            session: app.session,
            element: video.clone(),
            events,
        }));
        video
    }

    #[test]
    fn resolve_source_prefers_cli_then_config() {
        let mut player_config = config::PlayerConfig::default();
        assert_eq!(
            resolve_source(None, &player_config),
            PathBuf::from(config::DEFAULT_MEDIA_SOURCE)
        );

        player_config.source = Some(PathBuf::from("/videos/config.mp4"));
        assert_eq!(
            resolve_source(None, &player_config),
            PathBuf::from("/videos/config.mp4")
        );
        assert_eq!(
            resolve_source(Some("cli.mkv"), &player_config),
            PathBuf::from("cli.mkv")
        );
    }

    #[test]
    fn new_app_reads_player_settings_from_config_dir() {
        let dir = tempdir().expect("temp dir");
        let config = Config {
            player: config::PlayerConfig {
                volume: Some(0.8),
                brand_label: Some("Acme TV".to_string()),
                ..config::PlayerConfig::default()
            },
            ..Config::default()
        };
        config::save_with_override(&config, Some(dir.path().to_path_buf())).expect("save");

        let app = app_in(dir.path(), None);
        assert_abs_diff_eq!(app.player.state().volume, 0.8);
        assert_eq!(app.player.settings().brand_label, "Acme TV");
        assert!(app.player.element().is_none());
    }

    #[test]
    fn title_shows_file_name() {
        let dir = tempdir().expect("temp dir");
        let app = app_in(dir.path(), Some("/videos/holiday.mp4"));
        assert_eq!(app.title(), format!("holiday.mp4 - {}", app.i18n.tr("window-title")));
    }

    #[test]
    fn attached_element_mounts_player() {
        let dir = tempdir().expect("temp dir");
        let mut app = app_in(dir.path(), None);
        let video = attach(&mut app, 120.0);

        assert!(app.player.element().is_some());
        assert_abs_diff_eq!(app.player.state().duration, 120.0);

        video.shared().props().current_time = 30.0;
        video.shared().events.dispatch(MediaEventKind::TimeUpdate);
        // Listener notifications travel through the session's sink; deliver
        // the event the way the subscription would.
        let _ = app.update(Message::Media(MediaMessage::Event {
            session: app.session,
            kind: MediaEventKind::TimeUpdate,
        }));
        assert_abs_diff_eq!(app.player.state().progress_percent, 25.0);
    }

    #[test]
    fn stale_attachment_is_ignored() {
        let dir = tempdir().expect("temp dir");
        let mut app = app_in(dir.path(), None);
        let (video, _commands) = NativeVideo::detached(0.5);
        let (events, _rx) = EventSink::detached();

        let _ = app.update(Message::Media(MediaMessage::Attached {
            session: app.session.next(),
            element: video,
            events,
        }));
        assert!(app.player.element().is_none());
    }

    #[test]
    fn arrow_shortcuts_seek_by_configured_step() {
        let dir = tempdir().expect("temp dir");
        let mut app = app_in(dir.path(), None);
        let video = attach(&mut app, 120.0);
        video.shared().props().current_time = 50.0;

        let window = window::Id::unique();
        let _ = app.update(Message::Shortcut {
            window,
            shortcut: Shortcut::StepForward,
        });
        assert_abs_diff_eq!(video.current_time(), 60.0);

        let _ = app.update(Message::Shortcut {
            window,
            shortcut: Shortcut::StepBack,
        });
        assert_abs_diff_eq!(video.current_time(), 50.0);
    }

    #[test]
    fn space_toggles_playback() {
        let dir = tempdir().expect("temp dir");
        let mut app = app_in(dir.path(), None);
        let video = attach(&mut app, 10.0);

        let _ = app.update(Message::Shortcut {
            window: window::Id::unique(),
            shortcut: Shortcut::PlayPause,
        });
        assert!(app.player.state().is_playing);
        assert!(!video.paused());
    }

    /// Answers the window mode read the way the runtime would.
    fn window_reports(app: &mut App, intent: FullscreenIntent, mode: window::Mode) {
        let _ = app.update(Message::WindowModeRead { intent, mode });
    }

    #[test]
    fn fullscreen_needs_a_window() {
        let dir = tempdir().expect("temp dir");
        let mut app = app_in(dir.path(), None);

        let _ = app.update(Message::Player(player::Message::ToggleFullscreen));
        assert!(!app.fullscreen.is_fullscreen());

        let _ = app.update(Message::WindowOpened(window::Id::unique()));
        let _ = app.update(Message::Player(player::Message::ToggleFullscreen));
        // Nothing changes until the window reports its mode.
        assert!(!app.fullscreen.is_fullscreen());

        window_reports(&mut app, FullscreenIntent::Toggle, window::Mode::Windowed);
        assert!(app.fullscreen.is_fullscreen());
    }

    #[test]
    fn toggle_uses_reported_mode_over_cached_flag() {
        let dir = tempdir().expect("temp dir");
        let mut app = app_in(dir.path(), None);
        let _ = app.update(Message::WindowOpened(window::Id::unique()));

        window_reports(&mut app, FullscreenIntent::Toggle, window::Mode::Windowed);
        assert!(app.fullscreen.is_fullscreen());

        // Left fullscreen through the window manager; the next toggle must
        // enter fullscreen again rather than exit.
        window_reports(&mut app, FullscreenIntent::Toggle, window::Mode::Windowed);
        assert!(app.fullscreen.is_fullscreen());
    }

    #[test]
    fn resize_resyncs_fullscreen_flag() {
        let dir = tempdir().expect("temp dir");
        let mut app = app_in(dir.path(), None);
        let window = window::Id::unique();

        let _ = app.update(Message::WindowResized(window));
        assert_eq!(app.fullscreen.window_id(), Some(window));

        window_reports(&mut app, FullscreenIntent::Sync, window::Mode::Fullscreen);
        assert!(app.fullscreen.is_fullscreen());

        window_reports(&mut app, FullscreenIntent::Sync, window::Mode::Windowed);
        assert!(!app.fullscreen.is_fullscreen());
    }

    #[test]
    fn escape_only_exits_fullscreen() {
        let dir = tempdir().expect("temp dir");
        let mut app = app_in(dir.path(), None);
        let window = window::Id::unique();

        let _ = app.update(Message::Shortcut {
            window,
            shortcut: Shortcut::ExitFullscreen,
        });
        window_reports(&mut app, FullscreenIntent::Exit, window::Mode::Windowed);
        assert!(!app.fullscreen.is_fullscreen());

        let _ = app.update(Message::Shortcut {
            window,
            shortcut: Shortcut::ToggleFullscreen,
        });
        window_reports(&mut app, FullscreenIntent::Toggle, window::Mode::Windowed);
        assert!(app.fullscreen.is_fullscreen());

        let _ = app.update(Message::Shortcut {
            window,
            shortcut: Shortcut::ExitFullscreen,
        });
        window_reports(&mut app, FullscreenIntent::Exit, window::Mode::Fullscreen);
        assert!(!app.fullscreen.is_fullscreen());
    }

    #[test]
    fn file_drop_starts_a_new_session() {
        let dir = tempdir().expect("temp dir");
        let mut app = app_in(dir.path(), None);
        let _video = attach(&mut app, 120.0);
        let first = app.session;

        let _ = app.update(Message::FileDropped(PathBuf::from("/videos/next.webm")));

        assert_eq!(app.session, first.next());
        assert_eq!(app.source(), Path::new("/videos/next.webm"));
        assert!(app.player.element().is_none());
        assert_abs_diff_eq!(app.player.state().duration, 0.0);
    }

    #[test]
    fn close_request_saves_volume() {
        let dir = tempdir().expect("temp dir");
        let mut app = app_in(dir.path(), None);
        let _video = attach(&mut app, 120.0);

        let _ = app.update(Message::Player(player::Message::VolumeChanged(0.3)));
        let _ = app.update(Message::WindowCloseRequested(window::Id::unique()));

        let (saved, warning) = config::load_with_override(Some(dir.path().to_path_buf()));
        assert!(warning.is_none());
        assert_eq!(saved.player.volume, Some(0.3));
    }
}
