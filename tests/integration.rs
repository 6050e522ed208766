// SPDX-License-Identifier: MPL-2.0
use approx::assert_abs_diff_eq;
use iced_marquee::app::config::{self, Config, GeneralConfig, PlayerConfig};
use iced_marquee::app::i18n::fluent::I18n;
use iced_marquee::fullscreen::{FullscreenApi, FullscreenHost};
use iced_marquee::media::element::EventCallback;
use iced_marquee::media::{EventTarget, ListenerGuard, MediaElement, MediaEventKind, SessionId};
use iced_marquee::player::{Effect, Message, Player, PlayerSettings};
use iced_marquee::ui::theming::ThemeMode;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use tempfile::tempdir;

/// Element double with browser-like clamping, driven by the test.
#[derive(Debug, Clone, Default)]
struct ScriptedElement {
    state: Arc<Mutex<Timing>>,
    events: EventTarget,
}

#[derive(Debug, Default)]
struct Timing {
    paused: bool,
    duration: f64,
    current_time: f64,
    volume: f64,
}

impl ScriptedElement {
    fn new() -> Self {
        let element = Self::default();
        {
            let mut timing = element.timing();
            timing.paused = true;
            timing.duration = f64::NAN;
            timing.volume = 1.0;
        }
        element
    }

    fn timing(&self) -> std::sync::MutexGuard<'_, Timing> {
        self.state.lock().expect("timing lock")
    }

    fn load(&self, duration: f64) {
        self.timing().duration = duration;
        self.events.dispatch(MediaEventKind::LoadedMetadata);
    }

    fn advance_to(&self, secs: f64) {
        self.timing().current_time = secs;
        self.events.dispatch(MediaEventKind::TimeUpdate);
    }
}

impl MediaElement for ScriptedElement {
    fn play(&self) {
        self.timing().paused = false;
    }

    fn pause(&self) {
        self.timing().paused = true;
    }

    fn paused(&self) -> bool {
        self.timing().paused
    }

    fn duration(&self) -> f64 {
        self.timing().duration
    }

    fn current_time(&self) -> f64 {
        self.timing().current_time
    }

    fn set_current_time(&self, secs: f64) {
        if !secs.is_finite() {
            return;
        }
        let mut timing = self.timing();
        let upper = if timing.duration.is_finite() {
            timing.duration
        } else {
            f64::INFINITY
        };
        timing.current_time = secs.clamp(0.0, upper);
    }

    fn volume(&self) -> f64 {
        self.timing().volume
    }

    fn set_volume(&self, volume: f64) {
        self.timing().volume = volume.clamp(0.0, 1.0);
    }

    fn add_event_listener(&self, kind: MediaEventKind, callback: EventCallback) -> ListenerGuard {
        self.events.add_listener(kind, callback)
    }
}

/// Mounts a player whose listener notifications are collected on a channel,
/// the way the media subscription queues them for `App::update`.
fn mount(
    element: &ScriptedElement,
    session: SessionId,
) -> (Player<ScriptedElement>, mpsc::Receiver<MediaEventKind>) {
    let (tx, rx) = mpsc::channel();
    let tx = Arc::new(Mutex::new(tx));
    let mut player = Player::new(PlayerSettings::default());
    player.mount(session, element.clone(), move |kind| {
        if let Ok(tx) = tx.lock() {
            let _ = tx.send(kind);
        }
    });
    (player, rx)
}

fn deliver(
    player: &mut Player<ScriptedElement>,
    session: SessionId,
    rx: &mpsc::Receiver<MediaEventKind>,
) {
    while let Ok(kind) = rx.try_recv() {
        player.handle_event(session, kind);
    }
}

#[test]
fn playback_round_trip_through_events() {
    let element = ScriptedElement::new();
    let session = SessionId::new(1);
    let (mut player, rx) = mount(&element, session);

    element.load(200.0);
    deliver(&mut player, session, &rx);
    assert_abs_diff_eq!(player.state().duration, 200.0);

    assert_eq!(player.update(Message::PlayPause), Effect::None);
    assert!(player.state().is_playing);
    assert!(!element.paused());

    element.advance_to(50.0);
    deliver(&mut player, session, &rx);
    assert_abs_diff_eq!(player.state().current_time, 50.0);
    assert_abs_diff_eq!(player.state().progress_percent, 25.0);

    player.update(Message::Seek(10.0));
    element.advance_to(element.current_time());
    deliver(&mut player, session, &rx);
    assert_abs_diff_eq!(player.state().current_time, 60.0);
    assert_abs_diff_eq!(player.state().progress_percent, 30.0);
}

#[test]
fn clicking_the_track_seeks_proportionally() {
    let element = ScriptedElement::new();
    let session = SessionId::new(1);
    let (mut player, rx) = mount(&element, session);
    element.load(120.0);
    deliver(&mut player, session, &rx);

    player.update(Message::ProgressClicked {
        click_x: 150.0,
        width: 600.0,
    });
    assert_abs_diff_eq!(element.current_time(), 30.0);
}

#[test]
fn seeking_before_start_is_clamped_by_the_element() {
    let element = ScriptedElement::new();
    let session = SessionId::new(1);
    let (mut player, rx) = mount(&element, session);
    element.load(100.0);
    element.advance_to(5.0);
    deliver(&mut player, session, &rx);

    player.update(Message::Seek(-10.0));
    assert_abs_diff_eq!(element.current_time(), 0.0);
}

#[test]
fn volume_slider_drives_element_and_icon_state() {
    let element = ScriptedElement::new();
    let (mut player, _rx) = mount(&element, SessionId::new(1));

    player.update(Message::ToggleVolumeSlider);
    assert!(player.state().volume_slider_visible);

    player.update(Message::VolumeChanged(0.0));
    assert!(player.state().is_muted());
    assert_abs_diff_eq!(element.volume(), 0.0);

    player.update(Message::VolumeChanged(0.7));
    assert!(!player.state().is_muted());
    assert_abs_diff_eq!(element.volume(), 0.7);
}

#[test]
fn unmount_detaches_listeners_and_resets_state() {
    let element = ScriptedElement::new();
    let session = SessionId::new(4);
    let (mut player, rx) = mount(&element, session);
    assert_eq!(element.events.listener_count(), 2);

    element.load(90.0);
    element.advance_to(45.0);
    deliver(&mut player, session, &rx);
    assert_abs_diff_eq!(player.state().progress_percent, 50.0);

    player.unmount();
    assert_eq!(element.events.listener_count(), 0);
    assert_abs_diff_eq!(player.state().duration, 0.0);

    element.advance_to(80.0);
    assert!(rx.try_recv().is_err());
    player.handle_event(session, MediaEventKind::TimeUpdate);
    assert_abs_diff_eq!(player.state().current_time, 0.0);
}

#[test]
fn commands_without_element_are_skipped() {
    let mut player: Player<ScriptedElement> = Player::new(PlayerSettings::default());
    player.update(Message::PlayPause);
    player.update(Message::Seek(10.0));
    player.update(Message::VolumeChanged(0.1));
    assert!(!player.state().is_playing);
    assert_abs_diff_eq!(player.state().volume, 0.5);
}

/// Host exposing only the prefixed WebKit variant.
#[derive(Default)]
struct WebkitHost {
    fullscreen: bool,
    calls: Vec<&'static str>,
}

impl FullscreenHost for WebkitHost {
    fn fullscreen_element_present(&self) -> bool {
        self.fullscreen
    }

    fn supports_request(&self, api: FullscreenApi) -> bool {
        api == FullscreenApi::Webkit
    }

    fn request(&mut self, api: FullscreenApi) {
        self.calls.push(api.request_method());
        self.fullscreen = true;
    }

    fn supports_exit(&self, api: FullscreenApi) -> bool {
        api == FullscreenApi::Webkit
    }

    fn exit(&mut self, api: FullscreenApi) {
        self.calls.push(api.exit_method());
        self.fullscreen = false;
    }
}

#[test]
fn fullscreen_effect_reaches_the_provider() {
    let mut player: Player<ScriptedElement> = Player::new(PlayerSettings::default());
    let mut host = WebkitHost::default();

    assert_eq!(player.update(Message::ToggleFullscreen), Effect::ToggleFullscreen);
    assert_eq!(player.fullscreen(&mut host), Some(FullscreenApi::Webkit));
    assert_eq!(player.fullscreen(&mut host), Some(FullscreenApi::Webkit));
    assert_eq!(
        host.calls,
        vec!["webkitRequestFullscreen", "webkitExitFullscreen"]
    );
}

#[test]
fn player_settings_survive_a_config_round_trip() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");

    let config = Config {
        general: GeneralConfig {
            language: Some("fr".to_string()),
            theme_mode: ThemeMode::Dark,
        },
        player: PlayerConfig {
            volume: Some(0.25),
            seek_step_secs: Some(15.0),
            brand_label: Some("Marquee".to_string()),
            ..PlayerConfig::default()
        },
    };
    config::save_to_path(&config, &path).expect("Failed to write config file");

    let loaded = config::load_from_path(&path).expect("Failed to load config");
    let settings = PlayerSettings::from_config(&loaded.player);
    assert_abs_diff_eq!(settings.initial_volume, 0.25);
    assert_abs_diff_eq!(settings.seek_step_secs, 15.0);
    assert_eq!(settings.brand_label, "Marquee");

    let i18n = I18n::new(None, &loaded);
    assert_eq!(i18n.current_locale().to_string(), "fr");

    let cli = I18n::new(Some("en-US".to_string()), &loaded);
    assert_eq!(cli.current_locale().to_string(), "en-US");
}
