// SPDX-License-Identifier: MPL-2.0
//! The player component: display state, event mirror and command dispatcher.
//!
//! A [`Player`] is generic over the [`MediaElement`] it drives so the same
//! logic runs against the native engine and against test doubles. It never
//! touches the element's internals: commands go out as property writes and
//! method calls, state comes back through `loadedmetadata` and `timeupdate`.

mod commands;
mod mirror;
pub mod state;
pub mod time_format;

pub use state::PlaybackState;
pub use time_format::{display_time, format_duration};

use crate::app::config::{PlayerConfig, DEFAULT_BRAND_LABEL, DEFAULT_SEEK_STEP_SECS, DEFAULT_VOLUME};
use crate::app::i18n::fluent::I18n;
use crate::media::{ListenerGuard, MediaElement, SessionId};
use crate::ui::controls;
use iced::widget::image;
use iced::Element;

/// User actions on the controls.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    PlayPause,
    /// Relative seek in seconds; negative steps back.
    Seek(f64),
    /// Click on the progress track, in track-local coordinates.
    ProgressClicked { click_x: f32, width: f32 },
    VolumeChanged(f64),
    ToggleVolumeSlider,
    ToggleFullscreen,
}

/// Side effects the parent must carry out after [`Player::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    ToggleFullscreen,
}

/// Settings fixed for the player's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSettings {
    /// Volume shown before the user touches the slider.
    pub initial_volume: f64,
    /// Distance of the step-back and step-forward buttons, in seconds.
    pub seek_step_secs: f64,
    pub brand_label: String,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            initial_volume: DEFAULT_VOLUME,
            seek_step_secs: DEFAULT_SEEK_STEP_SECS,
            brand_label: DEFAULT_BRAND_LABEL.to_string(),
        }
    }
}

impl PlayerSettings {
    #[must_use]
    pub fn from_config(config: &PlayerConfig) -> Self {
        Self {
            initial_volume: config.effective_volume(),
            seek_step_secs: config.effective_seek_step(),
            brand_label: config.effective_brand_label(),
        }
    }
}

pub struct Player<E: MediaElement> {
    settings: PlayerSettings,
    state: PlaybackState,
    element: Option<E>,
    session: Option<SessionId>,
    listeners: Vec<ListenerGuard>,
    surface: Option<image::Handle>,
}

impl<E: MediaElement> std::fmt::Debug for Player<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("session", &self.session)
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<E: MediaElement> Default for Player<E> {
    fn default() -> Self {
        Self::new(PlayerSettings::default())
    }
}

impl<E: MediaElement> Player<E> {
    #[must_use]
    pub fn new(settings: PlayerSettings) -> Self {
        let state = PlaybackState::new(settings.initial_volume);
        Self {
            settings,
            state,
            element: None,
            session: None,
            listeners: Vec::new(),
            surface: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    #[must_use]
    pub fn settings(&self) -> &PlayerSettings {
        &self.settings
    }

    /// The element handle, once mounted.
    #[must_use]
    pub fn element(&self) -> Option<&E> {
        self.element.as_ref()
    }

    #[must_use]
    pub fn session(&self) -> Option<SessionId> {
        self.session
    }

    /// Latest video frame, if one has been decoded.
    #[must_use]
    pub fn surface(&self) -> Option<&image::Handle> {
        self.surface.as_ref()
    }

    /// Applies a user action. Fullscreen needs the parent's provider, so it
    /// comes back as an [`Effect`].
    pub fn update(&mut self, message: Message) -> Effect {
        tracing::debug!(?message, "player command");
        match message {
            Message::PlayPause => self.play_and_pause(),
            Message::Seek(delta) => self.seek(delta),
            Message::ProgressClicked { click_x, width } => {
                self.update_progress_on_click(f64::from(click_x), f64::from(width));
            }
            Message::VolumeChanged(value) => self.volume_control(value),
            Message::ToggleVolumeSlider => self.toggle_volume_slider(),
            Message::ToggleFullscreen => return Effect::ToggleFullscreen,
        }
        Effect::None
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n, is_fullscreen: bool) -> Element<'a, Message> {
        controls::view(
            controls::ViewContext {
                i18n,
                brand_label: &self.settings.brand_label,
                seek_step_secs: self.settings.seek_step_secs,
                is_fullscreen,
            },
            &self.state,
            self.surface.as_ref(),
        )
    }
}
