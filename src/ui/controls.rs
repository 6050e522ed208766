// SPDX-License-Identifier: MPL-2.0
//! Overlay playback controls.
//!
//! The video fills the player; a gradient panel anchored to its bottom edge
//! holds three rows:
//! - Brand icon and label, elapsed / total time
//! - Clickable progress track
//! - Step back, play/pause, step forward on the left; volume and fullscreen
//!   on the right

use crate::app::config::{MAX_VOLUME, MIN_VOLUME, VOLUME_SLIDER_STEP};
use crate::app::i18n::fluent::I18n;
use crate::player::{display_time, Message, PlaybackState};
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::icons;
use crate::ui::progress_track::ProgressTrack;
use crate::ui::styles;
use iced::alignment::Vertical;
use iced::widget::{
    button, column, container, image, row, slider, stack, text, tooltip, Canvas, Row, Space, Svg,
    Text,
};
use iced::{Alignment, ContentFit, Element, Length};

/// Everything the controls need besides the playback state.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub brand_label: &'a str,
    pub seek_step_secs: f64,
    pub is_fullscreen: bool,
}

/// Renders the video surface with the controls overlay on top.
pub fn view<'a>(
    ctx: ViewContext<'a>,
    state: &PlaybackState,
    surface: Option<&image::Handle>,
) -> Element<'a, Message> {
    let video: Element<'a, Message> = match surface {
        Some(handle) => image(handle.clone())
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        None => Space::new().width(Length::Fill).height(Length::Fill).into(),
    };
    let video = container(video)
        .center(Length::Fill)
        .style(styles::container::video_surface);

    let panel = container(
        column![
            header_row(&ctx, state),
            progress_track(state),
            buttons_row(&ctx, state)
        ]
        .spacing(spacing::SM),
    )
    .padding(spacing::MD)
    .width(Length::Fill)
    .style(styles::container::controls_gradient);

    let overlay = container(panel)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_y(Vertical::Bottom);

    stack![video, overlay].into()
}

/// `elapsed / total`, each side falling back to `00:00` when not finite.
#[must_use]
pub fn time_readout(state: &PlaybackState) -> String {
    format!(
        "{} / {}",
        display_time(state.current_time),
        display_time(state.duration)
    )
}

fn header_row<'a>(ctx: &ViewContext<'a>, state: &PlaybackState) -> Element<'a, Message> {
    let brand = row![
        icons::sized(icons::tv_minimal_play(), sizing::ICON_MD),
        text(ctx.brand_label)
            .size(typography::TITLE_MD)
            .style(styles::overlay::label),
    ]
    .spacing(spacing::XS)
    .align_y(Alignment::Center);

    let time = text(time_readout(state))
        .size(typography::BODY_LG)
        .style(styles::overlay::label);

    row![brand, Space::new().width(Length::Fill), time]
        .align_y(Alignment::Center)
        .into()
}

fn progress_track<'a>(state: &PlaybackState) -> Element<'a, Message> {
    Canvas::new(ProgressTrack::new(state.progress_ratio()))
        .width(Length::Fill)
        .height(Length::Fixed(sizing::PROGRESS_TRACK))
        .into()
}

fn buttons_row<'a>(ctx: &ViewContext<'a>, state: &PlaybackState) -> Element<'a, Message> {
    let (play_icon, play_key) = if state.is_playing {
        (icons::circle_pause(), "controls-pause")
    } else {
        (icons::circle_play(), "controls-play")
    };

    let playback = row![
        control_button(
            icons::sized(icons::step_back(), sizing::ICON_MD),
            Message::Seek(-ctx.seek_step_secs),
            ctx.i18n.tr("controls-step-back"),
            false,
        ),
        control_button(
            icons::sized(play_icon, sizing::ICON_LG),
            Message::PlayPause,
            ctx.i18n.tr(play_key),
            false,
        ),
        control_button(
            icons::sized(icons::step_forward(), sizing::ICON_MD),
            Message::Seek(ctx.seek_step_secs),
            ctx.i18n.tr("controls-step-forward"),
            false,
        ),
    ]
    .spacing(spacing::SM)
    .align_y(Alignment::Center);

    let volume_icon = if state.is_muted() {
        icons::volume_x()
    } else {
        icons::volume_2()
    };
    let fullscreen_key = if ctx.is_fullscreen {
        "controls-exit-fullscreen"
    } else {
        "controls-fullscreen"
    };

    let mut window = Row::new().spacing(spacing::SM).align_y(Alignment::Center);
    if state.volume_slider_visible {
        window = window.push(volume_slider(state));
    }
    let window = window
        .push(control_button(
            icons::sized(volume_icon, sizing::ICON_MD),
            Message::ToggleVolumeSlider,
            ctx.i18n.tr("controls-volume"),
            state.volume_slider_visible,
        ))
        .push(control_button(
            icons::sized(icons::fullscreen(), sizing::ICON_MD),
            Message::ToggleFullscreen,
            ctx.i18n.tr(fullscreen_key),
            false,
        ));

    row![playback, Space::new().width(Length::Fill), window]
        .align_y(Alignment::Center)
        .into()
}

fn volume_slider<'a>(state: &PlaybackState) -> Element<'a, Message> {
    let volume = state.volume.clamp(MIN_VOLUME, MAX_VOLUME);
    container(
        slider(MIN_VOLUME..=MAX_VOLUME, volume, Message::VolumeChanged)
            .step(VOLUME_SLIDER_STEP)
            .width(Length::Fixed(sizing::VOLUME_SLIDER_WIDTH))
            .style(styles::slider::volume),
    )
    .padding([spacing::XXS, spacing::SM])
    .style(styles::container::volume_popup)
    .into()
}

fn control_button<'a>(
    icon: Svg<'static>,
    message: Message,
    label: String,
    active: bool,
) -> Element<'a, Message> {
    let button = button(icon)
        .on_press(message)
        .padding(spacing::XXS)
        .height(Length::Fixed(sizing::BUTTON_HEIGHT));
    let button = if active {
        button.style(styles::button::icon_active)
    } else {
        button.style(styles::button_icon)
    };

    tooltip(
        button,
        container(Text::new(label).size(typography::CAPTION))
            .padding([spacing::XXS, spacing::XS])
            .style(styles::container::volume_popup),
        tooltip::Position::Top,
    )
    .gap(4)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(i18n: &I18n) -> ViewContext<'_> {
        ViewContext {
            i18n,
            brand_label: "Brand Name",
            seek_step_secs: 10.0,
            is_fullscreen: false,
        }
    }

    #[test]
    fn time_readout_formats_both_sides() {
        let state = PlaybackState {
            current_time: 5.0,
            duration: 125.0,
            ..PlaybackState::default()
        };
        assert_eq!(time_readout(&state), "00:05 / 02:05");
    }

    #[test]
    fn time_readout_falls_back_for_unknown_duration() {
        let state = PlaybackState {
            current_time: 3.0,
            duration: f64::NAN,
            ..PlaybackState::default()
        };
        assert_eq!(time_readout(&state), "00:03 / 00:00");

        let live = PlaybackState {
            duration: f64::INFINITY,
            ..PlaybackState::default()
        };
        assert_eq!(time_readout(&live), "00:00 / 00:00");
    }

    #[test]
    fn initial_readout_is_zero() {
        assert_eq!(time_readout(&PlaybackState::default()), "00:00 / 00:00");
    }

    #[test]
    fn control_labels_are_translated() {
        let keys = [
            "controls-play",
            "controls-pause",
            "controls-step-back",
            "controls-step-forward",
            "controls-volume",
            "controls-fullscreen",
            "controls-exit-fullscreen",
        ];
        for lang in ["en-US", "fr"] {
            let i18n = I18n::new(Some(lang.to_string()), &Default::default());
            for key in keys {
                assert!(!i18n.tr(key).starts_with("MISSING"), "{lang}: {key}");
            }
        }
    }

    #[test]
    fn view_builds_for_all_control_states() {
        let i18n = I18n::default();
        let states = [
            PlaybackState::default(),
            PlaybackState {
                is_playing: true,
                volume: 0.0,
                volume_slider_visible: true,
                progress_percent: 40.0,
                ..PlaybackState::default()
            },
        ];
        for state in &states {
            let _element = view(context(&i18n), state, None);
        }

        let handle = image::Handle::from_rgba(2, 1, vec![0; 8]);
        let fullscreen = ViewContext {
            is_fullscreen: true,
            ..context(&i18n)
        };
        let _element = view(fullscreen, &PlaybackState::default(), Some(&handle));
    }
}
