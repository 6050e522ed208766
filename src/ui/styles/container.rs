// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{
    opacity,
    palette::{BLACK, WHITE},
    radius,
};
use iced::gradient::{self, Gradient};
use iced::widget::container;
use iced::{Background, Border, Color, Radians, Theme};

/// Letterbox behind the video surface.
pub fn video_surface(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(BLACK)),
        ..Default::default()
    }
}

/// Controls overlay: dark at the bottom edge, fading out towards the top.
pub fn controls_gradient(_theme: &Theme) -> container::Style {
    let shade = Color {
        a: opacity::OVERLAY_STRONG,
        ..BLACK
    };
    let gradient = gradient::Linear::new(Radians(0.0))
        .add_stop(0.0, shade)
        .add_stop(1.0, Color::TRANSPARENT);

    container::Style {
        background: Some(Background::Gradient(Gradient::Linear(gradient))),
        text_color: Some(WHITE),
        ..Default::default()
    }
}

/// Pill-shaped backdrop of the volume slider popup.
pub fn volume_popup(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_STRONG,
            ..BLACK
        })),
        border: Border {
            color: Color {
                a: opacity::OVERLAY_SUBTLE,
                ..WHITE
            },
            width: 1.0,
            radius: radius::FULL.into(),
        },
        ..Default::default()
    }
}
