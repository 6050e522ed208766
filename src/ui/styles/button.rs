// SPDX-License-Identifier: MPL-2.0
//! Button styles.

use crate::ui::design_tokens::{
    opacity,
    palette::{BLACK, WHITE},
    radius, shadow,
};
use iced::widget::button;
use iced::{Background, Border, Color, Theme};

/// Borderless control button drawn straight on top of the video.
///
/// Only a faint backdrop appears on hover and press so the icons stay
/// readable without hiding the picture.
pub fn icon(_theme: &Theme, status: button::Status) -> button::Style {
    let alpha = match status {
        button::Status::Hovered => opacity::OVERLAY_SUBTLE,
        button::Status::Pressed => opacity::OVERLAY_MEDIUM,
        _ => opacity::TRANSPARENT,
    };

    button::Style {
        background: Some(Background::Color(Color { a: alpha, ..BLACK })),
        text_color: WHITE,
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: radius::FULL.into(),
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Variant of [`icon`] that stays highlighted, used while the volume popup is open.
pub fn icon_active(theme: &Theme, status: button::Status) -> button::Style {
    let base = icon(theme, status);
    let alpha = match status {
        button::Status::Pressed => opacity::OVERLAY_PRESSED,
        _ => opacity::OVERLAY_MEDIUM,
    };
    button::Style {
        background: Some(Background::Color(Color { a: alpha, ..BLACK })),
        shadow: shadow::MD,
        ..base
    }
}
