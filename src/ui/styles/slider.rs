// SPDX-License-Identifier: MPL-2.0
//! Slider style definitions.

use crate::ui::design_tokens::{
    opacity,
    palette::{self, WHITE},
};
use iced::widget::slider;
use iced::{Background, Border, Color, Theme};

/// Volume slider: rose filled part, translucent white remainder.
pub fn volume(_theme: &Theme, status: slider::Status) -> slider::Style {
    let handle = match status {
        slider::Status::Hovered | slider::Status::Dragged => palette::ROSE_300,
        slider::Status::Active => WHITE,
    };

    slider::Style {
        rail: slider::Rail {
            backgrounds: (
                Background::Color(palette::ROSE_400),
                Background::Color(Color {
                    a: opacity::OVERLAY_MEDIUM,
                    ..WHITE
                }),
            ),
            width: 4.0,
            border: Border {
                color: Color::TRANSPARENT,
                width: 0.0,
                radius: 2.0.into(),
            },
        },
        handle: slider::Handle {
            shape: slider::HandleShape::Circle { radius: 6.0 },
            background: Background::Color(handle),
            border_width: 0.0,
            border_color: Color::TRANSPARENT,
        },
    }
}
