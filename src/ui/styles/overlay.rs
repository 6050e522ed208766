// SPDX-License-Identifier: MPL-2.0
//! Overlay styles for icons and text drawn over the video.

use crate::ui::design_tokens::palette::WHITE;
use iced::widget::{svg, text};
use iced::{Color, Theme};

/// Tints an SVG icon with a fixed color regardless of theme.
pub fn icon(color: Color) -> impl Fn(&Theme, svg::Status) -> svg::Style {
    move |_theme: &Theme, _status: svg::Status| svg::Style { color: Some(color) }
}

/// White icon used by every control button.
pub fn white_icon(theme: &Theme, status: svg::Status) -> svg::Style {
    icon(WHITE)(theme, status)
}

/// Text over the video always stays white.
#[must_use]
pub fn label(_theme: &Theme) -> text::Style {
    text::Style { color: Some(WHITE) }
}
