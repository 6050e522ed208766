// SPDX-License-Identifier: MPL-2.0
//! Centralized icon module for the control glyphs.
//!
//! Icons are outline SVGs embedded as static strings and handles are cached
//! using `OnceLock`, so each one is parsed at most once. Every icon is drawn
//! with a white stroke and tinted through [`styles::overlay`](super::styles::overlay).
//!
//! # Naming Convention
//!
//! Icons use generic visual names describing the icon's appearance,
//! not the action context (e.g., `step_back` not `rewind_ten_seconds`).

use crate::ui::styles;
use iced::widget::svg::{Handle, Svg};
use iced::Length;
use std::sync::OnceLock;

// =============================================================================
// Macro for icon definition with cached handle
// =============================================================================

/// Wraps the shared `<svg>` shell around the given body.
macro_rules! svg_document {
    ($body:literal) => {
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" "#,
            r#"fill="none" stroke="white" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">"#,
            $body,
            "</svg>"
        )
    };
}

/// Defines an icon function with a cached handle.
/// The handle is created once on first access and reused thereafter.
macro_rules! define_icon {
    ($name:ident, $body:literal, $doc:literal) => {
        #[doc = $doc]
        pub fn $name() -> Svg<'static> {
            static HANDLE: OnceLock<Handle> = OnceLock::new();
            static DATA: &str = svg_document!($body);
            let handle = HANDLE.get_or_init(|| Handle::from_memory(DATA.as_bytes()));
            Svg::new(handle.clone()).style(styles::overlay::white_icon)
        }
    };
}

// =============================================================================
// Playback Icons
// =============================================================================

define_icon!(
    circle_play,
    r#"<circle cx="12" cy="12" r="10"/><polygon points="10 8 16 12 10 16 10 8"/>"#,
    "Play icon: triangle inside a circle."
);
define_icon!(
    circle_pause,
    r#"<circle cx="12" cy="12" r="10"/><line x1="10" x2="10" y1="15" y2="9"/><line x1="14" x2="14" y1="15" y2="9"/>"#,
    "Pause icon: two vertical bars inside a circle."
);
define_icon!(
    step_back,
    r#"<line x1="18" x2="18" y1="20" y2="4"/><polygon points="14 20 4 12 14 4 14 20"/>"#,
    "Step back icon: triangle pointing left against a bar."
);
define_icon!(
    step_forward,
    r#"<line x1="6" x2="6" y1="4" y2="20"/><polygon points="10 4 20 12 10 20 10 4"/>"#,
    "Step forward icon: triangle pointing right against a bar."
);

// =============================================================================
// Volume Icons
// =============================================================================

define_icon!(
    volume_2,
    r#"<path d="M11 4.7a.7.7 0 0 0-1.2-.5L6.4 7.6A1.4 1.4 0 0 1 5.4 8H3a1 1 0 0 0-1 1v6a1 1 0 0 0 1 1h2.4a1.4 1.4 0 0 1 1 .4l3.4 3.4a.7.7 0 0 0 1.2-.5z"/><path d="M16 9a5 5 0 0 1 0 6"/><path d="M19.4 18.4a9 9 0 0 0 0-12.8"/>"#,
    "Volume icon: speaker with two sound waves."
);
define_icon!(
    volume_x,
    r#"<path d="M11 4.7a.7.7 0 0 0-1.2-.5L6.4 7.6A1.4 1.4 0 0 1 5.4 8H3a1 1 0 0 0-1 1v6a1 1 0 0 0 1 1h2.4a1.4 1.4 0 0 1 1 .4l3.4 3.4a.7.7 0 0 0 1.2-.5z"/><line x1="22" x2="16" y1="9" y2="15"/><line x1="16" x2="22" y1="9" y2="15"/>"#,
    "Muted volume icon: speaker with a cross."
);

// =============================================================================
// Window Icons
// =============================================================================

define_icon!(
    fullscreen,
    r#"<path d="M3 7V5a2 2 0 0 1 2-2h2"/><path d="M17 3h2a2 2 0 0 1 2 2v2"/><path d="M21 17v2a2 2 0 0 1-2 2h-2"/><path d="M7 21H5a2 2 0 0 1-2-2v-2"/><rect width="10" height="8" x="7" y="8" rx="1"/>"#,
    "Fullscreen icon: framed rectangle with corner brackets."
);
define_icon!(
    tv_minimal_play,
    r#"<path d="M10 7.75a.75.75 0 0 1 1.14-.64l3.72 2.25a.75.75 0 0 1 0 1.28l-3.72 2.25A.75.75 0 0 1 10 12.25z"/><path d="M7 21h10"/><rect width="20" height="14" x="2" y="3" rx="2"/>"#,
    "Brand icon: television screen with a play triangle."
);

// =============================================================================
// Helpers
// =============================================================================

/// Gives an icon a square size.
pub fn sized(icon: Svg<'static>, size: f32) -> Svg<'static> {
    icon.width(Length::Fixed(size)).height(Length::Fixed(size))
}
