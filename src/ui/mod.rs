// SPDX-License-Identifier: MPL-2.0
//! User interface components.
//!
//! Elm-style "state down, messages up": widgets here render a
//! [`PlaybackState`](crate::player::PlaybackState) and emit
//! [`player::Message`](crate::player::Message) values, never touching the
//! media element themselves.
//!
//! - [`controls`] - Video surface with the overlay controls
//! - [`progress_track`] - Clickable progress bar canvas
//! - [`styles`] - Centralized styling (buttons, containers, overlays, sliders)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management
//! - [`icons`] - SVG control glyphs

pub mod controls;
pub mod design_tokens;
pub mod icons;
pub mod progress_track;
pub mod styles;
pub mod theming;
