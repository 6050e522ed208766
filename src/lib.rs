// SPDX-License-Identifier: MPL-2.0
//! `iced_marquee` is a lightweight video player built with the Iced GUI framework.
//!
//! A [`player::Player`] mirrors the state of a [`media::MediaElement`] into
//! overlay controls and turns clicks and key presses back into element
//! commands. The desktop element, [`media::NativeVideo`], decodes with FFmpeg
//! and plays audio through cpal.

#![doc(html_root_url = "https://docs.rs/iced_marquee/0.1.0")]

pub mod app;
pub mod error;
pub mod fullscreen;
pub mod media;
pub mod player;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;
