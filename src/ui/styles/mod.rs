// SPDX-License-Identifier: MPL-2.0
//! Centralized styles for the player overlay.

pub mod button;
pub mod container;
pub mod overlay;
pub mod slider;

pub use button::icon as button_icon;
