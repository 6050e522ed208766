// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Source**: Media source used when nothing else is given
//! - **Volume**: Initial playback volume and slider bounds
//! - **Seek**: Step-back/step-forward distance
//! - **Events**: Native element `timeupdate` cadence
//! - **Branding**: Label shown in the top-left corner

// ==========================================================================
// Source Defaults
// ==========================================================================

/// Media source opened when neither the CLI nor the config names one.
pub const DEFAULT_MEDIA_SOURCE: &str = "test.mp4";

// ==========================================================================
// Volume Defaults
// ==========================================================================

/// Initial volume of a freshly mounted player (0.0 to 1.0).
pub const DEFAULT_VOLUME: f64 = 0.5;

/// Minimum volume level accepted by the native element.
pub const MIN_VOLUME: f64 = 0.0;

/// Maximum volume level accepted by the native element.
pub const MAX_VOLUME: f64 = 1.0;

/// Volume slider granularity.
pub const VOLUME_SLIDER_STEP: f64 = 0.1;

// ==========================================================================
// Seek Defaults
// ==========================================================================

/// Distance covered by the step-back and step-forward buttons (seconds).
pub const DEFAULT_SEEK_STEP_SECS: f64 = 10.0;

/// Minimum configurable seek step in seconds.
pub const MIN_SEEK_STEP_SECS: f64 = 1.0;

/// Maximum configurable seek step in seconds.
pub const MAX_SEEK_STEP_SECS: f64 = 300.0;

// ==========================================================================
// Event Defaults
// ==========================================================================

/// Interval between `timeupdate` events during playback (milliseconds).
pub const DEFAULT_TIMEUPDATE_INTERVAL_MS: u64 = 250;

/// Lower bound for the `timeupdate` interval (milliseconds).
pub const MIN_TIMEUPDATE_INTERVAL_MS: u64 = 15;

/// Upper bound for the `timeupdate` interval (milliseconds).
pub const MAX_TIMEUPDATE_INTERVAL_MS: u64 = 1000;

// ==========================================================================
// Branding Defaults
// ==========================================================================

/// Label rendered next to the TV icon.
pub const DEFAULT_BRAND_LABEL: &str = "Brand Name";
