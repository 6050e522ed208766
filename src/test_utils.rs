// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons.
//!
//! Re-exports the `approx` assertion macros so tests compare playback times
//! and percentages with a tolerance instead of `assert_eq!`.

pub use approx::assert_abs_diff_eq;
