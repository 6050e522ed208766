// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! Translations are Fluent `.ftl` files embedded at build time from
//! `assets/i18n/`. The active locale is chosen once at startup from the CLI,
//! the config file, or the operating system, and falls back to `en-US`.

pub mod fluent;
