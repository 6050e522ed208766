// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Native window and keyboard events are turned into top-level messages
//! here; the media session subscription lives in [`crate::media`].

use super::message::{Message, Shortcut};
use crate::media::{self, NativeOptions, SessionId};
use iced::keyboard::{self, key, Key};
use iced::{event, window, Subscription};
use std::path::Path;

/// Routes window events and unhandled key presses.
///
/// Window close requests, resizes and file drops are always forwarded; key
/// presses only when no widget captured them.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, status, window_id| {
        match &event {
            event::Event::Window(window::Event::CloseRequested) => {
                return Some(Message::WindowCloseRequested(window_id));
            }
            event::Event::Window(window::Event::FileDropped(path)) => {
                return Some(Message::FileDropped(path.clone()));
            }
            event::Event::Window(window::Event::Resized(_)) => {
                return Some(Message::WindowResized(window_id));
            }
            _ => {}
        }

        match (event, status) {
            (
                event::Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }),
                event::Status::Ignored,
            ) => shortcut_for(&key, modifiers).map(|shortcut| Message::Shortcut {
                window: window_id,
                shortcut,
            }),
            _ => None,
        }
    })
}

/// Reports the id of every window as it opens.
pub fn create_window_subscription() -> Subscription<Message> {
    window::open_events().map(Message::WindowOpened)
}

/// Creates the media subscription for the current session.
pub fn create_media_subscription(
    source: &Path,
    session: SessionId,
    options: NativeOptions,
) -> Subscription<Message> {
    media::media_session(source.to_path_buf(), session, options).map(Message::Media)
}

/// Maps a key press to a shortcut. Chords with Ctrl, Alt or Logo are left
/// to the platform.
pub(crate) fn shortcut_for(key: &Key, modifiers: keyboard::Modifiers) -> Option<Shortcut> {
    if modifiers.control() || modifiers.alt() || modifiers.logo() {
        return None;
    }

    match key.as_ref() {
        Key::Named(key::Named::Space) => Some(Shortcut::PlayPause),
        Key::Named(key::Named::ArrowLeft) => Some(Shortcut::StepBack),
        Key::Named(key::Named::ArrowRight) => Some(Shortcut::StepForward),
        Key::Named(key::Named::Escape) => Some(Shortcut::ExitFullscreen),
        Key::Character(c) if c.eq_ignore_ascii_case("f") => Some(Shortcut::ToggleFullscreen),
        _ => None,
    }
}
