// SPDX-License-Identifier: MPL-2.0
//! Message handlers for `App::update`.
//!
//! Each handler receives an [`UpdateContext`] borrowing only the pieces of
//! the application it touches and returns the follow-up task.

use super::config::{self, Config};
use super::message::{FullscreenIntent, Message, Shortcut};
use crate::fullscreen::{FullscreenProvider, WindowHost};
use crate::media::{MediaElement, MediaMessage, NativeVideo, SessionId};
use crate::player::{self, Effect, Player};
use iced::{window, Task};
use std::path::PathBuf;

/// Mutable view of the application state shared by the handlers.
pub(super) struct UpdateContext<'a> {
    pub player: &'a mut Player<NativeVideo>,
    pub fullscreen: &'a mut WindowHost,
    pub session: &'a mut SessionId,
    pub source: &'a mut PathBuf,
    pub config: &'a mut Config,
    pub config_dir: Option<&'a PathBuf>,
}

pub(super) fn handle_player_message(
    ctx: &mut UpdateContext<'_>,
    message: player::Message,
) -> Task<Message> {
    match ctx.player.update(message) {
        Effect::None => Task::none(),
        Effect::ToggleFullscreen => read_window_mode(ctx, FullscreenIntent::Toggle),
    }
}

/// Reads the window's real mode before acting on `intent`.
///
/// Without a window there is nothing to read and nothing to change, so the
/// intent runs at once against the cached mode and stays a no-op.
fn read_window_mode(ctx: &mut UpdateContext<'_>, intent: FullscreenIntent) -> Task<Message> {
    match ctx
        .fullscreen
        .query_mode(move |mode| Message::WindowModeRead { intent, mode })
    {
        Some(task) => task,
        None => apply_fullscreen_intent(ctx, intent),
    }
}

pub(super) fn handle_window_mode_read(
    ctx: &mut UpdateContext<'_>,
    intent: FullscreenIntent,
    mode: window::Mode,
) -> Task<Message> {
    ctx.fullscreen.sync_mode(mode);
    apply_fullscreen_intent(ctx, intent)
}

fn apply_fullscreen_intent(ctx: &mut UpdateContext<'_>, intent: FullscreenIntent) -> Task<Message> {
    match intent {
        FullscreenIntent::Toggle => {
            ctx.player.fullscreen(ctx.fullscreen);
        }
        FullscreenIntent::Exit => {
            if ctx.fullscreen.is_fullscreen() {
                ctx.fullscreen.exit_fullscreen();
            }
        }
        FullscreenIntent::Sync => {}
    }
    ctx.fullscreen.take_task()
}

pub(super) fn handle_window_resized(ctx: &mut UpdateContext<'_>, window: window::Id) -> Task<Message> {
    ctx.fullscreen.set_window_id(window);
    read_window_mode(ctx, FullscreenIntent::Sync)
}

/// Wires the media session into the player.
///
/// Only the current session may mount; anything tagged with an older
/// session id is dropped by the player itself.
pub(super) fn handle_media_message(
    ctx: &mut UpdateContext<'_>,
    message: MediaMessage,
) -> Task<Message> {
    match message {
        MediaMessage::Attached {
            session,
            element,
            events,
        } => {
            if session == *ctx.session {
                ctx.player
                    .mount(session, element, move |kind| events.notify(kind));
            } else {
                tracing::debug!(%session, current = %ctx.session, "ignoring stale media session");
            }
        }
        MediaMessage::Event { session, kind } => ctx.player.handle_event(session, kind),
        MediaMessage::Frame { session, frame } => ctx.player.present_frame(session, frame),
    }
    Task::none()
}

pub(super) fn handle_shortcut(
    ctx: &mut UpdateContext<'_>,
    window: window::Id,
    shortcut: Shortcut,
) -> Task<Message> {
    ctx.fullscreen.set_window_id(window);
    let step = ctx.player.settings().seek_step_secs;

    match shortcut {
        Shortcut::PlayPause => handle_player_message(ctx, player::Message::PlayPause),
        Shortcut::StepBack => handle_player_message(ctx, player::Message::Seek(-step)),
        Shortcut::StepForward => handle_player_message(ctx, player::Message::Seek(step)),
        Shortcut::ToggleFullscreen => {
            handle_player_message(ctx, player::Message::ToggleFullscreen)
        }
        Shortcut::ExitFullscreen => read_window_mode(ctx, FullscreenIntent::Exit),
    }
}

/// Replaces the media source: the player unmounts, and the next session id
/// makes the subscription open a fresh element.
pub(super) fn handle_file_dropped(ctx: &mut UpdateContext<'_>, path: PathBuf) -> Task<Message> {
    tracing::debug!(path = %path.display(), "media source dropped");
    ctx.player.unmount();
    *ctx.session = ctx.session.next();
    *ctx.source = path;
    Task::none()
}

/// Persists the volume the user settled on, then closes the window.
pub(super) fn handle_close_requested(
    ctx: &mut UpdateContext<'_>,
    window: window::Id,
) -> Task<Message> {
    persist_volume(ctx);
    window::close(window)
}

fn persist_volume(ctx: &mut UpdateContext<'_>) {
    let volume = ctx
        .player
        .element()
        .map_or(ctx.player.state().volume, MediaElement::volume);
    ctx.config.player.volume = Some(volume);

    if let Err(err) = config::save_with_override(ctx.config, ctx.config_dir.cloned()) {
        tracing::warn!(%err, "failed to save config");
    }
}
