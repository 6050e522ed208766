// SPDX-License-Identifier: MPL-2.0
//! The media element contract.
//!
//! Mirrors the subset of an HTML media element the controls rely on: a
//! handful of transport properties and two timing events. Implementations
//! are cheap, cloneable handles onto shared state, so every method takes
//! `&self`.

use super::listeners::ListenerGuard;

/// Events the controls subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaEventKind {
    /// The duration became known.
    LoadedMetadata,
    /// The current playback position changed.
    TimeUpdate,
}

impl MediaEventKind {
    /// The DOM event name, used in logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            MediaEventKind::LoadedMetadata => "loadedmetadata",
            MediaEventKind::TimeUpdate => "timeupdate",
        }
    }
}

/// Callback invoked when an event fires. Runs on whichever thread
/// dispatched the event, so it must not block.
pub type EventCallback = Box<dyn Fn() + Send + Sync + 'static>;

/// A playable resource with transport controls and timing events.
pub trait MediaElement: Clone + std::fmt::Debug + Send + Sync + 'static {
    /// Starts or resumes playback. Completion is never awaited.
    fn play(&self);

    fn pause(&self);

    /// Whether the element is currently paused.
    fn paused(&self) -> bool;

    /// Length in seconds: NaN before metadata, `+Infinity` when unknown.
    fn duration(&self) -> f64;

    /// Playback position in seconds.
    fn current_time(&self) -> f64;

    /// Requests a new playback position. Implementations decide how to
    /// treat out-of-range values.
    fn set_current_time(&self, secs: f64);

    /// Volume in `[0.0, 1.0]`.
    fn volume(&self) -> f64;

    fn set_volume(&self, volume: f64);

    /// Registers `callback` for `kind`. The listener stays attached for as
    /// long as the returned guard is alive.
    #[must_use = "dropping the guard detaches the listener immediately"]
    fn add_event_listener(&self, kind: MediaEventKind, callback: EventCallback) -> ListenerGuard;
}
