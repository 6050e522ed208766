// SPDX-License-Identifier: MPL-2.0
//! Desktop media element backed by the FFmpeg/cpal engine.
//!
//! A [`NativeVideo`] is a handle: clones share one property block and one
//! listener registry with the engine thread. Property writes update the
//! block immediately and forward a command to the engine; events are
//! dispatched by the engine as playback progresses.

use super::element::{EventCallback, MediaElement, MediaEventKind};
use super::engine::{self, EngineCommand, VideoFrame};
use super::listeners::{EventTarget, ListenerGuard};
use crate::app::config::{
    DEFAULT_TIMEUPDATE_INTERVAL_MS, DEFAULT_VOLUME, MAX_VOLUME, MIN_VOLUME,
};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::mpsc;

/// Engine settings fixed for the lifetime of one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NativeOptions {
    pub initial_volume: f64,
    pub timeupdate_interval: Duration,
}

impl Default for NativeOptions {
    fn default() -> Self {
        Self {
            initial_volume: DEFAULT_VOLUME,
            timeupdate_interval: Duration::from_millis(DEFAULT_TIMEUPDATE_INTERVAL_MS),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Props {
    pub duration: f64,
    pub current_time: f64,
    pub paused: bool,
    pub ended: bool,
    pub volume: f64,
}

impl Props {
    fn new(volume: f64) -> Self {
        Self {
            duration: f64::NAN,
            current_time: 0.0,
            paused: true,
            ended: false,
            volume,
        }
    }
}

/// State shared between element handles and the engine thread.
#[derive(Debug)]
pub(crate) struct Shared {
    props: Mutex<Props>,
    pub events: EventTarget,
}

impl Shared {
    pub(crate) fn new(volume: f64) -> Self {
        Self {
            props: Mutex::new(Props::new(volume)),
            events: EventTarget::new(),
        }
    }

    /// Locks the property block, recovering from a poisoned lock since
    /// `Props` is plain data and always left consistent.
    pub fn props(&self) -> MutexGuard<'_, Props> {
        self.props
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Clamps a requested seek position the way the element accepts it.
/// Returns `None` for values that must be ignored.
pub(crate) fn clamp_seek(requested: f64, duration: f64) -> Option<f64> {
    if !requested.is_finite() {
        return None;
    }
    let lower_bounded = requested.max(0.0);
    if duration.is_finite() {
        Some(lower_bounded.min(duration.max(0.0)))
    } else {
        Some(lower_bounded)
    }
}

pub(crate) fn clamp_volume(requested: f64) -> Option<f64> {
    if requested.is_nan() {
        return None;
    }
    Some(requested.clamp(MIN_VOLUME, MAX_VOLUME))
}

/// Handle onto a media source playing in the native engine.
#[derive(Clone)]
pub struct NativeVideo {
    shared: Arc<Shared>,
    commands: mpsc::UnboundedSender<EngineCommand>,
}

impl std::fmt::Debug for NativeVideo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let props = *self.shared.props();
        f.debug_struct("NativeVideo")
            .field("duration", &props.duration)
            .field("current_time", &props.current_time)
            .field("paused", &props.paused)
            .finish()
    }
}

impl NativeVideo {
    /// Opens `path` and starts the engine on a blocking thread.
    ///
    /// Decoded frames arrive on the returned receiver. Load failures are not
    /// reported here: the engine logs them and the element simply never
    /// fires `loadedmetadata`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn open(path: PathBuf, options: NativeOptions) -> (Self, mpsc::Receiver<VideoFrame>) {
        let volume = clamp_volume(options.initial_volume).unwrap_or(DEFAULT_VOLUME);
        let shared = Arc::new(Shared::new(volume));
        let (commands, command_rx) = mpsc::unbounded_channel();
        // Two frames of slack keeps memory bounded while the UI catches up.
        let (frame_tx, frame_rx) = mpsc::channel(2);

        engine::spawn(
            path,
            Arc::clone(&shared),
            command_rx,
            frame_tx,
            engine::EngineOptions {
                initial_volume: volume,
                timeupdate_interval: options.timeupdate_interval,
            },
        );

        (Self { shared, commands }, frame_rx)
    }

    fn send(&self, command: EngineCommand) {
        if self.commands.send(command).is_err() {
            tracing::debug!(?command, "media engine stopped; command dropped");
        }
    }

    #[cfg(test)]
    pub(crate) fn detached(volume: f64) -> (Self, mpsc::UnboundedReceiver<EngineCommand>) {
        let (commands, command_rx) = mpsc::unbounded_channel();
        (
            Self {
                shared: Arc::new(Shared::new(volume)),
                commands,
            },
            command_rx,
        )
    }

    #[cfg(test)]
    pub(crate) fn shared(&self) -> &Shared {
        &self.shared
    }
}

impl MediaElement for NativeVideo {
    fn play(&self) {
        let restart = {
            let mut props = self.shared.props();
            let restart = props.ended;
            if restart {
                props.ended = false;
                props.current_time = 0.0;
            }
            props.paused = false;
            restart
        };
        if restart {
            self.send(EngineCommand::Seek(0.0));
        }
        self.send(EngineCommand::Play);
    }

    fn pause(&self) {
        self.shared.props().paused = true;
        self.send(EngineCommand::Pause);
    }

    fn paused(&self) -> bool {
        self.shared.props().paused
    }

    fn duration(&self) -> f64 {
        self.shared.props().duration
    }

    fn current_time(&self) -> f64 {
        self.shared.props().current_time
    }

    fn set_current_time(&self, secs: f64) {
        let target = {
            let mut props = self.shared.props();
            let Some(target) = clamp_seek(secs, props.duration) else {
                tracing::debug!(requested = secs, "ignoring non-finite seek");
                return;
            };
            props.current_time = target;
            props.ended = false;
            target
        };
        self.send(EngineCommand::Seek(target));
    }

    fn volume(&self) -> f64 {
        self.shared.props().volume
    }

    fn set_volume(&self, volume: f64) {
        let Some(volume) = clamp_volume(volume) else {
            return;
        };
        self.shared.props().volume = volume;
        self.send(EngineCommand::Volume(volume));
    }

    fn add_event_listener(&self, kind: MediaEventKind, callback: EventCallback) -> ListenerGuard {
        self.shared.events.add_listener(kind, callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    fn with_duration(duration: f64) -> (NativeVideo, mpsc::UnboundedReceiver<EngineCommand>) {
        let (video, rx) = NativeVideo::detached(0.5);
        video.shared().props().duration = duration;
        (video, rx)
    }

    #[test]
    fn duration_is_nan_before_metadata() {
        let (video, _rx) = NativeVideo::detached(0.5);
        assert!(video.duration().is_nan());
        assert!(video.paused());
    }

    #[test]
    fn seek_clamps_to_start_and_end() {
        let (video, mut rx) = with_duration(120.0);

        video.set_current_time(-5.0);
        assert_abs_diff_eq!(video.current_time(), 0.0);
        assert_eq!(rx.try_recv().ok(), Some(EngineCommand::Seek(0.0)));

        video.set_current_time(500.0);
        assert_abs_diff_eq!(video.current_time(), 120.0);
        assert_eq!(rx.try_recv().ok(), Some(EngineCommand::Seek(120.0)));
    }

    #[test]
    fn non_finite_seek_is_ignored() {
        let (video, mut rx) = with_duration(120.0);
        video.set_current_time(30.0);
        let _ = rx.try_recv();

        video.set_current_time(f64::NAN);
        video.set_current_time(f64::INFINITY);

        assert_abs_diff_eq!(video.current_time(), 30.0);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn seek_before_metadata_only_bounds_below() {
        let (video, _rx) = NativeVideo::detached(0.5);
        video.set_current_time(42.0);
        assert_abs_diff_eq!(video.current_time(), 42.0);
    }

    #[test]
    fn volume_is_clamped() {
        let (video, mut rx) = NativeVideo::detached(0.5);
        video.set_volume(1.7);
        assert_abs_diff_eq!(video.volume(), 1.0);
        assert_eq!(rx.try_recv().ok(), Some(EngineCommand::Volume(1.0)));

        video.set_volume(-0.2);
        assert_abs_diff_eq!(video.volume(), 0.0);

        video.set_volume(f64::NAN);
        assert_abs_diff_eq!(video.volume(), 0.0);
    }

    #[test]
    fn play_and_pause_toggle_paused_flag() {
        let (video, mut rx) = NativeVideo::detached(0.5);
        video.play();
        assert!(!video.paused());
        assert_eq!(rx.try_recv().ok(), Some(EngineCommand::Play));

        video.pause();
        assert!(video.paused());
        assert_eq!(rx.try_recv().ok(), Some(EngineCommand::Pause));
    }

    #[test]
    fn play_after_end_restarts_from_zero() {
        let (video, mut rx) = with_duration(60.0);
        {
            let mut props = video.shared().props();
            props.current_time = 60.0;
            props.ended = true;
        }

        video.play();

        assert_abs_diff_eq!(video.current_time(), 0.0);
        assert_eq!(rx.try_recv().ok(), Some(EngineCommand::Seek(0.0)));
        assert_eq!(rx.try_recv().ok(), Some(EngineCommand::Play));
    }

    #[test]
    fn commands_after_engine_stop_are_dropped_quietly() {
        let (video, rx) = NativeVideo::detached(0.5);
        drop(rx);
        video.play();
        video.set_volume(0.3);
        assert_abs_diff_eq!(video.volume(), 0.3);
    }

    #[test]
    fn clones_share_properties_and_listeners() {
        let (video, _rx) = NativeVideo::detached(0.5);
        let clone = video.clone();
        let _guard = clone.add_event_listener(MediaEventKind::TimeUpdate, Box::new(|| {}));

        video.set_volume(0.8);
        assert_abs_diff_eq!(clone.volume(), 0.8);
        assert_eq!(video.shared().events.listener_count(), 1);
    }

    #[test]
    fn clamp_seek_with_unbounded_duration() {
        assert_eq!(clamp_seek(-1.0, f64::INFINITY), Some(0.0));
        assert_eq!(clamp_seek(1e6, f64::INFINITY), Some(1e6));
        assert_eq!(clamp_seek(f64::NEG_INFINITY, 10.0), None);
    }
}
