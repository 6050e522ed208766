// SPDX-License-Identifier: MPL-2.0
//! Transport state of the decode loop.
//!
//! Tracks play/pause, seeks, end of stream and the playback position, and
//! publishes them to the element's property block and listeners. The FFmpeg
//! side in [`engine`](super::engine) only reports decoded timestamps and asks
//! whether another packet should be read.

use super::element::MediaEventKind;
use super::native::Shared;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Frames this close before a seek target are shown rather than skipped.
const SEEK_TOLERANCE_SECS: f64 = 0.02;

/// Maps media positions to wall-clock instants while playing.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct PlaybackClock {
    anchor: Option<(Instant, f64)>,
}

impl PlaybackClock {
    /// Starts counting from `position` at `now`.
    pub fn start(&mut self, position: f64, now: Instant) {
        self.anchor = Some((now, position));
    }

    pub fn stop(&mut self) {
        self.anchor = None;
    }

    pub fn is_running(&self) -> bool {
        self.anchor.is_some()
    }

    /// Media position at `now`, or `None` while stopped.
    pub fn position(&self, now: Instant) -> Option<f64> {
        self.anchor.map(|(instant, position)| {
            position + now.saturating_duration_since(instant).as_secs_f64()
        })
    }

    /// How long to wait at `now` before `pts` is due. Zero when late or stopped.
    pub fn delay_until(&self, pts: f64, now: Instant) -> Duration {
        match self.position(now) {
            Some(position) if pts > position => Duration::from_secs_f64(pts - position),
            _ => Duration::ZERO,
        }
    }
}

/// Limits how often `timeupdate` fires during playback.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TimeUpdateThrottle {
    interval: Duration,
    last: Option<Instant>,
}

impl TimeUpdateThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Returns true and records `now` when an event is due.
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Records an event fired outside the periodic cadence.
    pub fn mark(&mut self, now: Instant) {
        self.last = Some(now);
    }
}

/// Whether the loop should demux another packet.
///
/// While paused, packets are only read to show one preview frame, which an
/// audio-only source never needs.
pub(crate) fn should_read_packet(playing: bool, show_next_frame: bool, at_end: bool) -> bool {
    !at_end && (playing || show_next_frame)
}

pub(crate) struct Transport {
    shared: Arc<Shared>,
    clock: PlaybackClock,
    throttle: TimeUpdateThrottle,
    duration: f64,
    position: f64,
    playing: bool,
    at_end: bool,
    has_video: bool,
    /// Decode one video frame while paused (poster, seek preview).
    show_next_frame: bool,
    /// Frames before this position are decoded but not presented.
    skip_until: Option<f64>,
}

impl Transport {
    pub fn new(
        shared: Arc<Shared>,
        duration: f64,
        has_video: bool,
        timeupdate_interval: Duration,
    ) -> Self {
        Self {
            shared,
            clock: PlaybackClock::default(),
            throttle: TimeUpdateThrottle::new(timeupdate_interval),
            duration,
            position: 0.0,
            playing: false,
            at_end: false,
            has_video,
            show_next_frame: has_video,
            skip_until: None,
        }
    }

    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn wants_packet(&self) -> bool {
        should_read_packet(self.playing, self.show_next_frame, self.at_end)
    }

    /// Publishes the duration and fires `loadedmetadata`.
    pub fn announce_metadata(&self) {
        self.shared.props().duration = self.duration;
        self.shared.events.dispatch(MediaEventKind::LoadedMetadata);
    }

    /// Starts the clock. Returns false when already playing.
    pub fn play(&mut self, now: Instant) -> bool {
        if self.playing {
            return false;
        }
        self.playing = true;
        self.clock.start(self.position, now);
        true
    }

    pub fn pause(&mut self, now: Instant) {
        self.playing = false;
        self.clock.stop();
        self.publish_time(now);
    }

    /// Moves to `target` once the demuxer has seeked there.
    pub fn seek_done(&mut self, target: f64, now: Instant) {
        self.position = target;
        self.at_end = false;
        self.skip_until = Some(target);
        self.show_next_frame = self.has_video && !self.playing;
        if self.playing {
            self.clock.start(target, now);
        }
        self.publish_time(now);
    }

    /// The demuxer refused the seek: the element goes back to the position
    /// actually reached.
    pub fn seek_failed(&mut self, now: Instant) {
        self.publish_time(now);
    }

    /// Periodic `timeupdate` while playing.
    pub fn tick(&mut self, now: Instant) {
        if self.playing && self.throttle.ready(now) {
            self.publish_time(now);
        }
    }

    pub fn reach_end(&mut self, now: Instant) {
        tracing::debug!(position = self.position, "end of stream");
        if self.duration.is_finite() {
            self.position = self.duration;
        }
        self.at_end = true;
        self.playing = false;
        self.show_next_frame = false;
        self.clock.stop();
        {
            let mut props = self.shared.props();
            props.paused = true;
            props.ended = true;
        }
        self.publish_time(now);
    }

    /// Whether a decoded video frame at `pts` should be shown. The first
    /// frame at or past a seek target ends the skip.
    pub fn accept_video_frame(&mut self, pts: f64) -> bool {
        if let Some(target) = self.skip_until {
            if pts + SEEK_TOLERANCE_SECS < target {
                return false;
            }
            self.skip_until = None;
        }
        true
    }

    pub fn video_presented(&mut self, pts: f64) {
        self.position = pts.max(0.0);
        self.show_next_frame = false;
    }

    /// Paused preview decoding and pre-target frames produce no sound.
    pub fn accept_audio_frame(&self, pts: f64) -> bool {
        self.playing && !self.skip_until.is_some_and(|target| pts < target)
    }

    /// Without video, audio drives the position.
    pub fn audio_played(&mut self, pts: f64) {
        if !self.has_video {
            self.position = pts.max(0.0);
            self.skip_until = None;
        }
    }

    fn publish_time(&mut self, now: Instant) {
        self.shared.props().current_time = self.position;
        self.throttle.mark(now);
        self.shared.events.dispatch(MediaEventKind::TimeUpdate);
    }
}
