// SPDX-License-Identifier: MPL-2.0
//! FFmpeg decode loop behind [`NativeVideo`](super::NativeVideo).
//!
//! One blocking thread demuxes the source, decodes video to RGBA frames and
//! audio to interleaved f32, paces both against a wall clock, and publishes
//! the element's properties and events. The loop ends when every element
//! handle has been dropped.

use super::audio_output::AudioOutput;
use super::native::Shared;
use super::transport::Transport;
use crate::error::{Error, MediaError, Result};
use std::path::PathBuf;
use std::sync::{Arc, Once};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// FFmpeg seek timestamps are in `AV_TIME_BASE` units (microseconds).
const AV_TIME_BASE_F64: f64 = 1_000_000.0;

/// Sleep while paused, between command polls.
const IDLE_POLL: Duration = Duration::from_millis(10);

/// Audio is decoded this far ahead of the clock to keep the device fed.
const AUDIO_LEAD_SECS: f64 = 0.25;

static FFMPEG_INIT: Once = Once::new();

/// Initializes FFmpeg once and restricts its logging to errors.
pub fn init_ffmpeg() -> Result<()> {
    let mut init_result: Result<()> = Ok(());

    FFMPEG_INIT.call_once(|| {
        if let Err(e) = ffmpeg_next::init() {
            init_result = Err(MediaError::Other(format!("FFmpeg initialization failed: {e}")).into());
            return;
        }

        // SAFETY: av_log_set_level is thread-safe and only affects logging
        unsafe {
            ffmpeg_next::ffi::av_log_set_level(ffmpeg_next::ffi::AV_LOG_ERROR);
        }
    });

    init_result
}

/// A decoded video frame ready for display.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    /// RGBA pixel data (width × height × 4 bytes).
    pub rgba: Arc<Vec<u8>>,
    pub width: u32,
    pub height: u32,
    /// Presentation timestamp in seconds.
    pub pts_secs: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum EngineCommand {
    Play,
    Pause,
    Seek(f64),
    Volume(f64),
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct EngineOptions {
    pub initial_volume: f64,
    pub timeupdate_interval: Duration,
}

/// Converts a container duration in `AV_TIME_BASE` units to seconds.
/// Unknown or non-positive durations mean the length is unknown.
pub(crate) fn duration_from_container(raw: i64) -> f64 {
    if raw > 0 {
        raw as f64 / AV_TIME_BASE_F64
    } else {
        f64::INFINITY
    }
}

pub(crate) fn spawn(
    path: PathBuf,
    shared: Arc<Shared>,
    commands: mpsc::UnboundedReceiver<EngineCommand>,
    frames: mpsc::Sender<VideoFrame>,
    options: EngineOptions,
) {
    // FFmpeg contexts are not Send, so everything is created on the thread.
    tokio::task::spawn_blocking(move || {
        let display = path.display().to_string();
        match Engine::open(path, shared, commands, frames, options) {
            Ok(mut engine) => {
                if let Err(err) = engine.run() {
                    tracing::warn!(path = %display, %err, "media engine stopped");
                }
            }
            Err(err) => {
                tracing::warn!(path = %display, %err, "media failed to load");
            }
        }
    });
}

struct VideoTrack {
    index: usize,
    decoder: ffmpeg_next::decoder::Video,
    scaler: ffmpeg_next::software::scaling::Context,
    time_base: f64,
}

struct AudioTrack {
    index: usize,
    decoder: ffmpeg_next::decoder::Audio,
    resampler: ffmpeg_next::software::resampling::Context,
    output: AudioOutput,
    time_base: f64,
}

/// What the read loop should do after a command batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

struct Engine {
    ictx: ffmpeg_next::format::context::Input,
    video: Option<VideoTrack>,
    audio: Option<AudioTrack>,
    commands: mpsc::UnboundedReceiver<EngineCommand>,
    frames: mpsc::Sender<VideoFrame>,
    transport: Transport,
}

impl Engine {
    fn open(
        path: PathBuf,
        shared: Arc<Shared>,
        commands: mpsc::UnboundedReceiver<EngineCommand>,
        frames: mpsc::Sender<VideoFrame>,
        options: EngineOptions,
    ) -> Result<Self> {
        init_ffmpeg()?;

        let ictx = ffmpeg_next::format::input(&path).map_err(Error::from)?;
        let video = open_video_track(&ictx)?;
        let audio = match open_audio_track(&ictx, options.initial_volume as f32) {
            Ok(track) => track,
            Err(err) => {
                tracing::warn!(%err, "continuing without audio");
                None
            }
        };
        if video.is_none() && audio.is_none() {
            return Err(MediaError::NoPlayableStream.into());
        }

        let duration = duration_from_container(ictx.duration());
        tracing::debug!(
            path = %path.display(),
            duration,
            has_video = video.is_some(),
            has_audio = audio.is_some(),
            "media opened"
        );

        let transport = Transport::new(
            shared,
            duration,
            video.is_some(),
            options.timeupdate_interval,
        );
        Ok(Self {
            ictx,
            video,
            audio,
            commands,
            frames,
            transport,
        })
    }

    fn run(&mut self) -> Result<()> {
        self.transport.announce_metadata();

        loop {
            if self.drain_commands() == Flow::Stop {
                return Ok(());
            }

            if !self.transport.wants_packet() {
                std::thread::sleep(IDLE_POLL);
                continue;
            }

            let next = self
                .ictx
                .packets()
                .next()
                .map(|(stream, packet)| (stream.index(), packet));
            let flow = match next {
                Some((index, packet)) => self.decode_packet(index, &packet)?,
                None => self.finish_stream()?,
            };
            if flow == Flow::Stop {
                return Ok(());
            }

            self.transport.tick(Instant::now());
        }
    }

    fn drain_commands(&mut self) -> Flow {
        loop {
            match self.commands.try_recv() {
                Ok(command) => self.apply(command),
                Err(mpsc::error::TryRecvError::Empty) => return Flow::Continue,
                Err(mpsc::error::TryRecvError::Disconnected) => return Flow::Stop,
            }
        }
    }

    fn apply(&mut self, command: EngineCommand) {
        tracing::debug!(?command, position = self.transport.position(), "engine command");
        match command {
            EngineCommand::Play => {
                if self.transport.play(Instant::now()) {
                    if let Some(audio) = &self.audio {
                        audio.output.resume();
                    }
                }
            }
            EngineCommand::Pause => {
                self.transport.pause(Instant::now());
                if let Some(audio) = &self.audio {
                    audio.output.pause();
                }
            }
            EngineCommand::Seek(target) => self.seek(target),
            EngineCommand::Volume(volume) => {
                if let Some(audio) = &self.audio {
                    audio.output.set_volume(volume as f32);
                }
            }
        }
    }

    fn seek(&mut self, target: f64) {
        let timestamp = (target * AV_TIME_BASE_F64) as i64;
        // RangeTo lets FFmpeg land on the keyframe before the target.
        if let Err(err) = self.ictx.seek(timestamp, ..timestamp) {
            tracing::warn!(target, %err, "seek failed");
            self.transport.seek_failed(Instant::now());
            return;
        }
        if let Some(video) = &mut self.video {
            video.decoder.flush();
        }
        if let Some(audio) = &mut self.audio {
            audio.decoder.flush();
            audio.output.clear();
        }
        self.transport.seek_done(target, Instant::now());
    }

    /// Flushes the frames the decoders still hold, then ends the stream.
    fn finish_stream(&mut self) -> Result<Flow> {
        if let Some(video) = &mut self.video {
            if let Err(err) = video.decoder.send_eof() {
                tracing::debug!(%err, "video decoder refused end of stream");
            }
        }
        if self.receive_video_frames()? == Flow::Stop {
            return Ok(Flow::Stop);
        }

        if let Some(audio) = &mut self.audio {
            if let Err(err) = audio.decoder.send_eof() {
                tracing::debug!(%err, "audio decoder refused end of stream");
            }
        }
        self.receive_audio_frames();

        self.transport.reach_end(Instant::now());
        Ok(Flow::Continue)
    }

    fn decode_packet(&mut self, index: usize, packet: &ffmpeg_next::Packet) -> Result<Flow> {
        if let Some(video) = self.video.as_mut().filter(|video| video.index == index) {
            if let Err(err) = video.decoder.send_packet(packet) {
                tracing::debug!(%err, "video packet rejected");
                return Ok(Flow::Continue);
            }
            return self.receive_video_frames();
        }
        if let Some(audio) = self.audio.as_mut().filter(|audio| audio.index == index) {
            if let Err(err) = audio.decoder.send_packet(packet) {
                tracing::debug!(%err, "audio packet rejected");
                return Ok(Flow::Continue);
            }
            self.receive_audio_frames();
        }
        Ok(Flow::Continue)
    }

    fn receive_video_frames(&mut self) -> Result<Flow> {
        let Some(video) = &mut self.video else {
            return Ok(Flow::Continue);
        };

        let mut decoded = ffmpeg_next::frame::Video::empty();
        while video.decoder.receive_frame(&mut decoded).is_ok() {
            let pts_secs = decoded
                .timestamp()
                .map_or(self.transport.position(), |pts| pts as f64 * video.time_base);

            if !self.transport.accept_video_frame(pts_secs) {
                continue;
            }

            if self.transport.is_playing() {
                let delay = self.transport.clock().delay_until(pts_secs, Instant::now());
                if !delay.is_zero() {
                    std::thread::sleep(delay);
                }
            }

            let mut rgba = ffmpeg_next::frame::Video::empty();
            video
                .scaler
                .run(&decoded, &mut rgba)
                .map_err(|e| MediaError::Decoder(format!("scaler failed: {e}")))?;

            let frame = VideoFrame {
                rgba: Arc::new(extract_rgba_data(&rgba)),
                width: rgba.width(),
                height: rgba.height(),
                pts_secs,
            };
            self.transport.video_presented(pts_secs);

            if self.frames.blocking_send(frame).is_err() {
                return Ok(Flow::Stop);
            }
        }
        Ok(Flow::Continue)
    }

    fn receive_audio_frames(&mut self) {
        let Some(audio) = &mut self.audio else {
            return;
        };

        let mut decoded = ffmpeg_next::frame::Audio::empty();
        while audio.decoder.receive_frame(&mut decoded).is_ok() {
            let pts_secs = decoded
                .timestamp()
                .map_or(self.transport.position(), |pts| pts as f64 * audio.time_base);

            if !self.transport.accept_audio_frame(pts_secs) {
                continue;
            }

            let mut resampled = ffmpeg_next::frame::Audio::empty();
            if let Err(err) = audio.resampler.run(&decoded, &mut resampled) {
                tracing::debug!(%err, "audio resampling failed");
                continue;
            }

            let delay = self
                .transport
                .clock()
                .delay_until(pts_secs - AUDIO_LEAD_SECS, Instant::now());
            if !delay.is_zero() {
                std::thread::sleep(delay);
            }

            let samples = extract_samples(&resampled, audio.output.source_channels());
            audio.output.push(&samples);
            self.transport.audio_played(pts_secs);
        }
    }
}

fn open_video_track(ictx: &ffmpeg_next::format::context::Input) -> Result<Option<VideoTrack>> {
    let Some(input) = ictx.streams().best(ffmpeg_next::media::Type::Video) else {
        return Ok(None);
    };
    let time_base = input.time_base();
    let context = ffmpeg_next::codec::context::Context::from_parameters(input.parameters())
        .map_err(|e| MediaError::Decoder(format!("video codec context: {e}")))?;
    let decoder = context
        .decoder()
        .video()
        .map_err(|e| MediaError::Decoder(format!("video decoder: {e}")))?;

    let scaler = ffmpeg_next::software::scaling::Context::get(
        decoder.format(),
        decoder.width(),
        decoder.height(),
        ffmpeg_next::format::Pixel::RGBA,
        decoder.width(),
        decoder.height(),
        ffmpeg_next::software::scaling::Flags::BILINEAR,
    )
    .map_err(|e| MediaError::Decoder(format!("scaler: {e}")))?;

    Ok(Some(VideoTrack {
        index: input.index(),
        decoder,
        scaler,
        time_base: f64::from(time_base.numerator()) / f64::from(time_base.denominator()),
    }))
}

fn open_audio_track(
    ictx: &ffmpeg_next::format::context::Input,
    initial_volume: f32,
) -> Result<Option<AudioTrack>> {
    let Some(input) = ictx.streams().best(ffmpeg_next::media::Type::Audio) else {
        return Ok(None);
    };
    let time_base = input.time_base();
    let context = ffmpeg_next::codec::context::Context::from_parameters(input.parameters())
        .map_err(|e| MediaError::Decoder(format!("audio codec context: {e}")))?;
    let decoder = context
        .decoder()
        .audio()
        .map_err(|e| MediaError::Decoder(format!("audio decoder: {e}")))?;

    let output = AudioOutput::new(initial_volume)?;
    let output_layout = match output.source_channels() {
        1 => ffmpeg_next::ChannelLayout::MONO,
        _ => ffmpeg_next::ChannelLayout::STEREO,
    };
    let resampler = ffmpeg_next::software::resampling::Context::get(
        decoder.format(),
        decoder.channel_layout(),
        decoder.rate(),
        ffmpeg_next::format::Sample::F32(ffmpeg_next::format::sample::Type::Packed),
        output_layout,
        output.sample_rate(),
    )
    .map_err(|e| MediaError::Decoder(format!("resampler: {e}")))?;

    Ok(Some(AudioTrack {
        index: input.index(),
        decoder,
        resampler,
        output,
        time_base: f64::from(time_base.numerator()) / f64::from(time_base.denominator()),
    }))
}

/// Copies RGBA rows out of a frame, skipping stride padding.
fn extract_rgba_data(frame: &ffmpeg_next::frame::Video) -> Vec<u8> {
    let row_bytes = frame.width() as usize * 4;
    copy_rows(frame.data(0), frame.stride(0), row_bytes, frame.height() as usize)
}

fn copy_rows(data: &[u8], stride: usize, row_bytes: usize, rows: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(row_bytes * rows);
    for row in data.chunks(stride).take(rows) {
        out.extend_from_slice(&row[..row_bytes.min(row.len())]);
    }
    out
}

/// Reads interleaved f32 samples out of a packed resampled frame.
fn extract_samples(frame: &ffmpeg_next::frame::Audio, channels: u16) -> Vec<f32> {
    let sample_count = frame.samples() * usize::from(channels);
    le_bytes_to_f32(frame.data(0), sample_count)
}

fn le_bytes_to_f32(data: &[u8], sample_count: usize) -> Vec<f32> {
    data.chunks_exact(4)
        .take(sample_count)
        .map(|bytes| f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
        .collect()
}
