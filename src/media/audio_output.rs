// SPDX-License-Identifier: MPL-2.0
//! Audio output using cpal.
//!
//! The engine pushes interleaved f32 samples into a bounded buffer that the
//! device callback drains. Volume and pause state are atomics so the engine
//! never blocks on the audio thread.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::{MediaError, Result};

/// Seconds of audio the buffer holds before new samples are dropped.
const BUFFER_SECS: usize = 1;

/// State shared between the engine thread and the device callback.
struct SharedState {
    /// Linear gain stored as f32 bits.
    volume_bits: AtomicU32,
    paused: AtomicBool,
}

impl SharedState {
    fn new(initial_volume: f32) -> Self {
        Self {
            volume_bits: AtomicU32::new(initial_volume.to_bits()),
            paused: AtomicBool::new(true),
        }
    }

    fn volume(&self) -> f32 {
        f32::from_bits(self.volume_bits.load(Ordering::Relaxed))
    }

    fn set_volume(&self, volume: f32) {
        self.volume_bits.store(volume.to_bits(), Ordering::Relaxed);
    }

    fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Relaxed)
    }

    fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::Relaxed);
    }
}

/// Output stream on the default device.
///
/// `cpal::Stream` is not `Send`, so an `AudioOutput` lives and dies on the
/// engine thread that created it.
pub struct AudioOutput {
    shared_state: Arc<SharedState>,
    buffer: Arc<Mutex<Vec<f32>>>,
    max_buffer_len: usize,
    sample_rate: u32,
    /// Channels of the samples the engine pushes (1 or 2).
    source_channels: u16,
    _stream: cpal::Stream,
}

impl std::fmt::Debug for AudioOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioOutput")
            .field("sample_rate", &self.sample_rate)
            .field("source_channels", &self.source_channels)
            .finish()
    }
}

impl AudioOutput {
    /// Opens the default output device. Starts paused.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::AudioOutput`] if there is no device, its
    /// configuration cannot be read, or the stream fails to start.
    pub fn new(initial_volume: f32) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| MediaError::AudioOutput("no audio device found".to_string()))?;

        let supported_config = device
            .default_output_config()
            .map_err(|e| MediaError::AudioOutput(format!("audio device config: {e}")))?;

        let sample_rate = supported_config.sample_rate();
        let device_channels = supported_config.channels();
        let source_channels = source_channels_for(device_channels);

        let shared_state = Arc::new(SharedState::new(initial_volume));
        let max_buffer_len = sample_rate as usize * source_channels as usize * BUFFER_SECS;
        let buffer = Arc::new(Mutex::new(Vec::with_capacity(max_buffer_len)));

        let config: cpal::StreamConfig = supported_config.config();
        let sink = CallbackSink {
            buffer: Arc::clone(&buffer),
            shared_state: Arc::clone(&shared_state),
            source_channels: usize::from(source_channels),
            device_channels: usize::from(device_channels),
        };
        let stream = match supported_config.sample_format() {
            cpal::SampleFormat::F32 => Self::build_stream::<f32>(&device, &config, sink)?,
            cpal::SampleFormat::I16 => Self::build_stream::<i16>(&device, &config, sink)?,
            cpal::SampleFormat::U16 => Self::build_stream::<u16>(&device, &config, sink)?,
            other => {
                return Err(MediaError::AudioOutput(format!(
                    "unsupported audio sample format {other:?}"
                ))
                .into())
            }
        };

        stream
            .play()
            .map_err(|e| MediaError::AudioOutput(format!("failed to start audio stream: {e}")))?;

        Ok(Self {
            shared_state,
            buffer,
            max_buffer_len,
            sample_rate,
            source_channels,
            _stream: stream,
        })
    }

    fn build_stream<T: cpal::SizedSample + cpal::FromSample<f32>>(
        device: &cpal::Device,
        config: &cpal::StreamConfig,
        sink: CallbackSink,
    ) -> Result<cpal::Stream> {
        device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| sink.fill(data),
                |err| {
                    tracing::warn!(%err, "audio output stream error");
                },
                None,
            )
            .map_err(|e| MediaError::AudioOutput(format!("failed to build audio stream: {e}")).into())
    }

    /// Queues interleaved samples. Returns how many were accepted; the rest
    /// are dropped once the buffer is full.
    pub fn push(&self, samples: &[f32]) -> usize {
        let Ok(mut buf) = self.buffer.lock() else {
            return 0;
        };
        let available = self.max_buffer_len.saturating_sub(buf.len());
        let accepted = available.min(samples.len());
        buf.extend_from_slice(&samples[..accepted]);
        accepted
    }

    pub fn pause(&self) {
        self.shared_state.set_paused(true);
    }

    pub fn resume(&self) {
        self.shared_state.set_paused(false);
    }

    /// Discards queued samples without changing pause state.
    pub fn clear(&self) {
        if let Ok(mut buf) = self.buffer.lock() {
            buf.clear();
        }
    }

    /// Sets the linear gain applied in the callback.
    pub fn set_volume(&self, volume: f32) {
        self.shared_state.set_volume(volume.clamp(0.0, 1.0));
    }

    #[must_use]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    #[must_use]
    pub fn source_channels(&self) -> u16 {
        self.source_channels
    }
}

/// Mono devices get mono; everything else is fed stereo.
fn source_channels_for(device_channels: u16) -> u16 {
    if device_channels <= 1 {
        1
    } else {
        2
    }
}

/// Everything the device callback needs, moved into the callback closure.
struct CallbackSink {
    buffer: Arc<Mutex<Vec<f32>>>,
    shared_state: Arc<SharedState>,
    source_channels: usize,
    device_channels: usize,
}

impl CallbackSink {
    fn fill<T: cpal::Sample + cpal::FromSample<f32>>(&self, data: &mut [T]) {
        let silence = T::from_sample(0.0f32);
        if self.shared_state.is_paused() {
            data.fill(silence);
            return;
        }
        let Ok(mut buf) = self.buffer.lock() else {
            data.fill(silence);
            return;
        };

        let volume = self.shared_state.volume();
        let consumed = spread_frames(
            &buf,
            data,
            self.source_channels,
            self.device_channels,
            volume,
        );
        buf.drain(..consumed);
    }
}

/// Copies source frames into device frames, repeating the last source
/// channel when the device has more channels. Pads with silence when the
/// source runs dry. Returns the number of source samples consumed.
fn spread_frames<T: cpal::Sample + cpal::FromSample<f32>>(
    source: &[f32],
    out: &mut [T],
    source_channels: usize,
    device_channels: usize,
    volume: f32,
) -> usize {
    let source_frames = source.len() / source_channels;
    let mut consumed_frames = 0;

    for (frame_index, out_frame) in out.chunks_mut(device_channels).enumerate() {
        if frame_index >= source_frames {
            out_frame.fill(T::from_sample(0.0f32));
            continue;
        }
        let src = &source[frame_index * source_channels..(frame_index + 1) * source_channels];
        for (channel, sample) in out_frame.iter_mut().enumerate() {
            let value = src[channel.min(source_channels - 1)];
            // Just below 1.0 so i16 conversion cannot overflow.
            *sample = T::from_sample((value * volume).clamp(-1.0, 0.999_999_9));
        }
        consumed_frames += 1;
    }

    consumed_frames * source_channels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_state_volume_operations() {
        let state = SharedState::new(0.8);
        assert!((state.volume() - 0.8).abs() < 0.001);

        state.set_volume(0.5);
        assert!((state.volume() - 0.5).abs() < 0.001);
    }

    #[test]
    fn shared_state_starts_paused() {
        let state = SharedState::new(1.0);
        assert!(state.is_paused());

        state.set_paused(false);
        assert!(!state.is_paused());
    }

    #[test]
    fn spread_frames_copies_stereo_with_gain() {
        let source = [0.5, -0.5, 0.25, -0.25];
        let mut out = [0.0f32; 4];
        let consumed = spread_frames(&source, &mut out, 2, 2, 0.5);
        assert_eq!(consumed, 4);
        assert_eq!(out, [0.25, -0.25, 0.125, -0.125]);
    }

    #[test]
    fn spread_frames_pads_with_silence() {
        let source = [0.5, 0.5];
        let mut out = [1.0f32; 6];
        let consumed = spread_frames(&source, &mut out, 2, 2, 1.0);
        assert_eq!(consumed, 2);
        assert_eq!(out, [0.5, 0.5, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn spread_frames_upmixes_to_extra_channels() {
        let source = [0.1, 0.2];
        let mut out = [0.0f32; 4];
        let consumed = spread_frames(&source, &mut out, 2, 4, 1.0);
        assert_eq!(consumed, 2);
        assert_eq!(out, [0.1, 0.2, 0.2, 0.2]);
    }

    #[test]
    fn spread_frames_clamps_loud_samples() {
        let source = [2.0];
        let mut out = [0.0f32; 1];
        spread_frames(&source, &mut out, 1, 1, 1.0);
        assert!(out[0] < 1.0);
    }

    #[test]
    fn source_channels_downmix_surround_to_stereo() {
        assert_eq!(source_channels_for(1), 1);
        assert_eq!(source_channels_for(2), 2);
        assert_eq!(source_channels_for(6), 2);
    }

    #[test]
    #[ignore = "requires audio hardware"]
    fn audio_output_can_be_created() {
        if let Ok(output) = AudioOutput::new(0.8) {
            assert!(output.sample_rate() > 0);
            assert_eq!(output.push(&[0.0; 8]), 8);
        }
    }
}
