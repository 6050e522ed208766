// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Media(MediaError),
}

/// Failure categories of the native media engine.
///
/// None of these reach the player UI: a failed load leaves the controls at
/// their initial state. They exist so the engine can log something precise.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaError {
    /// The media source does not exist or cannot be opened.
    NotFound(String),

    /// The container holds neither a video nor an audio stream.
    NoPlayableStream,

    /// A decoder, scaler or resampler could not be created or failed mid-stream.
    Decoder(String),

    /// No usable audio output device.
    AudioOutput(String),

    /// Anything FFmpeg reports that does not fit the categories above.
    Other(String),
}

impl MediaError {
    /// Categorizes a raw FFmpeg or engine message.
    pub fn from_message(msg: &str) -> Self {
        let msg_lower = msg.to_lowercase();

        if msg_lower.contains("no such file")
            || msg_lower.contains("permission denied")
            || (msg_lower.contains("not found") && !msg_lower.contains("decoder"))
        {
            return MediaError::NotFound(msg.to_string());
        }

        if msg_lower.contains("no video stream")
            || msg_lower.contains("no audio stream")
            || msg_lower.contains("no playable stream")
        {
            return MediaError::NoPlayableStream;
        }

        if msg_lower.contains("codec")
            || msg_lower.contains("decoder")
            || msg_lower.contains("scaler")
            || msg_lower.contains("resampl")
            || msg_lower.contains("packet")
        {
            return MediaError::Decoder(msg.to_string());
        }

        if msg_lower.contains("audio device") || msg_lower.contains("audio stream") {
            return MediaError::AudioOutput(msg.to_string());
        }

        MediaError::Other(msg.to_string())
    }
}

impl fmt::Display for MediaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaError::NotFound(msg) => write!(f, "Media not found: {}", msg),
            MediaError::NoPlayableStream => write!(f, "No playable stream found"),
            MediaError::Decoder(msg) => write!(f, "Decoder failure: {}", msg),
            MediaError::AudioOutput(msg) => write!(f, "Audio output failure: {}", msg),
            MediaError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Media(e) => write!(f, "Media Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<MediaError> for Error {
    fn from(err: MediaError) -> Self {
        Error::Media(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<ffmpeg_next::Error> for Error {
    fn from(err: ffmpeg_next::Error) -> Self {
        Error::Media(MediaError::from_message(&err.to_string()))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
