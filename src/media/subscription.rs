// SPDX-License-Identifier: MPL-2.0
//! Iced subscription bridging a native element to the UI event loop.
//!
//! Each session opens its own [`NativeVideo`], hands a handle to the UI in
//! [`MediaMessage::Attached`], then forwards listener notifications and
//! decoded frames as messages tagged with the session.

use super::element::MediaEventKind;
use super::engine::VideoFrame;
use super::native::{NativeOptions, NativeVideo};
use super::SessionId;
use iced::futures::SinkExt;
use iced::stream;
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Forwards listener notifications from the element into the subscription.
#[derive(Clone)]
pub struct EventSink {
    tx: mpsc::UnboundedSender<MediaEventKind>,
}

impl EventSink {
    /// Queues `kind` for delivery to `App::update`. A closed subscription
    /// means the session is gone, so the event is dropped.
    pub fn notify(&self, kind: MediaEventKind) {
        let _ = self.tx.send(kind);
    }

    #[cfg(test)]
    pub(crate) fn detached() -> (Self, mpsc::UnboundedReceiver<MediaEventKind>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl std::fmt::Debug for EventSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSink")
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}

/// Messages emitted by the media subscription.
#[derive(Debug, Clone)]
pub enum MediaMessage {
    /// The element for `session` exists; listeners may now be attached.
    Attached {
        session: SessionId,
        element: NativeVideo,
        events: EventSink,
    },

    /// A listener registered through the session's [`EventSink`] fired.
    Event {
        session: SessionId,
        kind: MediaEventKind,
    },

    /// A decoded frame for the video surface.
    Frame {
        session: SessionId,
        frame: VideoFrame,
    },
}

impl MediaMessage {
    #[must_use]
    pub fn session(&self) -> SessionId {
        match self {
            MediaMessage::Attached { session, .. }
            | MediaMessage::Event { session, .. }
            | MediaMessage::Frame { session, .. } => *session,
        }
    }
}

/// Creates the subscription for one media session.
///
/// A new `session` id recreates the subscription, which opens a fresh
/// element; the previous stream is dropped by iced.
pub fn media_session(
    source: PathBuf,
    session: SessionId,
    options: NativeOptions,
) -> iced::Subscription<MediaMessage> {
    iced::Subscription::run_with_id(
        session,
        stream::channel(100, move |mut output| async move {
            tracing::debug!(%session, source = %source.display(), "opening media session");
            let (element, mut frames) = NativeVideo::open(source, options);
            let (event_tx, mut event_rx) = mpsc::unbounded_channel();

            let attached = MediaMessage::Attached {
                session,
                element,
                events: EventSink { tx: event_tx },
            };
            if output.send(attached).await.is_ok() {
                loop {
                    let message = tokio::select! {
                        Some(kind) = event_rx.recv() => MediaMessage::Event { session, kind },
                        Some(frame) = frames.recv() => MediaMessage::Frame { session, frame },
                        else => break,
                    };
                    if output.send(message).await.is_err() {
                        break;
                    }
                }
            }

            tracing::debug!(%session, "media session closed");
            // Keep subscription alive but idle
            std::future::pending::<()>().await;
        }),
    )
}
