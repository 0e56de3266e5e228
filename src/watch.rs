//! Simulated watch stream
//!
//! The mock never produces events on its own. Tests push events through a
//! [`WatchEventSender`] and the code under test consumes them from
//! [`WatchEvents`], which is a plain `Stream` of `WatchEvent<Value>`.

use crate::{Error, Result};
use futures::Stream;
use kube::api::WatchEvent;
use serde_json::Value;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tracing::trace;

pub(crate) const DEFAULT_EVENT_CAPACITY: usize = 100;

/// Sending half handed to the test author
#[derive(Debug, Clone)]
pub struct WatchEventSender {
    tx: mpsc::Sender<WatchEvent<Value>>,
}

impl WatchEventSender {
    pub async fn send(&self, event: WatchEvent<Value>) -> Result<()> {
        trace!("Sending watch event");
        self.tx
            .send(event)
            .await
            .map_err(|_| Error::Internal("Watch stream receiver was dropped".to_string()))
    }

    pub async fn added(&self, obj: Value) -> Result<()> {
        self.send(WatchEvent::Added(obj)).await
    }

    pub async fn modified(&self, obj: Value) -> Result<()> {
        self.send(WatchEvent::Modified(obj)).await
    }

    pub async fn deleted(&self, obj: Value) -> Result<()> {
        self.send(WatchEvent::Deleted(obj)).await
    }

    /// Non-blocking send, fails when the channel is full or closed
    pub fn try_send(&self, event: WatchEvent<Value>) -> Result<()> {
        self.tx
            .try_send(event)
            .map_err(|e| Error::Internal(format!("Failed to send watch event: {}", e)))
    }
}

/// Receiving half read by the watcher under test
#[derive(Debug)]
pub struct WatchEvents {
    rx: mpsc::Receiver<WatchEvent<Value>>,
}

impl WatchEvents {
    pub async fn recv(&mut self) -> Option<WatchEvent<Value>> {
        self.rx.recv().await
    }

    pub fn try_recv(&mut self) -> Option<WatchEvent<Value>> {
        self.rx.try_recv().ok()
    }
}

impl Stream for WatchEvents {
    type Item = WatchEvent<Value>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

pub(crate) fn channel(capacity: usize) -> (WatchEventSender, WatchEvents) {
    let (tx, rx) = mpsc::channel(capacity);
    (WatchEventSender { tx }, WatchEvents { rx })
}
