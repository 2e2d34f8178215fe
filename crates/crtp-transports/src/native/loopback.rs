//! In-process loopback native link
//!
//! Every connection echoes the frames sent on it back to its own receive
//! queue. Useful for exercising a driver without hardware.

use crate::common::{LinkError, LinkResult, NativePacket};
use crate::traits::{NativeConnection, NativeLink};
use crossbeam::channel::{unbounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Loopback native link with a fixed set of endpoints
///
/// Clones share state, so a clone kept outside a driver can inject frames
/// into a connection the driver owns.
#[derive(Clone)]
pub struct LoopbackLink {
    endpoints: Arc<Vec<String>>,
    injectors: Arc<Mutex<HashMap<String, Sender<NativePacket>>>>,
}

impl LoopbackLink {
    /// Create a link exposing `native://0` .. `native://{count - 1}`
    pub fn new(count: usize) -> Self {
        Self::with_endpoints((0..count).map(|i| format!("native://{}", i)))
    }

    /// Create a link exposing the given endpoint URIs, in order
    pub fn with_endpoints<I, S>(endpoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            endpoints: Arc::new(endpoints.into_iter().map(Into::into).collect()),
            injectors: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Frame injector for the most recent open connection to `uri`
    pub fn injector(&self, uri: &str) -> Option<LoopbackInjector> {
        self.injectors
            .lock()
            .get(uri)
            .map(|tx| LoopbackInjector { tx: tx.clone() })
    }
}

impl NativeLink for LoopbackLink {
    type Connection = LoopbackConnection;

    fn open(&self, uri: &str) -> LinkResult<LoopbackConnection> {
        if !self.endpoints.iter().any(|e| e == uri) {
            return Err(LinkError::ConnectionFailed(format!(
                "no loopback endpoint at {}",
                uri
            )));
        }

        let (tx, rx) = unbounded();
        self.injectors.lock().insert(uri.to_string(), tx.clone());

        debug!("[LOOPBACK] Opened {}", uri);

        Ok(LoopbackConnection {
            uri: uri.to_string(),
            tx,
            rx,
            closed: false,
        })
    }

    fn scan(&self, filter: &str) -> LinkResult<Vec<String>> {
        Ok(self
            .endpoints
            .iter()
            .filter(|e| e.starts_with(filter))
            .cloned()
            .collect())
    }
}

/// Pushes frames into a loopback connection's receive queue
#[derive(Clone)]
pub struct LoopbackInjector {
    tx: Sender<NativePacket>,
}

impl LoopbackInjector {
    /// Queue a frame; fails once the connection is gone
    pub fn inject(&self, packet: NativePacket) -> LinkResult<()> {
        self.tx
            .send(packet)
            .map_err(|_| LinkError::Transport("loopback connection dropped".to_string()))
    }
}

/// One open loopback session
pub struct LoopbackConnection {
    uri: String,
    tx: Sender<NativePacket>,
    rx: Receiver<NativePacket>,
    closed: bool,
}

impl LoopbackConnection {
    pub fn uri(&self) -> &str {
        &self.uri
    }

    fn ensure_open(&self) -> LinkResult<()> {
        if self.closed {
            return Err(LinkError::Transport(format!("{} is closed", self.uri)));
        }
        Ok(())
    }
}

impl NativeConnection for LoopbackConnection {
    fn send(&mut self, packet: &NativePacket) -> LinkResult<()> {
        self.ensure_open()?;
        self.tx
            .send(packet.clone())
            .map_err(|e| LinkError::Transport(e.to_string()))
    }

    fn recv(&mut self, timeout_ms: u32) -> LinkResult<NativePacket> {
        self.ensure_open()?;

        let received = if timeout_ms == 0 {
            match self.rx.try_recv() {
                Ok(packet) => Some(packet),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    return Err(LinkError::Transport("loopback queue disconnected".into()))
                }
            }
        } else {
            match self
                .rx
                .recv_timeout(Duration::from_millis(u64::from(timeout_ms)))
            {
                Ok(packet) => Some(packet),
                Err(RecvTimeoutError::Timeout) => None,
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(LinkError::Transport("loopback queue disconnected".into()))
                }
            }
        };

        Ok(received.unwrap_or_else(NativePacket::invalid))
    }

    fn close(&mut self) -> LinkResult<()> {
        self.ensure_open()?;
        self.closed = true;
        debug!("[LOOPBACK] Closed {}", self.uri);
        Ok(())
    }
}
