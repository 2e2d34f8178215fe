//! Scripted native link shared by the integration tests

#![allow(dead_code)]

use crtp_transports::prelude::*;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Scripted outcome of one native `recv` call
#[derive(Debug, Clone)]
pub enum RecvStep {
    Invalid,
    Packet(NativePacket),
    Fail(String),
}

/// Everything one stub connection did
#[derive(Debug, Default)]
pub struct ConnectionLog {
    pub uri: String,
    pub sent: Vec<NativePacket>,
    pub recv_timeouts: Vec<u32>,
    pub close_calls: usize,
    pub script: VecDeque<RecvStep>,
    pub fail_send: bool,
}

#[derive(Debug, Default)]
pub struct StubState {
    pub connections: Vec<Arc<Mutex<ConnectionLog>>>,
    pub scan_result: Vec<String>,
    pub scan_filters: Vec<String>,
    pub refuse_open: bool,
}

/// Native link whose behavior is scripted through shared state
#[derive(Clone, Default)]
pub struct StubLink {
    pub state: Arc<Mutex<StubState>>,
}

impl StubLink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scan_result(uris: &[&str]) -> Self {
        let link = Self::default();
        link.state.lock().scan_result = uris.iter().map(|u| u.to_string()).collect();
        link
    }

    /// Log of the n-th opened connection
    pub fn connection(&self, n: usize) -> Arc<Mutex<ConnectionLog>> {
        Arc::clone(&self.state.lock().connections[n])
    }

    pub fn open_count(&self) -> usize {
        self.state.lock().connections.len()
    }

    /// Queue recv outcomes on the n-th connection
    pub fn script(&self, n: usize, steps: impl IntoIterator<Item = RecvStep>) {
        self.connection(n).lock().script.extend(steps);
    }
}

pub struct StubConnection {
    log: Arc<Mutex<ConnectionLog>>,
}

impl NativeLink for StubLink {
    type Connection = StubConnection;

    fn open(&self, uri: &str) -> LinkResult<StubConnection> {
        let mut state = self.state.lock();
        if state.refuse_open {
            return Err(LinkError::ConnectionFailed(format!("cannot open {}", uri)));
        }

        let log = Arc::new(Mutex::new(ConnectionLog {
            uri: uri.to_string(),
            ..Default::default()
        }));
        state.connections.push(Arc::clone(&log));
        Ok(StubConnection { log })
    }

    fn scan(&self, filter: &str) -> LinkResult<Vec<String>> {
        let mut state = self.state.lock();
        state.scan_filters.push(filter.to_string());
        Ok(state.scan_result.clone())
    }
}

impl NativeConnection for StubConnection {
    fn send(&mut self, packet: &NativePacket) -> LinkResult<()> {
        let mut log = self.log.lock();
        if log.fail_send {
            return Err(LinkError::Transport("disconnected mid-transfer".to_string()));
        }
        log.sent.push(packet.clone());
        Ok(())
    }

    fn recv(&mut self, timeout_ms: u32) -> LinkResult<NativePacket> {
        let mut log = self.log.lock();
        log.recv_timeouts.push(timeout_ms);
        match log.script.pop_front() {
            Some(RecvStep::Packet(packet)) => Ok(packet),
            Some(RecvStep::Fail(msg)) => Err(LinkError::Transport(msg)),
            Some(RecvStep::Invalid) | None => Ok(NativePacket::invalid()),
        }
    }

    fn close(&mut self) -> LinkResult<()> {
        self.log.lock().close_calls += 1;
        Ok(())
    }
}
