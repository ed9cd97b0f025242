//! Best-effort, one-way channel from the panel to its host.
//!
//! A port either accepts a request or reports why it could not. Nothing
//! is acknowledged and nothing is retried; see [`crate::dispatch`].

use std::cell::Cell;
use std::cell::RefCell;
use std::io::Write;
use std::sync::mpsc;

use garage_core::protocol::HostRequest;
use thiserror::Error;

use crate::contracts::OutboundRecord;

#[derive(Debug, Error)]
pub enum PortError {
    #[error("host channel disconnected")]
    Disconnected,
    #[error("write to host log failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialize request: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub trait HostPort {
    fn post(&self, request: &HostRequest) -> Result<(), PortError>;
}

impl<P: HostPort + ?Sized> HostPort for &P {
    fn post(&self, request: &HostRequest) -> Result<(), PortError> {
        (**self).post(request)
    }
}

impl<P: HostPort + ?Sized> HostPort for Box<P> {
    fn post(&self, request: &HostRequest) -> Result<(), PortError> {
        (**self).post(request)
    }
}

/// Keeps every request in memory. `failing()` rejects everything.
#[derive(Debug, Default)]
pub struct RecordingPort {
    sent: RefCell<Vec<HostRequest>>,
    failing: bool,
}

impl RecordingPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            sent: RefCell::default(),
            failing: true,
        }
    }

    pub fn sent(&self) -> Vec<HostRequest> {
        self.sent.borrow().clone()
    }

    pub fn take(&self) -> Vec<HostRequest> {
        std::mem::take(&mut *self.sent.borrow_mut())
    }
}

impl HostPort for RecordingPort {
    fn post(&self, request: &HostRequest) -> Result<(), PortError> {
        if self.failing {
            return Err(PortError::Disconnected);
        }
        self.sent.borrow_mut().push(*request);
        Ok(())
    }
}

/// Hands requests to another loop over an mpsc channel. Never blocks.
#[derive(Debug, Clone)]
pub struct ChannelPort {
    tx: mpsc::Sender<HostRequest>,
}

impl ChannelPort {
    pub fn new(tx: mpsc::Sender<HostRequest>) -> Self {
        Self { tx }
    }

    pub fn pair() -> (Self, mpsc::Receiver<HostRequest>) {
        let (tx, rx) = mpsc::channel();
        (Self::new(tx), rx)
    }
}

impl HostPort for ChannelPort {
    fn post(&self, request: &HostRequest) -> Result<(), PortError> {
        self.tx.send(*request).map_err(|_| PortError::Disconnected)
    }
}

/// Appends each request as an [`OutboundRecord`] line.
#[derive(Debug)]
pub struct JsonLinesPort<W: Write> {
    writer: RefCell<W>,
    next_seq: Cell<u64>,
}

impl<W: Write> JsonLinesPort<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: RefCell::new(writer),
            next_seq: Cell::new(1),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write> HostPort for JsonLinesPort<W> {
    fn post(&self, request: &HostRequest) -> Result<(), PortError> {
        let seq = self.next_seq.get();
        let line = serde_json::to_string(&OutboundRecord::new(seq, request))?;
        let mut writer = self.writer.borrow_mut();
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        self.next_seq.set(seq.saturating_add(1));
        Ok(())
    }
}

/// Forwards to both ports; the first failure wins but both are attempted.
#[derive(Debug)]
pub struct TeePort<A, B> {
    first: A,
    second: B,
}

impl<A: HostPort, B: HostPort> TeePort<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: HostPort, B: HostPort> HostPort for TeePort<A, B> {
    fn post(&self, request: &HostRequest) -> Result<(), PortError> {
        let first = self.first.post(request);
        let second = self.second.post(request);
        first.and(second)
    }
}
