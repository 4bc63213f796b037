//! In-memory sink shared by unit tests.

use crate::panel::PacketSink;
use crate::{Error, Result};
use futures::future::BoxFuture;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Log {
    attempts: Vec<Vec<u8>>,
    delivered: Vec<Vec<u8>>,
}

/// Records every packet; clones share the same log so several panels can
/// write into one ordered history.
#[derive(Clone, Default)]
pub struct RecordingSink {
    log: Arc<Mutex<Log>>,
    failing_ids: Vec<u8>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails writes for packets addressed to any of `ids`.
    pub fn failing_on(ids: &[u8]) -> Self {
        Self {
            failing_ids: ids.to_vec(),
            ..Self::default()
        }
    }

    /// Same log, different failure set.
    pub fn share_failing_on(&self, ids: &[u8]) -> Self {
        Self {
            log: Arc::clone(&self.log),
            failing_ids: ids.to_vec(),
        }
    }

    /// Successfully delivered packets, in order.
    pub fn packets(&self) -> Vec<Vec<u8>> {
        self.log.lock().unwrap().delivered.clone()
    }

    /// Every packet handed to the sink, including failed ones.
    pub fn attempted(&self) -> Vec<Vec<u8>> {
        self.log.lock().unwrap().attempts.clone()
    }

    pub fn attempts(&self) -> usize {
        self.log.lock().unwrap().attempts.len()
    }
}

impl PacketSink for RecordingSink {
    fn send<'a>(&'a self, packet: &'a [u8]) -> BoxFuture<'a, Result<()>> {
        let mut log = self.log.lock().unwrap();
        log.attempts.push(packet.to_vec());
        let result = if packet.len() > 2 && self.failing_ids.contains(&packet[2]) {
            Err(Error::TransportWrite {
                port: "recording".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::BrokenPipe, "write failed"),
            })
        } else {
            log.delivered.push(packet.to_vec());
            Ok(())
        };
        Box::pin(std::future::ready(result))
    }

    fn describe(&self) -> &str {
        "recording"
    }
}
