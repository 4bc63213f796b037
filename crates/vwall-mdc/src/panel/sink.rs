//! Packet transmission strategies.

use crate::{Error, Result};
use futures::future::BoxFuture;
use tokio::io::AsyncWriteExt;
use tokio_serial::{DataBits, Parity, SerialPortBuilderExt, StopBits};
use tracing::debug;

/// MDC serial baud rate.
pub const BAUD_RATE: u32 = 9600;

/// Destination for encoded packets.
pub trait PacketSink: Send + Sync {
    /// Delivers one packet. Fire-and-forget: no response is read back.
    fn send<'a>(&'a self, packet: &'a [u8]) -> BoxFuture<'a, Result<()>>;

    /// Human-readable destination, used in log lines.
    fn describe(&self) -> &str;

    /// True when packets are only observed, never transmitted.
    fn is_dry_run(&self) -> bool {
        false
    }
}

/// Writes packets to a serial port, opening and closing it per packet.
pub struct SerialSink {
    port_path: String,
}

impl SerialSink {
    /// Creates a sink bound to `port_path`. The port is not opened yet.
    pub fn new(port_path: &str) -> Self {
        Self {
            port_path: port_path.to_string(),
        }
    }

    async fn write_packet(&self, packet: &[u8]) -> Result<()> {
        let mut port = tokio_serial::new(&self.port_path, BAUD_RATE)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .open_native_async()
            .map_err(|source| Error::TransportOpen {
                port: self.port_path.clone(),
                source,
            })?;

        debug!("Sending packet to {}: {:02X?}", self.port_path, packet);

        // Port is dropped (closed) on both the success and error paths.
        let written = async {
            port.write_all(packet).await?;
            port.flush().await
        }
        .await;

        written.map_err(|source| Error::TransportWrite {
            port: self.port_path.clone(),
            source,
        })
    }
}

impl PacketSink for SerialSink {
    fn send<'a>(&'a self, packet: &'a [u8]) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.write_packet(packet))
    }

    fn describe(&self) -> &str {
        &self.port_path
    }
}

/// Drops packets instead of transmitting them. Never fails.
///
/// The owning [`Panel`](crate::Panel) logs each packet at info level with
/// its ID and command; this sink only adds a debug-level trace.
pub struct LoggingSink {
    port_path: String,
}

impl LoggingSink {
    pub fn new(port_path: &str) -> Self {
        Self {
            port_path: port_path.to_string(),
        }
    }
}

impl PacketSink for LoggingSink {
    fn send<'a>(&'a self, packet: &'a [u8]) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            debug!("[debug {}] not transmitted: {:02X?}", self.port_path, packet);
            Ok(())
        })
    }

    fn describe(&self) -> &str {
        &self.port_path
    }

    fn is_dry_run(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_logging_sink_always_succeeds() {
        let sink = LoggingSink::new("/dev/does-not-exist");
        assert!(sink.send(&[0xAA, 0x11, 0x01, 0x01, 0x01, 0x14]).await.is_ok());
        assert!(sink.send(&[]).await.is_ok());
        assert_eq!(sink.describe(), "/dev/does-not-exist");
        assert!(sink.is_dry_run());
        assert!(!SerialSink::new("/dev/does-not-exist").is_dry_run());
    }

    #[tokio::test]
    async fn test_serial_sink_open_error() {
        let sink = SerialSink::new("/dev/vwall-missing-port");
        let err = sink.send(&[0xAA]).await.unwrap_err();
        assert!(matches!(err, Error::TransportOpen { ref port, .. } if port == "/dev/vwall-missing-port"));
    }
}
