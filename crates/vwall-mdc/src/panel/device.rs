//! Single addressable display on an MDC serial link.

use crate::mdc::{self, ControlCommand, Source, OFF, ON};
use crate::Result;
use tracing::{debug, info};

use super::sink::{LoggingSink, PacketSink, SerialSink};

/// One display panel: protocol ID, wall placement and transport.
pub struct Panel {
    id: u8,
    position: u8,
    x: u8,
    y: u8,
    sink: Box<dyn PacketSink>,
}

impl Panel {
    /// Creates a panel on `port_path`.
    ///
    /// With `debug` set, packets are logged instead of written to the port.
    pub fn new(id: u8, port_path: &str, debug: bool) -> Self {
        let sink: Box<dyn PacketSink> = if debug {
            Box::new(LoggingSink::new(port_path))
        } else {
            Box::new(SerialSink::new(port_path))
        };
        Self::with_sink(id, sink)
    }

    /// Creates a panel that delivers packets through a custom sink.
    ///
    /// The panel is in debug mode exactly when the sink is a dry run.
    pub fn with_sink(id: u8, sink: Box<dyn PacketSink>) -> Self {
        Self {
            id,
            position: 0,
            x: 0,
            y: 0,
            sink,
        }
    }

    /// Sets the wall placement and returns the panel.
    pub fn with_position(mut self, position: u8, x: u8, y: u8) -> Self {
        self.set_position(position, x, y);
        self
    }

    /// Sets the 1-based sequence position and the column/row coordinates.
    ///
    /// Zero means "unset" for every field.
    pub fn set_position(&mut self, position: u8, x: u8, y: u8) {
        self.position = position;
        self.x = x;
        self.y = y;
    }

    /// Protocol display ID.
    pub fn id(&self) -> u8 {
        self.id
    }

    /// 1-based sequence index within the wall, 0 if unset.
    pub fn position(&self) -> u8 {
        self.position
    }

    /// Column within the wall grid, 0 if unset.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Row within the wall grid, 0 if unset.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Whether packets are only logged.
    pub fn is_debug(&self) -> bool {
        self.sink.is_dry_run()
    }

    /// Serial port (or other sink destination) this panel writes to.
    pub fn port(&self) -> &str {
        self.sink.describe()
    }

    /// True when both grid coordinates are set.
    pub fn is_positioned(&self) -> bool {
        self.x != 0 && self.y != 0
    }

    /// Sends the named control command with `data` as payload.
    ///
    /// Unknown names fail before anything is encoded or sent.
    pub async fn apply(&self, command: &str, data: &[u8]) -> Result<()> {
        let cmd: ControlCommand = command.parse()?;
        let packet = mdc::encode(self.id, cmd.opcode(), data)?;

        if self.is_debug() {
            info!(
                "[debug {}] {:02X?} <<id: {}, cmd: {}({:#04x}) {:02X?}>>",
                self.port(),
                packet,
                self.id,
                cmd,
                cmd.opcode(),
                data
            );
        } else {
            debug!(
                "{:02X?} <<id: {}, cmd: {}({:#04x}) {:02X?}>>",
                packet,
                self.id,
                cmd,
                cmd.opcode(),
                data
            );
        }

        self.sink.send(&packet).await
    }

    /// Turns the display on or off.
    pub async fn power(&self, on: bool) -> Result<()> {
        self.apply(ControlCommand::Power.name(), &[if on { ON } else { OFF }])
            .await
    }

    /// Switches the input source by name.
    pub async fn select_source(&self, source: &str) -> Result<()> {
        let source: Source = source.parse()?;
        self.apply(ControlCommand::Source.name(), &[source.code()])
            .await
    }
}

impl std::fmt::Debug for Panel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Panel")
            .field("id", &self.id)
            .field("position", &self.position)
            .field("x", &self.x)
            .field("y", &self.y)
            .field("port", &self.port())
            .field("debug", &self.is_debug())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingSink;
    use crate::Error;

    #[test]
    fn test_is_positioned() {
        let panel = Panel::new(1, "/dev/ttyUSB0", true);
        assert!(!panel.is_positioned());

        let panel = panel.with_position(1, 1, 0);
        assert!(!panel.is_positioned());

        let panel = panel.with_position(0, 2, 1);
        assert!(panel.is_positioned());
        assert_eq!(panel.position(), 0);
    }

    #[tokio::test]
    async fn test_apply_sends_encoded_packet() {
        let sink = RecordingSink::new();
        let panel = Panel::with_sink(1, Box::new(sink.clone()));

        panel.apply("power", &[ON]).await.unwrap();

        assert_eq!(sink.packets(), vec![vec![0xAA, 0x11, 0x01, 0x01, 0x01, 0x14]]);
    }

    #[tokio::test]
    async fn test_apply_unknown_command_sends_nothing() {
        let sink = RecordingSink::new();
        let panel = Panel::with_sink(1, Box::new(sink.clone()));

        let err = panel.apply("brightness", &[10]).await.unwrap_err();

        assert!(matches!(err, Error::UnknownCommand(name) if name == "brightness"));
        assert_eq!(sink.attempts(), 0);
    }

    #[tokio::test]
    async fn test_apply_payload_too_large_sends_nothing() {
        let sink = RecordingSink::new();
        let panel = Panel::with_sink(1, Box::new(sink.clone()));

        let err = panel.apply("pip", &[0u8; 300]).await.unwrap_err();

        assert!(matches!(err, Error::PayloadTooLarge(300)));
        assert_eq!(sink.attempts(), 0);
    }

    #[tokio::test]
    async fn test_apply_surfaces_sink_error() {
        let sink = RecordingSink::failing_on(&[1]);
        let panel = Panel::with_sink(1, Box::new(sink.clone()));

        let err = panel.apply("wall", &[OFF]).await.unwrap_err();

        assert!(matches!(err, Error::TransportWrite { .. }));
        assert_eq!(sink.attempts(), 1);
    }

    #[test]
    fn test_debug_follows_sink() {
        assert!(Panel::new(1, "/dev/ttyUSB0", true).is_debug());
        assert!(!Panel::new(1, "/dev/ttyUSB0", false).is_debug());
        assert!(Panel::with_sink(2, Box::new(LoggingSink::new("/dev/ttyUSB1"))).is_debug());
        assert!(!Panel::with_sink(2, Box::new(SerialSink::new("/dev/ttyUSB1"))).is_debug());
        assert!(!Panel::with_sink(3, Box::new(RecordingSink::new())).is_debug());
    }

    #[tokio::test]
    async fn test_debug_panel_never_touches_port() {
        let panel = Panel::new(4, "/dev/vwall-missing-port", true);
        assert!(panel.is_debug());
        panel.apply("power", &[ON]).await.unwrap();
        panel.select_source("hdmi1").await.unwrap();
    }

    #[tokio::test]
    async fn test_select_source() {
        let sink = RecordingSink::new();
        let panel = Panel::with_sink(2, Box::new(sink.clone()));

        panel.select_source("hdmi1").await.unwrap();
        // 2 + 0x14 + 1 + 0x21 = 0x38
        assert_eq!(sink.packets(), vec![vec![0xAA, 0x14, 0x02, 0x01, 0x21, 0x38]]);

        let err = panel.select_source("hdmi1_pc").await.unwrap_err();
        assert!(matches!(err, Error::UnknownSource(_)));
        assert_eq!(sink.attempts(), 1);
    }

    #[tokio::test]
    async fn test_power() {
        let sink = RecordingSink::new();
        let panel = Panel::with_sink(mdc::ALL, Box::new(sink.clone()));

        panel.power(false).await.unwrap();
        // 0xFE + 0x11 + 1 + 0 = 0x110
        assert_eq!(sink.packets(), vec![vec![0xAA, 0x11, 0xFE, 0x01, 0x00, 0x10]]);
    }
}
