//! Display panel module.
//!
//! A panel owns its protocol ID, its wall placement and the sink its
//! packets are delivered to.

mod device;
mod sink;

pub use device::Panel;
pub use sink::{LoggingSink, PacketSink, SerialSink, BAUD_RATE};
