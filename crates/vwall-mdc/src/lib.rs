//! Video Wall MDC Library
//!
//! Encodes multi-display control (MDC) packets and drives display panels
//! and video-wall arrangements over point-to-point serial links.

pub mod error;
pub mod mdc;
pub mod panel;
pub mod wall;

#[cfg(test)]
mod testing;

pub use error::{Error, Result};
pub use mdc::{ControlCommand, Source, ALL, OFF, ON};
pub use panel::{LoggingSink, PacketSink, Panel, SerialSink};
pub use wall::Wall;
