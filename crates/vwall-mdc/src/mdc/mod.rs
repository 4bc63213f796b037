//! MDC protocol module.
//!
//! Opcode tables and packet encoding for the multi-display control
//! serial protocol.

mod protocol;
mod registry;

pub use protocol::{checksum, encode, wall_code, ALL, FRAME_OVERHEAD, HEADER, MAX_PAYLOAD, OFF, ON};
pub use registry::{
    control_code, control_names, source_code, source_names, ControlCommand, Source,
    EXCLUDED_SOURCES,
};
