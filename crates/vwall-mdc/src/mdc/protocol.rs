//! MDC packet encoding.
//!
//! Packet structure:
//! - Header byte: 0xAA
//! - Command (opcode), display ID, payload length, payload
//! - Checksum: (ID + command + length + sum(payload)) % 256, header excluded

use crate::{Error, Result};

/// Packet header byte.
pub const HEADER: u8 = 0xAA;

/// Bytes surrounding the payload (header, command, ID, length, checksum).
pub const FRAME_OVERHEAD: usize = 5;

/// Largest payload the length byte can describe.
pub const MAX_PAYLOAD: usize = u8::MAX as usize;

/// Data byte for "on".
pub const ON: u8 = 0x01;

/// Data byte for "off".
pub const OFF: u8 = 0x00;

/// Broadcast display ID, addresses every display on the link.
pub const ALL: u8 = 0xFE;

/// Calculates the checksum over ID, opcode, length and payload.
///
/// The payload must already be known to fit in [`MAX_PAYLOAD`].
pub fn checksum(id: u8, opcode: u8, data: &[u8]) -> u8 {
    let sum = data
        .iter()
        .fold(id as u32 + opcode as u32 + data.len() as u32, |acc, &b| {
            acc + b as u32
        });
    (sum % 256) as u8
}

/// Builds a complete packet for `opcode` addressed to display `id`.
pub fn encode(id: u8, opcode: u8, data: &[u8]) -> Result<Vec<u8>> {
    if data.len() > MAX_PAYLOAD {
        return Err(Error::PayloadTooLarge(data.len()));
    }

    let mut packet = Vec::with_capacity(FRAME_OVERHEAD + data.len());
    packet.extend_from_slice(&[HEADER, opcode, id, data.len() as u8]);
    packet.extend_from_slice(data);
    packet.push(checksum(id, opcode, data));

    Ok(packet)
}

/// Packs a tile's column (high nibble) and row (low nibble) into a wall code.
///
/// Coordinates above 15 do not fit a nibble and wrap silently. Only
/// [`Wall::check_arrangement`](crate::Wall::check_arrangement) enforces the
/// `1..=15` range; [`Wall::on`](crate::Wall::on) sends whatever this returns.
pub fn wall_code(x: u8, y: u8) -> u8 {
    y.wrapping_add(x.wrapping_mul(0x10))
}
