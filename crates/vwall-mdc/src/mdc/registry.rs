//! Control command and input source opcode tables.
//!
//! Opcode values are fixed by the display firmware and must not change.
//! Names are matched case-sensitively.

use crate::{Error, Result};
use std::str::FromStr;

/// Writable control commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ControlCommand {
    /// Panel power on/off.
    Power = 0x11,
    /// Audio volume.
    Volume = 0x12,
    /// Input source; data byte is a [`Source`] code.
    Source = 0x14,
    /// Picture mode.
    Mode = 0x18,
    /// Picture size.
    Size = 0x19,
    /// Picture-in-picture.
    Pip = 0x3c,
    /// Auto adjustment (PC input).
    AutoAdjust = 0x3d,
    /// Video wall mode (full/natural).
    VwallMode = 0x5c,
    /// Safety lock.
    Safety = 0x5d,
    /// Video wall on/off and tile placement.
    Wall = 0x89,
}

impl ControlCommand {
    /// Every control command, in opcode order.
    pub const ALL: [ControlCommand; 10] = [
        ControlCommand::Power,
        ControlCommand::Volume,
        ControlCommand::Source,
        ControlCommand::Mode,
        ControlCommand::Size,
        ControlCommand::Pip,
        ControlCommand::AutoAdjust,
        ControlCommand::VwallMode,
        ControlCommand::Safety,
        ControlCommand::Wall,
    ];

    /// Protocol name of the command.
    pub fn name(self) -> &'static str {
        match self {
            ControlCommand::Power => "power",
            ControlCommand::Volume => "volume",
            ControlCommand::Source => "source",
            ControlCommand::Mode => "mode",
            ControlCommand::Size => "size",
            ControlCommand::Pip => "pip",
            ControlCommand::AutoAdjust => "autoAdjust",
            ControlCommand::VwallMode => "vwallMode",
            ControlCommand::Safety => "safety",
            ControlCommand::Wall => "wall",
        }
    }

    /// One-byte opcode.
    pub fn opcode(self) -> u8 {
        self as u8
    }
}

impl FromStr for ControlCommand {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| Error::UnknownCommand(s.to_string()))
    }
}

impl std::fmt::Display for ControlCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Selectable input sources.
///
/// `dvi_video` (0x1F), `rf_tv` (0x30), `hdmi1_pc` (0x22) and `hdmi2_pc`
/// (0x24) are get-only or model-restricted and are deliberately absent;
/// see [`EXCLUDED_SOURCES`]. `magicinfo` only works on MagicInfo models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Source {
    Pc = 0x14,
    Bnc = 0x1e,
    Dvi = 0x18,
    Av = 0x0c,
    SVideo = 0x04,
    Component = 0x08,
    MagicInfo = 0x20,
    Hdmi1 = 0x21,
    Hdmi2 = 0x23,
    DisplayPort = 0x25,
}

/// Sources known to the protocol that cannot be set.
pub const EXCLUDED_SOURCES: [(&str, u8); 4] = [
    ("dvi_video", 0x1f),
    ("rf_tv", 0x30),
    ("hdmi1_pc", 0x22),
    ("hdmi2_pc", 0x24),
];

impl Source {
    /// Every selectable source.
    pub const ALL: [Source; 10] = [
        Source::Pc,
        Source::Bnc,
        Source::Dvi,
        Source::Av,
        Source::SVideo,
        Source::Component,
        Source::MagicInfo,
        Source::Hdmi1,
        Source::Hdmi2,
        Source::DisplayPort,
    ];

    /// Protocol name of the source.
    pub fn name(self) -> &'static str {
        match self {
            Source::Pc => "pc",
            Source::Bnc => "bnc",
            Source::Dvi => "dvi",
            Source::Av => "av",
            Source::SVideo => "svideo",
            Source::Component => "component",
            Source::MagicInfo => "magicinfo",
            Source::Hdmi1 => "hdmi1",
            Source::Hdmi2 => "hdmi2",
            Source::DisplayPort => "displayport",
        }
    }

    /// Data byte passed to the `source` command.
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl FromStr for Source {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|src| src.name() == s)
            .ok_or_else(|| Error::UnknownSource(s.to_string()))
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolves a control command name to its opcode.
pub fn control_code(name: &str) -> Result<u8> {
    name.parse::<ControlCommand>().map(ControlCommand::opcode)
}

/// Resolves a source name to its data byte.
pub fn source_code(name: &str) -> Result<u8> {
    name.parse::<Source>().map(Source::code)
}

/// Control command names, sorted.
pub fn control_names() -> Vec<&'static str> {
    let mut names: Vec<_> = ControlCommand::ALL.iter().map(|c| c.name()).collect();
    names.sort_unstable();
    names
}

/// Source names, sorted.
pub fn source_names() -> Vec<&'static str> {
    let mut names: Vec<_> = Source::ALL.iter().map(|s| s.name()).collect();
    names.sort_unstable();
    names
}
