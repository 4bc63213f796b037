//! Configuration management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use vwall_mdc::Panel;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Log packets instead of writing to serial ports (all panels)
    #[serde(default)]
    pub debug: bool,

    /// Panels in wall order
    #[serde(default)]
    pub panels: Vec<PanelConfig>,
}

/// One display panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Protocol display ID
    pub id: u8,

    /// Serial port path
    #[serde(default = "default_port")]
    pub port: String,

    /// 1-based sequence position in the wall (0 = unset)
    #[serde(default)]
    pub position: u8,

    /// Column (0 = unset)
    #[serde(default)]
    pub x: u8,

    /// Row (0 = unset)
    #[serde(default)]
    pub y: u8,

    /// Log packets for this panel only
    #[serde(default)]
    pub debug: bool,
}

fn default_port() -> String {
    "/dev/ttyUSB0".to_string()
}

impl PanelConfig {
    /// Builds the panel, forcing debug mode when `force_debug` is set.
    pub fn build(&self, force_debug: bool) -> Panel {
        Panel::new(self.id, &self.port, self.debug || force_debug).with_position(
            self.position,
            self.x,
            self.y,
        )
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read configuration file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse configuration")?;
        Ok(config)
    }

    /// Whether any panel will only log its packets.
    pub fn any_debug(&self, force_debug: bool) -> bool {
        force_debug || self.debug || self.panels.iter().any(|p| p.debug)
    }

    /// Builds every configured panel, in wall order.
    pub fn build_panels(&self, force_debug: bool) -> Vec<Panel> {
        self.panels
            .iter()
            .map(|p| p.build(self.debug || force_debug))
            .collect()
    }
}
