//! Video wall arrangement across several panels.
//!
//! Every wall operation walks the panels in order and stops at the first
//! failure. Panels already handled keep whatever they were sent; nothing
//! is retried or rolled back, with one exception: [`Wall::on`] turns the
//! whole wall off when it reaches a panel without coordinates.

use crate::mdc::{wall_code, ControlCommand, OFF};
use crate::panel::Panel;
use crate::{Error, Result};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Largest column or row that fits in one nibble of the wall code.
pub const MAX_GRID: u8 = 0x0F;

/// An ordered set of panels forming one composite display.
///
/// The wall borrows its panels; they are owned elsewhere.
#[derive(Debug, Clone, Default)]
pub struct Wall<'a> {
    panels: Vec<&'a Panel>,
}

impl<'a> Wall<'a> {
    pub fn new(panels: Vec<&'a Panel>) -> Self {
        Self { panels }
    }

    pub fn panels(&self) -> &[&'a Panel] {
        &self.panels
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Programs each panel with its tile position and enables wall mode.
    ///
    /// Positions are checked panel by panel while sending, so panels ahead
    /// of an unpositioned one have already been switched on when the
    /// problem is found. In that case the entire wall is switched off again
    /// and [`Error::NotPositioned`] is returned. A transmission failure is
    /// returned as-is without switching anything off.
    ///
    /// Use [`Wall::on_checked`] to validate before sending anything.
    pub async fn on(&self) -> Result<()> {
        for panel in &self.panels {
            if !panel.is_positioned() {
                warn!(
                    "Panel {} has no position, turning wall off",
                    panel.id()
                );
                if let Err(e) = self.off().await {
                    warn!("Wall off after missing position failed: {}", e);
                }
                return Err(Error::NotPositioned(panel.id()));
            }

            let code = wall_code(panel.x(), panel.y());
            debug!(
                "Panel {} -> wall code {:#04x}, position {}",
                panel.id(),
                code,
                panel.position()
            );
            panel
                .apply(ControlCommand::Wall.name(), &[code, panel.position()])
                .await?;
        }

        info!("Wall on ({} panels)", self.panels.len());
        Ok(())
    }

    /// Disables wall mode on every panel.
    pub async fn off(&self) -> Result<()> {
        for panel in &self.panels {
            panel.apply(ControlCommand::Wall.name(), &[OFF]).await?;
        }

        info!("Wall off ({} panels)", self.panels.len());
        Ok(())
    }

    /// Validates the arrangement without sending anything.
    ///
    /// Every panel must have x and y in `1..=15`, and a position in
    /// `1..=len` that no other panel uses.
    pub fn check_arrangement(&self) -> Result<()> {
        let mut seen = HashSet::new();

        for panel in &self.panels {
            if !panel.is_positioned() {
                return Err(Error::NotPositioned(panel.id()));
            }
            if panel.x() > MAX_GRID || panel.y() > MAX_GRID {
                return Err(Error::InvalidArrangement(format!(
                    "panel {} coordinates ({}, {}) exceed {}",
                    panel.id(),
                    panel.x(),
                    panel.y(),
                    MAX_GRID
                )));
            }
            let position = panel.position() as usize;
            if position == 0 || position > self.panels.len() {
                return Err(Error::InvalidArrangement(format!(
                    "panel {} position {} outside 1..={}",
                    panel.id(),
                    position,
                    self.panels.len()
                )));
            }
            if !seen.insert(position) {
                return Err(Error::InvalidArrangement(format!(
                    "panel {} reuses position {}",
                    panel.id(),
                    position
                )));
            }
        }

        Ok(())
    }

    /// [`Wall::check_arrangement`], then [`Wall::on`].
    pub async fn on_checked(&self) -> Result<()> {
        self.check_arrangement()?;
        self.on().await
    }
}
