//! Overlay surface state
//!
//! The surface itself is created by the X11 backend (`x11::overlay`); this
//! module owns what happens to it every cycle: bounds reconciliation and
//! mapping state.

use tracing::debug;

use crate::error::Result;
use crate::geometry::Geometry;
use crate::protocol::{PictureId, Protocol, WindowId};

/// The click-through overlay window and its two compositing endpoints
#[derive(Debug)]
pub struct OverlaySurface {
    pub window: WindowId,
    /// Picture bound to the root window, read from
    pub source: PictureId,
    /// Picture bound to the overlay, written to
    pub dest: PictureId,
    mapped: bool,
}

impl OverlaySurface {
    /// Wrap an unmapped overlay window
    pub fn new(window: WindowId, source: PictureId, dest: PictureId) -> Self {
        Self {
            window,
            source,
            dest,
            mapped: false,
        }
    }

    #[cfg(test)]
    pub fn is_mapped(&self) -> bool {
        self.mapped
    }

    /// Bring the overlay bounds to `observed`, if they differ from `cached`
    ///
    /// The cache is written before the configure request goes out. Returns
    /// whether a request was issued.
    pub fn reconcile<P: Protocol + ?Sized>(
        &self,
        protocol: &P,
        cached: &mut Option<Geometry>,
        observed: Geometry,
    ) -> Result<bool> {
        if *cached == Some(observed) {
            return Ok(false);
        }

        debug!(
            "Overlay bounds {:?} -> ({}, {}) {}x{}",
            cached, observed.x, observed.y, observed.width, observed.height
        );
        *cached = Some(observed);
        protocol.configure(self.window, observed)?;
        Ok(true)
    }

    pub fn show<P: Protocol + ?Sized>(&mut self, protocol: &P) -> Result<()> {
        if self.mapped {
            return Ok(());
        }
        protocol.map(self.window)?;
        self.mapped = true;
        Ok(())
    }

    pub fn hide<P: Protocol + ?Sized>(&mut self, protocol: &P) -> Result<()> {
        if !self.mapped {
            return Ok(());
        }
        protocol.unmap(self.window)?;
        protocol.flush()?;
        self.mapped = false;
        Ok(())
    }
}
