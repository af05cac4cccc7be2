//! Acquisition/recovery loop
//!
//! Drives the fixed-rate cycle: find the target while none is held, then
//! track it at frame rate, dropping back to slow discovery when it goes away.
//! All loop state lives in [`Mirror`]; nothing here is global.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::compositor;
use crate::error::{MirrorError, Result};
use crate::geometry::Geometry;
use crate::locator;
use crate::overlay::OverlaySurface;
use crate::protocol::{Protocol, WindowId};
use crate::region::Region;
use crate::tracker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorState {
    /// No target has been found yet
    Unacquired,
    /// A live target is mirrored every cycle
    Tracking,
    /// The target disappeared; discovery resumes at the slow cadence
    Lost,
}

/// Sleep intervals between cycles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// While tracking
    pub poll: Duration,
    /// While searching for the target
    pub discovery: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            poll: Duration::from_millis(16),
            discovery: Duration::from_secs(5),
        }
    }
}

pub struct Mirror<P: Protocol> {
    protocol: P,
    overlay: OverlaySurface,
    title: String,
    regions: Vec<Region>,
    timing: Timing,
    /// Exit instead of retrying when the first search comes up empty
    fail_fast: bool,
    searched: bool,
    state: MirrorState,
    target: Option<WindowId>,
    /// Bounds last applied to the overlay
    cached: Option<Geometry>,
}

impl<P: Protocol> Mirror<P> {
    pub fn new(
        protocol: P,
        overlay: OverlaySurface,
        title: impl Into<String>,
        regions: Vec<Region>,
        timing: Timing,
    ) -> Self {
        Self {
            protocol,
            overlay,
            title: title.into(),
            regions,
            timing,
            fail_fast: false,
            searched: false,
            state: MirrorState::Unacquired,
            target: None,
            cached: None,
        }
    }

    pub fn fail_fast(mut self, enabled: bool) -> Self {
        self.fail_fast = enabled;
        self
    }

    #[cfg(test)]
    pub fn state(&self) -> MirrorState {
        self.state
    }

    #[cfg(test)]
    pub fn target(&self) -> Option<WindowId> {
        self.target
    }

    #[cfg(test)]
    pub fn protocol(&self) -> &P {
        &self.protocol
    }

    /// Run cycles until a fatal error occurs
    pub fn run(&mut self) -> Result<()> {
        info!(
            "Mirroring {} regions from '{}' (poll {:?}, discovery {:?})",
            self.regions.len(),
            self.title,
            self.timing.poll,
            self.timing.discovery
        );

        loop {
            let delay = self.step()?;
            std::thread::sleep(delay);
        }
    }

    /// Run a single cycle and return how long to sleep before the next one
    pub fn step(&mut self) -> Result<Duration> {
        if self.target.is_none() {
            match locator::find(&self.protocol, &self.title) {
                Ok(window) => self.acquire(window)?,
                Err(MirrorError::TargetNotFound(title)) => {
                    if self.fail_fast && !self.searched {
                        return Err(MirrorError::TargetNotFound(title));
                    }
                    self.searched = true;
                    debug!("Target '{}' not found, retrying in {:?}", title, self.timing.discovery);
                    return Ok(self.timing.discovery);
                }
                Err(e) => return Err(e),
            }
        }

        self.track()
    }

    fn acquire(&mut self, window: WindowId) -> Result<()> {
        info!("Found a new window: {:#x} (was {:?})", window, self.state);
        self.searched = true;
        self.target = Some(window);
        self.state = MirrorState::Tracking;
        self.overlay.show(&self.protocol)
    }

    fn lose(&mut self, window: WindowId) -> Result<()> {
        warn!("Target window {:#x} is gone, hiding overlay", window);
        self.target = None;
        self.state = MirrorState::Lost;
        self.overlay.hide(&self.protocol)
    }

    fn track(&mut self) -> Result<Duration> {
        let Some(target) = self.target else {
            return Ok(self.timing.discovery);
        };

        for e in self.protocol.take_errors()? {
            warn!("{}", e);
        }

        match self.refresh(target) {
            Ok(()) => Ok(self.timing.poll),
            Err(MirrorError::TargetLost(window)) => {
                self.lose(window)?;
                Ok(self.timing.discovery)
            }
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                warn!("Skipping frame for {:#x}: {}", target, e);
                Ok(self.timing.poll)
            }
        }
    }

    fn refresh(&mut self, target: WindowId) -> Result<()> {
        let geometry = tracker::resolve(&self.protocol, target)?;
        self.overlay.reconcile(&self.protocol, &mut self.cached, geometry)?;
        compositor::composite(
            &self.protocol,
            self.overlay.source,
            self.overlay.dest,
            geometry.position(),
            &self.regions,
        )
    }
}
