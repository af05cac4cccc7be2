//! Resolves the target window's on-screen bounds once per cycle.

use crate::error::{MirrorError, Result};
use crate::geometry::Geometry;
use crate::protocol::{Protocol, WindowId};

/// Current absolute position and size of `target`
///
/// A `BadWindow` from the coordinate translation means the window is gone and
/// comes back as `TargetLost`. Any other failure is passed through unchanged.
pub fn resolve<P: Protocol + ?Sized>(protocol: &P, target: WindowId) -> Result<Geometry> {
    let position = protocol.translate_origin(target).map_err(|e| match e {
        MirrorError::Protocol(pe) if pe.is_bad_window() => MirrorError::TargetLost(target),
        other => other,
    })?;
    let size = protocol.window_size(target)?;

    Ok(Geometry::from_parts(position, size))
}
