//! Copies every configured region from the screen into the overlay.

use tracing::trace;

use crate::error::Result;
use crate::geometry::Point;
use crate::protocol::{CopyRequest, PictureId, Protocol};
use crate::region::Region;

fn clamp_i16(value: i32) -> i16 {
    value.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

fn clamp_u16(value: u32) -> u16 {
    value.min(u16::MAX as u32) as u16
}

/// Translate a region into one copy for a target whose origin is at `origin`
pub fn copy_request(origin: Point, region: &Region) -> CopyRequest {
    let src = origin.offset(region.src_x, region.src_y);
    CopyRequest {
        src_x: clamp_i16(src.x),
        src_y: clamp_i16(src.y),
        dst_x: clamp_i16(region.dst_x),
        dst_y: clamp_i16(region.dst_y),
        width: clamp_u16(region.src_w),
        height: clamp_u16(region.src_h),
    }
}

/// Issue one copy per region, then flush the batch once
pub fn composite<P: Protocol + ?Sized>(
    protocol: &P,
    source: PictureId,
    dest: PictureId,
    origin: Point,
    regions: &[Region],
) -> Result<()> {
    for region in regions {
        protocol.copy(source, dest, copy_request(origin, region))?;
    }
    protocol.flush()?;

    trace!("Composited {} regions from origin ({}, {})", regions.len(), origin.x, origin.y);
    Ok(())
}
