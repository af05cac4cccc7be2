//! Mirror rules: which rectangles of the target window land where on the overlay.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Geometry;

/// A source rectangle relative to the target window's top-left corner, and the
/// point on the overlay it is copied to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub src_x: i32,
    pub src_y: i32,
    pub src_w: u32,
    pub src_h: u32,
    pub dst_x: i32,
    pub dst_y: i32,
}

impl Region {
    pub const fn new(src_x: i32, src_y: i32, src_w: u32, src_h: u32, dst_x: i32, dst_y: i32) -> Self {
        Self {
            src_x,
            src_y,
            src_w,
            src_h,
            dst_x,
            dst_y,
        }
    }

    /// Area this region covers on the overlay
    pub fn dest_rect(&self) -> Geometry {
        Geometry::new(self.dst_x, self.dst_y, self.src_w, self.src_h)
    }
}

const ICON_SIZE: u32 = 32;
const STRIP_X: i32 = 1115;
const STRIP_Y: i32 = 350;
const STRIP_STEP: i32 = 36;

/// Built-in table: six 32x32 indicators gathered into a horizontal strip
pub fn default_regions() -> Vec<Region> {
    [(353, 218), (353, 362), (480, 1117), (768, 1117), (948, 1117), (2389, 134)]
        .into_iter()
        .enumerate()
        .map(|(i, (x, y))| Region::new(x, y, ICON_SIZE, ICON_SIZE, STRIP_X + STRIP_STEP * i as i32, STRIP_Y))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegionError {
    #[error("region {index} has an empty extent")]
    Empty { index: usize },

    #[error("region {index} does not fit 16-bit protocol coordinates")]
    OutOfRange { index: usize },

    #[error("regions {first} and {second} overlap on the overlay")]
    Overlap { first: usize, second: usize },
}

/// Check a region table before it is handed to the compositor
///
/// Destinations must be pairwise disjoint so that copy order never matters.
pub fn validate(regions: &[Region]) -> Result<(), RegionError> {
    for (index, r) in regions.iter().enumerate() {
        if r.src_w == 0 || r.src_h == 0 {
            return Err(RegionError::Empty { index });
        }

        let fits = i16::try_from(r.src_x).is_ok()
            && i16::try_from(r.src_y).is_ok()
            && i16::try_from(r.dst_x).is_ok()
            && i16::try_from(r.dst_y).is_ok()
            && u16::try_from(r.src_w).is_ok()
            && u16::try_from(r.src_h).is_ok();
        if !fits {
            return Err(RegionError::OutOfRange { index });
        }
    }

    for (first, a) in regions.iter().enumerate() {
        for (offset, b) in regions[first + 1..].iter().enumerate() {
            if a.dest_rect().intersects(&b.dest_rect()) {
                return Err(RegionError::Overlap {
                    first,
                    second: first + 1 + offset,
                });
            }
        }
    }

    Ok(())
}
