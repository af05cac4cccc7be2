//! Seams between the mirror logic and the display server
//!
//! The X11 backend implements these over an x11rb connection; tests use a
//! scripted fake.

use crate::error::{ProtocolError, Result};
use crate::geometry::{Geometry, Point, Size};

pub type WindowId = u32;
pub type PictureId = u32;

/// A top-level window and its title, if one could be read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub window: WindowId,
    pub name: Option<String>,
}

/// Source of top-level windows to search for the target
pub trait WindowSource {
    /// List the window manager's client windows in enumeration order
    ///
    /// Fails only when the client list itself cannot be read. A window whose
    /// name is unreadable is still listed, with `name: None`.
    fn candidates(&self) -> Result<Vec<Candidate>>;
}

/// One pixel copy between two compositing endpoints, in protocol units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyRequest {
    pub src_x: i16,
    pub src_y: i16,
    pub dst_x: i16,
    pub dst_y: i16,
    pub width: u16,
    pub height: u16,
}

/// Requests issued by the tracking cycle
pub trait Protocol: WindowSource {
    /// Absolute screen position of the window's origin
    fn translate_origin(&self, window: WindowId) -> Result<Point>;

    /// Current width and height of the window
    fn window_size(&self, window: WindowId) -> Result<Size>;

    /// Move and resize in one request
    fn configure(&self, window: WindowId, geometry: Geometry) -> Result<()>;

    fn map(&self, window: WindowId) -> Result<()>;

    fn unmap(&self, window: WindowId) -> Result<()>;

    /// Copy with the SRC operator, no mask
    fn copy(&self, source: PictureId, dest: PictureId, request: CopyRequest) -> Result<()>;

    fn flush(&self) -> Result<()>;

    /// Errors the server reported for earlier requests whose replies were not awaited
    fn take_errors(&self) -> Result<Vec<ProtocolError>>;
}
