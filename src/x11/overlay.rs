//! Creation of the transparent, click-through overlay window.

use tracing::{debug, info};
use x11rb::connection::Connection;
use x11rb::protocol::render::{ConnectionExt as _, CreatePictureAux};
use x11rb::protocol::shape::{ConnectionExt as _, SK, SO};
use x11rb::protocol::xproto::{
    ClipOrdering, ColormapAlloc, ConnectionExt as _, CreateWindowAux, Screen, SubwindowMode,
    WindowClass,
};

use super::atoms::Atoms;
use super::visual;
use crate::error::{MirrorError, Result};
use crate::overlay::OverlaySurface;

const OVERLAY_NAME: &str = "area-mirror";

/// Create the overlay: full-screen, unmapped, override-redirect, ARGB and
/// without any input region, plus the root and overlay pictures
pub fn create<C: Connection>(conn: &C, screen: &Screen, atoms: &Atoms) -> Result<OverlaySurface> {
    let formats = conn.render_query_pict_formats()?.reply()?;

    let (argb_visual, argb_format) = visual::find_argb(screen, &formats).ok_or(MirrorError::NoArgbVisual)?;
    let root_format = visual::format_for_visual(&formats, screen.root_visual)
        .ok_or(MirrorError::NoPictFormat(screen.root_visual))?;
    debug!(
        "ARGB visual {:#x} (format {:#x}), root format {:#x}",
        argb_visual, argb_format, root_format
    );

    let colormap = conn.generate_id()?;
    conn.create_colormap(ColormapAlloc::NONE, colormap, screen.root, argb_visual)?;

    let window = conn.generate_id()?;
    conn.create_window(
        32,
        window,
        screen.root,
        0,
        0,
        screen.width_in_pixels,
        screen.height_in_pixels,
        0,
        WindowClass::INPUT_OUTPUT,
        argb_visual,
        &CreateWindowAux::new()
            .background_pixel(0)
            .border_pixel(0)
            .override_redirect(1)
            .colormap(colormap),
    )?;

    // Empty input shape: every pixel passes pointer events through
    conn.shape_rectangles(SO::SET, SK::INPUT, ClipOrdering::UNSORTED, window, 0, 0, &[])?;
    atoms.set_window_name(conn, window, OVERLAY_NAME)?;

    let source = conn.generate_id()?;
    conn.render_create_picture(source, screen.root, root_format, &source_picture_aux())?;

    let dest = conn.generate_id()?;
    conn.render_create_picture(dest, window, argb_format, &CreatePictureAux::new())?;

    conn.flush()?;

    info!(
        "Created overlay window {:#x} ({}x{})",
        window, screen.width_in_pixels, screen.height_in_pixels
    );
    Ok(OverlaySurface::new(window, source, dest))
}

/// The root picture must read through child windows, or it only sees the
/// root background
fn source_picture_aux() -> CreatePictureAux {
    CreatePictureAux::new().subwindowmode(SubwindowMode::INCLUDE_INFERIORS)
}
