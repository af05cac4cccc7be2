//! X11 backend
//!
//! Implements the mirror's protocol seams over an x11rb connection, using
//! RENDER for the region copies and SHAPE for the click-through overlay.

pub mod atoms;
pub mod overlay;
pub mod visual;

use tracing::{debug, info};
use x11rb::connection::{Connection, RequestConnection};
use x11rb::protocol::Event;
use x11rb::protocol::render::{self, ConnectionExt as _, PictOp};
use x11rb::protocol::shape;
use x11rb::protocol::xproto::{ConfigureWindowAux, ConnectionExt as _, Screen, Window};
use x11rb::rust_connection::RustConnection;

use crate::error::{MirrorError, ProtocolError, Result};
use crate::geometry::{Geometry, Point, Size};
use crate::overlay::OverlaySurface;
use crate::protocol::{Candidate, CopyRequest, PictureId, Protocol, WindowId, WindowSource};
use atoms::Atoms;

pub struct X11Display {
    conn: RustConnection,
    screen_num: usize,
    atoms: Atoms,
}

impl X11Display {
    /// Connect to the display named by the environment and check the
    /// extensions the mirror depends on
    pub fn connect() -> Result<Self> {
        let (conn, screen_num) = x11rb::connect(None)?;
        let root = conn.setup().roots[screen_num].root;
        info!("Connected to X server, screen {}, root window {:#x}", screen_num, root);

        if conn.extension_information(render::X11_EXTENSION_NAME)?.is_none() {
            return Err(MirrorError::MissingExtension("RENDER"));
        }
        if conn.extension_information(shape::X11_EXTENSION_NAME)?.is_none() {
            return Err(MirrorError::MissingExtension("SHAPE"));
        }

        let version = conn.render_query_version(0, 11)?.reply()?;
        debug!(
            "RENDER extension {}.{}",
            version.major_version, version.minor_version
        );

        let atoms = Atoms::new(&conn)?;

        Ok(Self {
            conn,
            screen_num,
            atoms,
        })
    }

    pub fn screen(&self) -> &Screen {
        &self.conn.setup().roots[self.screen_num]
    }

    fn root(&self) -> Window {
        self.screen().root
    }

    /// Create the overlay surface on this display's screen
    pub fn create_overlay(&self) -> Result<OverlaySurface> {
        overlay::create(&self.conn, self.screen(), &self.atoms)
    }
}

impl WindowSource for X11Display {
    fn candidates(&self) -> Result<Vec<Candidate>> {
        let windows = self.atoms.client_list(&self.conn, self.root())?;
        let names = self.atoms.window_names(&self.conn, &windows)?;

        Ok(windows
            .into_iter()
            .zip(names)
            .map(|(window, name)| Candidate { window, name })
            .collect())
    }
}

impl Protocol for X11Display {
    fn translate_origin(&self, window: WindowId) -> Result<Point> {
        let reply = self
            .conn
            .translate_coordinates(window, self.root(), 0, 0)?
            .reply()?;
        Ok(Point::new(reply.dst_x.into(), reply.dst_y.into()))
    }

    fn window_size(&self, window: WindowId) -> Result<Size> {
        let reply = self.conn.get_geometry(window)?.reply()?;
        Ok(Size::new(reply.width.into(), reply.height.into()))
    }

    fn configure(&self, window: WindowId, geometry: Geometry) -> Result<()> {
        self.conn.configure_window(
            window,
            &ConfigureWindowAux::new()
                .x(geometry.x)
                .y(geometry.y)
                .width(geometry.width)
                .height(geometry.height),
        )?;
        Ok(())
    }

    fn map(&self, window: WindowId) -> Result<()> {
        self.conn.map_window(window)?;
        Ok(())
    }

    fn unmap(&self, window: WindowId) -> Result<()> {
        self.conn.unmap_window(window)?;
        Ok(())
    }

    fn copy(&self, source: PictureId, dest: PictureId, request: CopyRequest) -> Result<()> {
        self.conn.render_composite(
            PictOp::SRC,
            source,
            x11rb::NONE,
            dest,
            request.src_x,
            request.src_y,
            0,
            0,
            request.dst_x,
            request.dst_y,
            request.width,
            request.height,
        )?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.conn.flush()?;
        Ok(())
    }

    fn take_errors(&self) -> Result<Vec<ProtocolError>> {
        let mut errors = Vec::new();
        while let Some(event) = self.conn.poll_for_event()? {
            if let Event::Error(e) = event {
                errors.push(e.into());
            }
        }
        Ok(errors)
    }
}
