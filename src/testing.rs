//! Scripted in-memory display used by unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

use x11rb::errors::ConnectionError;

use crate::error::{BAD_DRAWABLE, BAD_WINDOW, MirrorError, ProtocolError, Result};
use crate::geometry::{Geometry, Point, Size};
use crate::protocol::{Candidate, CopyRequest, PictureId, Protocol, WindowId, WindowSource};

const GET_GEOMETRY: u8 = 14;
const TRANSLATE_COORDINATES: u8 = 40;

/// A request the code under test sent to the display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Configure(WindowId, Geometry),
    Map(WindowId),
    Unmap(WindowId),
    Copy(PictureId, PictureId, CopyRequest),
    Flush,
}

#[derive(Default)]
pub struct FakeDisplay {
    clients: RefCell<Vec<Candidate>>,
    client_list_error: RefCell<Option<ProtocolError>>,
    geometries: RefCell<HashMap<WindowId, Geometry>>,
    translate_errors: RefCell<VecDeque<MirrorError>>,
    pending_errors: RefCell<Vec<ProtocolError>>,
    calls: RefCell<Vec<Call>>,
    disconnected: Cell<bool>,
}

impl FakeDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(self, window: WindowId, name: Option<&str>) -> Self {
        self.add_client(window, name);
        self
    }

    pub fn with_window(self, window: WindowId, name: &str, geometry: Geometry) -> Self {
        self.add_client(window, Some(name));
        self.set_geometry(window, geometry);
        self
    }

    pub fn add_client(&self, window: WindowId, name: Option<&str>) {
        self.clients.borrow_mut().push(Candidate {
            window,
            name: name.map(str::to_string),
        });
    }

    pub fn set_geometry(&self, window: WindowId, geometry: Geometry) {
        self.geometries.borrow_mut().insert(window, geometry);
    }

    /// Destroy a window: it leaves the client list and its id becomes invalid
    pub fn destroy(&self, window: WindowId) {
        self.clients.borrow_mut().retain(|c| c.window != window);
        self.geometries.borrow_mut().remove(&window);
    }

    pub fn fail_client_list(&self, error: ProtocolError) {
        *self.client_list_error.borrow_mut() = Some(error);
    }

    /// Fail the next coordinate translation with `error`
    pub fn fail_next_translate(&self, error: ProtocolError) {
        self.fail_next_translate_with(error.into());
    }

    pub fn fail_next_translate_with(&self, error: MirrorError) {
        self.translate_errors.borrow_mut().push_back(error);
    }

    pub fn push_async_error(&self, error: ProtocolError) {
        self.pending_errors.borrow_mut().push(error);
    }

    /// Drop the connection: every later request fails with a connection error
    pub fn disconnect(&self) {
        self.disconnected.set(true);
    }

    fn check_connection(&self) -> Result<()> {
        if self.disconnected.get() {
            return Err(MirrorError::Connection(ConnectionError::UnknownError));
        }
        Ok(())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(*c)).count()
    }

    fn record(&self, call: Call) -> Result<()> {
        self.check_connection()?;
        self.calls.borrow_mut().push(call);
        Ok(())
    }
}

impl WindowSource for FakeDisplay {
    fn candidates(&self) -> Result<Vec<Candidate>> {
        self.check_connection()?;
        if let Some(e) = self.client_list_error.borrow().clone() {
            return Err(MirrorError::Protocol(e));
        }
        Ok(self.clients.borrow().clone())
    }
}

impl Protocol for FakeDisplay {
    fn translate_origin(&self, window: WindowId) -> Result<Point> {
        self.check_connection()?;
        if let Some(e) = self.translate_errors.borrow_mut().pop_front() {
            return Err(e);
        }
        self.geometries
            .borrow()
            .get(&window)
            .map(Geometry::position)
            .ok_or_else(|| ProtocolError::new(BAD_WINDOW, TRANSLATE_COORDINATES, 0, window).into())
    }

    fn window_size(&self, window: WindowId) -> Result<Size> {
        self.check_connection()?;
        self.geometries
            .borrow()
            .get(&window)
            .map(Geometry::size)
            .ok_or_else(|| ProtocolError::new(BAD_DRAWABLE, GET_GEOMETRY, 0, window).into())
    }

    fn configure(&self, window: WindowId, geometry: Geometry) -> Result<()> {
        self.record(Call::Configure(window, geometry))
    }

    fn map(&self, window: WindowId) -> Result<()> {
        self.record(Call::Map(window))
    }

    fn unmap(&self, window: WindowId) -> Result<()> {
        self.record(Call::Unmap(window))
    }

    fn copy(&self, source: PictureId, dest: PictureId, request: CopyRequest) -> Result<()> {
        self.record(Call::Copy(source, dest, request))
    }

    fn flush(&self) -> Result<()> {
        self.record(Call::Flush)
    }

    fn take_errors(&self) -> Result<Vec<ProtocolError>> {
        self.check_connection()?;
        Ok(std::mem::take(&mut *self.pending_errors.borrow_mut()))
    }
}
