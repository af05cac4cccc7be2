//! Error taxonomy for the mirror loop
//!
//! Every protocol operation returns `Result<T, MirrorError>`. The loop decides
//! between exiting, dropping the target, or skipping a cycle by looking at the
//! variant alone.

use std::fmt;

use thiserror::Error;
use x11rb::errors::{ConnectError, ConnectionError, ReplyError, ReplyOrIdError};
use x11rb::x11_utils::X11Error;

pub type Result<T, E = MirrorError> = std::result::Result<T, E>;

/// Core protocol error codes
pub const BAD_REQUEST: u8 = 1;
pub const BAD_VALUE: u8 = 2;
pub const BAD_WINDOW: u8 = 3;
pub const BAD_PIXMAP: u8 = 4;
pub const BAD_ATOM: u8 = 5;
pub const BAD_CURSOR: u8 = 6;
pub const BAD_FONT: u8 = 7;
pub const BAD_MATCH: u8 = 8;
pub const BAD_DRAWABLE: u8 = 9;
pub const BAD_ACCESS: u8 = 10;
pub const BAD_ALLOC: u8 = 11;
pub const BAD_COLORMAP: u8 = 12;
pub const BAD_GC: u8 = 13;
pub const BAD_ID_CHOICE: u8 = 14;
pub const BAD_NAME: u8 = 15;
pub const BAD_LENGTH: u8 = 16;
pub const BAD_IMPLEMENTATION: u8 = 17;

/// Human readable name of a core protocol error code
pub fn error_name(code: u8) -> &'static str {
    match code {
        BAD_REQUEST => "BadRequest",
        BAD_VALUE => "BadValue",
        BAD_WINDOW => "BadWindow",
        BAD_PIXMAP => "BadPixmap",
        BAD_ATOM => "BadAtom",
        BAD_CURSOR => "BadCursor",
        BAD_FONT => "BadFont",
        BAD_MATCH => "BadMatch",
        BAD_DRAWABLE => "BadDrawable",
        BAD_ACCESS => "BadAccess",
        BAD_ALLOC => "BadAlloc",
        BAD_COLORMAP => "BadColormap",
        BAD_GC => "BadGC",
        BAD_ID_CHOICE => "BadIDChoice",
        BAD_NAME => "BadName",
        BAD_LENGTH => "BadLength",
        BAD_IMPLEMENTATION => "BadImplementation",
        _ => "Unknown X error",
    }
}

/// A protocol-level error reported by the server for one request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ProtocolError {
    pub error_code: u8,
    pub major_opcode: u8,
    pub minor_opcode: u16,
    pub resource: u32,
    pub request: Option<&'static str>,
}

impl ProtocolError {
    pub fn new(error_code: u8, major_opcode: u8, minor_opcode: u16, resource: u32) -> Self {
        Self {
            error_code,
            major_opcode,
            minor_opcode,
            resource,
            request: None,
        }
    }

    pub fn category(&self) -> &'static str {
        error_name(self.error_code)
    }

    /// The request referenced a window that no longer exists
    pub fn is_bad_window(&self) -> bool {
        self.error_code == BAD_WINDOW
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "X error: code={} ({}), major={}, minor={}, resource={:#x}",
            self.error_code,
            self.category(),
            self.major_opcode,
            self.minor_opcode,
            self.resource
        )?;
        if let Some(request) = self.request {
            write!(f, ", request={request}")?;
        }
        Ok(())
    }
}

impl From<X11Error> for ProtocolError {
    fn from(e: X11Error) -> Self {
        Self {
            error_code: e.error_code,
            major_opcode: e.major_opcode,
            minor_opcode: e.minor_opcode,
            resource: e.bad_value,
            request: e.request_name,
        }
    }
}

#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("failed to connect to X server: {0}")]
    Connect(#[from] ConnectError),

    #[error("X server connection lost: {0}")]
    Connection(#[from] ConnectionError),

    #[error("required X extension {0} not available")]
    MissingExtension(&'static str),

    #[error("no 32-bit TrueColor visual with an alpha channel available")]
    NoArgbVisual,

    #[error("no RENDER picture format for visual {0:#x}")]
    NoPictFormat(u32),

    #[error("X resource ids exhausted")]
    IdsExhausted,

    #[error("Target window '{0}' not found")]
    TargetNotFound(String),

    #[error("target window {0:#x} is no longer valid")]
    TargetLost(u32),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl MirrorError {
    /// Fatal errors end the process; the rest are handled inside the loop
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::TargetNotFound(_) | Self::TargetLost(_) | Self::Protocol(_)
        )
    }
}

impl From<X11Error> for MirrorError {
    fn from(e: X11Error) -> Self {
        Self::Protocol(e.into())
    }
}

impl From<ReplyError> for MirrorError {
    fn from(e: ReplyError) -> Self {
        match e {
            ReplyError::ConnectionError(e) => Self::Connection(e),
            ReplyError::X11Error(e) => e.into(),
        }
    }
}

impl From<ReplyOrIdError> for MirrorError {
    fn from(e: ReplyOrIdError) -> Self {
        match e {
            ReplyOrIdError::IdsExhausted => Self::IdsExhausted,
            ReplyOrIdError::ConnectionError(e) => Self::Connection(e),
            ReplyOrIdError::X11Error(e) => e.into(),
        }
    }
}
