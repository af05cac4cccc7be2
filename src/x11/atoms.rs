//! Interned atoms and the EWMH properties the mirror reads.

use x11rb::connection::Connection;
use x11rb::protocol::xproto::{Atom, AtomEnum, ConnectionExt as _, PropMode, Window};
use x11rb::wrapper::ConnectionExt as _;

use crate::error::Result;

/// Longest title read from a window, in 32-bit units
const NAME_LENGTH: u32 = 256;
/// Largest client list read from the root, in windows
const CLIENT_LIST_LENGTH: u32 = 4096;

#[derive(Debug, Clone, Copy)]
pub struct Atoms {
    pub net_client_list: Atom,
    pub net_wm_name: Atom,
    pub utf8_string: Atom,
}

impl Atoms {
    /// Intern all required atoms
    pub fn new<C: Connection>(conn: &C) -> Result<Self> {
        let net_client_list = conn.intern_atom(false, b"_NET_CLIENT_LIST")?;
        let net_wm_name = conn.intern_atom(false, b"_NET_WM_NAME")?;
        let utf8_string = conn.intern_atom(false, b"UTF8_STRING")?;

        Ok(Self {
            net_client_list: net_client_list.reply()?.atom,
            net_wm_name: net_wm_name.reply()?.atom,
            utf8_string: utf8_string.reply()?.atom,
        })
    }

    /// Read `_NET_CLIENT_LIST` from the root window
    ///
    /// A missing property or one with an unexpected type yields an empty list.
    pub fn client_list<C: Connection>(&self, conn: &C, root: Window) -> Result<Vec<Window>> {
        let reply = conn
            .get_property(
                false,
                root,
                self.net_client_list,
                AtomEnum::WINDOW,
                0,
                CLIENT_LIST_LENGTH,
            )?
            .reply()?;

        if reply.type_ != Atom::from(AtomEnum::WINDOW) {
            return Ok(Vec::new());
        }
        Ok(reply.value32().map(Iterator::collect).unwrap_or_default())
    }

    /// Titles of `windows`, in the same order
    ///
    /// `_NET_WM_NAME` wins over `WM_NAME`. Requests for every window are sent
    /// before the first reply is awaited. A window whose properties cannot be
    /// read gets `None`.
    pub fn window_names<C: Connection>(&self, conn: &C, windows: &[Window]) -> Result<Vec<Option<String>>> {
        let mut cookies = Vec::with_capacity(windows.len());
        for &window in windows {
            let net_name = conn.get_property(false, window, self.net_wm_name, self.utf8_string, 0, NAME_LENGTH)?;
            let wm_name = conn.get_property(false, window, AtomEnum::WM_NAME, AtomEnum::ANY, 0, NAME_LENGTH)?;
            cookies.push((net_name, wm_name));
        }

        let names = cookies
            .into_iter()
            .map(|(net_name, wm_name)| {
                let text = |value: Vec<u8>| {
                    (!value.is_empty()).then(|| String::from_utf8_lossy(&value).into_owned())
                };
                let net_name = net_name.reply().ok().and_then(|r| text(r.value));
                let wm_name = wm_name.reply().ok().and_then(|r| text(r.value));
                net_name.or(wm_name)
            })
            .collect();

        Ok(names)
    }

    /// Give one of our own windows a title
    pub fn set_window_name<C: Connection>(&self, conn: &C, window: Window, name: &str) -> Result<()> {
        conn.change_property8(PropMode::REPLACE, window, AtomEnum::WM_NAME, AtomEnum::STRING, name.as_bytes())?;
        conn.change_property8(PropMode::REPLACE, window, self.net_wm_name, self.utf8_string, name.as_bytes())?;
        Ok(())
    }
}
