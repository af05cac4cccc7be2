//! Finds the target window by title among the window manager's clients.

use tracing::debug;

use crate::error::{MirrorError, Result};
use crate::protocol::{WindowId, WindowSource};

/// First client whose title contains `title` (case-sensitive)
///
/// Returns `TargetNotFound` when nothing matches or the client list itself is
/// unreadable. Only a dead connection is escalated as something else.
pub fn find<S: WindowSource + ?Sized>(source: &S, title: &str) -> Result<WindowId> {
    let candidates = match source.candidates() {
        Ok(candidates) => candidates,
        Err(e) if e.is_fatal() => return Err(e),
        Err(e) => {
            debug!("Failed to read client list: {}", e);
            return Err(MirrorError::TargetNotFound(title.to_string()));
        }
    };

    for candidate in candidates {
        let Some(name) = candidate.name else {
            continue;
        };
        if name.contains(title) {
            debug!("Window {:#x} '{}' matches '{}'", candidate.window, name, title);
            return Ok(candidate.window);
        }
    }

    Err(MirrorError::TargetNotFound(title.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BAD_ATOM, ProtocolError};
    use crate::testing::FakeDisplay;

    #[test]
    fn substring_match_is_case_sensitive() {
        let display = FakeDisplay::new()
            .with_client(0x10, Some("fooBar"))
            .with_client(0x20, Some("FooBar - Editor"));

        assert_eq!(find(&display, "Foo").unwrap(), 0x20);
        assert!(matches!(find(&display, "Baz"), Err(MirrorError::TargetNotFound(t)) if t == "Baz"));
    }

    #[test]
    fn first_match_in_enumeration_order_wins() {
        let display = FakeDisplay::new()
            .with_client(0x30, Some("Editor 2"))
            .with_client(0x10, Some("Editor 1"));

        assert_eq!(find(&display, "Editor").unwrap(), 0x30);
    }

    #[test]
    fn unnamed_windows_are_skipped() {
        let display = FakeDisplay::new()
            .with_client(0x10, None)
            .with_client(0x20, Some("Game"));

        assert_eq!(find(&display, "Game").unwrap(), 0x20);
    }

    #[test]
    fn unreadable_client_list_is_not_found() {
        let display = FakeDisplay::new().with_client(0x20, Some("Game"));
        display.fail_client_list(ProtocolError::new(BAD_ATOM, 20, 0, 0));

        assert!(matches!(find(&display, "Game"), Err(MirrorError::TargetNotFound(_))));
    }

    #[test]
    fn dead_connection_is_escalated() {
        let display = FakeDisplay::new().with_client(0x20, Some("Game"));
        display.disconnect();

        let err = find(&display, "Game").unwrap_err();
        assert!(matches!(err, MirrorError::Connection(_)));
        assert!(err.is_fatal());
    }
}
