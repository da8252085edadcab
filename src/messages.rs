//! Typed boundary messages between the note entry surface, the stack
//! display surface and the host controller.
//!
//! All three run in one process here, but they interact only through these
//! enums over `mpsc` channels pumped by the host — never by direct
//! reference. Sends are fire-and-forget: a dropped receiver is logged and
//! otherwise ignored; nothing is acknowledged or awaited.

use std::sync::mpsc::Sender;
use std::time::SystemTime;

use tracing::warn;

use crate::note::{NoteBody, OrderSnapshot};

/// Raw, unvalidated note payload as the entry surface hands it over.
/// Validated into a [`NoteBody`] at the host boundary before anything
/// reaches the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotePayload {
    pub kind: String,
    pub content: String,
}

impl NotePayload {
    pub fn new<K: Into<String>, C: Into<String>>(kind: K, content: C) -> Self {
        Self {
            kind: kind.into(),
            content: content.into(),
        }
    }
}

/// Entry surface -> host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorRequest {
    /// Deliver a finished note for stacking.
    SubmitNote(NotePayload),
    /// Ask where the stack sits so the submit transition can aim at it.
    RequestStackPosition,
    RequestHide,
    RequestShow,
}

/// Host -> entry surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    /// Drop the draft after a successful submit.
    Clear,
}

/// Host -> stack surface.
#[derive(Debug, Clone, PartialEq)]
pub enum StackCommand {
    /// Authoritative append. The body has already passed boundary
    /// validation; the stack assigns the id.
    Append {
        body: NoteBody,
        created_at: SystemTime,
    },
    Expand,
    Collapse,
}

/// Stack surface -> host. Emitted after every successful reorder; the stack
/// neither awaits nor verifies acceptance.
#[derive(Debug, Clone, PartialEq)]
pub enum StackNotification {
    OrderChanged(Vec<OrderSnapshot>),
}

/// Answer to [`EditorRequest::RequestStackPosition`]: where the entry
/// surface should animate toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackAnchor {
    pub x: u16,
    pub y: u16,
}

/// Fire-and-forget send helper: a closed channel is an observability event,
/// not an error the sender can act on.
pub fn send_lossy<T: Send + 'static>(tx: &Sender<T>, message: T, what: &'static str) {
    if tx.send(message).is_err() {
        warn!(what, "message receiver dropped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn send_lossy_delivers_when_receiver_alive() {
        let (tx, rx) = mpsc::channel();
        send_lossy(&tx, EditorRequest::RequestHide, "editor request");
        assert_eq!(rx.try_recv(), Ok(EditorRequest::RequestHide));
    }

    #[test]
    fn send_lossy_swallows_closed_channel() {
        let (tx, rx) = mpsc::channel::<EditorRequest>();
        drop(rx);
        // must not panic or error out
        send_lossy(&tx, EditorRequest::RequestShow, "editor request");
    }
}
