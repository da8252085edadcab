//! Note entry types shared by the model, the surfaces and the message
//! boundary.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

/// Opaque stable identifier for a note. Assigned by the stack at append time
/// and never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoteId(pub(crate) u64);

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "note-{}", self.0)
    }
}

/// Discriminant of a note body, used by the message boundary and the
/// order-changed projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteKind {
    Text,
    RichText,
    Media,
}

impl fmt::Display for NoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NoteKind::Text => "text",
            NoteKind::RichText => "rich-text",
            NoteKind::Media => "media",
        };
        write!(f, "{}", s)
    }
}

/// Note content. Rich text is markdown; media is an opaque data-URI style
/// reference the surfaces never interpret beyond its prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteBody {
    Text(String),
    RichText(String),
    Media(String),
}

impl NoteBody {
    pub fn kind(&self) -> NoteKind {
        match self {
            NoteBody::Text(_) => NoteKind::Text,
            NoteBody::RichText(_) => NoteKind::RichText,
            NoteBody::Media(_) => NoteKind::Media,
        }
    }

    pub fn raw(&self) -> &str {
        match self {
            NoteBody::Text(s) | NoteBody::RichText(s) | NoteBody::Media(s) => s,
        }
    }

    /// Validate a raw boundary payload into a typed body. This is the only
    /// gate through which external content reaches the model.
    pub fn parse(kind: &str, content: &str) -> Result<Self, PayloadError> {
        if content.is_empty() {
            return Err(PayloadError::MalformedEntry("empty content"));
        }
        match kind {
            "text" => Ok(NoteBody::Text(content.to_owned())),
            "rich-text" => Ok(NoteBody::RichText(content.to_owned())),
            "media" => Ok(NoteBody::Media(content.to_owned())),
            "" => Err(PayloadError::MalformedEntry("missing type")),
            _ => Err(PayloadError::MalformedEntry("unknown type")),
        }
    }
}

/// Boundary rejection for payloads that never reach the model.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("malformed note payload: {0}")]
    MalformedEntry(&'static str),
}

/// One user-submitted note. Content and creation time are immutable; only
/// the position within the stack ever changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteEntry {
    id: NoteId,
    body: NoteBody,
    created_at: SystemTime,
}

impl NoteEntry {
    pub(crate) fn new(id: NoteId, body: NoteBody, created_at: SystemTime) -> Self {
        Self {
            id,
            body,
            created_at,
        }
    }

    pub fn id(&self) -> NoteId {
        self.id
    }

    pub fn body(&self) -> &NoteBody {
        &self.body
    }

    pub fn created_at(&self) -> SystemTime {
        self.created_at
    }

    /// Projection sent to the host after a reorder. Deliberately excludes
    /// the id and any display-only fields.
    pub fn snapshot(&self) -> OrderSnapshot {
        OrderSnapshot {
            content: self.body.raw().to_owned(),
            kind: self.body.kind(),
            timestamp_ms: self
                .created_at
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or(0),
        }
    }
}

/// The `{content, type, timestamp}` projection of a note used by the
/// fire-and-forget order-changed notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSnapshot {
    pub content: String,
    pub kind: NoteKind,
    pub timestamp_ms: u128,
}
