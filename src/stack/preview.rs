//! Preview derivation for note bodies: plain-text projection of markdown,
//! truncation rules for the stack panel, and the status-line rendering of
//! the active task.

use pulldown_cmark::{Event as MdEvent, Options, Parser, Tag, TagEnd};

use crate::constants::{PREVIEW_MAX_CHARS, STATUS_PREVIEW_MAX_CHARS};
use crate::note::{NoteBody, NoteEntry};

/// What the stack panel should render for one note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// Character-truncated single chunk of plain text.
    Plain(String),
    /// Rich text that carries recognized formatting markers: rendered as
    /// markup and height-clamped by the panel instead of char-truncated.
    Formatted(String),
    /// Media notes render as a badge; the terminal cannot inline them.
    MediaBadge(&'static str),
}

pub fn truncated_preview(body: &NoteBody) -> Preview {
    match body {
        NoteBody::Text(s) => Preview::Plain(truncate_chars(s)),
        NoteBody::RichText(s) => {
            if has_formatting(s) {
                Preview::Formatted(s.clone())
            } else {
                Preview::Plain(truncate_chars(&plain_projection(s)))
            }
        }
        NoteBody::Media(s) => Preview::MediaBadge(media_badge(s)),
    }
}

/// First 100 characters, or up to the first newline when one occurs after
/// character 0 and before character 100, with a trailing ellipsis whenever
/// truncation happened. Content at or under the limit passes through
/// untouched even if it contains newlines.
pub fn truncate_chars(s: &str) -> String {
    let total = s.chars().count();
    if total <= PREVIEW_MAX_CHARS {
        return s.to_owned();
    }
    let newline = s.chars().position(|c| c == '\n');
    let cut = match newline {
        Some(n) if n > 0 && n < PREVIEW_MAX_CHARS => n,
        _ => PREVIEW_MAX_CHARS,
    };
    let mut out: String = s.chars().take(cut).collect();
    out.push('…');
    out
}

/// Plain-text projection of markdown: concatenated text and code content
/// with breaks between blocks.
pub fn plain_projection(markdown: &str) -> String {
    let mut out = String::new();
    for ev in Parser::new_ext(markdown, Options::all()) {
        match ev {
            MdEvent::Text(t) | MdEvent::Code(t) => out.push_str(&t),
            MdEvent::SoftBreak | MdEvent::HardBreak => out.push('\n'),
            MdEvent::End(TagEnd::Paragraph)
            | MdEvent::End(TagEnd::Heading(_))
            | MdEvent::End(TagEnd::Item)
            | MdEvent::End(TagEnd::CodeBlock) => out.push('\n'),
            _ => {}
        }
    }
    while out.ends_with('\n') {
        out.pop();
    }
    out
}

/// Whether the markdown carries any of the recognized block or inline
/// formatting markers (bold, italic, strikethrough, quote, code, heading,
/// list). A bare paragraph does not count.
pub fn has_formatting(markdown: &str) -> bool {
    for ev in Parser::new_ext(markdown, Options::all()) {
        match ev {
            MdEvent::Start(
                Tag::Strong
                | Tag::Emphasis
                | Tag::Strikethrough
                | Tag::BlockQuote(_)
                | Tag::CodeBlock(_)
                | Tag::Heading { .. }
                | Tag::List(_)
                | Tag::Item,
            ) => return true,
            MdEvent::Code(_) => return true,
            _ => {}
        }
    }
    false
}

fn media_badge(content: &str) -> &'static str {
    if content.starts_with("data:image/") {
        "[Image]"
    } else if content.starts_with("data:video/") {
        "[Video]"
    } else if content.starts_with("data:audio/") {
        "[Audio]"
    } else {
        "Media attachment"
    }
}

/// Single-line rendering of the active task for the status surface. Plain
/// text is clipped at 120 characters; rich text keeps its plain projection
/// with embedded media reduced to placeholders; media notes show a generic
/// label.
pub fn status_line(task: Option<&NoteEntry>) -> String {
    let Some(task) = task else {
        return "No active task".to_owned();
    };
    match task.body() {
        NoteBody::Text(s) => clip_status(s),
        NoteBody::RichText(s) => clip_status(&status_projection(s)),
        NoteBody::Media(_) => "Media attachment".to_owned(),
    }
}

fn clip_status(s: &str) -> String {
    let flat = s.replace('\n', " ");
    if flat.chars().count() <= STATUS_PREVIEW_MAX_CHARS {
        flat
    } else {
        let mut out: String = flat.chars().take(STATUS_PREVIEW_MAX_CHARS).collect();
        out.push('…');
        out
    }
}

/// Plain projection that replaces embedded images with a placeholder so a
/// pasted picture does not blow up the one-line status area.
fn status_projection(markdown: &str) -> String {
    let mut out = String::new();
    let mut image_depth = 0usize;
    for ev in Parser::new_ext(markdown, Options::all()) {
        match ev {
            MdEvent::Start(Tag::Image { .. }) => {
                image_depth += 1;
                out.push_str("[Image]");
            }
            MdEvent::End(TagEnd::Image) => image_depth = image_depth.saturating_sub(1),
            _ if image_depth > 0 => {}
            MdEvent::Text(t) | MdEvent::Code(t) => out.push_str(&t),
            MdEvent::SoftBreak | MdEvent::HardBreak => out.push(' '),
            MdEvent::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item) => out.push(' '),
            _ => {}
        }
    }
    out.trim_end().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn short_text_passes_through() {
        let s = "short note\nwith newline";
        assert_eq!(truncate_chars(s), s);
    }

    #[test]
    fn long_text_cuts_at_limit() {
        let s = "x".repeat(150);
        let out = truncate_chars(&s);
        assert_eq!(out.chars().count(), PREVIEW_MAX_CHARS + 1);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn long_text_cuts_at_early_newline() {
        let mut s = "first line".to_owned();
        s.push('\n');
        s.push_str(&"y".repeat(140));
        let out = truncate_chars(&s);
        assert_eq!(out, "first line…");
    }

    #[test]
    fn newline_at_start_does_not_win() {
        let mut s = "\n".to_owned();
        s.push_str(&"z".repeat(140));
        let out = truncate_chars(&s);
        assert_eq!(out.chars().count(), PREVIEW_MAX_CHARS + 1);
    }

    #[test]
    fn plain_projection_strips_markup() {
        let md = indoc! {"
            # Title

            some *emphasis* and `code`
        "};
        assert_eq!(plain_projection(md), "Title\nsome emphasis and code");
    }

    #[test]
    fn formatting_detection() {
        assert!(has_formatting("**bold**"));
        assert!(has_formatting("# heading"));
        assert!(has_formatting("- item"));
        assert!(has_formatting("> quote"));
        assert!(has_formatting("`code`"));
        assert!(!has_formatting("just a plain sentence"));
    }

    #[test]
    fn rich_text_without_markers_is_char_truncated() {
        let body = NoteBody::RichText("plain words only".into());
        assert_eq!(
            truncated_preview(&body),
            Preview::Plain("plain words only".into())
        );
    }

    #[test]
    fn rich_text_with_markers_keeps_markup() {
        let body = NoteBody::RichText("**important**".into());
        assert_eq!(
            truncated_preview(&body),
            Preview::Formatted("**important**".into())
        );
    }

    #[test]
    fn media_badges_follow_data_uri_prefix() {
        assert_eq!(media_badge("data:image/png;base64,AA"), "[Image]");
        assert_eq!(media_badge("data:video/mp4;base64,AA"), "[Video]");
        assert_eq!(media_badge("data:audio/wav;base64,AA"), "[Audio]");
        assert_eq!(media_badge("file:///tmp/x"), "Media attachment");
    }

    #[test]
    fn status_line_without_task() {
        assert_eq!(status_line(None), "No active task");
    }

    #[test]
    fn status_line_clips_long_text() {
        use crate::stack::NoteStack;
        let mut stack = NoteStack::new();
        stack.append(NoteBody::Text("w".repeat(200)));
        stack.pop_newest().unwrap();
        let line = status_line(stack.active_task());
        assert_eq!(line.chars().count(), STATUS_PREVIEW_MAX_CHARS + 1);
        assert!(line.ends_with('…'));
    }

    #[test]
    fn status_line_replaces_embedded_images() {
        use crate::stack::NoteStack;
        let mut stack = NoteStack::new();
        stack.append(NoteBody::RichText("before ![alt](data:image/png;base64,AA) after".into()));
        stack.pop_newest().unwrap();
        let line = status_line(stack.active_task());
        assert!(line.contains("[Image]"));
        assert!(!line.contains("base64"));
    }
}
