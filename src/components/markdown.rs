//! Minimal markdown-to-lines conversion for formatted previews and the help
//! overlay. Only the inline styles the previews care about are mapped;
//! anything else falls back to plain text.

use pulldown_cmark::{Event as MdEvent, Options, Parser, Tag, TagEnd};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

pub fn markdown_lines(raw: &str) -> Vec<Line<'static>> {
    let parser = Parser::new_ext(raw, Options::all());
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut bold = 0usize;
    let mut italic = 0usize;
    let mut strike = 0usize;
    let mut heading = 0usize;
    let mut quote = 0usize;
    let mut code_block = 0usize;
    let mut list_depth = 0usize;

    let flush = |lines: &mut Vec<Line<'static>>, current: &mut Vec<Span<'static>>| {
        if !current.is_empty() {
            lines.push(Line::from(std::mem::take(current)));
        }
    };

    for ev in parser {
        match ev {
            MdEvent::Start(tag) => match tag {
                Tag::Strong => bold += 1,
                Tag::Emphasis => italic += 1,
                Tag::Strikethrough => strike += 1,
                Tag::Heading { .. } => heading += 1,
                Tag::BlockQuote(_) => quote += 1,
                Tag::CodeBlock(_) => code_block += 1,
                Tag::List(_) => list_depth += 1,
                Tag::Item => {
                    flush(&mut lines, &mut current);
                    let indent = "  ".repeat(list_depth.saturating_sub(1));
                    current.push(Span::raw(format!("{indent}• ")));
                }
                _ => {}
            },
            MdEvent::End(end) => match end {
                TagEnd::Strong => bold = bold.saturating_sub(1),
                TagEnd::Emphasis => italic = italic.saturating_sub(1),
                TagEnd::Strikethrough => strike = strike.saturating_sub(1),
                TagEnd::Heading(_) => {
                    heading = heading.saturating_sub(1);
                    flush(&mut lines, &mut current);
                }
                TagEnd::BlockQuote(_) => quote = quote.saturating_sub(1),
                TagEnd::CodeBlock => {
                    code_block = code_block.saturating_sub(1);
                    flush(&mut lines, &mut current);
                }
                TagEnd::List(_) => list_depth = list_depth.saturating_sub(1),
                TagEnd::Item | TagEnd::Paragraph => flush(&mut lines, &mut current),
                _ => {}
            },
            MdEvent::Text(t) | MdEvent::Code(t) => {
                let mut style = Style::default();
                if bold > 0 || heading > 0 {
                    style = style.add_modifier(Modifier::BOLD);
                }
                if italic > 0 {
                    style = style.add_modifier(Modifier::ITALIC);
                }
                if strike > 0 {
                    style = style.add_modifier(Modifier::CROSSED_OUT);
                }
                if code_block > 0 {
                    style = style.add_modifier(Modifier::DIM);
                }
                let prefix = if quote > 0 && current.is_empty() {
                    "▏ "
                } else {
                    ""
                };
                if !prefix.is_empty() {
                    current.push(Span::raw(prefix));
                }
                for (i, piece) in t.split('\n').enumerate() {
                    if i > 0 {
                        flush(&mut lines, &mut current);
                    }
                    if !piece.is_empty() {
                        current.push(Span::styled(piece.to_owned(), style));
                    }
                }
            }
            MdEvent::SoftBreak | MdEvent::HardBreak => flush(&mut lines, &mut current),
            MdEvent::Rule => {
                flush(&mut lines, &mut current);
                lines.push(Line::from("─".repeat(8)));
            }
            _ => {}
        }
    }
    flush(&mut lines, &mut current);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn texts(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| {
                l.spans
                    .iter()
                    .map(|s| s.content.as_ref())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn heading_and_paragraph_become_separate_lines() {
        let md = indoc! {"
            # Title

            body text
        "};
        assert_eq!(texts(&markdown_lines(md)), ["Title", "body text"]);
    }

    #[test]
    fn bold_spans_are_styled() {
        let lines = markdown_lines("**hi** there");
        let first = &lines[0];
        assert!(
            first
                .spans
                .iter()
                .any(|s| s.style.add_modifier.contains(Modifier::BOLD))
        );
    }

    #[test]
    fn list_items_get_bullets() {
        let md = indoc! {"
            - one
            - two
        "};
        let out = texts(&markdown_lines(md));
        assert_eq!(out, ["• one", "• two"]);
    }
}
