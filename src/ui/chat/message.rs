//! Message display components with Markdown rendering
//!
//! Model output is interpreted (headings, emphasis, lists, tables, fenced
//! code with a copy button); user messages are shown exactly as typed.

use crate::types::message::{ChatMessage, Sender};
use dioxus::prelude::*;

// ============================================================================
// Block-level parsing
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
enum Block {
    Paragraph(String),
    Heading(u8, String),
    Code { language: String, code: String },
    Bullets(Vec<String>),
    Numbered(Vec<String>),
    Quote(String),
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Rule,
}

/// Split a `|`-delimited table line into trimmed cells
fn split_row(line: &str) -> Vec<String> {
    line.trim()
        .trim_matches('|')
        .split('|')
        .map(|cell| cell.trim().to_string())
        .collect()
}

/// A separator row looks like |---|:---:|
fn is_separator_row(line: &str) -> bool {
    let inner = line.trim().trim_matches('|');
    inner.split('|').all(|cell| {
        let cell = cell.trim();
        cell.contains('-') && cell.chars().all(|c| matches!(c, '-' | ':' | ' '))
    })
}

/// Ordered-list item: leading digits, a dot, a space
fn numbered_item(line: &str) -> Option<&str> {
    let dot = line.find(". ")?;
    if dot > 0 && line[..dot].chars().all(|c| c.is_ascii_digit()) {
        Some(&line[dot + 2..])
    } else {
        None
    }
}

fn is_bullet(line: &str) -> bool {
    line.starts_with("- ") || line.starts_with("* ")
}

fn parse_blocks(content: &str) -> Vec<Block> {
    let lines: Vec<&str> = content.lines().collect();
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let trimmed = lines[i].trim();

        if trimmed.is_empty() {
            i += 1;
            continue;
        }

        // Fenced code; an unclosed fence swallows the rest of the message,
        // which is what a reader expects from truncated model output
        if let Some(language) = trimmed.strip_prefix("```") {
            let language = language.trim().to_string();
            let mut code_lines = Vec::new();
            i += 1;
            while i < lines.len() && !lines[i].trim().starts_with("```") {
                code_lines.push(lines[i]);
                i += 1;
            }
            i += 1; // past the closing fence, if any
            blocks.push(Block::Code {
                language,
                code: code_lines.join("\n"),
            });
            continue;
        }

        if trimmed == "---" || trimmed == "***" || trimmed == "___" {
            blocks.push(Block::Rule);
            i += 1;
            continue;
        }

        if trimmed.starts_with('#') {
            let level = trimmed.chars().take_while(|&c| c == '#').count();
            if level <= 6 {
                let text = trimmed.trim_start_matches('#').trim().to_string();
                blocks.push(Block::Heading(level as u8, text));
                i += 1;
                continue;
            }
        }

        if trimmed.starts_with('>') {
            let mut quote_lines = Vec::new();
            while i < lines.len() && lines[i].trim().starts_with('>') {
                quote_lines.push(lines[i].trim().trim_start_matches('>').trim().to_string());
                i += 1;
            }
            blocks.push(Block::Quote(quote_lines.join("\n")));
            continue;
        }

        if trimmed.starts_with('|') && trimmed.ends_with('|') {
            let mut table_lines = Vec::new();
            while i < lines.len() {
                let line = lines[i].trim();
                if line.starts_with('|') && line.ends_with('|') {
                    table_lines.push(line);
                    i += 1;
                } else {
                    break;
                }
            }
            if table_lines.len() >= 2 && is_separator_row(table_lines[1]) {
                let headers = split_row(table_lines[0]);
                let rows = table_lines[2..].iter().map(|l| split_row(l)).collect();
                blocks.push(Block::Table { headers, rows });
            } else {
                // Not a real table; keep the text as-is
                blocks.push(Block::Paragraph(table_lines.join("\n")));
            }
            continue;
        }

        if is_bullet(trimmed) {
            let mut items = Vec::new();
            while i < lines.len() && is_bullet(lines[i].trim()) {
                items.push(lines[i].trim()[2..].to_string());
                i += 1;
            }
            blocks.push(Block::Bullets(items));
            continue;
        }

        if numbered_item(trimmed).is_some() {
            let mut items = Vec::new();
            while i < lines.len() {
                match numbered_item(lines[i].trim()) {
                    Some(item) => {
                        items.push(item.to_string());
                        i += 1;
                    }
                    None => break,
                }
            }
            blocks.push(Block::Numbered(items));
            continue;
        }

        // Paragraph: run of plain lines up to a blank or a structural start
        let mut para_lines = Vec::new();
        while i < lines.len() {
            let t = lines[i].trim();
            if t.is_empty()
                || t.starts_with('#')
                || t.starts_with("```")
                || t.starts_with('>')
                || t.starts_with('|')
                || is_bullet(t)
                || numbered_item(t).is_some()
            {
                break;
            }
            para_lines.push(lines[i]);
            i += 1;
        }
        if !para_lines.is_empty() {
            blocks.push(Block::Paragraph(para_lines.join("\n")));
        }
    }

    blocks
}

// ============================================================================
// Inline parsing
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
enum Span {
    Text(String),
    Bold(String),
    Italic(String),
    Code(String),
    Link { label: String, url: String },
}

fn find_char(chars: &[char], from: usize, needle: char) -> Option<usize> {
    chars[from..].iter().position(|&c| c == needle).map(|p| from + p)
}

fn find_double_star(chars: &[char], from: usize) -> Option<usize> {
    let mut i = from;
    while i + 1 < chars.len() {
        if chars[i] == '*' && chars[i + 1] == '*' {
            return Some(i);
        }
        i += 1;
    }
    None
}

fn parse_inline(text: &str) -> Vec<Span> {
    let chars: Vec<char> = text.chars().collect();
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut i = 0;

    let mut flush = |plain: &mut String, spans: &mut Vec<Span>| {
        if !plain.is_empty() {
            spans.push(Span::Text(std::mem::take(plain)));
        }
    };

    while i < chars.len() {
        // `code`
        if chars[i] == '`' {
            if let Some(close) = find_char(&chars, i + 1, '`') {
                flush(&mut plain, &mut spans);
                spans.push(Span::Code(chars[i + 1..close].iter().collect()));
                i = close + 1;
                continue;
            }
        }

        // **bold**
        if chars[i] == '*' && chars.get(i + 1) == Some(&'*') {
            if let Some(close) = find_double_star(&chars, i + 2) {
                flush(&mut plain, &mut spans);
                spans.push(Span::Bold(chars[i + 2..close].iter().collect()));
                i = close + 2;
                continue;
            }
        }

        // *italic*, rejecting "* " which is a stray bullet
        if chars[i] == '*' && chars.get(i + 1).map_or(false, |&c| c != ' ' && c != '*') {
            if let Some(close) = find_char(&chars, i + 1, '*') {
                let inner: String = chars[i + 1..close].iter().collect();
                if !inner.ends_with(' ') {
                    flush(&mut plain, &mut spans);
                    spans.push(Span::Italic(inner));
                    i = close + 1;
                    continue;
                }
            }
        }

        // [label](url)
        if chars[i] == '[' {
            if let Some(close_bracket) = find_char(&chars, i + 1, ']') {
                if chars.get(close_bracket + 1) == Some(&'(') {
                    if let Some(close_paren) = find_char(&chars, close_bracket + 2, ')') {
                        flush(&mut plain, &mut spans);
                        spans.push(Span::Link {
                            label: chars[i + 1..close_bracket].iter().collect(),
                            url: chars[close_bracket + 2..close_paren].iter().collect(),
                        });
                        i = close_paren + 1;
                        continue;
                    }
                }
            }
        }

        plain.push(chars[i]);
        i += 1;
    }

    flush(&mut plain, &mut spans);
    spans
}

// ============================================================================
// Rendering
// ============================================================================

fn render_inline(text: &str) -> Element {
    let spans = parse_inline(text);
    rsx! {
        {spans.into_iter().map(render_span)}
    }
}

fn render_span(span: Span) -> Element {
    match span {
        Span::Text(text) => rsx! { "{text}" },
        Span::Bold(text) => rsx! {
            strong { "{text}" }
        },
        Span::Italic(text) => rsx! {
            em { "{text}" }
        },
        Span::Code(code) => rsx! {
            code { class: "inline-code", "{code}" }
        },
        Span::Link { label, url } => rsx! {
            a {
                href: "{url}",
                target: "_blank",
                rel: "noopener noreferrer",
                "{label}"
            }
        },
    }
}

fn render_block(block: Block) -> Element {
    match block {
        Block::Paragraph(text) => rsx! {
            p { class: "md-paragraph", {render_inline(&text)} }
        },
        Block::Heading(level, text) => {
            let class = match level {
                1 => "md-heading md-h1",
                2 => "md-heading md-h2",
                3 => "md-heading md-h3",
                _ => "md-heading md-h4",
            };
            rsx! {
                div { class: "{class}", {render_inline(&text)} }
            }
        }
        Block::Code { language, code } => rsx! {
            CodeBlock { language, code }
        },
        Block::Bullets(items) => rsx! {
            ul { class: "md-list",
                for item in items {
                    li { {render_inline(&item)} }
                }
            }
        },
        Block::Numbered(items) => rsx! {
            ol { class: "md-list",
                for item in items {
                    li { {render_inline(&item)} }
                }
            }
        },
        Block::Quote(text) => rsx! {
            blockquote { class: "md-quote", {render_inline(&text)} }
        },
        Block::Table { headers, rows } => rsx! {
            div { class: "md-table-wrap",
                table { class: "md-table",
                    thead {
                        tr {
                            for header in headers.iter() {
                                th { {render_inline(header)} }
                            }
                        }
                    }
                    tbody {
                        for row in rows.iter() {
                            tr {
                                for cell in row.iter() {
                                    td { {render_inline(cell)} }
                                }
                            }
                        }
                    }
                }
            }
        },
        Block::Rule => rsx! {
            hr { class: "md-rule" }
        },
    }
}

/// Fenced code with a one-click copy button
#[component]
fn CodeBlock(language: String, code: String) -> Element {
    let mut copied = use_signal(|| false);

    let code_for_copy = code.clone();
    let handle_copy = move |_| {
        // JSON-encode the snippet so it survives quoting inside the script
        match serde_json::to_string(&code_for_copy) {
            Ok(payload) => {
                let _ = document::eval(&format!("navigator.clipboard.writeText({payload});"));
                copied.set(true);
            }
            Err(e) => tracing::warn!("clipboard copy failed: {}", e),
        }
    };

    let label = if language.is_empty() {
        "code".to_string()
    } else {
        language.clone()
    };

    rsx! {
        div { class: "code-block",
            div { class: "code-header",
                span { class: "code-lang", "{label}" }
                button {
                    class: "code-copy",
                    onclick: handle_copy,
                    if copied() { "Copied" } else { "Copy" }
                }
            }
            pre {
                code { "{code}" }
            }
        }
    }
}

/// Markdown content renderer
#[component]
fn MarkdownContent(content: String) -> Element {
    let blocks = parse_blocks(&content);

    rsx! {
        div { class: "markdown-content",
            for block in blocks {
                {render_block(block)}
            }
        }
    }
}

#[component]
pub fn MessageBubble(message: ChatMessage) -> Element {
    match message.sender {
        // User messages stay literal, right-aligned
        Sender::User => rsx! {
            div { class: "message-row message-row-user",
                div { class: "message-user", "{message.content}" }
            }
        },
        Sender::Model => rsx! {
            div { class: "message-row",
                div { class: "model-avatar",
                    svg {
                        width: "12",
                        height: "12",
                        view_box: "0 0 24 24",
                        fill: "none",
                        stroke: "currentColor",
                        stroke_width: "2.5",
                        stroke_linecap: "round",
                        stroke_linejoin: "round",
                        path { d: "M21 15a2 2 0 0 1-2 2H7l-4 4V5a2 2 0 0 1 2-2h14a2 2 0 0 1 2 2z" }
                    }
                }
                div { class: "message-model",
                    MarkdownContent { content: message.content.clone() }
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_code_with_language() {
        let blocks = parse_blocks("before\n```rust\nfn main() {}\n```\nafter");
        assert_eq!(blocks.len(), 3);
        assert_eq!(
            blocks[1],
            Block::Code {
                language: "rust".to_string(),
                code: "fn main() {}".to_string(),
            }
        );
    }

    #[test]
    fn test_unclosed_fence_takes_the_rest() {
        let blocks = parse_blocks("```\nlet x = 1;\nlet y = 2;");
        assert_eq!(blocks.len(), 1);
        match &blocks[0] {
            Block::Code { code, .. } => assert_eq!(code, "let x = 1;\nlet y = 2;"),
            other => panic!("expected code block, got {other:?}"),
        }
    }

    #[test]
    fn test_bullet_and_numbered_lists() {
        let blocks = parse_blocks("- one\n- two\n\n1. first\n2. second");
        assert_eq!(
            blocks,
            vec![
                Block::Bullets(vec!["one".to_string(), "two".to_string()]),
                Block::Numbered(vec!["first".to_string(), "second".to_string()]),
            ]
        );
    }

    #[test]
    fn test_table_parsing() {
        let blocks = parse_blocks("| a | b |\n|---|---|\n| 1 | 2 |");
        assert_eq!(
            blocks,
            vec![Block::Table {
                headers: vec!["a".to_string(), "b".to_string()],
                rows: vec![vec!["1".to_string(), "2".to_string()]],
            }]
        );
    }

    #[test]
    fn test_pipe_lines_without_separator_stay_text() {
        let blocks = parse_blocks("|just|pipes|");
        assert_eq!(blocks, vec![Block::Paragraph("|just|pipes|".to_string())]);
    }

    #[test]
    fn test_heading_quote_rule() {
        let blocks = parse_blocks("## Title\n> quoted\n---");
        assert_eq!(
            blocks,
            vec![
                Block::Heading(2, "Title".to_string()),
                Block::Quote("quoted".to_string()),
                Block::Rule,
            ]
        );
    }

    #[test]
    fn test_inline_bold_and_code() {
        let spans = parse_inline("use **cargo** and `rustc` daily");
        assert_eq!(
            spans,
            vec![
                Span::Text("use ".to_string()),
                Span::Bold("cargo".to_string()),
                Span::Text(" and ".to_string()),
                Span::Code("rustc".to_string()),
                Span::Text(" daily".to_string()),
            ]
        );
    }

    #[test]
    fn test_inline_link() {
        let spans = parse_inline("see [the docs](https://example.com) here");
        assert!(spans.contains(&Span::Link {
            label: "the docs".to_string(),
            url: "https://example.com".to_string(),
        }));
    }

    #[test]
    fn test_unclosed_backtick_is_literal() {
        let spans = parse_inline("a `dangling backtick");
        assert_eq!(spans, vec![Span::Text("a `dangling backtick".to_string())]);
    }

    #[test]
    fn test_italic_rejects_stray_stars() {
        let spans = parse_inline("2 * 3 * 4");
        assert_eq!(spans, vec![Span::Text("2 * 3 * 4".to_string())]);
    }
}
