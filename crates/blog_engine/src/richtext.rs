use std::fmt::Write;

use blog_logging::blog_debug;

use crate::{RichTextBlock, RichTextSpan};

pub trait RichTextRenderer: Send + Sync {
    /// Renders a single block to an HTML fragment.
    fn render_block(&self, block: &RichTextBlock) -> String;
}

/// Renders CMS rich-text blocks to HTML.
///
/// Spans are nested by containment; a span that straddles the end of an
/// enclosing span is split at that boundary. Text is escaped and line breaks
/// become `<br />`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlRichTextRenderer;

impl RichTextRenderer for HtmlRichTextRenderer {
    fn render_block(&self, block: &RichTextBlock) -> String {
        match block.kind.as_str() {
            "paragraph" => wrap("p", &render_text(block)),
            "preformatted" => wrap("pre", &render_text(block)),
            "heading1" | "heading2" | "heading3" | "heading4" | "heading5" | "heading6" => {
                let tag = format!("h{}", &block.kind["heading".len()..]);
                wrap(&tag, &render_text(block))
            }
            "list-item" => format!("<ul>{}</ul>", wrap("li", &render_text(block))),
            "o-list-item" => format!("<ol>{}</ol>", wrap("li", &render_text(block))),
            "image" => format!(
                "<p class=\"block-img\"><img src=\"{}\" alt=\"{}\" /></p>",
                escape_attr(block.url.as_deref().unwrap_or_default()),
                escape_attr(block.alt.as_deref().unwrap_or_default()),
            ),
            "embed" => render_embed(block),
            other => {
                blog_debug!("Skipping unsupported rich-text block type {other}");
                String::new()
            }
        }
    }
}

fn wrap(tag: &str, inner: &str) -> String {
    format!("<{tag}>{inner}</{tag}>")
}

fn render_embed(block: &RichTextBlock) -> String {
    let Some(embed) = block.oembed.as_ref() else {
        return String::new();
    };
    let mut out = String::from("<div");
    if let Some(url) = embed.embed_url.as_deref() {
        let _ = write!(out, " data-oembed=\"{}\"", escape_attr(url));
    }
    if let Some(kind) = embed.kind.as_deref() {
        let _ = write!(out, " data-oembed-type=\"{}\"", escape_attr(kind));
    }
    if let Some(provider) = embed.provider_name.as_deref() {
        let _ = write!(out, " data-oembed-provider=\"{}\"", escape_attr(provider));
    }
    out.push('>');
    // Provider HTML is trusted as delivered by the CMS.
    out.push_str(embed.html.as_deref().unwrap_or_default());
    out.push_str("</div>");
    out
}

#[derive(Debug, Clone, Copy)]
struct Mark<'a> {
    start: usize,
    end: usize,
    span: &'a RichTextSpan,
}

fn render_text(block: &RichTextBlock) -> String {
    let text = block.text.as_deref().unwrap_or_default();
    let offsets = Utf16Offsets::new(text);
    let marks = block
        .spans
        .iter()
        .map(|span| Mark {
            start: offsets.byte_index(span.start),
            end: offsets.byte_index(span.end),
            span,
        })
        .filter(|mark| mark.start < mark.end)
        .collect();
    let mut out = String::with_capacity(text.len());
    render_marks(text, 0, text.len(), marks, &mut out);
    out
}

/// Renders `text[from..to]`, wrapping the marks that fall inside it.
fn render_marks(text: &str, from: usize, to: usize, mut marks: Vec<Mark<'_>>, out: &mut String) {
    let mut cursor = from;
    loop {
        marks.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));
        if marks.is_empty() {
            break;
        }
        let mark = marks.remove(0);
        let mut children = Vec::new();
        let mut remainders = Vec::new();
        while marks.first().is_some_and(|next| next.start < mark.end) {
            let next = marks.remove(0);
            if next.end <= mark.end {
                children.push(next);
            } else {
                children.push(Mark {
                    end: mark.end,
                    ..next
                });
                remainders.push(Mark {
                    start: mark.end,
                    ..next
                });
            }
        }
        marks.extend(remainders);

        push_escaped(&text[cursor..mark.start], out);
        let (open, close) = span_tags(mark.span);
        out.push_str(&open);
        render_marks(text, mark.start, mark.end, children, out);
        out.push_str(close);
        cursor = mark.end;
    }
    push_escaped(&text[cursor..to], out);
}

fn span_tags(span: &RichTextSpan) -> (String, &'static str) {
    let data = span.data.as_ref();
    match span.kind.as_str() {
        "strong" => ("<strong>".to_string(), "</strong>"),
        "em" => ("<em>".to_string(), "</em>"),
        "hyperlink" => {
            let url = data.and_then(|d| d.url.as_deref()).unwrap_or_default();
            let mut open = format!("<a href=\"{}\"", escape_attr(url));
            if let Some(target) = data.and_then(|d| d.target.as_deref()) {
                let _ = write!(
                    open,
                    " target=\"{}\" rel=\"noopener noreferrer\"",
                    escape_attr(target)
                );
            }
            open.push('>');
            (open, "</a>")
        }
        "label" => {
            let label = data.and_then(|d| d.label.as_deref()).unwrap_or_default();
            (format!("<span class=\"{}\">", escape_attr(label)), "</span>")
        }
        _ => (String::new(), ""),
    }
}

fn push_escaped(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\n' => out.push_str("<br />"),
            _ => out.push(c),
        }
    }
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Maps UTF-16 offsets, as produced by the CMS editor, to byte indices.
struct Utf16Offsets {
    /// `(utf16_offset, byte_index)` at every char boundary, plus the end.
    boundaries: Vec<(usize, usize)>,
}

impl Utf16Offsets {
    fn new(text: &str) -> Self {
        let mut boundaries = Vec::with_capacity(text.len() + 1);
        let mut utf16 = 0;
        for (byte, c) in text.char_indices() {
            boundaries.push((utf16, byte));
            utf16 += c.len_utf16();
        }
        boundaries.push((utf16, text.len()));
        Self { boundaries }
    }

    /// Offsets inside a surrogate pair round down; offsets past the end clamp.
    fn byte_index(&self, utf16: usize) -> usize {
        match self.boundaries.binary_search_by_key(&utf16, |&(u, _)| u) {
            Ok(i) => self.boundaries[i].1,
            Err(0) => 0,
            Err(i) => self.boundaries[i - 1].1,
        }
    }
}
