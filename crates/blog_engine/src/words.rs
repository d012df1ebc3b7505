use blog_core::WordCounter;
use scraper::{ElementRef, Html};

/// Elements whose boundaries separate words in rendered text.
const BREAKING_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "img", "li", "ol",
    "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

/// Counts words of the visible text only, ignoring tags and attributes.
///
/// Opt-in alternative to the raw whitespace count for fragments that carry
/// rendered markup. Inline elements join their text with the neighbours, so
/// `un<strong>believ</strong>able` is one word.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextWordCounter;

impl WordCounter for PlainTextWordCounter {
    fn count(&self, text: &str) -> u32 {
        let fragment = Html::parse_fragment(text);
        let mut plain = String::with_capacity(text.len());
        collect_text(fragment.root_element(), &mut plain);
        u32::try_from(plain.split_whitespace().count()).unwrap_or(u32::MAX)
    }
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child) = ElementRef::wrap(child) {
            let breaking = BREAKING_ELEMENTS.contains(&child.value().name());
            if breaking {
                out.push(' ');
            }
            collect_text(child, out);
            if breaking {
                out.push(' ');
            }
        }
    }
}
