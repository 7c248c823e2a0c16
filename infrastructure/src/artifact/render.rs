//! Markdown renderings of a finished document

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd, html};

fn parser(markdown: &str) -> Parser<'_> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    Parser::new_ext(markdown, options)
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Standalone HTML page for `markdown`.
pub fn markdown_to_html(title: &str, markdown: &str) -> String {
    let mut body = String::new();
    html::push_html(&mut body, parser(markdown));
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape(title),
        body
    )
}

/// Plain text with markup stripped; blocks are separated by blank lines.
pub fn markdown_to_text(markdown: &str) -> String {
    let mut out = String::new();
    for event in parser(markdown) {
        match event {
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak | Event::HardBreak => out.push('\n'),
            Event::Start(Tag::Item) => out.push_str("- "),
            Event::End(TagEnd::Item) => out.push('\n'),
            Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::CodeBlock) => {
                out.push_str("\n\n")
            }
            Event::End(TagEnd::List(_)) => out.push('\n'),
            _ => {}
        }
    }
    let trimmed = out.trim_end();
    format!("{}\n", trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_contains_headings() {
        let html = markdown_to_html("My <Game>", "# Title\n\n## Overview\n\nText");
        assert!(html.contains("<title>My &lt;Game&gt;</title>"));
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<h2>Overview</h2>"));
        assert!(html.contains("<p>Text</p>"));
    }

    #[test]
    fn test_text_strips_markup() {
        let text = markdown_to_text("# Title\n\n## Overview\n\nSome **bold** text\n\n- one\n- two\n");
        assert!(text.starts_with("Title\n\nOverview\n\nSome bold text\n\n"));
        assert!(text.contains("- one\n"));
        assert!(text.contains("- two\n"));
        assert!(!text.contains('#'));
        assert!(!text.contains("**"));
    }
}
