//! Markdown rendering with sanitization and syntax highlighting

use anyhow::Result;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

/// Rendered output for a post with no body
const NO_CONTENT_PLACEHOLDER: &str = "<p>No content</p>";

/// Markdown renderer.
///
/// Dialect: tables, strikethrough, task lists and the GFM extensions.
/// Raw HTML in the source is escaped to text, never emitted as markup,
/// so author-supplied HTML cannot execute as script.
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: "InspiredGitHub".to_string(),
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> Result<String> {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        // Some(lang) while inside a fenced/indented code block
        let mut code_block: Option<Option<String>> = None;
        let mut code_buf = String::new();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                    code_block = Some(lang);
                    code_buf.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some(lang) = code_block.take() {
                        let highlighted = self.highlight_code(&code_buf, lang.as_deref());
                        events.push(Event::Html(CowStr::from(highlighted)));
                    }
                }
                Event::Text(text) if code_block.is_some() => {
                    code_buf.push_str(&text);
                }
                // Sanitization: demote raw HTML to text so it is escaped
                // on output.
                Event::Html(raw) => events.push(Event::Text(raw)),
                Event::InlineHtml(raw) => events.push(Event::Text(raw)),
                other => events.push(other),
            }
        }

        let mut out = String::new();
        html::push_html(&mut out, events.into_iter());
        Ok(out)
    }

    /// Render a possibly-absent body. Empty input produces a defined
    /// placeholder, never empty output.
    pub fn render_or_placeholder(&self, markdown: Option<&str>) -> Result<String> {
        match markdown {
            Some(body) if !body.trim().is_empty() => self.render(body),
            _ => Ok(NO_CONTENT_PLACEHOLDER.to_string()),
        }
    }

    /// Highlight a fenced code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        if let Some(theme) = self.theme_set.themes.get(&self.theme_name) {
            if let Ok(highlighted) =
                highlighted_html_for_string(code, &self.syntax_set, syntax, theme)
            {
                return format!(
                    r#"<div class="highlight language-{}">{}</div>"#,
                    lang, highlighted
                );
            }
        }

        format!(
            r#"<pre><code class="language-{}">{}</code></pre>"#,
            lang,
            html_escape(code)
        )
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello\n\nA paragraph.").unwrap();
        assert!(html.contains("<h1>Hello</h1>"));
        assert!(html.contains("<p>A paragraph.</p>"));
    }

    #[test]
    fn test_render_table() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render("| a | b |\n|---|---|\n| 1 | 2 |\n")
            .unwrap();
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn test_render_strikethrough() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("~~gone~~").unwrap();
        assert!(html.contains("<del>gone</del>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render("before\n\n<script>alert('x')</script>\n\nafter")
            .unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_inline_html_is_escaped() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("click <b onclick=\"x()\">here</b>").unwrap();
        assert!(!html.contains("<b onclick"));
        assert!(html.contains("&lt;b"));
    }

    #[test]
    fn test_no_content_placeholder() {
        let renderer = MarkdownRenderer::new();
        assert_eq!(
            renderer.render_or_placeholder(None).unwrap(),
            "<p>No content</p>"
        );
        assert_eq!(
            renderer.render_or_placeholder(Some("   ")).unwrap(),
            "<p>No content</p>"
        );
        assert!(renderer
            .render_or_placeholder(Some("text"))
            .unwrap()
            .contains("<p>text</p>"));
    }

    #[test]
    fn test_code_block_is_wrapped() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```").unwrap();
        assert!(html.contains("language-rust"));
        assert!(!html.contains("fn main() {}</p>"));
    }
}
