//! Host document handling.
//!
//! # Responsibilities
//! - Hold the HTML page the application root mounts into
//! - Locate elements by `id` attribute
//! - Produce the page with root markup and head markup inserted
//!
//! # Design Decisions
//! - No DOM: the page is scanned for the opening tag carrying the id
//! - The template is never mutated; every render produces a new page

use std::fs;
use std::path::Path;

/// Page served when no custom host document is configured.
pub const BUILTIN_INDEX: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width,initial-scale=1.0">
<title>Pattern Explorer</title>
</head>
<body>
<noscript>This application needs JavaScript enabled.</noscript>
<div id="app"></div>
</body>
</html>
"#;

/// The hosting HTML document.
#[derive(Debug, Clone)]
pub struct Document {
    html: String,
}

impl Document {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    pub fn builtin() -> Self {
        Self::new(BUILTIN_INDEX)
    }

    pub fn load(path: &Path) -> std::io::Result<Self> {
        Ok(Self::new(fs::read_to_string(path)?))
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn has_element(&self, id: &str) -> bool {
        self.content_start(id).is_some()
    }

    /// Page with `content` placed at the start of element `id` and `head`
    /// placed before `</head>`. `None` when the element does not exist.
    pub fn render_into(&self, id: &str, content: &str, head: &str) -> Option<String> {
        let content_at = self.content_start(id)?;
        let head_at = self.html.find("</head>").filter(|at| *at < content_at);

        let mut page = String::with_capacity(self.html.len() + content.len() + head.len());
        match head_at {
            Some(head_at) => {
                page.push_str(&self.html[..head_at]);
                page.push_str(head);
                page.push_str(&self.html[head_at..content_at]);
            }
            None => page.push_str(&self.html[..content_at]),
        }
        page.push_str(content);
        page.push_str(&self.html[content_at..]);
        Some(page)
    }

    /// Byte offset just past the opening tag of element `id`.
    fn content_start(&self, id: &str) -> Option<usize> {
        for quote in ['"', '\''] {
            let needle = format!("id={quote}{id}{quote}");
            let mut from = 0;
            while let Some(found) = self.html[from..].find(&needle) {
                let at = from + found;
                let preceded_by_space = self.html[..at].ends_with(char::is_whitespace);
                if preceded_by_space && self.inside_tag(at) {
                    if let Some(close) = self.html[at..].find('>') {
                        return Some(at + close + 1);
                    }
                }
                from = at + needle.len();
            }
        }
        None
    }

    fn inside_tag(&self, at: usize) -> bool {
        let before = &self.html[..at];
        match (before.rfind('<'), before.rfind('>')) {
            (Some(open), Some(close)) => open > close,
            (Some(_), None) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_app_element() {
        let doc = Document::builtin();
        assert!(doc.has_element("app"));
        assert!(!doc.has_element("root"));
    }

    #[test]
    fn test_id_must_be_an_attribute() {
        let doc = Document::new("<p>use id=\"app\" on the div</p><div data-id=\"app\"></div>");
        assert!(!doc.has_element("app"));

        let doc = Document::new("<main class=x id='app'>old</main>");
        assert!(doc.has_element("app"));
    }

    #[test]
    fn test_render_into() {
        let doc = Document::new("<html><head><title>t</title></head><body><div id=\"app\"></div></body></html>");
        let page = doc.render_into("app", "<b>hi</b>", "<link>").unwrap();
        assert_eq!(
            page,
            "<html><head><title>t</title><link></head><body><div id=\"app\"><b>hi</b></div></body></html>"
        );
        assert!(doc.render_into("missing", "", "").is_none());
    }
}
