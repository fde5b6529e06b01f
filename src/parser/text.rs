use scraper::{Html, Node};

/// Tags whose text content is never shown.
const HIDDEN_TAGS: &[&str] = &["script", "style"];

/// Visible text of a report, one trimmed non-empty line per entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSequence {
    lines: Vec<String>,
}

impl LineSequence {
    pub fn from_text(raw: &str) -> Self {
        let lines = raw
            .split('\n')
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        LineSequence { lines }
    }

    /// Concatenate every visible text node of the document, then split into lines.
    pub fn from_html(html: &str) -> Self {
        let doc = Html::parse_document(html);
        let mut raw = String::with_capacity(html.len() / 2);
        for node in doc.tree.root().descendants() {
            let Some(text) = node.value().as_text() else {
                continue;
            };
            let hidden = node.ancestors().any(|a| match a.value() {
                Node::Element(el) => HIDDEN_TAGS.contains(&el.name()),
                _ => false,
            });
            if !hidden {
                raw.push_str(text);
            }
        }
        Self::from_text(&raw)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.lines.get(idx).map(String::as_str)
    }

    /// Index of the first line equal to `line`.
    pub fn position(&self, line: &str) -> Option<usize> {
        self.lines.iter().position(|l| l == line)
    }

    /// Index and text of the first line satisfying `f`.
    pub fn find<F>(&self, f: F) -> Option<(usize, &str)>
    where
        F: Fn(&str) -> bool,
    {
        self.lines
            .iter()
            .enumerate()
            .find(|(_, l)| f(l.as_str()))
            .map(|(i, l)| (i, l.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
}
