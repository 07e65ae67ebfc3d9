// ABOUTME: Conversion between issue title/body and the plain text shown in the editor
// ABOUTME: The first line is the title, everything after it (trimmed) is the body

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueText {
    pub title: String,
    pub body: String,
}

impl IssueText {
    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

/// Split edited text into title and body
pub fn parse_text(input: &[u8]) -> IssueText {
    let decoded = String::from_utf8_lossy(input);
    let text: &str = &decoded;
    let (first, rest) = text.split_once('\n').unwrap_or((text, ""));

    IssueText {
        title: first.strip_suffix('\r').unwrap_or(first).to_string(),
        body: rest.trim().to_string(),
    }
}

/// Text the editor is seeded with when updating an existing issue
pub fn seed_text(title: &str, body: &str) -> String {
    format!("{}\n\n{}", title, body)
}
