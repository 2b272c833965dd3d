//! Tokenizer for expression templates.
//!
//! A template is literal SQL text interleaved with positional placeholders:
//!
//! ```text
//! COALESCE({0}, {1})     -- two placeholders
//! {0} LIKE '%' || {1}    -- literal runs between placeholders
//! json_object('k', {{}}) -- `{{` and `}}` are escaped braces
//! ```
//!
//! Placeholder bodies are decimal indexes, optionally padded with ASCII whitespace.
//! Signs, empty bodies and unterminated `{` are parse errors. A lone `}` is literal text.
//!
//! The iterator is fused after the first error.

use xlate_result::{Error, Result};

/// One lexical unit of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateToken<'a> {
    /// Literal text. An escaped brace is yielded as its own one-character literal.
    Literal(&'a str),
    /// A `{index}` marker; `text` is the raw body between the braces.
    Placeholder { index: usize, text: &'a str },
}

/// Left-to-right token stream over a template string.
#[derive(Debug, Clone)]
pub struct TemplateTokens<'a> {
    template: &'a str,
    pos: usize,
}

impl<'a> TemplateTokens<'a> {
    pub fn new(template: &'a str) -> Self {
        Self { template, pos: 0 }
    }

    fn fail(&mut self, text: &str) -> Option<Result<TemplateToken<'a>>> {
        self.pos = self.template.len();
        Some(Err(Error::PlaceholderParse {
            template: self.template.to_string(),
            text: text.to_string(),
        }))
    }
}

impl<'a> Iterator for TemplateTokens<'a> {
    type Item = Result<TemplateToken<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        let template = self.template;
        let rest = &template[self.pos..];
        let bytes = rest.as_bytes();
        match *bytes.first()? {
            b'{' if bytes.get(1) == Some(&b'{') => {
                self.pos += 2;
                Some(Ok(TemplateToken::Literal(&rest[..1])))
            }
            b'}' if bytes.get(1) == Some(&b'}') => {
                self.pos += 2;
                Some(Ok(TemplateToken::Literal(&rest[..1])))
            }
            b'{' => {
                let Some(close) = rest[1..].find('}') else {
                    return self.fail(&rest[1..]);
                };
                let text = &rest[1..1 + close];
                match parse_index(text) {
                    Some(index) => {
                        self.pos += close + 2;
                        Some(Ok(TemplateToken::Placeholder { index, text }))
                    }
                    None => self.fail(text),
                }
            }
            _ => {
                // Braces are ASCII, so every split below lands on a char boundary.
                let mut end = 1;
                while end < bytes.len() {
                    match bytes[end] {
                        b'{' => break,
                        b'}' if bytes.get(end + 1) == Some(&b'}') => break,
                        _ => end += 1,
                    }
                }
                self.pos += end;
                Some(Ok(TemplateToken::Literal(&rest[..end])))
            }
        }
    }
}

impl std::iter::FusedIterator for TemplateTokens<'_> {}

fn parse_index(text: &str) -> Option<usize> {
    let body = text.trim_matches(|c: char| c.is_ascii_whitespace());
    if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    body.parse().ok()
}

/// Tokenize `template` and return every placeholder index in scan order, duplicates
/// included.
pub fn placeholder_indices(template: &str) -> Result<Vec<usize>> {
    let mut indices = Vec::new();
    for token in TemplateTokens::new(template) {
        if let TemplateToken::Placeholder { index, .. } = token? {
            indices.push(index);
        }
    }
    Ok(indices)
}
