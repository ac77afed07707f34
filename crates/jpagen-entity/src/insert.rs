//! Placement of generated members inside an existing class body.

use jpagen_syntax::{Node, ParseResult};

use crate::package::primary_class;

const FIELD_DECLARATION: &str = "field_declaration";

/// A pending text insertion at a byte offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    offset: usize,
    text: String,
}

impl Insertion {
    /// Returns the byte offset the text is inserted at.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the text to insert, including surrounding line breaks.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Applies the insertion to `source`.
    ///
    /// Returns `None` when the offset is not a character boundary of
    /// `source`, which means the insertion was planned against other text.
    #[must_use]
    pub fn apply(&self, source: &str) -> Option<String> {
        let head = source.get(..self.offset)?;
        let tail = source.get(self.offset..)?;
        Some(format!("{head}{}{tail}", self.text))
    }
}

/// Plans the insertion of a rendered field into the buffer's primary class.
///
/// The fragment goes after the last field declared directly in the class
/// body, separated by a blank line. A class without fields receives it at
/// the top of its body. Returns `None` when the buffer has no class body.
#[must_use]
pub fn plan_field_insertion(parsed: &ParseResult, fragment: &str) -> Option<Insertion> {
    let class = primary_class(parsed)?;
    let body = class.child_by_field_name("body")?;
    let trimmed = fragment.trim_end_matches('\n');

    if let Some(field) = last_field(body) {
        return Some(Insertion {
            offset: field.end_byte(),
            text: format!("\n\n{trimmed}"),
        });
    }

    let offset = body.start_byte().saturating_add(1);
    let followed_by_newline = parsed
        .source()
        .get(offset..)
        .is_some_and(|rest| rest.starts_with('\n') || rest.starts_with("\r\n"));
    let text = if followed_by_newline {
        format!("\n{trimmed}")
    } else {
        format!("\n{trimmed}\n")
    };
    Some(Insertion { offset, text })
}

fn last_field(body: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = body.walk();
    body.named_children(&mut cursor)
        .filter(|member| member.kind() == FIELD_DECLARATION)
        .last()
}
