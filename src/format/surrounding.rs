//! Text around the insertion point, and the result of formatting

/// Snapshot of the text adjacent to the cursor.
///
/// Queried fresh before every formatting operation; the document can change
/// between utterances so a snapshot is never reused across insertions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurroundingText {
    pub text_before: Option<String>,
    pub text_after: Option<String>,
}

impl SurroundingText {
    pub fn new(text_before: impl Into<String>, text_after: impl Into<String>) -> Self {
        Self {
            text_before: Some(text_before.into()),
            text_after: Some(text_after.into()),
        }
    }

    /// Character immediately left of the cursor
    pub fn char_before(&self) -> Option<char> {
        self.text_before.as_deref().and_then(|t| t.chars().last())
    }

    /// Character immediately right of the cursor
    pub fn char_after(&self) -> Option<char> {
        self.text_after.as_deref().and_then(|t| t.chars().next())
    }
}

/// Last character before the cursor, if there is context at all
pub fn char_before(surrounding: Option<&SurroundingText>) -> Option<char> {
    surrounding.and_then(SurroundingText::char_before)
}

/// First character after the cursor, if there is context at all
pub fn char_after(surrounding: Option<&SurroundingText>) -> Option<char> {
    surrounding.and_then(SurroundingText::char_after)
}

/// Text to type, split at the point where the cursor should end up.
///
/// `insert` goes in first, then `text_after`; the cursor is then moved back
/// over `text_after` so it rests between the two.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplexInsert {
    pub insert: String,
    pub text_after: String,
}

impl ComplexInsert {
    pub fn new(insert: impl Into<String>, text_after: impl Into<String>) -> Self {
        Self {
            insert: insert.into(),
            text_after: text_after.into(),
        }
    }

    pub fn plain(insert: impl Into<String>) -> Self {
        Self::new(insert, String::new())
    }

    /// Both halves joined, as the document will read after insertion
    pub fn rendered(&self) -> String {
        format!("{}{}", self.insert, self.text_after)
    }

    pub fn is_empty(&self) -> bool {
        self.insert.is_empty() && self.text_after.is_empty()
    }
}
