use chrono::{DateTime, Utc};
use serde::Serialize;

/// A stored paste together with its tag names in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paste {
    pub id: i64,
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub last_used_at: DateTime<Utc>,
    pub tags: Vec<String>,
}

impl Paste {
    /// Images are stored inline as data URLs.
    pub fn is_image(&self) -> bool {
        self.value.starts_with("data:image/")
    }
}

/// Content and ordered tag list for a create or update.
#[derive(Debug, Clone, Default)]
pub struct NewPaste {
    pub value: String,
    pub tags: Vec<String>,
}

impl NewPaste {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            tags: Vec::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Default)]
pub struct SearchQuery {
    pub text: String,
    pub limit: Option<i64>,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            limit: None,
        }
    }

    /// SQLite treats a negative LIMIT as unbounded.
    pub fn effective_limit(&self) -> i64 {
        match self.limit {
            Some(limit) if limit > 0 => limit,
            _ => -1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_paste_with_tags() {
        let paste = NewPaste::new("hello").with_tags(["a", "b"]);
        assert_eq!(paste.value, "hello");
        assert_eq!(paste.tags, vec!["a", "b"]);
    }

    #[test]
    fn test_effective_limit() {
        assert_eq!(SearchQuery::new("x").effective_limit(), -1);
        let limited = SearchQuery {
            limit: Some(5),
            ..SearchQuery::new("x")
        };
        assert_eq!(limited.effective_limit(), 5);
        let zero = SearchQuery {
            limit: Some(0),
            ..SearchQuery::new("x")
        };
        assert_eq!(zero.effective_limit(), -1);
    }

    #[test]
    fn test_is_image() {
        let now = Utc::now();
        let mut paste = Paste {
            id: 1,
            value: "data:image/png;base64,iVBORw0KGgo=".to_string(),
            created_at: now,
            last_used_at: now,
            tags: Vec::new(),
        };
        assert!(paste.is_image());
        paste.value = "plain text".to_string();
        assert!(!paste.is_image());
    }
}
