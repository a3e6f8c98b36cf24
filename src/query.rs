//! Filter query: the caller's terms normalized into one lowercase phrase.

/// Terms are joined with a single space and lowercased. The phrase is matched as one
/// contiguous substring, so `["alice", "brown"]` needs "alice brown" in that order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterQuery {
    phrase: Option<String>, // None = no terms, match everything
}

impl FilterQuery {
    pub fn match_all() -> Self {
        Self::default()
    }

    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms: Vec<String> = terms.into_iter().map(|t| t.as_ref().to_string()).collect();
        if terms.is_empty() {
            return Self::match_all();
        }
        Self { phrase: Some(terms.join(" ").to_lowercase()) }
    }

    pub fn is_match_all(&self) -> bool {
        self.phrase.is_none()
    }

    pub fn phrase(&self) -> Option<&str> {
        self.phrase.as_deref()
    }
}
