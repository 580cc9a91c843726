//! Fixed-size, zero-based pagination for child listings.

use serde::{Deserialize, Serialize};

/// Number of nodes returned per listing page.
pub const PAGE_SIZE: u64 = 20;

/// A zero-based page index into a listing of fixed [`PAGE_SIZE`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageRequest {
    /// Page number (0-based).
    pub page: u64,
}

impl PageRequest {
    /// Create a request for the given page.
    pub fn new(page: u64) -> Self {
        Self { page }
    }

    /// Parse a caller-supplied page. Missing, negative, or non-numeric
    /// input falls back to page 0.
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        let page = raw
            .map(str::trim)
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(0);
        Self { page }
    }

    /// Calculate the SQL `OFFSET` value.
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(PAGE_SIZE)
    }

    /// Return the SQL `LIMIT` value.
    pub fn limit(&self) -> u64 {
        PAGE_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_uses_fixed_size() {
        assert_eq!(PageRequest::new(0).offset(), 0);
        assert_eq!(PageRequest::new(3).offset(), 60);
        assert_eq!(PageRequest::new(3).limit(), 20);
    }

    #[test]
    fn test_parse_lenient_defaults_to_zero() {
        assert_eq!(PageRequest::parse_lenient(None).page, 0);
        assert_eq!(PageRequest::parse_lenient(Some("abc")).page, 0);
        assert_eq!(PageRequest::parse_lenient(Some("-1")).page, 0);
        assert_eq!(PageRequest::parse_lenient(Some("2")).page, 2);
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        assert_eq!(PageRequest::new(u64::MAX).offset(), u64::MAX);
    }
}
