//! Storage port: Trait for persisting assessment records.
//!
//! Scoring never depends on storage. The application layer hands finished
//! records to an `AssessmentStore` implementation.

use crate::domain::AssessmentRecord;

/// A page of records with pagination metadata.
#[derive(Debug, Clone)]
pub struct RecordPage {
    /// Records in this page, newest first
    pub items: Vec<AssessmentRecord>,
    /// Total count of stored records
    pub total_count: usize,
    /// Current page offset
    pub offset: usize,
    /// Page size limit
    pub limit: usize,
    /// Whether there are more pages
    pub has_more: bool,
}

impl RecordPage {
    #[must_use]
    pub fn new(items: Vec<AssessmentRecord>, total_count: usize, offset: usize, limit: usize) -> Self {
        let has_more = limit > 0 && offset.saturating_add(items.len()) < total_count;
        Self {
            items,
            total_count,
            offset,
            limit,
            has_more,
        }
    }

    /// Get the next page offset.
    #[must_use]
    pub fn next_offset(&self) -> Option<usize> {
        if self.has_more {
            Some(self.offset.saturating_add(self.limit))
        } else {
            None
        }
    }

    /// Get the previous page offset.
    #[must_use]
    pub fn prev_offset(&self) -> Option<usize> {
        if self.offset > 0 {
            Some(self.offset.saturating_sub(self.limit))
        } else {
            None
        }
    }
}

/// Persistence collaborator for scored assessments.
pub trait AssessmentStore: Send + Sync {
    /// Error type for storage operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Save a record.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn save(&self, record: &AssessmentRecord) -> Result<(), Self::Error>;

    /// Load a record by id.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn load(&self, id: &str) -> Result<Option<AssessmentRecord>, Self::Error>;

    /// Load the most recent records (up to `limit`).
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn load_recent(&self, limit: usize) -> Result<Vec<AssessmentRecord>, Self::Error>;

    /// Load records with offset pagination.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn load_page(&self, offset: usize, limit: usize) -> Result<RecordPage, Self::Error>;

    /// Total number of stored records.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn count(&self) -> Result<usize, Self::Error>;

    /// Delete a record by id.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn delete(&self, id: &str) -> Result<(), Self::Error>;

    /// Delete every record.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn clear_all(&self) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AssessmentKind, RiskLevel};

    fn record() -> AssessmentRecord {
        AssessmentRecord::new(AssessmentKind::Lab, RiskLevel::Low, Some(10), serde_json::Value::Null)
    }

    #[test]
    fn test_page_navigation() {
        let page = RecordPage::new(vec![record(), record()], 5, 2, 2);
        assert!(page.has_more);
        assert_eq!(page.next_offset(), Some(4));
        assert_eq!(page.prev_offset(), Some(0));

        let last = RecordPage::new(vec![record()], 5, 4, 2);
        assert!(!last.has_more);
        assert_eq!(last.next_offset(), None);

        let first = RecordPage::new(vec![], 0, 0, 10);
        assert_eq!(first.prev_offset(), None);
    }

    #[test]
    fn test_zero_limit_page_has_no_next() {
        let page = RecordPage::new(vec![], 3, 0, 0);
        assert!(!page.has_more);
        assert_eq!(page.next_offset(), None);
    }

    #[test]
    fn test_huge_offset_does_not_overflow() {
        let page = RecordPage::new(vec![record()], 1, usize::MAX, 10);
        assert!(!page.has_more);
        assert_eq!(page.next_offset(), None);
        assert_eq!(page.prev_offset(), Some(usize::MAX - 10));
    }
}
