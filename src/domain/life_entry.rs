//! Life Entry Entity
//!
//! One moment on the append-only life timeline, retrieved in pages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult, Entity};

/// A timeline entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeEntry {
    pub id: String,
    /// Non-empty trimmed text
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub is_deleted: bool,
}

impl LifeEntry {
    /// Validate and normalize entry content: trimmed, non-empty.
    pub fn validate_content(content: &str) -> DomainResult<String> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidInput(
                "Content cannot be empty or whitespace only".to_string(),
            ));
        }
        Ok(trimmed.to_string())
    }
}

impl Entity for LifeEntry {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_validation() {
        assert_eq!(LifeEntry::validate_content(" had coffee ").unwrap(), "had coffee");
        assert!(LifeEntry::validate_content("\n\t ").is_err());
    }
}
