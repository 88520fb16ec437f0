//! Card List Entity
//!
//! A user-defined grouping that task cards may optionally reference.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult, Entity};

/// Maximum length for a list name, matching the remote schema.
pub const MAX_NAME_LEN: usize = 100;

/// Default list color assigned by the server when none is given.
pub const DEFAULT_COLOR: &str = "#3B82F6";

/// A named, colored grouping for task cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardList {
    pub id: String,
    /// Non-empty trimmed name, at most [`MAX_NAME_LEN`] chars
    pub name: String,
    /// Display color as `#RRGGBB`
    pub color: String,
    /// Persisted display order; only needs to agree with the in-memory
    /// position after a successful round-trip
    #[serde(default)]
    pub sort_order: u32,
    pub created_at: DateTime<Utc>,
}

impl CardList {
    /// Validate and normalize a list name: trimmed, non-empty, capped.
    pub fn validate_name(name: &str) -> DomainResult<String> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidInput(
                "List name cannot be empty or whitespace only".to_string(),
            ));
        }
        if trimmed.chars().count() > MAX_NAME_LEN {
            return Err(DomainError::InvalidInput(format!(
                "List name cannot exceed {} characters",
                MAX_NAME_LEN
            )));
        }
        Ok(trimmed.to_string())
    }

    /// Validate a `#RRGGBB` color code.
    pub fn validate_color(color: &str) -> DomainResult<()> {
        static COLOR_RE: OnceLock<Regex> = OnceLock::new();
        let re = COLOR_RE.get_or_init(|| {
            Regex::new("^#[0-9A-Fa-f]{6}$").expect("color pattern is valid")
        });
        if re.is_match(color) {
            Ok(())
        } else {
            Err(DomainError::InvalidInput(format!(
                "Color must be a 6-digit hex code, got '{}'",
                color
            )))
        }
    }
}

impl Entity for CardList {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_validation() {
        assert_eq!(CardList::validate_name(" Work ").unwrap(), "Work");
        assert!(CardList::validate_name("").is_err());
        assert!(CardList::validate_name("   ").is_err());
        assert!(CardList::validate_name(&"x".repeat(101)).is_err());
        assert!(CardList::validate_name(&"x".repeat(100)).is_ok());
    }

    #[test]
    fn test_color_validation() {
        assert!(CardList::validate_color(DEFAULT_COLOR).is_ok());
        assert!(CardList::validate_color("#abcdef").is_ok());
        assert!(CardList::validate_color("#ABC").is_err());
        assert!(CardList::validate_color("3B82F6").is_err());
        assert!(CardList::validate_color("#3B82G6").is_err());
    }
}
