//! Task Card Entity
//!
//! A task card is the central work item: plain todo or habit, optionally
//! filed under a card list.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult, Entity};

/// A task or habit card
///
/// Position within a board is the card's index in its `OrderedCollection`,
/// not a stored field; the persisted order travels as a batch-reorder call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskCard {
    /// Server-assigned unique identifier
    pub id: String,
    /// Card title (non-empty after trimming)
    pub title: String,
    /// Markdown body
    #[serde(default)]
    pub content: String,
    /// Owning card list (None = uncategorized)
    pub list_id: Option<String>,
    /// Habit cards track daily check-ins and streaks
    #[serde(default)]
    pub is_habit: bool,
    pub reminder_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub longest_streak: u32,
    /// Calendar date of the most recent check-in, in the user's timezone
    pub last_checkin_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker; deleted cards stay in the remote store
    #[serde(default)]
    pub is_deleted: bool,
}

impl TaskCard {
    /// Validate and normalize a card title: trimmed, non-empty.
    pub fn validate_title(title: &str) -> DomainResult<String> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidInput(
                "Title cannot be empty or whitespace only".to_string(),
            ));
        }
        Ok(trimmed.to_string())
    }

    /// Apply a partial update in place.
    ///
    /// `clear_reminder` takes precedence over a new `reminder_time`.
    pub fn apply_patch(&mut self, patch: &TaskPatch, now: DateTime<Utc>) -> DomainResult<()> {
        if let Some(title) = &patch.title {
            self.title = Self::validate_title(title)?;
        }
        if let Some(content) = &patch.content {
            self.content = content.clone();
        }
        if let Some(is_habit) = patch.is_habit {
            self.is_habit = is_habit;
        }
        if patch.clear_reminder {
            self.reminder_time = None;
        } else if let Some(reminder) = patch.reminder_time {
            self.reminder_time = Some(reminder);
        }
        self.updated_at = now;
        Ok(())
    }
}

impl Entity for TaskCard {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}

/// Partial update for a task card
///
/// `None` fields are left untouched. Moving a card between lists is a
/// separate mutation, not part of the patch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_habit: Option<bool>,
    pub reminder_time: Option<DateTime<Utc>>,
    /// Set to drop the reminder; wins over `reminder_time`
    #[serde(default)]
    pub clear_reminder: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(title: &str) -> TaskCard {
        let now = Utc::now();
        TaskCard {
            id: "t-1".to_string(),
            title: title.to_string(),
            content: String::new(),
            list_id: None,
            is_habit: false,
            reminder_time: None,
            current_streak: 0,
            longest_streak: 0,
            last_checkin_date: None,
            created_at: now,
            updated_at: now,
            is_deleted: false,
        }
    }

    #[test]
    fn test_title_validation() {
        assert_eq!(TaskCard::validate_title("  Water plants  ").unwrap(), "Water plants");
        assert!(TaskCard::validate_title("   ").is_err());
        assert!(TaskCard::validate_title("").is_err());
    }

    #[test]
    fn test_patch_updates_fields() {
        let mut c = card("Original");
        let patch = TaskPatch {
            title: Some("Renamed".to_string()),
            content: Some("notes".to_string()),
            ..Default::default()
        };
        c.apply_patch(&patch, Utc::now()).unwrap();
        assert_eq!(c.title, "Renamed");
        assert_eq!(c.content, "notes");
    }

    #[test]
    fn test_clear_reminder_wins() {
        let mut c = card("Habit");
        c.reminder_time = Some(Utc::now());
        let patch = TaskPatch {
            reminder_time: Some(Utc::now()),
            clear_reminder: true,
            ..Default::default()
        };
        c.apply_patch(&patch, Utc::now()).unwrap();
        assert!(c.reminder_time.is_none());
    }

    #[test]
    fn test_patch_rejects_blank_title() {
        let mut c = card("Keep me");
        let patch = TaskPatch {
            title: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(c.apply_patch(&patch, Utc::now()).is_err());
        assert_eq!(c.title, "Keep me");
    }
}
