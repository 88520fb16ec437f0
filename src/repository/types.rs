//! Wire Payloads
//!
//! Request and response bodies exchanged with the remote persistence API.
//! The server owns the schema; these mirror it field for field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::LifeEntry;

/// Create a task card
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskCreate {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_id: Option<String>,
    #[serde(default)]
    pub is_habit: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_time: Option<DateTime<Utc>>,
}

/// Partial task update; absent fields are left untouched by the server.
///
/// `clear_reminder` and `clear_list` are explicit sentinels: an absent
/// `Option` already means "no change", so clearing needs its own flag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_habit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub clear_reminder: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub clear_list: bool,
}

/// Check in on a habit task
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckinRequest {
    /// Minutes west of UTC (300 = UTC-5, -480 = UTC+8)
    #[serde(default)]
    pub timezone_offset: i32,
}

/// Persist a board order as the full ordered id list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderRequest {
    pub ordered_ids: Vec<String>,
}

/// Create a card list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListCreate {
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub sort_order: u32,
}

/// Partial card list update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<u32>,
}

/// Create a life entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryCreate {
    pub content: String,
}

/// Update a life entry's content
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// One page of the timeline
///
/// `next_cursor` is an opaque continuation token; `None` means the
/// timeline is exhausted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelinePage {
    pub items: Vec<LifeEntry>,
    pub next_cursor: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_update_omits_unset_fields() {
        let update = TaskUpdate {
            title: Some("Renamed".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({ "title": "Renamed" }));
    }

    #[test]
    fn test_task_update_serializes_sentinels() {
        let update = TaskUpdate {
            clear_reminder: true,
            clear_list: true,
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "clear_reminder": true, "clear_list": true })
        );
    }

    #[test]
    fn test_timeline_page_null_cursor() {
        let page: TimelinePage =
            serde_json::from_str(r#"{ "items": [], "next_cursor": null }"#).unwrap();
        assert!(page.items.is_empty());
        assert!(page.next_cursor.is_none());
    }
}
