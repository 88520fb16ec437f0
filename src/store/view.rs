//! Render Boundary
//!
//! Read-only shapes handed to rendering collaborators. Views never mutate
//! collections; failure is an explicit state variant a supervisor can
//! match on to show a fallback, rather than exception-style control flow.

use serde::{Deserialize, Serialize};

/// What an interactive region has to render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "state", content = "value")]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_failed(&self) -> bool {
        matches!(self, LoadState::Failed(_))
    }

    /// The ready value, if any.
    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// Failure message, if any.
    pub fn failure(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// What the supervisor offers on top of a failed region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackAction {
    /// Reload the region's state from scratch
    Reset,
    /// Leave the broken region for the home view
    NavigateHome,
}

/// Actions a fallback view presents; fixed for every region.
pub const FALLBACK_ACTIONS: [FallbackAction; 2] =
    [FallbackAction::Reset, FallbackAction::NavigateHome];

/// The closed set of regions that can be empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyStateKind {
    Tasks,
    Lists,
    Timeline,
    Search,
}

/// Fixed copy for one empty region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyStatePreset {
    pub title: &'static str,
    pub hint: &'static str,
}

/// Preset copy per kind; exhaustive by construction.
pub fn empty_state_preset(kind: EmptyStateKind) -> EmptyStatePreset {
    match kind {
        EmptyStateKind::Tasks => EmptyStatePreset {
            title: "No tasks yet",
            hint: "Create your first task to get going",
        },
        EmptyStateKind::Lists => EmptyStatePreset {
            title: "No lists yet",
            hint: "Lists keep related tasks together",
        },
        EmptyStateKind::Timeline => EmptyStatePreset {
            title: "Nothing recorded yet",
            hint: "Capture a moment to start your timeline",
        },
        EmptyStateKind::Search => EmptyStatePreset {
            title: "No matches",
            hint: "Try a different search term",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_state_accessors() {
        let ready: LoadState<u32> = LoadState::Ready(7);
        assert_eq!(ready.ready(), Some(&7));
        assert!(!ready.is_failed());

        let failed: LoadState<u32> = LoadState::Failed("offline".to_string());
        assert!(failed.is_failed());
        assert_eq!(failed.failure(), Some("offline"));
        assert_eq!(failed.ready(), None);
    }

    #[test]
    fn test_fallback_offers_both_actions() {
        assert!(FALLBACK_ACTIONS.contains(&FallbackAction::Reset));
        assert!(FALLBACK_ACTIONS.contains(&FallbackAction::NavigateHome));
    }

    #[test]
    fn test_presets_have_copy() {
        for kind in [
            EmptyStateKind::Tasks,
            EmptyStateKind::Lists,
            EmptyStateKind::Timeline,
            EmptyStateKind::Search,
        ] {
            let preset = empty_state_preset(kind);
            assert!(!preset.title.is_empty());
            assert!(!preset.hint.is_empty());
        }
    }
}
