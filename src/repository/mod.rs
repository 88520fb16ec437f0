//! Repository Layer
//!
//! Remote persistence boundary: abstract traits, the HTTP implementation,
//! wire payloads, and client configuration.

mod config;
mod http;
mod traits;
mod types;

pub use config::{load_config, save_config, ApiConfig};
pub use http::HttpRepository;
pub use traits::{ListRepository, TaskRepository, TimelineRepository};
pub use types::{
    CheckinRequest, EntryCreate, EntryUpdate, ListCreate, ListUpdate, ReorderRequest, TaskCreate,
    TaskUpdate, TimelinePage,
};
