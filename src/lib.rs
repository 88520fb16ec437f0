//! LifeFlow Client Core
//!
//! Client-side synchronization core for the LifeFlow productivity app:
//! task cards, habit streaks, card lists, and the life timeline.
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - collection: Ordered, id-keyed sequences and the reorder engine
//! - repository: Remote persistence abstractions and the HTTP implementation
//! - store: Optimistic client state exposed to the view layer

pub mod collection;
pub mod domain;
pub mod repository;
pub mod store;

pub use collection::{reorder, OrderedCollection};
pub use domain::{DomainError, DomainResult, Entity};
pub use repository::{ApiConfig, HttpRepository};
pub use store::{ClientStore, FetchOutcome, MutationQueue, TaskMutation, TimelineCursor};
