//! paddock-core - Core library for Paddock
//!
//! This crate contains the shared models, the remote catalog gateway,
//! local preference persistence, and the feed view-state coordinator
//! used by all Paddock front-ends.

pub mod api;
pub mod error;
pub mod feed;
pub mod media;
pub mod models;
pub mod prefs;

pub use error::{Error, Result};
pub use models::{CarDraft, CarEntry, CarId, LayoutMode, UserProfile};
