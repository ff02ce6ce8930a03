//! Data models for Paddock

mod car;
mod profile;

pub use car::{CarDraft, CarEntry, CarId, DeleteReceipt};
pub use profile::{LayoutMode, UserProfile};
