//! Typed host-domain contracts consumed by the dash favorites runtime.
//!
//! This crate is the boundary between the favorites/reconciliation core and the shell that hosts
//! it. It exposes the application catalog, folder-definition store, string-list settings store,
//! and transient feedback sink as object-safe traits, together with in-memory adapters used by
//! tests and headless embedding.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod catalog;
pub mod folders;
pub mod ids;
pub mod notifications;
pub mod storage;

pub use catalog::{AppCatalog, AppInfo, MemoryAppCatalog};
pub use folders::{FolderDefinition, FolderDefinitionStore, MemoryFolderStore};
pub use ids::EntityId;
pub use notifications::{
    FeedbackNotice, FeedbackPresenter, MemoryFeedbackPresenter, NoopFeedbackPresenter,
};
pub use storage::strv::{MemoryStrvSettings, NoopStrvSettings, StrvSettings};
