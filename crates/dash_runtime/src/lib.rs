//! Favorites registry and dual-surface render reconciliation for pinning app folders to the dash.
//!
//! The runtime merges pinned applications and pinned app folders into one ordered favorites list,
//! keeps exactly one live view per entity on the app grid and on the dock, and drives folder
//! context menus and undoable pin feedback. Host services are injected through
//! [`host::DashHostContext`]; every transition goes through [`reducer::reduce_dash`].

pub mod config;
pub mod favorites;
pub mod host;
pub mod labels;
pub mod menu;
pub mod model;
pub mod pinning;
pub mod proxy;
pub mod reconcile;
pub mod reducer;
pub mod runtime;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{ConfigError, DashConfig};
pub use favorites::{FavoritesError, FavoritesStore};
pub use host::{DashHostContext, NoopSurfaceHost, RecordingSurfaceHost, SurfaceCall, SurfaceHost};
pub use menu::{EventPropagation, FolderMenu, MenuAction, MenuState, SECONDARY_BUTTON};
pub use model::*;
pub use pinning::{PinKind, PinTransaction, UndoAction};
pub use proxy::FolderProxyRegistry;
pub use reconcile::RenderReconciler;
pub use reducer::{reduce_dash, DashAction, DashState, ReducerError, RuntimeEffect};
pub use runtime::DashRuntime;
