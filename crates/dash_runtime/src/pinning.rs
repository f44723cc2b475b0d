//! Undoable pin/unpin transactions layered over [`FavoritesStore`].

use dash_host::{EntityId, FeedbackNotice};

use crate::{
    favorites::{FavoritesError, FavoritesStore},
    model::DockPosition,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinKind {
    Pinned,
    Unpinned,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Compensating store operation offered by a feedback notice.
pub enum UndoAction {
    /// Undo a pin by removing the entity again.
    Unpin {
        /// Entity to unpin.
        id: EntityId,
    },
    /// Undo an unpin by reinserting at the exact index it was removed from.
    Repin {
        /// Entity to pin again.
        id: EntityId,
        /// Index captured before removal.
        position: usize,
    },
}

/// Record of a successful pin or unpin, alive while its feedback notice is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinTransaction {
    pub id: EntityId,
    pub kind: PinKind,
    /// Index the entity was inserted at (pin) or removed from (unpin).
    pub position: usize,
    pub message: String,
}

impl PinTransaction {
    pub fn undo_action(&self) -> UndoAction {
        match self.kind {
            PinKind::Pinned => UndoAction::Unpin {
                id: self.id.clone(),
            },
            PinKind::Unpinned => UndoAction::Repin {
                id: self.id.clone(),
                position: self.position,
            },
        }
    }

    pub fn notice(&self) -> FeedbackNotice {
        FeedbackNotice {
            message: self.message.clone(),
            undoable: true,
        }
    }

    /// Runs the compensating operation. No new transaction or notice results from an undo.
    ///
    /// # Errors
    ///
    /// Propagates persistence failures from the store.
    pub fn undo(&self, store: &mut FavoritesStore) -> Result<bool, FavoritesError> {
        match self.undo_action() {
            UndoAction::Unpin { id } => Ok(store.remove(&id)?.is_some()),
            UndoAction::Repin { id, position } => store.add(&id, DockPosition::At(position)),
        }
    }
}

/// Pins `id` and describes the change, or returns `None` when nothing was pinned.
///
/// # Errors
///
/// Propagates persistence failures from the store.
pub fn pin(
    store: &mut FavoritesStore,
    id: &EntityId,
    position: DockPosition,
) -> Result<Option<PinTransaction>, FavoritesError> {
    if !store.add(id, position)? {
        return Ok(None);
    }
    let (Some(index), Some(entity)) = (store.position_of(id), store.entity(id)) else {
        return Ok(None);
    };
    let name = store.display_name(entity);
    tracing::info!(favorite = %id, position = index, "pinned to dash");
    Ok(Some(PinTransaction {
        id: id.clone(),
        kind: PinKind::Pinned,
        position: index,
        message: store.config().pinned_text(&name),
    }))
}

/// Unpins `id` and describes the change, or returns `None` when it was not pinned.
///
/// # Errors
///
/// Propagates persistence failures from the store.
pub fn unpin(
    store: &mut FavoritesStore,
    id: &EntityId,
) -> Result<Option<PinTransaction>, FavoritesError> {
    let Some(name) = store.entity(id).map(|entity| store.display_name(entity)) else {
        return Ok(None);
    };
    let Some(position) = store.remove(id)? else {
        return Ok(None);
    };
    tracing::info!(favorite = %id, position, "unpinned from dash");
    Ok(Some(PinTransaction {
        id: id.clone(),
        kind: PinKind::Unpinned,
        position,
        message: store.config().unpinned_text(&name),
    }))
}
