//! Reducer actions, side-effect intents, and transition logic for the dash runtime.

use dash_host::{EntityId, FeedbackNotice};
use thiserror::Error;

use crate::{
    favorites::{FavoritesError, FavoritesStore},
    menu::{self, EventPropagation, MenuAction},
    model::{DockPosition, DragSource, SurfaceKind, ViewId},
    pinning::{self, PinTransaction},
    reconcile::RenderReconciler,
};

/// Long-lived state mutated only by [`reduce_dash`].
pub struct DashState {
    pub store: FavoritesStore,
    pub surfaces: RenderReconciler,
    /// Transaction behind the feedback notice currently on screen.
    pub feedback: Option<PinTransaction>,
}

impl DashState {
    pub fn new(store: FavoritesStore, surfaces: RenderReconciler) -> Self {
        Self {
            store,
            surfaces,
            feedback: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_dash`] to mutate [`DashState`].
pub enum DashAction {
    /// Load favorites and render both surfaces for the first time.
    Initialize,
    /// The favorites list or the folder definitions changed in settings.
    SettingsChanged,
    /// Pin an entity at a dock position, with feedback.
    Pin {
        /// Entity to pin.
        id: EntityId,
        /// Insertion point.
        position: DockPosition,
    },
    /// Unpin an entity, with feedback.
    Unpin {
        /// Entity to unpin.
        id: EntityId,
    },
    /// Pin when unpinned (appending), unpin when pinned.
    TogglePin {
        /// Entity to toggle.
        id: EntityId,
    },
    /// The undo button of the current feedback notice was pressed.
    UndoFeedback,
    /// The current feedback notice was dismissed or timed out.
    DismissFeedback,
    /// Pointer button pressed on a view.
    ButtonPress {
        /// View under the pointer.
        view_id: ViewId,
        /// Pointer button number.
        button: u32,
    },
    /// Pointer button released on a view.
    ButtonRelease {
        /// View under the pointer.
        view_id: ViewId,
    },
    /// Pointer entered or left a view.
    HoverChanged {
        /// Hovered view.
        view_id: ViewId,
        /// Whether the pointer is now over the view.
        hovered: bool,
    },
    /// The single item of a view's open context menu was chosen.
    ActivateMenuItem {
        /// View owning the menu.
        view_id: ViewId,
    },
    /// A view's context menu was dismissed without choosing.
    DismissMenu {
        /// View owning the menu.
        view_id: ViewId,
    },
    /// The overview started hiding; every open menu closes.
    OverviewHiding,
    /// A folder view reported that its member applications changed.
    FolderAppsChanged {
        /// Folder view that changed.
        view_id: ViewId,
    },
    /// A drag entered the app grid.
    BeginDrag {
        /// What is being dragged.
        source: DragSource,
    },
    /// The drag over the grid ended.
    EndDrag,
    /// Detach folders from the dock ahead of dropping the runtime.
    Teardown,
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_dash`] for the host to execute.
pub enum RuntimeEffect {
    /// Redraw a surface from the reconciler's item list.
    Redisplay(SurfaceKind),
    /// Persist the grid's page layout.
    SaveGridPages(Vec<EntityId>),
    /// Show (or replace) the undoable feedback notice.
    ShowFeedback(FeedbackNotice),
    /// Hide the feedback notice.
    HideFeedback,
    /// Refresh the hover label of a dock slot.
    SyncDockLabel {
        /// Dock view whose slot label changed.
        view_id: ViewId,
        /// Label text.
        label: String,
    },
    /// Redraw the open popup of a folder.
    RedisplayFolderPopup(EntityId),
    /// The input event was consumed by the runtime.
    ClaimInput(ViewId),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for invalid actions or host storage failures.
pub enum ReducerError {
    /// The target view id is not live on either surface.
    #[error("view not found")]
    ViewNotFound,
    /// The favorites store could not read or write the settings backend.
    #[error(transparent)]
    Favorites(#[from] FavoritesError),
}

/// Applies a [`DashAction`] to the runtime state and collects resulting side effects.
///
/// Every action runs to completion; when it returns, the favorites list and both surfaces agree.
///
/// # Errors
///
/// Returns [`ReducerError::ViewNotFound`] when an action references a destroyed view, and
/// [`ReducerError::Favorites`] when settings storage fails.
pub fn reduce_dash(
    state: &mut DashState,
    action: DashAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DashAction::Initialize | DashAction::SettingsChanged => {
            state.store.reload()?;
            state.surfaces.update_all_names(&state.store);
            reconcile(state, &mut effects);
        }
        DashAction::Pin { id, position } => {
            let transaction = pinning::pin(&mut state.store, &id, position)?;
            record_transaction(state, transaction, &mut effects);
        }
        DashAction::Unpin { id } => {
            let transaction = pinning::unpin(&mut state.store, &id)?;
            record_transaction(state, transaction, &mut effects);
        }
        DashAction::TogglePin { id } => {
            let action = if state.store.is_favorite(&id) {
                DashAction::Unpin { id }
            } else {
                DashAction::Pin {
                    id,
                    position: DockPosition::Append,
                }
            };
            effects.extend(reduce_dash(state, action)?);
        }
        DashAction::UndoFeedback => {
            if let Some(transaction) = state.feedback.take() {
                effects.push(RuntimeEffect::HideFeedback);
                if transaction.undo(&mut state.store)? {
                    reconcile(state, &mut effects);
                }
            }
        }
        DashAction::DismissFeedback => {
            if state.feedback.take().is_some() {
                effects.push(RuntimeEffect::HideFeedback);
            }
        }
        DashAction::ButtonPress { view_id, button } => {
            let DashState {
                store, surfaces, ..
            } = state;
            let view = surfaces
                .view_mut(view_id)
                .ok_or(ReducerError::ViewNotFound)?;
            let is_favorite = store.contains_entity(&view.entity);
            if menu::handle_button_press(view, button, is_favorite, store.config())
                == EventPropagation::Stop
            {
                effects.push(RuntimeEffect::ClaimInput(view_id));
                if view.surface == SurfaceKind::Dock {
                    if let Some(label) = view.label() {
                        effects.push(RuntimeEffect::SyncDockLabel {
                            view_id,
                            label: label.to_string(),
                        });
                    }
                }
            }
        }
        DashAction::ButtonRelease { view_id } => {
            let view = state
                .surfaces
                .view_mut(view_id)
                .ok_or(ReducerError::ViewNotFound)?;
            if menu::handle_release(view) == EventPropagation::Stop {
                effects.push(RuntimeEffect::ClaimInput(view_id));
            }
        }
        DashAction::HoverChanged { view_id, hovered } => {
            let view = state
                .surfaces
                .view_mut(view_id)
                .ok_or(ReducerError::ViewNotFound)?;
            view.hovered = hovered;
        }
        DashAction::ActivateMenuItem { view_id } => {
            let view = state
                .surfaces
                .view_mut(view_id)
                .ok_or(ReducerError::ViewNotFound)?;
            let Some(choice) = view
                .menu
                .as_ref()
                .filter(|menu| menu.is_open())
                .map(|menu| menu.action())
            else {
                return Ok(effects);
            };
            let id = view.entity_id().clone();
            menu::close_menu(view);
            let action = match choice {
                MenuAction::Pin => DashAction::Pin {
                    id,
                    position: DockPosition::Append,
                },
                MenuAction::Unpin => DashAction::Unpin { id },
            };
            effects.extend(reduce_dash(state, action)?);
        }
        DashAction::DismissMenu { view_id } => {
            let view = state
                .surfaces
                .view_mut(view_id)
                .ok_or(ReducerError::ViewNotFound)?;
            menu::close_menu(view);
        }
        DashAction::OverviewHiding => {
            close_all_menus(&mut state.surfaces);
        }
        DashAction::FolderAppsChanged { view_id } => {
            let is_folder = state
                .surfaces
                .view(view_id)
                .ok_or(ReducerError::ViewNotFound)?
                .entity
                .is_folder();
            if is_folder {
                let dock_folder = state.surfaces.folder_apps_changed(view_id, &state.store);
                effects.push(RuntimeEffect::Redisplay(SurfaceKind::Grid));
                if let Some(folder) = dock_folder {
                    effects.push(RuntimeEffect::SaveGridPages(state.surfaces.grid_layout()));
                    effects.push(RuntimeEffect::RedisplayFolderPopup(folder));
                }
            }
        }
        DashAction::BeginDrag { source } => {
            if state.surfaces.ensure_placeholder(&source, &state.store) {
                effects.push(RuntimeEffect::Redisplay(SurfaceKind::Grid));
            }
        }
        DashAction::EndDrag => {
            if state.surfaces.clear_placeholder() {
                effects.push(RuntimeEffect::Redisplay(SurfaceKind::Grid));
            }
        }
        DashAction::Teardown => {
            close_all_menus(&mut state.surfaces);
            if state.feedback.take().is_some() {
                effects.push(RuntimeEffect::HideFeedback);
            }
            state.surfaces.teardown(&state.store);
            effects.push(RuntimeEffect::Redisplay(SurfaceKind::Grid));
            effects.push(RuntimeEffect::Redisplay(SurfaceKind::Dock));
        }
    }

    Ok(effects)
}

fn record_transaction(
    state: &mut DashState,
    transaction: Option<PinTransaction>,
    effects: &mut Vec<RuntimeEffect>,
) {
    let Some(transaction) = transaction else {
        return;
    };
    effects.push(RuntimeEffect::ShowFeedback(transaction.notice()));
    state.feedback = Some(transaction);
    reconcile(state, effects);
}

fn reconcile(state: &mut DashState, effects: &mut Vec<RuntimeEffect>) {
    state.surfaces.on_favorites_changed(&state.store);
    effects.push(RuntimeEffect::Redisplay(SurfaceKind::Grid));
    effects.push(RuntimeEffect::Redisplay(SurfaceKind::Dock));
}

fn close_all_menus(surfaces: &mut RenderReconciler) {
    for view in surfaces.views_mut() {
        menu::close_menu(view);
    }
}
