//! Long-lived runtime container: owns [`DashState`], dispatches actions through
//! [`reduce_dash`], and drains emitted effects into the host in order.

use std::rc::Rc;

use dash_host::EntityId;

use crate::{
    config::DashConfig,
    favorites::FavoritesStore,
    host::DashHostContext,
    menu::{self, EventPropagation},
    model::{DockPosition, ViewId},
    proxy::FolderProxyRegistry,
    reconcile::RenderReconciler,
    reducer::{reduce_dash, DashAction, DashState, ReducerError, RuntimeEffect},
};

pub struct DashRuntime {
    host: DashHostContext,
    state: DashState,
}

impl DashRuntime {
    /// Builds the store and reconciler against `host` and renders both surfaces.
    ///
    /// # Errors
    ///
    /// Fails when the persisted favorites list cannot be read.
    pub fn new(host: DashHostContext, config: DashConfig) -> Result<Self, ReducerError> {
        let registry = Rc::new(FolderProxyRegistry::new());
        let store = FavoritesStore::new(
            host.app_catalog(),
            host.folder_store(),
            host.strv_settings(),
            registry.clone(),
            config,
        );
        let mut runtime = Self {
            host,
            state: DashState::new(store, RenderReconciler::new(registry)),
        };
        runtime.dispatch(DashAction::Initialize)?;
        Ok(runtime)
    }

    /// Reduces `action` and executes its effects; returns whether input was consumed.
    ///
    /// # Errors
    ///
    /// Propagates reducer failures; no effect of a failed action runs.
    pub fn dispatch(&mut self, action: DashAction) -> Result<EventPropagation, ReducerError> {
        let effects = reduce_dash(&mut self.state, action).inspect_err(|err| {
            tracing::warn!("dash action failed: {err}");
        })?;
        let mut propagation = EventPropagation::Propagate;
        for effect in effects {
            if matches!(effect, RuntimeEffect::ClaimInput(_)) {
                propagation = EventPropagation::Stop;
            }
            self.host.run_runtime_effect(effect);
        }
        Ok(propagation)
    }

    pub fn pin(&mut self, id: EntityId, position: DockPosition) -> Result<(), ReducerError> {
        self.dispatch(DashAction::Pin { id, position }).map(drop)
    }

    pub fn unpin(&mut self, id: EntityId) -> Result<(), ReducerError> {
        self.dispatch(DashAction::Unpin { id }).map(drop)
    }

    pub fn undo(&mut self) -> Result<(), ReducerError> {
        self.dispatch(DashAction::UndoFeedback).map(drop)
    }

    pub fn button_press(
        &mut self,
        view_id: ViewId,
        button: u32,
    ) -> Result<EventPropagation, ReducerError> {
        self.dispatch(DashAction::ButtonPress { view_id, button })
    }

    pub fn button_release(&mut self, view_id: ViewId) -> Result<EventPropagation, ReducerError> {
        self.dispatch(DashAction::ButtonRelease { view_id })
    }

    /// Whether the dock label of `view_id` should be visible right now.
    pub fn should_show_tooltip(&self, view_id: ViewId) -> bool {
        self.state
            .surfaces
            .view(view_id)
            .is_some_and(menu::should_show_tooltip)
    }

    /// Returns folders to the grid and hides pending feedback.
    pub fn teardown(&mut self) -> Result<(), ReducerError> {
        self.dispatch(DashAction::Teardown).map(drop)
    }

    pub fn host(&self) -> &DashHostContext {
        &self.host
    }

    pub fn state(&self) -> &DashState {
        &self.state
    }

    pub fn store(&self) -> &FavoritesStore {
        &self.state.store
    }

    pub fn surfaces(&self) -> &RenderReconciler {
        &self.state.surfaces
    }
}
