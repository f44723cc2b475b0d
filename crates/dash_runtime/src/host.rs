//! Host-side execution of reducer effects.
//!
//! The reducer never touches a display or a settings backend directly. It emits
//! [`RuntimeEffect`] values and [`DashHostContext`] routes each one to the injected host service
//! that owns the concern.

use std::{cell::RefCell, rc::Rc};

use dash_host::{
    AppCatalog, EntityId, FeedbackPresenter, FolderDefinitionStore, MemoryAppCatalog,
    MemoryFolderStore, NoopFeedbackPresenter, NoopStrvSettings, StrvSettings,
};

use crate::{
    model::{SurfaceKind, ViewId},
    reducer::RuntimeEffect,
};

/// Drawing surface owned by the shell (the app grid and the dock).
pub trait SurfaceHost {
    /// Redraws a surface from the reconciler's current view list.
    fn redisplay(&self, surface: SurfaceKind);

    /// Persists the grid's page layout.
    fn save_grid_pages(&self, ids: &[EntityId]);

    /// Updates the hover label owned by a dock slot.
    fn sync_dock_label(&self, view_id: ViewId, label: &str);

    /// Redraws the open popup of a folder.
    fn redisplay_folder_popup(&self, id: &EntityId);
}

#[derive(Debug, Clone, Copy, Default)]
/// Surface host that draws nothing.
pub struct NoopSurfaceHost;

impl SurfaceHost for NoopSurfaceHost {
    fn redisplay(&self, _surface: SurfaceKind) {}

    fn save_grid_pages(&self, _ids: &[EntityId]) {}

    fn sync_dock_label(&self, _view_id: ViewId, _label: &str) {}

    fn redisplay_folder_popup(&self, _id: &EntityId) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One call observed by [`RecordingSurfaceHost`].
pub enum SurfaceCall {
    Redisplay(SurfaceKind),
    SaveGridPages(Vec<EntityId>),
    SyncDockLabel { view_id: ViewId, label: String },
    RedisplayFolderPopup(EntityId),
}

#[derive(Debug, Clone, Default)]
/// Surface host that records every call in order.
pub struct RecordingSurfaceHost {
    calls: Rc<RefCell<Vec<SurfaceCall>>>,
}

impl RecordingSurfaceHost {
    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.borrow().clone()
    }

    /// Returns and clears the recorded calls.
    pub fn take_calls(&self) -> Vec<SurfaceCall> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }
}

impl SurfaceHost for RecordingSurfaceHost {
    fn redisplay(&self, surface: SurfaceKind) {
        self.calls.borrow_mut().push(SurfaceCall::Redisplay(surface));
    }

    fn save_grid_pages(&self, ids: &[EntityId]) {
        self.calls
            .borrow_mut()
            .push(SurfaceCall::SaveGridPages(ids.to_vec()));
    }

    fn sync_dock_label(&self, view_id: ViewId, label: &str) {
        self.calls.borrow_mut().push(SurfaceCall::SyncDockLabel {
            view_id,
            label: label.to_string(),
        });
    }

    fn redisplay_folder_popup(&self, id: &EntityId) {
        self.calls
            .borrow_mut()
            .push(SurfaceCall::RedisplayFolderPopup(id.clone()));
    }
}

#[derive(Clone)]
/// Host service bundle for the dash runtime.
pub struct DashHostContext {
    catalog: Rc<dyn AppCatalog>,
    folders: Rc<dyn FolderDefinitionStore>,
    settings: Rc<dyn StrvSettings>,
    feedback: Rc<dyn FeedbackPresenter>,
    surfaces: Rc<dyn SurfaceHost>,
}

impl Default for DashHostContext {
    fn default() -> Self {
        Self {
            catalog: Rc::new(MemoryAppCatalog::default()),
            folders: Rc::new(MemoryFolderStore::default()),
            settings: Rc::new(NoopStrvSettings),
            feedback: Rc::new(NoopFeedbackPresenter),
            surfaces: Rc::new(NoopSurfaceHost),
        }
    }
}

impl DashHostContext {
    /// Bundles explicit host services.
    pub fn new(
        catalog: Rc<dyn AppCatalog>,
        folders: Rc<dyn FolderDefinitionStore>,
        settings: Rc<dyn StrvSettings>,
        feedback: Rc<dyn FeedbackPresenter>,
        surfaces: Rc<dyn SurfaceHost>,
    ) -> Self {
        Self {
            catalog,
            folders,
            settings,
            feedback,
            surfaces,
        }
    }

    /// Returns the configured application catalog.
    pub fn app_catalog(&self) -> Rc<dyn AppCatalog> {
        self.catalog.clone()
    }

    /// Returns the configured folder-definition store.
    pub fn folder_store(&self) -> Rc<dyn FolderDefinitionStore> {
        self.folders.clone()
    }

    /// Returns the configured string-list settings store.
    pub fn strv_settings(&self) -> Rc<dyn StrvSettings> {
        self.settings.clone()
    }

    /// Returns the configured feedback presenter.
    pub fn feedback_presenter(&self) -> Rc<dyn FeedbackPresenter> {
        self.feedback.clone()
    }

    /// Returns the configured surface host.
    pub fn surface_host(&self) -> Rc<dyn SurfaceHost> {
        self.surfaces.clone()
    }

    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::Redisplay(surface) => self.surfaces.redisplay(surface),
            RuntimeEffect::SaveGridPages(ids) => self.surfaces.save_grid_pages(&ids),
            RuntimeEffect::ShowFeedback(notice) => self.feedback.show(&notice),
            RuntimeEffect::HideFeedback => self.feedback.hide(),
            RuntimeEffect::SyncDockLabel { view_id, label } => {
                self.surfaces.sync_dock_label(view_id, &label)
            }
            RuntimeEffect::RedisplayFolderPopup(id) => self.surfaces.redisplay_folder_popup(&id),
            RuntimeEffect::ClaimInput(view_id) => {
                tracing::trace!(view = view_id.0, "input claimed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use dash_host::{FeedbackNotice, MemoryFeedbackPresenter};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn effects_route_to_the_owning_service() {
        let surfaces = RecordingSurfaceHost::default();
        let feedback = MemoryFeedbackPresenter::default();
        let host = DashHostContext::new(
            Rc::new(MemoryAppCatalog::default()),
            Rc::new(MemoryFolderStore::default()),
            Rc::new(NoopStrvSettings),
            Rc::new(feedback.clone()),
            Rc::new(surfaces.clone()),
        );
        let notice = FeedbackNotice {
            message: "Utilities has been pinned to the dash.".to_string(),
            undoable: true,
        };

        host.run_runtime_effect(RuntimeEffect::ShowFeedback(notice.clone()));
        host.run_runtime_effect(RuntimeEffect::Redisplay(SurfaceKind::Dock));
        host.run_runtime_effect(RuntimeEffect::SyncDockLabel {
            view_id: ViewId(4),
            label: "Utilities".to_string(),
        });
        host.run_runtime_effect(RuntimeEffect::ClaimInput(ViewId(4)));

        assert_eq!(feedback.current(), Some(notice));
        assert_eq!(
            surfaces.take_calls(),
            vec![
                SurfaceCall::Redisplay(SurfaceKind::Dock),
                SurfaceCall::SyncDockLabel {
                    view_id: ViewId(4),
                    label: "Utilities".to_string(),
                },
            ]
        );

        host.run_runtime_effect(RuntimeEffect::HideFeedback);
        assert_eq!(feedback.current(), None);
        assert!(surfaces.calls().is_empty());
    }
}
