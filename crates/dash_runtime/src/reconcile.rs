//! Render reconciliation across the app grid and the dock.
//!
//! The reconciler owns both surfaces' item lists. Every recompute destroys stale views before it
//! creates replacements, and a favorited folder lives on the dock only: the grid filters it out
//! of its enumeration until it is unpinned again.

use std::{collections::HashSet, rc::Rc};

use dash_host::{EntityId, FolderDefinitionStore};

use crate::{
    config::DashConfig,
    favorites::FavoritesStore,
    labels,
    model::{
        DockEntity, DragSource, LaunchableEntity, SurfaceKind, ViewId, ViewInstance, ViewParent,
    },
    proxy::FolderProxyRegistry,
};

/// Views created and destroyed by one recompute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurfaceDiff {
    pub created: Vec<ViewId>,
    pub destroyed: Vec<ViewId>,
}

impl SurfaceDiff {
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.destroyed.is_empty()
    }

    fn merge(&mut self, other: SurfaceDiff) {
        self.created.extend(other.created);
        self.destroyed.extend(other.destroyed);
    }
}

/// Owner of the grid and dock view lists.
///
/// Holds at most one view per entity on each surface; an application and a folder that share an
/// id are distinct entities.
pub struct RenderReconciler {
    registry: Rc<FolderProxyRegistry>,
    next_view_id: u64,
    grid: Vec<ViewInstance>,
    dock: Vec<ViewInstance>,
    placeholder: Option<ViewInstance>,
    /// Set by [`RenderReconciler::teardown`]: folders render in the grid only.
    folders_detached: bool,
}

impl RenderReconciler {
    pub fn new(registry: Rc<FolderProxyRegistry>) -> Self {
        Self {
            registry,
            next_view_id: 1,
            grid: Vec::new(),
            dock: Vec::new(),
            placeholder: None,
            folders_detached: false,
        }
    }

    /// Brings both surfaces in line with `store` and checks the single-view invariant.
    pub fn on_favorites_changed(&mut self, store: &FavoritesStore) -> SurfaceDiff {
        let mut diff = self.redisplay_grid(store);
        diff.merge(self.redisplay_dock(store));
        self.assert_single_view_invariant(store);
        tracing::debug!(
            created = diff.created.len(),
            destroyed = diff.destroyed.len(),
            grid = self.grid.len(),
            dock = self.dock.len(),
            "reconciled surfaces"
        );
        diff
    }

    /// Entities the grid should show: visible applications outside every folder, then folders
    /// that are not pinned to the dock.
    pub fn load_grid_items(&self, store: &FavoritesStore) -> Vec<DockEntity> {
        let folders = store.folders();
        let config = store.config();
        let folder_ids = folders.list_folder_ids();

        let foldered: HashSet<EntityId> = folder_ids
            .iter()
            .filter_map(|id| folders.folder_at(&config.path_for(id)))
            .flat_map(|definition| definition.apps)
            .collect();

        let catalog = store.catalog();
        let mut items: Vec<DockEntity> = catalog
            .installed_apps()
            .into_iter()
            .filter(|app| !app.window_backed && catalog.should_show(app))
            .filter(|app| !foldered.contains(&app.id))
            .map(|app| DockEntity::App(Rc::new(app)))
            .collect();

        items.extend(
            folder_ids
                .into_iter()
                .filter(|id| self.folders_detached || !store.is_folder_favorite(id))
                .map(|id| DockEntity::Folder(self.registry.resolve(&id))),
        );
        items
    }

    /// Recomputes the grid, keeping surviving views in place and appending new ones.
    ///
    /// Surviving views take the freshly resolved entity and are relabeled.
    pub fn redisplay_grid(&mut self, store: &FavoritesStore) -> SurfaceDiff {
        let desired = self.load_grid_items(store);
        let mut diff = SurfaceDiff::default();

        self.grid.retain_mut(|view| {
            match desired.iter().find(|entity| entity.same_entity(&view.entity)) {
                Some(entity) => {
                    refresh_view(view, entity, store);
                    true
                }
                None => {
                    diff.destroyed.push(view.id);
                    false
                }
            }
        });

        for entity in desired {
            if self.grid.iter().any(|view| view.entity.same_entity(&entity)) {
                continue;
            }
            let view = self.create_view_for(entity, SurfaceKind::Grid, store);
            diff.created.push(view.id);
            self.grid.push(view);
        }
        diff
    }

    /// Rebuilds the dock in favorites order, reusing (and relabeling) views for entities that stay
    /// pinned.
    pub fn redisplay_dock(&mut self, store: &FavoritesStore) -> SurfaceDiff {
        let mut diff = SurfaceDiff::default();
        let mut existing = std::mem::take(&mut self.dock);

        existing.retain(|view| {
            let keep = store
                .entities()
                .iter()
                .filter(|entity| !(self.folders_detached && entity.is_folder()))
                .any(|entity| entity.same_entity(&view.entity));
            if !keep {
                diff.destroyed.push(view.id);
            }
            keep
        });

        let mut dock = Vec::with_capacity(store.entities().len());
        for entity in store.entities() {
            if self.folders_detached && entity.is_folder() {
                continue;
            }
            match existing
                .iter()
                .position(|view| view.entity.same_entity(entity))
            {
                Some(index) => {
                    let mut view = existing.remove(index);
                    refresh_view(&mut view, entity, store);
                    dock.push(view);
                }
                None => {
                    let view = self.create_view_for(entity.clone(), SurfaceKind::Dock, store);
                    diff.created.push(view.id);
                    dock.push(view);
                }
            }
        }
        self.dock = dock;
        diff
    }

    /// Builds a view for `entity` on `surface`, including its initial label.
    ///
    /// The caller owns insertion; this never touches the surface lists.
    pub fn create_view_for(
        &mut self,
        entity: DockEntity,
        surface: SurfaceKind,
        store: &FavoritesStore,
    ) -> ViewInstance {
        let id = ViewId(self.next_view_id);
        self.next_view_id = self.next_view_id.saturating_add(1);
        let mut view = ViewInstance {
            id,
            entity,
            surface,
            parent: ViewParent::for_surface(surface),
            icon_label: None,
            slot_label: None,
            highlighted: false,
            hovered: false,
            menu: None,
            placeholder: false,
        };
        apply_name(&mut view, store.folders(), store.config());
        view
    }

    /// Recomputes the label of a live view, e.g. after its folder was renamed.
    pub fn update_name(&mut self, view_id: ViewId, store: &FavoritesStore) -> Option<String> {
        let view = self.view_mut(view_id)?;
        apply_name(view, store.folders(), store.config());
        view.label().map(str::to_string)
    }

    /// Relabels every live view.
    pub fn update_all_names(&mut self, store: &FavoritesStore) {
        for view in self.grid.iter_mut().chain(self.dock.iter_mut()) {
            apply_name(view, store.folders(), store.config());
        }
    }

    /// Handles a folder's membership change.
    ///
    /// A dock folder can only be edited through the grid's affordances, so the grid recomputes
    /// and the caller must persist the grid's page layout. Returns the folder id when the view is
    /// a dock folder.
    pub fn folder_apps_changed(
        &mut self,
        view_id: ViewId,
        store: &FavoritesStore,
    ) -> Option<EntityId> {
        let view = self.view(view_id)?;
        if !view.entity.is_folder() {
            return None;
        }
        let folder = view.entity_id().clone();
        let on_dock = view.surface == SurfaceKind::Dock;
        self.redisplay_grid(store);
        on_dock.then_some(folder)
    }

    /// Ensures a drag placeholder exists on the grid; returns `true` when one was created.
    ///
    /// Application sources get the default application placeholder. Any other source is
    /// synthesized as a folder placeholder. At most one placeholder exists at a time.
    pub fn ensure_placeholder(&mut self, source: &DragSource, store: &FavoritesStore) -> bool {
        if self.placeholder.is_some() {
            return false;
        }
        let entity = match source {
            DragSource::App(id) => match store.catalog().lookup_app(id) {
                Some(app) => DockEntity::App(Rc::new(app)),
                None => return false,
            },
            DragSource::Folder(id) => DockEntity::Folder(self.registry.resolve(id)),
        };
        let mut view = self.create_view_for(entity, SurfaceKind::Grid, store);
        view.placeholder = true;
        self.placeholder = Some(view);
        true
    }

    /// Drops the drag placeholder; returns `true` when one existed.
    pub fn clear_placeholder(&mut self) -> bool {
        self.placeholder.take().is_some()
    }

    /// Detaches folders from the dock and returns every folder to the grid.
    pub fn teardown(&mut self, store: &FavoritesStore) -> SurfaceDiff {
        self.folders_detached = true;
        self.clear_placeholder();
        let mut diff = self.redisplay_dock(store);
        diff.merge(self.redisplay_grid(store));
        diff
    }

    /// Page layout of the grid, as persisted by the host.
    pub fn grid_layout(&self) -> Vec<EntityId> {
        self.grid.iter().map(|view| view.entity_id().clone()).collect()
    }

    pub fn grid(&self) -> &[ViewInstance] {
        &self.grid
    }

    pub fn dock(&self) -> &[ViewInstance] {
        &self.dock
    }

    pub fn placeholder(&self) -> Option<&ViewInstance> {
        self.placeholder.as_ref()
    }

    pub fn surface(&self, surface: SurfaceKind) -> &[ViewInstance] {
        match surface {
            SurfaceKind::Grid => &self.grid,
            SurfaceKind::Dock => &self.dock,
        }
    }

    /// Number of live folder views of `id` on `surface`, ignoring an application sharing the id.
    pub fn live_folder_views(&self, surface: SurfaceKind, id: &EntityId) -> usize {
        self.surface(surface)
            .iter()
            .filter(|view| view.entity.is_folder() && view.entity_id() == id)
            .count()
    }

    /// Number of live views of `id` on `surface`.
    pub fn live_views(&self, surface: SurfaceKind, id: &EntityId) -> usize {
        self.surface(surface)
            .iter()
            .filter(|view| view.entity_id() == id)
            .count()
    }

    pub fn view(&self, view_id: ViewId) -> Option<&ViewInstance> {
        self.grid
            .iter()
            .chain(self.dock.iter())
            .find(|view| view.id == view_id)
    }

    pub fn view_mut(&mut self, view_id: ViewId) -> Option<&mut ViewInstance> {
        self.grid
            .iter_mut()
            .chain(self.dock.iter_mut())
            .find(|view| view.id == view_id)
    }

    pub fn views_mut(&mut self) -> impl Iterator<Item = &mut ViewInstance> {
        self.grid.iter_mut().chain(self.dock.iter_mut())
    }

    fn assert_single_view_invariant(&self, store: &FavoritesStore) {
        for surface in [SurfaceKind::Grid, SurfaceKind::Dock] {
            let mut seen = HashSet::new();
            for view in self.surface(surface) {
                assert!(
                    seen.insert((view.entity.is_folder(), view.entity_id())),
                    "stale view: {} rendered twice on {surface:?}",
                    view.entity_id()
                );
            }
        }
        if self.folders_detached {
            return;
        }
        for id in store.folder_favorite_ids() {
            assert_eq!(
                self.live_folder_views(SurfaceKind::Grid, &id),
                0,
                "stale view: pinned folder {id} still on the grid"
            );
        }
    }
}

fn refresh_view(view: &mut ViewInstance, entity: &DockEntity, store: &FavoritesStore) {
    view.entity = entity.clone();
    apply_name(view, store.folders(), store.config());
}

/// Dock slots own their label, so a dock view is named directly through the shared folder-name
/// rule; grid views go through the default icon-label path.
fn apply_name(view: &mut ViewInstance, folders: &dyn FolderDefinitionStore, config: &DashConfig) {
    let name = labels::entity_display_name(&view.entity, folders, config);
    match view.parent {
        ViewParent::DockSlot => {
            view.icon_label = None;
            view.slot_label = Some(name);
        }
        ViewParent::GridPage => {
            view.slot_label = None;
            view.icon_label = Some(name);
        }
    }
}

#[cfg(test)]
mod tests {
    use dash_host::{AppInfo, FolderDefinition};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        model::DockPosition,
        test_support::{id, Fixture},
    };

    fn grid_ids(reconciler: &RenderReconciler) -> Vec<String> {
        reconciler
            .grid_layout()
            .into_iter()
            .map(|id| id.to_string())
            .collect()
    }

    fn dock_ids(reconciler: &RenderReconciler) -> Vec<String> {
        reconciler
            .dock()
            .iter()
            .map(|view| view.entity_id().to_string())
            .collect()
    }

    #[test]
    fn initial_render_splits_folders_and_favorites() {
        let fixture = Fixture::standard();
        let store = fixture.store();
        let mut reconciler = RenderReconciler::new(fixture.registry.clone());

        let diff = reconciler.on_favorites_changed(&store);

        // gedit and calculator live inside the utilities folder.
        assert_eq!(grid_ids(&reconciler), vec!["firefox", "utilities"]);
        assert_eq!(dock_ids(&reconciler), vec!["firefox"]);
        assert_eq!(diff.created.len(), 3);
        assert!(diff.destroyed.is_empty());
    }

    #[test]
    fn pinning_a_folder_moves_its_view_from_grid_to_dock() {
        let fixture = Fixture::standard();
        let mut store = fixture.store();
        let mut reconciler = RenderReconciler::new(fixture.registry.clone());
        reconciler.on_favorites_changed(&store);
        let grid_view = reconciler.grid()[1].id;

        store
            .add(&id("utilities"), DockPosition::Append)
            .expect("add");
        let diff = reconciler.on_favorites_changed(&store);

        assert!(diff.destroyed.contains(&grid_view));
        assert_eq!(reconciler.live_views(SurfaceKind::Grid, &id("utilities")), 0);
        assert_eq!(reconciler.live_views(SurfaceKind::Dock, &id("utilities")), 1);
        let dock_view = &reconciler.dock()[1];
        assert!(Rc::ptr_eq(
            dock_view.entity.folder().expect("folder view"),
            &fixture.registry.resolve(&id("utilities"))
        ));

        store.remove(&id("utilities")).expect("remove");
        reconciler.on_favorites_changed(&store);
        assert_eq!(reconciler.live_views(SurfaceKind::Grid, &id("utilities")), 1);
        assert_eq!(reconciler.live_views(SurfaceKind::Dock, &id("utilities")), 0);
    }

    #[test]
    fn unchanged_favorites_keep_existing_views() {
        let fixture = Fixture::standard();
        let store = fixture.store();
        let mut reconciler = RenderReconciler::new(fixture.registry.clone());
        reconciler.on_favorites_changed(&store);
        let before: Vec<ViewId> = reconciler.dock().iter().map(|view| view.id).collect();

        let diff = reconciler.on_favorites_changed(&store);

        assert!(diff.is_empty());
        let after: Vec<ViewId> = reconciler.dock().iter().map(|view| view.id).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn dock_follows_favorites_order() {
        let fixture = Fixture::standard();
        fixture.add_folder("games", "Games");
        fixture.set_favorites(&["games", "firefox", "utilities"]);
        let mut store = fixture.store();
        let mut reconciler = RenderReconciler::new(fixture.registry.clone());
        reconciler.on_favorites_changed(&store);
        assert_eq!(dock_ids(&reconciler), vec!["games", "firefox", "utilities"]);

        store.remove(&id("firefox")).expect("remove");
        store.add(&id("firefox"), DockPosition::At(0)).expect("add");
        reconciler.on_favorites_changed(&store);
        assert_eq!(dock_ids(&reconciler), vec!["firefox", "games", "utilities"]);
    }

    #[test]
    fn dock_and_grid_folder_labels_use_different_slots() {
        let fixture = Fixture::standard();
        fixture.set_favorites(&["utilities"]);
        fixture.add_folder("games", "Games");
        let store = fixture.store();
        let mut reconciler = RenderReconciler::new(fixture.registry.clone());
        reconciler.on_favorites_changed(&store);

        let dock_view = &reconciler.dock()[0];
        assert_eq!(dock_view.parent, ViewParent::DockSlot);
        assert_eq!(dock_view.slot_label.as_deref(), Some("Utilities"));
        assert_eq!(dock_view.icon_label, None);

        let games = reconciler
            .grid()
            .iter()
            .find(|view| view.entity_id() == &id("games"))
            .expect("games on grid");
        assert_eq!(games.icon_label.as_deref(), Some("Games"));
        assert_eq!(games.slot_label, None);
    }

    #[test]
    fn renamed_folder_relabels_its_dock_view() {
        let fixture = Fixture::standard();
        fixture.set_favorites(&["utilities"]);
        let store = fixture.store();
        let mut reconciler = RenderReconciler::new(fixture.registry.clone());
        reconciler.on_favorites_changed(&store);
        let view_id = reconciler.dock()[0].id;

        fixture.folders.insert(
            id("utilities"),
            FolderDefinition::new("Tools", ["gedit", "calculator"]),
        );
        assert_eq!(
            reconciler.update_name(view_id, &store),
            Some("Tools".to_string())
        );
        assert_eq!(reconciler.update_name(ViewId(999), &store), None);
    }

    #[test]
    fn dock_folder_membership_change_recomputes_the_grid() {
        let fixture = Fixture::standard();
        fixture.set_favorites(&["utilities"]);
        let store = fixture.store();
        let mut reconciler = RenderReconciler::new(fixture.registry.clone());
        reconciler.on_favorites_changed(&store);
        assert_eq!(grid_ids(&reconciler), vec!["firefox"]);
        let dock_view = reconciler.dock()[0].id;

        fixture
            .folders
            .set_apps(&id("utilities"), vec![id("gedit")]);
        assert_eq!(
            reconciler.folder_apps_changed(dock_view, &store),
            Some(id("utilities"))
        );
        assert_eq!(grid_ids(&reconciler), vec!["firefox", "calculator"]);
    }

    #[test]
    fn placeholders_depend_on_drag_source_kind() {
        let fixture = Fixture::standard();
        let store = fixture.store();
        let mut reconciler = RenderReconciler::new(fixture.registry.clone());
        reconciler.on_favorites_changed(&store);

        assert!(reconciler.ensure_placeholder(&DragSource::Folder(id("utilities")), &store));
        assert!(!reconciler.ensure_placeholder(&DragSource::Folder(id("utilities")), &store));
        let placeholder = reconciler.placeholder().expect("placeholder");
        assert!(placeholder.placeholder);
        assert!(placeholder.entity.is_folder());
        // Placeholders never count as live grid items.
        assert_eq!(reconciler.live_views(SurfaceKind::Grid, &id("utilities")), 1);

        assert!(reconciler.clear_placeholder());
        assert!(reconciler.ensure_placeholder(&DragSource::App(id("firefox")), &store));
        assert!(!reconciler.placeholder().expect("placeholder").entity.is_folder());
        assert!(reconciler.clear_placeholder());
        assert!(!reconciler.ensure_placeholder(&DragSource::App(id("ghost")), &store));
    }

    #[test]
    fn teardown_returns_pinned_folders_to_the_grid() {
        let fixture = Fixture::standard();
        fixture.set_favorites(&["firefox", "utilities"]);
        let store = fixture.store();
        let mut reconciler = RenderReconciler::new(fixture.registry.clone());
        reconciler.on_favorites_changed(&store);
        assert_eq!(dock_ids(&reconciler), vec!["firefox", "utilities"]);

        reconciler.teardown(&store);
        assert_eq!(dock_ids(&reconciler), vec!["firefox"]);
        assert_eq!(reconciler.live_views(SurfaceKind::Grid, &id("utilities")), 1);
    }

    #[test]
    fn app_and_folder_sharing_an_id_render_as_separate_entities() {
        let fixture = Fixture::standard();
        fixture.catalog.install(AppInfo::new("utilities", "Utilities App"));
        let mut store = fixture.store();
        let mut reconciler = RenderReconciler::new(fixture.registry.clone());

        reconciler.on_favorites_changed(&store);
        assert_eq!(grid_ids(&reconciler), vec!["firefox", "utilities", "utilities"]);
        assert_eq!(reconciler.live_folder_views(SurfaceKind::Grid, &id("utilities")), 1);

        // The catalog entry wins, so pinning the id leaves the folder on the grid.
        store
            .add(&id("utilities"), DockPosition::Append)
            .expect("add");
        reconciler.on_favorites_changed(&store);
        assert_eq!(dock_ids(&reconciler), vec!["firefox", "utilities"]);
        assert!(!reconciler.dock()[1].entity.is_folder());
        assert_eq!(reconciler.live_folder_views(SurfaceKind::Dock, &id("utilities")), 0);
        assert_eq!(reconciler.live_folder_views(SurfaceKind::Grid, &id("utilities")), 1);
    }

    #[test]
    fn surviving_views_pick_up_renamed_entities() {
        let fixture = Fixture::standard();
        let mut store = fixture.store();
        let mut reconciler = RenderReconciler::new(fixture.registry.clone());
        reconciler.on_favorites_changed(&store);
        let dock_view = reconciler.dock()[0].id;
        let grid_app = reconciler.grid()[0].id;
        let grid_folder = reconciler.grid()[1].id;

        fixture.catalog.install(AppInfo::new("firefox", "Firefox Nightly"));
        fixture.folders.insert(
            id("utilities"),
            FolderDefinition::new("Tools", ["gedit", "calculator"]),
        );
        store.reload().expect("reload");
        let diff = reconciler.on_favorites_changed(&store);

        assert!(diff.is_empty());
        let label = |view_id| reconciler.view(view_id).and_then(ViewInstance::label);
        assert_eq!(label(dock_view), Some("Firefox Nightly"));
        assert_eq!(label(grid_app), Some("Firefox Nightly"));
        assert_eq!(label(grid_folder), Some("Tools"));
    }
}
