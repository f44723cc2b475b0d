//! Ordered favorites store merging pinned applications and pinned app folders.

use std::{collections::HashSet, rc::Rc};

use dash_host::{AppCatalog, EntityId, FolderDefinitionStore, StrvSettings};
use thiserror::Error;

use crate::{
    config::DashConfig,
    labels,
    model::{DockEntity, DockPosition, LaunchableEntity},
    proxy::FolderProxyRegistry,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Host storage failures surfaced by [`FavoritesStore`].
pub enum FavoritesError {
    /// The persisted favorites list could not be read.
    #[error("failed to read favorites list: {0}")]
    Load(String),
    /// The favorites list could not be written back.
    #[error("failed to persist favorites list: {0}")]
    Persist(String),
}

/// The single writer of the favorites list.
///
/// Order always mirrors the persisted string list. Applications are resolved through the catalog
/// and its visibility policy first; ids that are not visible applications but name a known folder
/// resolve to that folder's registry proxy; anything else is dropped on reload.
pub struct FavoritesStore {
    catalog: Rc<dyn AppCatalog>,
    folders: Rc<dyn FolderDefinitionStore>,
    settings: Rc<dyn StrvSettings>,
    registry: Rc<FolderProxyRegistry>,
    config: DashConfig,
    favorites: Vec<DockEntity>,
}

impl FavoritesStore {
    /// Creates an empty store; call [`FavoritesStore::reload`] to load persisted favorites.
    pub fn new(
        catalog: Rc<dyn AppCatalog>,
        folders: Rc<dyn FolderDefinitionStore>,
        settings: Rc<dyn StrvSettings>,
        registry: Rc<FolderProxyRegistry>,
        config: DashConfig,
    ) -> Self {
        Self {
            catalog,
            folders,
            settings,
            registry,
            config,
            favorites: Vec::new(),
        }
    }

    /// Recomputes the list from the persisted ids, the catalog, and the known folder ids.
    ///
    /// Ids that are malformed or no longer resolve are dropped silently; duplicates keep their
    /// first position.
    /// Calling this repeatedly with unchanged sources produces the same list.
    ///
    /// # Errors
    ///
    /// Returns [`FavoritesError::Load`] when the settings store cannot be read; the previous list
    /// is kept in that case.
    pub fn reload(&mut self) -> Result<(), FavoritesError> {
        let ids = self
            .settings
            .get_strv(&self.config.favorites_key)
            .map_err(FavoritesError::Load)?;
        let folder_ids: HashSet<EntityId> = self.folders.list_folder_ids().into_iter().collect();

        let mut seen = HashSet::new();
        let mut favorites = Vec::with_capacity(ids.len());
        for raw in ids {
            let id = match EntityId::new(raw) {
                Ok(id) => id,
                Err(err) => {
                    tracing::debug!("dropping malformed favorite: {err}");
                    continue;
                }
            };
            if seen.contains(&id) {
                continue;
            }
            match self.resolve_entity(&id, &folder_ids) {
                Some(entity) => {
                    seen.insert(id);
                    favorites.push(entity);
                }
                None => tracing::debug!(favorite = %id, "dropping favorite that no longer resolves"),
            }
        }

        self.favorites = favorites;
        Ok(())
    }

    /// Pins `id` at `position`.
    ///
    /// Returns `Ok(false)` when the id is already a favorite, or when a non-folder id does not
    /// resolve to a visible application.
    ///
    /// # Errors
    ///
    /// Returns [`FavoritesError::Persist`] when the new list cannot be written; the insertion is
    /// rolled back.
    pub fn add(&mut self, id: &EntityId, position: DockPosition) -> Result<bool, FavoritesError> {
        if self.is_favorite(id) {
            return Ok(false);
        }
        let folder_ids: HashSet<EntityId> = self.folders.list_folder_ids().into_iter().collect();
        let entity = if folder_ids.contains(id) {
            self.resolve_entity(id, &folder_ids)
        } else {
            self.resolve_app(id)
        };
        let Some(entity) = entity else {
            tracing::debug!(favorite = %id, "refusing to pin unknown entity");
            return Ok(false);
        };

        let index = position.index_in(self.favorites.len());
        self.favorites.insert(index, entity);
        if let Err(err) = self.persist() {
            self.favorites.remove(index);
            return Err(err);
        }
        Ok(true)
    }

    /// Unpins `id`, returning the position it occupied, or `None` when it was not a favorite.
    ///
    /// # Errors
    ///
    /// Returns [`FavoritesError::Persist`] when the new list cannot be written; the removal is
    /// rolled back.
    pub fn remove(&mut self, id: &EntityId) -> Result<Option<usize>, FavoritesError> {
        let Some(index) = self.position_of(id) else {
            return Ok(None);
        };
        let removed = self.favorites.remove(index);
        if let Err(err) = self.persist() {
            self.favorites.insert(index, removed);
            return Err(err);
        }
        Ok(Some(index))
    }

    pub fn is_favorite(&self, id: &EntityId) -> bool {
        self.position_of(id).is_some()
    }

    /// True when `entity` itself is pinned, as opposed to another entity sharing its id.
    pub fn contains_entity(&self, entity: &DockEntity) -> bool {
        self.entity(entity.id())
            .is_some_and(|favorite| favorite.same_entity(entity))
    }

    /// True when `id` is pinned as a folder.
    pub fn is_folder_favorite(&self, id: &EntityId) -> bool {
        self.entity(id).is_some_and(DockEntity::is_folder)
    }

    pub fn position_of(&self, id: &EntityId) -> Option<usize> {
        self.favorites.iter().position(|entity| entity.id() == id)
    }

    pub fn entity(&self, id: &EntityId) -> Option<&DockEntity> {
        self.favorites.iter().find(|entity| entity.id() == id)
    }

    pub fn entities(&self) -> &[DockEntity] {
        &self.favorites
    }

    pub fn favorite_ids(&self) -> Vec<EntityId> {
        self.favorites.iter().map(|entity| entity.id().clone()).collect()
    }

    /// The pinned folders, in favorites order.
    pub fn folder_favorite_ids(&self) -> Vec<EntityId> {
        self.favorites
            .iter()
            .filter(|entity| entity.is_folder())
            .map(|entity| entity.id().clone())
            .collect()
    }

    pub fn is_known_folder(&self, id: &EntityId) -> bool {
        self.folders.list_folder_ids().contains(id)
    }

    /// Display name for a resolved entity.
    pub fn display_name(&self, entity: &DockEntity) -> String {
        labels::entity_display_name(entity, self.folders.as_ref(), &self.config)
    }

    pub fn catalog(&self) -> &dyn AppCatalog {
        self.catalog.as_ref()
    }

    pub fn folders(&self) -> &dyn FolderDefinitionStore {
        self.folders.as_ref()
    }

    pub fn registry(&self) -> &Rc<FolderProxyRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &DashConfig {
        &self.config
    }

    fn resolve_entity(&self, id: &EntityId, folder_ids: &HashSet<EntityId>) -> Option<DockEntity> {
        self.resolve_app(id).or_else(|| {
            folder_ids
                .contains(id)
                .then(|| DockEntity::Folder(self.registry.resolve(id)))
        })
    }

    fn resolve_app(&self, id: &EntityId) -> Option<DockEntity> {
        let app = self.catalog.lookup_app(id)?;
        self.catalog
            .should_show(&app)
            .then(|| DockEntity::App(Rc::new(app)))
    }

    fn persist(&self) -> Result<(), FavoritesError> {
        let ids: Vec<String> = self
            .favorites
            .iter()
            .map(|entity| entity.get_id().to_string())
            .collect();
        self.settings
            .set_strv(&self.config.favorites_key, &ids)
            .map_err(|err| {
                tracing::warn!("favorites persist failed: {err}");
                FavoritesError::Persist(err)
            })
    }
}
