//! App-folder definition contracts and an in-memory adapter.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use serde::{Deserialize, Serialize};

use crate::ids::EntityId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Stored definition of one app folder.
pub struct FolderDefinition {
    /// Raw folder name as stored.
    pub name: String,
    /// Whether `name` is a directory-entry key that should be translated for display.
    #[serde(default)]
    pub translate: bool,
    /// Member application ids.
    #[serde(default)]
    pub apps: Vec<EntityId>,
}

impl FolderDefinition {
    /// Creates an untranslated folder definition with the given members.
    pub fn new<I, S>(name: impl Into<String>, apps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            translate: false,
            apps: apps.into_iter().map(EntityId::trusted).collect(),
        }
    }
}

/// Host service describing which app folders exist and where each one is stored.
pub trait FolderDefinitionStore {
    /// Lists the known folder ids in their configured order.
    fn list_folder_ids(&self) -> Vec<EntityId>;

    /// Reads the folder definition stored at a storage locator.
    fn folder_at(&self, path: &str) -> Option<FolderDefinition>;

    /// Resolves a translated display name for a directory-entry key.
    fn translated_name(&self, _name: &str) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory folder store keyed by storage locator.
pub struct MemoryFolderStore {
    base_path: String,
    order: Rc<RefCell<Vec<EntityId>>>,
    definitions: Rc<RefCell<HashMap<String, FolderDefinition>>>,
    translations: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryFolderStore {
    /// Creates an empty store whose locators live under `base_path` (`/org/.../app-folders/`).
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            ..Self::default()
        }
    }

    /// Returns the locator the store uses for `id`.
    pub fn path_for(&self, id: &EntityId) -> String {
        format!("{}folders/{}/", self.base_path, id)
    }

    /// Adds or replaces a folder, appending it to the id list when new.
    pub fn insert(&self, id: EntityId, definition: FolderDefinition) {
        let path = self.path_for(&id);
        let mut order = self.order.borrow_mut();
        if !order.contains(&id) {
            order.push(id);
        }
        self.definitions.borrow_mut().insert(path, definition);
    }

    /// Deletes a folder and its definition.
    pub fn remove(&self, id: &EntityId) {
        let path = self.path_for(id);
        self.order.borrow_mut().retain(|entry| entry != id);
        self.definitions.borrow_mut().remove(&path);
    }

    /// Replaces the member list of an existing folder.
    pub fn set_apps(&self, id: &EntityId, apps: Vec<EntityId>) {
        let path = self.path_for(id);
        if let Some(definition) = self.definitions.borrow_mut().get_mut(&path) {
            definition.apps = apps;
        }
    }

    /// Registers a translation for a directory-entry key.
    pub fn add_translation(&self, key: impl Into<String>, translated: impl Into<String>) {
        self.translations
            .borrow_mut()
            .insert(key.into(), translated.into());
    }
}

impl FolderDefinitionStore for MemoryFolderStore {
    fn list_folder_ids(&self) -> Vec<EntityId> {
        self.order.borrow().clone()
    }

    fn folder_at(&self, path: &str) -> Option<FolderDefinition> {
        self.definitions.borrow().get(path).cloned()
    }

    fn translated_name(&self, name: &str) -> Option<String> {
        self.translations.borrow().get(name).cloned()
    }
}
