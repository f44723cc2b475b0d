//! Application catalog contracts and an in-memory adapter.

use std::{cell::RefCell, collections::HashSet, rc::Rc};

use serde::{Deserialize, Serialize};

use crate::ids::EntityId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Installed application metadata as supplied by the host catalog.
pub struct AppInfo {
    /// Desktop-file id of the application.
    pub id: EntityId,
    /// Localized display name.
    pub name: String,
    /// Whether this entry only exists to represent an unmatched running window.
    #[serde(default)]
    pub window_backed: bool,
}

impl AppInfo {
    /// Creates a regular (not window-backed) application entry.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: EntityId::trusted(id),
            name: name.into(),
            window_backed: false,
        }
    }
}

/// Host service resolving application ids and applying the visibility policy.
pub trait AppCatalog {
    /// Resolves an installed application by id.
    fn lookup_app(&self, id: &EntityId) -> Option<AppInfo>;

    /// Returns whether policy (parental controls, `NoDisplay`) allows showing `app`.
    fn should_show(&self, app: &AppInfo) -> bool;

    /// Lists every installed application in catalog order.
    fn installed_apps(&self) -> Vec<AppInfo>;
}

#[derive(Debug, Clone, Default)]
/// In-memory application catalog with a mutable hidden-set policy.
pub struct MemoryAppCatalog {
    apps: Rc<RefCell<Vec<AppInfo>>>,
    hidden: Rc<RefCell<HashSet<EntityId>>>,
}

impl MemoryAppCatalog {
    /// Creates a catalog holding `apps` in the given order.
    pub fn with_apps(apps: impl IntoIterator<Item = AppInfo>) -> Self {
        let catalog = Self::default();
        catalog.apps.borrow_mut().extend(apps);
        catalog
    }

    /// Parses a JSON array of [`AppInfo`] records.
    ///
    /// # Errors
    ///
    /// Returns an error when `raw` is not a JSON array of application records.
    pub fn from_json_str(raw: &str) -> Result<Self, String> {
        let apps: Vec<AppInfo> = serde_json::from_str(raw).map_err(|e| e.to_string())?;
        Ok(Self::with_apps(apps))
    }

    /// Installs an application, replacing any entry with the same id.
    pub fn install(&self, app: AppInfo) {
        let mut apps = self.apps.borrow_mut();
        match apps.iter_mut().find(|entry| entry.id == app.id) {
            Some(existing) => *existing = app,
            None => apps.push(app),
        }
    }

    /// Removes an installed application.
    pub fn uninstall(&self, id: &EntityId) {
        self.apps.borrow_mut().retain(|entry| entry.id != *id);
    }

    /// Marks an application hidden (or visible again) for the visibility policy.
    pub fn set_hidden(&self, id: &EntityId, hidden: bool) {
        let mut set = self.hidden.borrow_mut();
        if hidden {
            set.insert(id.clone());
        } else {
            set.remove(id);
        }
    }
}

impl AppCatalog for MemoryAppCatalog {
    fn lookup_app(&self, id: &EntityId) -> Option<AppInfo> {
        self.apps.borrow().iter().find(|app| app.id == *id).cloned()
    }

    fn should_show(&self, app: &AppInfo) -> bool {
        !self.hidden.borrow().contains(&app.id)
    }

    fn installed_apps(&self) -> Vec<AppInfo> {
        self.apps.borrow().clone()
    }
}
