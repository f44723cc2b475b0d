//! Display names for favorites and folders.

use dash_host::{EntityId, FolderDefinition, FolderDefinitionStore};

use crate::{
    config::DashConfig,
    model::{DockEntity, LaunchableEntity},
};

/// Shared folder-naming rule used by both surfaces.
///
/// Translated folders prefer the store's translation of their name key; a blank name falls back
/// to the folder id so the dock never shows an empty label.
pub fn folder_name(
    definition: &FolderDefinition,
    id: &EntityId,
    folders: &dyn FolderDefinitionStore,
) -> String {
    let translated = if definition.translate {
        folders.translated_name(&definition.name)
    } else {
        None
    };
    let name = translated.unwrap_or_else(|| definition.name.clone());
    let name = name.trim();
    if name.is_empty() {
        id.to_string()
    } else {
        name.to_string()
    }
}

/// Reads the folder definition at its configured locator and names it.
pub fn folder_display_name(
    id: &EntityId,
    folders: &dyn FolderDefinitionStore,
    config: &DashConfig,
) -> String {
    match folders.folder_at(&config.path_for(id)) {
        Some(definition) => folder_name(&definition, id, folders),
        None => {
            tracing::debug!(folder = %id, "folder definition missing; using id as name");
            id.to_string()
        }
    }
}

pub fn entity_display_name(
    entity: &DockEntity,
    folders: &dyn FolderDefinitionStore,
    config: &DashConfig,
) -> String {
    match entity {
        DockEntity::App(app) => app.name.clone(),
        DockEntity::Folder(proxy) => folder_display_name(proxy.id(), folders, config),
    }
}
