use std::rc::Rc;

use dash_host::{
    AppInfo, EntityId, FolderDefinition, MemoryAppCatalog, MemoryFolderStore, MemoryStrvSettings,
};

use crate::{config::DashConfig, favorites::FavoritesStore, proxy::FolderProxyRegistry};

pub(crate) struct Fixture {
    pub config: DashConfig,
    pub catalog: MemoryAppCatalog,
    pub folders: MemoryFolderStore,
    pub settings: MemoryStrvSettings,
    pub registry: Rc<FolderProxyRegistry>,
}

pub(crate) fn id(raw: &str) -> EntityId {
    EntityId::trusted(raw)
}

impl Fixture {
    /// Catalog `firefox`, `gedit`, `calculator`; folder `utilities` holding `gedit` and
    /// `calculator`; favorites `["firefox"]`.
    pub fn standard() -> Self {
        let config = DashConfig::default();
        let catalog = MemoryAppCatalog::with_apps([
            AppInfo::new("firefox", "Firefox"),
            AppInfo::new("gedit", "Text Editor"),
            AppInfo::new("calculator", "Calculator"),
        ]);
        let folders = MemoryFolderStore::new(&config.folder_settings_path);
        folders.insert(
            id("utilities"),
            FolderDefinition::new("Utilities", ["gedit", "calculator"]),
        );
        let settings = MemoryStrvSettings::with_strv(&config.favorites_key, ["firefox"]);
        Self {
            config,
            catalog,
            folders,
            settings,
            registry: Rc::new(FolderProxyRegistry::new()),
        }
    }

    pub fn add_folder(&self, raw: &str, name: &str) {
        self.folders
            .insert(id(raw), FolderDefinition::new(name, Vec::<String>::new()));
    }

    pub fn set_favorites(&self, ids: &[&str]) {
        let values: Vec<String> = ids.iter().map(|raw| raw.to_string()).collect();
        dash_host::StrvSettings::set_strv(&self.settings, &self.config.favorites_key, &values)
            .expect("seed favorites");
    }

    pub fn persisted(&self) -> Vec<String> {
        self.settings.snapshot(&self.config.favorites_key)
    }

    pub fn store(&self) -> FavoritesStore {
        let mut store = FavoritesStore::new(
            Rc::new(self.catalog.clone()),
            Rc::new(self.folders.clone()),
            Rc::new(self.settings.clone()),
            self.registry.clone(),
            self.config.clone(),
        );
        store.reload().expect("initial reload");
        store
    }
}
