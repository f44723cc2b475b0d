use std::rc::Rc;

use dash_host::{AppInfo, EntityId};

use crate::menu::FolderMenu;

/// Capability surface shared by everything the dock can show.
///
/// Code that only needs an entity's identity takes `&dyn LaunchableEntity` instead of matching on
/// whether it is an application or a folder.
pub trait LaunchableEntity {
    /// Entity id.
    fn id(&self) -> &EntityId;

    /// Whether the entity only stands in for an unmatched running window.
    fn is_window_backed(&self) -> bool;

    /// String form of [`LaunchableEntity::id`].
    fn get_id(&self) -> &str {
        self.id().as_str()
    }
}

impl LaunchableEntity for AppInfo {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn is_window_backed(&self) -> bool {
        self.window_backed
    }
}

/// Identity stand-in giving an app folder the same capability surface as an application.
///
/// Proxies are only created by [`crate::proxy::FolderProxyRegistry`], which hands out one shared
/// instance per folder id, so `Rc::ptr_eq` is a valid identity test.
#[derive(Debug, PartialEq, Eq)]
pub struct FolderProxy {
    id: EntityId,
}

impl FolderProxy {
    pub(crate) fn new(id: EntityId) -> Self {
        Self { id }
    }
}

impl LaunchableEntity for FolderProxy {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn is_window_backed(&self) -> bool {
        false
    }
}

/// One resolved favorites entry.
#[derive(Debug, Clone)]
pub enum DockEntity {
    /// Installed application resolved through the catalog.
    App(Rc<AppInfo>),
    /// App folder backed by its registry proxy.
    Folder(Rc<FolderProxy>),
}

impl DockEntity {
    /// True for app-folder entries.
    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder(_))
    }

    /// Returns the backing folder proxy, if this entry is a folder.
    pub fn folder(&self) -> Option<&Rc<FolderProxy>> {
        match self {
            Self::Folder(proxy) => Some(proxy),
            Self::App(_) => None,
        }
    }

    /// True when both entries name the same id with the same backing kind.
    pub fn same_entity(&self, other: &DockEntity) -> bool {
        match (self, other) {
            (Self::App(a), Self::App(b)) => a.id == b.id,
            (Self::Folder(a), Self::Folder(b)) => Rc::ptr_eq(a, b) || a.id() == b.id(),
            _ => false,
        }
    }
}

impl LaunchableEntity for DockEntity {
    fn id(&self) -> &EntityId {
        match self {
            Self::App(app) => &app.id,
            Self::Folder(proxy) => proxy.id(),
        }
    }

    fn is_window_backed(&self) -> bool {
        match self {
            Self::App(app) => app.window_backed,
            Self::Folder(_) => false,
        }
    }
}

impl PartialEq for DockEntity {
    fn eq(&self, other: &Self) -> bool {
        self.same_entity(other)
    }
}

impl Eq for DockEntity {}

/// Insertion point for a new favorite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockPosition {
    /// After the last favorite.
    Append,
    /// Before the favorite currently at this index.
    At(usize),
}

impl DockPosition {
    /// Maps the shell's raw index convention (`-1` appends) onto a position.
    pub fn from_raw(raw: i32) -> Self {
        usize::try_from(raw).map_or(Self::Append, Self::At)
    }

    /// Resolves to a concrete insertion index, clamping past-the-end positions to append.
    pub fn index_in(self, len: usize) -> usize {
        match self {
            Self::Append => len,
            Self::At(index) => index.min(len),
        }
    }
}

/// Reconciler-assigned handle of one view instance; never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    /// The app grid enumerating every available entity.
    Grid,
    /// The dock showing favorites only.
    Dock,
}

/// Container a view instance is mounted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewParent {
    /// A page of the app grid; the view draws its own icon label.
    GridPage,
    /// A dock slot, which owns the hover label.
    DockSlot,
}

impl ViewParent {
    pub fn for_surface(surface: SurfaceKind) -> Self {
        match surface {
            SurfaceKind::Grid => Self::GridPage,
            SurfaceKind::Dock => Self::DockSlot,
        }
    }
}

/// Which side of the icon a popup menu's arrow points from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuSide {
    Bottom,
    Left,
}

/// Source of a drag hovering over the app grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragSource {
    /// A rendered application icon.
    App(EntityId),
    /// Anything else; today only folder icons dragged off the dock.
    Folder(EntityId),
}

impl DragSource {
    pub fn id(&self) -> &EntityId {
        match self {
            Self::App(id) | Self::Folder(id) => id,
        }
    }
}

/// Surface-scoped rendering of one entity.
#[derive(Debug, Clone)]
pub struct ViewInstance {
    pub id: ViewId,
    pub entity: DockEntity,
    pub surface: SurfaceKind,
    pub parent: ViewParent,
    /// Label drawn under the icon (grid views only).
    pub icon_label: Option<String>,
    /// Hover label owned by the dock slot (dock views only).
    pub slot_label: Option<String>,
    /// Forced highlight while a context menu is up.
    pub highlighted: bool,
    pub hovered: bool,
    /// Lazily built context menu; folders only.
    pub menu: Option<FolderMenu>,
    /// Grid placeholders are scaled in and never counted as live items.
    pub placeholder: bool,
}

impl ViewInstance {
    pub fn entity_id(&self) -> &EntityId {
        self.entity.id()
    }

    /// Label currently shown for the view, wherever it is drawn.
    pub fn label(&self) -> Option<&str> {
        self.slot_label.as_deref().or(self.icon_label.as_deref())
    }

    pub fn menu_is_open(&self) -> bool {
        self.menu.as_ref().is_some_and(FolderMenu::is_open)
    }
}
