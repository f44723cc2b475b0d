//! Folder context menu state machine.
//!
//! Each folder view owns at most one [`FolderMenu`], built on the first secondary click and reused
//! afterwards. The menu's single action is recomputed from favorite membership every time it
//! opens, so a reused menu never offers a stale pin/unpin choice.

use crate::{
    config::DashConfig,
    model::{MenuSide, SurfaceKind, ViewInstance},
};

/// Pointer button that opens a folder's context menu.
pub const SECONDARY_BUTTON: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Pin the folder at the end of the dock.
    Pin,
    /// Unpin the folder.
    Unpin,
}

/// Whether an input event was consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPropagation {
    Stop,
    Propagate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderMenu {
    state: MenuState,
    action: MenuAction,
    label: String,
    side: MenuSide,
    ignore_release: bool,
}

impl FolderMenu {
    fn new() -> Self {
        Self {
            state: MenuState::Closed,
            action: MenuAction::Pin,
            label: String::new(),
            side: MenuSide::Left,
            ignore_release: false,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == MenuState::Open
    }

    pub fn action(&self) -> MenuAction {
        self.action
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn side(&self) -> MenuSide {
        self.side
    }

    fn refresh(&mut self, is_favorite: bool, config: &DashConfig) {
        if is_favorite {
            self.action = MenuAction::Unpin;
            self.label = config.unpin_label.clone();
            self.side = MenuSide::Bottom;
        } else {
            self.action = MenuAction::Pin;
            self.label = config.pin_label.clone();
            self.side = MenuSide::Left;
        }
    }
}

/// Opens (building on first use) the folder menu of `view`.
///
/// Returns `false` for application views, which keep the host's own menu. Opening forces the
/// view highlighted and arms release suppression.
pub fn open_menu(view: &mut ViewInstance, is_favorite: bool, config: &DashConfig) -> bool {
    if !view.entity.is_folder() || view.placeholder {
        return false;
    }
    let menu = view.menu.get_or_insert_with(FolderMenu::new);
    menu.refresh(is_favorite, config);
    menu.state = MenuState::Open;
    menu.ignore_release = true;
    view.highlighted = true;
    true
}

/// Closes the menu of `view` if it is open, clearing the forced highlight.
pub fn close_menu(view: &mut ViewInstance) -> bool {
    let Some(menu) = view.menu.as_mut().filter(|menu| menu.is_open()) else {
        return false;
    };
    menu.state = MenuState::Closed;
    menu.ignore_release = false;
    view.highlighted = false;
    true
}

/// Routes a button press: the secondary button on a folder opens its menu and is consumed.
pub fn handle_button_press(
    view: &mut ViewInstance,
    button: u32,
    is_favorite: bool,
    config: &DashConfig,
) -> EventPropagation {
    if button == SECONDARY_BUTTON && open_menu(view, is_favorite, config) {
        EventPropagation::Stop
    } else {
        EventPropagation::Propagate
    }
}

/// Swallows the release that follows the opening press so it is not read as activation.
pub fn handle_release(view: &mut ViewInstance) -> EventPropagation {
    match view.menu.as_mut() {
        Some(menu) if menu.is_open() || menu.ignore_release => {
            menu.ignore_release = false;
            EventPropagation::Stop
        }
        _ => EventPropagation::Propagate,
    }
}

/// Dock folder hover labels only show while hovered and no menu is up.
pub fn should_show_tooltip(view: &ViewInstance) -> bool {
    view.surface == SurfaceKind::Dock && view.hovered && !view.menu_is_open()
}
