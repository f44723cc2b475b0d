use std::{cell::RefCell, rc::Rc};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A transient overview message, optionally offering an undo button.
pub struct FeedbackNotice {
    /// Already formatted message text.
    pub message: String,
    /// Whether the presenter should offer an undo affordance.
    pub undoable: bool,
}

/// Host sink for transient feedback messages.
///
/// Showing a notice replaces any notice currently on screen. When the user presses undo the host
/// routes that back to the runtime; the presenter itself never mutates favorites.
pub trait FeedbackPresenter {
    /// Shows (or replaces) the current feedback notice.
    fn show(&self, notice: &FeedbackNotice);

    /// Hides the current feedback notice, if any.
    fn hide(&self);
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op feedback presenter for headless hosts.
pub struct NoopFeedbackPresenter;

impl FeedbackPresenter for NoopFeedbackPresenter {
    fn show(&self, _notice: &FeedbackNotice) {}

    fn hide(&self) {}
}

#[derive(Debug, Clone, Default)]
/// Presenter that records every notice and tracks the one currently shown.
pub struct MemoryFeedbackPresenter {
    shown: Rc<RefCell<Vec<FeedbackNotice>>>,
    current: Rc<RefCell<Option<FeedbackNotice>>>,
}

impl MemoryFeedbackPresenter {
    /// Returns every notice shown so far, oldest first.
    pub fn history(&self) -> Vec<FeedbackNotice> {
        self.shown.borrow().clone()
    }

    /// Returns the notice currently on screen.
    pub fn current(&self) -> Option<FeedbackNotice> {
        self.current.borrow().clone()
    }
}

impl FeedbackPresenter for MemoryFeedbackPresenter {
    fn show(&self, notice: &FeedbackNotice) {
        self.shown.borrow_mut().push(notice.clone());
        *self.current.borrow_mut() = Some(notice.clone());
    }

    fn hide(&self) {
        self.current.borrow_mut().take();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn memory_presenter_replaces_current_and_keeps_history() {
        let presenter = MemoryFeedbackPresenter::default();
        let first = FeedbackNotice {
            message: "Utilities has been pinned to the dash.".to_string(),
            undoable: true,
        };
        let second = FeedbackNotice {
            message: "Utilities has been unpinned from the dash.".to_string(),
            undoable: true,
        };
        presenter.show(&first);
        presenter.show(&second);
        assert_eq!(presenter.current(), Some(second.clone()));
        assert_eq!(presenter.history(), vec![first, second]);

        presenter.hide();
        assert_eq!(presenter.current(), None);
    }
}
