//! Transient user feedback contracts.

mod feedback;

pub use feedback::{
    FeedbackNotice, FeedbackPresenter, MemoryFeedbackPresenter, NoopFeedbackPresenter,
};
