//! Bundle creation modal
//!
//! - view_model.rs: form state (person selectors, cascading lesson rows) and submit
//! - view.rs: Leptos component (pure UI)

mod view;
mod view_model;

pub use view::BundleCreate;
pub use view_model::{BundleCreateViewModel, BundleForm, LessonRow};
