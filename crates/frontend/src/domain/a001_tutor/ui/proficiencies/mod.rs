//! Tutor proficiency screen
//!
//! - view_model.rs: selection store, catalog binding and the save command
//! - view.rs: Leptos component (pure UI)

mod view;
mod view_model;

pub use view::TutorProficiencies;
pub use view_model::{subject_candidates, TutorProficienciesViewModel};
