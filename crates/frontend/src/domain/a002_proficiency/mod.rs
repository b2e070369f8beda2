pub mod api;
pub mod service;

use crate::shared::list_utils::Searchable;
use contracts::domain::a002_proficiency::aggregate::{Proficiency, Subject};

impl Searchable for Proficiency {
    fn display_name(&self) -> String {
        self.name.clone()
    }
}

impl Searchable for Subject {
    fn display_name(&self) -> String {
        self.name.clone()
    }
}
