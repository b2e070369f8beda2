pub mod api;
pub mod ui;

use crate::shared::list_utils::{Searchable, Sortable};
use contracts::domain::a001_tutor::aggregate::Tutor;
use contracts::domain::common::AggregateId;
use std::cmp::Ordering;

impl Searchable for Tutor {
    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn search_key(&self) -> String {
        self.id.as_string()
    }
}

impl Sortable for Tutor {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "email" => self.email.cmp(&other.email),
            "proficiencies" => self.proficiency_count().cmp(&other.proficiency_count()),
            _ => self.name.to_lowercase().cmp(&other.name.to_lowercase()),
        }
    }
}
