pub mod api;

use crate::shared::list_utils::Searchable;
use contracts::domain::a004_student::aggregate::Student;
use contracts::domain::common::AggregateId;

impl Searchable for Student {
    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn search_key(&self) -> String {
        self.id.as_string()
    }
}
