pub mod list;
pub mod proficiencies;
