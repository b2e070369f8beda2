pub mod a001_tutor;
pub mod a002_proficiency;
pub mod a003_bundle;
pub mod a004_student;
pub mod common;
