use super::repository;
use contracts::domain::a002_proficiency::aggregate::{Proficiency, ProficiencyCatalog};

pub async fn catalog() -> anyhow::Result<ProficiencyCatalog> {
    repository::load_catalog().await
}

/// Demo catalog seeded by `POST /api/proficiency/testdata`
pub fn demo_catalog() -> ProficiencyCatalog {
    ProficiencyCatalog::new(vec![
        Proficiency::new("Cambridge")
            .with_subject("Mathematics", &["IGCSE", "AS", "A2"])
            .with_subject("Physics", &["IGCSE", "AS", "A2"])
            .with_subject("Chemistry", &["IGCSE", "AS", "A2"])
            .with_subject("English Literature", &["IGCSE", "AS"]),
        Proficiency::new("Edexcel")
            .with_subject("Mathematics", &["GCSE", "AS", "A Level"])
            .with_subject("Further Mathematics", &["AS", "A Level"])
            .with_subject("Biology", &["GCSE", "AS", "A Level"]),
        Proficiency::new("IB")
            .with_subject("Mathematics AA", &["SL", "HL"])
            .with_subject("Physics", &["SL", "HL"])
            .with_subject("Economics", &["SL", "HL"]),
    ])
}

/// Write the demo catalog; existing syllabi of the same name are replaced
pub async fn insert_test_data() -> anyhow::Result<()> {
    for (position, proficiency) in demo_catalog().proficiencies.iter().enumerate() {
        repository::save(proficiency, position as i32).await?;
    }
    tracing::info!("a002_proficiency: demo catalog written");
    Ok(())
}
