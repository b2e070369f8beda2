use contracts::domain::a002_proficiency::aggregate::{Proficiency, ProficiencyCatalog};
use sea_orm::entity::prelude::*;
use sea_orm::{EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::shared::data::db::get_connection;

/// One syllabus row; subjects with their grades live in `subjects_json`
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_proficiency")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub name: String,
    pub position: i32,
    pub subjects_json: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Proficiency {
    fn from(m: Model) -> Self {
        let subjects = serde_json::from_str(&m.subjects_json).unwrap_or_else(|e| {
            tracing::warn!("a002_proficiency '{}': bad subjects_json: {}", m.name, e);
            Default::default()
        });
        Proficiency {
            name: m.name,
            subjects,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Whole catalog in display order
pub async fn load_catalog() -> anyhow::Result<ProficiencyCatalog> {
    let proficiencies = Entity::find()
        .order_by_asc(Column::Position)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(ProficiencyCatalog::new(proficiencies))
}

/// Insert or replace one syllabus
pub async fn save(proficiency: &Proficiency, position: i32) -> anyhow::Result<()> {
    let subjects_json = serde_json::to_string(&proficiency.subjects)?;
    let exists = Entity::find_by_id(proficiency.name.clone())
        .one(conn())
        .await?
        .is_some();
    let active = ActiveModel {
        name: Set(proficiency.name.clone()),
        position: Set(position),
        subjects_json: Set(subjects_json),
    };
    if exists {
        active.update(conn()).await?;
    } else {
        active.insert(conn()).await?;
    }
    Ok(())
}
