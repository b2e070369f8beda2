use chrono::Utc;
use contracts::domain::a003_bundle::aggregate::{Bundle, BundleId};
use contracts::domain::common::EntityMetadata;
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a003_bundle")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub tutor_id: String,
    pub student_id: String,
    pub lessons_json: String,
    pub hours: i32,
    pub remaining_hours: i32,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Bundle {
    fn from(m: Model) -> Self {
        let lessons = serde_json::from_str(&m.lessons_json).unwrap_or_else(|e| {
            tracing::warn!("a003_bundle {}: bad lessons_json: {}", m.id, e);
            Vec::new()
        });
        Bundle {
            id: BundleId(Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4())),
            tutor_id: m.tutor_id,
            student_id: m.student_id,
            lessons,
            hours: m.hours.max(0) as u32,
            remaining_hours: m.remaining_hours.max(0) as u32,
            metadata: EntityMetadata {
                created_at: m.created_at.unwrap_or_else(Utc::now),
                updated_at: m.updated_at.unwrap_or_else(Utc::now),
                is_deleted: m.is_deleted,
                version: m.version,
            },
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_all() -> anyhow::Result<Vec<Bundle>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .order_by_desc(Column::CreatedAt)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn insert(aggregate: &Bundle) -> anyhow::Result<Uuid> {
    let active = ActiveModel {
        id: Set(aggregate.id.value().to_string()),
        tutor_id: Set(aggregate.tutor_id.clone()),
        student_id: Set(aggregate.student_id.clone()),
        lessons_json: Set(serde_json::to_string(&aggregate.lessons)?),
        hours: Set(i32::try_from(aggregate.hours)?),
        remaining_hours: Set(i32::try_from(aggregate.remaining_hours)?),
        is_deleted: Set(aggregate.metadata.is_deleted),
        created_at: Set(Some(aggregate.metadata.created_at)),
        updated_at: Set(Some(aggregate.metadata.updated_at)),
        version: Set(aggregate.metadata.version),
    };
    active.insert(conn()).await?;
    Ok(aggregate.id.value())
}
