use chrono::Utc;
use contracts::domain::a001_tutor::aggregate::{Tutor, TutorId};
use contracts::domain::common::EntityMetadata;
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_tutor")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub proficiencies_json: String,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Tutor {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        let proficiencies = serde_json::from_str(&m.proficiencies_json).unwrap_or_else(|e| {
            tracing::warn!("a001_tutor {}: bad proficiencies_json: {}", m.id, e);
            Default::default()
        });

        Tutor {
            id: TutorId(uuid),
            name: m.name,
            email: m.email,
            proficiencies,
            metadata,
        }
    }
}

fn to_active(aggregate: &Tutor) -> anyhow::Result<ActiveModel> {
    Ok(ActiveModel {
        id: Set(aggregate.id.value().to_string()),
        name: Set(aggregate.name.clone()),
        email: Set(aggregate.email.clone()),
        proficiencies_json: Set(serde_json::to_string(&aggregate.proficiencies)?),
        is_deleted: Set(aggregate.metadata.is_deleted),
        created_at: Set(Some(aggregate.metadata.created_at)),
        updated_at: Set(Some(aggregate.metadata.updated_at)),
        version: Set(aggregate.metadata.version),
    })
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_all() -> anyhow::Result<Vec<Tutor>> {
    let mut items: Vec<Tutor> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Tutor>> {
    let result = Entity::find_by_id(id.to_string())
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &Tutor) -> anyhow::Result<Uuid> {
    to_active(aggregate)?.insert(conn()).await?;
    Ok(aggregate.id.value())
}

pub async fn update(aggregate: &Tutor) -> anyhow::Result<()> {
    let mut active = to_active(aggregate)?;
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(conn()).await?;
    Ok(())
}
