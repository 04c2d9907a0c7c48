//! Storage blob entity - one serialized collection snapshot per key.
//!
//! The store never updates individual records in the database: every mutation
//! rewrites the whole snapshot stored under the collection's key.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Storage blob database model - a keyed JSON snapshot
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "storage_blobs")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Storage key (e.g., `"bookings"`)
    #[sea_orm(unique)]
    pub key: String,
    /// Serialized snapshot of the whole collection
    #[sea_orm(column_type = "Text")]
    pub value: String,
    /// When the snapshot was last rewritten
    pub updated_at: DateTime,
}

/// `StorageBlob` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
