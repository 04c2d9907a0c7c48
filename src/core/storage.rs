//! Keyed snapshot persistence.
//!
//! Each collection lives in one row of the `storage_blobs` table, serialized
//! as JSON under a fixed key and rewritten in full on every save. Snapshots
//! carry a format version so the stored shape can change later; bare JSON
//! arrays (unversioned snapshots) are still accepted on load.

use crate::{
    entities::{StorageBlob, storage_blob},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{Set, prelude::*};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::debug;

/// Storage key of the service catalog snapshot.
pub const SERVICES_KEY: &str = "services";
/// Storage key of the booking records snapshot.
pub const BOOKINGS_KEY: &str = "bookings";
/// Snapshot format written by this version.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Serialize)]
struct SnapshotRef<'a, T> {
    version: u32,
    items: &'a [T],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredSnapshot<T> {
    Versioned { version: u32, items: Vec<T> },
    Bare(Vec<T>),
}

/// Serializes a collection into the versioned snapshot format.
pub fn encode_snapshot<T: Serialize>(items: &[T]) -> Result<String> {
    serde_json::to_string(&SnapshotRef {
        version: SNAPSHOT_VERSION,
        items,
    })
    .map_err(Into::into)
}

/// Parses a snapshot written by [`encode_snapshot`] or a bare JSON array.
///
/// Snapshots from a newer format version are rejected rather than guessed at.
pub fn decode_snapshot<T: DeserializeOwned>(raw: &str) -> Result<Vec<T>> {
    match serde_json::from_str::<StoredSnapshot<T>>(raw)? {
        StoredSnapshot::Versioned { version, items } if version <= SNAPSHOT_VERSION => Ok(items),
        StoredSnapshot::Versioned { version, .. } => Err(Error::Config {
            message: format!(
                "Stored snapshot has version {version}, newest supported is {SNAPSHOT_VERSION}"
            ),
        }),
        StoredSnapshot::Bare(items) => Ok(items),
    }
}

/// Loads the raw snapshot stored under `key`, if any.
pub async fn load_blob<C>(db: &C, key: &str) -> Result<Option<String>>
where
    C: ConnectionTrait,
{
    let blob = StorageBlob::find()
        .filter(storage_blob::Column::Key.eq(key))
        .one(db)
        .await?;

    Ok(blob.map(|b| b.value))
}

/// Writes `value` under `key`, replacing any previous snapshot.
pub async fn save_blob<C>(db: &C, key: &str, value: String) -> Result<()>
where
    C: ConnectionTrait,
{
    let now = Utc::now().naive_utc();

    let existing = StorageBlob::find()
        .filter(storage_blob::Column::Key.eq(key))
        .one(db)
        .await?;

    if let Some(blob) = existing {
        let mut active_model: storage_blob::ActiveModel = blob.into();
        active_model.value = Set(value);
        active_model.updated_at = Set(now);
        active_model.update(db).await?;
    } else {
        let new_blob = storage_blob::ActiveModel {
            key: Set(key.to_string()),
            value: Set(value),
            updated_at: Set(now),
            ..Default::default()
        };
        new_blob.insert(db).await?;
    }

    debug!("Wrote snapshot '{key}'");
    Ok(())
}

/// Loads and decodes the collection stored under `key`.
///
/// Returns `Ok(None)` when nothing has been stored yet.
pub async fn load_collection<C, T>(db: &C, key: &str) -> Result<Option<Vec<T>>>
where
    C: ConnectionTrait,
    T: DeserializeOwned,
{
    load_blob(db, key)
        .await?
        .map(|raw| decode_snapshot(&raw))
        .transpose()
}

/// Encodes and writes a whole collection under `key`.
pub async fn save_collection<C, T>(db: &C, key: &str, items: &[T]) -> Result<()>
where
    C: ConnectionTrait,
    T: Serialize,
{
    let value = encode_snapshot(items)?;
    save_blob(db, key, value).await
}
