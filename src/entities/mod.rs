//! Entity module - Contains the SeaORM entity definitions for the database.
//! Booking records and service offerings are not tables of their own; they are
//! stored as whole-collection snapshots in the `storage_blobs` table.

pub mod storage_blob;

pub use storage_blob::{
    Column as StorageBlobColumn, Entity as StorageBlob, Model as StorageBlobModel,
};
