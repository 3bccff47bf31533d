//! Core record types for sfmig.
//!
//! Records are ordered field maps exchanged with CRM sandboxes. This crate
//! holds the shapes every other crate agrees on: [`Record`], [`IdSet`],
//! [`SObjectType`], the fixture [`RecordBuilder`] and the business-key helpers
//! used to keep concurrent test runs from colliding.

pub mod builder;
pub mod error;
pub mod id;
pub mod keys;
pub mod record;

pub use builder::RecordBuilder;
pub use error::{CoreError, ErrorCategory, Result};
pub use id::generate_record_id;
pub use keys::{
    Clock, SystemClock, UniqueKeyGenerator, build_unique_email, build_unique_key,
    FAKE_MAIL_SERVER,
};
pub use record::{ID_FIELD, IdSet, Record, RecordBatch, SObjectType, ids_of};
