//! Core domain crate for the classroom platform: entities, the domain
//! store with its uniqueness invariants, translation lookup, the
//! session gate, roster import and persistence helpers.

pub mod config;
pub mod entity;
pub mod error;
pub mod i18n;
pub mod models;
pub mod roster;
pub mod seed;
pub mod session;
pub mod storage;
pub mod store;

pub use error::{Result, StoreError};
pub use store::Store;
