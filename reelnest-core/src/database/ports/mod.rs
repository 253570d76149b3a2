//! Repository ports (interfaces) for the entity store.
//!
//! Domain services only ever talk to these traits; the Postgres adapter lives
//! under `database::infrastructure::postgres` and the in-process adapter under
//! `database::infrastructure::memory`.

pub mod accounts;
pub mod edges;
pub mod videos;
