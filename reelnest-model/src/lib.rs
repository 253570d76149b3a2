//! Core data model definitions shared across Reelnest crates.
#![allow(missing_docs)]

pub mod account;
pub mod engagement;
pub mod error;
pub mod ids;
pub mod video;

pub use account::{
    Account, AccountSummary, AccountWithRelations, NewAccount, Role,
};
pub use engagement::EngagementKind;
pub use error::{ModelError, Result as ModelResult};
pub use ids::{AccountID, VideoID};
pub use video::{
    NewVideo, Video, VideoPatch, VideoRef, VideoSummary, VideoWithRelations,
};
