//! Reelnest core: the relationship and engagement state manager behind the
//! social video backend.
//!
//! Accounts follow each other and publish videos that other accounts like and
//! favorite. This crate owns the rules for those edges and the publication
//! lifecycle that gates engagement. Storage is reached only through the
//! repository ports in [`database::ports`].
//!
//! ```no_run
//! use reelnest_core::application::unit_of_work::AppUnitOfWork;
//! use reelnest_core::domain::social::SocialGraphService;
//! use reelnest_model::AccountID;
//!
//! # async fn demo(follower: AccountID, target: AccountID) -> Result<(), Box<dyn std::error::Error>> {
//! let unit_of_work = AppUnitOfWork::in_memory();
//! let social = SocialGraphService::new(&unit_of_work);
//! let target = social.follow(follower, target).await?;
//! assert!(target.is_followed_by(follower));
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Request-scoped service wiring over the repository ports
pub mod application;

/// Repository ports and the adapters implementing them
pub mod database;

/// Relationship, engagement and publication rules
pub mod domain;

/// Store-level error types
pub mod error;

#[cfg(feature = "database")]
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub use error::{Result, StoreError};
