pub mod infrastructure;
pub mod ports;

#[cfg(feature = "database")]
#[cfg_attr(docsrs, doc(cfg(feature = "database")))]
pub mod postgres;

#[cfg(feature = "database")]
pub use postgres::{PoolStats, PostgresDatabase};
