//! PostgreSQL infrastructure adapters implementing the database ports.

pub mod repositories;

pub use repositories::accounts::PostgresAccountsRepository;
pub use repositories::edges::PostgresEdgesRepository;
pub use repositories::videos::PostgresVideosRepository;
