use std::any::type_name_of_val;
use std::fmt;
use std::sync::Arc;

use crate::database::infrastructure::memory::InMemoryEntityStore;
use crate::database::ports::{
    accounts::AccountsRepository, edges::EdgesRepository,
    videos::VideosRepository,
};
#[cfg(feature = "database")]
use crate::database::{
    infrastructure::postgres::{
        PostgresAccountsRepository, PostgresEdgesRepository,
        PostgresVideosRepository,
    },
    postgres::PostgresDatabase,
};

/// Aggregates the repository ports used by the domain services.
///
/// Cheap to clone; every field is a shared handle onto the same store.
#[derive(Clone)]
pub struct AppUnitOfWork {
    pub accounts: Arc<dyn AccountsRepository>,
    pub videos: Arc<dyn VideosRepository>,
    pub edges: Arc<dyn EdgesRepository>,
}

impl fmt::Debug for AppUnitOfWork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppUnitOfWork")
            .field("accounts", &type_name_of_val(self.accounts.as_ref()))
            .field("videos", &type_name_of_val(self.videos.as_ref()))
            .field("edges", &type_name_of_val(self.edges.as_ref()))
            .finish()
    }
}

impl AppUnitOfWork {
    /// Every port backed by one fresh [`InMemoryEntityStore`].
    pub fn in_memory() -> Self {
        Self::from_memory(Arc::new(InMemoryEntityStore::new()))
    }

    pub fn from_memory(store: Arc<InMemoryEntityStore>) -> Self {
        Self {
            accounts: store.clone(),
            videos: store.clone(),
            edges: store,
        }
    }
}

#[derive(Default)]
pub struct AppUnitOfWorkBuilder {
    accounts: Option<Arc<dyn AccountsRepository>>,
    videos: Option<Arc<dyn VideosRepository>>,
    edges: Option<Arc<dyn EdgesRepository>>,
}

impl fmt::Debug for AppUnitOfWorkBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppUnitOfWorkBuilder")
            .field("accounts", &self.accounts.is_some())
            .field("videos", &self.videos.is_some())
            .field("edges", &self.edges.is_some())
            .finish()
    }
}

impl AppUnitOfWorkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_accounts(mut self, repo: Arc<dyn AccountsRepository>) -> Self {
        self.accounts = Some(repo);
        self
    }
    pub fn with_videos(mut self, repo: Arc<dyn VideosRepository>) -> Self {
        self.videos = Some(repo);
        self
    }
    pub fn with_edges(mut self, repo: Arc<dyn EdgesRepository>) -> Self {
        self.edges = Some(repo);
        self
    }

    /// Build a validated AppUnitOfWork. Returns a string error naming the
    /// first missing repository.
    pub fn build(self) -> Result<AppUnitOfWork, String> {
        Ok(AppUnitOfWork {
            accounts: self
                .accounts
                .ok_or_else(|| "missing AccountsRepository".to_string())?,
            videos: self
                .videos
                .ok_or_else(|| "missing VideosRepository".to_string())?,
            edges: self
                .edges
                .ok_or_else(|| "missing EdgesRepository".to_string())?,
        })
    }
}

#[cfg(feature = "database")]
impl AppUnitOfWork {
    /// Convenience helper to compose all Postgres-backed repositories into a unit of work.
    pub fn from_postgres(db: Arc<PostgresDatabase>) -> Result<Self, String> {
        AppUnitOfWorkBuilder::new().with_postgres(db).build()
    }
}

#[cfg(feature = "database")]
impl AppUnitOfWorkBuilder {
    /// Populate the builder with Postgres-backed repository adapters.
    pub fn with_postgres(mut self, db: Arc<PostgresDatabase>) -> Self {
        let pool = db.pool().clone();

        let accounts: Arc<dyn AccountsRepository> =
            Arc::new(PostgresAccountsRepository::new(pool.clone()));
        self.accounts = Some(accounts);

        let videos: Arc<dyn VideosRepository> =
            Arc::new(PostgresVideosRepository::new(pool.clone()));
        self.videos = Some(videos);

        let edges: Arc<dyn EdgesRepository> =
            Arc::new(PostgresEdgesRepository::new(pool));
        self.edges = Some(edges);

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_reports_the_missing_port() {
        let store = Arc::new(InMemoryEntityStore::new());
        let err = AppUnitOfWorkBuilder::new()
            .with_accounts(store.clone())
            .with_edges(store)
            .build()
            .unwrap_err();
        assert_eq!(err, "missing VideosRepository");
    }

    #[test]
    fn debug_lists_every_port() {
        let rendered = format!("{:?}", AppUnitOfWork::in_memory());
        for port in ["AccountsRepository", "VideosRepository", "EdgesRepository"] {
            assert!(rendered.contains(port), "{rendered}");
        }
    }
}
