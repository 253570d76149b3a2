use std::{fmt, sync::Arc};

use reelnest_core::application::unit_of_work::AppUnitOfWork;
use reelnest_core::database::PostgresDatabase;
use reelnest_core::domain::{
    AccountService, EngagementService, PublicationService, SocialGraphService,
    VideoService,
};

use crate::auth::{AuthCrypto, TokenIssuer};
use crate::infra::config::Config;

/// Shared handler state. Every service is wired onto the same unit of work.
#[derive(Clone)]
pub struct AppState {
    pub unit_of_work: Arc<AppUnitOfWork>,
    /// Present when the ports are backed by PostgreSQL; used by health checks.
    pub postgres: Option<Arc<PostgresDatabase>>,
    pub config: Arc<Config>,
    pub auth_crypto: Arc<AuthCrypto>,
    pub tokens: Arc<TokenIssuer>,
    pub accounts: AccountService,
    pub videos: VideoService,
    pub social: SocialGraphService,
    pub engagement: EngagementService,
    pub publication: PublicationService,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("postgres", &self.postgres.is_some())
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(
        unit_of_work: Arc<AppUnitOfWork>,
        config: Arc<Config>,
        auth_crypto: Arc<AuthCrypto>,
    ) -> Self {
        let tokens = Arc::new(TokenIssuer::new(
            &config.auth.token_secret,
            config.auth.token_ttl_secs,
        ));

        Self {
            accounts: AccountService::new(&unit_of_work),
            videos: VideoService::new(&unit_of_work),
            social: SocialGraphService::new(&unit_of_work),
            engagement: EngagementService::new(&unit_of_work),
            publication: PublicationService::new(&unit_of_work),
            unit_of_work,
            postgres: None,
            config,
            auth_crypto,
            tokens,
        }
    }

    pub fn with_postgres(mut self, postgres: Arc<PostgresDatabase>) -> Self {
        self.postgres = Some(postgres);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
