//! Domain layer entry modules.

pub mod accounts;
pub mod engagement;
pub mod error;
pub mod publication;
pub mod relations;
/// Demo accounts and videos for local development
pub mod seed;
pub mod social;
pub mod validation;
pub mod videos;

pub use accounts::AccountService;
pub use engagement::{EngagementAction, EngagementService};
pub use error::{RelationError, RelationResult};
pub use publication::{PublicationEvent, PublicationService, PublicationState};
pub use relations::RelationResolver;
pub use social::SocialGraphService;
pub use validation::ValidationError;
pub use videos::VideoService;
