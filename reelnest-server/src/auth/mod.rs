pub mod crypto;
pub mod jwt;
pub mod middleware;

pub use crypto::{AuthCrypto, AuthCryptoError};
pub use jwt::{Claims, TokenIssuer};
pub use middleware::{AuthenticatedAccount, auth_middleware};
