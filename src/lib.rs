pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use error::{ClientError, PrincipalNotFound};
pub use models::principal::{ChangeSet, PrincipalId, PrincipalKind, PrincipalRef, Target};
pub use services::group_service::update_group;
pub use services::identity_client::IdentityClient;
pub use services::sso_client::SsoAdminClient;
