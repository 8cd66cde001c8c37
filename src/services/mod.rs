pub mod group_service;
pub mod identity_client;
pub mod sso_client;
