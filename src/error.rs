use crate::models::principal::PrincipalKind;
use thiserror::Error;

/// A named add/remove target did not resolve to a principal of the expected kind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} {name:?} not found")]
pub struct PrincipalNotFound {
    pub kind: PrincipalKind,
    pub name: String,
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid SSO URL: {0}")]
    Url(String),

    #[error("Invalid principal name {0:?}")]
    InvalidName(String),

    #[error("SSO service returned {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },
}
