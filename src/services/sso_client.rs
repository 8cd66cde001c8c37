use crate::config::{SsoConf, get_log_target};
use crate::error::ClientError;
use crate::models::principal::{PrincipalId, PrincipalKind, PrincipalRef};
use crate::services::identity_client::IdentityClient;
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::Serialize;

/// `IdentityClient` over the SSO admin REST API.
pub struct SsoAdminClient {
    client: Client,
    base_url: Url,
    token: String,
    domain: String,
    user_agent: String,
}

#[derive(Serialize)]
struct GroupDetails<'a> {
    description: &'a str,
}

impl SsoAdminClient {
    pub fn new(conf: &SsoConf) -> Result<Self, ClientError> {
        let base_url = Url::parse(&conf.base_url)
            .map_err(|e| ClientError::Url(format!("{}: {}", conf.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Url(conf.base_url.clone()));
        }
        Ok(Self {
            client: Client::new(),
            base_url,
            token: conf.token.clone(),
            domain: conf.domain.clone(),
            user_agent: conf.user_agent.clone(),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Url(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(target:get_log_target(), "{} {}", method, url);
        self.client
            .request(method, url)
            .bearer_auth(&self.token)
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT, "application/json")
    }

    async fn find_principal(
        &self,
        kind: PrincipalKind,
        name: &str,
    ) -> Result<Option<PrincipalRef>, ClientError> {
        let (name, domain) = split_principal_name(name, &self.domain)?;
        let collection = match kind {
            PrincipalKind::User => "users",
            PrincipalKind::Group => "groups",
        };
        let url = self.endpoint(&[collection])?;
        let response = self
            .request(Method::GET, url)
            .query(&[("name", name), ("domain", domain)])
            .send()
            .await?;
        // The search answers with the matching principals; absence is an empty list.
        let matches: Vec<PrincipalId> = check_status(response).await?.json().await?;
        match matches.into_iter().next() {
            Some(id) => Ok(Some(PrincipalRef { kind, id })),
            None => {
                info!(target:get_log_target(), "SSO service has no {} '{}@{}'", kind, name, domain);
                Ok(None)
            }
        }
    }
}

async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    warn!(target:get_log_target(), "SSO service returned error {}: {}", status, message);
    Err(ClientError::Status { status, message })
}

/// Splits a trailing `@domain` off `name`, falling back to `default_domain`.
/// Anything else in the name is left for the service to judge.
pub fn split_principal_name<'a>(
    name: &'a str,
    default_domain: &'a str,
) -> Result<(&'a str, &'a str), ClientError> {
    let (user, domain) = name.rsplit_once('@').unwrap_or((name, default_domain));
    if user.is_empty() || domain.is_empty() {
        return Err(ClientError::InvalidName(name.to_string()));
    }
    Ok((user, domain))
}

#[async_trait]
impl IdentityClient for SsoAdminClient {
    async fn update_group_description(&self, group: &str, description: &str) -> anyhow::Result<()> {
        let url = self.endpoint(&["groups", group])?;
        let response = self
            .request(Method::PATCH, url)
            .json(&GroupDetails { description })
            .send()
            .await
            .map_err(ClientError::from)?;
        check_status(response).await?;
        Ok(())
    }

    async fn find_user_by_name(&self, name: &str) -> anyhow::Result<Option<PrincipalRef>> {
        Ok(self.find_principal(PrincipalKind::User, name).await?)
    }

    async fn find_group_by_name(&self, name: &str) -> anyhow::Result<Option<PrincipalRef>> {
        Ok(self.find_principal(PrincipalKind::Group, name).await?)
    }

    async fn add_principal_to_group(
        &self,
        group: &str,
        principal: &PrincipalRef,
    ) -> anyhow::Result<()> {
        let collection = match principal.kind {
            PrincipalKind::User => "users",
            PrincipalKind::Group => "groups",
        };
        let url = self.endpoint(&["groups", group, collection])?;
        let response = self
            .request(Method::POST, url)
            .json(&principal.id)
            .send()
            .await
            .map_err(ClientError::from)?;
        check_status(response).await?;
        Ok(())
    }

    async fn remove_principal_from_group(
        &self,
        group: &str,
        principal: &PrincipalRef,
    ) -> anyhow::Result<()> {
        let url = self.endpoint(&["groups", group, "members"])?;
        let response = self
            .request(Method::DELETE, url)
            .json(principal)
            .send()
            .await
            .map_err(ClientError::from)?;
        check_status(response).await?;
        Ok(())
    }
}
