//! Team API over HTTP using reqwest

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;

use super::{ApiError, TeamApi};
use crate::config::ApiConfig;
use crate::team::TeamRecord;

#[derive(Serialize)]
struct CreateTeamRequest<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct JoinTeamRequest<'a> {
    secret_key: &'a str,
    name: &'a str,
}

/// [`TeamApi`] backed by a REST endpoint
///
/// | operation | request |
/// |---|---|
/// | get_user_team | `GET {base}/team` |
/// | create_team | `POST {base}/team` |
/// | join_team | `POST {base}/team/join` |
/// | update_team | `PUT {base}/team` |
/// | leave_team | `POST {base}/team/leave` |
pub struct HttpTeamApi {
    client: Client,
    base_url: String,
    token: Option<String>,
    user_agent: String,
}

impl HttpTeamApi {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = config
            .base_url
            .clone()
            .ok_or_else(|| ApiError::InvalidUrl { url: String::new() })?;
        reqwest::Url::parse(&base_url).map_err(|_| ApiError::InvalidUrl {
            url: base_url.clone(),
        })?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::Request {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            user_agent: config.user_agent.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn prepare(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header("User-Agent", &self.user_agent);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        self.prepare(request)
            .send()
            .await
            .map_err(|e| ApiError::Request {
                message: e.to_string(),
            })
    }

    /// Map a response status onto accepted / rejected
    ///
    /// Only the codes the team server uses for a refused request count as a
    /// rejection; auth failures and anything else unexpected are errors.
    fn accepted(status: StatusCode) -> Result<bool, ApiError> {
        tracing::debug!(status = status.as_u16(), "team API responded");
        match status {
            status if status.is_success() => Ok(true),
            StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
                Ok(false)
            }
            status => Err(ApiError::Status {
                status: status.as_u16(),
            }),
        }
    }
}

#[async_trait]
impl TeamApi for HttpTeamApi {
    async fn get_user_team(&self) -> Result<Option<TeamRecord>, ApiError> {
        let response = self.send(self.client.get(self.url("/team"))).await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                response
                    .json::<Option<TeamRecord>>()
                    .await
                    .map_err(|e| ApiError::Decode {
                        message: e.to_string(),
                    })
            }
            status => Err(ApiError::Status {
                status: status.as_u16(),
            }),
        }
    }

    async fn create_team(&self, name: &str) -> Result<bool, ApiError> {
        let request = self
            .client
            .post(self.url("/team"))
            .json(&CreateTeamRequest { name });
        let response = self.send(request).await?;
        Self::accepted(response.status())
    }

    async fn join_team(&self, secret_key: &str, team_name: &str) -> Result<bool, ApiError> {
        let request = self.client.post(self.url("/team/join")).json(&JoinTeamRequest {
            secret_key,
            name: team_name,
        });
        let response = self.send(request).await?;
        Self::accepted(response.status())
    }

    async fn update_team(&self, record: &TeamRecord) -> Result<bool, ApiError> {
        let request = self.client.put(self.url("/team")).json(record);
        let response = self.send(request).await?;
        Self::accepted(response.status())
    }

    async fn leave_team(&self) -> Result<bool, ApiError> {
        let response = self.send(self.client.post(self.url("/team/leave"))).await?;
        Self::accepted(response.status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> ApiConfig {
        ApiConfig {
            base_url: Some(url.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let api = HttpTeamApi::new(&config("http://localhost:8000/api/")).unwrap();
        assert_eq!(api.url("/team"), "http://localhost:8000/api/team");
    }

    #[test]
    fn test_status_mapping() {
        assert!(HttpTeamApi::accepted(StatusCode::OK).unwrap());
        assert!(HttpTeamApi::accepted(StatusCode::NO_CONTENT).unwrap());
        assert!(!HttpTeamApi::accepted(StatusCode::CONFLICT).unwrap());
        assert!(!HttpTeamApi::accepted(StatusCode::BAD_REQUEST).unwrap());
        assert!(!HttpTeamApi::accepted(StatusCode::UNPROCESSABLE_ENTITY).unwrap());

        for status in [
            StatusCode::UNAUTHORIZED,
            StatusCode::FORBIDDEN,
            StatusCode::NOT_FOUND,
            StatusCode::TOO_MANY_REQUESTS,
            StatusCode::BAD_GATEWAY,
        ] {
            assert!(matches!(
                HttpTeamApi::accepted(status),
                Err(ApiError::Status { status: code }) if code == status.as_u16()
            ));
        }
    }

    #[test]
    fn test_missing_base_url() {
        let result = HttpTeamApi::new(&ApiConfig::default());
        assert!(matches!(result, Err(ApiError::InvalidUrl { .. })));
    }

    #[test]
    fn test_unparseable_base_url() {
        let result = HttpTeamApi::new(&config("not a url"));
        assert!(matches!(result, Err(ApiError::InvalidUrl { .. })));
    }
}
