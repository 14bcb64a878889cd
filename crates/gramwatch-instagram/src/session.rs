//! Instagram web session: login, profile resolution, and edge fetching.
//!
//! Implements the core's `PlatformSession` / `ProfileHandle` traits over a
//! blocking `reqwest` client with a cookie store. Calls block until the
//! transport resolves or errors; no additional timeout is imposed.

use crate::graphql::{build_variables, parse_follow_page, query_hash};
use gramwatch_core::run::{PlatformSession, ProfileHandle};
use gramwatch_core::{MonError, MonErrorKind, Result};
use gramwatch_core_types::{Identity, RelationKind, Sensitive};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::collections::HashSet;

const BASE_URL: &str = "https://www.instagram.com";

/// App id the web client sends with API requests.
const IG_APP_ID: &str = "936619743392459";

/// Desktop browser user agent; the API rejects unidentified clients.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

fn transport_error(kind: MonErrorKind, op: &str, err: reqwest::Error) -> MonError {
    MonError::new(kind)
        .with_op(op)
        .with_message(format!("network error: {}", err))
}

#[derive(Debug, Deserialize)]
struct SharedData {
    config: SharedConfig,
}

#[derive(Debug, Deserialize)]
struct SharedConfig {
    csrf_token: String,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    authenticated: Option<bool>,
    user: Option<bool>,
    status: String,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProfileInfoResponse {
    data: ProfileInfoData,
}

#[derive(Debug, Deserialize)]
struct ProfileInfoData {
    user: Option<ProfileInfoUser>,
}

#[derive(Debug, Deserialize)]
struct ProfileInfoUser {
    id: String,
    username: String,
}

/// One authenticated query capability against the platform.
pub struct InstagramClient {
    http: Client,
}

impl InstagramClient {
    /// Build the client. Fails only on TLS backend initialization problems.
    ///
    /// # Errors
    ///
    /// - `ExternalService` — HTTP client construction failed
    pub fn new() -> Result<Self> {
        let http = Client::builder()
            .cookie_store(true)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                MonError::new(MonErrorKind::ExternalService)
                    .with_op("build_http_client")
                    .with_message(e.to_string())
            })?;
        Ok(Self { http })
    }

    /// Bootstrap a csrf token (and session cookies) before login.
    fn fetch_csrf_token(&self) -> Result<String> {
        let shared: SharedData = self
            .http
            .get(format!("{}/data/shared_data/", BASE_URL))
            .send()
            .map_err(|e| transport_error(MonErrorKind::Auth, "fetch_csrf_token", e))?
            .error_for_status()
            .map_err(|e| transport_error(MonErrorKind::Auth, "fetch_csrf_token", e))?
            .json()
            .map_err(|e| {
                MonError::new(MonErrorKind::Serialization)
                    .with_op("fetch_csrf_token")
                    .with_message(format!("unexpected shared_data shape: {}", e))
            })?;
        Ok(shared.config.csrf_token)
    }
}

impl PlatformSession for InstagramClient {
    type Profile = InstagramProfile;

    fn login(&mut self, username: &str, password: &Sensitive<String>) -> Result<()> {
        let csrf_token = self.fetch_csrf_token()?;

        // The web login endpoint takes the password wrapped in the browser
        // envelope format with a client-side timestamp.
        let enc_password = format!(
            "#PWD_INSTAGRAM_BROWSER:0:{}:{}",
            chrono::Utc::now().timestamp(),
            password.expose()
        );

        let response: LoginResponse = self
            .http
            .post(format!("{}/accounts/login/ajax/", BASE_URL))
            .header("X-CSRFToken", &csrf_token)
            .header("Referer", format!("{}/accounts/login/", BASE_URL))
            .form(&[("username", username), ("enc_password", &enc_password)])
            .send()
            .map_err(|e| transport_error(MonErrorKind::Auth, "login", e))?
            .json()
            .map_err(|e| {
                MonError::new(MonErrorKind::Serialization)
                    .with_op("login")
                    .with_message(format!("unexpected login response shape: {}", e))
            })?;

        match response.authenticated {
            Some(true) => {
                tracing::info!(username = %username, "logged into platform");
                Ok(())
            }
            // The platform knows the user but rejected the password.
            Some(false) if response.user == Some(true) => {
                Err(MonError::new(MonErrorKind::BadCredentials)
                    .with_op("login")
                    .with_message("the platform rejected the supplied username or password"))
            }
            _ => Err(MonError::new(MonErrorKind::Auth)
                .with_op("login")
                .with_message(format!(
                    "login refused (status: {}{})",
                    response.status,
                    response
                        .message
                        .map(|m| format!(", message: {}", m))
                        .unwrap_or_default()
                ))),
        }
    }

    fn resolve_profile(&mut self, target: &Identity) -> Result<Self::Profile> {
        let response = self
            .http
            .get(format!("{}/api/v1/users/web_profile_info/", BASE_URL))
            .query(&[("username", target.as_str())])
            .header("X-IG-App-ID", IG_APP_ID)
            .send()
            .map_err(|e| transport_error(MonErrorKind::ExternalService, "resolve_profile", e))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(MonError::new(MonErrorKind::ProfileNotFound)
                .with_op("resolve_profile")
                .with_account(target.as_str())
                .with_message("no profile exists under that name"));
        }

        let info: ProfileInfoResponse = response
            .error_for_status()
            .map_err(|e| transport_error(MonErrorKind::ExternalService, "resolve_profile", e))?
            .json()
            .map_err(|e| {
                MonError::new(MonErrorKind::Serialization)
                    .with_op("resolve_profile")
                    .with_message(format!("unexpected profile response shape: {}", e))
            })?;

        let user = info.data.user.ok_or_else(|| {
            MonError::new(MonErrorKind::ProfileNotFound)
                .with_op("resolve_profile")
                .with_account(target.as_str())
                .with_message("no profile exists under that name")
        })?;

        tracing::info!(account = %user.username, user_id = %user.id, "resolved profile");
        Ok(InstagramProfile {
            http: self.http.clone(),
            user_id: user.id,
        })
    }
}

/// A resolved profile handle; fetches materialize full edge sets.
pub struct InstagramProfile {
    http: Client,
    user_id: String,
}

impl InstagramProfile {
    /// Walk every page of one follow edge and materialize the member set.
    ///
    /// Any page failure aborts the whole fetch; a partially walked edge is
    /// never returned.
    fn fetch_all(&self, kind: RelationKind) -> Result<HashSet<Identity>> {
        let mut members = HashSet::new();
        let mut after: Option<String> = None;

        loop {
            let variables = build_variables(&self.user_id, after.as_deref());
            let body = self
                .http
                .get(format!("{}/graphql/query/", BASE_URL))
                .query(&[("query_hash", query_hash(kind)), ("variables", &variables)])
                .send()
                .map_err(|e| transport_error(MonErrorKind::Fetch, "fetch_follow_edge", e))?
                .error_for_status()
                .map_err(|e| transport_error(MonErrorKind::Fetch, "fetch_follow_edge", e))?
                .text()
                .map_err(|e| transport_error(MonErrorKind::Fetch, "fetch_follow_edge", e))?;

            let page = parse_follow_page(&body, kind)?;
            members.extend(page.usernames);

            if !page.has_next_page {
                break;
            }
            match page.end_cursor {
                Some(cursor) => after = Some(cursor),
                // has_next_page without a cursor would loop forever
                None => break,
            }
        }

        tracing::debug!(relation = %kind, member_count = members.len(), "fetched follow edge");
        Ok(members)
    }
}

impl ProfileHandle for InstagramProfile {
    fn fetch_followers(&mut self) -> Result<HashSet<Identity>> {
        self.fetch_all(RelationKind::Followers)
    }

    fn fetch_followees(&mut self) -> Result<HashSet<Identity>> {
        self.fetch_all(RelationKind::Followees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enc_password_envelope_format() {
        let enc = format!("#PWD_INSTAGRAM_BROWSER:0:{}:{}", 1700000000, "pw");
        assert!(enc.starts_with("#PWD_INSTAGRAM_BROWSER:0:"));
        assert!(enc.ends_with(":pw"));
    }

    #[test]
    fn test_login_response_parses_bad_credentials_shape() {
        let body = r#"{"authenticated": false, "user": true, "status": "ok"}"#;
        let response: LoginResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.authenticated, Some(false));
        assert_eq!(response.user, Some(true));
        assert!(response.message.is_none());
    }

    #[test]
    fn test_profile_info_parses_missing_user() {
        let body = r#"{"data": {"user": null}}"#;
        let info: ProfileInfoResponse = serde_json::from_str(body).unwrap();
        assert!(info.data.user.is_none());
    }
}
