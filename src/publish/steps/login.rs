//! Account login with a one-time code.

use crate::error::{PublishError, Result};
use crate::publish::client::{PlatformClient, check_status, read_json};
use crate::publish::config::Credentials;
use crate::publish::session::{CookieJar, basic_headers};
use crate::publish::totp;
use crate::publish::types::{LoginRequest, LoginResponse};
use reqwest::Method;
use reqwest::header::REFERER;

/// Session state every call after login carries.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub cookies: CookieJar,
    pub user_id: String,
}

impl AuthenticatedSession {
    pub fn headers(&self) -> reqwest::header::HeaderMap {
        basic_headers(&self.cookies, Some(&self.user_id))
    }
}

/// Exchanges credentials and a fresh one-time code for an authenticated
/// session.
///
/// Cookies issued by the login response are appended to `cookies`. The code
/// is generated once; an expired code fails the run.
pub async fn login(
    client: &PlatformClient,
    credentials: &Credentials,
    mut cookies: CookieJar,
) -> Result<AuthenticatedSession> {
    let code = totp::generate_now(credentials.totp_secret())?;
    let url = client.login_url()?;
    let referer = client.login_page_url()?;
    log::debug!("POST {}", url);

    let body = LoginRequest {
        totp_key: &code,
        email: credentials.email(),
        password: credentials.password(),
        password_retype: credentials.password(),
        username: credentials.email(),
    };

    let response = client
        .http()
        .post(url.clone())
        .headers(basic_headers(&cookies, None))
        .header(REFERER, referer.as_str())
        .json(&body)
        .send()
        .await?;
    let response = check_status(&Method::POST, response).await?;

    cookies.extend(CookieJar::from_set_cookie(response.headers()));
    let login: LoginResponse = read_json(url.path(), response).await?;
    if login.error {
        return Err(PublishError::invalid_response(
            url.path(),
            format!("login rejected (status {:?})", login.status),
        ));
    }

    log::info!("Logged in as user {}", login.meta.id);
    Ok(AuthenticatedSession {
        cookies,
        user_id: login.meta.id,
    })
}
