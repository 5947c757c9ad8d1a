//! Anonymous session bootstrap.

use crate::error::Result;
use crate::publish::client::{PlatformClient, check_status};
use crate::publish::session::CookieJar;
use reqwest::Method;
use reqwest::header::{ACCEPT, CACHE_CONTROL};

/// Loads the team listing page and returns the session cookies it sets.
///
/// The returned jar is the initial cookie set of the run. A response that
/// sets no cookies yields an empty jar.
pub async fn fetch_session_cookies(client: &PlatformClient, team_id: &str) -> Result<CookieJar> {
    let url = client.team_files_url(team_id)?;
    log::debug!("GET {}", url);

    let response = client
        .http()
        .get(url)
        .header(
            ACCEPT,
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .header(CACHE_CONTROL, "max-age=0")
        .send()
        .await?;
    let response = check_status(&Method::GET, response).await?;

    let cookies = CookieJar::from_set_cookie(response.headers());
    log::info!("Session bootstrapped with {} cookie(s)", cookies.len());
    Ok(cookies)
}
