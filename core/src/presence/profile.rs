//! One-shot profile supplement fetch.
//!
//! Fetched once per run, independent of the realtime stream. Every failure
//! path yields `None`; the card simply renders without banner or clan.

use serde::Deserialize;
use tracing::debug;

use noisefloor_types::PresenceConfig;

use super::model::{ProfileClan, ProfileSupplement};

#[derive(Deserialize)]
struct ProfileResponse {
    #[serde(default)]
    user: Option<ProfileUser>,
}

#[derive(Deserialize)]
struct ProfileUser {
    #[serde(default)]
    banner: Option<String>,
    #[serde(default)]
    banner_color: Option<String>,
    #[serde(default)]
    clan: Option<ProfileClan>,
}

/// Fetch the supplement with a short-lived default client. Convenience
/// for callers that do not hold an HTTP client of their own.
pub async fn fetch_supplement_once(config: &PresenceConfig) -> Option<ProfileSupplement> {
    let http = match reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()
    {
        Ok(http) => http,
        Err(e) => {
            debug!("[profile] client build failed: {e}");
            return None;
        }
    };
    fetch_supplement(&http, config).await
}

/// Fetch the banner/clan supplement for the configured account.
pub async fn fetch_supplement(
    http: &reqwest::Client,
    config: &PresenceConfig,
) -> Option<ProfileSupplement> {
    let url = format!(
        "{}/{}",
        config.profile_url.trim_end_matches('/'),
        config.account_id
    );

    let response = match http.get(&url).send().await {
        Ok(response) => response,
        Err(e) => {
            debug!("[profile] request failed: {e}");
            return None;
        }
    };

    let parsed: ProfileResponse = match response.json().await {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!("[profile] unexpected body: {e}");
            return None;
        }
    };

    parsed.user.map(|user| ProfileSupplement {
        banner: user.banner,
        banner_color: user.banner_color,
        clan: user.clan,
    })
}
