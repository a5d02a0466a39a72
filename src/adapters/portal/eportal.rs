//! Implements LoginStrategy for carriers that use the portal's `eportal` login API.
//!
//! One GET with credentials in the query string; the reply is JSONP carrying
//! `"result":"<digit>"`.

use super::http::PortalHttp;
use crate::domain::{ClientIp, FailureReason, LoginProfile, LoginResult};
use crate::ports::LoginStrategy;
use rand::Rng;
use regex::Regex;
use std::ops::Range;
use std::sync::{Arc, LazyLock};
use tracing::{debug, info, warn};
use url::form_urlencoded;

/// Account realm appended as `<account>@<realm>` for China Mobile accounts.
pub const MOBILE_REALM: &str = "zgyd";

const CALLBACK: &str = "dr1003";
const JS_VERSION: &str = "3.3.3";
const PLACEHOLDER_MAC: &str = "000000000000";

/// Range of the `v` query parameter. Only defeats caching; not a security token.
pub const CACHE_BUSTER_RANGE: Range<u16> = 1..999;

static RESULT_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""result":"(\d)""#).expect("RESULT_CODE_RE should compile"));

/// Fresh `v` value for one attempt, uniform over `CACHE_BUSTER_RANGE`.
pub fn cache_buster() -> u16 {
    rand::rng().random_range(CACHE_BUSTER_RANGE)
}

fn escape(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Full login URL. `login_url` is the endpoint up to and including `/eportal/`.
pub fn build_login_url(
    login_url: &str,
    realm: &str,
    profile: &LoginProfile,
    ip: &ClientIp,
    version: u16,
) -> String {
    format!(
        "{}?c=Portal&a=login&callback={}&login_method=1\
         &user_account=%2C0%2C{}%40{}&user_password={}\
         &wlan_user_ip={}&wlan_user_ipv6=&wlan_user_mac={}\
         &wlan_ac_ip=&wlan_ac_name=&jsVersion={}&v={}",
        login_url,
        CALLBACK,
        escape(&profile.account),
        realm,
        escape(&profile.password),
        escape(ip.as_str()),
        PLACEHOLDER_MAC,
        JS_VERSION,
        version
    )
}

/// Map a login reply body to an outcome. Only `"1"` is success, `"0"` is rejection;
/// anything else is a protocol error.
pub fn interpret_login_body(body: &str) -> LoginResult {
    let code = RESULT_CODE_RE
        .captures(body)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str());
    match code {
        Some("1") => LoginResult::Success,
        Some("0") => LoginResult::Failure(FailureReason::InvalidCredentials),
        _ => LoginResult::Failure(FailureReason::ProtocolError),
    }
}

/// `eportal` login for one account realm.
pub struct EportalLogin {
    http: Arc<PortalHttp>,
    realm: &'static str,
}

impl EportalLogin {
    pub fn new(http: Arc<PortalHttp>, realm: &'static str) -> Self {
        Self { http, realm }
    }

    /// China Mobile (`@zgyd`) accounts.
    pub fn mobile(http: Arc<PortalHttp>) -> Self {
        Self::new(http, MOBILE_REALM)
    }
}

#[async_trait::async_trait]
impl LoginStrategy for EportalLogin {
    async fn login(&self, profile: &LoginProfile, ip: &ClientIp) -> LoginResult {
        let version = cache_buster();
        let url = build_login_url(self.http.login_url(), self.realm, profile, ip, version);
        debug!(
            carrier = %profile.carrier,
            realm = self.realm,
            ip = %ip,
            v = version,
            "sending portal login request"
        );

        let res = match self.http.client().get(&url).send().await {
            Ok(res) => res,
            Err(e) => {
                // reqwest errors may embed the URL; keep the password out of the log.
                warn!(error = %e.without_url(), "login request failed");
                return LoginResult::Failure(FailureReason::NetworkError);
            }
        };

        if !res.status().is_success() {
            warn!(status = %res.status(), "login endpoint returned error status");
            return LoginResult::Failure(FailureReason::NetworkError);
        }

        let body = match res.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e.without_url(), "failed to read login response");
                return LoginResult::Failure(FailureReason::NetworkError);
            }
        };

        let result = interpret_login_body(&body);
        match result {
            LoginResult::Success => info!(account = %profile.account, "portal login accepted"),
            LoginResult::Failure(reason) => {
                info!(account = %profile.account, ?reason, "portal login not accepted");
                debug!(body = %body.chars().take(200).collect::<String>(), "login reply");
            }
        }
        result
    }
}
