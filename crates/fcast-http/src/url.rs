//! URL builders for the host API and the forecasting server.

use fcast_core::ServerAddress;
use url::Url;

use crate::error::HttpResult;

/// Parse the host base URL, making sure relative joins keep its path.
pub fn host_base(host_url: &str) -> HttpResult<Url> {
    let trimmed = host_url.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    Ok(Url::parse(&with_slash)?)
}

/// `api/plugins/<plugin_id>/resources/config`
pub fn admin_config_url(base: &Url, plugin_id: &str) -> HttpResult<Url> {
    Ok(base.join(&format!(
        "api/plugins/{}/resources/config",
        urlencoding::encode(plugin_id)
    ))?)
}

/// `api/datasources`
pub fn datasources_url(base: &Url) -> HttpResult<Url> {
    Ok(base.join("api/datasources")?)
}

/// `api/plugin-proxy/<plugin_id>/backend_service`
pub fn backend_service_url(base: &Url, plugin_id: &str) -> HttpResult<Url> {
    Ok(base.join(&format!(
        "api/plugin-proxy/{}/backend_service",
        urlencoding::encode(plugin_id)
    ))?)
}

/// The forecasting server endpoint, `http://` added when no scheme is given.
pub fn server_url(address: &ServerAddress) -> HttpResult<Url> {
    Ok(Url::parse(&address.endpoint())?)
}
