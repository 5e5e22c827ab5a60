//! Calls to the host dashboard API.

use fcast_core::{Command, DataSourceOption, ForecastResult};
use serde_json::Value;
use tracing::debug;

use super::ForecastClient;
use crate::http::{HttpBackend, Target};
use crate::models::{AdminConfig, HostDataSource};
use crate::port::map_error;
use crate::url::{admin_config_url, backend_service_url, datasources_url};

impl<B: HttpBackend> ForecastClient<B> {
    /// Read `forecasting_server` from the plugin's admin config, verbatim.
    ///
    /// A missing field reads as the empty string.
    pub(crate) async fn admin_forecasting_server(&self) -> ForecastResult<String> {
        let url = admin_config_url(&self.config.host_url, &self.config.plugin_id)
            .map_err(map_error)?;
        let config: AdminConfig = self.backend.get_json(&url).await.map_err(map_error)?;
        let server = config.forecasting_server.unwrap_or_default();
        debug!(forecasting_server = %server, "Read admin config");
        Ok(server)
    }

    pub(crate) async fn list_data_sources(&self) -> ForecastResult<Vec<DataSourceOption>> {
        let url = datasources_url(&self.config.host_url).map_err(map_error)?;
        let sources: Vec<HostDataSource> = self.backend.get_json(&url).await.map_err(map_error)?;
        debug!(count = sources.len(), "Listed host data sources");
        Ok(sources.into_iter().map(DataSourceOption::from).collect())
    }

    /// Post `command` to the plugin's backend service through the host proxy.
    ///
    /// The service token, when configured, is added to the body.
    pub(crate) async fn call_backend_service(&self, command: &Command) -> ForecastResult<Value> {
        let url = backend_service_url(&self.config.host_url, &self.config.plugin_id)
            .map_err(map_error)?;

        let mut body = command.to_body(None)?;
        if let (Some(token), Value::Object(map)) = (&self.config.service_token, &mut body) {
            map.insert("token".to_string(), Value::String(token.clone()));
        }

        debug!(command = %command, target = %Target::Host, "Calling backend service");
        self.backend
            .post_json(Target::Host, &url, &body)
            .await
            .map_err(map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::fake_client;
    use super::*;
    use crate::http::testing::{CannedResponse, FakeBackend};
    use fcast_core::ForecastError;
    use serde_json::json;

    #[tokio::test]
    async fn test_admin_config_reads_field() {
        let backend = FakeBackend::new().with_get(
            "resources/config",
            CannedResponse::Json(json!({"forecasting_server": "none"})),
        );
        let client = fake_client(backend.clone(), None);

        assert_eq!(client.admin_forecasting_server().await.unwrap(), "none");
        assert_eq!(
            backend.requests()[0].url,
            "https://grafana.example.com/api/plugins/skylineintelligence-forecasting-app/resources/config"
        );
    }

    #[tokio::test]
    async fn test_admin_config_missing_field_is_empty() {
        let backend =
            FakeBackend::new().with_get("resources/config", CannedResponse::Json(json!({})));
        let client = fake_client(backend, None);
        assert_eq!(client.admin_forecasting_server().await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_admin_config_failure_is_transport() {
        let backend =
            FakeBackend::new().with_get("resources/config", CannedResponse::Status(401));
        let client = fake_client(backend, None);
        assert_eq!(
            client.admin_forecasting_server().await.unwrap_err(),
            ForecastError::transport("Unauthorized")
        );
    }

    #[tokio::test]
    async fn test_data_sources_are_named_options() {
        let backend = FakeBackend::new().with_get(
            "api/datasources",
            CannedResponse::Json(json!([
                {"name": "Loki", "type": "loki"},
                {"name": "Prometheus", "type": "prometheus"}
            ])),
        );
        let client = fake_client(backend, None);

        let sources = client.list_data_sources().await.unwrap();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[1].value, "Prometheus");
        assert_eq!(sources[1].kind.as_deref(), Some("prometheus"));
    }

    #[tokio::test]
    async fn test_data_sources_bad_shape_is_invalid_response() {
        let backend = FakeBackend::new()
            .with_get("api/datasources", CannedResponse::Json(json!({"message": "nope"})));
        let client = fake_client(backend, None);
        assert!(matches!(
            client.list_data_sources().await,
            Err(ForecastError::InvalidResponse { .. })
        ));
    }

    #[tokio::test]
    async fn test_backend_service_carries_token_without_tenant() {
        let backend = FakeBackend::new().with_command(
            "server_query",
            CannedResponse::Json(json!("10.0.0.4:8000")),
        );
        let client = fake_client(backend.clone(), None);

        let result = client
            .call_backend_service(&Command::ServerQuery {
                domain: "grafana.example.com".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(result, json!("10.0.0.4:8000"));

        let request = &backend.requests()[0];
        assert_eq!(request.target, Some(Target::Host));
        assert_eq!(
            request.url,
            "https://grafana.example.com/api/plugin-proxy/skylineintelligence-forecasting-app/backend_service"
        );
        assert_eq!(
            request.body,
            Some(json!({
                "command": "server_query",
                "domain": "grafana.example.com",
                "token": "svc-token"
            }))
        );
    }
}
