//! Host data sources offered when creating a metric.

use serde::Serialize;

/// A data source the host exposes, as a selectable option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataSourceOption {
    pub label: String,
    pub value: String,
    /// Data source plugin type (e.g. `prometheus`), when the host reports it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl DataSourceOption {
    /// Option whose label and value are both the data source name.
    pub fn named(name: impl Into<String>, kind: Option<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            value: name,
            kind,
        }
    }
}

/// Default selection: the first Prometheus-like source, else the first one.
pub fn preferred_data_source(options: &[DataSourceOption]) -> Option<&DataSourceOption> {
    options
        .iter()
        .find(|option| option.value.to_lowercase().contains("prometheus"))
        .or_else(|| options.first())
}
