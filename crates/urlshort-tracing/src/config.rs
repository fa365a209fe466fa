//! Tracing configuration types.

use serde::Deserialize;

/// Configuration for the tracing subsystem.
#[derive(Debug, Clone, Deserialize)]
pub struct TracingConfig {
    /// The service name reported to the OTLP collector.
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// OTLP collector endpoint (e.g. "http://localhost:4317").
    /// When `None`, OTLP export is disabled and only fmt logging is used.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,

    /// Transport protocol for OTLP export.
    #[serde(default)]
    pub protocol: OtlpProtocol,

    /// Log level filter (e.g. "info", "urlshort=debug,tower_http=debug").
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// OTLP transport protocol.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OtlpProtocol {
    #[default]
    Grpc,
    Http,
}

fn default_service_name() -> String {
    "urlshort".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            otlp_endpoint: None,
            protocol: OtlpProtocol::default(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_section_uses_defaults() {
        let config: TracingConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.service_name, "urlshort");
        assert_eq!(config.otlp_endpoint, None);
        assert_eq!(config.protocol, OtlpProtocol::Grpc);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_protocol_is_lowercase() {
        let config: TracingConfig =
            serde_json::from_str(r#"{"protocol": "http", "otlp_endpoint": "http://collector:4318"}"#)
                .unwrap();
        assert_eq!(config.protocol, OtlpProtocol::Http);
        assert_eq!(config.otlp_endpoint.as_deref(), Some("http://collector:4318"));
    }
}
