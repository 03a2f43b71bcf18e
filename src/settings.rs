//! Data source configuration, as persisted by the dashboard host.

use crate::error::SettingsError;
use bon::Builder;
use serde::Deserialize;
use std::time::Duration;

/// Number of retries after a failed API call, unless configured otherwise.
pub const DEFAULT_MAX_RETRIES: u32 = 1;

/// Settings for a [`crate::MeteostatDatasource`].
///
/// # Examples
///
/// ```
/// use meteostat_datasource::DatasourceSettings;
///
/// let settings = DatasourceSettings::builder()
///     .url("http://localhost:3000/api/datasources/proxy/1")
///     .api_key("secret".to_string())
///     .build();
/// assert_eq!(settings.max_retries, 1);
/// assert!(settings.timeout.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct DatasourceSettings {
    /// Base URL; requests go to `{url}/meteostat{path}`.
    #[builder(into)]
    pub url: String,
    /// Sent as the `x-api-key` header when set.
    pub api_key: Option<String>,
    #[builder(default = DEFAULT_MAX_RETRIES)]
    pub max_retries: u32,
    /// Per-request timeout applied by the HTTP transport.
    pub timeout: Option<Duration>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonData {
    max_retries: Option<u32>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SecureJsonData {
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InstanceSettings {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    json_data: Option<JsonData>,
    #[serde(default)]
    secure_json_data: Option<SecureJsonData>,
}

impl DatasourceSettings {
    /// Reads the instance settings the host stores for a data source:
    /// `{"url": …, "jsonData": {"maxRetries", "timeoutSecs"}, "secureJsonData": {"apiKey"}}`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Json`] for malformed JSON and
    /// [`SettingsError::MissingUrl`] when no non-empty `url` is present.
    pub fn from_instance_json(json: &str) -> Result<Self, SettingsError> {
        let instance: InstanceSettings = serde_json::from_str(json)?;
        let url = instance
            .url
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingUrl)?;
        let json_data = instance.json_data.unwrap_or_default();
        let api_key = instance
            .secure_json_data
            .and_then(|secure| secure.api_key)
            .filter(|key| !key.is_empty());

        Ok(Self {
            url,
            api_key,
            max_retries: json_data.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            timeout: json_data.timeout_secs.map(Duration::from_secs),
        })
    }

    /// The URL prefix of all API paths, without a trailing slash.
    pub fn api_root(&self) -> String {
        format!("{}/meteostat", self.url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_full_instance_settings() -> Result<(), SettingsError> {
        let settings = DatasourceSettings::from_instance_json(
            r#"{
                "url": "http://grafana/api/datasources/proxy/3/",
                "jsonData": {"maxRetries": 3, "timeoutSecs": 10},
                "secureJsonData": {"apiKey": "abc"}
            }"#,
        )?;

        assert_eq!(settings.max_retries, 3);
        assert_eq!(settings.timeout, Some(Duration::from_secs(10)));
        assert_eq!(settings.api_key.as_deref(), Some("abc"));
        assert_eq!(
            settings.api_root(),
            "http://grafana/api/datasources/proxy/3/meteostat"
        );
        Ok(())
    }

    #[test]
    fn applies_defaults() -> Result<(), SettingsError> {
        let settings = DatasourceSettings::from_instance_json(r#"{"url": "http://x"}"#)?;
        assert_eq!(settings.max_retries, DEFAULT_MAX_RETRIES);
        assert_eq!(settings.timeout, None);
        assert_eq!(settings.api_key, None);
        Ok(())
    }

    #[test]
    fn empty_api_key_is_ignored() -> Result<(), SettingsError> {
        let settings = DatasourceSettings::from_instance_json(
            r#"{"url": "http://x", "secureJsonData": {"apiKey": ""}}"#,
        )?;
        assert_eq!(settings.api_key, None);
        Ok(())
    }

    #[test]
    fn missing_url_is_rejected() {
        let result = DatasourceSettings::from_instance_json(r#"{"jsonData": {}}"#);
        assert!(matches!(result, Err(SettingsError::MissingUrl)));

        let result = DatasourceSettings::from_instance_json(r#"{"url": "  "}"#);
        assert!(matches!(result, Err(SettingsError::MissingUrl)));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let result = DatasourceSettings::from_instance_json("{url:");
        assert!(matches!(result, Err(SettingsError::Json(_))));
    }
}
