//! Configuration validation with aggregated errors.

use tracing::{error, info};
use url::Url;

use crate::config::settings::{ClientConfig, LoggingConfig, ServiceConfig};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Returns Ok(()) or Err(Vec<String>) containing all issues.
pub fn validate_service_config(cfg: &ServiceConfig) -> Result<(), Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    validate_client(&cfg.client, &mut errors);
    if let Some(logging) = &cfg.logging {
        validate_logging(logging, &mut errors);
    }

    if errors.is_empty() {
        info!("config valid");
        Ok(())
    } else {
        error!("configuration validation errors ({}):", errors.len());
        for e in &errors {
            error!(" - {}", e);
        }
        Err(errors)
    }
}

fn validate_client(client: &ClientConfig, errors: &mut Vec<String>) {
    if let Some(base_url) = &client.base_url {
        match Url::parse(base_url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => errors.push(format!(
                "client.base_url '{}' must use http or https, got '{}'",
                base_url,
                url.scheme()
            )),
            Err(e) => errors.push(format!("client.base_url '{}' is invalid: {}", base_url, e)),
        }
    }

    if client.timeout_ms == Some(0) {
        errors.push("client.timeout_ms must be greater than 0".to_owned());
    }

    let has_id = client.client_id.as_deref().is_some_and(|v| !v.is_empty());
    let has_secret = client.client_secret.as_deref().is_some_and(|v| !v.is_empty());
    if has_id != has_secret {
        errors.push("client.client_id and client.client_secret must be set together".to_owned());
    }
    if !has_id && !has_secret && client.credential_file.is_none() {
        errors.push(
            "client: either client_id/client_secret or credential_file must be provided".to_owned(),
        );
    }
}

fn validate_logging(logging: &LoggingConfig, errors: &mut Vec<String>) {
    if !LOG_LEVELS.contains(&logging.level.to_lowercase().as_str()) {
        errors.push(format!(
            "logging.level '{}' must be one of {}",
            logging.level,
            LOG_LEVELS.join(", ")
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::LogFormat;

    fn config(client: ClientConfig) -> ServiceConfig {
        ServiceConfig {
            client,
            logging: Some(LoggingConfig::new("info".to_owned(), LogFormat::Compact)),
        }
    }

    #[test]
    fn id_and_secret_is_valid() {
        let cfg = config(ClientConfig {
            client_id: Some("id".to_owned()),
            client_secret: Some("secret".to_owned()),
            ..Default::default()
        });
        assert!(validate_service_config(&cfg).is_ok());
    }

    #[test]
    fn credential_file_alone_is_valid() {
        let cfg = config(ClientConfig {
            credential_file: Some("/tmp/credential.json".to_owned()),
            ..Default::default()
        });
        assert!(validate_service_config(&cfg).is_ok());
    }

    #[test]
    fn no_authentication_is_invalid() {
        let mut cfg = config(ClientConfig::default());
        cfg.logging = Some(LoggingConfig::new("verbose".to_owned(), LogFormat::Json));
        let errors = validate_service_config(&cfg).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("credential_file"));
        assert!(errors[1].contains("logging.level"));
    }
}
