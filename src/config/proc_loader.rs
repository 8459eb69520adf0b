use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use regex::Regex;
use tracing::{debug, error, info};

use crate::cache::credential::Credential;
use crate::client::Client;
use crate::config::proc_validator;
use crate::config::settings::{ClientConfig, LoggingConfig, ServiceConfig};

/// Load and validate config from YAML file
pub async fn file_to_config(path: &Path) -> Result<ServiceConfig> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("read config '{}'", path.display()))?;

    let expanded = expand_env_vars(&content);
    parse_config(expanded)
}

pub fn parse_config(content: String) -> Result<ServiceConfig> {
    let mut service_config: ServiceConfig = serde_yaml::from_str(&content)
        .inspect_err(|e| error!("parse config error: {}", e))?;

    // Apply defaults
    if service_config.logging.is_none() {
        service_config.logging = Some(LoggingConfig::default());
    }
    debug!("validation config ...");
    proc_validator::validate_service_config(&service_config).map_err(|errors| {
        anyhow!(
            "config is not valid, total errors: {}\n{}",
            errors.len(),
            errors.join("\n")
        )
    })?;

    Ok(service_config)
}

/// `${VAR}` and `${VAR:default}` are replaced from the process environment.
pub fn expand_env_vars(input: &str) -> String {
    let re = Regex::new(r"\$\{(\w+)(?::([^\}]+))?\}").expect("static regex");
    re.replace_all(input, |caps: &regex::Captures| {
        let var = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        std::env::var(var).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}

/// Builds a [`Client`] from config, seeding it with the persisted credential
/// when the credential file exists.
pub async fn build_client(config: &ClientConfig) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(base_url) = &config.base_url {
        builder = builder.base_url(base_url);
    }
    if let Some(timeout_ms) = config.timeout_ms {
        builder = builder.timeout(Duration::from_millis(timeout_ms));
    }
    if let (Some(client_id), Some(client_secret)) = (&config.client_id, &config.client_secret) {
        builder = builder.client_id_and_secret(client_id, client_secret);
    }
    if let Some(path) = &config.credential_file {
        if let Some(credential) = read_credential(Path::new(path)).await? {
            info!("using credential from '{}'", path);
            builder = builder.credential(credential);
        }
    }
    Ok(builder.build()?)
}

pub async fn read_credential(path: &Path) -> Result<Option<Credential>> {
    if !tokio::fs::try_exists(path).await? {
        return Ok(None);
    }
    let content = tokio::fs::read_to_string(path).await?;
    let credential = serde_json::from_str(&content)
        .with_context(|| format!("invalid credential file '{}'", path.display()))?;
    Ok(Some(credential))
}

/// Writes through a temporary file so readers never see a partial credential.
pub async fn write_credential(path: &Path, credential: &Credential) -> Result<()> {
    let tmp = path.with_extension("tmp");
    tokio::fs::write(&tmp, serde_json::to_vec_pretty(credential)?).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}
