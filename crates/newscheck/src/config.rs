use anyhow::Context;
use protocol::config::ClientConfig;
use std::path::{Path, PathBuf};

pub(crate) const DEFAULT_CONFIG_PATH: &str = "config/newscheck.toml";

fn validate_client_config(config: &ClientConfig) -> anyhow::Result<()> {
    let base_url = config.base_url.trim();
    if base_url.is_empty() {
        anyhow::bail!("base_url cannot be empty");
    }
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        anyhow::bail!("base_url must start with http:// or https://, got {}", base_url);
    }
    if config.endpoint_path.trim().is_empty() {
        anyhow::bail!("endpoint_path cannot be empty");
    }
    if config.min_text_chars == 0 {
        anyhow::bail!("min_text_chars must be at least 1");
    }
    if config.request_timeout.is_zero() {
        anyhow::bail!("request_timeout must be greater than zero");
    }
    if config.connect_timeout.is_zero() {
        anyhow::bail!("connect_timeout must be greater than zero");
    }
    if config.fields.text.trim().is_empty() {
        anyhow::bail!("fields.text cannot be empty");
    }
    Ok(())
}

fn parse_client_config(raw: &str, path: &Path) -> anyhow::Result<ClientConfig> {
    let config: ClientConfig = toml::from_str(raw)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    validate_client_config(&config)?;
    Ok(config)
}

/// Loads the client config.
///
/// An explicit path must exist. Without one the default path is tried and
/// built-in defaults are used when it is absent.
pub(crate) fn load_client_config(
    path: Option<&PathBuf>,
    predict: bool,
) -> anyhow::Result<ClientConfig> {
    load_client_config_with_default(path, Path::new(DEFAULT_CONFIG_PATH), predict)
}

fn load_client_config_with_default(
    path: Option<&PathBuf>,
    default_path: &Path,
    predict: bool,
) -> anyhow::Result<ClientConfig> {
    let (path, explicit) = match path {
        Some(path) => (path.clone(), true),
        None => (default_path.to_path_buf(), false),
    };
    if !explicit && !path.exists() {
        tracing::info!(
            event = "config.defaults",
            path = %path.display(),
            "config file not found, using defaults"
        );
        return Ok(if predict {
            ClientConfig::predict_preset()
        } else {
            ClientConfig::default()
        });
    }
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let mut config = parse_client_config(&raw, &path)?;
    if predict {
        let preset = ClientConfig::predict_preset();
        config.endpoint_path = preset.endpoint_path;
        config.schema = preset.schema;
        config.fields.url = None;
    }
    Ok(config)
}

pub(crate) fn apply_base_url(
    config: &mut ClientConfig,
    base_url: Option<&str>,
) -> anyhow::Result<()> {
    if let Some(base_url) = base_url {
        config.base_url = base_url.trim().to_string();
        validate_client_config(config)?;
    }
    Ok(())
}
