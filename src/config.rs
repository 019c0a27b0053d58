use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const API_KEY_VAR: &str = "AZURE_API_KEY";
pub const ENDPOINT_VAR: &str = "AZURE_ENDPOINT";

/// The `[llm]` table of `$XDG_CONFIG_HOME/llama/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,

    /// Command whose trimmed stdout is the API key, e.g.
    /// `["op", "read", "op://vault/azure/key"]`.
    #[serde(default)]
    pub api_key_command: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    llm: FileConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Config error: {0}")]
    Config(#[from] xdg::BaseDirectoriesError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error deserializing TOML: {0}")]
    Read(#[from] toml::de::Error),

    #[error("API key command failed: {0}")]
    ApiKeyCommand(String),

    #[error("AZURE_API_KEY environment variable not set")]
    MissingApiKey,
}

impl FileConfig {
    /// Reads the config file if there is one.
    pub fn read() -> Result<Option<Self>, Error> {
        let Some(path) = Self::path()? else {
            return Ok(None);
        };
        log::debug!("Reading config from {}", path.display());
        let toml = std::fs::read_to_string(path)?;
        Ok(Some(Self::parse(&toml)?))
    }

    pub fn parse(toml: &str) -> Result<Self, Error> {
        let file: ConfigFile = toml::from_str(toml)?;
        Ok(file.llm)
    }

    fn path() -> Result<Option<PathBuf>, Error> {
        Ok(xdg::BaseDirectories::with_prefix("llama")?.find_config_file("config.toml"))
    }

    fn run_api_key_command(&self) -> Result<Option<String>, Error> {
        let Some((bin, args)) = self.api_key_command.split_first() else {
            return Ok(None);
        };
        let output = std::process::Command::new(bin).args(args).output()?;
        if !output.status.success() {
            return Err(Error::ApiKeyCommand(format!("{bin} exited with {}", output.status)));
        }
        let api_key = String::from_utf8(output.stdout)
            .map_err(|e| Error::ApiKeyCommand(e.to_string()))?
            .trim()
            .to_string();

        Ok(Some(api_key).filter(|k| !k.is_empty()))
    }
}

/// Environment lookup that treats empty variables as unset.
pub fn from_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Builds the client configuration. Environment variables take precedence
/// over the config file; the endpoint falls back to
/// [`llm::DEFAULT_ENDPOINT`], the API key has no fallback.
pub fn resolve(
    env: impl Fn(&str) -> Option<String>,
    file: Option<FileConfig>,
) -> Result<llm::Config, Error> {
    let file = file.unwrap_or_default();

    let endpoint = env(ENDPOINT_VAR)
        .or_else(|| file.endpoint.clone())
        .unwrap_or_else(|| llm::DEFAULT_ENDPOINT.to_string());

    let api_key = match env(API_KEY_VAR).or_else(|| file.api_key.clone()) {
        Some(key) => key,
        None => file.run_api_key_command()?.ok_or(Error::MissingApiKey)?,
    };

    Ok(llm::Config::new(endpoint, api_key))
}
