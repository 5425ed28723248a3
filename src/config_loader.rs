use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub struct ClinsightConfig {
    /// Directory holding the sled prediction store
    pub data_dir: String,
    /// Directory holding the pre-trained model artifacts
    pub model_dir: String,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(serde::Serialize)]
struct ClinsightConfigDefaults {
    data_dir: String,
    model_dir: String,
    #[serde(default)]
    server: ServerConfig,
}

pub fn load_config() -> Result<ClinsightConfig, figment::Error> {
    let figment = Figment::from(Serialized::defaults(ClinsightConfigDefaults {
        data_dir: "data/predictions".into(),
        model_dir: "models".into(),
        server: ServerConfig::default(),
    }))
    .merge(Toml::file("clinsight.toml"))
    .merge(Env::prefixed("CLINSIGHT_").split("__"));

    let config: ClinsightConfig = figment.extract()?;

    if config.model_dir.trim().is_empty() {
        return Err(figment::Error::from("model_dir must be set".to_string()));
    }
    if config.data_dir.trim().is_empty() {
        return Err(figment::Error::from("data_dir must be set".to_string()));
    }

    Ok(config)
}
