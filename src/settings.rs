use std::path::PathBuf;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use tokio::fs;

const CONFIG_DIR: &str = "borrowdesk";
const CONFIG_FILE: &str = "config.toml";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Settings {
    pub server: String,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            server: "http://localhost:5000".to_owned(),
        }
    }
}

impl Settings {
    /// Reads the config file, writing the defaults first if none exists yet
    /// so the user has something to edit.
    pub async fn load() -> anyhow::Result<Settings> {
        let path = config_path()?;
        if !path.exists() {
            let settings = Settings::default();
            settings.save().await?;
            return Ok(settings);
        }

        let contents = fs::read_to_string(&path).await?;
        Ok(toml::from_str(&contents)?)
    }

    pub async fn save(&self) -> anyhow::Result<()> {
        let path = config_path()?;
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir).await?;
            }
        }

        let data = toml::to_string_pretty(self)?;
        fs::write(&path, data).await?;
        Ok(())
    }
}

fn config_path() -> anyhow::Result<PathBuf> {
    let mut dir = dirs::config_dir().ok_or(anyhow!("No config dir"))?;
    dir.push(CONFIG_DIR);
    dir.push(CONFIG_FILE);
    Ok(dir)
}
