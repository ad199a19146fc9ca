use crate::codec::{self, EncodeOptions};
use crate::error::{QrKitError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub default_width: u32,
    pub default_margin: u32,
    pub foreground: String,
    pub background: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| QrKitError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("qr-kit").join("config.json"))
    }

    /// 設定とCLI指定からエンコードオプションを組み立てる
    pub fn encode_options(
        &self,
        width: Option<u32>,
        margin: Option<u32>,
        fg: Option<&str>,
        bg: Option<&str>,
    ) -> Result<EncodeOptions> {
        Ok(EncodeOptions {
            width: width.unwrap_or(self.default_width),
            margin: margin.unwrap_or(self.default_margin),
            foreground: codec::parse_color(fg.unwrap_or(&self.foreground))?,
            background: codec::parse_color(bg.unwrap_or(&self.background))?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_width: 300,
            default_margin: 4,
            foreground: "#000000".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }
}
