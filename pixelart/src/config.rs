use anyhow::{Context, Result};
use art_generator::{APIConfig, GenerateOptions};
use derivative::Derivative;
use log::debug;
use platform_dirs::AppDirs;
use serde::{Deserialize, Serialize};
use std::{
    ffi::OsString,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

pub const APP_NAME: &str = "pixelart";
pub const API_URL_ENV: &str = "PIXELART_API_URL";
pub const API_KEY_ENV: &str = "PIXELART_API_KEY";

#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct Config {
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(skip)]
    pub is_first_run: bool,

    #[serde(default)]
    pub pixelate: Pixelate,

    #[serde(default)]
    pub generator: GeneratorConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, Derivative)]
#[derivative(Default)]
#[serde(default)]
pub struct Pixelate {
    #[derivative(Default(value = "10"))]
    pub block_size: u32,

    #[derivative(Default(value = "\"pixelated-image.png\".to_string()"))]
    pub output: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Derivative)]
#[derivative(Default)]
#[serde(default)]
pub struct GeneratorConfig {
    pub api_url: String,
    pub api_key: String,

    #[derivative(Default(value = "60"))]
    pub timeout_secs: u64,

    #[derivative(Default(value = "GenerateOptions::default().prompt"))]
    pub prompt: String,

    #[derivative(Default(value = "512"))]
    pub width: u32,

    #[derivative(Default(value = "512"))]
    pub height: u32,

    #[derivative(Default(value = "1"))]
    pub seed: u64,

    #[derivative(Default(value = "\"rd_plus__default\".to_string()"))]
    pub prompt_style: String,

    #[derivative(Default(value = "0.45"))]
    pub strength: f32,

    pub tile_x: bool,
    pub tile_y: bool,
    pub remove_bg: bool,
}

impl GeneratorConfig {
    pub fn api_config(&self) -> APIConfig {
        APIConfig {
            api_url: self.api_url.clone(),
            api_key: self.api_key.clone(),
            timeout_secs: self.timeout_secs,
        }
    }

    pub fn options(&self) -> GenerateOptions {
        GenerateOptions::new()
            .with_prompt(self.prompt.clone())
            .with_width(self.width)
            .with_height(self.height)
            .with_seed(self.seed)
            .with_prompt_style(self.prompt_style.clone())
            .with_strength(self.strength)
            .with_tile_x(self.tile_x)
            .with_tile_y(self.tile_y)
            .with_remove_bg(self.remove_bg)
    }
}

impl Config {
    /// `<platform config dir>/pixelart/pixelart.toml`
    pub fn default_path() -> Result<PathBuf> {
        let app_dirs = AppDirs::new(Some(APP_NAME), true)
            .with_context(|| "can not find the platform config directory")?;

        Ok(app_dirs.config_dir.join(format!("{APP_NAME}.toml")))
    }

    /// Loads the configuration file at `path`, then applies the API
    /// credentials found in the environment.
    ///
    /// A missing file is created with the defaults. A file that fails to
    /// parse is copied to `<path>.bak` and replaced by the defaults. Any other
    /// read error is returned.
    pub fn load(path: impl AsRef<Path>) -> Result<Config> {
        let mut config = Config::load_file(path.as_ref())?;
        config.apply_overrides(
            std::env::var(API_URL_ENV).ok(),
            std::env::var(API_KEY_ENV).ok(),
        );

        debug!("config: {:?}", config.config_path);
        Ok(config)
    }

    fn load_file(path: &Path) -> Result<Config> {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)
                .with_context(|| format!("create config directory {} failed", dir.display()))?;
        }

        let mut config = match fs::read(path) {
            Ok(bytes) => match parse(&bytes) {
                Ok(c) => c,
                Err(e) => {
                    log::warn!("parse {} failed: {e}", path.display());

                    let bak_file = backup_path(path);
                    fs::copy(path, &bak_file).with_context(|| {
                        format!("backup config to {} failed", bak_file.display())
                    })?;

                    Config {
                        is_first_run: true,
                        ..Default::default()
                    }
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => Config {
                is_first_run: true,
                ..Default::default()
            },
            Err(e) => {
                return Err(e).with_context(|| format!("read {} failed", path.display()));
            }
        };

        config.config_path = path.to_path_buf();

        if config.is_first_run {
            config.save().with_context(|| "save default config failed")?;
        }

        Ok(config)
    }

    /// Environment values win over the file. Empty values are ignored.
    pub fn apply_overrides(&mut self, api_url: Option<String>, api_key: Option<String>) {
        if let Some(url) = api_url.filter(|v| !v.trim().is_empty()) {
            self.generator.api_url = url;
        }

        if let Some(key) = api_key.filter(|v| !v.trim().is_empty()) {
            self.generator.api_key = key;
        }
    }

    pub fn save(&self) -> Result<()> {
        let text = toml::to_string_pretty(self)?;
        fs::write(&self.config_path, text)
            .with_context(|| format!("write {} failed", self.config_path.display()))?;
        Ok(())
    }

    /// TOML text of the configuration with the API key masked.
    pub fn to_display_string(&self) -> Result<String> {
        let mut shown = self.clone();
        if !shown.generator.api_key.is_empty() {
            shown.generator.api_key = "********".to_string();
        }

        Ok(toml::to_string_pretty(&shown)?)
    }
}

fn parse(bytes: &[u8]) -> Result<Config> {
    let text = std::str::from_utf8(bytes)?;
    Ok(toml::from_str::<Config>(text)?)
}

/// `<path>.bak`, built on the raw OS string so non UTF-8 paths keep working.
fn backup_path(path: &Path) -> PathBuf {
    let mut bak_file = OsString::from(path.as_os_str());
    bak_file.push(".bak");
    PathBuf::from(bak_file)
}
