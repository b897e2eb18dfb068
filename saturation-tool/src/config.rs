use anyhow::{Context, Result, bail};
use log::debug;
use once_cell::sync::Lazy;
use platform_dirs::AppDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::Mutex};

const CARGO_TOML: &str = include_str!("../Cargo.toml");
static CONFIG: Lazy<Mutex<Config>> = Lazy::new(|| Mutex::new(Config::default()));

#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct Config {
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(skip)]
    pub app_name: String,

    #[serde(default)]
    pub preference: Preference,

    #[serde(default)]
    pub editor: Editor,
}

#[derive(Serialize, Deserialize, Debug, Clone, Derivative)]
#[derivative(Default)]
#[serde(default)]
pub struct Preference {
    #[derivative(Default(value = "1000"))]
    pub win_width: u32,

    #[derivative(Default(value = "800"))]
    pub win_height: u32,

    // [10, 50]
    #[derivative(Default(value = "16"))]
    pub font_size: u32,

    pub is_dark: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Derivative)]
#[derivative(Default)]
#[serde(default)]
pub struct Editor {
    // [0, 200]
    #[derivative(Default(value = "100"))]
    pub default_saturation: i32,

    // [1, 100]
    #[derivative(Default(value = "92"))]
    pub jpeg_quality: u8,

    pub last_save_dir: String,
}

impl Config {
    pub fn init(&mut self) -> Result<()> {
        let metadata =
            toml::from_str::<toml::Table>(CARGO_TOML).with_context(|| "parse Cargo.toml failed")?;

        self.app_name = metadata
            .get("package")
            .and_then(|package| package.get("name"))
            .and_then(|name| name.as_str())
            .unwrap_or("saturation-tool")
            .to_string();

        let Some(app_dirs) = AppDirs::new(Some(&self.app_name), true) else {
            bail!("can't find application directories");
        };

        self.config_path = app_dirs.config_dir.join(format!("{}.toml", self.app_name));
        fs::create_dir_all(&app_dirs.config_dir)?;

        self.load().with_context(|| "load config file failed")?;
        debug!("{:?}", self);
        Ok(())
    }

    /// Loads the config file. A missing or unparsable file is backed up and
    /// replaced with defaults.
    fn load(&mut self) -> Result<()> {
        let text = match fs::read_to_string(&self.config_path) {
            Ok(text) => text,
            Err(_) => return self.save(),
        };

        match Self::parse(&text) {
            Ok(c) => {
                self.preference = c.preference;
                self.editor = c.editor;
                Ok(())
            }
            Err(e) => {
                log::warn!("invalid config {}: {e}", self.config_path.display());

                let mut bak_file = self.config_path.clone().into_os_string();
                bak_file.push(".bak");
                _ = fs::copy(&self.config_path, bak_file);

                self.save()
            }
        }
    }

    fn parse(text: &str) -> Result<Config> {
        let mut c = toml::from_str::<Config>(text)?;
        c.preference.font_size = c.preference.font_size.clamp(10, 50);
        c.editor.default_saturation = c.editor.default_saturation.clamp(0, 200);
        c.editor.jpeg_quality = c.editor.jpeg_quality.clamp(1, 100);
        Ok(c)
    }

    pub fn save(&self) -> Result<()> {
        match toml::to_string_pretty(self) {
            Ok(text) => Ok(fs::write(&self.config_path, text)
                .with_context(|| format!("save config to {} failed", self.config_path.display()))?),
            Err(e) => bail!(format!("convert config to toml format failed. {e:?}")),
        }
    }
}

pub fn init() -> Result<()> {
    CONFIG.lock().unwrap().init()
}

pub fn all() -> Config {
    CONFIG.lock().unwrap().clone()
}

pub fn save(conf: Config) -> Result<()> {
    let mut config = CONFIG.lock().unwrap();
    *config = conf;
    config.save()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.editor.default_saturation, 100);
        assert_eq!(config.editor.jpeg_quality, 92);
        assert!(config.editor.last_save_dir.is_empty());
        assert_eq!(config.preference.win_width, 1000);
        assert_eq!(config.preference.font_size, 16);
        assert!(!config.preference.is_dark);
    }

    #[test]
    fn test_parse_partial_config() {
        let config = Config::parse("[editor]\ndefault_saturation = 450\n").unwrap();
        assert_eq!(config.editor.default_saturation, 200);
        assert_eq!(config.editor.jpeg_quality, 92);
        assert_eq!(config.preference.win_height, 800);
        assert_eq!(config.preference.font_size, 16);
    }

    #[test]
    fn test_parse_preference() {
        let config = Config::parse("[preference]\nfont_size = 3\nis_dark = true\n").unwrap();
        assert_eq!(config.preference.font_size, 10);
        assert!(config.preference.is_dark);
        assert_eq!(config.preference.win_width, 1000);
    }

    #[test]
    fn test_load_corrupt_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("saturation-tool.toml");
        fs::write(&config_path, "editor = [not toml").unwrap();

        let mut config = Config {
            config_path: config_path.clone(),
            ..Default::default()
        };
        config.load().unwrap();

        assert!(dir.path().join("saturation-tool.toml.bak").exists());
        let saved = Config::parse(&fs::read_to_string(&config_path).unwrap()).unwrap();
        assert_eq!(saved.editor.jpeg_quality, 92);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config {
            config_path: dir.path().join("saturation-tool.toml"),
            ..Default::default()
        };
        config.editor.last_save_dir = "/tmp/exports".to_string();
        config.save().unwrap();

        let mut loaded = Config {
            config_path: config.config_path.clone(),
            ..Default::default()
        };
        loaded.load().unwrap();
        assert_eq!(loaded.editor.last_save_dir, "/tmp/exports");
    }
}
