use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const MAX_RECENT_ROSTERS: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub appearance: AppearanceConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub roster: RosterConfig,
    #[serde(default)]
    pub dispatch: DispatchConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppearanceConfig {
    /// Stroke color of the name box, as `#rrggbb`.
    #[serde(default = "default_box_color")]
    pub box_color: String,
    #[serde(default = "default_box_stroke_width")]
    pub box_stroke_width: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailConfig {
    #[serde(default = "default_subject")]
    pub default_subject: String,
    #[serde(default = "default_body")]
    pub default_body: String,
    /// Token replaced by the recipient's name in subject and body.
    #[serde(default = "default_name_placeholder")]
    pub name_placeholder: String,
    /// Shown in the preview until a roster with an email column is loaded.
    #[serde(default = "default_fallback_recipient")]
    pub fallback_recipient: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Header names (case-insensitive) that identify the name column.
    #[serde(default = "default_name_columns")]
    pub name_columns: Vec<String>,
    #[serde(default = "default_email_columns")]
    pub email_columns: Vec<String>,
    #[serde(default)]
    pub recent_rosters: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Delay of the simulated mailer per message.
    #[serde(default = "default_simulated_delay_ms")]
    pub simulated_delay_ms: u64,
}

// Default value functions
fn default_box_color() -> String {
    "#ff0000".to_string()
}

fn default_box_stroke_width() -> f32 {
    2.0
}

fn default_subject() -> String {
    "Your certificate awaits!".to_string()
}

fn default_body() -> String {
    "Hey Full_Name!\n\
     We are thrilled to inform you that you have successfully completed the session. \
     Your participation and enthusiasm made the event a great success!\n\n\
     Thank you for being a part of the session.\n\n\
     Best Regards"
        .to_string()
}

fn default_name_placeholder() -> String {
    "Full_Name".to_string()
}

fn default_fallback_recipient() -> String {
    "recipient@example.com".to_string()
}

fn default_name_columns() -> Vec<String> {
    ["full_name", "full name", "name"].map(String::from).to_vec()
}

fn default_email_columns() -> Vec<String> {
    ["email", "e-mail", "email_address", "mail"].map(String::from).to_vec()
}

fn default_simulated_delay_ms() -> u64 {
    300
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            box_color: default_box_color(),
            box_stroke_width: default_box_stroke_width(),
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            default_subject: default_subject(),
            default_body: default_body(),
            name_placeholder: default_name_placeholder(),
            fallback_recipient: default_fallback_recipient(),
        }
    }
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            name_columns: default_name_columns(),
            email_columns: default_email_columns(),
            recent_rosters: Vec::new(),
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            simulated_delay_ms: default_simulated_delay_ms(),
        }
    }
}

/// Get the path to the config file
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let dirs =
        directories::ProjectDirs::from("", "", "certmailer").ok_or(ConfigError::NoConfigDir)?;
    Ok(dirs.config_dir().join("config.toml"))
}

/// Load configuration from the default location, falling back to defaults
/// on any problem.
pub fn load_config() -> AppConfig {
    let path = match config_path() {
        Ok(path) => path,
        Err(e) => {
            log::warn!("{e}. Using defaults.");
            return AppConfig::default();
        }
    };
    if !path.exists() {
        return AppConfig::default();
    }
    match read_config(&path) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("{}: {e}. Using defaults.", path.display());
            AppConfig::default()
        }
    }
}

pub fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Save configuration to the default location
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    write_config(&config_path()?, config)
}

pub fn write_config(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(config)?)?;
    Ok(())
}

/// Add a roster path to the front of the recent list
pub fn add_recent_roster(config: &mut AppConfig, path: String) {
    let recent = &mut config.roster.recent_rosters;
    recent.retain(|p| p != &path);
    recent.insert(0, path);
    recent.truncate(MAX_RECENT_ROSTERS);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: AppConfig = toml::from_str("[dispatch]\nsimulated_delay_ms = 5\n").unwrap();
        assert_eq!(config.dispatch.simulated_delay_ms, 5);
        assert_eq!(config.email, EmailConfig::default());
        assert_eq!(config.appearance.box_color, "#ff0000");
    }

    #[test]
    fn write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = AppConfig::default();
        config.email.default_subject = "Certificate".into();

        write_config(&path, &config).unwrap();
        assert_eq!(read_config(&path).unwrap(), config);
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[email\n").unwrap();
        assert!(matches!(read_config(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn recent_rosters_are_deduplicated_and_capped() {
        let mut config = AppConfig::default();
        for i in 0..12 {
            add_recent_roster(&mut config, format!("r{i}.csv"));
        }
        add_recent_roster(&mut config, "r5.csv".into());
        let recent = &config.roster.recent_rosters;
        assert_eq!(recent.len(), MAX_RECENT_ROSTERS);
        assert_eq!(recent[0], "r5.csv");
        assert_eq!(recent.iter().filter(|p| *p == "r5.csv").count(), 1);
    }
}
