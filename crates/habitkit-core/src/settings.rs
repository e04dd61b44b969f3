//! TOML-based application settings.
//!
//! Stores the user preferences the engine consumes as parameters:
//! - week start day for trend bucket alignment
//! - measurement system for unit resolution
//! - whether onboarding has been completed
//!
//! Settings are stored at `~/.config/habitkit/config.toml`. The engine
//! never reads this file itself; callers load it and thread the values
//! into statistics and unit-resolver calls.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::calendar::Weekday;
use crate::error::ConfigError;
use crate::storage::data_dir;
use crate::units::MeasurementSystem;

/// Application settings.
///
/// Serialized to/from TOML at `~/.config/habitkit/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub has_completed_onboarding: bool,
    /// ISO weekday the display week starts on (1=Monday .. 7=Sunday).
    #[serde(default = "default_week_start_day")]
    pub week_start_day: u8,
    #[serde(default)]
    pub measurement_system: MeasurementSystem,
}

fn default_week_start_day() -> u8 {
    1
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            has_completed_onboarding: false,
            week_start_day: default_week_start_day(),
            measurement_system: MeasurementSystem::Metric,
        }
    }
}

impl Settings {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/habitkit"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// The configured week start as a typed weekday, falling back to
    /// Monday if the stored number is out of range.
    pub fn week_start(&self) -> Weekday {
        Weekday::from_iso(self.week_start_day).unwrap_or(Weekday::Monday)
    }

    /// Check stored values are in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=7).contains(&self.week_start_day) {
            return Err(ConfigError::InvalidValue {
                key: "week_start_day".to_string(),
                message: format!("{} is outside 1..=7", self.week_start_day),
            });
        }
        Ok(())
    }

    /// Load from disk, writing and returning the defaults when no file
    /// exists yet.
    ///
    /// # Errors
    /// Returns an error if an existing file cannot be parsed or holds
    /// out-of-range values.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let settings: Settings =
                    toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                        path: path.clone(),
                        message: e.to_string(),
                    })?;
                settings.validate()?;
                Ok(settings)
            }
            Err(_) => {
                let settings = Self::default();
                settings.save()?;
                Ok(settings)
            }
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Read one settings value by key, as a display string.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "has_completed_onboarding" => Some(self.has_completed_onboarding.to_string()),
            "week_start_day" => Some(self.week_start_day.to_string()),
            "measurement_system" => Some(self.measurement_system.as_str().to_string()),
            _ => None,
        }
    }

    /// Update one settings value by key from its string form.
    ///
    /// # Errors
    /// Returns an error for an unknown key or an unparseable value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "has_completed_onboarding" => {
                self.has_completed_onboarding =
                    value.parse().map_err(|_| ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: format!("cannot parse '{value}' as bool"),
                    })?;
            }
            "week_start_day" => {
                let day: u8 = value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("cannot parse '{value}' as weekday number"),
                })?;
                if Weekday::from_iso(day).is_none() {
                    return Err(ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: format!("{day} is outside 1..=7"),
                    });
                }
                self.week_start_day = day;
            }
            "measurement_system" => {
                self.measurement_system =
                    MeasurementSystem::parse(value).ok_or_else(|| ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: format!("unknown measurement system '{value}'"),
                    })?;
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert!(!settings.has_completed_onboarding);
        assert_eq!(settings.week_start_day, 1);
        assert_eq!(settings.measurement_system, MeasurementSystem::Metric);
        assert_eq!(settings.week_start(), Weekday::Monday);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn toml_round_trip() {
        let mut settings = Settings::default();
        settings.week_start_day = 7;
        settings.measurement_system = MeasurementSystem::Us;
        let text = toml::to_string_pretty(&settings).unwrap();
        let decoded: Settings = toml::from_str(&text).unwrap();
        assert_eq!(decoded.week_start_day, 7);
        assert_eq!(decoded.measurement_system, MeasurementSystem::Us);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let decoded: Settings = toml::from_str("").unwrap();
        assert_eq!(decoded.week_start_day, 1);
        assert_eq!(decoded.measurement_system, MeasurementSystem::Metric);
    }

    #[test]
    fn get_and_set_by_key() {
        let mut settings = Settings::default();
        settings.set("week_start_day", "7").unwrap();
        assert_eq!(settings.week_start(), Weekday::Sunday);
        settings.set("measurement_system", "imperial").unwrap();
        assert_eq!(settings.measurement_system, MeasurementSystem::Imperial);
        settings.set("has_completed_onboarding", "true").unwrap();
        assert!(settings.has_completed_onboarding);

        assert_eq!(settings.get("week_start_day").as_deref(), Some("7"));
        assert_eq!(settings.get("measurement_system").as_deref(), Some("imperial"));
        assert!(settings.get("nonsense").is_none());
    }

    #[test]
    fn set_rejects_bad_values() {
        let mut settings = Settings::default();
        assert!(settings.set("week_start_day", "0").is_err());
        assert!(settings.set("week_start_day", "8").is_err());
        assert!(settings.set("measurement_system", "cubits").is_err());
        assert!(settings.set("nonsense", "1").is_err());
    }

    #[test]
    fn out_of_range_week_start_fails_validation() {
        let decoded: Settings = toml::from_str("week_start_day = 9").unwrap();
        assert!(decoded.validate().is_err());
        assert_eq!(decoded.week_start(), Weekday::Monday);
    }
}
