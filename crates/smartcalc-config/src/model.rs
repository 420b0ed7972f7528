use std::{collections::BTreeMap, path::PathBuf};

use serde::{Deserialize, Serialize};
use smartcalc_domain::{AuditThresholds, LabelCatalog, NetWorthBounds};

use crate::ConfigError;

pub const ADMIN_EMAIL_ENV: &str = "SMARTCALC_ADMIN_EMAIL";
pub const ADMIN_PASS_ENV: &str = "SMARTCALC_ADMIN_PASS";

/// Keys accepted by [`Config::set_value`].
pub const SETTABLE_KEYS: &[&str] = &[
    "locale",
    "currency",
    "ui_color_enabled",
    "admin_email",
    "recent_limit",
    "audit.moderate",
    "audit.high",
    "net_worth.lower",
    "net_worth.upper",
    "net_worth.building_threshold",
    "export_root",
];

/// Stores user-configurable preferences and scoring settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub locale: String,
    /// Display currency a new session starts with.
    pub currency: String,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_password: Option<String>,
    #[serde(default = "Config::default_recent_limit")]
    pub recent_limit: usize,
    #[serde(default)]
    pub audit: AuditThresholds,
    #[serde(default)]
    pub net_worth: NetWorthBounds,
    #[serde(default)]
    pub labels: LabelCatalog,
    /// Extra or replacement rates, in units per one USD.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rates: BTreeMap<String, f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional directory for exports. Defaults to `~/Documents/SmartCalc`.
    pub export_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            admin_email: None,
            admin_password: None,
            recent_limit: Self::default_recent_limit(),
            audit: AuditThresholds::default(),
            net_worth: NetWorthBounds::default(),
            labels: LabelCatalog::default(),
            rates: BTreeMap::new(),
            export_root: None,
        }
    }
}

impl Config {
    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn default_recent_limit() -> usize {
        5
    }

    pub fn resolve_export_root(&self) -> PathBuf {
        if let Some(path) = &self.export_root {
            return path.clone();
        }

        let base = dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("SmartCalc")
    }

    /// Applies admin overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies admin overrides from `lookup`; blank values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_blank = |key: &str| lookup(key).filter(|value: &String| !value.trim().is_empty());
        if let Some(email) = non_blank(ADMIN_EMAIL_ENV) {
            tracing::debug!("admin email taken from environment");
            self.admin_email = Some(email.trim().to_string());
        }
        if let Some(password) = non_blank(ADMIN_PASS_ENV) {
            tracing::debug!("admin password taken from environment");
            self.admin_password = Some(password);
        }
    }

    /// Updates one setting from its textual form. On error `self` is unchanged.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        let mut next = self.clone();
        next.apply_value(key, value)?;
        if next.audit.moderate > next.audit.high {
            return Err(invalid(
                key,
                value,
                "audit.moderate must not exceed audit.high",
            ));
        }
        *self = next;
        Ok(())
    }

    fn apply_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "locale" => self.locale = non_empty(key, value)?,
            "currency" => self.currency = non_empty(key, value)?.to_uppercase(),
            "ui_color_enabled" => self.ui_color_enabled = parse_bool(key, value)?,
            "admin_email" => {
                self.admin_email = if value.is_empty() || value == "none" {
                    None
                } else {
                    Some(value.to_string())
                }
            }
            "recent_limit" => {
                self.recent_limit = value
                    .parse::<usize>()
                    .ok()
                    .filter(|limit| *limit > 0)
                    .ok_or_else(|| invalid(key, value, "expected a positive integer"))?
            }
            "audit.moderate" => self.audit.moderate = parse_number(key, value)?,
            "audit.high" => self.audit.high = parse_number(key, value)?,
            "net_worth.lower" => self.net_worth.lower = parse_number(key, value)?,
            "net_worth.upper" => self.net_worth.upper = parse_number(key, value)?,
            "net_worth.building_threshold" => {
                self.net_worth.building_threshold = parse_number(key, value)?
            }
            "export_root" => {
                self.export_root = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                }
            }
            _ => {
                return Err(invalid(
                    key,
                    value,
                    &format!("unknown key (expected one of {})", SETTABLE_KEYS.join(", ")),
                ))
            }
        }
        Ok(())
    }
}

fn invalid(key: &str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn non_empty(key: &str, value: &str) -> Result<String, ConfigError> {
    if value.is_empty() {
        Err(invalid(key, value, "value cannot be empty"))
    } else {
        Ok(value.to_string())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(invalid(key, value, "expected on/off")),
    }
}

fn parse_number(key: &str, value: &str) -> Result<f64, ConfigError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .ok_or_else(|| invalid(key, value, "expected a finite number"))
}
