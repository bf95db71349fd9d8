use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::{OnceLock, RwLock};

use crate::config::{atomic_write, default_download_dir, get_settings_path};
use crate::error::AppError;

/// 应用设置：界面语言与下载目录
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// “另存为”写出 claude_desktop_config.json 的目录
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<String>,
}

impl AppSettings {
    fn normalize(&mut self) {
        self.download_dir = self
            .download_dir
            .as_ref()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string());

        self.language = self
            .language
            .as_ref()
            .map(|s| s.trim())
            .filter(|s| matches!(*s, "en" | "zh"))
            .map(|s| s.to_string());
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        let mut settings: AppSettings = serde_json::from_str(content)?;
        settings.normalize();
        Ok(settings)
    }

    pub fn load() -> Self {
        let path = get_settings_path();
        let Ok(content) = fs::read_to_string(&path) else {
            return Self::default();
        };
        match Self::from_json(&content) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!(
                    "解析设置文件失败，将使用默认设置。路径: {}, 错误: {}",
                    path.display(),
                    err
                );
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<(), AppError> {
        let mut normalized = self.clone();
        normalized.normalize();
        let path = get_settings_path();
        let json = serde_json::to_string_pretty(&normalized)
            .map_err(|e| AppError::JsonSerialize { source: e })?;
        atomic_write(&path, json.as_bytes())
    }

    /// 解析后的下载目录，未设置时使用系统默认
    pub fn resolved_download_dir(&self) -> PathBuf {
        self.download_dir
            .as_deref()
            .map(resolve_override_path)
            .unwrap_or_else(default_download_dir)
    }
}

fn settings_store() -> &'static RwLock<AppSettings> {
    static STORE: OnceLock<RwLock<AppSettings>> = OnceLock::new();
    STORE.get_or_init(|| RwLock::new(AppSettings::load()))
}

fn resolve_override_path(raw: &str) -> PathBuf {
    if raw == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(stripped) = raw.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    } else if let Some(stripped) = raw.strip_prefix("~\\") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }

    PathBuf::from(raw)
}

pub fn get_settings() -> AppSettings {
    settings_store()
        .read()
        .map(|s| s.clone())
        .unwrap_or_default()
}

pub fn update_settings(mut new_settings: AppSettings) -> Result<(), AppError> {
    new_settings.normalize();
    new_settings.save()?;

    let mut guard = settings_store()
        .write()
        .map_err(|_| AppError::Config("写入设置锁失败".into()))?;
    *guard = new_settings;
    Ok(())
}

pub fn get_download_dir() -> PathBuf {
    get_settings().resolved_download_dir()
}

pub fn set_download_dir(dir: Option<String>) -> Result<(), AppError> {
    let mut settings = get_settings();
    settings.download_dir = dir;
    update_settings(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_language_and_blank_dir_are_dropped() {
        let settings =
            AppSettings::from_json(r#"{"language":"fr","downloadDir":"   "}"#).expect("parse");
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn known_values_are_kept_trimmed() {
        let settings = AppSettings::from_json(r#"{"language":" zh ","downloadDir":" /tmp/out "}"#)
            .expect("parse");
        assert_eq!(settings.language.as_deref(), Some("zh"));
        assert_eq!(settings.download_dir.as_deref(), Some("/tmp/out"));
        assert_eq!(settings.resolved_download_dir(), PathBuf::from("/tmp/out"));
    }

    #[test]
    fn tilde_download_dir_resolves_under_home() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let settings = AppSettings {
            language: None,
            download_dir: Some("~/exports".into()),
        };
        assert_eq!(settings.resolved_download_dir(), home.join("exports"));
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let settings = AppSettings::from_json("{}").expect("parse");
        assert_eq!(settings, AppSettings::default());
    }
}
