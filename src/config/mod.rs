//! Injected runtime configuration.
//! Loaded once per request scope and passed into the operations; nothing
//! here is a process-wide global. The file format is YAML under the
//! platform config directory.

use crate::errors::{AppError, AppResult};
use crate::models::AttendanceCategory;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One status-classification rule: a case-insensitive substring keyword
/// and the bucket it selects. Rules are evaluated in order, first match
/// wins, so more specific keywords come first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyRule {
    pub keyword: String,
    pub category: AttendanceCategory,
}

/// Seed value for the standard-weights table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardWeightSeed {
    pub job_title: String,
    pub weight: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Ordered rule list for attendance-status classification.
    #[serde(default = "default_rules")]
    pub classification_rules: Vec<ClassifyRule>,

    /// Hours stored for a batch entry that does not state its own.
    #[serde(default = "default_hours")]
    pub default_worked_hours: Decimal,

    /// Default bonus weights by job title, applied when the
    /// standard-weights table is seeded.
    #[serde(default = "default_standard_weights")]
    pub standard_weights: Vec<StandardWeightSeed>,

    /// Extra recipients of voucher notifications, besides the
    /// collaborator the disbursement is for.
    #[serde(default)]
    pub notify_recipients: Vec<String>,
}

fn default_rules() -> Vec<ClassifyRule> {
    // "falta injustificada" contains "justificada", so the unjustified
    // keyword must be checked first.
    let rule = |keyword: &str, category| ClassifyRule {
        keyword: keyword.to_string(),
        category,
    };
    vec![
        rule("injustificada", AttendanceCategory::UnjustifiedAbsence),
        rule("trabajado", AttendanceCategory::Worked),
        rule("justificada", AttendanceCategory::JustifiedAbsence),
        rule("licencia", AttendanceCategory::MedicalLeave),
    ]
}

fn default_hours() -> Decimal {
    Decimal::from(8)
}

fn default_standard_weights() -> Vec<StandardWeightSeed> {
    vec![
        StandardWeightSeed {
            job_title: "Técnico".to_string(),
            weight: Decimal::from(65),
        },
        StandardWeightSeed {
            job_title: "Ayudante".to_string(),
            weight: Decimal::from(35),
        },
    ]
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            classification_rules: default_rules(),
            default_worked_hours: default_hours(),
            standard_weights: default_standard_weights(),
            notify_recipients: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Standard configuration directory for the current platform.
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("rnomina")
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rnomina.conf")
    }

    /// Load the configuration file, or the defaults if none exists.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("failed to parse {}: {e}", path.display())))
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| AppError::Config(format!("failed to serialize config: {e}")))?;
        fs::write(path, yaml)?;
        Ok(())
    }
}
