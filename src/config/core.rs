use serde::{Deserialize, Serialize};

use super::rules::RuleSettings;
use crate::core::Severity;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CqsConfig {
    /// Rule enablement
    #[serde(default)]
    pub rules: RuleSettings,

    /// Report filtering
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Findings below this severity are left out of reports
    #[serde(default = "default_min_severity")]
    pub min_severity: Severity,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            min_severity: default_min_severity(),
        }
    }
}

fn default_min_severity() -> Severity {
    Severity::Info
}
