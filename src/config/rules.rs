use crate::core::RuleId;
use serde::{Deserialize, Serialize};

/// Per-rule enablement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSettings {
    #[serde(default = "default_enabled")]
    pub ambiguous_shape: bool,

    #[serde(default = "default_enabled")]
    pub illegal_write: bool,

    #[serde(default = "default_enabled")]
    pub suspicious_delegated_call: bool,
}

impl RuleSettings {
    pub fn is_enabled(&self, rule: RuleId) -> bool {
        match rule {
            RuleId::AmbiguousShape => self.ambiguous_shape,
            RuleId::IllegalWrite => self.illegal_write,
            RuleId::SuspiciousDelegatedCall => self.suspicious_delegated_call,
        }
    }

    pub fn enabled_rules(&self) -> impl Iterator<Item = RuleId> + '_ {
        RuleId::ALL.into_iter().filter(|rule| self.is_enabled(*rule))
    }
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            ambiguous_shape: default_enabled(),
            illegal_write: default_enabled(),
            suspicious_delegated_call: default_enabled(),
        }
    }
}

fn default_enabled() -> bool {
    true
}
