//! Severity policy for write/call findings.
//!
//! Suppression never hides a finding; it only lowers it to `Info` so the
//! acknowledged exception stays visible in reports.

use crate::core::{RuleId, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SuppressionContext {
    /// The enclosing unit carries the suppress marker
    pub unit_suppressed: bool,
    /// The statement is preceded by an inline `disable` comment
    pub inline_disable: bool,
}

impl SuppressionContext {
    pub fn for_unit(unit_suppressed: bool) -> Self {
        Self {
            unit_suppressed,
            inline_disable: false,
        }
    }

    pub fn with_inline_disable(mut self, inline_disable: bool) -> Self {
        self.inline_disable = inline_disable;
        self
    }
}

pub fn severity(rule: RuleId, context: SuppressionContext) -> Severity {
    match rule {
        RuleId::AmbiguousShape => Severity::Error,
        RuleId::IllegalWrite if context.unit_suppressed => Severity::Info,
        RuleId::SuspiciousDelegatedCall if context.unit_suppressed || context.inline_disable => {
            Severity::Info
        }
        RuleId::IllegalWrite | RuleId::SuspiciousDelegatedCall => Severity::Error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_unsuppressed_findings_are_errors() {
        let context = SuppressionContext::default();
        assert_eq!(severity(RuleId::IllegalWrite, context), Severity::Error);
        assert_eq!(
            severity(RuleId::SuspiciousDelegatedCall, context),
            Severity::Error
        );
    }

    #[test]
    fn test_suppressed_unit_downgrades_both_rules() {
        let context = SuppressionContext::for_unit(true);
        assert_eq!(severity(RuleId::IllegalWrite, context), Severity::Info);
        assert_eq!(
            severity(RuleId::SuspiciousDelegatedCall, context),
            Severity::Info
        );
    }

    #[test]
    fn test_inline_disable_only_affects_delegated_calls() {
        let context = SuppressionContext::for_unit(false).with_inline_disable(true);
        assert_eq!(
            severity(RuleId::SuspiciousDelegatedCall, context),
            Severity::Info
        );
        assert_eq!(severity(RuleId::IllegalWrite, context), Severity::Error);
    }

    proptest! {
        #[test]
        fn prop_ambiguous_shape_is_always_error(
            suppressed in any::<bool>(),
            inline in any::<bool>(),
        ) {
            let context = SuppressionContext::for_unit(suppressed).with_inline_disable(inline);
            prop_assert_eq!(severity(RuleId::AmbiguousShape, context), Severity::Error);
        }

        #[test]
        fn prop_suppressed_unit_never_reports_errors(inline in any::<bool>()) {
            let context = SuppressionContext::for_unit(true).with_inline_disable(inline);
            prop_assert_eq!(severity(RuleId::IllegalWrite, context), Severity::Info);
            prop_assert_eq!(severity(RuleId::SuspiciousDelegatedCall, context), Severity::Info);
        }
    }
}
