//! The command-query separation rule.
//!
//! [`CqsRule`] is registered for the unit kinds in [`REGISTERED_KINDS`] and
//! analyzes one callable unit per call. It keeps no state between calls, so a
//! host may share one instance across threads.

use super::effect_scanner;
use super::shape_classifier;
use super::violation_policy::{self, SuppressionContext};
use crate::config::RuleSettings;
use crate::core::{Finding, RuleId};
use crate::semantic::{annotations, SemanticModel};
use crate::syntax::{CallableUnit, MethodDeclaration, UnitKind};
use tracing::{debug, debug_span};

/// Node kinds the rule must be invoked for
pub const REGISTERED_KINDS: [UnitKind; 3] = [
    UnitKind::Method,
    UnitKind::SimpleLambda,
    UnitKind::ParenthesizedLambda,
];

/// Receiver of reported findings
pub trait FindingSink {
    fn report(&mut self, finding: Finding);
}

impl FindingSink for Vec<Finding> {
    fn report(&mut self, finding: Finding) {
        self.push(finding);
    }
}

#[derive(Debug, Clone, Default)]
pub struct CqsRule {
    rules: RuleSettings,
}

impl CqsRule {
    pub fn new(rules: RuleSettings) -> Self {
        Self { rules }
    }

    pub fn registered_kinds(&self) -> &'static [UnitKind] {
        &REGISTERED_KINDS
    }

    /// Analyze one unit and report its findings to `sink`
    pub fn analyze<M>(&self, unit: CallableUnit<'_>, model: &M, sink: &mut dyn FindingSink)
    where
        M: SemanticModel + ?Sized,
    {
        let _span = debug_span!(
            "analyze_unit",
            kind = %unit.kind(),
            name = unit.display_name(),
            line = unit.report_span().start.line
        )
        .entered();

        match unit {
            CallableUnit::Method(method) => self.analyze_method(method, model, sink),
            CallableUnit::SimpleLambda(_) | CallableUnit::ParenthesizedLambda(_) => {
                self.check_shape(unit, model, sink)
            }
        }
    }

    /// Convenience wrapper collecting the findings of one unit
    pub fn findings<M>(&self, unit: CallableUnit<'_>, model: &M) -> Vec<Finding>
    where
        M: SemanticModel + ?Sized,
    {
        let mut findings = Vec::new();
        self.analyze(unit, model, &mut findings);
        findings
    }

    fn analyze_method<M>(
        &self,
        method: &MethodDeclaration,
        model: &M,
        sink: &mut dyn FindingSink,
    ) where
        M: SemanticModel + ?Sized,
    {
        self.check_shape(CallableUnit::Method(method), model, sink);

        let Some(body) = &method.body else {
            return;
        };

        let unit_suppressed = model
            .symbol_info(method.id)
            .is_some_and(annotations::has_suppress_marker);

        for effect in effect_scanner::scan_body(body, model) {
            let rule = effect.rule();
            if !self.rules.is_enabled(rule) {
                continue;
            }
            let context = SuppressionContext::for_unit(unit_suppressed)
                .with_inline_disable(effect.inline_disable);
            let finding = Finding::new(rule, violation_policy::severity(rule, context), effect.span)
                .with_subject(effect.subject());
            emit(sink, finding);
        }
    }

    fn check_shape<M>(&self, unit: CallableUnit<'_>, model: &M, sink: &mut dyn FindingSink)
    where
        M: SemanticModel + ?Sized,
    {
        if !self.rules.is_enabled(RuleId::AmbiguousShape) {
            return;
        }
        if !shape_classifier::classify(unit).is_ambiguous() {
            return;
        }
        let declared_pure = model
            .symbol_info(unit.id())
            .is_some_and(annotations::has_pure_marker);
        if declared_pure {
            return;
        }

        let severity =
            violation_policy::severity(RuleId::AmbiguousShape, SuppressionContext::default());
        let finding = Finding::new(RuleId::AmbiguousShape, severity, unit.report_span());
        let finding = match unit {
            CallableUnit::Method(method) => finding.with_subject(method.identifier.name.clone()),
            _ => finding,
        };
        emit(sink, finding);
    }
}

fn emit(sink: &mut dyn FindingSink, finding: Finding) {
    debug!(
        rule = %finding.rule,
        severity = %finding.severity,
        line = finding.span.start.line,
        column = finding.span.start.column,
        "Reporting finding"
    );
    sink.report(finding);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Severity, Span};
    use crate::semantic::{Symbol, SymbolKind};
    use crate::testkit::*;
    use pretty_assertions::assert_eq;

    const CONTRACTS_PURE: &str = "System.Diagnostics.Contracts.PureAttribute";
    const SUPPRESS: &str = "CQSAnalyzer.CqsSuppressAttribute";

    fn rules(ambiguous: bool, write: bool, call: bool) -> RuleSettings {
        RuleSettings {
            ambiguous_shape: ambiguous,
            illegal_write: write,
            suspicious_delegated_call: call,
        }
    }

    #[test]
    fn test_ambiguous_method_reported_at_identifier() {
        let m = method("Both")
            .returns(int_type())
            .param(param("x"))
            .identifier_at(8, 24)
            .body(vec![ret(Some(literal("0")))])
            .build();
        let snapshot = SnapshotBuilder::new().build();

        let findings =
            CqsRule::default().findings(CallableUnit::Method(&m), &snapshot.semantic_model());
        assert_eq!(
            findings,
            vec![Finding::new(RuleId::AmbiguousShape, Severity::Error, Span::at(8, 24))
                .with_subject("Both")]
        );
    }

    #[test]
    fn test_pure_marker_suppresses_ambiguous_shape() {
        let m = method("Both").returns(int_type()).param(param("x")).build();
        let mut snapshot = SnapshotBuilder::new();
        snapshot.bind_node(
            m.id,
            Symbol::new("Both", SymbolKind::Method).with_annotation(CONTRACTS_PURE),
        );
        let snapshot = snapshot.build();

        assert!(CqsRule::default()
            .findings(CallableUnit::Method(&m), &snapshot.semantic_model())
            .is_empty());
    }

    #[test]
    fn test_suppress_marker_does_not_hide_ambiguous_shape() {
        let m = method("Both").returns(int_type()).param(param("x")).build();
        let mut snapshot = SnapshotBuilder::new();
        snapshot.bind_node(
            m.id,
            Symbol::new("Both", SymbolKind::Method).with_annotation(SUPPRESS),
        );
        let snapshot = snapshot.build();

        let findings =
            CqsRule::default().findings(CallableUnit::Method(&m), &snapshot.semantic_model());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Error);
    }

    #[test]
    fn test_method_without_body_only_gets_shape_check() {
        let m = method("Both").returns(int_type()).param(param("x")).build();
        let snapshot = SnapshotBuilder::new().build();
        let findings =
            CqsRule::default().findings(CallableUnit::Method(&m), &snapshot.semantic_model());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, RuleId::AmbiguousShape);
    }

    #[test]
    fn test_shape_and_write_findings_overlap() {
        let target = ident("total");
        let mut snapshot = SnapshotBuilder::new();
        snapshot.bind(&target, Symbol::new("total", SymbolKind::Field));
        let m = method("Add")
            .returns(int_type())
            .param(param("x"))
            .body(vec![
                expr_stmt(assign(target, ident("x"))).at(10, 13),
                ret(Some(ident("x"))),
            ])
            .build();
        let snapshot = snapshot.build();

        let rules: Vec<_> = CqsRule::default()
            .findings(CallableUnit::Method(&m), &snapshot.semantic_model())
            .into_iter()
            .map(|f| f.rule)
            .collect();
        assert_eq!(rules, vec![RuleId::AmbiguousShape, RuleId::IllegalWrite]);
    }

    #[test]
    fn test_lambda_body_is_never_scanned() {
        let target = ident("a");
        let mut snapshot = SnapshotBuilder::new();
        snapshot.bind(&target, Symbol::new("a", SymbolKind::Field));
        let lambda = paren_lambda_node(
            vec![],
            block_body(vec![expr_stmt(assign(target, literal("1")))]),
        );
        let snapshot = snapshot.build();

        assert!(CqsRule::default()
            .findings(CallableUnit::ParenthesizedLambda(&lambda), &snapshot.semantic_model())
            .is_empty());
    }

    #[test]
    fn test_ambiguous_lambda_reported_at_lambda_span() {
        let mut lambda =
            simple_lambda_node(Some(param("r")), block_body(vec![ret(Some(literal("0")))]));
        lambda.span = Span::new(
            crate::core::Position::new(8, 52),
            crate::core::Position::new(8, 69),
        );
        let snapshot = SnapshotBuilder::new().build();

        let findings = CqsRule::default()
            .findings(CallableUnit::SimpleLambda(&lambda), &snapshot.semantic_model());
        assert_eq!(
            findings,
            vec![Finding::new(RuleId::AmbiguousShape, Severity::Error, lambda.span)]
        );
    }

    #[test]
    fn test_disabled_rules_emit_nothing() {
        let target = ident("a");
        let command = method("Log").returns_void().build();
        let call = invoke(ident("Log"), vec![]);
        let mut snapshot = SnapshotBuilder::new();
        snapshot.bind(&target, Symbol::new("a", SymbolKind::Field));
        snapshot.bind(&call, Symbol::new("Log", SymbolKind::Method).declared_at(command.id));
        snapshot.add_method(command);
        let m = method("Both")
            .returns(int_type())
            .param(param("x"))
            .body(vec![expr_stmt(assign(target, literal("1"))), expr_stmt(call)])
            .build();
        let snapshot = snapshot.build();
        let model = snapshot.semantic_model();

        let only_calls = CqsRule::new(rules(false, false, true))
            .findings(CallableUnit::Method(&m), &model);
        assert_eq!(
            only_calls.iter().map(|f| f.rule).collect::<Vec<_>>(),
            vec![RuleId::SuspiciousDelegatedCall]
        );

        assert!(CqsRule::new(rules(false, false, false))
            .findings(CallableUnit::Method(&m), &model)
            .is_empty());
    }

    #[test]
    fn test_registered_kinds_cover_all_units() {
        assert_eq!(CqsRule::default().registered_kinds(), &REGISTERED_KINDS);
    }
}
