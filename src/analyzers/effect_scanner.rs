//! Body effect scanning.
//!
//! Looks at the top-level statements of a method body for two kinds of
//! effects: assignments whose target outlives the method, and discarded
//! calls into void callables. Statements nested inside `if`, loops or inner
//! blocks are not visited.

use super::shape_classifier;
use crate::core::{RuleId, Span};
use crate::semantic::{SemanticModel, Symbol};
use crate::syntax::{Block, Expr, ExprKind, Statement, StatementKind};

/// Comment text that acknowledges a delegated command call
pub const INLINE_DISABLE_MARKER: &str = "disable";

/// Classification of an assignment target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteScope {
    /// Local variable or parameter of the unit itself
    Local,
    /// Field, property or any other state that survives the call
    External(String),
    /// Binder returned nothing for the target
    Unresolved,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectKind {
    StateWrite { target: String },
    DelegatedCommand { callee: String },
}

/// An effect found in one statement, before severity is applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyEffect {
    pub kind: EffectKind,
    pub span: Span,
    /// The statement's leading trivia contains [`INLINE_DISABLE_MARKER`]
    pub inline_disable: bool,
}

impl BodyEffect {
    pub fn rule(&self) -> RuleId {
        match self.kind {
            EffectKind::StateWrite { .. } => RuleId::IllegalWrite,
            EffectKind::DelegatedCommand { .. } => RuleId::SuspiciousDelegatedCall,
        }
    }

    pub fn subject(&self) -> &str {
        match &self.kind {
            EffectKind::StateWrite { target } => target,
            EffectKind::DelegatedCommand { callee } => callee,
        }
    }
}

/// Scan a method body, returning effects in statement order
pub fn scan_body<M>(body: &Block, model: &M) -> Vec<BodyEffect>
where
    M: SemanticModel + ?Sized,
{
    body.statements
        .iter()
        .filter_map(|statement| scan_statement(statement, model))
        .collect()
}

pub fn scan_statement<M>(statement: &Statement, model: &M) -> Option<BodyEffect>
where
    M: SemanticModel + ?Sized,
{
    let StatementKind::Expression { expression } = &statement.kind else {
        return None;
    };

    match &expression.kind {
        ExprKind::Assignment { target, .. } => match determine_write_scope(target, model) {
            WriteScope::External(target) => Some(BodyEffect {
                kind: EffectKind::StateWrite { target },
                span: statement.span,
                inline_disable: false,
            }),
            WriteScope::Local | WriteScope::Unresolved => None,
        },
        ExprKind::Invocation { callee, .. } => {
            let symbol = model.symbol_info(expression.id)?;
            if !invokes_command(symbol, model) {
                return None;
            }
            Some(BodyEffect {
                kind: EffectKind::DelegatedCommand {
                    callee: callee_name(callee, symbol),
                },
                span: statement.span,
                inline_disable: has_inline_disable(statement),
            })
        }
        _ => None,
    }
}

/// Determine whether an assignment target is local to the unit
pub fn determine_write_scope<M>(target: &Expr, model: &M) -> WriteScope
where
    M: SemanticModel + ?Sized,
{
    match model.symbol_info(target.id) {
        Some(symbol) if symbol.kind.is_local_scope() => WriteScope::Local,
        Some(symbol) => WriteScope::External(symbol.name.clone()),
        None => WriteScope::Unresolved,
    }
}

// One hop only: the callee's own body is never inspected. Callees without
// source (metadata-only, generated) cannot be classified and are benign.
fn invokes_command<M>(callee: &Symbol, model: &M) -> bool
where
    M: SemanticModel + ?Sized,
{
    model
        .declaration_of(callee)
        .is_some_and(|declaration| shape_classifier::classify(declaration).is_void())
}

fn callee_name(callee: &Expr, symbol: &Symbol) -> String {
    callee
        .name()
        .map(String::from)
        .unwrap_or_else(|| symbol.name.clone())
}

fn has_inline_disable(statement: &Statement) -> bool {
    statement.leading_trivia.contains(INLINE_DISABLE_MARKER)
}
