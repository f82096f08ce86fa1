//! Structural command/query classification of callable units.
//!
//! Only the declaration is inspected: the return type (or, for lambdas, the
//! presence of `return` statements) and the parameter list.

use crate::syntax::{
    CallableUnit, LambdaBody, MethodDeclaration, ParenthesizedLambda, PredefinedType,
    SimpleLambda, StatementKind, TypeSyntax,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnShape {
    Void,
    NonVoid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterPresence {
    None,
    Some,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    pub returns: ReturnShape,
    pub parameters: ParameterPresence,
}

impl Shape {
    /// Returns a value and takes input: could be a query or a command
    pub fn is_ambiguous(&self) -> bool {
        self.returns == ReturnShape::NonVoid && self.parameters == ParameterPresence::Some
    }

    pub fn is_void(&self) -> bool {
        self.returns == ReturnShape::Void
    }
}

pub fn classify(unit: CallableUnit<'_>) -> Shape {
    match unit {
        CallableUnit::Method(method) => classify_method(method),
        CallableUnit::SimpleLambda(lambda) => classify_simple_lambda(lambda),
        CallableUnit::ParenthesizedLambda(lambda) => classify_parenthesized_lambda(lambda),
    }
}

pub fn classify_method(method: &MethodDeclaration) -> Shape {
    Shape {
        returns: return_shape(is_void_type(&method.return_type)),
        parameters: parameter_presence(method.parameters.iter().any(|p| !p.is_receiver())),
    }
}

pub fn classify_simple_lambda(lambda: &SimpleLambda) -> Shape {
    Shape {
        returns: return_shape(is_void_lambda_body(&lambda.body)),
        parameters: parameter_presence(lambda.parameter.is_some()),
    }
}

pub fn classify_parenthesized_lambda(lambda: &ParenthesizedLambda) -> Shape {
    Shape {
        returns: return_shape(is_void_lambda_body(&lambda.body)),
        parameters: parameter_presence(!lambda.parameters.is_empty()),
    }
}

/// Only the keyword `void` counts; `System.Void` or generic wrappers do not.
fn is_void_type(return_type: &TypeSyntax) -> bool {
    matches!(
        return_type,
        TypeSyntax::Predefined {
            keyword: PredefinedType::Void
        }
    )
}

// A lambda is void when its block has no top-level `return`. Expression
// bodies contain no statements at all and therefore also classify as void.
fn is_void_lambda_body(body: &LambdaBody) -> bool {
    match body {
        LambdaBody::Block { block } => !block
            .statements
            .iter()
            .any(|s| matches!(s.kind, StatementKind::Return { .. })),
        LambdaBody::Expression { .. } => true,
    }
}

fn return_shape(is_void: bool) -> ReturnShape {
    if is_void {
        ReturnShape::Void
    } else {
        ReturnShape::NonVoid
    }
}

fn parameter_presence(present: bool) -> ParameterPresence {
    if present {
        ParameterPresence::Some
    } else {
        ParameterPresence::None
    }
}
