//! Callable unit discovery.
//!
//! Walks a compilation unit the way a host's per-node-kind registration
//! would: every method declaration and every lambda, wherever it is nested.
//! Methods come first in source pre-order, then lambdas held by member
//! initializers.

use super::{
    Block, CallableUnit, CompilationUnit, Expr, ExprKind, LambdaBody, MethodDeclaration, Statement,
    StatementKind,
};

/// Collect all callable units of a file in pre-order
pub fn callable_units(file: &CompilationUnit) -> Vec<CallableUnit<'_>> {
    let mut collector = UnitCollector::default();
    for method in &file.methods {
        collector.visit_method(method);
    }
    for initializer in &file.initializers {
        collector.visit_expr(&initializer.value);
    }
    collector.units
}

#[derive(Default)]
struct UnitCollector<'ast> {
    units: Vec<CallableUnit<'ast>>,
}

impl<'ast> UnitCollector<'ast> {
    fn visit_method(&mut self, method: &'ast MethodDeclaration) {
        self.units.push(CallableUnit::Method(method));
        if let Some(body) = &method.body {
            self.visit_block(body);
        }
        if let Some(expression) = &method.expression_body {
            self.visit_expr(expression);
        }
    }

    fn visit_block(&mut self, block: &'ast Block) {
        for statement in &block.statements {
            self.visit_statement(statement);
        }
    }

    fn visit_statement(&mut self, statement: &'ast Statement) {
        match &statement.kind {
            StatementKind::Expression { expression } => self.visit_expr(expression),
            StatementKind::LocalDeclaration { declarators } => {
                for initializer in declarators.iter().filter_map(|d| d.initializer.as_ref()) {
                    self.visit_expr(initializer);
                }
            }
            StatementKind::Return { expression } => {
                if let Some(expression) = expression {
                    self.visit_expr(expression);
                }
            }
            StatementKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.visit_expr(condition);
                self.visit_statement(then_branch);
                if let Some(else_branch) = else_branch {
                    self.visit_statement(else_branch);
                }
            }
            StatementKind::While { condition, body } => {
                self.visit_expr(condition);
                self.visit_statement(body);
            }
            StatementKind::ForEach {
                collection, body, ..
            } => {
                self.visit_expr(collection);
                self.visit_statement(body);
            }
            StatementKind::Block { block } => self.visit_block(block),
            StatementKind::Other => {}
        }
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        match &expr.kind {
            ExprKind::MemberAccess { receiver, .. } => self.visit_expr(receiver),
            ExprKind::Assignment { target, value, .. } => {
                self.visit_expr(target);
                self.visit_expr(value);
            }
            ExprKind::Invocation { callee, arguments } => {
                self.visit_expr(callee);
                arguments.iter().for_each(|arg| self.visit_expr(arg));
            }
            ExprKind::Unary { operand, .. } => self.visit_expr(operand),
            ExprKind::Binary { left, right, .. } => {
                self.visit_expr(left);
                self.visit_expr(right);
            }
            ExprKind::ObjectCreation { arguments, .. } => {
                arguments.iter().for_each(|arg| self.visit_expr(arg));
            }
            ExprKind::SimpleLambda(lambda) => {
                self.units.push(CallableUnit::SimpleLambda(lambda));
                self.visit_lambda_body(&lambda.body);
            }
            ExprKind::ParenthesizedLambda(lambda) => {
                self.units.push(CallableUnit::ParenthesizedLambda(lambda));
                self.visit_lambda_body(&lambda.body);
            }
            ExprKind::Other { children } => {
                children.iter().for_each(|child| self.visit_expr(child));
            }
            ExprKind::Identifier { .. } | ExprKind::Literal { .. } => {}
        }
    }

    fn visit_lambda_body(&mut self, body: &'ast LambdaBody) {
        match body {
            LambdaBody::Block { block } => self.visit_block(block),
            LambdaBody::Expression { expression } => self.visit_expr(expression),
        }
    }
}
