//! Builders for syntax trees and snapshots used in tests and benchmarks.
//!
//! Node ids come from a process-wide counter, so nodes built independently
//! (even on different test threads) never collide and can be bound to
//! symbols before they are placed into a tree.
//!
//! ```rust
//! use cqs_analyzer::semantic::{Symbol, SymbolKind};
//! use cqs_analyzer::testkit::*;
//!
//! let target = ident("a");
//! let mut snapshot = SnapshotBuilder::new();
//! snapshot.bind(&target, Symbol::new("a", SymbolKind::Field));
//! snapshot.add_method(
//!     method("Query")
//!         .returns(int_type())
//!         .body(vec![expr_stmt(assign(target, literal("6"))).at(12, 1)])
//!         .build(),
//! );
//! let snapshot = snapshot.build();
//! assert_eq!(snapshot.files[0].methods.len(), 1);
//! ```

use crate::core::Span;
use crate::host::{Snapshot, SymbolBinding};
use crate::semantic::Symbol;
use crate::syntax::{
    AssignmentOperator, Block, CompilationUnit, Expr, ExprKind, Identifier, LambdaBody,
    MemberInitializer, MethodDeclaration, NodeId, Parameter, ParameterModifier,
    ParenthesizedLambda, PredefinedType, SimpleLambda, Statement, StatementKind, TypeSyntax,
    UnaryOperator, VariableDeclarator,
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};

/// File name used when methods are added without an explicit file
pub const DEFAULT_FILE: &str = "Test0.cs";

static NEXT_ID: AtomicU32 = AtomicU32::new(1);

pub fn next_id() -> NodeId {
    NodeId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
}

/// Position a node for location assertions
pub trait At {
    fn at(self, line: u32, column: u32) -> Self;
}

impl At for Statement {
    fn at(mut self, line: u32, column: u32) -> Self {
        self.span = Span::at(line, column);
        self
    }
}

impl At for Expr {
    fn at(mut self, line: u32, column: u32) -> Self {
        self.span = Span::at(line, column);
        self
    }
}

impl At for SimpleLambda {
    fn at(mut self, line: u32, column: u32) -> Self {
        self.span = Span::at(line, column);
        self
    }
}

impl At for ParenthesizedLambda {
    fn at(mut self, line: u32, column: u32) -> Self {
        self.span = Span::at(line, column);
        self
    }
}

// Types

pub fn void_type() -> TypeSyntax {
    TypeSyntax::predefined(PredefinedType::Void)
}

pub fn int_type() -> TypeSyntax {
    TypeSyntax::predefined(PredefinedType::Int)
}

pub fn bool_type() -> TypeSyntax {
    TypeSyntax::predefined(PredefinedType::Bool)
}

pub fn named_type(name: &str) -> TypeSyntax {
    TypeSyntax::named(name)
}

pub fn generic_type(name: &str, arguments: Vec<TypeSyntax>) -> TypeSyntax {
    TypeSyntax::Generic {
        name: name.to_string(),
        arguments,
    }
}

// Parameters

pub fn param(name: &str) -> Parameter {
    Parameter {
        name: name.to_string(),
        modifiers: Vec::new(),
        span: Span::default(),
    }
}

pub fn this_param(name: &str) -> Parameter {
    Parameter {
        modifiers: vec![ParameterModifier::This],
        ..param(name)
    }
}

pub fn ref_param(name: &str) -> Parameter {
    Parameter {
        modifiers: vec![ParameterModifier::Ref],
        ..param(name)
    }
}

// Expressions

fn expr(kind: ExprKind) -> Expr {
    Expr {
        id: next_id(),
        kind,
        span: Span::default(),
    }
}

pub fn ident(name: &str) -> Expr {
    expr(ExprKind::Identifier {
        name: name.to_string(),
    })
}

pub fn this_expr() -> Expr {
    ident("this")
}

pub fn literal(text: &str) -> Expr {
    expr(ExprKind::Literal {
        text: text.to_string(),
    })
}

pub fn member(receiver: Expr, name: &str) -> Expr {
    expr(ExprKind::MemberAccess {
        receiver: Box::new(receiver),
        member: name.to_string(),
    })
}

pub fn assign(target: Expr, value: Expr) -> Expr {
    assign_with(AssignmentOperator::Assign, target, value)
}

pub fn assign_with(operator: AssignmentOperator, target: Expr, value: Expr) -> Expr {
    expr(ExprKind::Assignment {
        operator,
        target: Box::new(target),
        value: Box::new(value),
    })
}

pub fn post_increment(operand: Expr) -> Expr {
    expr(ExprKind::Unary {
        operator: UnaryOperator::PostIncrement,
        operand: Box::new(operand),
    })
}

pub fn invoke(callee: Expr, arguments: Vec<Expr>) -> Expr {
    expr(ExprKind::Invocation {
        callee: Box::new(callee),
        arguments,
    })
}

/// Unmodelled expression (conditional, cast, await, ...) over its operands
pub fn other(children: Vec<Expr>) -> Expr {
    expr(ExprKind::Other { children })
}

pub fn binary(operator: &str, left: Expr, right: Expr) -> Expr {
    expr(ExprKind::Binary {
        operator: operator.to_string(),
        left: Box::new(left),
        right: Box::new(right),
    })
}

// Lambdas

pub fn block_body(statements: Vec<Statement>) -> LambdaBody {
    LambdaBody::Block {
        block: block(statements),
    }
}

pub fn expression_body(expression: Expr) -> LambdaBody {
    LambdaBody::Expression {
        expression: Box::new(expression),
    }
}

pub fn simple_lambda_node(parameter: Option<Parameter>, body: LambdaBody) -> SimpleLambda {
    SimpleLambda {
        id: next_id(),
        parameter,
        body,
        span: Span::default(),
    }
}

pub fn paren_lambda_node(parameters: Vec<Parameter>, body: LambdaBody) -> ParenthesizedLambda {
    ParenthesizedLambda {
        id: next_id(),
        parameters,
        body,
        span: Span::default(),
    }
}

pub fn simple_lambda_expr(lambda: SimpleLambda) -> Expr {
    let span = lambda.span;
    Expr {
        span,
        ..expr(ExprKind::SimpleLambda(lambda))
    }
}

pub fn paren_lambda_expr(lambda: ParenthesizedLambda) -> Expr {
    let span = lambda.span;
    Expr {
        span,
        ..expr(ExprKind::ParenthesizedLambda(lambda))
    }
}

pub fn simple_lambda(parameter: Option<Parameter>, body: LambdaBody) -> Expr {
    simple_lambda_expr(simple_lambda_node(parameter, body))
}

pub fn paren_lambda(parameters: Vec<Parameter>, body: LambdaBody) -> Expr {
    paren_lambda_expr(paren_lambda_node(parameters, body))
}

// Statements

pub fn block(statements: Vec<Statement>) -> Block {
    Block {
        statements,
        span: Span::default(),
    }
}

pub fn expr_stmt(expression: Expr) -> Statement {
    Statement::new(StatementKind::Expression { expression }, Span::default())
}

pub fn local(name: &str, initializer: Option<Expr>) -> Statement {
    Statement::new(
        StatementKind::LocalDeclaration {
            declarators: vec![VariableDeclarator {
                name: name.to_string(),
                initializer,
            }],
        },
        Span::default(),
    )
}

pub fn ret(expression: Option<Expr>) -> Statement {
    Statement::new(StatementKind::Return { expression }, Span::default())
}

pub fn if_stmt(condition: Expr, then_branch: Vec<Statement>) -> Statement {
    Statement::new(
        StatementKind::If {
            condition,
            then_branch: Box::new(Statement::new(
                StatementKind::Block {
                    block: block(then_branch),
                },
                Span::default(),
            )),
            else_branch: None,
        },
        Span::default(),
    )
}

// Declarations

pub fn method(name: &str) -> MethodBuilder {
    MethodBuilder::new(name)
}

pub struct MethodBuilder {
    declaration: MethodDeclaration,
}

impl MethodBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            declaration: MethodDeclaration {
                id: next_id(),
                identifier: Identifier {
                    name: name.to_string(),
                    span: Span::default(),
                },
                return_type: void_type(),
                parameters: Vec::new(),
                body: None,
                expression_body: None,
                span: Span::default(),
            },
        }
    }

    pub fn returns(mut self, return_type: TypeSyntax) -> Self {
        self.declaration.return_type = return_type;
        self
    }

    pub fn returns_void(self) -> Self {
        self.returns(void_type())
    }

    pub fn param(mut self, parameter: Parameter) -> Self {
        self.declaration.parameters.push(parameter);
        self
    }

    pub fn body(mut self, statements: Vec<Statement>) -> Self {
        self.declaration.body = Some(block(statements));
        self
    }

    pub fn expression_body(mut self, expression: Expr) -> Self {
        self.declaration.expression_body = Some(expression);
        self
    }

    pub fn identifier_at(mut self, line: u32, column: u32) -> Self {
        self.declaration.identifier.span = Span::at(line, column);
        self
    }

    pub fn build(self) -> MethodDeclaration {
        self.declaration
    }
}

pub fn compilation_unit(path: &str, methods: Vec<MethodDeclaration>) -> CompilationUnit {
    CompilationUnit {
        path: PathBuf::from(path),
        methods,
        initializers: Vec::new(),
    }
}

pub fn initializer(name: &str, value: Expr) -> MemberInitializer {
    MemberInitializer {
        name: name.to_string(),
        value,
        span: Span::default(),
    }
}

/// Accumulates files and symbol bindings into a [`Snapshot`]
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    files: Vec<CompilationUnit>,
    symbols: Vec<SymbolBinding>,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the symbol an expression resolves to
    pub fn bind(&mut self, expression: &Expr, symbol: Symbol) -> &mut Self {
        self.bind_node(expression.id, symbol)
    }

    /// Bind a symbol to any node, e.g. the symbol a method declares
    pub fn bind_node(&mut self, node: NodeId, symbol: Symbol) -> &mut Self {
        self.symbols.push(SymbolBinding { node, symbol });
        self
    }

    /// Add a method to [`DEFAULT_FILE`]
    pub fn add_method(&mut self, method: MethodDeclaration) -> &mut Self {
        self.default_file().methods.push(method);
        self
    }

    /// Add a field or property initializer to [`DEFAULT_FILE`]
    pub fn add_initializer(&mut self, initializer: MemberInitializer) -> &mut Self {
        self.default_file().initializers.push(initializer);
        self
    }

    fn default_file(&mut self) -> &mut CompilationUnit {
        let default_path = PathBuf::from(DEFAULT_FILE);
        let index = match self.files.iter().position(|f| f.path == default_path) {
            Some(index) => index,
            None => {
                self.files.push(compilation_unit(DEFAULT_FILE, Vec::new()));
                self.files.len() - 1
            }
        };
        &mut self.files[index]
    }

    pub fn add_file(&mut self, file: CompilationUnit) -> &mut Self {
        self.files.push(file);
        self
    }

    pub fn build(&self) -> Snapshot {
        Snapshot {
            files: self.files.clone(),
            symbols: self.symbols.clone(),
        }
    }
}
