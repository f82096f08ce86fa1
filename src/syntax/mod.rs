//! Host-agnostic syntax model.
//!
//! The analyzer does not parse source text. A front end builds these nodes
//! (or deserializes them from a snapshot) and hands borrowed views to the
//! engine. Only the shapes the rules care about are modelled precisely;
//! everything else collapses into an `Other` variant and is ignored.

pub mod walk;

use crate::core::Span;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Host-assigned node identity, unique within one snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompilationUnit {
    pub path: PathBuf,
    #[serde(default)]
    pub methods: Vec<MethodDeclaration>,
    /// Field and property initializers, which may hold lambdas
    #[serde(default)]
    pub initializers: Vec<MemberInitializer>,
}

/// `Func<int, int> Square = x => x * x;` at member level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberInitializer {
    pub name: String,
    pub value: Expr,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
    pub name: String,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDeclaration {
    pub id: NodeId,
    pub identifier: Identifier,
    pub return_type: TypeSyntax,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Block body; absent for abstract, extern, interface and expression-bodied members
    #[serde(default)]
    pub body: Option<Block>,
    #[serde(default)]
    pub expression_body: Option<Expr>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterModifier {
    This,
    Ref,
    Out,
    In,
    Params,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(default)]
    pub modifiers: Vec<ParameterModifier>,
    #[serde(default)]
    pub span: Span,
}

impl Parameter {
    /// Receiver of an extension method
    pub fn is_receiver(&self) -> bool {
        self.modifiers.contains(&ParameterModifier::This)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredefinedType {
    Void,
    Bool,
    Byte,
    SByte,
    Char,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    Float,
    Double,
    Decimal,
    String,
    Object,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TypeSyntax {
    /// Keyword type such as `void` or `int`
    Predefined { keyword: PredefinedType },
    /// Simple or qualified type name, e.g. `Guid` or `System.Void`
    Named { name: String },
    Generic {
        name: String,
        #[serde(default)]
        arguments: Vec<TypeSyntax>,
    },
    Array { element: Box<TypeSyntax> },
    Nullable { underlying: Box<TypeSyntax> },
}

impl TypeSyntax {
    pub fn predefined(keyword: PredefinedType) -> Self {
        Self::Predefined { keyword }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::Named { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub statements: Vec<Statement>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub kind: StatementKind,
    /// Comments and whitespace attached in front of the statement
    #[serde(default)]
    pub leading_trivia: String,
    #[serde(default)]
    pub span: Span,
}

impl Statement {
    pub fn new(kind: StatementKind, span: Span) -> Self {
        Self {
            kind,
            leading_trivia: String::new(),
            span,
        }
    }

    pub fn with_leading_trivia(mut self, trivia: impl Into<String>) -> Self {
        self.leading_trivia = trivia.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclarator {
    pub name: String,
    #[serde(default)]
    pub initializer: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StatementKind {
    Expression {
        expression: Expr,
    },
    LocalDeclaration {
        declarators: Vec<VariableDeclarator>,
    },
    Return {
        #[serde(default)]
        expression: Option<Expr>,
    },
    If {
        condition: Expr,
        then_branch: Box<Statement>,
        #[serde(default)]
        else_branch: Option<Box<Statement>>,
    },
    While {
        condition: Expr,
        body: Box<Statement>,
    },
    ForEach {
        variable: String,
        collection: Expr,
        body: Box<Statement>,
    },
    Block {
        block: Block,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    pub id: NodeId,
    pub kind: ExprKind,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentOperator {
    Assign,
    AddAssign,
    SubtractAssign,
    MultiplyAssign,
    DivideAssign,
    ModuloAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    LeftShiftAssign,
    RightShiftAssign,
    CoalesceAssign,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOperator {
    PreIncrement,
    PreDecrement,
    PostIncrement,
    PostDecrement,
    Not,
    Negate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExprKind {
    Identifier {
        name: String,
    },
    Literal {
        text: String,
    },
    MemberAccess {
        receiver: Box<Expr>,
        member: String,
    },
    Assignment {
        operator: AssignmentOperator,
        target: Box<Expr>,
        value: Box<Expr>,
    },
    Invocation {
        callee: Box<Expr>,
        #[serde(default)]
        arguments: Vec<Expr>,
    },
    Unary {
        operator: UnaryOperator,
        operand: Box<Expr>,
    },
    Binary {
        operator: String,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    ObjectCreation {
        created_type: TypeSyntax,
        #[serde(default)]
        arguments: Vec<Expr>,
    },
    SimpleLambda(SimpleLambda),
    ParenthesizedLambda(ParenthesizedLambda),
    /// Conditional, cast, await and every other unnamed shape. The front end
    /// lists its direct sub-expressions so nested lambdas stay reachable.
    #[serde(untagged)]
    Other {
        #[serde(default)]
        children: Vec<Expr>,
    },
}

impl Expr {
    /// Display name of the expression when it is a plain or member name
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Identifier { name } => Some(name),
            ExprKind::MemberAccess { member, .. } => Some(member),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LambdaBody {
    Block { block: Block },
    Expression { expression: Box<Expr> },
}

/// `x => ...`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleLambda {
    pub id: NodeId,
    #[serde(default)]
    pub parameter: Option<Parameter>,
    pub body: LambdaBody,
    #[serde(default)]
    pub span: Span,
}

/// `(a, b) => ...`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParenthesizedLambda {
    pub id: NodeId,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    pub body: LambdaBody,
    #[serde(default)]
    pub span: Span,
}

/// The node kinds the rule registers for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Method,
    SimpleLambda,
    ParenthesizedLambda,
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Method => f.write_str("method"),
            Self::SimpleLambda => f.write_str("simple lambda"),
            Self::ParenthesizedLambda => f.write_str("parenthesized lambda"),
        }
    }
}

/// Borrowed view of one callable unit handed to the engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CallableUnit<'a> {
    Method(&'a MethodDeclaration),
    SimpleLambda(&'a SimpleLambda),
    ParenthesizedLambda(&'a ParenthesizedLambda),
}

impl<'a> CallableUnit<'a> {
    pub fn kind(&self) -> UnitKind {
        match self {
            Self::Method(_) => UnitKind::Method,
            Self::SimpleLambda(_) => UnitKind::SimpleLambda,
            Self::ParenthesizedLambda(_) => UnitKind::ParenthesizedLambda,
        }
    }

    pub fn id(&self) -> NodeId {
        match self {
            Self::Method(method) => method.id,
            Self::SimpleLambda(lambda) => lambda.id,
            Self::ParenthesizedLambda(lambda) => lambda.id,
        }
    }

    /// Where findings about the unit's shape are reported: the identifier
    /// for methods, the whole expression for lambdas.
    pub fn report_span(&self) -> Span {
        match self {
            Self::Method(method) => method.identifier.span,
            Self::SimpleLambda(lambda) => lambda.span,
            Self::ParenthesizedLambda(lambda) => lambda.span,
        }
    }

    pub fn display_name(&self) -> &'a str {
        match self {
            Self::Method(method) => &method.identifier.name,
            Self::SimpleLambda(_) | Self::ParenthesizedLambda(_) => "<lambda>",
        }
    }
}
