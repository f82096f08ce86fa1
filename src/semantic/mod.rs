//! Symbol resolution contract between the engine and its host.

pub mod annotations;

use crate::syntax::{CallableUnit, NodeId};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use annotations::{KnownMarker, MarkerKind, QualifiedName};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Local,
    Parameter,
    Field,
    Property,
    Method,
    /// Anything else, including symbols defined outside the compilation
    #[serde(other)]
    Other,
}

impl SymbolKind {
    /// Locals and parameters live and die with the unit's own frame
    pub fn is_local_scope(&self) -> bool {
        matches!(self, Self::Local | Self::Parameter)
    }
}

/// Resolved symbol as reported by the host's binder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    #[serde(default)]
    pub annotations: Vec<QualifiedName>,
    /// First declaring syntax node; absent for metadata-only symbols
    #[serde(default)]
    pub declaration: Option<NodeId>,
}

impl Symbol {
    pub fn new(name: impl Into<String>, kind: SymbolKind) -> Self {
        Self {
            name: name.into(),
            kind,
            annotations: Vec::new(),
            declaration: None,
        }
    }

    pub fn with_annotation(mut self, name: impl Into<QualifiedName>) -> Self {
        self.annotations.push(name.into());
        self
    }

    pub fn declared_at(mut self, declaration: NodeId) -> Self {
        self.declaration = Some(declaration);
        self
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?})", self.name, self.kind)
    }
}

/// Symbol-resolution view supplied by the host for the duration of one analysis.
pub trait SemanticModel {
    /// Symbol bound to an expression, or declared by a declaration node
    fn symbol_info(&self, node: NodeId) -> Option<&Symbol>;

    /// Syntax of a callable declaration, if it is available in source
    fn declaring_syntax(&self, declaration: NodeId) -> Option<CallableUnit<'_>>;

    /// Follow a symbol's declaring reference to its callable syntax
    fn declaration_of(&self, symbol: &Symbol) -> Option<CallableUnit<'_>> {
        symbol
            .declaration
            .and_then(|declaration| self.declaring_syntax(declaration))
    }
}

impl<M: SemanticModel + ?Sized> SemanticModel for &M {
    fn symbol_info(&self, node: NodeId) -> Option<&Symbol> {
        (**self).symbol_info(node)
    }

    fn declaring_syntax(&self, declaration: NodeId) -> Option<CallableUnit<'_>> {
        (**self).declaring_syntax(declaration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locals_and_parameters_are_local_scope() {
        assert!(SymbolKind::Local.is_local_scope());
        assert!(SymbolKind::Parameter.is_local_scope());
        assert!(!SymbolKind::Field.is_local_scope());
        assert!(!SymbolKind::Property.is_local_scope());
        assert!(!SymbolKind::Other.is_local_scope());
    }

    #[test]
    fn test_unknown_symbol_kind_deserializes_as_other() {
        let symbol: Symbol =
            serde_json::from_str(r#"{"name": "Changed", "kind": "event"}"#).unwrap();
        assert_eq!(symbol.kind, SymbolKind::Other);
        assert!(symbol.annotations.is_empty());
        assert_eq!(symbol.declaration, None);
    }
}
