//! JSON syntax snapshots and the semantic model built over them.
//!
//! A snapshot is what an external front end writes after parsing and
//! binding: the syntax of every file plus the symbol bound to each relevant
//! node. [`SnapshotModel`] borrows a loaded snapshot and answers the
//! engine's resolution queries from in-memory indexes.

use crate::core::{Error, Result, ResultExt};
use crate::semantic::{SemanticModel, Symbol};
use crate::syntax::{walk, CallableUnit, CompilationUnit, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolBinding {
    pub node: NodeId,
    pub symbol: Symbol,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub files: Vec<CompilationUnit>,
    #[serde(default)]
    pub symbols: Vec<SymbolBinding>,
}

impl Snapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and validate a snapshot file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(Error::from)
            .context(format!("Reading snapshot {}", path.display()))?;
        let snapshot = Self::from_json(&contents)
            .context(format!("Parsing snapshot {}", path.display()))?;
        snapshot.validate(path)?;
        tracing::debug!(
            path = %path.display(),
            files = snapshot.files.len(),
            symbols = snapshot.symbols.len(),
            "Loaded snapshot"
        );
        Ok(snapshot)
    }

    /// Reject snapshots whose node ids are ambiguous
    pub fn validate(&self, path: &Path) -> Result<()> {
        let mut seen = HashMap::new();
        for unit in self.callable_units() {
            if seen.insert(unit.id(), unit.kind()).is_some() {
                return Err(Error::snapshot(
                    path,
                    format!("duplicate callable node id {}", unit.id()),
                ));
            }
        }

        let mut bound = HashMap::new();
        for binding in &self.symbols {
            if let Some(previous) = bound.insert(binding.node, &binding.symbol.name) {
                return Err(Error::snapshot(
                    path,
                    format!(
                        "node {} bound to both `{}` and `{}`",
                        binding.node, previous, binding.symbol.name
                    ),
                ));
            }
        }
        Ok(())
    }

    /// All callable units of all files, in file order then source pre-order
    pub fn callable_units(&self) -> impl Iterator<Item = CallableUnit<'_>> {
        self.files.iter().flat_map(walk::callable_units)
    }

    pub fn semantic_model(&self) -> SnapshotModel<'_> {
        SnapshotModel::new(self)
    }
}

/// In-memory [`SemanticModel`] over a borrowed snapshot
#[derive(Debug, Clone)]
pub struct SnapshotModel<'a> {
    symbols: HashMap<NodeId, &'a Symbol>,
    declarations: HashMap<NodeId, CallableUnit<'a>>,
}

impl<'a> SnapshotModel<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        // First binding and first declaration win, as in `validate`
        let mut symbols = HashMap::new();
        for binding in &snapshot.symbols {
            if let Entry::Vacant(slot) = symbols.entry(binding.node) {
                slot.insert(&binding.symbol);
            }
        }

        let mut declarations = HashMap::new();
        for unit in snapshot.callable_units() {
            if let Entry::Vacant(slot) = declarations.entry(unit.id()) {
                slot.insert(unit);
            }
        }

        Self {
            symbols,
            declarations,
        }
    }
}

impl SemanticModel for SnapshotModel<'_> {
    fn symbol_info(&self, node: NodeId) -> Option<&Symbol> {
        self.symbols.get(&node).copied()
    }

    fn declaring_syntax(&self, declaration: NodeId) -> Option<CallableUnit<'_>> {
        self.declarations.get(&declaration).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::SymbolKind;
    use crate::syntax::UnitKind;
    use indoc::indoc;

    const SNAPSHOT: &str = indoc! {r#"
        {
          "files": [{
            "path": "Test0.cs",
            "methods": [{
              "id": 1,
              "identifier": { "name": "Log" },
              "return_type": { "type": "predefined", "keyword": "void" },
              "parameters": [{ "name": "message" }],
              "body": { "statements": [] }
            }, {
              "id": 2,
              "identifier": {
                "name": "Query",
                "span": { "start": { "line": 9, "column": 24 }, "end": { "line": 9, "column": 29 } }
              },
              "return_type": { "type": "predefined", "keyword": "int" },
              "body": {
                "statements": [{
                  "kind": {
                    "type": "expression",
                    "expression": {
                      "id": 3,
                      "kind": {
                        "type": "invocation",
                        "callee": { "id": 4, "kind": { "type": "identifier", "name": "Log" } },
                        "arguments": [{ "id": 5, "kind": { "type": "literal", "text": "\"x\"" } }]
                      }
                    }
                  },
                  "leading_trivia": "// disable\n"
                }, {
                  "kind": { "type": "lock" }
                }]
              }
            }]
          }],
          "symbols": [
            { "node": 3, "symbol": { "name": "Log", "kind": "method", "declaration": 1 } },
            { "node": 2, "symbol": {
                "name": "Query",
                "kind": "method",
                "annotations": ["CQSAnalyzer.CqsSuppressAttribute"]
            } }
          ]
        }
    "#};

    #[test]
    fn test_snapshot_parses_and_indexes() {
        let snapshot = Snapshot::from_json(SNAPSHOT).unwrap();
        snapshot.validate(Path::new("inline.json")).unwrap();
        let model = snapshot.semantic_model();

        let call_symbol = model.symbol_info(NodeId(3)).unwrap();
        assert_eq!(call_symbol.kind, SymbolKind::Method);
        let declaration = model.declaration_of(call_symbol).unwrap();
        assert_eq!(declaration.kind(), UnitKind::Method);
        assert_eq!(declaration.display_name(), "Log");

        let query = model.symbol_info(NodeId(2)).unwrap();
        assert_eq!(
            query.annotations[0].to_string(),
            "CQSAnalyzer.CqsSuppressAttribute"
        );
    }

    #[test]
    fn test_unknown_statement_kinds_become_other() {
        let snapshot = Snapshot::from_json(SNAPSHOT).unwrap();
        let body = snapshot.files[0].methods[1].body.as_ref().unwrap();
        assert_eq!(
            body.statements[1].kind,
            crate::syntax::StatementKind::Other
        );
        assert_eq!(body.statements[0].leading_trivia, "// disable\n");
    }

    #[test]
    fn test_unknown_declaration_is_absent() {
        let snapshot = Snapshot::from_json(SNAPSHOT).unwrap();
        let model = snapshot.semantic_model();
        assert!(model.declaring_syntax(NodeId(99)).is_none());
        assert!(model.symbol_info(NodeId(99)).is_none());
    }

    #[test]
    fn test_duplicate_bindings_are_rejected() {
        let mut snapshot = Snapshot::from_json(SNAPSHOT).unwrap();
        snapshot.symbols.push(SymbolBinding {
            node: NodeId(3),
            symbol: Symbol::new("Other", SymbolKind::Method),
        });
        let err = snapshot.validate(Path::new("dup.json")).unwrap_err();
        assert!(matches!(err, Error::Snapshot { .. }));
    }

    #[test]
    fn test_unvalidated_duplicate_binding_keeps_first() {
        let mut snapshot = Snapshot::from_json(SNAPSHOT).unwrap();
        snapshot.symbols.push(SymbolBinding {
            node: NodeId(3),
            symbol: Symbol::new("Shadow", SymbolKind::Field),
        });
        let model = snapshot.semantic_model();
        assert_eq!(model.symbol_info(NodeId(3)).unwrap().name, "Log");
    }

    #[test]
    fn test_duplicate_callable_ids_are_rejected() {
        let mut snapshot = Snapshot::from_json(SNAPSHOT).unwrap();
        let copy = snapshot.files[0].methods[0].clone();
        snapshot.files[0].methods.push(copy);
        assert!(snapshot.validate(Path::new("dup.json")).is_err());
    }

    #[test]
    fn test_load_reports_missing_file_with_context() {
        let err = Snapshot::load(Path::new("/nonexistent/units.json")).unwrap_err();
        assert!(err.to_string().starts_with("Reading snapshot /nonexistent/units.json"));
    }
}
