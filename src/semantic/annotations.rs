//! Recognition of purity and suppression markers.
//!
//! The accepted annotations form a closed set of [`KnownMarker`]s. A symbol's
//! annotation names are matched against them segment by segment, so the
//! attribute-suffix convention (`[Pure]` for `PureAttribute`) is honoured
//! without comparing formatted strings.

use super::Symbol;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

const ATTRIBUTE_SUFFIX: &str = "Attribute";

/// Dotted name of an annotation type, stored as segments
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct QualifiedName {
    segments: Vec<String>,
}

impl QualifiedName {
    pub fn parse(dotted: &str) -> Self {
        Self {
            segments: dotted
                .split('.')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Everything before the type name
    pub fn namespace(&self) -> &[String] {
        match self.segments.split_last() {
            Some((_, namespace)) => namespace,
            None => &[],
        }
    }

    pub fn type_name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }
}

impl From<&str> for QualifiedName {
    fn from(dotted: &str) -> Self {
        Self::parse(dotted)
    }
}

impl From<String> for QualifiedName {
    fn from(dotted: String) -> Self {
        Self::parse(&dotted)
    }
}

impl From<QualifiedName> for String {
    fn from(name: QualifiedName) -> Self {
        name.to_string()
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// Declares the callable side-effect-free
    Pure,
    /// Acknowledges write/call violations so they are reported as info
    Suppress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownMarker {
    ContractsPure,
    JetBrainsPure,
    CqsSuppress,
}

impl KnownMarker {
    pub const ALL: [KnownMarker; 3] = [
        KnownMarker::ContractsPure,
        KnownMarker::JetBrainsPure,
        KnownMarker::CqsSuppress,
    ];

    pub fn kind(&self) -> MarkerKind {
        match self {
            Self::ContractsPure | Self::JetBrainsPure => MarkerKind::Pure,
            Self::CqsSuppress => MarkerKind::Suppress,
        }
    }

    pub fn namespace(&self) -> &'static [&'static str] {
        match self {
            Self::ContractsPure => &["System", "Diagnostics", "Contracts"],
            Self::JetBrainsPure => &["JetBrains", "Annotations"],
            Self::CqsSuppress => &["CQSAnalyzer"],
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::ContractsPure | Self::JetBrainsPure => "PureAttribute",
            Self::CqsSuppress => "CqsSuppressAttribute",
        }
    }

    pub fn qualified_name(&self) -> QualifiedName {
        let mut segments: Vec<String> = self.namespace().iter().map(|s| s.to_string()).collect();
        segments.push(self.type_name().to_string());
        QualifiedName { segments }
    }

    /// Look up an annotation name among the recognized markers
    pub fn resolve(name: &QualifiedName) -> Option<KnownMarker> {
        let type_name = name.type_name()?;
        let key = (name.namespace().join("."), strip_attribute_suffix(type_name));
        MARKER_INDEX.get(&key).copied()
    }
}

impl fmt::Display for KnownMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualified_name())
    }
}

static MARKER_INDEX: Lazy<HashMap<(String, String), KnownMarker>> = Lazy::new(|| {
    KnownMarker::ALL
        .iter()
        .map(|marker| {
            let key = (
                marker.namespace().join("."),
                strip_attribute_suffix(marker.type_name()),
            );
            (key, *marker)
        })
        .collect()
});

fn strip_attribute_suffix(type_name: &str) -> String {
    type_name
        .strip_suffix(ATTRIBUTE_SUFFIX)
        .filter(|base| !base.is_empty())
        .unwrap_or(type_name)
        .to_string()
}

/// Recognized markers attached to a symbol, in declaration order
pub fn markers(symbol: &Symbol) -> impl Iterator<Item = KnownMarker> + '_ {
    symbol.annotations.iter().filter_map(KnownMarker::resolve)
}

pub fn has_marker(symbol: &Symbol, kind: MarkerKind) -> bool {
    markers(symbol).any(|marker| marker.kind() == kind)
}

pub fn has_pure_marker(symbol: &Symbol) -> bool {
    has_marker(symbol, MarkerKind::Pure)
}

pub fn has_suppress_marker(symbol: &Symbol) -> bool {
    has_marker(symbol, MarkerKind::Suppress)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::SymbolKind;

    fn annotated(name: &str) -> Symbol {
        Symbol::new("Query", SymbolKind::Method).with_annotation(name)
    }

    #[test]
    fn test_both_pure_markers_are_recognized() {
        assert!(has_pure_marker(&annotated(
            "System.Diagnostics.Contracts.PureAttribute"
        )));
        assert!(has_pure_marker(&annotated(
            "JetBrains.Annotations.PureAttribute"
        )));
    }

    #[test]
    fn test_attribute_suffix_is_optional() {
        assert_eq!(
            KnownMarker::resolve(&"JetBrains.Annotations.Pure".into()),
            Some(KnownMarker::JetBrainsPure)
        );
        assert_eq!(
            KnownMarker::resolve(&"CQSAnalyzer.CqsSuppress".into()),
            Some(KnownMarker::CqsSuppress)
        );
    }

    #[test]
    fn test_namespace_must_match() {
        assert_eq!(KnownMarker::resolve(&"MyCompany.PureAttribute".into()), None);
        assert_eq!(KnownMarker::resolve(&"PureAttribute".into()), None);
        assert_eq!(
            KnownMarker::resolve(&"System.Diagnostics.PureAttribute".into()),
            None
        );
    }

    #[test]
    fn test_bare_attribute_name_is_not_a_marker() {
        assert_eq!(KnownMarker::resolve(&"CQSAnalyzer.Attribute".into()), None);
    }

    #[test]
    fn test_pure_and_suppress_are_independent() {
        let pure = annotated("System.Diagnostics.Contracts.PureAttribute");
        assert!(!has_suppress_marker(&pure));

        let suppressed = annotated("CQSAnalyzer.CqsSuppressAttribute");
        assert!(has_suppress_marker(&suppressed));
        assert!(!has_pure_marker(&suppressed));
    }

    #[test]
    fn test_qualified_name_round_trips_through_display() {
        for marker in KnownMarker::ALL {
            let name = marker.qualified_name();
            assert_eq!(QualifiedName::parse(&name.to_string()), name);
            assert_eq!(KnownMarker::resolve(&name), Some(marker));
        }
    }

    #[test]
    fn test_unrelated_annotations_are_ignored() {
        let symbol = annotated("System.ObsoleteAttribute")
            .with_annotation("JetBrains.Annotations.Pure");
        let found: Vec<_> = markers(&symbol).collect();
        assert_eq!(found, vec![KnownMarker::JetBrainsPure]);
    }
}
