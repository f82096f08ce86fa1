//! The command-query separation engine.
//!
//! Leaf components first: shape classification, body effect scanning and
//! the severity policy; [`cqs_rule`] drives them per callable unit.

pub mod cqs_rule;
pub mod effect_scanner;
pub mod shape_classifier;
pub mod violation_policy;

pub use cqs_rule::{CqsRule, FindingSink, REGISTERED_KINDS};
pub use effect_scanner::{BodyEffect, EffectKind, WriteScope};
pub use shape_classifier::{ParameterPresence, ReturnShape, Shape};
pub use violation_policy::SuppressionContext;
