#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc(html_favicon_url = "https://raw.githubusercontent.com/oxigraph/oxigraph/main/logo.svg")]
#![doc(html_logo_url = "https://raw.githubusercontent.com/oxigraph/oxigraph/main/logo.svg")]

mod analyzer;
mod binding;
mod builtin;
mod error;
mod model;
mod reasoner;
mod rule;
mod validator;
pub mod vocab;

pub use crate::analyzer::{Relation, RelationAnalyzer};
pub use crate::binding::{BindingRow, BindingRows, BindingTable};
pub use crate::builtin::{BuiltIn, BuiltInArgument, BuiltInFamily, BuiltInKind};
pub use crate::error::{BuiltInError, ReasonerError, RuleError};
pub use crate::model::{KnowledgeBase, union};
pub use crate::reasoner::{
    Inference, Reasoner, ReasonerConfig, ReasoningReport, StandardRule,
};
pub use crate::rule::{Antecedent, Rule, TermPattern, TriplePattern};
pub use crate::validator::{
    Evidence, EvidenceCategory, ValidationReport, Validator, ValidatorRule,
};
