//! Readers for the configuration files that drive a chemical model builder:
//! SVM grid-search options, model descriptions, fragmentor options and
//! external per-key data tables.

pub mod data;
pub mod error;
pub mod kernels;
pub mod parser;

pub use error::{Error, Result};
pub use parser::MbParser;
pub use parser::description::ModelDescription;
pub use parser::ext::{ExtTable, ExtensionData};
pub use parser::fragmentor::{FragmentorOptions, FragmentorValue};
pub use parser::svm::{SvmGroup, SvmParams};
