//! Parser layer: the four configuration readers and the facade over them.
//!
//! ```text
//!   svm option files ──► svm          ──► Vec<SvmParams>        (range expands values)
//!   model.txt        ──► description  ──► ModelDescription
//!   fragmentor.cfg   ──► fragmentor   ──► Vec<FragmentorOptions> (data::rdf for templates)
//!   ext specifiers   ──► ext          ──► ExtensionData          (data::table for tables)
//! ```
use std::path::Path;

pub mod description;
pub mod ext;
pub mod fragmentor;
pub mod range;
pub mod svm;

use crate::data::rdf::{RdfReader, ReactionReader};
use crate::error::{Error, Result};

use description::ModelDescription;
use ext::ExtensionData;
use fragmentor::FragmentorOptions;
use svm::SvmParams;

/// Read a whole text file.
pub(crate) fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

// ---------------------------------------------------------------------------
// MbParser – model builder config facade
// ---------------------------------------------------------------------------

/// Entry point for the model builder's configuration files.
///
/// Holds no state between calls; the reaction reader is only used for
/// template and marker files referenced from fragmentor options.
#[derive(Debug, Clone, Default)]
pub struct MbParser<R = RdfReader> {
    reactions: R,
}

impl MbParser {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: ReactionReader> MbParser<R> {
    pub fn with_reaction_reader(reactions: R) -> Self {
        MbParser { reactions }
    }

    /// See [`svm::get_svm_param`].
    pub fn get_svm_param<P: AsRef<Path>>(&self, files: &[P]) -> Result<Vec<SvmParams>> {
        svm::get_svm_param(files)
    }

    /// See [`description::parse_model_description`].
    pub fn parse_model_description(&self, path: impl AsRef<Path>) -> Result<ModelDescription> {
        description::parse_model_description(path.as_ref())
    }

    /// See [`fragmentor::parse_fragmentor_opts`].
    pub fn parse_fragmentor_opts(&self, path: impl AsRef<Path>) -> Result<Vec<FragmentorOptions>> {
        fragmentor::parse_fragmentor_opts(path.as_ref(), &self.reactions)
    }

    /// See [`ext::parse_ext`].
    pub fn parse_ext<S: AsRef<str>>(&self, specs: &[S]) -> Result<ExtensionData> {
        ext::parse_ext(specs)
    }
}
