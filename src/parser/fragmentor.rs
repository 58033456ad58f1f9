use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::debug;
use serde::Serialize;

use super::read_source;
use crate::data::rdf::{ReactionReader, ReactionRecord};
use crate::error::{Error, Result};

/// A fragmentor option value after interpretation by key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FragmentorValue {
    Text(String),
    Flag(bool),
    List(Vec<String>),
    Reactions(Vec<ReactionRecord>),
}

/// Options of one fragmentor run (one line of the option file).
pub type FragmentorOptions = BTreeMap<String, FragmentorValue>;

/// How the value of a key is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    /// `a|b|c`
    List,
    /// Path to a reaction file.
    Reactions,
    /// Path to a text file, replaced by its contents.
    FileText,
    /// `True` / `False` become flags, anything else stays text.
    Raw,
}

fn field_kind(key: &str) -> FieldKind {
    match key {
        "header" => FieldKind::List,
        "cgr_marker" | "cgr_b_templates" | "cgr_m_templates" => FieldKind::Reactions,
        "marker_rules" | "standardize" | "docolor" | "cgr_marker_preprocess"
        | "cgr_marker_postprocess" => FieldKind::FileText,
        _ => FieldKind::Raw,
    }
}

fn parse_value(key: &str, value: &str, reader: &dyn ReactionReader) -> Result<FragmentorValue> {
    Ok(match field_kind(key) {
        FieldKind::List => {
            FragmentorValue::List(value.split('|').map(|s| s.trim().to_string()).collect())
        }
        FieldKind::Reactions => {
            let file = File::open(value).map_err(|e| Error::io(value, e))?;
            let records = reader
                .read_records(&mut BufReader::new(file))
                .map_err(|e| Error::io(value, e))?;
            debug!("{key}: {} reactions from {value}", records.len());
            FragmentorValue::Reactions(records)
        }
        FieldKind::FileText => FragmentorValue::Text(read_source(Path::new(value))?),
        FieldKind::Raw => match value {
            "True" => FragmentorValue::Flag(true),
            "False" => FragmentorValue::Flag(false),
            _ => FragmentorValue::Text(value.to_string()),
        },
    })
}

/// Parse a fragmentor option file: one option set per non-blank line of
/// space-separated `key=value` tokens.
pub fn parse_fragmentor_opts(
    path: &Path,
    reader: &dyn ReactionReader,
) -> Result<Vec<FragmentorOptions>> {
    let text = read_source(path)?;
    let mut params = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let mut opts = FragmentorOptions::new();
        for token in line.split_whitespace() {
            let Some((key, value)) = token.split_once('=') else {
                return Err(Error::parse(
                    path,
                    idx + 1,
                    format!("'{token}' is not a key=value pair"),
                ));
            };
            let key = key.trim();
            opts.insert(key.to_string(), parse_value(key, value.trim(), reader)?);
        }
        params.push(opts);
    }
    debug!("{}: {} fragmentor option sets", path.display(), params.len());
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::rdf::RdfReader;

    #[test]
    fn keys_pick_their_interpretation() {
        assert_eq!(field_kind("header"), FieldKind::List);
        assert_eq!(field_kind("cgr_b_templates"), FieldKind::Reactions);
        assert_eq!(field_kind("docolor"), FieldKind::FileText);
        assert_eq!(field_kind("fragment_type"), FieldKind::Raw);
    }

    #[test]
    fn raw_values_coerce_literals() {
        let r = RdfReader;
        assert_eq!(parse_value("doallways", "True", &r).unwrap(), FragmentorValue::Flag(true));
        assert_eq!(parse_value("useformalcharge", "False", &r).unwrap(), FragmentorValue::Flag(false));
        assert_eq!(
            parse_value("min_length", "2", &r).unwrap(),
            FragmentorValue::Text("2".into())
        );
        // only the exact literals are flags
        assert_eq!(
            parse_value("x", "true", &r).unwrap(),
            FragmentorValue::Text("true".into())
        );
    }

    #[test]
    fn header_splits_on_pipes() {
        assert_eq!(
            parse_value("header", "a| b |c", &RdfReader).unwrap(),
            FragmentorValue::List(vec!["a".into(), "b".into(), "c".into()])
        );
    }

    #[test]
    fn missing_referenced_file_is_io_error() {
        let err = parse_value("standardize", "/nonexistent/std.xml", &RdfReader).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        let err = parse_value("cgr_marker", "/nonexistent/m.rdf", &RdfReader).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
