use std::collections::BTreeMap;
use std::io::{self, BufRead};

use serde::Serialize;

// ---------------------------------------------------------------------------
// ReactionRecord – one entry of a reaction data file
// ---------------------------------------------------------------------------

/// A reaction (or molecule) entry.  The structure block is kept as raw text;
/// only the `$DTYPE`/`$DATUM` annotations are split out.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReactionRecord {
    /// `$RXN` / molfile block, newline-joined.
    pub body: String,
    /// `$DTYPE name` → `$DATUM value`.
    pub data: BTreeMap<String, String>,
}

/// Reads reaction records from a text stream.
pub trait ReactionReader {
    fn read_records(&self, input: &mut dyn BufRead) -> io::Result<Vec<ReactionRecord>>;
}

// ---------------------------------------------------------------------------
// RdfReader – MDL RDfile splitter
// ---------------------------------------------------------------------------

/// Splits an RDfile into records at each `$RFMT` / `$MFMT` header.
#[derive(Debug, Clone, Copy, Default)]
pub struct RdfReader;

impl ReactionReader for RdfReader {
    fn read_records(&self, input: &mut dyn BufRead) -> io::Result<Vec<ReactionRecord>> {
        let mut records = Vec::new();
        let mut current: Option<ReactionRecord> = None;
        let mut pending_dtype: Option<String> = None;
        let mut body: Vec<String> = Vec::new();

        let mut flush = |rec: Option<ReactionRecord>, body: &mut Vec<String>| {
            if let Some(mut rec) = rec {
                rec.body = body.join("\n");
                records.push(rec);
            }
            body.clear();
        };

        for line in input.lines() {
            let line = line?;
            let trimmed = line.trim_end();

            if trimmed.starts_with("$RDFILE") || trimmed.starts_with("$DATM") {
                continue;
            }
            if trimmed.starts_with("$RFMT") || trimmed.starts_with("$MFMT") {
                flush(current.take(), &mut body);
                pending_dtype = None;
                current = Some(ReactionRecord::default());
                continue;
            }
            if let Some(name) = trimmed.strip_prefix("$DTYPE") {
                pending_dtype = Some(name.trim().to_string());
                continue;
            }
            if let Some(value) = trimmed.strip_prefix("$DATUM") {
                if let (Some(name), Some(rec)) = (pending_dtype.take(), current.as_mut()) {
                    rec.data.insert(name, value.trim().to_string());
                }
                continue;
            }

            // bare $RXN without a preceding header starts its own record
            if current.is_none() && !trimmed.is_empty() {
                current = Some(ReactionRecord::default());
            }
            if current.is_some() {
                body.push(trimmed.to_string());
            }
        }
        flush(current.take(), &mut body);

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RDF: &str = "\
$RDFILE 1
$DATM    01/01/17 00:00
$RFMT
$RXN

  marker

  1  1
$DTYPE class
$DATUM ester
$DTYPE yield
$DATUM 87
$RFMT
$RXN
second
";

    #[test]
    fn splits_records_and_data() {
        let records = RdfReader.read_records(&mut RDF.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].data["class"], "ester");
        assert_eq!(records[0].data["yield"], "87");
        assert!(records[0].body.starts_with("$RXN\n"));
        assert!(records[0].body.contains("marker"));
        assert_eq!(records[1].body, "$RXN\nsecond");
        assert!(records[1].data.is_empty());
    }

    #[test]
    fn headerless_block_is_one_record() {
        let records = RdfReader.read_records(&mut "$RXN\nbody\n".as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].body, "$RXN\nbody");
    }

    #[test]
    fn empty_input_yields_nothing() {
        let records = RdfReader.read_records(&mut "".as_bytes()).unwrap();
        assert!(records.is_empty());
    }
}
