use std::collections::BTreeMap;
use std::path::Path;

use log::debug;
use serde::Serialize;

use crate::data::model::CellValue;
use crate::data::table::load_table;
use crate::error::{Error, Result};

/// Column naming the key each row of an extension table describes.
pub const EXT_KEY: &str = "EXTKEY";

/// Specifier name that sets the global scalar instead of loading a table.
pub const S_OPTION: &str = "s_option";

/// Rows of one extension table: `EXTKEY` value → `name.column` → value.
pub type ExtTable = BTreeMap<String, BTreeMap<String, CellValue>>;

/// Parsed extension specifiers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtensionData {
    pub s_option: Option<String>,
    /// `None` for flag-only extensions.
    pub data: BTreeMap<String, Option<ExtTable>>,
}

/// Load the table behind a `name:path` specifier.
fn load_ext_table(name: &str, path: &Path) -> Result<ExtTable> {
    let mut table = load_table(path).map_err(|source| Error::Table {
        path: path.to_path_buf(),
        source,
    })?;
    let keys = table.remove_column(EXT_KEY).ok_or_else(|| {
        Error::Config(format!(
            "{}: extension '{name}' has no {EXT_KEY} column",
            path.display()
        ))
    })?;
    table.rename_columns(|c| format!("{name}.{c}"));

    Ok(keys
        .iter()
        .zip(table.rows())
        .map(|(key, row)| {
            let row = row.map(|(col, v)| (col.to_string(), v.clone())).collect();
            (key.to_string(), row)
        })
        .collect())
}

/// Parse extension specifiers of the form `name` or `name:path`.
///
/// `s_option:value` sets [`ExtensionData::s_option`]; a bare `name` is
/// recorded without data.
pub fn parse_ext<S: AsRef<str>>(specs: &[S]) -> Result<ExtensionData> {
    let mut ext = ExtensionData::default();
    for spec in specs {
        let spec = spec.as_ref();
        let (name, arg) = match spec.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (spec, None),
        };

        if name == S_OPTION {
            if let Some(value) = arg {
                ext.s_option = Some(value.to_string());
            }
            continue;
        }
        let data = match arg {
            Some(path) => {
                let rows = load_ext_table(name, Path::new(path))?;
                debug!("extension '{name}': {} keys from {path}", rows.len());
                Some(rows)
            }
            None => None,
        };
        ext.data.insert(name.to_string(), data);
    }
    Ok(ext)
}
