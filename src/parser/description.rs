use std::path::Path;

use log::debug;
use serde::Serialize;

use super::read_source;
use crate::error::{Error, Result};

/// Separator between key and value in a model description line.
const SEPARATOR: &str = ":=";

/// Model metadata.  Keys outside this set are dropped on parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModelDescription {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nlim: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tol: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_units: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_structures: Option<String>,
}

impl ModelDescription {
    /// Store one `key := value` entry.  Returns `Ok(false)` for keys outside
    /// the allowed set.
    fn set(&mut self, key: &str, value: &str) -> std::result::Result<bool, String> {
        let float = |v: &str| {
            v.parse::<f64>()
                .map_err(|_| format!("'{key}' expects a number, got '{v}'"))
        };
        match key {
            "nlim" => self.nlim = Some(float(value)?),
            "tol" => self.tol = Some(float(value)?),
            "name" => self.name = Some(value.to_string()),
            "example" => self.example = Some(value.to_string()),
            "description" => self.description = Some(value.to_string()),
            "report_units" => self.report_units = Some(value.to_string()),
            "show_structures" => self.show_structures = Some(value.to_string()),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// Parse a `key := value` model description file.  The last occurrence of a
/// key wins.
pub fn parse_model_description(path: &Path) -> Result<ModelDescription> {
    let text = read_source(path)?;
    let mut desc = ModelDescription::default();

    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let parts: Vec<&str> = line.split(SEPARATOR).map(str::trim).collect();
        let [key, value] = parts.as_slice() else {
            return Err(Error::parse(
                path,
                idx + 1,
                format!("expected exactly one '{SEPARATOR}', found {}", parts.len() - 1),
            ));
        };
        let known = desc
            .set(key, value)
            .map_err(|message| Error::parse(path, idx + 1, message))?;
        if !known {
            debug!("{}:{}: dropping key '{key}'", path.display(), idx + 1);
        }
    }
    Ok(desc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_coerces_numbers() {
        let mut d = ModelDescription::default();
        assert_eq!(d.set("nlim", "0.6"), Ok(true));
        assert_eq!(d.set("tol", "1e-3"), Ok(true));
        assert_eq!(d.set("report_units", "kJ/mol"), Ok(true));
        assert_eq!(d.set("author", "nobody"), Ok(false));
        assert_eq!(d.nlim, Some(0.6));
        assert_eq!(d.tol, Some(0.001));
        assert_eq!(d.report_units.as_deref(), Some("kJ/mol"));
    }

    #[test]
    fn set_rejects_non_numeric_nlim() {
        let mut d = ModelDescription::default();
        assert!(d.set("nlim", "high").is_err());
    }
}
