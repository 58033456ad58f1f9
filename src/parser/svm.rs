use std::collections::BTreeMap;
use std::path::Path;

use log::{debug, info, warn};
use serde::Serialize;

use super::range::{expand, pow10};
use super::read_source;
use crate::error::{Error, Result};
use crate::kernels::{KernelKind, KernelRef};

// ---------------------------------------------------------------------------
// SvmGroup – the grid for one kernel
// ---------------------------------------------------------------------------

/// Candidate hyperparameter values for one kernel.  Extras a kernel does not
/// use stay empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SvmGroup {
    pub kernel: KernelRef,
    #[serde(rename = "C")]
    pub c: Vec<f64>,
    pub epsilon: Vec<f64>,
    pub tol: Vec<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub gamma: Vec<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub coef0: Vec<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub degree: Vec<i64>,
}

/// Groups of one config file, keyed by kernel.
pub type SvmParams = BTreeMap<KernelKind, SvmGroup>;

impl SvmGroup {
    fn from_line(kind: KernelKind, opts: &LineOptions) -> Self {
        let pick = |used: bool, v: &Vec<f64>| if used { v.clone() } else { Vec::new() };
        SvmGroup {
            kernel: KernelRef::resolve(kind),
            c: opts.c.clone(),
            epsilon: opts.epsilon.clone(),
            tol: opts.tol.clone(),
            gamma: pick(kind.uses_gamma(), &opts.gamma),
            coef0: pick(kind.uses_coef0(), &opts.coef0),
            degree: if kind.uses_degree() { opts.degree.clone() } else { Vec::new() },
        }
    }

    /// Concatenate another group of the same kernel onto this one.
    fn extend(&mut self, other: SvmGroup) {
        self.c.extend(other.c);
        self.epsilon.extend(other.epsilon);
        self.tol.extend(other.tol);
        self.gamma.extend(other.gamma);
        self.coef0.extend(other.coef0);
        self.degree.extend(other.degree);
    }
}

// ---------------------------------------------------------------------------
// One option line
// ---------------------------------------------------------------------------

/// Options of a single line, seeded with the libsvm defaults.
#[derive(Debug, Clone, PartialEq)]
struct LineOptions {
    kernels: Vec<KernelKind>,
    c: Vec<f64>,
    epsilon: Vec<f64>,
    tol: Vec<f64>,
    degree: Vec<i64>,
    gamma: Vec<f64>,
    coef0: Vec<f64>,
}

impl Default for LineOptions {
    fn default() -> Self {
        Self {
            kernels: vec![KernelKind::Rbf],
            c: vec![1.0],
            epsilon: vec![0.1],
            tol: vec![0.001],
            degree: vec![3],
            gamma: vec![1.0],
            coef0: vec![0.0],
        }
    }
}

impl LineOptions {
    /// Parse `-flag value` pairs.  Unknown flags and a trailing unpaired
    /// token are ignored.  The flag tells whether any known flag was seen.
    fn parse(line: &str, path: &Path, line_no: usize) -> Result<(Self, bool)> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let mut opts = LineOptions::default();
        let mut recognized = false;

        for pair in tokens.chunks_exact(2) {
            let (flag, value) = (pair[0], pair[1]);
            let applied = match flag {
                "-t" => parse_kernels(value)
                    .map(|k| opts.kernels = k)
                    .map_err(|code| {
                        Error::parse(path, line_no, format!("unknown kernel code '{code}'"))
                    }),
                "-c" => expand(value, Some(pow10::<f64>)).map(|v| opts.c = v),
                "-d" => expand(value, None).map(|v| opts.degree = v),
                "-e" => expand(value, Some(pow10::<f64>)).map(|v| opts.tol = v),
                "-p" => expand(value, Some(pow10::<f64>)).map(|v| opts.epsilon = v),
                "-g" => expand(value, Some(pow10::<f64>)).map(|v| opts.gamma = v),
                "-r" => expand(value, None).map(|v| opts.coef0 = v),
                other => {
                    debug!("ignoring svm flag '{other}'");
                    continue;
                }
            };
            applied.map_err(|e| e.at_line(path, line_no))?;
            recognized = true;
        }
        Ok((opts, recognized))
    }
}

/// Kernel codes of `-t`; the offending code on failure.
fn parse_kernels(value: &str) -> std::result::Result<Vec<KernelKind>, String> {
    value
        .split(',')
        .map(|code| KernelKind::from_code(code.trim()).ok_or_else(|| code.to_string()))
        .collect()
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Parse one SVM option file into per-kernel groups.
///
/// Every non-blank line contributes its expanded values (defaults included)
/// to each kernel it names via `-t`; lines naming the same kernel are
/// concatenated in order.  A file in which no line carries a known flag
/// yields no groups.
pub fn parse_svm_file(path: &Path) -> Result<SvmParams> {
    let text = read_source(path)?;

    let (groups, any_recognized) = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .try_fold(
            (SvmParams::new(), false),
            |(mut groups, any_recognized), (idx, line)| -> Result<(SvmParams, bool)> {
                let (opts, recognized) = LineOptions::parse(line, path, idx + 1)?;
                if !recognized {
                    debug!(
                        "{}:{}: no recognized svm flags, using defaults",
                        path.display(),
                        idx + 1
                    );
                }
                for &kind in &opts.kernels {
                    let group = SvmGroup::from_line(kind, &opts);
                    match groups.get_mut(&kind) {
                        Some(existing) => existing.extend(group),
                        None => {
                            groups.insert(kind, group);
                        }
                    }
                }
                Ok((groups, any_recognized || recognized))
            },
        )?;

    Ok(if any_recognized { groups } else { SvmParams::new() })
}

/// Parse a set of SVM option files.  Files yielding no groups are skipped;
/// it is an error if none yields any.
pub fn get_svm_param<P: AsRef<Path>>(files: &[P]) -> Result<Vec<SvmParams>> {
    let mut res = Vec::with_capacity(files.len());
    for file in files {
        let path = file.as_ref();
        let groups = parse_svm_file(path)?;
        if groups.is_empty() {
            warn!("{}: no svm options", path.display());
        } else {
            debug!("{}: {} kernel groups", path.display(), groups.len());
            res.push(groups);
        }
    }
    if res.is_empty() {
        return Err(Error::Config("Incorrect SVM config files".to_string()));
    }
    info!("loaded svm grids from {} files", res.len());
    Ok(res)
}
