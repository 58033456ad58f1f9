use std::fmt;

use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Kernel registry
// ---------------------------------------------------------------------------

/// SVM kernel shapes understood by the grid-search config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KernelKind {
    /// `u'*v`
    Linear,
    /// `(gamma*u'*v + coef0)^degree`
    Poly,
    /// `exp(-gamma*|u-v|^2)`
    Rbf,
    /// `tanh(gamma*u'*v + coef0)`
    Sigmoid,
    Tanimoto,
}

impl KernelKind {
    /// Map a libsvm-style `-t` code.
    pub fn from_code(code: &str) -> Option<KernelKind> {
        match code {
            "0" => Some(KernelKind::Linear),
            "1" => Some(KernelKind::Poly),
            "2" => Some(KernelKind::Rbf),
            "3" => Some(KernelKind::Sigmoid),
            "t" => Some(KernelKind::Tanimoto),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            KernelKind::Linear => "linear",
            KernelKind::Poly => "poly",
            KernelKind::Rbf => "rbf",
            KernelKind::Sigmoid => "sigmoid",
            KernelKind::Tanimoto => "tanimoto",
        }
    }

    pub fn uses_gamma(self) -> bool {
        matches!(self, KernelKind::Poly | KernelKind::Rbf | KernelKind::Sigmoid)
    }

    pub fn uses_coef0(self) -> bool {
        matches!(self, KernelKind::Poly | KernelKind::Sigmoid)
    }

    pub fn uses_degree(self) -> bool {
        self == KernelKind::Poly
    }
}

impl fmt::Display for KernelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Gram-matrix function: rows of `x` against rows of `y`.
pub type KernelFn = fn(&[Vec<f64>], &[Vec<f64>]) -> Vec<Vec<f64>>;

/// Kernel as handed to the SVM: a built-in kernel by name, or a callable.
#[derive(Clone, Copy)]
pub enum KernelRef {
    Named(KernelKind),
    Function(KernelKind, KernelFn),
}

impl KernelRef {
    /// Resolve through the registry: callables win over names.
    pub fn resolve(kind: KernelKind) -> KernelRef {
        match kernel_function(kind) {
            Some(f) => KernelRef::Function(kind, f),
            None => KernelRef::Named(kind),
        }
    }

    pub fn kind(&self) -> KernelKind {
        match self {
            KernelRef::Named(k) | KernelRef::Function(k, _) => *k,
        }
    }

    pub fn function(&self) -> Option<KernelFn> {
        match self {
            KernelRef::Named(_) => None,
            KernelRef::Function(_, f) => Some(*f),
        }
    }
}

impl fmt::Debug for KernelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelRef::Named(k) => write!(f, "Named({k})"),
            KernelRef::Function(k, _) => write!(f, "Function({k})"),
        }
    }
}

impl PartialEq for KernelRef {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.function().is_some() == other.function().is_some()
    }
}

impl Serialize for KernelRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.kind().name())
    }
}

/// Callable implementations for kernels the SVM backend lacks.
pub fn kernel_function(kind: KernelKind) -> Option<KernelFn> {
    match kind {
        KernelKind::Tanimoto => Some(tanimoto_kernel),
        _ => None,
    }
}

/// Tanimoto similarity `<a,b> / (|a|^2 + |b|^2 - <a,b>)` for every pair of rows.
pub fn tanimoto_kernel(x: &[Vec<f64>], y: &[Vec<f64>]) -> Vec<Vec<f64>> {
    fn dot(a: &[f64], b: &[f64]) -> f64 {
        a.iter().zip(b).map(|(p, q)| p * q).sum()
    }
    let y_norms: Vec<f64> = y.iter().map(|b| dot(b, b)).collect();

    x.iter()
        .map(|a| {
            let a_norm = dot(a, a);
            y.iter()
                .zip(&y_norms)
                .map(|(b, b_norm)| {
                    let ab = dot(a, b);
                    let denom = a_norm + b_norm - ab;
                    if denom == 0.0 { 0.0 } else { ab / denom }
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_to_kernels() {
        assert_eq!(KernelKind::from_code("0"), Some(KernelKind::Linear));
        assert_eq!(KernelKind::from_code("t"), Some(KernelKind::Tanimoto));
        assert_eq!(KernelKind::from_code("9"), None);
        assert_eq!(KernelKind::Sigmoid.to_string(), "sigmoid");
    }

    #[test]
    fn only_tanimoto_is_callable() {
        assert!(KernelRef::resolve(KernelKind::Tanimoto).function().is_some());
        assert!(KernelRef::resolve(KernelKind::Rbf).function().is_none());
    }

    #[test]
    fn tanimoto_on_binary_fingerprints() {
        let x = vec![vec![1.0, 1.0, 0.0], vec![0.0, 0.0, 0.0]];
        let y = vec![vec![1.0, 0.0, 1.0], vec![1.0, 1.0, 0.0]];
        let k = tanimoto_kernel(&x, &y);
        assert_eq!(k.len(), 2);
        assert!((k[0][0] - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(k[0][1], 1.0);
        assert_eq!(k[1][1], 0.0);
    }
}
