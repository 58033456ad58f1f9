use std::str::FromStr;

use log::debug;

use crate::error::{Error, Result};

/// Prefix that routes a value (or every point of a range) through the
/// unpack function.
pub const UNPACK_MARKER: char = '^';

/// Numeric types a range spec can expand into.
pub trait RangeValue: Copy + FromStr {
    fn to_f64(self) -> f64;
    fn from_f64(v: f64) -> Self;
}

impl RangeValue for f64 {
    fn to_f64(self) -> f64 {
        self
    }

    fn from_f64(v: f64) -> Self {
        v
    }
}

impl RangeValue for i64 {
    fn to_f64(self) -> f64 {
        self as f64
    }

    fn from_f64(v: f64) -> Self {
        v.round() as i64
    }
}

/// `10^v`.
pub fn pow10<T: RangeValue>(v: T) -> T {
    T::from_f64(10f64.powf(v.to_f64()))
}

/// `count` evenly spaced points from `start` to `stop` inclusive.
///
/// The last point is pinned to `stop`. A descending range (`start > stop`)
/// has no points.
pub fn drange(start: f64, stop: f64, count: usize) -> Result<Vec<f64>> {
    if count < 2 {
        return Err(Error::InvalidRange(format!(
            "{start}:{stop}:{count} needs at least 2 points"
        )));
    }
    if start > stop {
        return Ok(Vec::new());
    }
    let mut points = Vec::new();
    points.try_reserve_exact(count).map_err(|e| {
        Error::InvalidRange(format!("{start}:{stop}:{count}: too many points ({e})"))
    })?;
    let step = (stop - start) / (count - 1) as f64;
    points.extend((0..count).map(|i| if i == count - 1 { stop } else { start + step * i as f64 }));
    Ok(points)
}

/// Expand a comma-separated parameter string.
///
/// Each token is either a single value `v` or a range `start:stop:count`.
/// A leading [`UNPACK_MARKER`] applies `unpack` to the value, or to every
/// point of the range. Tokens with exactly two `:`-separated parts are
/// skipped.
pub fn expand<T: RangeValue>(param: &str, unpack: Option<fn(T) -> T>) -> Result<Vec<T>> {
    let mut res = Vec::new();
    for token in param.split(',') {
        let token = token.trim();
        let (marked, body) = match token.strip_prefix(UNPACK_MARKER) {
            Some(rest) => (true, rest),
            None => (false, token),
        };
        let apply = |v: T| match unpack {
            Some(f) if marked => f(v),
            _ => v,
        };

        let parts: Vec<&str> = body.split(':').collect();
        match parts.len() {
            1 => res.push(apply(parse_value(body, token)?)),
            2 => debug!("ignoring two-part range token '{token}'"),
            _ => {
                let start: T = parse_value(parts[0], token)?;
                let stop: T = parse_value(parts[1], token)?;
                let count: usize = parts[2].trim().parse().map_err(|_| {
                    Error::InvalidRange(format!("'{token}': bad point count '{}'", parts[2]))
                })?;
                res.extend(
                    drange(start.to_f64(), stop.to_f64(), count)?
                        .into_iter()
                        .map(|x| apply(T::from_f64(x))),
                );
            }
        }
    }
    Ok(res)
}

fn parse_value<T: RangeValue>(s: &str, token: &str) -> Result<T> {
    s.trim()
        .parse()
        .map_err(|_| Error::InvalidRange(format!("'{token}': '{s}' is not a number")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-9)
    }

    #[test]
    fn drange_has_exactly_count_points() {
        for &(start, stop, count) in &[(0.0, 1.0, 11), (-3.0, 3.0, 7), (0.1, 0.7, 4), (2.0, 2.0, 3)] {
            let r = drange(start, stop, count).unwrap();
            assert_eq!(r.len(), count);
            assert_eq!(r[0], start);
            assert_eq!(*r.last().unwrap(), stop);
            assert!(r.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn drange_rejects_single_point() {
        assert!(matches!(drange(0.0, 1.0, 1), Err(Error::InvalidRange(_))));
        assert!(matches!(drange(0.0, 1.0, 0), Err(Error::InvalidRange(_))));
    }

    #[test]
    fn drange_rejects_unallocatable_count() {
        assert!(matches!(drange(0.0, 1.0, usize::MAX), Err(Error::InvalidRange(_))));
        let huge = format!("0:1:{}", usize::MAX);
        assert!(matches!(expand::<f64>(&huge, None), Err(Error::InvalidRange(_))));
    }

    #[test]
    fn drange_descending_is_empty() {
        assert!(drange(5.0, 1.0, 3).unwrap().is_empty());
    }

    #[test]
    fn single_values_and_unpack() {
        let v: Vec<f64> = expand("1.5,^2,^-1", Some(pow10::<f64>)).unwrap();
        assert!(close(&v, &[1.5, 100.0, 0.1]));

        // marker without an unpack function is just stripped
        let v: Vec<f64> = expand("^2", None).unwrap();
        assert_eq!(v, vec![2.0]);
    }

    #[test]
    fn ranges_expand_and_unpack_per_point() {
        let v: Vec<f64> = expand("^-1:1:3", Some(pow10::<f64>)).unwrap();
        assert!(close(&v, &[0.1, 1.0, 10.0]));

        let v: Vec<f64> = expand("0:1:3,5", None).unwrap();
        assert!(close(&v, &[0.0, 0.5, 1.0, 5.0]));
    }

    #[test]
    fn integer_ranges_round() {
        let v: Vec<i64> = expand("1:4:4,7", None).unwrap();
        assert_eq!(v, vec![1, 2, 3, 4, 7]);
        let v: Vec<i64> = expand("1:2:3", None).unwrap();
        assert_eq!(v, vec![1, 2, 2]);
    }

    #[test]
    fn two_part_tokens_are_skipped() {
        let v: Vec<f64> = expand("1:2,3", None).unwrap();
        assert_eq!(v, vec![3.0]);
    }

    #[test]
    fn malformed_tokens_fail() {
        assert!(matches!(expand::<f64>("abc", None), Err(Error::InvalidRange(_))));
        assert!(matches!(expand::<f64>("0:1:x", None), Err(Error::InvalidRange(_))));
        assert!(matches!(expand::<f64>("0:1:1", None), Err(Error::InvalidRange(_))));
        assert!(matches!(expand::<f64>("1,", None), Err(Error::InvalidRange(_))));
        assert!(matches!(expand::<i64>("1.5", None), Err(Error::InvalidRange(_))));
    }
}
