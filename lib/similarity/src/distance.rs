//! Distance functions between aggregated attribute values
//!
//! All functions return a distance in `[0, inf)` where 0 means identical.
//! Attributes are compared unscaled; bringing them to a common unit is the
//! job of the normalize-by attribute.

/// Distance for a single attribute: `|a - b|`
pub fn absolute_distance(a: f64, b: f64) -> f64 {
    (a - b).abs()
}

/// Euclidean distance between two equally long value vectors.
///
/// Folded with `hypot`, so a one-element vector yields exactly
/// [`absolute_distance`] and large per-capita values do not overflow.
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(x, y)| x - y)
        .fold(0.0, f64::hypot)
}

/// Per-attribute absolute differences, in input order
pub fn contributions<'a>(a: &'a [f64], b: &'a [f64]) -> impl Iterator<Item = f64> + 'a {
    a.iter().zip(b).map(|(x, y)| absolute_distance(*x, *y))
}
