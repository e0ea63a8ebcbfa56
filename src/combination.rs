//! Comparing and combining several modes at once.

use crate::algebra::{dot_arrays, VectorBase};
use crate::{vector::Vector, ModeError, Result};
use ndarray::Array1;

/// Cosine correlation between two modes or vectors.
///
/// Returns 0.0 when either side has zero length.
pub fn overlap<A, B>(a: &A, b: &B) -> Result<f64>
where
    A: VectorBase + ?Sized,
    B: VectorBase + ?Sized,
{
    let dot_product = dot_arrays(a, b)?;
    let norm_a = a.magnitude()?;
    let norm_b = b.magnitude()?;

    if norm_a == 0.0 || norm_b == 0.0 {
        Ok(0.0)
    } else {
        Ok(dot_product / (norm_a * norm_b))
    }
}

/// Dot product of `vector` with each of `modes`, in order.
pub fn project<V, M>(vector: &V, modes: &[M]) -> Result<Array1<f64>>
where
    V: VectorBase + ?Sized,
    M: VectorBase,
{
    let projections = modes
        .iter()
        .map(|mode| dot_arrays(vector, mode))
        .collect::<Result<Vec<f64>>>()?;
    Ok(Array1::from(projections))
}

/// `coefficients[0] * modes[0] + coefficients[1] * modes[1] + ...`
///
/// The title records each step, as chained `scale` and `add` calls would.
pub fn linear_combination<M: VectorBase>(modes: &[M], coefficients: &[f64]) -> Result<Vector> {
    if modes.len() != coefficients.len() {
        return Err(ModeError::DimensionMismatch {
            left: "modes".to_string(),
            right: "coefficients".to_string(),
            left_len: modes.len(),
            right_len: coefficients.len(),
        });
    }
    let (first, rest) = modes.split_first().ok_or_else(|| ModeError::InvalidOperand {
        operand: "[]".to_string(),
        reason: "cannot combine an empty set of modes".to_string(),
    })?;

    let mut combined = first.scale(coefficients[0])?;
    for (mode, &coefficient) in rest.iter().zip(&coefficients[1..]) {
        let term = mode.scale(coefficient)?;
        combined = combined.add(&term)?;
    }
    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_overlap_of_zero_vector() {
        let zero = Vector::new(array![0.0, 0.0, 0.0]).unwrap();
        let other = Vector::new(array![1.0, 0.0, 0.0]).unwrap();
        assert_eq!(overlap(&zero, &other).unwrap(), 0.0);
    }

    #[test]
    fn test_empty_combination() {
        let modes: Vec<Vector> = Vec::new();
        let err = linear_combination(&modes, &[]).unwrap_err();
        assert!(matches!(err, ModeError::InvalidOperand { .. }));
    }

    #[test]
    fn test_coefficient_count_mismatch() {
        let v = Vector::new(array![1.0, 0.0, 0.0]).unwrap();
        let err = linear_combination(&[v], &[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, ModeError::DimensionMismatch { .. }));
    }
}
