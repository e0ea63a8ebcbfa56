//! Shared algebra for modes and vectors.
//!
//! Every arithmetic operation defined here materializes a new [`Vector`],
//! whichever implementor it starts from. A [`Mode`](crate::Mode) is never
//! produced by arithmetic; only a model-indexed eigenvector counts as one.

use crate::{vector::Vector, ModeError, Result};
use log::trace;
use ndarray::{Array1, Array2, ArrayView1, CowArray, Ix2, ShapeError};
use std::fmt;

/// Capability shared by [`Mode`](crate::Mode) and [`Vector`].
///
/// Implementors provide the accessors; the algebra comes for free.
pub trait VectorBase {
    /// Live view of the underlying array. No copy is made.
    fn view(&self) -> Result<ArrayView1<'_, f64>>;

    fn len(&self) -> usize;

    fn num_atoms(&self) -> usize;

    fn is_3d(&self) -> bool;

    /// Label used when composing the titles of derived vectors.
    fn title(&self) -> String;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get_array(&self) -> Result<Array1<f64>> {
        Ok(self.view()?.to_owned())
    }

    fn magnitude(&self) -> Result<f64> {
        let array = self.view()?;
        Ok(array.dot(&array).sqrt())
    }

    fn num_modes(&self) -> usize {
        1
    }

    /// Copy of the array shaped `(num_atoms, 3)`. A 1D value is not passed
    /// through unchanged: it comes back as a `(len, 1)` column so the result
    /// is always two-dimensional.
    fn get_array_nx3(&self) -> Result<Array2<f64>> {
        let shape = nx3_shape(self);
        self.get_array()?.into_shape(shape).map_err(shape_error)
    }

    /// Like [`get_array_nx3`](Self::get_array_nx3), including the `(len, 1)`
    /// shape for 1D values, but borrows when the memory is contiguous.
    fn view_nx3(&self) -> Result<CowArray<'_, f64, Ix2>> {
        let shape = nx3_shape(self);
        let view = self.view()?;
        if view.is_standard_layout() {
            let reshaped = view.into_shape(shape).map_err(shape_error)?;
            Ok(CowArray::from(reshaped))
        } else {
            let owned = view.to_owned().into_shape(shape).map_err(shape_error)?;
            Ok(CowArray::from(owned))
        }
    }

    fn negate(&self) -> Result<Vector> {
        let result = -&self.view()?;
        promote(result, negated_title(&self.title()), self.is_3d())
    }

    fn add<'o, O>(&self, other: O) -> Result<Vector>
    where
        Self: Sized,
        O: Into<Operand<'o>>,
    {
        let other = other.into().require_vector()?;
        let (left, right) = paired_views(self, other)?;
        let result = &left + &right;
        let title = format!("({}) + ({})", self.title(), other.title());
        promote(result, title, self.is_3d())
    }

    /// `other + self`; the 3D flag still comes from `self`.
    fn radd<'o, O>(&self, other: O) -> Result<Vector>
    where
        Self: Sized,
        O: Into<Operand<'o>>,
    {
        let other = other.into().require_vector()?;
        let (left, right) = paired_views(self, other)?;
        let result = &right + &left;
        let title = format!("({}) + ({})", other.title(), self.title());
        promote(result, title, self.is_3d())
    }

    fn subtract<'o, O>(&self, other: O) -> Result<Vector>
    where
        Self: Sized,
        O: Into<Operand<'o>>,
    {
        let other = other.into().require_vector()?;
        let (left, right) = paired_views(self, other)?;
        let result = &left - &right;
        let title = format!("({}) - ({})", self.title(), other.title());
        promote(result, title, self.is_3d())
    }

    /// `other - self`; the 3D flag still comes from `self`.
    fn rsub<'o, O>(&self, other: O) -> Result<Vector>
    where
        Self: Sized,
        O: Into<Operand<'o>>,
    {
        let other = other.into().require_vector()?;
        let (left, right) = paired_views(self, other)?;
        let result = &right - &left;
        let title = format!("({}) - ({})", other.title(), self.title());
        promote(result, title, self.is_3d())
    }

    fn dot<'o, O>(&self, other: O) -> Result<f64>
    where
        Self: Sized,
        O: Into<Operand<'o>>,
    {
        let other = other.into().require_vector()?;
        dot_arrays(self, other)
    }

    fn scale(&self, factor: f64) -> Result<Vector>
    where
        Self: Sized,
    {
        let result = &self.view()? * factor;
        promote(result, scaled_title(&self.title(), factor), self.is_3d())
    }

    /// `c * self`. Same array as [`scale`](Self::scale), reflected title.
    fn rscale(&self, factor: f64) -> Result<Vector>
    where
        Self: Sized,
    {
        let result = &self.view()? * factor;
        promote(result, rscaled_title(&self.title(), factor), self.is_3d())
    }

    /// Dot product when `other` is a mode or vector, scaling otherwise.
    fn multiply<'o, O>(&self, other: O) -> Result<Product>
    where
        Self: Sized,
        O: Into<Operand<'o>>,
    {
        let other = other.into();
        match other.as_vector() {
            Some(vector) => dot_arrays(self, vector).map(Product::Scalar),
            None => self.scale(other.to_scalar()?).map(Product::Vector),
        }
    }

    /// Reflected [`multiply`](Self::multiply).
    fn rmultiply<'o, O>(&self, other: O) -> Result<Product>
    where
        Self: Sized,
        O: Into<Operand<'o>>,
    {
        let other = other.into();
        match other.as_vector() {
            Some(vector) => dot_arrays(vector, self).map(Product::Scalar),
            None => self.rscale(other.to_scalar()?).map(Product::Vector),
        }
    }

    fn divide<'o, O>(&self, other: O) -> Result<Vector>
    where
        Self: Sized,
        O: Into<Operand<'o>>,
    {
        let divisor = other.into().to_scalar()?;
        let result = &self.view()? / divisor;
        promote(result, divided_title(&self.title(), divisor), self.is_3d())
    }

    fn power<'o, O>(&self, other: O) -> Result<Vector>
    where
        Self: Sized,
        O: Into<Operand<'o>>,
    {
        let exponent = other.into().to_scalar()?;
        let result = self.view()?.mapv(|x| x.powf(exponent));
        let title = format!("({})**{}", self.title(), exponent);
        promote(result, title, self.is_3d())
    }
}

/// Right-hand side of an algebra operation.
///
/// Dispatch checks for a mode or vector first, then tries scalar coercion.
pub enum Operand<'a> {
    Vector(&'a dyn VectorBase),
    Scalar(f64),
    /// Loosely typed input, accepted as a scalar when it holds a JSON number.
    Dynamic(serde_json::Value),
}

impl<'a> Operand<'a> {
    pub fn as_vector(&self) -> Option<&'a dyn VectorBase> {
        match self {
            Operand::Vector(vector) => Some(*vector),
            _ => None,
        }
    }

    pub fn to_scalar(&self) -> Result<f64> {
        match self {
            Operand::Scalar(value) => Ok(*value),
            Operand::Dynamic(value) => value.as_f64().ok_or_else(|| ModeError::InvalidOperand {
                operand: value.to_string(),
                reason: "value cannot be coerced to a scalar".to_string(),
            }),
            Operand::Vector(vector) => Err(ModeError::InvalidOperand {
                operand: vector.title(),
                reason: "expected a scalar, found a mode or vector".to_string(),
            }),
        }
    }

    fn require_vector(self) -> Result<&'a dyn VectorBase> {
        match self {
            Operand::Vector(vector) => Ok(vector),
            other => Err(ModeError::InvalidOperand {
                operand: other.to_string(),
                reason: "not a mode or vector instance".to_string(),
            }),
        }
    }
}

impl fmt::Display for Operand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Vector(vector) => write!(f, "{}", vector.title()),
            Operand::Scalar(value) => write!(f, "{}", value),
            Operand::Dynamic(value) => write!(f, "{}", value),
        }
    }
}

impl<'a, T: VectorBase + 'a> From<&'a T> for Operand<'a> {
    fn from(value: &'a T) -> Self {
        Operand::Vector(value)
    }
}

impl From<f64> for Operand<'_> {
    fn from(value: f64) -> Self {
        Operand::Scalar(value)
    }
}

impl From<i32> for Operand<'_> {
    fn from(value: i32) -> Self {
        Operand::Scalar(f64::from(value))
    }
}

impl From<serde_json::Value> for Operand<'_> {
    fn from(value: serde_json::Value) -> Self {
        Operand::Dynamic(value)
    }
}

/// Result of [`VectorBase::multiply`]: a dot product or a scaled vector.
#[derive(Debug, Clone, PartialEq)]
pub enum Product {
    Scalar(f64),
    Vector(Vector),
}

impl Product {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Product::Scalar(value) => Some(*value),
            Product::Vector(_) => None,
        }
    }

    pub fn into_vector(self) -> Option<Vector> {
        match self {
            Product::Vector(vector) => Some(vector),
            Product::Scalar(_) => None,
        }
    }
}

/// Lengths are compared on the arrays actually read, not on `len()`, which a
/// model may report inconsistently with its eigenvector matrix.
fn paired_views<'l, 'r, L, R>(
    left: &'l L,
    right: &'r R,
) -> Result<(ArrayView1<'l, f64>, ArrayView1<'r, f64>)>
where
    L: VectorBase + ?Sized,
    R: VectorBase + ?Sized,
{
    let (left_view, right_view) = (left.view()?, right.view()?);
    if left_view.len() != right_view.len() {
        return Err(ModeError::DimensionMismatch {
            left: left.title(),
            right: right.title(),
            left_len: left_view.len(),
            right_len: right_view.len(),
        });
    }
    Ok((left_view, right_view))
}

pub(crate) fn dot_arrays<L, R>(left: &L, right: &R) -> Result<f64>
where
    L: VectorBase + ?Sized,
    R: VectorBase + ?Sized,
{
    let (left, right) = paired_views(left, right)?;
    Ok(left.dot(&right))
}

pub(crate) fn negated_title(title: &str) -> String {
    format!("-({})", title)
}

pub(crate) fn scaled_title(title: &str, factor: f64) -> String {
    format!("({})*{}", title, factor)
}

pub(crate) fn rscaled_title(title: &str, factor: f64) -> String {
    format!("{}*({})", factor, title)
}

pub(crate) fn divided_title(title: &str, divisor: f64) -> String {
    format!("({})/{}", title, divisor)
}

fn promote(array: Array1<f64>, title: String, is_3d: bool) -> Result<Vector> {
    trace!("promoting {} elements to vector {:?}", array.len(), title);
    Vector::with_title(array, title, is_3d)
}

fn nx3_shape<T: VectorBase + ?Sized>(value: &T) -> (usize, usize) {
    if value.is_3d() {
        (value.num_atoms(), 3)
    } else {
        (value.len(), 1)
    }
}

fn shape_error(err: ShapeError) -> ModeError {
    ModeError::InvalidConstruction(format!("cannot reshape to (N, 3): {}", err))
}
