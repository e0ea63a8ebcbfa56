use crate::algebra::{divided_title, negated_title, rscaled_title, scaled_title, Operand, VectorBase};
use crate::{ModeError, Result};
use log::{trace, warn};
use ndarray::{Array1, ArrayBase, ArrayView1, Data, Dimension, Ix1};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Div, DivAssign, Mul, MulAssign, Neg};

const DEFAULT_TITLE: &str = "Unknown";

/// A named array that is not tied to any model.
///
/// Scaling a mode, or adding two modes, gives a `Vector`. Only the title can
/// change after construction; the in-place operations rebind the whole value.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "VectorRecord")]
pub struct Vector {
    title: String,
    array: Array1<f64>,
    is_3d: bool,
}

#[derive(Deserialize)]
struct VectorRecord {
    #[serde(default = "default_title")]
    title: String,
    array: Array1<f64>,
    #[serde(default = "default_is_3d")]
    is_3d: bool,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_is_3d() -> bool {
    true
}

impl TryFrom<VectorRecord> for Vector {
    type Error = ModeError;

    fn try_from(record: VectorRecord) -> Result<Self> {
        Vector::with_title(record.array, record.title, record.is_3d)
    }
}

impl Vector {
    /// A 3D vector titled "Unknown".
    pub fn new(array: Array1<f64>) -> Result<Self> {
        Self::with_title(array, DEFAULT_TITLE, true)
    }

    pub fn with_title(array: Array1<f64>, title: impl ToString, is_3d: bool) -> Result<Self> {
        if is_3d && array.len() % 3 != 0 {
            return Err(ModeError::InvalidConstruction(format!(
                "len(array) must be a multiple of 3, found {}",
                array.len()
            )));
        }
        let title = title.to_string();
        trace!("new vector {:?} with {} elements", title, array.len());
        Ok(Self {
            title,
            array,
            is_3d,
        })
    }

    /// Build from any array, checking that it is one-dimensional.
    pub fn from_array<S, D>(array: ArrayBase<S, D>, title: impl ToString, is_3d: bool) -> Result<Self>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        if array.ndim() != 1 {
            return Err(ModeError::InvalidConstruction(format!(
                "array.ndim must be 1, found {}",
                array.ndim()
            )));
        }
        let array = array
            .into_owned()
            .into_dimensionality::<Ix1>()
            .map_err(|err| ModeError::InvalidConstruction(err.to_string()))?;
        Self::with_title(array, title, is_3d)
    }

    pub fn from_vec(values: Vec<f64>, title: impl ToString, is_3d: bool) -> Result<Self> {
        Self::with_title(Array1::from_vec(values), title, is_3d)
    }

    /// Length is unchanged by the callers, so the 3D invariant still holds.
    fn from_parts(array: Array1<f64>, title: String, is_3d: bool) -> Self {
        Self {
            title,
            array,
            is_3d,
        }
    }

    pub fn get_title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl ToString) {
        self.title = title.to_string();
    }

    /// Live reference to the array.
    pub fn array(&self) -> &Array1<f64> {
        &self.array
    }

    pub fn num_dof(&self) -> usize {
        self.array.len()
    }

    /// Scale to unit length. An all-zero vector gives NaN entries.
    pub fn get_normed(&self) -> Vector {
        let norm = self.array.dot(&self.array).sqrt();
        if norm == 0.0 {
            warn!("normalizing zero-length vector {:?}", self.title);
        }
        Self::from_parts(
            &self.array / norm,
            format!("({0})/||{0}||", self.title),
            self.is_3d,
        )
    }

    pub fn add_in_place<'o, O: Into<Operand<'o>>>(&mut self, other: O) -> Result<()> {
        *self = self.add(other)?;
        Ok(())
    }

    pub fn subtract_in_place<'o, O: Into<Operand<'o>>>(&mut self, other: O) -> Result<()> {
        *self = self.subtract(other)?;
        Ok(())
    }

    /// Only scalars are accepted; a dot product would not be a vector.
    pub fn multiply_in_place<'o, O: Into<Operand<'o>>>(&mut self, other: O) -> Result<()> {
        let factor = other.into().to_scalar()?;
        *self = self.scale(factor)?;
        Ok(())
    }

    pub fn divide_in_place<'o, O: Into<Operand<'o>>>(&mut self, other: O) -> Result<()> {
        *self = self.divide(other)?;
        Ok(())
    }
}

impl VectorBase for Vector {
    fn view(&self) -> Result<ArrayView1<'_, f64>> {
        Ok(self.array.view())
    }

    fn len(&self) -> usize {
        self.array.len()
    }

    /// For a 3D vector this is the length divided by 3.
    fn num_atoms(&self) -> usize {
        if self.is_3d {
            self.array.len() / 3
        } else {
            self.array.len()
        }
    }

    fn is_3d(&self) -> bool {
        self.is_3d
    }

    fn title(&self) -> String {
        self.title.clone()
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

impl fmt::Debug for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Vector: {}>", self.title)
    }
}

impl Neg for &Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector::from_parts(-&self.array, negated_title(&self.title), self.is_3d)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        -&self
    }
}

impl Mul<f64> for &Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        Vector::from_parts(&self.array * rhs, scaled_title(&self.title, rhs), self.is_3d)
    }
}

impl Mul<&Vector> for f64 {
    type Output = Vector;

    fn mul(self, rhs: &Vector) -> Vector {
        Vector::from_parts(&rhs.array * self, rscaled_title(&rhs.title, self), rhs.is_3d)
    }
}

impl Div<f64> for &Vector {
    type Output = Vector;

    fn div(self, rhs: f64) -> Vector {
        Vector::from_parts(&self.array / rhs, divided_title(&self.title, rhs), self.is_3d)
    }
}

impl MulAssign<f64> for Vector {
    fn mul_assign(&mut self, rhs: f64) {
        *self = &*self * rhs;
    }
}

impl DivAssign<f64> for Vector {
    fn div_assign(&mut self, rhs: f64) {
        *self = &*self / rhs;
    }
}
