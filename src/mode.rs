use crate::algebra::VectorBase;
use crate::model::NormalModeModel;
use crate::{ModeError, Result};
use ndarray::{Array1, ArrayView1, Axis};
use std::fmt;

/// One eigenvector/eigenvalue pair of a model, addressed by index.
///
/// A mode holds a shared borrow of its model, so the model cannot be
/// resized while the mode is alive. The index is stored verbatim and is
/// checked only when the model's arrays are read; an out-of-range mode fails
/// with [`ModeError::IndexOutOfRange`] at that point.
pub struct Mode<'m, M: NormalModeModel + ?Sized> {
    model: &'m M,
    index: usize,
}

impl<'m, M: NormalModeModel + ?Sized> Mode<'m, M> {
    pub fn new(model: &'m M, index: usize) -> Self {
        Self { model, index }
    }

    pub fn get_index(&self) -> usize {
        self.index
    }

    pub fn get_model(&self) -> &'m M {
        self.model
    }

    pub fn get_title(&self) -> String {
        self.to_string()
    }

    pub fn num_dof(&self) -> usize {
        self.model.num_dof()
    }

    pub fn get_eigvec(&self) -> Result<Array1<f64>> {
        self.get_array()
    }

    /// Eigenvalue of the mode. Covariance-derived models report it in
    /// squared length units; elastic network models in arbitrary units that
    /// correlate with the stiffness of the motion.
    pub fn get_eigval(&self) -> Result<f64> {
        self.lookup(self.model.eigvals())
    }

    pub fn get_variance(&self) -> Result<f64> {
        self.lookup(self.model.variances())
    }

    fn lookup(&self, values: ArrayView1<'_, f64>) -> Result<f64> {
        values
            .get(self.index)
            .copied()
            .ok_or(ModeError::IndexOutOfRange {
                index: self.index,
                num_modes: values.len(),
            })
    }
}

impl<M: NormalModeModel + ?Sized> VectorBase for Mode<'_, M> {
    fn view(&self) -> Result<ArrayView1<'_, f64>> {
        let eigvecs = self.model.eigvecs();
        if self.index >= eigvecs.ncols() {
            return Err(ModeError::IndexOutOfRange {
                index: self.index,
                num_modes: eigvecs.ncols(),
            });
        }
        Ok(eigvecs.index_axis_move(Axis(1), self.index))
    }

    fn len(&self) -> usize {
        self.model.num_dof()
    }

    fn num_atoms(&self) -> usize {
        self.model.num_atoms()
    }

    fn is_3d(&self) -> bool {
        self.model.is_3d()
    }

    fn title(&self) -> String {
        self.to_string()
    }
}

impl<M: NormalModeModel + ?Sized> Clone for Mode<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: NormalModeModel + ?Sized> Copy for Mode<'_, M> {}

impl<M: NormalModeModel + ?Sized> fmt::Display for Mode<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mode {} from {}", self.index + 1, self.model.title())
    }
}

impl<M: NormalModeModel + ?Sized> fmt::Debug for Mode<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Mode: {} from {}>", self.index + 1, self.model.title())
    }
}

impl<M: NormalModeModel + ?Sized> From<&Mode<'_, M>> for usize {
    fn from(mode: &Mode<'_, M>) -> Self {
        mode.index
    }
}

impl<M: NormalModeModel + ?Sized> TryFrom<&Mode<'_, M>> for f64 {
    type Error = ModeError;

    fn try_from(mode: &Mode<'_, M>) -> Result<Self> {
        mode.get_eigval()
    }
}
