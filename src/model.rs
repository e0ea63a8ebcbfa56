use crate::{mode::Mode, ModeError, Result};
use log::debug;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use std::fmt;

/// What a model must expose for its modes to be read.
///
/// Columns of [`eigvecs`](Self::eigvecs) are modes, rows are degrees of
/// freedom. [`eigvals`](Self::eigvals) and [`variances`](Self::variances) are
/// indexed by the same mode index.
pub trait NormalModeModel {
    fn title(&self) -> &str;

    fn is_3d(&self) -> bool;

    fn num_atoms(&self) -> usize;

    fn num_dof(&self) -> usize {
        if self.is_3d() {
            self.num_atoms() * 3
        } else {
            self.num_atoms()
        }
    }

    fn num_modes(&self) -> usize {
        self.eigvecs().ncols()
    }

    fn eigvecs(&self) -> ArrayView2<'_, f64>;

    fn eigvals(&self) -> ArrayView1<'_, f64>;

    fn variances(&self) -> ArrayView1<'_, f64>;
}

/// How eigenvalues relate to variances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EigenUnits {
    /// Elastic network models: eigenvalues correlate with stiffness and the
    /// variance is their inverse.
    Stiffness,
    /// Covariance-derived models: eigenvalues are variances, in squared
    /// length units.
    Covariance,
}

/// In-memory normal mode analysis results.
#[derive(Debug, Clone)]
pub struct NMA {
    title: String,
    is_3d: bool,
    units: EigenUnits,
    num_atoms: usize,
    eigvecs: Array2<f64>,
    eigvals: Array1<f64>,
    variances: Array1<f64>,
}

impl NMA {
    pub fn new(title: impl ToString, is_3d: bool, units: EigenUnits) -> Self {
        Self {
            title: title.to_string(),
            is_3d,
            units,
            num_atoms: 0,
            eigvecs: Array2::zeros((0, 0)),
            eigvals: Array1::zeros(0),
            variances: Array1::zeros(0),
        }
    }

    pub fn anm(title: impl ToString) -> Self {
        Self::new(title, true, EigenUnits::Stiffness)
    }

    pub fn gnm(title: impl ToString) -> Self {
        Self::new(title, false, EigenUnits::Stiffness)
    }

    pub fn pca(title: impl ToString) -> Self {
        Self::new(title, true, EigenUnits::Covariance)
    }

    pub fn get_title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl ToString) {
        self.title = title.to_string();
    }

    pub fn units(&self) -> EigenUnits {
        self.units
    }

    pub fn is_empty(&self) -> bool {
        self.eigvecs.is_empty()
    }

    /// Replace the stored modes. Rows of `vectors` are degrees of freedom,
    /// columns are modes; `values` holds one eigenvalue per column.
    ///
    /// Any [`Mode`] borrowed from this model must be dropped first.
    pub fn set_eigens(&mut self, vectors: Array2<f64>, values: Array1<f64>) -> Result<()> {
        let (dof, modes) = vectors.dim();
        if dof == 0 || modes == 0 {
            return Err(ModeError::InvalidModel(format!(
                "eigenvector matrix must not be empty, found shape ({}, {})",
                dof, modes
            )));
        }
        if self.is_3d && dof % 3 != 0 {
            return Err(ModeError::InvalidModel(format!(
                "number of rows must be a multiple of 3 for a 3D model, found {}",
                dof
            )));
        }
        if values.len() != modes {
            return Err(ModeError::InvalidModel(format!(
                "expected {} eigenvalues, found {}",
                modes,
                values.len()
            )));
        }

        self.variances = match self.units {
            EigenUnits::Stiffness => values.mapv(|value| 1.0 / value),
            EigenUnits::Covariance => values.clone(),
        };
        self.num_atoms = if self.is_3d { dof / 3 } else { dof };
        self.eigvecs = vectors;
        self.eigvals = values;
        debug!(
            "{}: stored {} modes over {} degrees of freedom",
            self.title, modes, dof
        );
        Ok(())
    }

    /// The index is not checked here; see [`Mode::new`].
    pub fn get_mode(&self, index: usize) -> Mode<'_, Self> {
        Mode::new(self, index)
    }

    pub fn modes(&self) -> impl Iterator<Item = Mode<'_, Self>> + '_ {
        (0..self.num_modes()).map(move |index| Mode::new(self, index))
    }
}

impl NormalModeModel for NMA {
    fn title(&self) -> &str {
        &self.title
    }

    fn is_3d(&self) -> bool {
        self.is_3d
    }

    fn num_atoms(&self) -> usize {
        self.num_atoms
    }

    fn eigvecs(&self) -> ArrayView2<'_, f64> {
        self.eigvecs.view()
    }

    fn eigvals(&self) -> ArrayView1<'_, f64> {
        self.eigvals.view()
    }

    fn variances(&self) -> ArrayView1<'_, f64> {
        self.variances.view()
    }
}

impl fmt::Display for NMA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}
