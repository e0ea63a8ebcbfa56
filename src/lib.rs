pub mod algebra;
pub mod combination;
pub mod mode;
pub mod model;
pub mod vector;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModeError {
    #[error("{left} and {right} do not have the same length ({left_len} != {right_len})")]
    DimensionMismatch {
        left: String,
        right: String,
        left_len: usize,
        right_len: usize,
    },
    #[error("{operand} is not a valid operand ({reason})")]
    InvalidOperand { operand: String, reason: String },
    #[error("Invalid Construction: {0}")]
    InvalidConstruction(String),
    #[error("mode index {index} is out of range for a model with {num_modes} modes")]
    IndexOutOfRange { index: usize, num_modes: usize },
    #[error("Invalid Model: {0}")]
    InvalidModel(String),
}

pub type Result<T> = std::result::Result<T, ModeError>;

// Re-export main types for convenience
pub use algebra::{Operand, Product, VectorBase};
pub use combination::{linear_combination, overlap, project};
pub use mode::Mode;
pub use model::{EigenUnits, NormalModeModel, NMA};
pub use vector::Vector;
