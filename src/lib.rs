pub mod circuit;
pub mod error;
pub mod gates;
pub mod grover;
pub mod histogram;
pub mod qstate;
pub mod sampler;
mod test_util;

use num_complex::Complex;

pub type Qbit = Complex<f64>;

pub use circuit::Circuit;
pub use error::GroverError;
pub use qstate::QState;
