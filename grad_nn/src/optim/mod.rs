//! Optimizers for gradient-descent training.

mod adam;
mod sgd;

pub use adam::Adam;
pub use sgd::SGD;
