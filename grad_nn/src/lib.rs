//! # grad_nn - Neural network building blocks for grad_core
//!
//! Thin consumers of the scalar autodiff engine:
//!
//! - **Modules**: [`Neuron`], [`Layer`], [`Mlp`], all exposing a flat,
//!   stably-ordered parameter list through the [`Module`] trait.
//! - **Losses**: [`sum_squared_error`], [`mse_loss`].
//! - **Optimizers**: [`SGD`] (with momentum), [`Adam`].
//!
//! Everything forward-pass is built purely from the engine's operation
//! catalog, so any output is automatically differentiable.
//!
//! ## Example: one training step
//!
//! ```
//! use grad_nn::{Mlp, Module, SGD, sum_squared_error};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let net = Mlp::new(&mut rng, 3, &[4, 4, 1]);
//! let mut opt = SGD::new(0.05);
//!
//! let pred = net.forward_data(&[2.0, 3.0, -1.0]);
//! let loss = sum_squared_error(&pred, &[1.0]);
//!
//! net.zero_grad(); // required before every backward pass
//! loss.backward();
//! opt.step(&net.parameters());
//! ```

pub mod layers;
pub mod loss;
pub mod module;
pub mod optim;

pub use layers::{Layer, Mlp, Neuron};
pub use loss::{mse_loss, sum_squared_error};
pub use module::Module;
pub use optim::{Adam, SGD};
