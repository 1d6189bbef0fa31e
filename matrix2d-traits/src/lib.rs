//! Element traits shared across the matrix2d crates.
//!
//! `matrix2d-view` and `matrix2d-kernel` are generic over the cell type of a
//! matrix. This crate fixes the two bounds they agree on:
//!
//! - [`Element`]: anything that can live in a matrix cell (cloneable, with a
//!   zero/default value used to pad grown or reshaped matrices).
//! - [`Numeric`]: elements with arithmetic bindings. Fixed-width integers
//!   wrap on overflow, floats follow IEEE semantics.
//!
//! The feature-gated thread-safety markers in [`maybe_sync`] let the kernels
//! require `Send + Sync` only when the `parallel` feature is on.

pub mod element;
pub mod maybe_sync;

pub use element::{Element, Numeric};
pub use maybe_sync::{MaybeSend, MaybeSendSync, MaybeSync};
