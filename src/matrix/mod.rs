//! The square matrix type and the single-threaded building blocks.
//!
//! `naive` is the correctness baseline every faster path is checked
//! against; `transpose` feeds the multi-threaded engine.

pub mod naive;
pub mod square;
pub mod transpose;

pub use square::SquareMatrix;
