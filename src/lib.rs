//! Shortcut matrices in Rust: one min-plus relaxation step.
//!
//! For an n×n matrix `d` of edge costs, the shortcut matrix is
//!
//! ```text
//! r[i][j] = min_k (d[i][k] + d[k][j])
//! ```
//!
//! i.e. the cheapest way from `i` to `j` in at most two hops (the diagonal
//! is usually zero, so the direct edge is one of the candidates). It's
//! matrix multiplication with `+` in place of `*` and `min` in place of
//! `+`, and it has the same cache problems.
//!
//! ## Usage
//!
//! ```
//! use shortcut::SquareMatrix;
//!
//! let d = SquareMatrix::from_rows(vec![
//!     vec![0.0, 5.0, 1.0],
//!     vec![5.0, 0.0, 1.0],
//!     vec![1.0, 1.0, 0.0],
//! ])
//! .unwrap();
//!
//! let r = d.shortcut_baseline();
//! assert_eq!(r.get(0, 1), Some(2.0)); // 0 -> 2 -> 1 beats the direct edge
//! ```
//!
//! For large matrices, use the multi-threaded version:
//!
//! ```
//! use shortcut::{shortcut_parallel_with, EarlyExit, ParallelConfig, SquareMatrix};
//!
//! let d = SquareMatrix::random(64).unwrap();
//! let config = ParallelConfig::default()
//!     .with_workers(4)
//!     .with_early_exit(EarlyExit::Checked);
//!
//! let r = shortcut_parallel_with(&d, &config).unwrap();
//! assert_eq!(r, d.shortcut_baseline());
//! ```
//!
//! ## What's inside
//!
//! - Triple-loop baseline (`matrix::naive`)
//! - Transpose so both operands are read row by row
//! - Rows split evenly over scoped worker threads, each owning its block
//!   of the result
//! - Early exit on a zero minimum for non-negative inputs
//! - Cooperative cancellation and worker panic reporting

pub mod error;
pub mod matrix;
pub mod threaded;

pub use error::{Result, ShortcutError};
pub use matrix::SquareMatrix;
pub use matrix::naive::shortcut_baseline;
pub use threaded::cancel::CancelToken;
pub use threaded::parallel::{EarlyExit, ParallelConfig, shortcut_parallel, shortcut_parallel_with};
