//! Multi-threaded shortcut engine.
//!
//! The input is transposed once, rows are split into contiguous ranges
//! (one per worker, remainder rows spread over the first ranges), and
//! each range runs on a scoped thread that owns its rows of the result.
//!
//! - `partition`: row ranges and the matching mutable row-blocks
//! - `worker`: the transpose-assisted inner loop for one range
//! - `parallel`: configuration and the fork-join orchestration
//! - `cancel`: cooperative cancellation token

pub mod cancel;
pub mod parallel;
pub mod partition;
pub mod worker;
