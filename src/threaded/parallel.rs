//! Multi-threaded shortcut engine.

use std::any::Any;
use std::num::NonZeroUsize;
use std::thread;

use super::cancel::CancelToken;
use super::partition::{partition, split_rows_mut};
use super::worker::compute_rows;
use crate::error::{Result, ShortcutError};
use crate::matrix::SquareMatrix;

/// When workers may stop a k-scan early because the running minimum is 0.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EarlyExit {
    /// Always scan every k.
    Disabled,
    /// Scan the input once per call and enable the shortcut only if no entry
    /// is negative (or NaN).
    #[default]
    Checked,
    /// Caller guarantees every entry is non-negative. Negative input gives
    /// wrong results.
    Trusted,
}

/// Settings for [`shortcut_parallel_with`].
#[derive(Debug, Clone, Default)]
pub struct ParallelConfig {
    /// Worker count; `None` uses the available hardware parallelism.
    pub workers: Option<usize>,
    pub early_exit: EarlyExit,
    pub cancel: CancelToken,
}

impl ParallelConfig {
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn with_early_exit(mut self, early_exit: EarlyExit) -> Self {
        self.early_exit = early_exit;
        self
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Worker count actually used: the override if set, else
    /// `available_parallelism`, never less than 1.
    pub fn worker_count(&self) -> usize {
        self.workers
            .unwrap_or_else(|| thread::available_parallelism().map_or(1, NonZeroUsize::get))
            .max(1)
    }
}

/// Shortcut matrix on all available cores with default settings.
pub fn shortcut_parallel(matrix: &SquareMatrix) -> Result<SquareMatrix> {
    shortcut_parallel_with(matrix, &ParallelConfig::default())
}

/// Shortcut matrix computed by one worker thread per row range.
///
/// Transposes the input once, splits rows `0..n` into contiguous ranges
/// (see [`partition`]), and runs each non-empty range on its own scoped
/// thread writing into its own row-block of the result. Every worker is
/// joined before this returns, whatever happens. A worker panic is
/// reported as [`ShortcutError::WorkerPanicked`]; a tripped cancel token as
/// [`ShortcutError::Cancelled`]. No partial result is ever returned.
pub fn shortcut_parallel_with(matrix: &SquareMatrix, config: &ParallelConfig) -> Result<SquareMatrix> {
    let n = matrix.size();
    let workers = config.worker_count();

    let span = tracing::info_span!("shortcut_parallel", n, workers);
    let _enter = span.enter();

    let transposed = matrix.transpose();
    let d = matrix.as_slice();
    let t = transposed.as_slice();

    let early_exit = match config.early_exit {
        EarlyExit::Disabled => false,
        EarlyExit::Trusted => true,
        EarlyExit::Checked => matrix.is_non_negative(),
    };
    tracing::debug!(policy = ?config.early_exit, early_exit, "resolved early exit");

    let ranges = partition(n, workers);
    tracing::debug!(?ranges, "partitioned rows");

    let mut result = vec![0.0f32; n * n];
    {
        let mut blocks: Vec<_> = split_rows_mut(&mut result, n, &ranges)
            .into_iter()
            .filter(|(range, _)| !range.is_empty())
            .collect();

        let cancel = &config.cancel;
        if blocks.len() == 1 {
            tracing::debug!("single range, computing inline");
            let (range, out) = blocks.remove(0);
            compute_rows(range, d, t, out, n, early_exit, cancel)?;
        } else {
            let jobs = blocks
                .into_iter()
                .map(|(range, out)| move || compute_rows(range, d, t, out, n, early_exit, cancel))
                .collect::<Vec<_>>();
            run_scoped(jobs)?;
        }
    }

    Ok(SquareMatrix::from_parts(n, result))
}

/// Run every job on its own scoped thread and join them all.
///
/// Returns the most severe failure: a spawn error or panic wins over
/// `Cancelled`, ties go to the lowest worker index.
fn run_scoped<'env, F>(jobs: Vec<F>) -> Result<()>
where
    F: FnOnce() -> Result<()> + Send + 'env,
{
    thread::scope(|s| {
        let mut failure: Option<ShortcutError> = None;
        let mut handles = Vec::with_capacity(jobs.len());

        for (idx, job) in jobs.into_iter().enumerate() {
            let spawned = thread::Builder::new()
                .name(format!("shortcut-worker-{}", idx))
                .spawn_scoped(s, job);
            match spawned {
                Ok(handle) => handles.push((idx, handle)),
                Err(e) => {
                    tracing::warn!(worker = idx, error = %e, "failed to spawn worker");
                    failure = Some(ShortcutError::Spawn(e));
                    break;
                }
            }
        }

        for (idx, handle) in handles {
            let outcome = match handle.join() {
                Ok(res) => res,
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    tracing::warn!(worker = idx, %message, "worker panicked");
                    Err(ShortcutError::WorkerPanicked { worker: idx, message })
                }
            };
            if let Err(e) = outcome {
                failure = match failure {
                    None | Some(ShortcutError::Cancelled) => Some(e),
                    kept => kept,
                };
            }
        }

        match failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::naive::shortcut_baseline;

    fn ramp(n: usize) -> SquareMatrix {
        let data = (0..n * n).map(|i| ((i * 13) % 17) as f32 / 4.0).collect();
        SquareMatrix::from_vec(n, data).unwrap()
    }

    #[test]
    fn test_parallel_matches_baseline_for_awkward_worker_counts() {
        for n in [1, 2, 7, 17, 33] {
            let m = ramp(n);
            let expected = shortcut_baseline(&m);
            for workers in [1, 2, 3, 5, 64] {
                let config = ParallelConfig::default().with_workers(workers);
                let got = shortcut_parallel_with(&m, &config).unwrap();
                assert_eq!(got, expected, "n={} workers={}", n, workers);
            }
        }
    }

    #[test]
    fn test_worker_count_never_zero() {
        assert_eq!(ParallelConfig::default().with_workers(0).worker_count(), 1);
        assert!(ParallelConfig::default().worker_count() >= 1);
    }

    #[test]
    fn test_cancelled_token_aborts() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let config = ParallelConfig::default()
            .with_workers(4)
            .with_cancel_token(cancel);

        let res = shortcut_parallel_with(&ramp(16), &config);
        assert!(matches!(res, Err(ShortcutError::Cancelled)));
    }

    #[test]
    fn test_cancelled_token_aborts_inline_path() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let config = ParallelConfig::default()
            .with_workers(1)
            .with_cancel_token(cancel);

        let res = shortcut_parallel_with(&ramp(4), &config);
        assert!(matches!(res, Err(ShortcutError::Cancelled)));
    }

    #[test]
    fn test_panic_is_reported_after_all_jobs_join() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let finished = AtomicUsize::new(0);
        let jobs: Vec<Box<dyn FnOnce() -> Result<()> + Send + '_>> = vec![
            Box::new(|| -> Result<()> {
                finished.fetch_add(1, Ordering::SeqCst);
                Err(ShortcutError::Cancelled)
            }),
            Box::new(|| -> Result<()> { panic!("row 3 exploded") }),
            Box::new(|| -> Result<()> {
                finished.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }),
        ];

        let res = run_scoped(jobs);

        assert_eq!(finished.load(Ordering::SeqCst), 2);
        match res {
            Err(ShortcutError::WorkerPanicked { worker, message }) => {
                assert_eq!(worker, 1);
                assert_eq!(message, "row 3 exploded");
            }
            other => panic!("expected WorkerPanicked, got {:?}", other),
        }
    }

    #[test]
    fn test_all_jobs_ok() {
        let ok = || -> Result<()> { Ok(()) };
        assert!(run_scoped(vec![ok, ok]).is_ok());
    }
}
