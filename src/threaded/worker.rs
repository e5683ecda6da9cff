//! Per-range work for the multi-threaded engine.

use super::cancel::CancelToken;
use super::partition::RowRange;
use crate::error::{Result, ShortcutError};

/// Shortcut values for one row-block.
///
/// For every row `i` in `range` and every column `j`, writes
/// `min_k (d[i][k] + t[j][k])` into `out`, where `t` is the transpose of
/// `d`. Both operands are read row-major, which is the whole point of
/// building `t`.
///
/// With `early_exit` set, the k-scan for a cell stops as soon as the
/// running minimum hits 0.0. That is only correct when no entry of `d` is
/// negative; the caller decides (see [`EarlyExit`](super::parallel::EarlyExit)).
///
/// `cancel` is polled before each row. On cancellation the remaining rows
/// are left untouched and [`ShortcutError::Cancelled`] is returned.
///
/// # Arguments
///
/// * `range` - Rows of the result this worker owns
/// * `d` - Input matrix (n × n), row-major
/// * `t` - Transpose of `d` (n × n), row-major
/// * `out` - The worker's rows of the result (`range.len()` × n)
/// * `n` - Matrix size
///
/// # Panics
///
/// Panics if the slice sizes don't match n and `range`.
pub fn compute_rows(
    range: RowRange,
    d: &[f32],
    t: &[f32],
    out: &mut [f32],
    n: usize,
    early_exit: bool,
    cancel: &CancelToken,
) -> Result<()> {
    compute_rows_until(range, d, t, out, n, early_exit, || cancel.is_cancelled())
}

fn compute_rows_until<F>(
    range: RowRange,
    d: &[f32],
    t: &[f32],
    out: &mut [f32],
    n: usize,
    early_exit: bool,
    mut stop: F,
) -> Result<()>
where
    F: FnMut() -> bool,
{
    assert_eq!(d.len(), n * n, "d: expected {}x{} elements", n, n);
    assert_eq!(t.len(), n * n, "t: expected {}x{} elements", n, n);
    assert_eq!(out.len(), range.len() * n, "out: expected {}x{} elements", range.len(), n);

    for (i, out_row) in range.rows().zip(out.chunks_exact_mut(n)) {
        if stop() {
            return Err(ShortcutError::Cancelled);
        }

        let d_row = &d[n * i..n * (i + 1)];
        for (j, cell) in out_row.iter_mut().enumerate() {
            let t_row = &t[n * j..n * (j + 1)];
            *cell = min_plus(d_row, t_row, early_exit);
        }
    }
    Ok(())
}

#[inline]
fn min_plus(d_row: &[f32], t_row: &[f32], early_exit: bool) -> f32 {
    let mut v = f32::INFINITY;
    for (&x, &y) in d_row.iter().zip(t_row) {
        let z = x + y;
        if z < v {
            v = z;
        }
        if early_exit && v == 0.0 {
            break;
        }
    }
    v
}
