//! Row partitioning for the multi-threaded engine.

use std::ops::Range;

/// Half-open range of rows `[start, end)` owned by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRange {
    pub start: usize,
    pub end: usize,
}

impl RowRange {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn rows(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Split rows `0..n` into `workers` contiguous ranges.
///
/// The first `n % workers` ranges get one extra row, so lengths never
/// differ by more than one. With more workers than rows the trailing
/// ranges are empty. A worker count of 0 is treated as 1.
///
/// ```
/// use shortcut::threaded::partition::{partition, RowRange};
///
/// let ranges = partition(7, 3);
/// assert_eq!(ranges, vec![RowRange::new(0, 3), RowRange::new(3, 5), RowRange::new(5, 7)]);
/// ```
pub fn partition(n: usize, workers: usize) -> Vec<RowRange> {
    let workers = workers.max(1);
    let small = n / workers;
    let remainder = n % workers;

    let mut ranges = Vec::with_capacity(workers);
    let mut start = 0;
    for w in 0..workers {
        let rows = if w < remainder { small + 1 } else { small };
        ranges.push(RowRange::new(start, start + rows));
        start += rows;
    }
    debug_assert_eq!(start, n);
    ranges
}

/// Carve `buffer` (n × n, row-major) into one mutable row-block per range.
///
/// Ranges must be contiguous and start at row 0, as produced by
/// [`partition`]. Each block is a separate `&mut` borrow, so no two
/// workers can ever write the same row.
///
/// # Panics
///
/// Panics if the ranges run past the end of `buffer`.
pub fn split_rows_mut<'a>(
    buffer: &'a mut [f32],
    n: usize,
    ranges: &[RowRange],
) -> Vec<(RowRange, &'a mut [f32])> {
    let mut blocks = Vec::with_capacity(ranges.len());
    let mut remaining = buffer;

    for &range in ranges {
        let (block, rest) = remaining.split_at_mut(range.len() * n);
        blocks.push((range, block));
        remaining = rest;
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_exact_cover(n: usize, workers: usize) {
        let ranges = partition(n, workers);
        assert_eq!(ranges.len(), workers.max(1));

        let mut next = 0;
        for r in &ranges {
            assert_eq!(r.start, next, "gap or overlap at n={} workers={}", n, workers);
            next = r.end;
        }
        assert_eq!(next, n);

        let max = ranges.iter().map(RowRange::len).max().unwrap_or(0);
        let min = ranges.iter().map(RowRange::len).min().unwrap_or(0);
        assert!(max - min <= 1, "unbalanced ranges {:?}", ranges);
    }

    #[test]
    fn test_partition_covers_rows_exactly_once() {
        for n in [1, 2, 7, 17] {
            for workers in [1, 2, 3, 5] {
                assert_exact_cover(n, workers);
            }
        }
    }

    #[test]
    fn test_remainder_goes_to_first_ranges() {
        let lens: Vec<usize> = partition(17, 5).iter().map(RowRange::len).collect();
        assert_eq!(lens, vec![4, 4, 3, 3, 3]);
    }

    #[test]
    fn test_more_workers_than_rows() {
        let ranges = partition(2, 5);
        assert_eq!(ranges[0], RowRange::new(0, 1));
        assert_eq!(ranges[1], RowRange::new(1, 2));
        assert!(ranges[2..].iter().all(RowRange::is_empty));
    }

    #[test]
    fn test_zero_workers_means_one() {
        assert_eq!(partition(4, 0), vec![RowRange::new(0, 4)]);
    }

    #[test]
    fn test_split_rows_mut_blocks_line_up() {
        let n = 3;
        let mut buffer: Vec<f32> = (0..n * n).map(|i| i as f32).collect();
        let ranges = partition(n, 2);
        let blocks = split_rows_mut(&mut buffer, n, &ranges);

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].1, &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(blocks[1].1, &[6.0, 7.0, 8.0]);
    }
}
