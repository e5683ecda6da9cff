use super::square::SquareMatrix;

/// Naive shortcut step: `r[i][j] = min_k (d[i][k] + d[k][j])`.
///
/// This is the textbook triple loop with min in place of sum and plus in
/// place of times. It's slow because the innermost loop reads `d` with
/// stride `n` (column-wise), missing cache on nearly every iteration.
///
/// Use this as a correctness baseline, not for performance.
///
/// # Arguments
///
/// * `r` - Result matrix (n × n), row-major, overwritten
/// * `d` - Input matrix (n × n), row-major
/// * `n` - Matrix size
///
/// # Panics
///
/// Panics if the slice sizes don't match n.
pub fn shortcut_naive(r: &mut [f32], d: &[f32], n: usize) {
    assert_eq!(d.len(), n * n, "d: expected {}x{}={} elements", n, n, n * n);
    assert_eq!(r.len(), n * n, "r: expected {}x{}={} elements", n, n, n * n);

    for i in 0..n {
        for j in 0..n {
            let mut v = f32::INFINITY;
            for k in 0..n {
                let z = d[n * i + k] + d[n * k + j];
                if z < v {
                    v = z;
                }
            }
            r[n * i + j] = v;
        }
    }
}

/// Compute the shortcut matrix of `matrix` on the calling thread.
pub fn shortcut_baseline(matrix: &SquareMatrix) -> SquareMatrix {
    let n = matrix.size();
    let mut r = vec![0.0; n * n];
    shortcut_naive(&mut r, matrix.as_slice(), n);
    SquareMatrix::from_parts(n, r)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naive_3x3() {
        #[rustfmt::skip]
        let d = vec![
            0.0, 8.0, 2.0,
            1.0, 0.0, 9.0,
            4.0, 5.0, 0.0,
        ];
        #[rustfmt::skip]
        let expected = vec![
            0.0, 7.0, 2.0,
            1.0, 0.0, 3.0,
            4.0, 5.0, 0.0,
        ];
        let mut r = vec![0.0; 9];

        shortcut_naive(&mut r, &d, 3);

        assert_eq!(r, expected);
    }
}
