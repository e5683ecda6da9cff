/// Transpose a matrix: dst = src^T
///
/// Converts from row-major (rows × cols) to row-major (cols × rows).
/// After transpose, what was column j of src becomes row j of dst.
///
/// The parallel shortcut engine runs this once per call so that its inner
/// loop walks `d[i][..]` and `t[j][..]` side by side instead of striding
/// down a column of `d`.
///
/// # Arguments
///
/// * `src` - Source matrix (rows × cols), row-major
/// * `dst` - Destination matrix (cols × rows), row-major
/// * `rows` - Number of rows in src
/// * `cols` - Number of columns in src
///
/// # Panics
///
/// Panics if either slice is not `rows * cols` long.
///
/// # Example
///
/// ```
/// use shortcut::matrix::transpose::transpose;
///
/// let src = vec![1.0, 2.0, 3.0,   // 2×3 matrix
///                4.0, 5.0, 6.0];
/// let mut dst = vec![0.0; 6];      // will be 3×2
///
/// transpose(&src, &mut dst, 2, 3);
///
/// assert_eq!(dst, vec![1.0, 4.0,   // 3×2 matrix
///                      2.0, 5.0,
///                      3.0, 6.0]);
/// ```
pub fn transpose<T: Copy>(src: &[T], dst: &mut [T], rows: usize, cols: usize) {
    assert_eq!(src.len(), rows * cols, "src: expected {}x{} elements", rows, cols);
    assert_eq!(dst.len(), rows * cols, "dst: expected {}x{} elements", cols, rows);

    for i in 0..rows {
        for (j, &value) in src[i * cols..(i + 1) * cols].iter().enumerate() {
            dst[j * rows + i] = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_transpose_twice_is_identity() {
        let n = 5;
        let src: Vec<f32> = (0..n * n).map(|i| i as f32).collect();
        let mut t = vec![0.0; n * n];
        let mut back = vec![0.0; n * n];

        transpose(&src, &mut t, n, n);
        transpose(&t, &mut back, n, n);

        assert_eq!(t[1], src[n]);
        assert_eq!(back, src);
    }
}
