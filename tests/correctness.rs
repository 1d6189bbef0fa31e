use approx::assert_relative_eq;
use matrix2d::{
    add, add_with, multiply, subtract, zip_map2, ErrorKind, IndexTransform, Matrix, MatrixError,
    ParallelConfig, Point, Shape,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn m(rows: Vec<Vec<i32>>) -> Matrix<i32> {
    Matrix::from_rows(rows).unwrap()
}

fn sample() -> Matrix<i32> {
    m(vec![vec![1, 2, 3], vec![4, 5, 6]])
}

// ============================================================================
// Transforms
// ============================================================================

#[test]
fn test_transform_scenario() {
    let a = sample();
    assert_eq!(a.transpose(), m(vec![vec![1, 4], vec![2, 5], vec![3, 6]]));
    assert_eq!(a.rotate90(), m(vec![vec![4, 1], vec![5, 2], vec![6, 3]]));
    assert_eq!(a.rotate180(), m(vec![vec![6, 5, 4], vec![3, 2, 1]]));
    assert_eq!(a.rotate270(), m(vec![vec![3, 6], vec![2, 5], vec![1, 4]]));
    assert_eq!(a.reshape(3, 2).unwrap(), m(vec![vec![1, 2], vec![3, 4], vec![5, 6]]));
    assert_eq!(a.flatten(), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_reshape_pads_and_truncates() {
    let a = sample();
    assert_eq!(a.reshape(2, 4).unwrap().flatten(), vec![1, 2, 3, 4, 5, 6, 0, 0]);
    assert_eq!(a.reshape(1, 4).unwrap().flatten(), vec![1, 2, 3, 4]);
    assert_eq!(a.reshape_cols(4).unwrap().shape(), Shape::new(2, 4));
}

#[test]
fn test_reshape_overflow() {
    let err = sample().reshape(1 << 20, 1 << 20).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Overflow);
}

#[test]
fn test_extend_forms() {
    let a = sample();
    let grown = a.extend_with(3, 4, -1).unwrap();
    assert_eq!(
        grown,
        m(vec![vec![1, 2, 3, -1], vec![4, 5, 6, -1], vec![-1, -1, -1, -1]])
    );
    assert_eq!(a.extend(1, 2).unwrap(), m(vec![vec![1, 2]]));

    let framed = a.extend_margins(1, 0, 1, 1).unwrap();
    assert_eq!(
        framed,
        m(vec![vec![0, 0, 0, 0, 0], vec![0, 1, 2, 3, 0], vec![0, 4, 5, 6, 0]])
    );
    assert_eq!(a.extend_margins(0, 0, 0, 0).unwrap(), a);
}

#[test]
fn test_repeat() {
    let a = m(vec![vec![1, 2]]);
    assert_eq!(a.repelem(2, 2).unwrap(), m(vec![vec![1, 1, 2, 2], vec![1, 1, 2, 2]]));
    assert_eq!(a.repmat(2, 2).unwrap(), m(vec![vec![1, 2, 1, 2], vec![1, 2, 1, 2]]));
    assert_eq!(a.repelem(0, 1).unwrap_err().kind(), ErrorKind::Argument);
    assert_eq!(a.repmat(usize::MAX, 1).unwrap_err().kind(), ErrorKind::Overflow);
}

#[test]
fn test_transform_object_shape_only() {
    let t = IndexTransform::RepeatTile {
        row_factor: 3,
        col_factor: 2,
    };
    assert_eq!(t.output_shape(Shape::new(2, 5)).unwrap(), Shape::new(6, 10));
    assert_eq!(
        IndexTransform::Transpose.output_shape(Shape::new(2, 5)).unwrap(),
        Shape::new(5, 2)
    );
}

#[test]
fn test_transforms_on_object_elements() {
    let names = Matrix::from_fn(2, 2, |i, j| format!("{i}{j}")).unwrap();
    let t = names.transpose();
    assert_eq!(t[(0, 1)], "10");
    let ext = names.extend(2, 3).unwrap();
    assert_eq!(ext[(1, 2)], "");
}

// ============================================================================
// Storage and aliasing
// ============================================================================

#[test]
fn test_row_aliases_column_copies() {
    let mut a = sample();
    a.row_mut(1).unwrap()[0] = 40;
    assert_eq!(a[(1, 0)], 40);

    let mut col = a.column(2).unwrap();
    col[0] = 99;
    assert_eq!(a[(0, 2)], 3);

    let mut copy = a.copy();
    copy.set(0, 0, 7).unwrap();
    assert_eq!(a[(0, 0)], 1);
}

#[test]
fn test_from_vec_takes_buffer() {
    let a = Matrix::from_vec(vec![1.5, 2.5, 3.5, 4.5], 2, 2).unwrap();
    assert_relative_eq!(a[(1, 1)], 4.5);
    let err = Matrix::from_vec(vec![1, 2, 3], 2, 2).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LengthMismatch);
}

#[test]
fn test_index_and_range_errors() {
    let a = sample();
    assert_eq!(a.row(2).unwrap_err().kind(), ErrorKind::Index);
    assert_eq!(a.column(3).unwrap_err().kind(), ErrorKind::Index);
    assert_eq!(a.copy_range(0, 3, 0, 1).unwrap_err().kind(), ErrorKind::Range);
    assert_eq!(a.copy_rows(2, 1).unwrap_err().kind(), ErrorKind::Range);
    assert_eq!(a.stream_h_rows(1, 0).unwrap_err().kind(), ErrorKind::Range);
}

#[test]
fn test_set_row_length_mismatch() {
    let mut a = sample();
    let err = a.set_row(0, &[1, 2]).unwrap_err();
    assert_eq!(
        err,
        MatrixError::LengthMismatch {
            expected: 3,
            actual: 2
        }
    );
    a.set_column(1, &[8, 9]).unwrap();
    assert_eq!(a, m(vec![vec![1, 8, 3], vec![4, 9, 6]]));
}

#[test]
fn test_stack_and_flip() {
    let a = sample();
    let v = a.vstack(&a).unwrap();
    assert_eq!(v.shape(), Shape::new(4, 3));
    let h = a.hstack(&a).unwrap();
    assert_eq!(h.row(0).unwrap(), &[1, 2, 3, 1, 2, 3]);
    assert_eq!(a.vstack(&a.transpose()).unwrap_err().kind(), ErrorKind::Argument);
    assert_eq!(a.flip_h(), m(vec![vec![3, 2, 1], vec![6, 5, 4]]));
    assert_eq!(a.flip_v(), m(vec![vec![4, 5, 6], vec![1, 2, 3]]));
}

#[test]
fn test_neighbors() {
    let a = m(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]);
    assert_eq!(a.up_of(0, 1), None);
    assert_eq!(a.down_of(0, 1), Some(&5));
    assert_eq!(a.left_of(1, 0), None);
    assert_eq!(a.right_of(1, 1), Some(&6));
    let around = a.adjacent4_points(0, 0);
    assert_eq!(around, [None, Some(Point::new(0, 1)), Some(Point::new(1, 0)), None]);
    assert_eq!(a.adjacent8_points(1, 1).iter().flatten().count(), 8);
}

// ============================================================================
// Diagonals
// ============================================================================

#[test]
fn test_diagonal_requires_square() {
    let a = sample();
    assert_eq!(a.get_lu2rd().unwrap_err().kind(), ErrorKind::State);
    assert_eq!(a.stream_ru2ld().unwrap_err().kind(), ErrorKind::State);
    assert_eq!(a.points_lu2rd().unwrap_err().kind(), ErrorKind::State);

    let e = Matrix::<i32>::empty();
    assert_eq!(e.stream_lu2rd().unwrap().count(), 0);
    assert_eq!(e.points_ru2ld().unwrap().remaining(), 0);
}

#[test]
fn test_diagonals_read_write() {
    let mut a = m(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]);
    assert_eq!(a.get_lu2rd().unwrap(), vec![1, 5, 9]);
    assert_eq!(a.get_ru2ld().unwrap(), vec![3, 5, 7]);
    a.set_ru2ld(&[0, 0, 0]).unwrap();
    assert_eq!(a.get_lu2rd().unwrap(), vec![1, 0, 9]);
    assert_eq!(a.set_lu2rd(&[1]).unwrap_err().kind(), ErrorKind::LengthMismatch);
    a.update_lu2rd(|x| x * 10).unwrap();
    assert_eq!(a.get_lu2rd().unwrap(), vec![10, 0, 90]);
}

// ============================================================================
// Traversal
// ============================================================================

#[test]
fn test_stream_families() {
    let a = sample();
    assert_eq!(a.stream_h().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(a.stream_v().copied().collect::<Vec<_>>(), vec![1, 4, 2, 5, 3, 6]);
    assert_eq!(a.stream_h_row(1).unwrap().to_vec(), vec![4, 5, 6]);
    assert_eq!(a.stream_v_col(2).unwrap().to_vec(), vec![3, 6]);
    assert_eq!(a.stream_v_cols(1, 3).unwrap().to_vec(), vec![2, 5, 3, 6]);
    assert_eq!(a.stream_r().to_vecs(), vec![vec![1, 2, 3], vec![4, 5, 6]]);
    assert_eq!(a.stream_c().to_vecs(), vec![vec![1, 4], vec![2, 5], vec![3, 6]]);
}

#[test]
fn test_points_follow_values() {
    let a = sample();
    let points: Vec<Point> = a.points_v().collect();
    let values: Vec<i32> = a.stream_v().copied().collect();
    for (p, v) in points.iter().zip(values) {
        assert_eq!(a[*p], v);
    }
}

#[test]
fn test_skip_then_remaining() {
    let a = Matrix::from_fn(30, 40, |i, j| (i * 40 + j) as i32).unwrap();
    let mut cells = a.stream_h();
    cells.next();
    cells.skip_by(500);
    assert_eq!(cells.remaining(), 1200 - 501);
    assert_eq!(cells.next(), Some(&501));

    let k = cells.remaining();
    cells.skip_by(k);
    assert_eq!(cells.remaining(), 0);
    assert_eq!(cells.next(), None);

    let mut rows = a.stream_r();
    rows.skip_by(29);
    let last = rows.next().unwrap();
    assert_eq!(last.remaining(), 40);
    assert!(rows.next().is_none());
}

// ============================================================================
// Elementwise and arithmetic
// ============================================================================

#[test]
fn test_arithmetic_scenario() {
    let a = m(vec![vec![1, 2], vec![3, 4]]);
    let b = m(vec![vec![5, 6], vec![7, 8]]);
    assert_eq!(add(&a, &b).unwrap(), m(vec![vec![6, 8], vec![10, 12]]));
    assert_eq!(multiply(&a, &b).unwrap(), m(vec![vec![19, 22], vec![43, 50]]));
    assert_eq!(subtract(&b, &a).unwrap(), Matrix::filled(2, 2, 4).unwrap());
}

#[test]
fn test_signed_8_bit_wraps() {
    let max = Matrix::<i8>::filled(2, 2, i8::MAX).unwrap();
    let one = Matrix::<i8>::filled(2, 2, 1).unwrap();
    assert!(add(&max, &one).unwrap().as_slice().iter().all(|&x| x == i8::MIN));

    let min = Matrix::<u16>::filled(1, 3, 0).unwrap();
    let step = Matrix::<u16>::filled(1, 3, 1).unwrap();
    assert!(subtract(&min, &step).unwrap().as_slice().iter().all(|&x| x == u16::MAX));
}

#[test]
fn test_elementwise_shape_mismatch_names_op() {
    let a = sample();
    let err = add(&a, &a.transpose()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Argument);
    assert!(err.to_string().contains("add"));
    let err = zip_map2(&a, &a.transpose(), |x, y| x * y).unwrap_err();
    assert!(matches!(err, MatrixError::ShapeMismatch { .. }));
}

#[test]
fn test_bool_zip() {
    let a = Matrix::from_rows(vec![vec![true, false], vec![true, true]]).unwrap();
    let b = Matrix::from_rows(vec![vec![false, false], vec![true, false]]).unwrap();
    let x = zip_map2(&a, &b, |p, q| p ^ q).unwrap();
    assert_eq!(x.to_string(), "[[true, false], [false, true]]");
}

#[test]
fn test_large_add_sequential_equals_parallel() {
    let mut rng = StdRng::seed_from_u64(42);
    let a = Matrix::from_fn(200, 150, |_, _| rng.gen::<i16>()).unwrap();
    let b = Matrix::from_fn(200, 150, |_, _| rng.gen::<i16>()).unwrap();
    let seq = add_with(&ParallelConfig::sequential(), &a, &b).unwrap();
    let par = add_with(&ParallelConfig::parallel(), &a, &b).unwrap();
    assert_eq!(seq, par);
}
