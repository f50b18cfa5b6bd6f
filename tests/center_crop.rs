//! Integration tests for `center_crop`: centered offsets, batch and rank-4
//! input, the identity-copy gradient, and argument validation.
use ndarray::{Axis, IxDyn, Slice, array};

use cropkit::{Error, OutputSize, center_crop, center_crop_vjp};

mod common;
use common::{assert_allclose, pseudo_random};

fn image_4x4() -> ndarray::ArrayD<f64> {
    array![[
        [1., 2., 3., 4.],
        [5., 6., 7., 8.],
        [9., 10., 11., 12.],
        [13., 14., 15., 16.],
    ]]
    .into_dyn()
}

#[test]
fn center_crop_h2_w4() {
    let out = center_crop(&image_4x4(), (2, 4)).unwrap();
    let expected = array![[[5., 6., 7., 8.], [9., 10., 11., 12.]]].into_dyn();
    assert_allclose(&out, &expected, 0.0, 0.0, "h2 w4");
}

#[test]
fn center_crop_h4_w2() {
    let out = center_crop(&image_4x4(), (4, 2)).unwrap();
    let expected = array![[[2., 3.], [6., 7.], [10., 11.], [14., 15.]]].into_dyn();
    assert_allclose(&out, &expected, 0.0, 0.0, "h4 w2");
}

#[test]
fn center_crop_batch() {
    let inp = array![
        [
            [1., 2., 3., 4.],
            [5., 6., 7., 8.],
            [9., 10., 11., 12.],
            [13., 14., 15., 16.],
        ],
        [
            [1., 5., 9., 13.],
            [2., 6., 10., 14.],
            [3., 7., 11., 15.],
            [4., 8., 12., 16.],
        ],
    ]
    .into_dyn();

    let out = center_crop(&inp, (4, 2)).unwrap();
    let expected = array![
        [[2., 3.], [6., 7.], [10., 11.], [14., 15.]],
        [[5., 9.], [6., 10.], [7., 11.], [8., 12.]],
    ]
    .into_dyn();
    assert_allclose(&out, &expected, 0.0, 0.0, "batch");
}

#[test]
fn center_crop_rank4_matches_manual_slice() {
    let inp = pseudo_random(&[2, 3, 5, 4], 7);
    let out = center_crop(&inp, (4, 2)).unwrap();
    // offsets: top = (5-4)/2 = 0, left = (4-2)/2 = 1
    let manual = inp
        .slice_axis(Axis(2), Slice::from(0..4))
        .slice_axis(Axis(3), Slice::from(1..3))
        .to_owned();
    assert_allclose(&out, &manual, 0.0, 0.0, "rank-4 manual slice");
}

#[test]
fn center_crop_full_size_is_identity() {
    let inp = pseudo_random(&[1, 4, 4], 11);
    let out = center_crop(&inp, (4, 4)).unwrap();
    assert_allclose(&out, &inp, 0.0, 0.0, "identity");
}

#[test]
fn center_crop_size_from_traced_scalars() {
    let size = OutputSize::from_scalars(ndarray::arr0(2.0).view(), ndarray::arr0(4.0).view())
        .unwrap();
    let out = center_crop(&image_4x4(), size).unwrap();
    let expected = center_crop(&image_4x4(), (2, 4)).unwrap();
    assert_allclose(&out, &expected, 0.0, 0.0, "scalar sizes");
}

#[test]
fn center_crop_vjp_scatters_into_window() {
    let inp = pseudo_random(&[2, 1, 4, 4], 3);
    let grad_out = ndarray::ArrayD::<f64>::ones(IxDyn(&[2, 1, 2, 4]));
    let grad_in = center_crop_vjp(&inp, (2, 4), &grad_out).unwrap();

    assert_eq!(grad_in.shape(), inp.shape());
    // window rows 1..3, all columns: ones inside, zeros outside
    let total: f64 = grad_in.sum();
    assert_eq!(total, 16.0);
    assert_eq!(grad_in[[0, 0, 0, 0]], 0.0);
    assert_eq!(grad_in[[0, 0, 1, 0]], 1.0);
    assert_eq!(grad_in[[1, 0, 2, 3]], 1.0);
    assert_eq!(grad_in[[1, 0, 3, 3]], 0.0);
}

#[test]
fn center_crop_rejects_oversize_target() {
    let err = center_crop(&image_4x4(), (5, 2)).unwrap_err();
    assert!(matches!(
        err,
        Error::CropTooLarge {
            target_h: 5,
            source_h: 4,
            ..
        }
    ));
}

#[test]
fn center_crop_rejects_zero_size() {
    let err = center_crop(&image_4x4(), (2, 0)).unwrap_err();
    assert!(matches!(err, Error::ZeroSize { .. }));
}

#[test]
fn center_crop_rejects_rank_below_two() {
    let rank1 = ndarray::ArrayD::<f64>::zeros(IxDyn(&[4]));
    let err = center_crop(&rank1, (2, 2)).unwrap_err();
    assert!(matches!(err, Error::BadImageRank { got: 1, .. }));
}

#[test]
fn center_crop_vjp_rejects_bad_gradient_shape() {
    let inp = pseudo_random(&[1, 4, 4], 5);
    let grad_out = ndarray::ArrayD::<f64>::ones(IxDyn(&[1, 3, 3]));
    let err = center_crop_vjp(&inp, (2, 4), &grad_out).unwrap_err();
    assert!(matches!(err, Error::BadGradientShape { .. }));
}
