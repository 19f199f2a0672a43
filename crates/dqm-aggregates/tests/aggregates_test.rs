use dqm_aggregates::{Histogram, Profile, Scalar};
use dqm_core::models::AxisSpec;
use dqm_core::{AggregateKind, AggregateView, Axis, BinIndex, DqmError, StatisticalAggregate};

fn axis(n: usize, lo: f64, hi: f64) -> AxisSpec {
    AxisSpec::new(n, lo, hi).unwrap()
}

// ── Histograms ────────────────────────────────────────────────────────────

#[test]
fn h1_fill_by_arity_unweighted_and_weighted() {
    let mut h = Histogram::new_1d(10, 0.0, 10.0).unwrap();
    h.fill(3.5.into()).unwrap();
    h.fill((3.5, 2.0).into()).unwrap();
    assert_eq!(h.kind(), AggregateKind::Histogram1D);
    assert_eq!(h.bin_content(BinIndex::X(4)).unwrap(), 3.0);
    assert_eq!(h.entries().unwrap(), 2.0);
}

#[test]
fn h1_rejects_three_and_four_value_fills() {
    let mut h = Histogram::new_1d(10, 0.0, 10.0).unwrap();
    let err = h.fill((1.0, 2.0, 3.0).into()).unwrap_err();
    assert!(matches!(
        err,
        DqmError::UnsupportedFill {
            kind: AggregateKind::Histogram1D,
            arity: 3
        }
    ));
    assert!(h.fill((1.0, 2.0, 3.0, 4.0).into()).is_err());
    assert_eq!(h.entries().unwrap(), 0.0);
}

#[test]
fn h2_fill_point_and_weighted_point() {
    let mut h = Histogram::new_2d(axis(4, 0.0, 4.0), axis(2, 0.0, 2.0)).unwrap();
    h.fill((0.5, 1.5).into()).unwrap();
    h.fill((0.5, 1.5, 4.0).into()).unwrap();
    assert_eq!(h.kind(), AggregateKind::Histogram2D);
    assert_eq!(h.bin_content(BinIndex::XY(1, 2)).unwrap(), 5.0);
    assert!((h.mean(Axis::Y).unwrap() - 1.5).abs() < 1e-12);
    assert!(h.fill(1.0.into()).is_err());
}

#[test]
fn h3_fill_point_and_weighted_point() {
    let mut h = Histogram::new_3d(axis(2, 0.0, 2.0), axis(2, 0.0, 2.0), axis(2, 0.0, 2.0)).unwrap();
    h.fill((0.5, 0.5, 1.5).into()).unwrap();
    h.fill((0.5, 0.5, 1.5, 0.5).into()).unwrap();
    assert_eq!(h.kind(), AggregateKind::Histogram3D);
    assert_eq!(h.bin_content(BinIndex::XYZ(1, 1, 2)).unwrap(), 1.5);
    assert_eq!(h.bin_content((1, 1, 1).into()).unwrap(), 0.0);
}

#[test]
fn out_of_range_values_go_to_under_and_overflow() {
    let mut h = Histogram::new_1d(5, 0.0, 5.0).unwrap();
    h.fill((-1.0).into()).unwrap();
    h.fill(7.0.into()).unwrap();
    assert_eq!(h.bin_content(BinIndex::X(0)).unwrap(), 1.0);
    assert_eq!(h.bin_content(BinIndex::X(6)).unwrap(), 1.0);
    // statistics ignore under/overflow
    assert_eq!(h.mean(Axis::X).unwrap(), 0.0);
    assert_eq!(h.entries().unwrap(), 2.0);
}

#[test]
fn setters_update_contents_errors_entries() {
    let mut h = Histogram::new_1d(5, 0.0, 5.0).unwrap();
    h.set_bin_content(BinIndex::X(2), 8.0).unwrap();
    h.set_bin_error(BinIndex::X(2), 1.5).unwrap();
    h.set_entries(8.0).unwrap();
    assert_eq!(h.bin_content(BinIndex::X(2)).unwrap(), 8.0);
    assert_eq!(h.bin_error(BinIndex::X(2)).unwrap(), 1.5);
    assert_eq!(h.entries().unwrap(), 8.0);
    assert!((h.mean(Axis::X).unwrap() - 1.5).abs() < 1e-12);
}

#[test]
fn bin_labels_only_on_regular_bins() {
    let mut h = Histogram::new_1d(3, 0.0, 3.0).unwrap();
    h.set_bin_label(2, "layer-2", Axis::X).unwrap();
    assert_eq!(h.bin_label(2, Axis::X), Some("layer-2"));
    assert!(h.set_bin_label(0, "under", Axis::X).is_err());
    assert!(h.set_bin_label(4, "over", Axis::X).is_err());
    assert!(matches!(
        h.set_bin_label(1, "y", Axis::Y),
        Err(DqmError::InvalidAxis { axis: Axis::Y, dimension: 1 })
    ));
}

#[test]
fn reset_clears_contents_but_keeps_binning() {
    let mut h = Histogram::new_1d(5, 0.0, 5.0).unwrap();
    h.fill(1.0.into()).unwrap();
    h.set_axis_range(0.0, 2.0, Axis::X).unwrap();
    h.reset();
    assert_eq!(h.entries().unwrap(), 0.0);
    assert_eq!(h.bin_content(BinIndex::X(2)).unwrap(), 0.0);
    assert_eq!(h.n_bins(Axis::X).unwrap(), 5);
}

#[test]
fn histograms_have_no_value_string_or_y_limits() {
    let h = Histogram::new_1d(5, 0.0, 5.0).unwrap();
    assert_eq!(h.value_string(), "");
    assert!(h.y_min().is_err());
    assert!(h.bin_entries(1).is_err());
}

// ── Profiles ──────────────────────────────────────────────────────────────

#[test]
fn profile_tracks_mean_y_per_bin() {
    let mut p = Profile::new(4, 0.0, 4.0, 0.0, 10.0).unwrap();
    p.fill((0.5, 2.0).into()).unwrap();
    p.fill((0.5, 6.0).into()).unwrap();
    p.fill((2.5, 5.0, 3.0).into()).unwrap();
    assert_eq!(p.kind(), AggregateKind::Profile);
    assert_eq!(p.bin_content(BinIndex::X(1)).unwrap(), 4.0);
    assert_eq!(p.bin_entries(1).unwrap(), 2.0);
    assert_eq!(p.bin_entries(3).unwrap(), 3.0);
    assert_eq!(p.y_min().unwrap(), 0.0);
    assert_eq!(p.y_max().unwrap(), 10.0);
    assert!((p.bin_error(BinIndex::X(1)).unwrap() - 2.0 / 2f64.sqrt()).abs() < 1e-12);
}

#[test]
fn profile_drops_y_outside_limits() {
    let mut p = Profile::new(4, 0.0, 4.0, 0.0, 10.0).unwrap();
    p.fill((0.5, 11.0).into()).unwrap();
    assert_eq!(p.entries().unwrap(), 0.0);
    assert_eq!(p.bin_entries(1).unwrap(), 0.0);
}

#[test]
fn profile_rejects_single_value_fill_and_bin_errors() {
    let mut p = Profile::new(4, 0.0, 4.0, 0.0, 10.0).unwrap();
    assert!(matches!(
        p.fill(1.0.into()),
        Err(DqmError::UnsupportedFill {
            kind: AggregateKind::Profile,
            arity: 1
        })
    ));
    assert!(p.set_bin_error(BinIndex::X(1), 1.0).is_err());
}

#[test]
fn profile_set_bin_content_sets_mean() {
    let mut p = Profile::new(4, 0.0, 4.0, 0.0, 10.0).unwrap();
    p.set_bin_content(BinIndex::X(2), 7.0).unwrap();
    assert_eq!(p.bin_content(BinIndex::X(2)).unwrap(), 7.0);
    p.fill((1.5, 7.0).into()).unwrap();
    assert_eq!(p.bin_content(BinIndex::X(2)).unwrap(), 7.0);
}

// ── Scalars ───────────────────────────────────────────────────────────────

#[test]
fn scalar_value_strings_by_type() {
    let mut real = Scalar::real(0.0);
    real.fill(2.5.into()).unwrap();
    assert_eq!(real.value_string(), "f = 2.5");

    let mut int = Scalar::int(0);
    int.fill(41.9.into()).unwrap();
    assert_eq!(int.value_string(), "i = 41");

    assert_eq!(Scalar::string("ready").value_string(), "s = ready");
}

#[test]
fn scalar_rejects_binned_operations() {
    let mut s = Scalar::real(1.0);
    assert!(s.set_bin_content(BinIndex::X(1), 1.0).is_err());
    assert!(s.set_entries(1.0).is_err());
    assert!(s.mean(Axis::X).is_err());
    assert!(s.fill((1.0, 2.0).into()).is_err());
    assert!(Scalar::string("x").fill(1.0.into()).is_err());
}

#[test]
fn scalar_reset_zeroes_value() {
    let mut s = Scalar::int(12);
    s.reset();
    assert_eq!(s.value_string(), "i = 0");
    let mut t = Scalar::string("abc");
    t.reset();
    assert_eq!(t.value_string(), "s = ");
}

#[test]
fn string_scalars_take_text_and_numbers_do_not() {
    let mut s = Scalar::string("starting");
    s.set_text("running").unwrap();
    assert_eq!(s.value_string(), "s = running");

    let mut n = Scalar::real(1.0);
    assert!(matches!(
        n.set_text("x"),
        Err(DqmError::Unsupported {
            kind: AggregateKind::Scalar,
            operation: "set_text"
        })
    ));
    let mut h = Histogram::new_1d(2, 0.0, 2.0).unwrap();
    assert!(h.set_text("x").is_err());
}
