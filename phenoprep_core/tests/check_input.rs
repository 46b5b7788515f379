use phenoprep_core::error::{BuildError, PreprocessError};
use phenoprep_core::{InputSeries, PreprocessCfg, ValueRange, check_input};
use rstest::rstest;

const EPS: f64 = 1e-12;

fn regular_t(n: usize) -> Vec<f64> {
    (0..n).map(|i| 16.0 * i as f64).collect()
}

fn assert_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 1e-9, "{actual:?} vs {expected:?}");
    }
}

fn quiet_cfg() -> PreprocessCfg {
    PreprocessCfg {
        alpha: 0.0,
        mask_spike: false,
        ..PreprocessCfg::default()
    }
}

#[rstest]
fn scenario_a_two_sample_gap_on_irregular_grid() {
    let input = InputSeries::builder()
        .with_t([0.0, 1.0, 3.0, 4.0, 5.0, 6.0])
        .with_y([Some(1.0), Some(1.0), None, None, Some(5.0), Some(5.0)])
        .build()
        .unwrap();
    let cfg = PreprocessCfg {
        maxgap: Some(2),
        ..PreprocessCfg::default()
    };
    let out = check_input(&input, &cfg).unwrap();
    assert_close(&out.y, &[1.0, 1.0, 3.0, 4.0, 5.0, 5.0]);
    assert_eq!(out.stats.interpolated, 2);
    assert_eq!(out.stats.filled_missval, 0);
    // gap samples carry the floor weight
    assert_eq!(out.w, vec![1.0, 1.0, 0.2, 0.2, 1.0, 1.0]);
}

#[rstest]
fn scenario_a_on_regular_grid_interpolates_by_time() {
    let input = InputSeries::builder()
        .with_t(regular_t(6))
        .with_y([Some(1.0), Some(1.0), None, None, Some(5.0), Some(5.0)])
        .build()
        .unwrap();
    let cfg = PreprocessCfg {
        maxgap: Some(2),
        ..PreprocessCfg::default()
    };
    let out = check_input(&input, &cfg).unwrap();
    assert_close(&out.y, &[1.0, 1.0, 7.0 / 3.0, 11.0 / 3.0, 5.0, 5.0]);
}

#[rstest]
fn scenario_b_good_share_selects_top_tier() {
    let input = InputSeries::builder()
        .with_t(regular_t(6))
        .with_y([0.2, 0.3, 0.4, 0.5, 0.6, 0.7])
        .with_weights([1.0, 1.0, 1.0, 1.0, 0.0, 0.0])
        .build()
        .unwrap();
    let out = check_input(&input, &PreprocessCfg::default()).unwrap();
    assert_eq!(out.stats.w_critical, 1.0);
}

#[rstest]
fn scenario_c_constant_series_has_no_spikes() {
    let input = InputSeries::builder()
        .with_t(regular_t(5))
        .with_y([5.0; 5])
        .with_weights([1.0, 0.0, 0.0, 0.0, 1.0])
        .build()
        .unwrap();
    let out = check_input(&input, &PreprocessCfg::default()).unwrap();
    assert_eq!(out.stats.spikes, 0);
    assert_eq!(out.y, vec![5.0; 5]);
    assert_eq!(out.w, vec![1.0, 0.2, 0.2, 0.2, 1.0]);
    assert_eq!(out.ylu, ValueRange::new(5.0, 5.0));
}

#[rstest]
#[case::one(1)]
#[case::two(2)]
#[case::three(3)]
fn gap_of_exactly_maxgap_is_interpolated(#[case] maxgap: usize) {
    let mut y = vec![Some(0.2), Some(0.3)];
    y.extend(std::iter::repeat_n(None, maxgap));
    y.extend([Some(0.6), Some(0.7)]);
    let input = InputSeries::builder()
        .with_t(regular_t(y.len()))
        .with_y(y)
        .build()
        .unwrap();
    let cfg = PreprocessCfg {
        maxgap: Some(maxgap),
        ..quiet_cfg()
    };
    let out = check_input(&input, &cfg).unwrap();
    assert_eq!(out.stats.interpolated, maxgap);
    assert_eq!(out.stats.filled_missval, 0);
    for v in &out.y[2..2 + maxgap] {
        assert!(*v > 0.3 && *v < 0.6, "{:?}", out.y);
    }
}

#[rstest]
#[case::one(1)]
#[case::two(2)]
#[case::three(3)]
fn gap_longer_than_maxgap_takes_missval(#[case] maxgap: usize) {
    let mut y = vec![Some(0.2), Some(0.3)];
    y.extend(std::iter::repeat_n(None, maxgap + 1));
    y.extend([Some(0.6), Some(0.7)]);
    let input = InputSeries::builder()
        .with_t(regular_t(y.len()))
        .with_y(y)
        .build()
        .unwrap();
    let cfg = PreprocessCfg {
        maxgap: Some(maxgap),
        ..quiet_cfg()
    };
    let out = check_input(&input, &cfg).unwrap();
    assert_eq!(out.stats.interpolated, 0);
    assert_eq!(out.stats.filled_missval, maxgap + 1);
    // missval defaults to ylu.lower
    assert_eq!(out.ylu.lower, 0.2);
    assert!(out.y[2..3 + maxgap].iter().all(|&v| v == 0.2));
}

#[rstest]
fn explicit_missval_is_used_for_unfillable_gaps() {
    let input = InputSeries::builder()
        .with_t(regular_t(5))
        .with_y([None, Some(0.3), Some(0.4), Some(0.5), None])
        .build()
        .unwrap();
    let cfg = PreprocessCfg {
        missval: Some(0.05),
        ..quiet_cfg()
    };
    let out = check_input(&input, &cfg).unwrap();
    assert_eq!(out.y, vec![0.05, 0.3, 0.4, 0.5, 0.05]);
    assert_eq!(out.stats.filled_missval, 2);
}

#[rstest]
fn user_floor_scrubs_low_values() {
    let input = InputSeries::builder()
        .with_t(regular_t(6))
        .with_y([0.02, 0.3, 0.4, 0.5, 0.6, 0.7])
        .build()
        .unwrap();
    let cfg = PreprocessCfg {
        ymin: Some(0.1),
        ..quiet_cfg()
    };
    let out = check_input(&input, &cfg).unwrap();
    assert_eq!(out.ylu.lower, 0.1);
    assert_eq!(out.y[0], 0.1);
    assert_eq!(out.w[0], 0.2);
    assert_eq!(out.stats.demoted, 1);
    assert_eq!(out.stats.scrubbed, 1);
    assert_eq!(out.y0[0], Some(0.02));
}

// Demotion compares against the largest qualified value while scrubbing
// compares against ylu.upper. The two bounds stay distinct.
#[rstest]
fn demotion_uses_good_max_while_scrubbing_uses_upper_bound() {
    let y = [0.1, 0.2, 0.3, 0.4, 0.5, 0.85, 0.6, 0.7, 0.8, 0.9, 0.95];
    let w = [1.0, 1.0, 1.0, 1.0, 1.0, 0.5, 1.0, 1.0, 1.0, 1.0, 0.5];
    let input = InputSeries::builder()
        .with_t(regular_t(y.len()))
        .with_y(y)
        .with_weights(w)
        .build()
        .unwrap();
    let cfg = PreprocessCfg {
        alpha: 0.0,
        alpha_high: Some(0.5),
        mask_spike: false,
        ..PreprocessCfg::default()
    };
    let out = check_input(&input, &cfg).unwrap();
    assert_eq!(out.stats.w_critical, 1.0);
    assert!((out.ylu.upper - 0.7).abs() < EPS);
    assert_eq!(out.ylu.lower, 0.1);

    // trusted values above ylu.upper but within y_good_max: untouched
    assert_eq!(out.y[8], 0.8);
    assert_eq!(out.w[8], 1.0);
    assert_eq!(out.y[9], 0.9);
    assert_eq!(out.w[9], 1.0);
    // low-weight value above ylu.upper but within y_good_max: scrubbed, weight kept
    assert_eq!(out.y[5], 0.1);
    assert_eq!(out.w[5], 0.5);
    // low-weight value above y_good_max: demoted and scrubbed
    assert_eq!(out.y[10], 0.1);
    assert_eq!(out.w[10], 0.2);

    assert_eq!(out.stats.demoted, 1);
    assert_eq!(out.stats.scrubbed, 2);
}

#[rstest]
#[case::masked(true, 1, 0.1)]
#[case::unmasked(false, 0, 0.8)]
fn low_confidence_spike_is_masked_and_refilled(
    #[case] mask_spike: bool,
    #[case] spikes: usize,
    #[case] y5: f64,
) {
    let mut y = vec![0.1; 20];
    y[5] = 0.8;
    y[18] = 0.9;
    y[19] = 0.9;
    let mut w = vec![1.0; 20];
    w[5] = 0.5;
    let input = InputSeries::builder()
        .with_t(regular_t(20))
        .with_y(y)
        .with_weights(w)
        .build()
        .unwrap();
    let cfg = PreprocessCfg {
        alpha: 0.0,
        mask_spike,
        ..PreprocessCfg::default()
    };
    let out = check_input(&input, &cfg).unwrap();
    assert_eq!(out.stats.spikes, spikes);
    assert!((out.y[5] - y5).abs() < EPS, "{:?}", out.y);
    if mask_spike {
        assert_eq!(out.stats.interpolated, 1);
        assert_eq!(out.w[5], 0.2);
    } else {
        assert_eq!(out.w[5], 0.5);
    }
}

#[rstest]
fn metadata_is_carried_through() {
    let input = InputSeries::builder()
        .with_t(regular_t(4))
        .with_y([Some(0.3), None, Some(0.5), Some(0.4)])
        .with_qc_flag(["good", "cloud", "good", "marginal"])
        .build()
        .unwrap();
    let cfg = PreprocessCfg {
        south: true,
        ..PreprocessCfg::default()
    };
    let out = check_input(&input, &cfg).unwrap();
    assert_eq!(out.t, input.t());
    assert_eq!(out.y0, input.y());
    assert_eq!(out.nptperyear, 23);
    assert!(out.south);
    assert_eq!(
        out.qc_flag.as_deref(),
        Some(&["good", "cloud", "good", "marginal"].map(String::from)[..])
    );
    assert_eq!(out.tn, None);
}

#[rstest]
fn covariate_is_interpolated_without_fallback() {
    let input = InputSeries::builder()
        .with_t(regular_t(8))
        .with_y([0.3; 8])
        .with_tn([
            Some(10.0),
            None,
            Some(12.0),
            None,
            None,
            None,
            None,
            Some(20.0),
        ])
        .build()
        .unwrap();
    let cfg = PreprocessCfg {
        maxgap: Some(2),
        ..PreprocessCfg::default()
    };
    let out = check_input(&input, &cfg).unwrap();
    assert_eq!(
        out.tn,
        Some(vec![
            Some(10.0),
            Some(11.0),
            Some(12.0),
            None,
            None,
            None,
            None,
            Some(20.0),
        ])
    );
    // covariate fills are not counted with y
    assert_eq!(out.stats.interpolated, 0);
}

#[rstest]
fn single_sample_series_uses_fallback_frequency() {
    let input = InputSeries::builder()
        .with_t([100.0])
        .with_y([0.4])
        .build()
        .unwrap();
    let out = check_input(&input, &PreprocessCfg::default()).unwrap();
    assert_eq!(out.y, vec![0.4]);
    assert_eq!(out.w, vec![1.0]);
    assert_eq!(out.nptperyear, 23);
    assert_eq!(out.stats.spikes, 0);
}

#[rstest]
#[case::explicit_missval(Some(0.05), None, 0.0, 0.05)]
#[case::user_floor(None, Some(0.1), 0.1, 0.1)]
#[case::negative_floor(None, Some(-0.3), 0.0, 0.0)]
#[case::defaults(None, None, 0.0, 0.0)]
fn all_missing_values_yield_a_filled_series(
    #[case] missval: Option<f64>,
    #[case] ymin: Option<f64>,
    #[case] lower: f64,
    #[case] fill: f64,
) {
    let input = InputSeries::builder()
        .with_t(regular_t(4))
        .with_y([None::<f64>; 4])
        .with_tn([Some(1.0), None, Some(3.0), None])
        .build()
        .unwrap();
    let cfg = PreprocessCfg {
        missval,
        ymin,
        ..PreprocessCfg::default()
    };
    let out = check_input(&input, &cfg).unwrap();
    assert_eq!(out.ylu, ValueRange::new(lower, lower));
    assert_eq!(out.y, vec![fill; 4]);
    assert_eq!(out.w, vec![0.2; 4]);
    assert_eq!(out.y0, vec![None; 4]);
    assert_eq!(out.stats.filled_missval, 4);
    assert_eq!(out.stats.interpolated, 0);
    // covariate is still gap-filled, trailing gap has no support
    assert_eq!(out.tn, Some(vec![Some(1.0), Some(2.0), Some(3.0), None]));
}

#[rstest]
fn nan_ymin_and_missval_mean_not_given() {
    let input = InputSeries::builder()
        .with_t(regular_t(5))
        .with_y([None, Some(0.3), Some(0.4), Some(0.5), None])
        .build()
        .unwrap();
    let cfg = PreprocessCfg {
        ymin: Some(f64::NAN),
        missval: Some(f64::NAN),
        ..quiet_cfg()
    };
    let out = check_input(&input, &cfg).unwrap();
    assert_eq!(out.ylu, ValueRange::new(0.3, 0.5));
    assert_eq!(out.y, vec![0.3, 0.3, 0.4, 0.5, 0.3]);
}

#[rstest]
fn zero_weights_everywhere_is_an_empty_subset_error() {
    let input = InputSeries::builder()
        .with_t(regular_t(4))
        .with_y([0.3; 4])
        .with_weights([0.0; 4])
        .build()
        .unwrap();
    let err = check_input(&input, &PreprocessCfg::default()).unwrap_err();
    assert_eq!(
        err.downcast_ref::<PreprocessError>(),
        Some(&PreprocessError::EmptyQualifiedSubset { w_critical: 0.2 })
    );
}

#[rstest]
fn invalid_config_is_rejected_before_any_stage() {
    let input = InputSeries::builder()
        .with_t(regular_t(3))
        .with_y([0.3; 3])
        .build()
        .unwrap();
    let cfg = PreprocessCfg {
        perc_wc: 0.0,
        ..PreprocessCfg::default()
    };
    let err = check_input(&input, &cfg).unwrap_err();
    assert_eq!(
        err.downcast_ref::<BuildError>(),
        Some(&BuildError::InvalidConfig("perc_wc must be in (0.0, 1.0]"))
    );
}
