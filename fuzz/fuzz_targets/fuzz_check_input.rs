#![no_main]
use libfuzzer_sys::arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use phenoprep_core::{InputSeries, PreprocessCfg, check_input};

#[derive(Debug, Arbitrary)]
struct Case {
    steps: Vec<u8>,
    y: Vec<Option<f32>>,
    w: Vec<u8>,
    wmin: u8,
    perc_wc: u8,
    maxgap: Option<u8>,
    mask_spike: bool,
}

fuzz_target!(|case: Case| {
    let n = case.steps.len().min(case.y.len()).min(case.w.len());
    let mut acc = 0.0f64;
    let t: Vec<f64> = case.steps[..n]
        .iter()
        .map(|&s| {
            acc += f64::from(s) + 1.0;
            acc
        })
        .collect();
    let y: Vec<Option<f64>> = case.y[..n].iter().map(|v| v.map(f64::from)).collect();
    let w: Vec<f64> = case.w[..n].iter().map(|&b| f64::from(b) / 255.0).collect();

    let cfg = PreprocessCfg {
        wmin: f64::from(case.wmin % 100) / 100.0,
        perc_wc: (f64::from(case.perc_wc % 100) + 1.0) / 100.0,
        maxgap: case.maxgap.map(|g| usize::from(g).max(1)),
        mask_spike: case.mask_spike,
        ..PreprocessCfg::default()
    };

    let Ok(input) = InputSeries::builder().with_t(t).with_y(y).with_weights(w).build() else {
        return;
    };
    // EmptyQualifiedSubset is a legitimate outcome; anything that succeeds
    // must be fully populated and floored.
    if let Ok(out) = check_input(&input, &cfg) {
        assert!(out.y.iter().all(|v| !v.is_nan()));
        assert!(out.w.iter().all(|&wi| wi >= cfg.wmin && wi <= 1.0));
    }
});
