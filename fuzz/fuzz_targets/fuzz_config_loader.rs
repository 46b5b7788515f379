#![no_main]
use libfuzzer_sys::fuzz_target;
use phenoprep_core::PreprocessCfg;

fuzz_target!(|data: &str| {
    // Parse and validation errors are fine; panics are not. A document that
    // passes schema validation must also pass the runtime check.
    if let Ok(cfg) = phenoprep_config::load_toml(data)
        && cfg.validate().is_ok()
    {
        assert!(PreprocessCfg::from(&cfg).validate().is_ok());
    }
});
