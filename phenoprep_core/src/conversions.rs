//! `From` implementation bridging the TOML schema in `phenoprep_config` to the
//! runtime `PreprocessCfg`.

use crate::config::PreprocessCfg;

impl From<&phenoprep_config::Config> for PreprocessCfg {
    fn from(c: &phenoprep_config::Config) -> Self {
        Self {
            nptperyear: c.series.nptperyear,
            south: c.series.south,
            perc_wc: c.weights.perc_wc,
            wmin: c.weights.wmin,
            ymin: c.range.ymin,
            missval: c.fill.missval,
            maxgap: c.fill.maxgap,
            alpha: c.range.alpha,
            alpha_high: c.range.alpha_high,
            mask_spike: c.fill.mask_spike,
        }
    }
}
