/// coverage of one group (a cell or a school) at each configured
/// threshold. a row only exists for groups with at least one pair, so the
/// fractions are always well defined.
#[derive(Debug, Clone)]
pub struct CoverageRow {
    /// cell code or school name, depending on the grouping
    pub key: String,
    /// total (cell, school) pairs evaluated for this group
    pub pairs: u64,
    pub thresholds: Vec<ThresholdCoverage>,
}

#[derive(Debug, Clone)]
pub struct ThresholdCoverage {
    pub threshold_min: u32,
    pub pairs_within: u64,
    /// pairs_within / pairs, in [0, 1]
    pub fraction: f64,
}

impl CoverageRow {
    pub fn fraction_at(&self, threshold_min: u32) -> Option<f64> {
        self.thresholds
            .iter()
            .find(|t| t.threshold_min == threshold_min)
            .map(|t| t.fraction)
    }
}
