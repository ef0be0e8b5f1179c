use shortlabel_core::FeatureRange;

/// Order a feature's ranges by ascending start position.
///
/// The sort is stable, so ranges sharing a start keep their input order and
/// repeated runs over the same input always agree.
pub fn order_ranges(ranges: &[FeatureRange]) -> Vec<&FeatureRange> {
    let mut ordered: Vec<&FeatureRange> = ranges.iter().collect();
    ordered.sort_by_key(|r| r.start.value);
    ordered
}
