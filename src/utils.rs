//! Small helpers shared by the feature store and its consumers.

use crate::data_structs::feature::Feature;
use crate::data_structs::typedef::ScoreType;

/// Minimum of two scores, where a concrete value always wins over the
/// unscored (NaN) sentinel. IEEE min would propagate NaN instead.
pub fn score_min(
    f1: ScoreType,
    f2: ScoreType,
) -> ScoreType {
    if f1.is_nan() {
        f2
    }
    else if f2.is_nan() {
        f1
    }
    else {
        f1.min(f2)
    }
}

/// Maximum of two scores, where a concrete value always wins over the
/// unscored (NaN) sentinel.
pub fn score_max(
    f1: ScoreType,
    f2: ScoreType,
) -> ScoreType {
    if f1.is_nan() {
        f2
    }
    else if f2.is_nan() {
        f1
    }
    else {
        f1.max(f2)
    }
}

/// Sorts features for display: by start position ascending with longer
/// features first when rendering the forward strand, or by end position
/// descending for the reverse strand.
pub fn sort_features(
    features: &mut [Feature],
    forward_strand: bool,
) {
    if forward_strand {
        features.sort_by(|a, b| {
            a.begin()
                .cmp(&b.begin())
                .then(b.end().cmp(&a.end()))
        });
    }
    else {
        features.sort_by(|a, b| b.end().cmp(&a.end()));
    }
}
