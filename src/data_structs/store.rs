use arcstr::ArcStr;
use hashbrown::HashSet;
use itertools::Itertools;
use rust_lapper::{Interval, Lapper};

use crate::data_structs::feature::Feature;
use crate::data_structs::typedef::{PosType, ScoreType, NO_SCORE};
use crate::utils::{score_max, score_min};

/// All features of one type on one sequence, held for efficient overlap
/// lookup.
///
/// Ranged features live in an interval index. Contact features are kept in
/// two lists, sorted by first and by second contact point, so that an
/// overlap query can find them from whichever point falls in range.
/// Non-positional features are kept in insertion order. Distinct feature
/// groups, total covered length and score bounds are folded in on every
/// insertion and rebuilt by a full rescan after a deletion.
///
/// Feature coordinates are 1-based inclusive throughout the public surface;
/// the interval index's half-open convention stays internal.
#[derive(Debug, Clone)]
pub struct FeatureStore {
    non_positional: Vec<Feature>,
    contact_starts: Vec<Feature>,
    contact_ends:   Vec<Feature>,
    ranged:         Lapper<PosType, Feature>,

    positional_groups:     HashSet<Option<ArcStr>>,
    non_positional_groups: HashSet<Option<ArcStr>>,

    /// Sum of the lengths of all positional features; a contact feature
    /// counts 1, consistent with it counting 1 towards the feature count.
    total_extent: u64,

    positional_min_score:     ScoreType,
    positional_max_score:     ScoreType,
    non_positional_min_score: ScoreType,
    non_positional_max_score: ScoreType,
}

impl Default for FeatureStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureStore {
    pub fn new() -> Self {
        Self {
            non_positional: Vec::new(),
            contact_starts: Vec::new(),
            contact_ends: Vec::new(),
            ranged: Lapper::new(Vec::new()),
            positional_groups: HashSet::new(),
            non_positional_groups: HashSet::new(),
            total_extent: 0,
            positional_min_score: NO_SCORE,
            positional_max_score: NO_SCORE,
            non_positional_min_score: NO_SCORE,
            non_positional_max_score: NO_SCORE,
        }
    }

    /// Adds one feature and returns true, unless an equal feature is
    /// already present, in which case nothing changes and false is
    /// returned.
    pub fn add(
        &mut self,
        feature: Feature,
    ) -> bool {
        if self.contains(&feature) {
            return false;
        }

        self.record_added(&feature);

        if feature.is_contact() {
            self.add_contact(feature);
        }
        else if feature.is_non_positional() {
            self.non_positional.push(feature);
        }
        else {
            let start = feature.begin();
            let stop = feature.end().saturating_add(1);
            self.ranged.insert(Interval {
                start,
                stop,
                val: feature,
            });
        }
        true
    }

    /// Folds one feature into the cached group sets, total extent and score
    /// bounds. Shared by insertion and the post-delete rescan.
    fn record_added(
        &mut self,
        feature: &Feature,
    ) {
        let group = feature.feature_group().cloned();
        if feature.is_non_positional() {
            self.non_positional_groups.insert(group);
        }
        else {
            self.positional_groups.insert(group);
        }

        self.total_extent += feature.length();

        let score = feature.score();
        if score.is_nan() {
            return;
        }
        if feature.is_non_positional() {
            self.non_positional_min_score =
                score_min(self.non_positional_min_score, score);
            self.non_positional_max_score =
                score_max(self.non_positional_max_score, score);
        }
        else {
            self.positional_min_score =
                score_min(self.positional_min_score, score);
            self.positional_max_score =
                score_max(self.positional_max_score, score);
        }
    }

    /// Inserts a contact feature into both sorted lists at the position
    /// that keeps them ordered. Coordinate ties are allowed; the insertion
    /// point is the first entry not less than the key.
    fn add_contact(
        &mut self,
        feature: Feature,
    ) {
        let at = self
            .contact_starts
            .partition_point(|f| f.begin() < feature.begin());
        self.contact_starts.insert(at, feature.clone());

        let at = self
            .contact_ends
            .partition_point(|f| f.end() < feature.end());
        self.contact_ends.insert(at, feature);
    }

    /// Whether the store holds a feature equal to the given one.
    pub fn contains(
        &self,
        feature: &Feature,
    ) -> bool {
        if feature.is_non_positional() {
            return self.non_positional.contains(feature);
        }
        if feature.is_contact() {
            return Self::sorted_contains(&self.contact_starts, feature);
        }
        self.ranged
            .find(feature.begin(), feature.end().saturating_add(1))
            .any(|iv| iv.val == *feature)
    }

    /// Membership test on a list sorted by start position: binary-search to
    /// the first candidate at the feature's start, then scan only the tied
    /// entries.
    fn sorted_contains(
        features: &[Feature],
        feature: &Feature,
    ) -> bool {
        let from =
            features.partition_point(|f| f.begin() < feature.begin());
        features[from..]
            .iter()
            .take_while(|f| f.begin() <= feature.begin())
            .any(|f| f == feature)
    }

    /// Every feature whose extent intersects the closed range
    /// `[start, end]`, in no particular order. A contact feature qualifies
    /// if either of its points lies in the range, and is reported once even
    /// when both do. Non-positional features are never returned. An
    /// inverted range answers empty.
    pub fn find_overlapping(
        &self,
        start: PosType,
        end: PosType,
    ) -> Vec<Feature> {
        if start > end {
            return Vec::new();
        }

        let mut result = Vec::new();
        self.find_contact_start_overlaps(start, end, &mut result);
        self.find_contact_end_overlaps(start, end, &mut result);
        result.extend(
            self.ranged
                .find(start, end.saturating_add(1))
                .map(|iv| iv.val.clone()),
        );
        result
    }

    /// Collects contact features whose first point lies in `[from, to]`.
    fn find_contact_start_overlaps(
        &self,
        from: PosType,
        to: PosType,
        result: &mut Vec<Feature>,
    ) {
        let index = self
            .contact_starts
            .partition_point(|f| f.begin() < from);
        for feature in &self.contact_starts[index..] {
            if feature.begin() > to {
                break;
            }
            result.push(feature.clone());
        }
    }

    /// Collects contact features whose second point, but not first, lies in
    /// `[from, to]`. Features whose first point is in range were already
    /// captured by the start scan and are skipped here.
    fn find_contact_end_overlaps(
        &self,
        from: PosType,
        to: PosType,
        result: &mut Vec<Feature>,
    ) {
        let index = self
            .contact_ends
            .partition_point(|f| f.end() < from);
        for feature in &self.contact_ends[index..] {
            let begin = feature.begin();
            if begin >= from && begin <= to {
                continue;
            }
            if feature.end() > to {
                break;
            }
            result.push(feature.clone());
        }
    }

    /// All positional features: contacts in start order, then ranged
    /// features in index order.
    pub fn positional_features(&self) -> Vec<Feature> {
        self.contact_starts
            .iter()
            .chain(self.ranged.iter().map(|iv| &iv.val))
            .cloned()
            .collect_vec()
    }

    /// All contact features, in start order.
    pub fn contact_features(&self) -> Vec<Feature> {
        self.contact_starts.clone()
    }

    /// All non-positional features, in insertion order.
    pub fn non_positional_features(&self) -> Vec<Feature> {
        self.non_positional.clone()
    }

    /// Removes the feature equal to the given one, if present, and rebuilds
    /// the cached aggregates. Returns whether anything was removed.
    pub fn delete(
        &mut self,
        feature: &Feature,
    ) -> bool {
        let removed = if feature.is_contact() {
            self.delete_contact(feature)
        }
        else if feature.is_non_positional() {
            remove_by_value(&mut self.non_positional, feature)
        }
        else {
            self.delete_ranged(feature)
        };

        if removed {
            self.rescan_after_delete();
        }
        removed
    }

    fn delete_contact(
        &mut self,
        feature: &Feature,
    ) -> bool {
        if !remove_by_value(&mut self.contact_starts, feature) {
            return false;
        }
        // the twin list is not at a mirrored index after earlier deletions
        remove_by_value(&mut self.contact_ends, feature);
        true
    }

    fn delete_ranged(
        &mut self,
        feature: &Feature,
    ) -> bool {
        let mut intervals = self.ranged.iter().cloned().collect_vec();
        match intervals
            .iter()
            .position(|iv| iv.val == *feature)
        {
            Some(at) => {
                intervals.remove(at);
                self.ranged = Lapper::new(intervals);
                true
            },
            None => false,
        }
    }

    /// Recomputes groups, extent and score bounds from current contents.
    /// Deletion is expected to be infrequent relative to insertion and
    /// query, so a full rescan is affordable here.
    fn rescan_after_delete(&mut self) {
        self.positional_groups.clear();
        self.non_positional_groups.clear();
        self.total_extent = 0;
        self.positional_min_score = NO_SCORE;
        self.positional_max_score = NO_SCORE;
        self.non_positional_min_score = NO_SCORE;
        self.non_positional_max_score = NO_SCORE;

        for feature in self.non_positional_features() {
            self.record_added(&feature);
        }
        for feature in self.positional_features() {
            self.record_added(&feature);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.contact_starts.is_empty()
            && self.non_positional.is_empty()
            && self.ranged.len() == 0
    }

    /// The number of positional or non-positional features stored. A
    /// contact feature counts as one.
    pub fn feature_count(
        &self,
        positional: bool,
    ) -> usize {
        if positional {
            self.contact_starts.len() + self.ranged.len()
        }
        else {
            self.non_positional.len()
        }
    }

    /// The total length of positional features; contact features
    /// contribute 1.
    pub fn total_feature_length(&self) -> u64 {
        self.total_extent
    }

    /// The minimum score of positional or non-positional features, or NaN
    /// if no such feature carries a score.
    pub fn min_score(
        &self,
        positional: bool,
    ) -> ScoreType {
        if positional {
            self.positional_min_score
        }
        else {
            self.non_positional_min_score
        }
    }

    /// The maximum score of positional or non-positional features, or NaN
    /// if no such feature carries a score.
    pub fn max_score(
        &self,
        positional: bool,
    ) -> ScoreType {
        if positional {
            self.positional_max_score
        }
        else {
            self.non_positional_max_score
        }
    }

    /// The distinct feature groups of positional or non-positional
    /// features, possibly including `None`.
    pub fn feature_groups(
        &self,
        positional: bool,
    ) -> HashSet<Option<ArcStr>> {
        if positional {
            self.positional_groups.clone()
        }
        else {
            self.non_positional_groups.clone()
        }
    }

    /// Positional or non-positional features whose group matches the given
    /// one, where `None` matches only group-less features. Answers empty
    /// without scanning when the cached group set rules the group out.
    pub fn features_for_group(
        &self,
        positional: bool,
        group: Option<&str>,
    ) -> Vec<Feature> {
        let known = if positional {
            &self.positional_groups
        }
        else {
            &self.non_positional_groups
        };
        if !known.contains(&group.map(ArcStr::from)) {
            return Vec::new();
        }

        let features = if positional {
            self.positional_features()
        }
        else {
            self.non_positional_features()
        };
        features
            .into_iter()
            .filter(|f| {
                f.feature_group().map(ArcStr::as_str) == group
            })
            .collect_vec()
    }

    /// Shifts every positional feature whose begin is at or after
    /// `from_position` by `shift_by`, replacing each with a new record
    /// (coordinates are immutable on a stored feature). The new begin is
    /// clamped to 1; a feature whose shifted end would not be positive is
    /// dropped entirely. Returns true if at least one feature changed.
    pub fn shift_features(
        &mut self,
        from_position: PosType,
        shift_by: i64,
    ) -> bool {
        let mut modified = false;
        for feature in self.positional_features() {
            if feature.begin() < from_position {
                continue;
            }
            modified = true;

            let new_begin = i64::from(feature.begin()) + shift_by;
            let new_end = i64::from(feature.end()) + shift_by;
            if new_end > 0 {
                let new_begin = new_begin.max(1) as PosType;
                self.add(feature.with_range(new_begin, new_end as PosType));
            }
            self.delete(&feature);
        }
        modified
    }
}

fn remove_by_value(
    features: &mut Vec<Feature>,
    feature: &Feature,
) -> bool {
    match features.iter().position(|f| f == feature) {
        Some(at) => {
            features.remove(at);
            true
        },
        None => false,
    }
}
