use std::collections::BTreeMap;

use arcstr::ArcStr;
use hashbrown::HashSet;
use itertools::Itertools;
use log::warn;

use crate::data_structs::feature::Feature;
use crate::data_structs::store::FeatureStore;
use crate::data_structs::typedef::{PosType, ScoreType, NO_SCORE};
use crate::ontology::OntologyQuery;

/// All feature stores for one sequence, keyed by feature type.
///
/// Queries taking a `types` slice fan out over the stores for those types
/// in the order given; an empty slice means every stored type, in
/// alphabetical order. A store is created on the first insertion of its
/// type and stays in place when emptied (an emptied type still counts as
/// "seen"); only [`FeatureCollection::delete_all`] discards stores.
#[derive(Debug, Clone, Default)]
pub struct FeatureCollection {
    stores: BTreeMap<ArcStr, FeatureStore>,
}

impl FeatureCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a feature to the store for its type, creating the store if
    /// needed. A feature with an empty type is reported and rejected; a
    /// feature equal to one already stored is rejected silently.
    pub fn add(
        &mut self,
        feature: Feature,
    ) -> bool {
        if feature.feature_type().is_empty() {
            warn!("feature type may not be empty: {}", feature);
            return false;
        }

        let feature_type = feature.feature_type().clone();
        self.stores
            .entry(feature_type)
            .or_default()
            .add(feature)
    }

    /// The store for one feature type, if that type has been seen.
    pub fn store(
        &self,
        feature_type: &str,
    ) -> Option<&FeatureStore> {
        self.stores.get(feature_type)
    }

    /// Every stored feature type name, alphabetically, including types
    /// whose stores have been emptied.
    pub fn feature_type_names(&self) -> Vec<ArcStr> {
        self.stores.keys().cloned().collect_vec()
    }

    /// The stores for the given types, preserving their order; all stores
    /// (alphabetically by type) when no types are given. Unknown types are
    /// skipped.
    fn stores_for_types(
        &self,
        types: &[&str],
    ) -> Vec<&FeatureStore> {
        if types.is_empty() {
            return self.stores.values().collect_vec();
        }
        types
            .iter()
            .filter_map(|t| self.stores.get(*t))
            .collect_vec()
    }

    /// Every feature of the given types overlapping the closed range
    /// `[from, to]`. Results for earlier-listed types come first.
    pub fn find_features(
        &self,
        from: PosType,
        to: PosType,
        types: &[&str],
    ) -> Vec<Feature> {
        self.stores_for_types(types)
            .into_iter()
            .flat_map(|store| store.find_overlapping(from, to))
            .collect_vec()
    }

    /// Positional features filtered by type, followed by all non-positional
    /// features regardless of the type filter. Non-positional features are
    /// whole-sequence metadata and always surface here; callers wanting
    /// them type-filtered use [`FeatureCollection::non_positional_features`]
    /// directly.
    pub fn all_features(
        &self,
        types: &[&str],
    ) -> Vec<Feature> {
        let mut result = self.positional_features(types);
        result.extend(self.non_positional_features(&[]));
        result
    }

    /// All features whose type equals, or is an ontology subtype of, any of
    /// the given terms. Empty terms answer empty, as does a term set
    /// matching no stored type (no store is queried in that case).
    pub fn features_by_ontology<O>(
        &self,
        ontology: &O,
        terms: &[&str],
    ) -> Vec<Feature>
    where
        O: OntologyQuery + ?Sized,
    {
        if terms.is_empty() {
            return Vec::new();
        }

        let types = self.feature_types(ontology, terms);
        if types.is_empty() {
            return Vec::new();
        }

        let types = types.iter().map(ArcStr::as_str).collect_vec();
        self.all_features(&types)
    }

    /// Stored types that equal, or are an ontology subtype of, any of the
    /// given terms; every non-empty type when no terms are given. Types
    /// whose stores have been emptied are excluded either way.
    pub fn feature_types<O>(
        &self,
        ontology: &O,
        terms: &[&str],
    ) -> HashSet<ArcStr>
    where
        O: OntologyQuery + ?Sized,
    {
        self.stores
            .iter()
            .filter(|(_, store)| !store.is_empty())
            .filter(|(feature_type, _)| {
                Self::matches_term(ontology, feature_type.as_str(), terms)
            })
            .map(|(feature_type, _)| feature_type.clone())
            .collect()
    }

    fn matches_term<O>(
        ontology: &O,
        feature_type: &str,
        terms: &[&str],
    ) -> bool
    where
        O: OntologyQuery + ?Sized,
    {
        terms.is_empty()
            || terms.iter().any(|term| {
                feature_type == *term
                    || ontology.is_subtype(feature_type, term)
            })
    }

    /// The number of positional or non-positional features of the given
    /// types.
    pub fn feature_count(
        &self,
        positional: bool,
        types: &[&str],
    ) -> usize {
        self.stores_for_types(types)
            .into_iter()
            .map(|store| store.feature_count(positional))
            .sum()
    }

    /// The total length of positional features of the given types.
    pub fn total_feature_length(
        &self,
        types: &[&str],
    ) -> u64 {
        self.stores_for_types(types)
            .into_iter()
            .map(|store| store.total_feature_length())
            .sum()
    }

    pub fn positional_features(
        &self,
        types: &[&str],
    ) -> Vec<Feature> {
        self.stores_for_types(types)
            .into_iter()
            .flat_map(|store| store.positional_features())
            .collect_vec()
    }

    pub fn contact_features(
        &self,
        types: &[&str],
    ) -> Vec<Feature> {
        self.stores_for_types(types)
            .into_iter()
            .flat_map(|store| store.contact_features())
            .collect_vec()
    }

    pub fn non_positional_features(
        &self,
        types: &[&str],
    ) -> Vec<Feature> {
        self.stores_for_types(types)
            .into_iter()
            .flat_map(|store| store.non_positional_features())
            .collect_vec()
    }

    /// The minimum score for one feature type, or NaN if the type is
    /// unknown or carries no scores.
    pub fn min_score(
        &self,
        feature_type: &str,
        positional: bool,
    ) -> ScoreType {
        self.stores
            .get(feature_type)
            .map_or(NO_SCORE, |store| store.min_score(positional))
    }

    /// The maximum score for one feature type, or NaN if the type is
    /// unknown or carries no scores.
    pub fn max_score(
        &self,
        feature_type: &str,
        positional: bool,
    ) -> ScoreType {
        self.stores
            .get(feature_type)
            .map_or(NO_SCORE, |store| store.max_score(positional))
    }

    /// The distinct feature groups, possibly including `None`, across the
    /// given types.
    pub fn feature_groups(
        &self,
        positional: bool,
        types: &[&str],
    ) -> HashSet<Option<ArcStr>> {
        let mut groups = HashSet::new();
        for store in self.stores_for_types(types) {
            groups.extend(store.feature_groups(positional));
        }
        groups
    }

    /// The feature types known to contain at least one feature in at least
    /// one of the queried groups. No filtering of individual features
    /// happens here; the cached group sets decide.
    pub fn feature_types_for_groups(
        &self,
        positional: bool,
        groups: &[Option<&str>],
    ) -> HashSet<ArcStr> {
        let mut result = HashSet::new();
        for (feature_type, store) in &self.stores {
            let known = store.feature_groups(positional);
            if groups
                .iter()
                .any(|group| known.contains(&group.map(ArcStr::from)))
            {
                result.insert(feature_type.clone());
            }
        }
        result
    }

    /// Features of the given types whose group matches the given one,
    /// where `None` matches only group-less features.
    pub fn features_for_group(
        &self,
        positional: bool,
        group: Option<&str>,
        types: &[&str],
    ) -> Vec<Feature> {
        self.stores_for_types(types)
            .into_iter()
            .flat_map(|store| store.features_for_group(positional, group))
            .collect_vec()
    }

    /// Deletes the feature from the first store that holds it. A feature
    /// belongs to exactly one store, by type.
    pub fn delete(
        &mut self,
        feature: &Feature,
    ) -> bool {
        self.stores
            .values_mut()
            .any(|store| store.delete(feature))
    }

    /// Whether any store holds at least one feature.
    pub fn has_features(&self) -> bool {
        self.stores.values().any(|store| !store.is_empty())
    }

    /// Shifts positional features in every store; see
    /// [`FeatureStore::shift_features`]. Returns true if any store
    /// reported a change.
    pub fn shift_features(
        &mut self,
        from_position: PosType,
        shift_by: i64,
    ) -> bool {
        let mut modified = false;
        for store in self.stores.values_mut() {
            modified |= store.shift_features(from_position, shift_by);
        }
        modified
    }

    /// Drops every store. Subsequent insertions recreate stores as needed.
    pub fn delete_all(&mut self) {
        self.stores.clear();
    }
}

impl FromIterator<Feature> for FeatureCollection {
    fn from_iter<T: IntoIterator<Item = Feature>>(iter: T) -> Self {
        let mut collection = Self::new();
        collection.extend(iter);
        collection
    }
}

impl Extend<Feature> for FeatureCollection {
    fn extend<T: IntoIterator<Item = Feature>>(
        &mut self,
        iter: T,
    ) {
        for feature in iter {
            self.add(feature);
        }
    }
}
