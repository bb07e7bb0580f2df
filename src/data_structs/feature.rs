use std::fmt;

use arcstr::ArcStr;
use bio_types::strand::Strand;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::data_structs::typedef::{PosType, ScoreType, NO_SCORE};

/// Coordinate data for a feature.
///
/// The kind of a feature is a property of the variant and never changes
/// after construction. "Moving" a feature means building a replacement with
/// [`Feature::with_range`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureSpan {
    /// No coordinates; the feature annotates the sequence as a whole.
    NonPositional,
    /// A link between two residue positions rather than a contiguous range.
    Contact { first: PosType, second: PosType },
    /// A closed range of 1-based residue positions.
    Range { begin: PosType, end: PosType },
}

impl FeatureSpan {
    /// The first coordinate, or 0 for a non-positional span.
    pub fn begin(&self) -> PosType {
        match *self {
            FeatureSpan::NonPositional => 0,
            FeatureSpan::Contact { first, .. } => first,
            FeatureSpan::Range { begin, .. } => begin,
        }
    }

    /// The second coordinate, or 0 for a non-positional span.
    pub fn end(&self) -> PosType {
        match *self {
            FeatureSpan::NonPositional => 0,
            FeatureSpan::Contact { second, .. } => second,
            FeatureSpan::Range { end, .. } => end,
        }
    }

    /// The covered length: 0 for non-positional spans, 1 for contacts
    /// (a pair of points, not the distance between them), and the closed
    /// range width otherwise.
    pub fn length(&self) -> u64 {
        match *self {
            FeatureSpan::NonPositional => 0,
            FeatureSpan::Contact { .. } => 1,
            FeatureSpan::Range { begin, end } => {
                u64::from(end.saturating_sub(begin)) + 1
            },
        }
    }
}

/// One annotated range, contact pair or whole-sequence datum on a sequence.
///
/// Two features are equal when every field matches; an unscored (NaN) score
/// is equal only to another unscored score. Stores rely on this to reject
/// duplicate insertions and to locate a feature for deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    feature_type:  ArcStr,
    span:          FeatureSpan,
    feature_group: Option<ArcStr>,
    #[serde(with = "score_serde")]
    score:         ScoreType,
    description:   ArcStr,
    attributes:    HashMap<String, String>,
}

/// Round-trips the NaN "unscored" sentinel through formats that cannot
/// represent NaN (it serialises as an absent option).
mod score_serde {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::data_structs::typedef::{ScoreType, NO_SCORE};

    pub fn serialize<S>(
        score: &ScoreType,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer, {
        if score.is_nan() {
            serializer.serialize_none()
        }
        else {
            serializer.serialize_some(score)
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<ScoreType, D::Error>
    where
        D: Deserializer<'de>, {
        Ok(Option::<ScoreType>::deserialize(deserializer)?
            .unwrap_or(NO_SCORE))
    }
}

impl Feature {
    fn new(
        feature_type: ArcStr,
        span: FeatureSpan,
    ) -> Self {
        Self {
            feature_type,
            span,
            feature_group: None,
            score: NO_SCORE,
            description: ArcStr::new(),
            attributes: HashMap::new(),
        }
    }

    /// Creates a feature over the closed range `[begin, end]`. Zero start
    /// and end mark a feature with no position at all.
    pub fn ranged<T: Into<ArcStr>>(
        feature_type: T,
        begin: PosType,
        end: PosType,
    ) -> Self {
        let span = if begin == 0 && end == 0 {
            FeatureSpan::NonPositional
        }
        else {
            FeatureSpan::Range { begin, end }
        };
        Self::new(feature_type.into(), span)
    }

    /// Creates a feature linking two residue positions.
    pub fn contact<T: Into<ArcStr>>(
        feature_type: T,
        first: PosType,
        second: PosType,
    ) -> Self {
        Self::new(feature_type.into(), FeatureSpan::Contact {
            first,
            second,
        })
    }

    /// Creates a feature attached to the sequence as a whole.
    pub fn non_positional<T: Into<ArcStr>>(feature_type: T) -> Self {
        Self::new(feature_type.into(), FeatureSpan::NonPositional)
    }

    /// Sets the feature group.
    pub fn with_group<S: Into<ArcStr>>(
        mut self,
        group: Option<S>,
    ) -> Self {
        self.feature_group = group.map(|g| g.into());
        self
    }

    /// Sets the score.
    pub fn with_score(
        mut self,
        score: ScoreType,
    ) -> Self {
        self.score = score;
        self
    }

    /// Sets the description.
    pub fn with_description<S: Into<ArcStr>>(
        mut self,
        description: S,
    ) -> Self {
        self.description = description.into();
        self
    }

    /// Adds one named attribute.
    pub fn with_attribute<K: Into<String>, V: Into<String>>(
        mut self,
        key: K,
        value: V,
    ) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Clones this feature onto new coordinates, keeping its kind and every
    /// other field.
    pub fn with_range(
        &self,
        begin: PosType,
        end: PosType,
    ) -> Self {
        let mut copy = self.clone();
        copy.span = match self.span {
            FeatureSpan::NonPositional => FeatureSpan::NonPositional,
            FeatureSpan::Contact { .. } => {
                FeatureSpan::Contact {
                    first:  begin,
                    second: end,
                }
            },
            FeatureSpan::Range { .. } => FeatureSpan::Range { begin, end },
        };
        copy
    }

    pub fn feature_type(&self) -> &ArcStr {
        &self.feature_type
    }

    pub fn span(&self) -> FeatureSpan {
        self.span
    }

    pub fn feature_group(&self) -> Option<&ArcStr> {
        self.feature_group.as_ref()
    }

    /// The score, or the NaN sentinel if the feature is unscored.
    pub fn score(&self) -> ScoreType {
        self.score
    }

    pub fn has_score(&self) -> bool {
        !self.score.is_nan()
    }

    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    pub fn attribute(
        &self,
        key: &str,
    ) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn attributes(&self) -> &HashMap<String, String> {
        &self.attributes
    }

    pub fn begin(&self) -> PosType {
        self.span.begin()
    }

    pub fn end(&self) -> PosType {
        self.span.end()
    }

    pub fn length(&self) -> u64 {
        self.span.length()
    }

    pub fn is_contact(&self) -> bool {
        matches!(self.span, FeatureSpan::Contact { .. })
    }

    pub fn is_non_positional(&self) -> bool {
        matches!(self.span, FeatureSpan::NonPositional)
    }

    pub fn is_positional(&self) -> bool {
        !self.is_non_positional()
    }

    /// Builds a ranged feature of the given type from a BED record,
    /// converting the record's 0-based half-open coordinates to the 1-based
    /// inclusive convention used here. An unparseable score column leaves
    /// the feature unscored.
    pub fn from_bed_record(
        feature_type: &str,
        record: &bio::io::bed::Record,
    ) -> Self {
        let begin = record.start() as PosType + 1;
        let end = record.end() as PosType;

        let mut feature = Feature::ranged(feature_type, begin, end);
        if let Some(score) = record
            .score()
            .and_then(|s| s.parse::<ScoreType>().ok())
        {
            feature = feature.with_score(score);
        }
        if let Some(name) = record.name() {
            feature = feature.with_description(name);
        }
        if let Some(strand) = record.strand() {
            feature = feature.with_attribute("strand", match strand {
                Strand::Forward => "+",
                Strand::Reverse => "-",
                Strand::Unknown => ".",
            });
        }
        feature
    }
}

impl PartialEq for Feature {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        let same_score = if self.score.is_nan() {
            other.score.is_nan()
        }
        else {
            self.score == other.score
        };

        same_score
            && self.span == other.span
            && self.feature_type == other.feature_type
            && self.feature_group == other.feature_group
            && self.description == other.description
            && self.attributes == other.attributes
    }
}

impl Eq for Feature {}

impl fmt::Display for Feature {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self.span {
            FeatureSpan::NonPositional => write!(f, "{}", self.feature_type),
            FeatureSpan::Contact { first, second } => {
                write!(f, "{} {}:{}", self.feature_type, first, second)
            },
            FeatureSpan::Range { begin, end } => {
                write!(f, "{} {}-{}", self.feature_type, begin, end)
            },
        }
    }
}
