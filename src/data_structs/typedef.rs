pub type PosType = u32;
pub type ScoreType = f32;

/// Sentinel score for features that carry no score.
pub const NO_SCORE: ScoreType = ScoreType::NAN;
