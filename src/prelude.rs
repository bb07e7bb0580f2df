pub use crate::data_structs::typedef::{PosType, ScoreType, NO_SCORE};
pub use crate::data_structs::{
    Feature,
    FeatureCollection,
    FeatureSpan,
    FeatureStore,
};
pub use crate::ontology::{NoOntology, OntologyQuery};
pub use crate::utils::sort_features;
