//! # seqfeat
//!
//! `seqfeat` maintains, for a biological sequence, a searchable set of
//! annotated sub-ranges ("features") and answers queries for all features
//! overlapping an arbitrary coordinate range, grouped and filtered by
//! feature type, feature group and score.
//!
//! Three structurally different kinds of feature sit behind one query
//! surface:
//!
//! * **ranged** features cover a closed interval of 1-based residue
//!   positions and are indexed for overlap search;
//! * **contact** features link exactly two positions (for example a
//!   disulfide bond) and match a query range when either point falls
//!   inside it;
//! * **non-positional** features carry no coordinates and annotate the
//!   sequence as a whole.
//!
//! Features of one type live in a [`FeatureStore`], which also maintains
//! running aggregates: distinct feature groups, total covered length, and
//! minimum/maximum score for positional and non-positional features
//! separately. A [`FeatureCollection`] multiplexes stores by feature type
//! for a whole sequence, fans queries out across type filters, expands
//! type filters through a caller-supplied [`OntologyQuery`] hierarchy, and
//! supports bulk operations such as coordinate shifting after alignment
//! column edits.
//!
//! ## Usage
//!
//! ```
//! use seqfeat::prelude::*;
//!
//! let mut features = FeatureCollection::new();
//! features.add(
//!     Feature::ranged("domain", 10, 40)
//!         .with_group(Some("Pfam"))
//!         .with_score(27.5),
//! );
//! features.add(Feature::contact("disulfide bond", 5, 50));
//! features.add(Feature::non_positional("keyword"));
//!
//! let hits = features.find_features(35, 60, &[]);
//! assert_eq!(hits.len(), 2);
//!
//! assert_eq!(features.feature_count(true, &["domain"]), 1);
//! assert_eq!(features.max_score("domain", true), 27.5);
//! ```
//!
//! All query results are snapshots: they stay valid while the source store
//! keeps changing and never reflect later mutations. The structures are
//! single-writer by construction (`&mut self` on every mutation); wrap the
//! collection in a lock to share it across threads.
//!
//! [`FeatureStore`]: data_structs::FeatureStore
//! [`FeatureCollection`]: data_structs::FeatureCollection
//! [`OntologyQuery`]: ontology::OntologyQuery

pub mod data_structs;
pub mod io;
pub mod ontology;
pub mod prelude;
pub mod utils;
