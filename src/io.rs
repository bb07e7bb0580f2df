//! Building a [`FeatureCollection`] from common annotation formats.
//!
//! These are convenience constructors for callers that already hold a GFF3
//! or BED stream describing a single sequence. Fuller import pipelines,
//! with their own validation and reporting, live with the callers.

use std::io::Read;

use anyhow::Result;
use bio::io::{bed, gff};
use bio_types::strand::Strand;
use log::debug;

use crate::data_structs::collection::FeatureCollection;
use crate::data_structs::feature::Feature;
use crate::data_structs::typedef::{PosType, ScoreType};

impl FeatureCollection {
    /// Reads GFF3 records into a new collection. Column 3 becomes the
    /// feature type and column 2 (the source) the feature group; strand
    /// and frame are kept in the attribute map. Malformed input fails the
    /// whole load.
    pub fn from_gff<R: Read>(reader: R) -> Result<Self> {
        let mut gff_reader = gff::Reader::new(reader, gff::GffType::GFF3);
        let mut collection = FeatureCollection::new();
        let mut count = 0usize;

        for record in gff_reader.records() {
            let record = record?;

            let mut feature = Feature::ranged(
                record.feature_type(),
                *record.start() as PosType,
                *record.end() as PosType,
            );
            let source = record.source();
            if !source.is_empty() && source != "." {
                feature = feature.with_group(Some(source));
            }
            if let Some(score) = record.score() {
                feature = feature.with_score(score as ScoreType);
            }
            if let Some(strand) = record.strand() {
                feature = feature.with_attribute("strand", match strand {
                    Strand::Forward => "+",
                    Strand::Reverse => "-",
                    Strand::Unknown => ".",
                });
            }
            let frame: Result<u8, _> = record.phase().clone().try_into();
            if let Ok(frame) = frame {
                feature = feature.with_attribute("frame", frame.to_string());
            }

            if collection.add(feature) {
                count += 1;
            }
        }

        debug!("loaded {} features from GFF input", count);
        Ok(collection)
    }

    /// Reads BED records into a new collection, all under the given
    /// feature type. BED coordinates are 0-based half-open and are
    /// converted to the 1-based inclusive convention used here.
    pub fn from_bed<R: Read>(
        reader: R,
        feature_type: &str,
    ) -> Result<Self> {
        let mut bed_reader = bed::Reader::new(reader);
        let mut collection = FeatureCollection::new();
        let mut count = 0usize;

        for record in bed_reader.records() {
            let record = record?;
            if collection.add(Feature::from_bed_record(feature_type, &record))
            {
                count += 1;
            }
        }

        debug!("loaded {} features from BED input", count);
        Ok(collection)
    }
}
