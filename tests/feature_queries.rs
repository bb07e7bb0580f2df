use seqfeat::prelude::*;

fn sample_collection() -> FeatureCollection {
    let mut features = FeatureCollection::new();
    features.add(
        Feature::ranged("exon", 100, 250)
            .with_group(Some("ensembl"))
            .with_description("exon 1"),
    );
    features.add(
        Feature::ranged("exon", 300, 420)
            .with_group(Some("ensembl"))
            .with_description("exon 2"),
    );
    features.add(
        Feature::ranged("CDS", 120, 250)
            .with_group(Some("ensembl"))
            .with_score(1.0),
    );
    features.add(
        Feature::ranged("CDS", 300, 380)
            .with_group(Some("ensembl"))
            .with_score(3.0),
    );
    features.add(Feature::contact("disulfide bond", 130, 350));
    features.add(
        Feature::non_positional("chain")
            .with_group(Some("uniprot"))
            .with_description("whole chain"),
    );
    features
}

#[test]
fn overlap_queries_across_types() {
    let features = sample_collection();

    // all types, alphabetical store order
    let hits = features.find_features(200, 320, &[]);
    assert_eq!(hits.len(), 4);

    // the contact feature matches from either linked position
    assert_eq!(
        features
            .find_features(340, 360, &["disulfide bond"])
            .len(),
        1
    );
    assert_eq!(
        features
            .find_features(125, 135, &["disulfide bond"])
            .len(),
        1
    );
    // and does not span the gap between them
    assert!(features
        .find_features(200, 300, &["disulfide bond"])
        .is_empty());

    // explicit types answer in the order given
    let hits = features.find_features(100, 500, &["CDS", "exon"]);
    assert_eq!(hits.len(), 4);
    assert_eq!(hits[0].feature_type().as_str(), "CDS");
    assert_eq!(hits[3].feature_type().as_str(), "exon");

    // the non-positional chain annotation never overlaps anything
    assert!(features
        .find_features(1, 10_000, &["chain"])
        .is_empty());
}

#[test]
fn counts_lengths_and_groups() {
    let features = sample_collection();

    assert_eq!(features.feature_count(true, &[]), 5);
    assert_eq!(features.feature_count(false, &[]), 1);
    assert_eq!(features.feature_count(true, &["exon"]), 2);

    // 151 + 121 + 131 + 81 for the ranges, 1 for the contact
    assert_eq!(features.total_feature_length(&[]), 485);
    assert_eq!(features.total_feature_length(&["exon"]), 272);

    let groups = features.feature_groups(true, &[]);
    assert_eq!(groups.len(), 2);

    let types =
        features.feature_types_for_groups(false, &[Some("uniprot")]);
    assert_eq!(types.len(), 1);

    assert_eq!(features.min_score("CDS", true), 1.0);
    assert_eq!(features.max_score("CDS", true), 3.0);
    assert!(features.max_score("exon", true).is_nan());
}

#[test]
fn ontology_expansion() {
    let features = sample_collection();

    // a toy hierarchy: exon and CDS descend from transcript_region
    let oracle = |candidate: &str, ancestor: &str| {
        ancestor == "transcript_region"
            && matches!(candidate, "exon" | "CDS")
    };

    let types = features.feature_types(&oracle, &["transcript_region"]);
    assert_eq!(types.len(), 2);

    let found =
        features.features_by_ontology(&oracle, &["transcript_region"]);
    // four matched positional features plus the non-positional chain
    assert_eq!(found.len(), 5);

    assert!(features
        .features_by_ontology(&NoOntology, &["transcript_region"])
        .is_empty());
    let found = features.features_by_ontology(&NoOntology, &["exon"]);
    assert_eq!(found.len(), 3);
}

#[test]
fn shifting_after_column_edits() {
    let mut features = sample_collection();

    // insert 50 alignment columns at position 260: only features starting
    // at or after 260 move
    assert!(features.shift_features(260, 50));

    let mut exons = features.positional_features(&["exon"]);
    sort_features(&mut exons, true);
    assert_eq!(exons[0].begin(), 100);
    assert_eq!(exons[1].begin(), 350);
    assert_eq!(exons[1].end(), 470);

    // the contact feature starts at 130 and stays put
    let bonds = features.contact_features(&["disulfide bond"]);
    assert_eq!(bonds[0].begin(), 130);
    assert_eq!(bonds[0].end(), 350);

    // a deletion larger than the sequence drops everything positional
    assert!(features.shift_features(1, -10_000));
    assert_eq!(features.feature_count(true, &[]), 0);
    assert_eq!(features.feature_count(false, &[]), 1);
    assert!(features.has_features());
}

#[test]
fn lifecycle_round_trip() {
    let mut features = sample_collection();
    let bond = Feature::contact("disulfide bond", 130, 350);

    assert!(features.delete(&bond));
    assert!(!features.delete(&bond));
    assert_eq!(features.feature_count(true, &[]), 4);

    features.delete_all();
    assert!(!features.has_features());
    assert!(features.find_features(1, 1000, &[]).is_empty());

    // adding after a clear recreates stores transparently
    assert!(features.add(Feature::ranged("exon", 1, 10)));
    assert_eq!(features.feature_count(true, &[]), 1);
}

#[test]
fn snapshots_survive_later_mutation() {
    let mut features = sample_collection();
    let before = features.find_features(100, 500, &["exon"]);
    assert_eq!(before.len(), 2);

    features.delete_all();

    // the earlier result is a snapshot, unaffected by the clear
    assert_eq!(before.len(), 2);
    assert_eq!(before[0].feature_type().as_str(), "exon");
}

#[test]
fn abnormal_conditions_are_not_errors() {
    pretty_env_logger::formatted_builder()
        .is_test(true)
        .try_init()
        .ok();

    let mut features = sample_collection();

    // a feature without a type is reported and rejected, not a panic
    assert!(!features.add(Feature::ranged("", 10, 20)));

    // deleting an absent feature, querying an unknown type and querying an
    // empty range are all normal no-op outcomes
    assert!(!features.delete(&Feature::ranged("exon", 1, 2)));
    assert!(features.find_features(1, 1000, &["loop"]).is_empty());
    assert!(features.find_features(500, 100, &[]).is_empty());
    assert!(features
        .features_for_group(true, Some("nonesuch"), &[])
        .is_empty());
}

#[test]
fn display_formats() {
    assert_eq!(
        Feature::ranged("exon", 10, 20).to_string(),
        "exon 10-20"
    );
    assert_eq!(
        Feature::contact("disulfide bond", 5, 50).to_string(),
        "disulfide bond 5:50"
    );
    assert_eq!(Feature::non_positional("chain").to_string(), "chain");
}
