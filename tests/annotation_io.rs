use seqfeat::prelude::*;

const GFF: &str = "\
chr1\tPfam\tdomain\t100\t250\t27\t+\t.\tID=d1\n\
chr1\tPfam\tdomain\t300\t420\t14\t+\t.\tID=d2\n\
chr1\t.\thelix\t120\t140\t.\t-\t.\tID=h1\n";

#[test]
fn load_gff_input() {
    let features = FeatureCollection::from_gff(GFF.as_bytes()).unwrap();

    assert_eq!(features.feature_count(true, &[]), 3);
    assert_eq!(features.feature_count(true, &["domain"]), 2);

    // the source column becomes the feature group; "." means none
    let domains = features.features_for_group(
        true,
        Some("Pfam"),
        &["domain"],
    );
    assert_eq!(domains.len(), 2);
    let helices = features.features_for_group(true, None, &["helix"]);
    assert_eq!(helices.len(), 1);

    assert_eq!(features.min_score("domain", true), 14.0);
    assert_eq!(features.max_score("domain", true), 27.0);
    assert!(features.min_score("helix", true).is_nan());

    // strand lands in the attribute map
    assert_eq!(helices[0].attribute("strand"), Some("-"));

    let hits = features.find_features(130, 135, &[]);
    assert_eq!(hits.len(), 2);
}

#[test]
fn load_bed_input() {
    let bed = "chr1\t99\t250\tPF00069\t25.5\t+\n\
               chr1\t299\t420\tPF00069\t13.5\t-\n";
    let features =
        FeatureCollection::from_bed(bed.as_bytes(), "domain").unwrap();

    assert_eq!(features.feature_count(true, &["domain"]), 2);

    // 0-based half-open BED coordinates become 1-based inclusive
    let mut domains = features.positional_features(&["domain"]);
    sort_features(&mut domains, true);
    assert_eq!(domains[0].begin(), 100);
    assert_eq!(domains[0].end(), 250);
    assert_eq!(domains[0].description(), "PF00069");
    assert_eq!(domains[0].score(), 25.5);
    assert_eq!(domains[1].attribute("strand"), Some("-"));
}

#[test]
fn feature_serde_round_trip() {
    let feature = Feature::ranged("domain", 10, 40)
        .with_group(Some("Pfam"))
        .with_score(27.5)
        .with_description("kinase domain")
        .with_attribute("strand", "+");

    let json = serde_json::to_string(&feature).unwrap();
    let back: Feature = serde_json::from_str(&json).unwrap();
    assert_eq!(back, feature);

    // an unscored feature survives the trip with its NaN sentinel
    let unscored = Feature::contact("disulfide bond", 5, 50);
    let json = serde_json::to_string(&unscored).unwrap();
    let back: Feature = serde_json::from_str(&json).unwrap();
    assert_eq!(back, unscored);
    assert!(!back.has_score());
}
