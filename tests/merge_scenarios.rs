//! End-to-end merge scenarios, driven through the public
//! `MergeOperator`/`DummyGenotyper` API the way a real caller would,
//! rather than through the unit-level internals each module already
//! exercises on its own.

use variant_merge_core::field::FieldBuffer;
use variant_merge_core::genotype::DummyGenotyper;
use variant_merge_core::merge::{MergeConfig, MergeError, MergeOperator};
use variant_merge_core::model::{Variant, VariantCall};
use variant_merge_core::query::{FieldInfo, FieldMode, KnownField, StaticQueryConfig};

fn ref_alt_query() -> StaticQueryConfig {
    StaticQueryConfig::new()
        .with_field(0, KnownField::Ref, None)
        .with_field(1, KnownField::Alt, None)
}

fn call(column_begin: i64, r: &str, alts: &[&str]) -> VariantCall {
    let mut c = VariantCall::new(column_begin);
    c.set_field(0, FieldBuffer::Str(vec![r.to_string()]));
    c.set_field(1, FieldBuffer::Str(alts.iter().map(|s| s.to_string()).collect()));
    c
}

#[test]
fn two_samples_shorter_ref_pads_alt() {
    let variant = Variant::new(100, vec![call(100, "T", &["G"]), call(100, "TG", &["T"])]);
    let mut op = MergeOperator::new(MergeConfig::default());
    let merged = op.operate(&variant, &ref_alt_query()).unwrap();

    assert_eq!(merged.call(0).ref_string(0), Some("TG"));
    let expected_alts = ["GG".to_string(), "T".to_string()];
    assert_eq!(merged.call(0).alt_strings(1), Some(expected_alts.as_slice()));
    assert_eq!(merged.call(1).alt_strings(1), Some(expected_alts.as_slice()));
}

#[test]
fn non_ref_lands_last_with_fallback_mappings() {
    let variant = Variant::new(
        100,
        vec![
            call(100, "T", &["G", "<NON_REF>"]),
            call(100, "T", &["C", "<NON_REF>"]),
        ],
    );
    let mut op = MergeOperator::new(MergeConfig::default());
    let merged = op.operate(&variant, &ref_alt_query()).unwrap();

    assert_eq!(merged.call(0).ref_string(0), Some("T"));
    let expected_alts = ["G".to_string(), "C".to_string(), "<NON_REF>".to_string()];
    assert_eq!(merged.call(0).alt_strings(1), Some(expected_alts.as_slice()));
}

#[test]
fn genotype_indexed_pl_grows_from_g3_to_g4() {
    let query = StaticQueryConfig::new()
        .with_field(0, KnownField::Ref, None)
        .with_field(1, KnownField::Alt, None)
        .with_field(
            2,
            KnownField::Pl,
            Some(FieldInfo {
                mode: FieldMode::GenotypeIndexed,
            }),
        );

    let mut a = call(100, "T", &["G", "<NON_REF>"]);
    a.set_field(2, FieldBuffer::Int32(vec![0, 10, 20, 30, 40, 50])); // G(3)=6
    let mut b = call(100, "T", &["C", "<NON_REF>"]);
    b.set_field(2, FieldBuffer::Int32(vec![0, 11, 21, 31, 41, 51]));

    let variant = Variant::new(100, vec![a, b]);
    let mut op = MergeOperator::new(MergeConfig::default());
    let merged = op.operate(&variant, &query).unwrap();

    let FieldBuffer::Int32(pl_a) = &merged.call(0).field(2).unwrap().buffer else {
        panic!("expected Int32 PL");
    };
    assert_eq!(pl_a.len(), 10); // G(4) for A_m=4.
}

#[test]
fn alt_padding_onto_merged_ref_is_inconsistent_reference() {
    let variant = Variant::new(100, vec![call(100, "TG", &["G"]), call(100, "T", &["T"])]);
    let mut op = MergeOperator::new(MergeConfig::default());
    let err = op.operate(&variant, &ref_alt_query()).unwrap_err();
    assert!(matches!(err, MergeError::InconsistentReference { .. }));
}

#[test]
fn placeholder_ref_is_excluded_from_the_prefix_check() {
    let mut a = call(95, "N", &["<NON_REF>"]);
    a.is_placeholder_ref = true;
    let b = call(100, "TGA", &["T"]);
    let variant = Variant::new(100, vec![a, b]);

    let mut op = MergeOperator::new(MergeConfig::default());
    let merged = op.operate(&variant, &ref_alt_query()).unwrap();
    assert_eq!(merged.call(1).ref_string(0), Some("TGA"));
}

#[test]
fn dummy_genotyper_median_matches_lower_median_convention() {
    let mut samples = vec![];
    for pl in [10, 20, 30] {
        let mut c = call(100, "T", &["G"]);
        c.set_field(2, FieldBuffer::Int32(vec![pl]));
        samples.push(c);
    }
    let variant = Variant::new(100, samples);
    let line = DummyGenotyper::genotype_line(&variant, 0, 1, 2, 1).unwrap();
    assert_eq!(line, "100,T,G,20");

    let mut samples = vec![];
    for pl in [10, 20, 30, 40] {
        let mut c = call(100, "T", &["G"]);
        c.set_field(2, FieldBuffer::Int32(vec![pl]));
        samples.push(c);
    }
    let variant = Variant::new(100, samples);
    let line = DummyGenotyper::genotype_line(&variant, 0, 1, 2, 1).unwrap();
    assert_eq!(line, "100,T,G,20");
}
