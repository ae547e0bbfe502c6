use crate::merge::error::MergeError;
use crate::model::allele_map::AlleleMap;

/// Rewrites one sample's integer GT vector from input allele-space to
/// merged allele-space.
///
/// Written for arbitrary ploidy: `input_gt` and `output_gt` must have
/// equal length, one entry per ploidy position.
/// Unlike `FieldRemapper`, a missing mapping here is a contract
/// violation, not something to paper over with the NON_REF fallback: a
/// sample's GT alleles must already have been among its declared ALT
/// alleles, so `AltMerger` is guaranteed to have populated every mapping
/// a valid GT can reference.
pub fn remap_gt(
    input_gt: &[i32],
    output_gt: &mut [i32],
    allele_map: &AlleleMap,
    sample: usize,
    column_begin: i64,
) -> Result<(), MergeError> {
    assert_eq!(
        input_gt.len(),
        output_gt.len(),
        "GT remap requires matching ploidy"
    );

    for (p, &input_allele) in input_gt.iter().enumerate() {
        if input_allele < 0 {
            // A missing/no-call GT component carries no allele to remap.
            output_gt[p] = input_allele;
            continue;
        }
        match allele_map.merged_of(sample, input_allele as usize) {
            Some(merged) => output_gt[p] = merged as i32,
            None => {
                return Err(MergeError::UnmappedGtAllele {
                    column_begin,
                    sample,
                    input_allele_idx: input_allele,
                })
            }
        }
    }

    Ok(())
}
