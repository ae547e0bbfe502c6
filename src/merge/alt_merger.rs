use indexmap::IndexMap;
use log::{debug, trace};

use crate::merge::config::MergeConfig;
use crate::merge::error::MergeError;
use crate::model::allele::Allele;
use crate::model::allele_map::AlleleMap;
use crate::model::variant::Variant;

/// Folds per-sample ALT vectors into a deduplicated merged ALT list,
/// padding alleles whose sample had a shorter REF, and populating
/// `allele_map`.
///
/// `merged_alts` holds only the alternate alleles (REF is implicit,
/// always merged index 0); a merged allele's index is therefore its
/// 1-based position plus zero, i.e. position `p` (0-based) in
/// `merged_alts` is merged allele index `p + 1`.
pub fn merge_alts(
    variant: &Variant,
    ref_query_idx: usize,
    alt_query_idx: usize,
    merged_ref: &str,
    allele_map: &mut AlleleMap,
    config: &MergeConfig,
) -> Result<(Vec<Allele>, bool), MergeError> {
    let mut merged_alts: Vec<Allele> = Vec::new();
    // Keyed by the padded allele string; NON_REF is never inserted here,
    // it is pre-reserved conceptually at a sentinel position so it is
    // never placed mid-list. `IndexMap` keeps first-seen order so merged
    // ALT order matches the order alleles were actually discovered in.
    let mut seen_alleles: IndexMap<String, usize> = IndexMap::new();
    let mut non_ref_present = false;
    let mut non_ref_inputs: Vec<(usize, usize)> = Vec::new();

    for (sample, call) in variant.iter_valid() {
        allele_map.set(sample, 0, 0);

        let r = call.ref_string(ref_query_idx).ok_or(MergeError::MissingRequiredField {
            column_begin: variant.column_begin(),
            field: "REF",
        })?;
        let suffix = if r.len() <= merged_ref.len() {
            &merged_ref[r.len()..]
        } else {
            ""
        };

        let alts = call
            .alt_strings(alt_query_idx)
            .ok_or(MergeError::MissingRequiredField {
                column_begin: variant.column_begin(),
                field: "ALT",
            })?;

        for (k, alt) in alts.iter().enumerate() {
            let input_idx = k + 1;
            let allele = Allele::parse(alt, &config.symbolic_non_ref_literal);

            if allele.is_non_ref() {
                non_ref_present = true;
                non_ref_inputs.push((sample, input_idx));
                trace!("sample {sample} at {}: NON_REF at input index {input_idx}", variant.column_begin());
                continue;
            }

            let padded = allele.padded(suffix);
            let padded_str = padded.as_str().unwrap_or_default().to_string();

            if padded_str == merged_ref {
                return Err(MergeError::InconsistentReference {
                    column_begin: variant.column_begin(),
                    merged_ref: merged_ref.to_string(),
                    conflicting_ref: padded_str,
                });
            }

            if let Some(&merged_idx) = seen_alleles.get(&padded_str) {
                allele_map.set(sample, input_idx, merged_idx);
            } else {
                let merged_idx = merged_alts.len() + 1;
                debug!("discovered merged allele {padded_str} -> index {merged_idx} at {}", variant.column_begin());
                seen_alleles.insert(padded_str.clone(), merged_idx);
                merged_alts.push(padded);
                allele_map.set(sample, input_idx, merged_idx);
            }
        }
    }

    if non_ref_present {
        let non_ref_idx = merged_alts.len() + 1;
        merged_alts.push(Allele::NonRef);
        for (sample, input_idx) in non_ref_inputs {
            allele_map.set(sample, input_idx, non_ref_idx);
        }
    }

    Ok((merged_alts, non_ref_present))
}
