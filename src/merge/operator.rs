use log::debug;

use crate::field::FieldBuffer;
use crate::merge::alt_merger;
use crate::merge::config::MergeConfig;
use crate::merge::error::MergeError;
use crate::merge::field_remapper::{self, missing_for};
use crate::merge::genotype_remapper;
use crate::merge::reference_merger;
use crate::model::allele::Allele;
use crate::model::allele_map::AlleleMap;
use crate::model::variant::Variant;
use crate::query::{FieldMode, KnownField, QueryConfig};

/// Orchestrates `ReferenceMerger` -> `AltMerger` -> `FieldRemapper`/
/// `GenotypeRemapper` over one multi-sample `Variant`.
///
/// Owns the scratch `AlleleMap`; two concurrent invocations must never
/// share one instance -- give each worker thread its own (see
/// `merge::parallel::merge_variants_parallel`).
pub struct MergeOperator {
    allele_map: AlleleMap,
    config: MergeConfig,
}

impl MergeOperator {
    pub fn new(config: MergeConfig) -> Self {
        Self {
            allele_map: AlleleMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Produces a merged copy of `variant`. The input is observed
    /// read-only; scratch state is reset on entry so a single
    /// `MergeOperator` can be reused across many sites. The caller owns
    /// the returned `Variant`; nothing about it aliases the input.
    pub fn operate(
        &mut self,
        variant: &Variant,
        query: &dyn QueryConfig,
    ) -> Result<Variant, MergeError> {
        debug!("resetting scratch for site {}", variant.column_begin());
        self.allele_map.reset();

        let ref_idx = query
            .query_idx_for(KnownField::Ref)
            .ok_or(MergeError::MissingRequiredField {
                column_begin: variant.column_begin(),
                field: "REF",
            })?;
        let alt_idx = query.query_idx_for(KnownField::Alt);
        let gt_idx_query = query.query_idx_for(KnownField::Gt);

        // A copy of the input holds the remapped fields; the operator
        // never mutates `variant` itself.
        let mut working = variant.clone();

        // Placeholder-REF normalization, per call.
        for (_, call) in working.iter_valid_mut() {
            reference_merger::normalize_placeholder_ref(call, variant.column_begin(), ref_idx);
        }

        let merged_ref = reference_merger::merge_reference(&working, ref_idx, &self.config)?;

        self.allele_map.ensure_capacity(working.num_calls(), 1);

        let (merged_alts, non_ref_present) = if let Some(alt_idx) = alt_idx {
            alt_merger::merge_alts(
                &working,
                ref_idx,
                alt_idx,
                &merged_ref,
                &mut self.allele_map,
                &self.config,
            )?
        } else {
            (Vec::new(), false)
        };
        let num_alt_merged = merged_alts.len();
        let non_ref_merged_idx = non_ref_present.then_some(num_alt_merged);

        // Every other allele-length-dependent queried field.
        for q in query.queried_indices() {
            if q == ref_idx || Some(q) == alt_idx || Some(q) == gt_idx_query {
                continue;
            }
            let Some(info) = query.field_info(q) else {
                continue;
            };
            if matches!(info.mode, FieldMode::Fixed) {
                continue;
            }

            let call_indices: Vec<usize> = working.iter_valid().map(|(i, _)| i).collect();
            let out_len = info.num_elements(num_alt_merged, 0);
            let mut valid_counts = vec![0usize; out_len];

            for call_idx in call_indices {
                let Some(original) = variant.call(call_idx).field(q).cloned() else {
                    continue;
                };
                if !original.is_valid {
                    continue;
                }

                let non_ref_input_idx =
                    non_ref_merged_idx.and_then(|idx| self.allele_map.input_of(call_idx, idx));

                let mut output_buffer = missing_for(original.element_type());
                output_buffer.resize_with_missing(out_len);

                field_remapper::remap_field(
                    &original.buffer,
                    &mut output_buffer,
                    info.mode,
                    call_idx,
                    &self.allele_map,
                    non_ref_input_idx,
                    num_alt_merged,
                    &mut valid_counts,
                    variant.column_begin(),
                )?;

                working
                    .call_mut(call_idx)
                    .set_field(q, output_buffer);
            }
        }

        // GT.
        if let Some(gt_idx_query) = gt_idx_query {
            let call_indices: Vec<usize> = working.iter_valid().map(|(i, _)| i).collect();
            for call_idx in call_indices {
                let Some(original_gt) = variant.call(call_idx).field(gt_idx_query).cloned() else {
                    continue;
                };
                if !original_gt.is_valid {
                    continue;
                }
                let FieldBuffer::Int32(input_gt) = &original_gt.buffer else {
                    return Err(MergeError::UnsupportedElementType {
                        column_begin: variant.column_begin(),
                        element_type: original_gt.element_type(),
                    });
                };
                let mut output_gt = vec![-1i32; input_gt.len()];
                genotype_remapper::remap_gt(
                    input_gt,
                    &mut output_gt,
                    &self.allele_map,
                    call_idx,
                    variant.column_begin(),
                )?;
                working
                    .call_mut(call_idx)
                    .set_field(gt_idx_query, FieldBuffer::Int32(output_gt));
            }
        }

        // Overwrite the copy's common REF/ALT with the merged values.
        let non_ref_literal = self.config.symbolic_non_ref_literal.clone();
        for (_, call) in working.iter_valid_mut() {
            call.set_field(ref_idx, FieldBuffer::Str(vec![merged_ref.clone()]));
        }
        if let Some(alt_idx) = alt_idx {
            let alt_strings: Vec<String> = merged_alts
                .iter()
                .map(|a: &Allele| a.render(&non_ref_literal))
                .collect();
            for (_, call) in working.iter_valid_mut() {
                call.set_field(alt_idx, FieldBuffer::Str(alt_strings.clone()));
            }
        }

        Ok(working)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::variant_call::VariantCall;
    use crate::query::{FieldInfo, StaticQueryConfig};

    fn query_ref_alt() -> StaticQueryConfig {
        StaticQueryConfig::new()
            .with_field(0, KnownField::Ref, None)
            .with_field(1, KnownField::Alt, None)
    }

    #[test]
    fn end_to_end_ref_alt_only() {
        let mut a = VariantCall::new(100);
        a.set_field(0, FieldBuffer::Str(vec!["T".to_string()]));
        a.set_field(1, FieldBuffer::Str(vec!["G".to_string()]));
        let mut b = VariantCall::new(100);
        b.set_field(0, FieldBuffer::Str(vec!["TG".to_string()]));
        b.set_field(1, FieldBuffer::Str(vec!["T".to_string()]));
        let variant = Variant::new(100, vec![a, b]);

        let mut op = MergeOperator::new(MergeConfig::default());
        let merged = op.operate(&variant, &query_ref_alt()).unwrap();

        assert_eq!(merged.call(0).ref_string(0), Some("TG"));
        assert_eq!(merged.call(0).alt_strings(1), Some(["GG".to_string(), "T".to_string()].as_slice()));
        assert_eq!(merged.call(1).alt_strings(1), Some(["GG".to_string(), "T".to_string()].as_slice()));
    }

    #[test]
    fn gt_and_genotype_indexed_field_are_remapped_together() {
        // Two samples, each REF=T with one private ALT plus NON_REF,
        // sharing a PL field indexed over unordered allele pairs.
        let query = StaticQueryConfig::new()
            .with_field(0, KnownField::Ref, None)
            .with_field(1, KnownField::Alt, None)
            .with_field(2, KnownField::Gt, None)
            .with_field(
                3,
                KnownField::Pl,
                Some(FieldInfo {
                    mode: FieldMode::GenotypeIndexed,
                }),
            );

        let mut a = VariantCall::new(100);
        a.set_field(0, FieldBuffer::Str(vec!["T".to_string()]));
        a.set_field(1, FieldBuffer::Str(vec!["G".to_string(), "<NON_REF>".to_string()]));
        a.set_field(2, FieldBuffer::Int32(vec![0, 1]));
        a.set_field(3, FieldBuffer::Int32(vec![0, 10, 20, 30, 40, 50])); // G(3)=6

        let mut b = VariantCall::new(100);
        b.set_field(0, FieldBuffer::Str(vec!["T".to_string()]));
        b.set_field(1, FieldBuffer::Str(vec!["C".to_string(), "<NON_REF>".to_string()]));
        b.set_field(2, FieldBuffer::Int32(vec![0, 1]));
        b.set_field(3, FieldBuffer::Int32(vec![0, 11, 21, 31, 41, 51]));

        let variant = Variant::new(100, vec![a, b]);
        let mut op = MergeOperator::new(MergeConfig::default());
        let merged = op.operate(&variant, &query).unwrap();

        assert_eq!(merged.call(0).ref_string(0), Some("T"));
        assert_eq!(
            merged.call(0).alt_strings(1),
            Some(["G".to_string(), "C".to_string(), "<NON_REF>".to_string()].as_slice())
        );

        let FieldBuffer::Int32(gt_a) = &merged.call(0).field(2).unwrap().buffer else {
            panic!("expected Int32 GT");
        };
        assert_eq!(gt_a, &vec![0, 1]); // A's G is still merged allele 1.

        let FieldBuffer::Int32(gt_b) = &merged.call(1).field(2).unwrap().buffer else {
            panic!("expected Int32 GT");
        };
        assert_eq!(gt_b, &vec![0, 2]); // B's C is merged allele 2.

        let FieldBuffer::Int32(pl_a) = &merged.call(0).field(3).unwrap().buffer else {
            panic!("expected Int32 PL");
        };
        assert_eq!(pl_a.len(), 10); // G(4) for A_m=4.
        // Slot for (REF,REF) is untouched by remapping ambiguity.
        assert_eq!(pl_a[field_remapper::gt_idx(0, 0)], 0);
        // A's own (REF,G) PL survives at its remapped slot (merged idx 0,1).
        assert_eq!(pl_a[field_remapper::gt_idx(0, 1)], 10);
    }
}
