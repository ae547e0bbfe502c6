//! A reference consumer of merged variants.
//!
//! Exists to anchor the merger's contract with a worked example, not as a
//! production genotyper: per genotype slot, it reports the median of the
//! remapped PL values across samples. Grounded on the teacher's own
//! `genotype::genotyping_engine::GenotypingEngine`, which likewise
//! consumes a merged `VariantContext`'s per-sample genotype likelihoods
//! rather than recomputing allele bookkeeping itself.

use ndarray::Array2;

use crate::field::{FieldBuffer, MissingSentinel};
use crate::model::variant::Variant;

/// Gathers one merged site's already-remapped PL values into a dense
/// `(genotype, sample)` matrix, filling any call missing the field (or
/// shorter than `num_genotypes`) with the INT32 missing sentinel.
pub fn build_pl_matrix(variant: &Variant, pl_query_idx: usize, num_genotypes: usize) -> Array2<i32> {
    let num_samples = variant.num_calls();
    let mut matrix = Array2::from_elem((num_genotypes, num_samples), i32::missing());

    for (sample, call) in variant.iter_valid() {
        let Some(field) = call.field(pl_query_idx) else {
            continue;
        };
        if !field.is_valid {
            continue;
        }
        if let FieldBuffer::Int32(values) = &field.buffer {
            for (g, &v) in values.iter().enumerate().take(num_genotypes) {
                matrix[[g, sample]] = v;
            }
        }
    }

    matrix
}

/// Per-genotype median under the descending-rank convention: sort
/// descending, pick the element at rank `⌊num_valid/2⌋` (the lower of
/// the two middle values on an even count). Missing sentinels are
/// excluded from the input set and never themselves selected except when
/// every sample is missing.
pub fn median_per_genotype(matrix: &Array2<i32>) -> Vec<i32> {
    (0..matrix.nrows())
        .map(|g| {
            let mut values: Vec<i32> = matrix
                .row(g)
                .iter()
                .copied()
                .filter(|v| !v.is_missing())
                .collect();
            if values.is_empty() {
                return i32::missing();
            }
            values.sort_unstable_by(|a, b| b.cmp(a));
            values[values.len() / 2]
        })
        .collect()
}

/// Renders one output line: `column_begin,REF,ALT1,...,ALTk,m0,m1,...`.
/// `None` if the site has no valid calls to read REF/ALT from.
pub fn render_line(
    variant: &Variant,
    ref_query_idx: usize,
    alt_query_idx: usize,
    medians: &[i32],
) -> Option<String> {
    let (_, first_call) = variant.iter_valid().next()?;
    let r = first_call.ref_string(ref_query_idx)?;
    let alts = first_call.alt_strings(alt_query_idx).unwrap_or(&[]);

    let mut fields = Vec::with_capacity(2 + alts.len() + medians.len());
    fields.push(variant.column_begin().to_string());
    fields.push(r.to_string());
    fields.extend(alts.iter().cloned());
    fields.extend(medians.iter().map(|m| m.to_string()));
    Some(fields.join(","))
}

/// Stateless facade tying together the matrix build, median, and line
/// render for one merged site.
pub struct DummyGenotyper;

impl DummyGenotyper {
    pub fn genotype_line(
        variant: &Variant,
        ref_query_idx: usize,
        alt_query_idx: usize,
        pl_query_idx: usize,
        num_genotypes: usize,
    ) -> Option<String> {
        let matrix = build_pl_matrix(variant, pl_query_idx, num_genotypes);
        let medians = median_per_genotype(&matrix);
        render_line(variant, ref_query_idx, alt_query_idx, &medians)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_of_three_is_the_middle_value() {
        let matrix = Array2::from_shape_vec((1, 3), vec![10, 20, 30]).unwrap();
        assert_eq!(median_per_genotype(&matrix), vec![20]);
    }

    #[test]
    fn median_of_four_is_the_lower_of_the_two_middle_values() {
        let matrix = Array2::from_shape_vec((1, 4), vec![10, 20, 30, 40]).unwrap();
        assert_eq!(median_per_genotype(&matrix), vec![20]);
    }

    #[test]
    fn all_missing_genotype_slot_reports_the_sentinel() {
        let matrix = Array2::from_elem((1, 3), i32::missing());
        assert_eq!(median_per_genotype(&matrix), vec![i32::missing()]);
    }

    #[test]
    fn genotype_line_matches_expected_csv_shape() {
        use crate::field::FieldBuffer;
        use crate::model::variant::Variant;
        use crate::model::variant_call::VariantCall;

        let mut call = VariantCall::new(100);
        call.set_field(0, FieldBuffer::Str(vec!["T".to_string()]));
        call.set_field(1, FieldBuffer::Str(vec!["G".to_string()]));
        call.set_field(2, FieldBuffer::Int32(vec![0, 10, 20]));
        let variant = Variant::new(100, vec![call]);

        let line = DummyGenotyper::genotype_line(&variant, 0, 1, 2, 3).unwrap();
        assert_eq!(line, "100,T,G,0,10,20");
    }
}
