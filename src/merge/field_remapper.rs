use log::debug;

use crate::field::{ElementType, FieldBuffer};
use crate::merge::error::MergeError;
use crate::model::allele_map::AlleleMap;
use crate::query::FieldMode;

/// Canonical unordered-pair genotype index: `gt_idx(j,k) = k*(k+1)/2 + j`
/// for `j <= k`. Accepts `j`/`k` in either order, matching the teacher's
/// own `GenotypeLikelihoodCalculator` allele-heap encoding, which
/// likewise treats a genotype as an unordered multiset of allele indices
/// (`allele_heap_to_index`).
pub fn gt_idx(j: usize, k: usize) -> usize {
    let (j, k) = if j <= k { (j, k) } else { (k, j) };
    k * (k + 1) / 2 + j
}

/// A polymorphic write capability for a remapped output slot. The
/// remapper never owns the output buffer; it writes through this
/// capability so the same remapping code serves both a per-call
/// rewrite-in-place buffer and a dense aggregation matrix.
pub trait OutputSink<T> {
    fn put(&mut self, sample: usize, out_slot: usize, value: T);
}

/// Rewrite-in-place sink: a direct view into one sample's own output
/// buffer (the copy-of-`Variant` use case).
pub struct InPlaceSink<'a, T> {
    pub buffer: &'a mut Vec<T>,
}

impl<'a, T> OutputSink<T> for InPlaceSink<'a, T> {
    fn put(&mut self, _sample: usize, out_slot: usize, value: T) {
        self.buffer[out_slot] = value;
    }
}

/// Aggregation sink: a dense matrix keyed `(out_slot, sample)`, used by
/// consumers (e.g. `DummyGenotyper`) that want every sample's remapped
/// value for a genotype slot gathered together rather than scattered
/// across per-call buffers.
pub struct MatrixSink<'a, T> {
    pub data: &'a mut ndarray::Array2<T>,
}

impl<'a, T> OutputSink<T> for MatrixSink<'a, T> {
    fn put(&mut self, sample: usize, out_slot: usize, value: T) {
        self.data[[out_slot, sample]] = value;
    }
}

/// Resolves the input allele index corresponding to merged allele `j` for
/// `sample`, substituting the sample's own NON_REF input index if `j` was
/// never observed in that sample.
fn resolve_input_idx(
    allele_map: &AlleleMap,
    sample: usize,
    merged_allele_idx: usize,
    non_ref_input_idx: Option<usize>,
) -> Option<usize> {
    allele_map
        .input_of(sample, merged_allele_idx)
        .or(non_ref_input_idx)
}

/// Remaps one sample's allele-indexed vector (length `A_m`) into `sink`,
/// incrementing `valid_counts[j]` for every non-missing slot written.
pub fn remap_allele_indexed<T: Clone>(
    input_data: &[T],
    sample: usize,
    allele_map: &AlleleMap,
    non_ref_input_idx: Option<usize>,
    num_alleles_merged: usize,
    sink: &mut dyn OutputSink<T>,
    valid_counts: &mut [usize],
) {
    for j in 0..num_alleles_merged {
        if let Some(i) = resolve_input_idx(allele_map, sample, j, non_ref_input_idx) {
            if let Some(v) = input_data.get(i) {
                sink.put(sample, j, v.clone());
                valid_counts[j] += 1;
            }
        }
    }
}

/// Remaps one sample's alt-only vector (length `A_m - 1`). Merged output
/// position `j` corresponds to merged allele index `j + 1`; the resolved
/// input allele index is decremented by one before indexing `input_data`,
/// which itself excludes REF.
pub fn remap_alt_only<T: Clone>(
    input_data: &[T],
    sample: usize,
    allele_map: &AlleleMap,
    non_ref_input_idx: Option<usize>,
    num_alt_merged: usize,
    sink: &mut dyn OutputSink<T>,
    valid_counts: &mut [usize],
) {
    for j in 0..num_alt_merged {
        let merged_allele_idx = j + 1;
        if let Some(i) = resolve_input_idx(allele_map, sample, merged_allele_idx, non_ref_input_idx) {
            if i == 0 {
                continue; // REF never appears in an alt-only input array.
            }
            if let Some(v) = input_data.get(i - 1) {
                sink.put(sample, j, v.clone());
                valid_counts[j] += 1;
            }
        }
    }
}

/// Remaps one sample's genotype-indexed vector (length `G(A_m)`). Both
/// components of each unordered pair `(j, k)` are resolved independently;
/// if either has no mapping and no NON_REF fallback, the whole output
/// genotype slot stays at the caller's pre-filled missing sentinel.
pub fn remap_genotype_indexed<T: Clone>(
    input_data: &[T],
    sample: usize,
    allele_map: &AlleleMap,
    non_ref_input_idx: Option<usize>,
    num_alleles_merged: usize,
    sink: &mut dyn OutputSink<T>,
    valid_counts: &mut [usize],
) {
    for k in 0..num_alleles_merged {
        for j in 0..=k {
            let out_idx = gt_idx(j, k);
            let ij = resolve_input_idx(allele_map, sample, j, non_ref_input_idx);
            let ik = resolve_input_idx(allele_map, sample, k, non_ref_input_idx);
            if let (Some(ij), Some(ik)) = (ij, ik) {
                let in_idx = gt_idx(ij, ik);
                if let Some(v) = input_data.get(in_idx) {
                    sink.put(sample, out_idx, v.clone());
                    valid_counts[out_idx] += 1;
                }
            }
        }
    }
}

/// Single dispatch site for the closed element-type set: the remapper is
/// generic over the element type with one `match` deciding which typed
/// buffer pair to remap through. Dispatches on the input buffer's tag and
/// forwards to the mode-appropriate generic remap function.
#[allow(clippy::too_many_arguments)]
pub fn remap_field(
    input: &FieldBuffer,
    output: &mut FieldBuffer,
    mode: FieldMode,
    sample: usize,
    allele_map: &AlleleMap,
    non_ref_input_idx: Option<usize>,
    num_alt_merged: usize,
    valid_counts: &mut [usize],
    column_begin: i64,
) -> Result<(), MergeError> {
    let num_alleles_merged = num_alt_merged + 1;

    macro_rules! dispatch {
        ($variant:ident) => {
            if let (FieldBuffer::$variant(input_data), FieldBuffer::$variant(out_data)) = (input, output) {
                let mut sink = InPlaceSink { buffer: out_data };
                match mode {
                    FieldMode::AlleleIndexed => remap_allele_indexed(
                        input_data, sample, allele_map, non_ref_input_idx, num_alleles_merged,
                        &mut sink, valid_counts,
                    ),
                    FieldMode::AltOnly => remap_alt_only(
                        input_data, sample, allele_map, non_ref_input_idx, num_alt_merged,
                        &mut sink, valid_counts,
                    ),
                    FieldMode::GenotypeIndexed => remap_genotype_indexed(
                        input_data, sample, allele_map, non_ref_input_idx, num_alleles_merged,
                        &mut sink, valid_counts,
                    ),
                    FieldMode::Fixed => {}
                }
                return Ok(());
            }
        };
    }

    dispatch!(Int32);
    dispatch!(Int64);
    dispatch!(UInt32);
    dispatch!(UInt64);
    dispatch!(Float32);
    dispatch!(Float64);
    dispatch!(Str);
    dispatch!(Char);

    debug!(
        "unsupported element type combination at {column_begin}: {:?} -> {:?}",
        input.element_type(),
        output.element_type()
    );
    Err(MergeError::UnsupportedElementType {
        column_begin,
        element_type: input.element_type(),
    })
}

pub fn missing_for(element_type: ElementType) -> FieldBuffer {
    match element_type {
        ElementType::Int32 => FieldBuffer::Int32(Vec::new()),
        ElementType::Int64 => FieldBuffer::Int64(Vec::new()),
        ElementType::UInt32 => FieldBuffer::UInt32(Vec::new()),
        ElementType::UInt64 => FieldBuffer::UInt64(Vec::new()),
        ElementType::Float32 => FieldBuffer::Float32(Vec::new()),
        ElementType::Float64 => FieldBuffer::Float64(Vec::new()),
        ElementType::String => FieldBuffer::Str(Vec::new()),
        ElementType::Char => FieldBuffer::Char(Vec::new()),
    }
}
