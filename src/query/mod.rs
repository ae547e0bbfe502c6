//! The query-configuration contract.
//!
//! The real discovery machinery that maps a query-field index to "this is
//! REF" or "this is allele-length-dependent" lives in the columnar
//! backend and is out of scope here; this module only fixes the boundary
//! trait a caller must implement, plus a small in-memory implementation
//! used by this crate's own tests, the same way the teacher keeps its
//! `model::variant_context::VariantContext::from_vcf_record` boundary
//! narrow and testable without a live htslib reader.

use std::collections::HashMap;

/// The closed set of fields the merger itself has special-cased handling
/// for. Any other queried field is `Other`, identified by its query index
/// alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownField {
    Ref,
    Alt,
    Gt,
    Pl,
    Other(usize),
}

/// How a queried field's per-call length depends on the allele count,
/// given a concrete type instead of three loose booleans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldMode {
    /// Length = number of alleles including REF (A_m).
    AlleleIndexed,
    /// Length = number of alt alleles only (A_m - 1).
    AltOnly,
    /// Length = G(A_m) = A_m*(A_m+1)/2, one slot per unordered allele pair.
    GenotypeIndexed,
    /// Not allele-length-dependent; the merger leaves it untouched.
    Fixed,
}

impl FieldMode {
    /// Number of elements for `num_alt` alt alleles (so `num_alt + 1`
    /// alleles total including REF). `ploidy` is accepted for symmetry
    /// with the boundary contract's `num_elements(num_alt_alleles,
    /// ploidy)` signature but unused by the three allele-length-dependent
    /// modes: genotype count for diploid data is entirely a function of
    /// allele count under the canonical `gt_idx` encoding.
    pub fn num_elements(&self, num_alt: usize, _ploidy: usize) -> usize {
        let num_alleles = num_alt + 1;
        match self {
            FieldMode::AlleleIndexed => num_alleles,
            FieldMode::AltOnly => num_alt,
            FieldMode::GenotypeIndexed => num_alleles * (num_alleles + 1) / 2,
            FieldMode::Fixed => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldInfo {
    pub mode: FieldMode,
}

impl FieldInfo {
    pub fn is_length_allele_dependent(&self) -> bool {
        matches!(self.mode, FieldMode::AlleleIndexed)
    }

    pub fn is_length_only_alt_dependent(&self) -> bool {
        matches!(self.mode, FieldMode::AltOnly)
    }

    pub fn is_length_genotype_dependent(&self) -> bool {
        matches!(self.mode, FieldMode::GenotypeIndexed)
    }

    pub fn num_elements(&self, num_alt: usize, ploidy: usize) -> usize {
        self.mode.num_elements(num_alt, ploidy)
    }
}

/// Read-only collaborator telling the merger which query index holds
/// REF/ALT/GT/PL/etc., and how each field's length scales with the
/// allele count.
pub trait QueryConfig {
    fn num_queried_attributes(&self) -> usize;
    fn is_known_field(&self, query_idx: usize) -> bool;
    fn known_field_enum(&self, query_idx: usize) -> Option<KnownField>;
    fn query_idx_for(&self, field: KnownField) -> Option<usize>;
    fn field_info(&self, query_idx: usize) -> Option<FieldInfo>;
    /// Every query index this configuration actually describes. Indices
    /// are not guaranteed contiguous from zero, so callers that need to
    /// visit every queried field (e.g. `MergeOperator::operate`) must use
    /// this rather than assume a `0..num_queried_attributes()` range.
    fn queried_indices(&self) -> Vec<usize>;
}

/// A minimal in-memory `QueryConfig`, sufficient to drive the merger in
/// tests and small standalone programs without a real columnar backend.
#[derive(Debug, Clone, Default)]
pub struct StaticQueryConfig {
    by_idx: HashMap<usize, (KnownField, Option<FieldInfo>)>,
}

impl StaticQueryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, query_idx: usize, field: KnownField, info: Option<FieldInfo>) -> Self {
        self.by_idx.insert(query_idx, (field, info));
        self
    }
}

impl QueryConfig for StaticQueryConfig {
    fn num_queried_attributes(&self) -> usize {
        self.by_idx.len()
    }

    fn is_known_field(&self, query_idx: usize) -> bool {
        self.by_idx.contains_key(&query_idx)
    }

    fn known_field_enum(&self, query_idx: usize) -> Option<KnownField> {
        self.by_idx.get(&query_idx).map(|(f, _)| *f)
    }

    fn query_idx_for(&self, field: KnownField) -> Option<usize> {
        self.by_idx
            .iter()
            .find(|(_, (f, _))| *f == field)
            .map(|(idx, _)| *idx)
    }

    fn field_info(&self, query_idx: usize) -> Option<FieldInfo> {
        self.by_idx.get(&query_idx).and_then(|(_, info)| *info)
    }

    fn queried_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self.by_idx.keys().copied().collect();
        indices.sort_unstable();
        indices
    }
}
