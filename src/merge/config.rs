use crate::model::allele::NON_REF_LITERAL;

/// The merge operator's one behavioral knob, plus the configured literal
/// for the symbolic allele.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeConfig {
    /// When `false` (the default), a REF that is neither a prefix of nor
    /// has as its prefix the merged REF fails the site with
    /// `MergeError::InconsistentReference`. When `true`, the violation is
    /// logged at `warn!` and the merged REF is overwritten with the
    /// conflicting input's REF (the same recovery `merge_reference`
    /// already applies to placeholder REFs) instead of failing the site.
    pub permissive_ref_prefix: bool,
    /// The external, serialized literal for the symbolic "any unseen
    /// allele" token.
    pub symbolic_non_ref_literal: String,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            permissive_ref_prefix: false,
            symbolic_non_ref_literal: NON_REF_LITERAL.to_string(),
        }
    }
}
