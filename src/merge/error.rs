use std::fmt;

use crate::field::ElementType;

/// The merger's error kinds.
///
/// Hand-rolled `Display`/`Error` impls, matching the teacher's own
/// convention: `lorikeet-genome` has no derive-macro error dependency in
/// its stack and writes its error enums by hand. Every variant carries
/// the site's `column_begin` so a caller can report failures with
/// coordinates instead of a bare message.
#[derive(Debug, Clone, PartialEq)]
pub enum MergeError {
    /// A non-placeholder REF was neither a prefix of, nor had as its own
    /// prefix, the merged REF accumulated so far.
    InconsistentReference {
        column_begin: i64,
        merged_ref: String,
        conflicting_ref: String,
    },
    /// A sample's GT referenced an input allele index the `AlleleMap`
    /// has no mapping for.
    UnmappedGtAllele {
        column_begin: i64,
        sample: usize,
        input_allele_idx: i32,
    },
    /// `FieldRemapper` was asked to remap an element type it has no
    /// dispatch arm for.
    UnsupportedElementType {
        column_begin: i64,
        element_type: ElementType,
    },
    /// REF absent where required, checked at the start of `operate`.
    MissingRequiredField {
        column_begin: i64,
        field: &'static str,
    },
}

impl fmt::Display for MergeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeError::InconsistentReference {
                column_begin,
                merged_ref,
                conflicting_ref,
            } => write!(
                f,
                "inconsistent reference at {column_begin}: merged REF {merged_ref:?} is not a prefix match with {conflicting_ref:?}"
            ),
            MergeError::UnmappedGtAllele {
                column_begin,
                sample,
                input_allele_idx,
            } => write!(
                f,
                "unmapped GT allele at {column_begin}: sample {sample} referenced input allele {input_allele_idx} with no AlleleMap entry"
            ),
            MergeError::UnsupportedElementType {
                column_begin,
                element_type,
            } => write!(
                f,
                "unsupported element type at {column_begin}: {element_type}"
            ),
            MergeError::MissingRequiredField {
                column_begin,
                field,
            } => write!(f, "missing required field {field} at {column_begin}"),
        }
    }
}

impl std::error::Error for MergeError {}
