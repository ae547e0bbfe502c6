use log::warn;

use crate::field::FieldBuffer;
use crate::merge::config::MergeConfig;
use crate::merge::error::MergeError;
use crate::model::variant::Variant;
use crate::model::variant_call::VariantCall;

/// The single character a placeholder REF is normalized to, so downstream
/// merging code needs no further branches for the mid-deletion case.
pub const PLACEHOLDER_REF: &str = "N";

/// Marks a call's REF as a placeholder and rewrites it to
/// `PLACEHOLDER_REF` when the call's own start precedes the site's start
/// (an ongoing upstream deletion carries no sequence-meaningful REF at
/// this site).
pub fn normalize_placeholder_ref(call: &mut VariantCall, site_column_begin: i64, ref_query_idx: usize) {
    if call.column_begin() < site_column_begin {
        call.is_placeholder_ref = true;
        call.set_field(ref_query_idx, FieldBuffer::Str(vec![PLACEHOLDER_REF.to_string()]));
    }
}

/// Folds a collection of REF strings into a single longest REF, under
/// the invariant that every sample's REF must be a prefix of (or have as
/// its own prefix) the merged REF.
pub fn merge_reference(
    variant: &Variant,
    ref_query_idx: usize,
    config: &MergeConfig,
) -> Result<String, MergeError> {
    let mut merged = String::new();
    let mut merged_is_placeholder_only = true;

    for (call_idx, call) in variant.iter_valid() {
        let r = call.ref_string(ref_query_idx).ok_or(MergeError::MissingRequiredField {
            column_begin: variant.column_begin(),
            field: "REF",
        })?;

        if merged.is_empty() {
            merged = r.to_string();
            merged_is_placeholder_only = call.is_placeholder_ref;
            continue;
        }

        // A placeholder REF carries no prefix guarantee and never
        // contributes content.
        if call.is_placeholder_ref {
            continue;
        }

        if merged_is_placeholder_only {
            // Everything contributed so far was a placeholder; this is
            // the first real sequence, so it wins outright.
            merged = r.to_string();
            merged_is_placeholder_only = false;
            continue;
        }

        if r.len() > merged.len() {
            if !r.starts_with(&merged) {
                return handle_inconsistency(variant.column_begin(), &merged, r, call_idx, config);
            }
            merged = r.to_string();
        } else if !merged.starts_with(r) {
            return handle_inconsistency(variant.column_begin(), &merged, r, call_idx, config);
        }
    }

    Ok(merged)
}

fn handle_inconsistency(
    column_begin: i64,
    merged: &str,
    conflicting: &str,
    _call_idx: usize,
    config: &MergeConfig,
) -> Result<String, MergeError> {
    if config.permissive_ref_prefix {
        warn!(
            "inconsistent reference at {column_begin}: merged REF {merged:?} conflicts with {conflicting:?}; overwriting (permissive mode)"
        );
        Ok(conflicting.to_string())
    } else {
        Err(MergeError::InconsistentReference {
            column_begin,
            merged_ref: merged.to_string(),
            conflicting_ref: conflicting.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldBuffer;

    fn call_with_ref(column_begin: i64, r: &str) -> VariantCall {
        let mut call = VariantCall::new(column_begin);
        call.set_field(0, FieldBuffer::Str(vec![r.to_string()]));
        call
    }

    #[test]
    fn adopts_longer_ref_when_prefix_holds() {
        // Sample A REF=T, sample B REF=TG -> merged REF=TG.
        let variant = Variant::new(100, vec![call_with_ref(100, "T"), call_with_ref(100, "TG")]);
        let merged = merge_reference(&variant, 0, &MergeConfig::default()).unwrap();
        assert_eq!(merged, "TG");
    }

    #[test]
    fn fails_when_neither_is_a_prefix_of_the_other() {
        let variant = Variant::new(100, vec![call_with_ref(100, "TG"), call_with_ref(100, "TA")]);
        let err = merge_reference(&variant, 0, &MergeConfig::default()).unwrap_err();
        assert!(matches!(err, MergeError::InconsistentReference { .. }));
    }

    #[test]
    fn placeholder_ref_is_skipped_by_prefix_check() {
        // Call A's column_begin precedes the site, REF pre-normalized to N.
        let mut a = call_with_ref(95, "N");
        a.is_placeholder_ref = true;
        let b = call_with_ref(100, "TGA");
        let variant = Variant::new(100, vec![a, b]);
        let merged = merge_reference(&variant, 0, &MergeConfig::default()).unwrap();
        assert_eq!(merged, "TGA");
    }

    #[test]
    fn permissive_mode_overwrites_instead_of_failing() {
        let variant = Variant::new(100, vec![call_with_ref(100, "TG"), call_with_ref(100, "TA")]);
        let config = MergeConfig {
            permissive_ref_prefix: true,
            ..MergeConfig::default()
        };
        let merged = merge_reference(&variant, 0, &config).unwrap();
        assert_eq!(merged, "TA");
    }
}
