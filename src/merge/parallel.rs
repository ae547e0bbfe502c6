use rayon::prelude::*;

use crate::merge::config::MergeConfig;
use crate::merge::error::MergeError;
use crate::merge::operator::MergeOperator;
use crate::model::variant::Variant;
use crate::query::QueryConfig;

/// Merges many independent sites across a `rayon` thread pool.
///
/// Grounded on the teacher's own `par_iter`/`rayon::prelude` usage
/// throughout `genotype::genotyping_engine` and
/// `model::allele_frequency_calculator`, which shard independent
/// per-site work the same way. `map_init` hands each worker thread its
/// own `MergeOperator` (and therefore its own scratch `AlleleMap`),
/// lazily constructed on first use and reused across every site that
/// worker processes, so concurrent invocations never share one
/// operator's scratch state without allocating a fresh operator per
/// site.
pub fn merge_variants_parallel(
    variants: &[Variant],
    query: &(dyn QueryConfig + Sync),
    config: MergeConfig,
) -> Vec<Result<Variant, MergeError>> {
    variants
        .par_iter()
        .map_init(
            || MergeOperator::new(config.clone()),
            |op, variant| op.operate(variant, query),
        )
        .collect()
}

/// Batch convenience over [`merge_variants_parallel`]: converts each
/// site's `MergeError` into `anyhow::Error` so a caller that only wants
/// to log-and-skip failing sites never needs to match on `MergeError`'s
/// variants. A site that fails has no local recovery; this is purely a
/// batch-caller ergonomics wrapper, not a retry.
pub fn merge_variants_batch(
    variants: &[Variant],
    query: &(dyn QueryConfig + Sync),
    config: MergeConfig,
) -> Vec<anyhow::Result<Variant>> {
    merge_variants_parallel(variants, query, config)
        .into_iter()
        .map(|r| r.map_err(anyhow::Error::from))
        .collect()
}
