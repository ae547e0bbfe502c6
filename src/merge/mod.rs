//! The merge pipeline: `ReferenceMerger` -> `AltMerger` -> `FieldRemapper`/
//! `GenotypeRemapper`, orchestrated per-site by `MergeOperator` and
//! sharded across sites by `parallel::merge_variants_parallel`.

pub mod alt_merger;
pub mod config;
pub mod error;
pub mod field_remapper;
pub mod genotype_remapper;
pub mod operator;
pub mod parallel;
pub mod reference_merger;

pub use config::MergeConfig;
pub use error::MergeError;
pub use operator::MergeOperator;
pub use parallel::{merge_variants_batch, merge_variants_parallel};
