//! Multi-sample variant merger: folds per-sample REF/ALT/GT/PL records at
//! one genomic site into a single merged record over a shared allele
//! space, gVCF-combiner style.
//!
//! This crate is a library with no binary entry point; the query
//! configuration, the columnar storage backend, and the output
//! serializer are external collaborators the caller supplies. Logging
//! (via `log`) is likewise the caller's responsibility to initialize,
//! e.g. with `env_logger::init()`.

pub mod field;
pub mod genotype;
pub mod merge;
pub mod model;
pub mod query;

pub use field::{ElementType, Field, FieldBuffer};
pub use genotype::DummyGenotyper;
pub use merge::{MergeConfig, MergeError, MergeOperator};
pub use model::{Allele, AlleleMap, Variant, VariantCall};
