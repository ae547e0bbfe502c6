pub mod allele;
pub mod allele_map;
pub mod variant;
pub mod variant_call;

pub use allele::Allele;
pub use allele_map::AlleleMap;
pub use variant::Variant;
pub use variant_call::VariantCall;
