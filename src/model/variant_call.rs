use std::collections::HashMap;

use crate::field::{Field, FieldBuffer};

/// One sample's call at one site.
///
/// Field storage is keyed by query-field index rather than by name: the
/// mapping from "REF" to a concrete index is the query-configuration
/// collaborator's job, not this type's.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantCall {
    pub column_begin: i64,
    pub is_valid: bool,
    /// Set by `normalize_placeholder_ref` when this call's REF carries no
    /// useful sequence because the call is the continuation of an
    /// upstream deletion. Carried alongside REF as a per-call boolean
    /// rather than inferred from REF's contents.
    pub is_placeholder_ref: bool,
    fields: HashMap<usize, Field>,
}

impl VariantCall {
    pub fn new(column_begin: i64) -> Self {
        Self {
            column_begin,
            is_valid: true,
            is_placeholder_ref: false,
            fields: HashMap::new(),
        }
    }

    pub fn invalid(column_begin: i64) -> Self {
        Self {
            column_begin,
            is_valid: false,
            is_placeholder_ref: false,
            fields: HashMap::new(),
        }
    }

    pub fn column_begin(&self) -> i64 {
        self.column_begin
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn set_field(&mut self, query_idx: usize, buffer: FieldBuffer) {
        self.fields.insert(query_idx, Field::new(buffer));
    }

    pub fn field(&self, query_idx: usize) -> Option<&Field> {
        self.fields.get(&query_idx)
    }

    pub fn field_mut(&mut self, query_idx: usize) -> Option<&mut Field> {
        self.fields.get_mut(&query_idx)
    }

    pub fn has_field(&self, query_idx: usize) -> bool {
        self.fields
            .get(&query_idx)
            .map(|f| f.is_valid)
            .unwrap_or(false)
    }

    /// Convenience accessor for the REF field, used throughout the merge
    /// operator. Panics only if the caller asks for a REF that was never
    /// set; the `MissingRequiredField` check in `MergeOperator::operate`
    /// is the place that turns an absent REF into a reported error.
    pub fn ref_string(&self, ref_query_idx: usize) -> Option<&str> {
        match self.field(ref_query_idx) {
            Some(Field {
                buffer: FieldBuffer::Str(v),
                is_valid: true,
            }) if v.len() == 1 => Some(v[0].as_str()),
            _ => None,
        }
    }

    pub fn alt_strings(&self, alt_query_idx: usize) -> Option<&[String]> {
        match self.field(alt_query_idx) {
            Some(Field {
                buffer: FieldBuffer::Str(v),
                is_valid: true,
            }) => Some(v.as_slice()),
            _ => None,
        }
    }
}
