//! Field element types and buffers.
//!
//! A queried per-sample field can hold any of a handful of element
//! types; rather than lean on dynamic typing, it's modeled as a closed,
//! explicit tag driving a `match`, the same shape as
//! `VariantContext::determine_type`'s `VariantType`.

use std::fmt;

/// The closed set of element types a queried field can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum ElementType {
    Int32,
    Int64,
    UInt32,
    UInt64,
    Float32,
    Float64,
    String,
    Char,
}

/// A missing-sentinel-bearing scalar. One impl per member of the closed
/// element-type set.
pub trait MissingSentinel: Copy + PartialEq + fmt::Debug {
    /// The caller-supplied value that represents "no data" for this type.
    fn missing() -> Self;

    fn is_missing(&self) -> bool {
        *self == Self::missing()
    }
}

impl MissingSentinel for i32 {
    fn missing() -> Self {
        i32::MIN
    }
}
impl MissingSentinel for i64 {
    fn missing() -> Self {
        i64::MIN
    }
}
impl MissingSentinel for u32 {
    fn missing() -> Self {
        u32::MAX
    }
}
impl MissingSentinel for u64 {
    fn missing() -> Self {
        u64::MAX
    }
}
impl MissingSentinel for f32 {
    fn missing() -> Self {
        f32::NAN
    }
    fn is_missing(&self) -> bool {
        self.is_nan()
    }
}
impl MissingSentinel for f64 {
    fn missing() -> Self {
        f64::NAN
    }
    fn is_missing(&self) -> bool {
        self.is_nan()
    }
}
impl MissingSentinel for char {
    fn missing() -> Self {
        '\0'
    }
}

/// A typed, resizable per-call field buffer plus its own validity flag:
/// a typed, optional, resizable buffer carrying its own `element_type`
/// tag.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldBuffer {
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    UInt32(Vec<u32>),
    UInt64(Vec<u64>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    Str(Vec<String>),
    Char(Vec<char>),
}

impl FieldBuffer {
    pub fn element_type(&self) -> ElementType {
        match self {
            FieldBuffer::Int32(_) => ElementType::Int32,
            FieldBuffer::Int64(_) => ElementType::Int64,
            FieldBuffer::UInt32(_) => ElementType::UInt32,
            FieldBuffer::UInt64(_) => ElementType::UInt64,
            FieldBuffer::Float32(_) => ElementType::Float32,
            FieldBuffer::Float64(_) => ElementType::Float64,
            FieldBuffer::Str(_) => ElementType::String,
            FieldBuffer::Char(_) => ElementType::Char,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            FieldBuffer::Int32(v) => v.len(),
            FieldBuffer::Int64(v) => v.len(),
            FieldBuffer::UInt32(v) => v.len(),
            FieldBuffer::UInt64(v) => v.len(),
            FieldBuffer::Float32(v) => v.len(),
            FieldBuffer::Float64(v) => v.len(),
            FieldBuffer::Str(v) => v.len(),
            FieldBuffer::Char(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resizes to `new_len`, filling new slots with the type's missing
    /// sentinel (used by `MergeOperator` to size the remapped copy's
    /// field before `FieldRemapper` writes into it).
    pub fn resize_with_missing(&mut self, new_len: usize) {
        match self {
            FieldBuffer::Int32(v) => v.resize(new_len, i32::missing()),
            FieldBuffer::Int64(v) => v.resize(new_len, i64::missing()),
            FieldBuffer::UInt32(v) => v.resize(new_len, u32::missing()),
            FieldBuffer::UInt64(v) => v.resize(new_len, u64::missing()),
            FieldBuffer::Float32(v) => v.resize(new_len, f32::missing()),
            FieldBuffer::Float64(v) => v.resize(new_len, f64::missing()),
            FieldBuffer::Str(v) => v.resize(new_len, String::new()),
            FieldBuffer::Char(v) => v.resize(new_len, char::missing()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub buffer: FieldBuffer,
    pub is_valid: bool,
}

impl Field {
    pub fn new(buffer: FieldBuffer) -> Self {
        Self {
            is_valid: !buffer.is_empty(),
            buffer,
        }
    }

    pub fn element_type(&self) -> ElementType {
        self.buffer.element_type()
    }
}
