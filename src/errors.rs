//! Error types for schema compilation, bit reading and typed lookups.

use thiserror::Error;

/// Errors produced when compiling a [crate::field::Field] tree into a [crate::schema::Schema].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// Leaf width is zero, or an integer leaf does not fit an `i64`.
    #[error("field `{name}` has invalid width {bits}")]
    InvalidFieldSize { name: String, bits: usize },
    /// Leaf name is empty.
    #[error("field name is empty")]
    InvalidFieldName,
    /// Two leaves resolve to the same full name once repeat paths are applied.
    #[error("field name `{0}` is produced more than once")]
    DuplicateName(String),
    /// Repeat count is zero.
    #[error("repeat count must be at least 1")]
    InvalidRepeatCount,
    /// Bitmap declares no children.
    #[error("bitmap has no children")]
    EmptyBitmap,
    /// Bitmap presence word does not fit in a single read.
    #[error("bitmap has {children} children, at most 64 are supported")]
    BitmapTooWide { children: usize },
    /// Field tree description could not be deserialized.
    #[error("invalid field definition: {0}")]
    InvalidDefinition(String),
}

/// Errors produced when reading bits from a byte slice (e.g. during [crate::decoder::decode]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    /// Requested bit range is beyond the end of the data.
    #[error("read of {len} bits at bit {bit_pos} exceeds buffer of {available} bits")]
    OutOfBounds {
        bit_pos: usize,
        len: usize,
        available: usize,
    },
    /// More than 64 bits were requested in a single integer read.
    #[error("cannot read more than 64 bits at once, requested {asked}")]
    TooManyBitsRead { asked: usize },
}

/// Errors produced by the strict accessors of [crate::parsed::Parsed].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// No value was decoded under this name.
    #[error("field `{0}` is not present")]
    Missing(String),
    /// An unsigned value is too large for an `i64`.
    #[error("field `{name}` holds {value}, which does not fit an i64")]
    OutOfRange { name: String, value: u64 },
    /// A value exists but holds a different type.
    #[error("field `{name}` holds {found}, not {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
}
