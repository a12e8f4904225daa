//! Schema: a validated field tree plus the options it is decoded with.

use std::collections::BTreeSet;

use tracing::debug;

use crate::{
    bits::BitOrder,
    decoder::{self, DecodeOptions},
    errors::{CompileError, ReadError},
    field::Field,
    parsed::{Parsed, full_name},
};

/// A compiled field tree. Use [Schema::compile] to validate a [Field], then
/// [Schema::decode] to decode bytes. A schema is immutable and can be shared
/// across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    root: Field,
    options: DecodeOptions,
    full_width_bits: usize,
}

impl Schema {
    /// Validates `root`. Fails on zero or oversized widths (unsigned integers
    /// up to 63 bits, signed up to 64; wider data belongs in hex leaves), empty names,
    /// zero repeat counts, empty or oversized bitmaps and leaves whose full
    /// names collide.
    pub fn compile(root: Field) -> Result<Self, CompileError> {
        let mut names = BTreeSet::new();
        let mut path = Vec::new();
        validate(&root, &mut path, &mut names)?;

        let full_width_bits = root.full_width_bits();
        debug!(leaves = names.len(), full_width_bits, "compiled field tree");

        Ok(Self {
            root,
            options: DecodeOptions::default(),
            full_width_bits,
        })
    }

    pub fn with_bit_order(mut self, bit_order: BitOrder) -> Self {
        self.options.bit_order = bit_order;
        self
    }

    /// Starts decoding `bit_offset` bits into the buffer.
    pub fn with_bit_offset(mut self, bit_offset: usize) -> Self {
        self.options.bit_offset = bit_offset;
        self
    }

    pub fn root(&self) -> &Field {
        &self.root
    }

    pub fn options(&self) -> DecodeOptions {
        self.options
    }

    /// Width of the record with every bitmap child present.
    pub fn full_width_bits(&self) -> usize {
        self.full_width_bits
    }

    /// Decodes `data` into a fresh [Parsed].
    pub fn decode(&self, data: &[u8]) -> Result<Parsed, ReadError> {
        decoder::decode_with(data, &self.root, self.options)
    }

    /// Decodes `data` into `parsed`, returning the number of bits consumed.
    /// `parsed` is untouched on failure.
    pub fn append(&self, parsed: &mut Parsed, data: &[u8]) -> Result<usize, ReadError> {
        decoder::decode_into(parsed, data, &self.root, self.options)
    }

    /// Whether `data` decodes against this schema.
    pub fn matches(&self, data: &[u8]) -> bool {
        self.decode(data).is_ok()
    }
}

impl TryFrom<Field> for Schema {
    type Error = CompileError;

    fn try_from(root: Field) -> Result<Self, Self::Error> {
        Schema::compile(root)
    }
}

fn validate(
    field: &Field,
    path: &mut Vec<usize>,
    names: &mut BTreeSet<String>,
) -> Result<(), CompileError> {
    match field {
        Field::Integer {
            name, bits, signed, ..
        } => {
            // Unsigned values must fit the i64 accessors.
            let max = if *signed { 64 } else { 63 };
            if !(1..=max).contains(bits) {
                return Err(CompileError::InvalidFieldSize {
                    name: name.clone(),
                    bits: *bits,
                });
            }
            claim(name, path, names)
        }
        Field::Hex { name, bits } | Field::Text { name, bits, .. } => {
            if *bits == 0 {
                return Err(CompileError::InvalidFieldSize {
                    name: name.clone(),
                    bits: 0,
                });
            }
            claim(name, path, names)
        }
        Field::Container(children) => children
            .iter()
            .try_for_each(|child| validate(child, path, names)),
        Field::Bitmap {
            infix, children, ..
        } => {
            if children.is_empty() {
                return Err(CompileError::EmptyBitmap);
            }
            if children.len() > 64 {
                return Err(CompileError::BitmapTooWide {
                    children: children.len(),
                });
            }

            if let Some(infix) = infix {
                validate(infix, path, names)?;
            }
            children
                .iter()
                .try_for_each(|child| validate(child, path, names))
        }
        Field::Repeat { count, child } => {
            if *count == 0 {
                return Err(CompileError::InvalidRepeatCount);
            }

            for i in 0..*count {
                path.push(i);
                let result = validate(child, path, names);
                path.pop();
                result?;
            }
            Ok(())
        }
    }
}

fn claim(name: &str, path: &[usize], names: &mut BTreeSet<String>) -> Result<(), CompileError> {
    if name.is_empty() {
        return Err(CompileError::InvalidFieldName);
    }

    let key = full_name(name, path);
    if !names.insert(key.clone()) {
        return Err(CompileError::DuplicateName(key));
    }
    Ok(())
}
