//! Recursive walk of a field tree over a byte buffer.
//!
//! The walker threads one bit cursor through the tree. Leaves read their width
//! at the cursor, bitmaps read one presence bit per child before visiting the
//! children that are present, and repeats visit their child once per index with
//! that index pushed onto the key path. A read past the end of the buffer
//! aborts the whole decode.

use tracing::{debug, trace};

use crate::{
    bits::{self, BitOrder},
    errors::ReadError,
    field::{Field, PresenceOrder, StringEncoding},
    parsed::{HexValue, Parsed, Value},
};

/// Where and how to start reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    pub bit_order: BitOrder,
    /// Bit position of the first field.
    pub bit_offset: usize,
}

impl DecodeOptions {
    pub fn at(bit_offset: usize) -> Self {
        Self {
            bit_offset,
            ..Default::default()
        }
    }

    pub fn lsb_first() -> Self {
        Self {
            bit_order: BitOrder::LsbFirst,
            ..Default::default()
        }
    }
}

/// Decodes `data` against `root` into a fresh result.
pub fn decode(data: &[u8], root: &Field) -> Result<Parsed, ReadError> {
    decode_with(data, root, DecodeOptions::default())
}

pub fn decode_with(data: &[u8], root: &Field, options: DecodeOptions) -> Result<Parsed, ReadError> {
    let mut parsed = Parsed::new();
    decode_into(&mut parsed, data, root, options)?;
    Ok(parsed)
}

/// Decodes `data` against `root` into an existing result.
pub fn append(parsed: &mut Parsed, data: &[u8], root: &Field) -> Result<(), ReadError> {
    decode_into(parsed, data, root, DecodeOptions::default()).map(|_| ())
}

/// Decodes into `parsed` and returns the number of bits consumed.
///
/// Entries are staged and only merged once the whole tree decoded, so a failed
/// decode leaves `parsed` as it was.
pub fn decode_into(
    parsed: &mut Parsed,
    data: &[u8],
    root: &Field,
    options: DecodeOptions,
) -> Result<usize, ReadError> {
    let mut walker = Walker {
        data,
        order: options.bit_order,
        cursor: options.bit_offset,
        path: String::new(),
        out: Parsed::new(),
    };

    if let Err(err) = walker.walk(root) {
        debug!(bit_pos = walker.cursor, %err, "record does not match field tree");
        return Err(err);
    }

    let consumed = walker.cursor - options.bit_offset;
    trace!(consumed, entries = walker.out.len(), "decoded record");
    parsed.merge(walker.out);

    Ok(consumed)
}

struct Walker<'a> {
    data: &'a [u8],
    order: BitOrder,
    cursor: usize,
    /// Repeat indexes of the current position, as `/i/j`.
    path: String,
    out: Parsed,
}

impl Walker<'_> {
    fn take(&mut self, n: usize) -> Result<u64, ReadError> {
        let value = bits::read_bits(self.data, self.cursor, n, self.order)?;
        self.cursor += n;
        Ok(value)
    }

    fn emit(&mut self, name: &str, value: Value) {
        let key = if self.path.is_empty() {
            name.to_owned()
        } else {
            format!("{}/{name}", self.path)
        };

        trace!(field = %key, bit_pos = self.cursor, "decoded leaf");
        self.out.insert(key, value);
    }

    fn walk(&mut self, field: &Field) -> Result<(), ReadError> {
        match field {
            Field::Integer {
                name, bits, signed, ..
            } => {
                let raw = self.take(*bits)?;
                let value = if *signed {
                    Value::I64(bits::sign_extend(raw, *bits))
                } else {
                    Value::U64(raw)
                };
                self.emit(name, value);
            }
            Field::Hex { name, bits } => {
                let value = self.read_hex(*bits)?;
                self.emit(name, Value::Hex(value));
            }
            Field::Text {
                name,
                bits,
                encoding,
            } => {
                let value = self.read_text(*bits, *encoding)?;
                self.emit(name, Value::Str(value));
            }
            Field::Container(children) => {
                for child in children {
                    self.walk(child)?;
                }
            }
            Field::Bitmap {
                infix,
                order,
                children,
            } => {
                let n = children.len();
                let mask = self.take(n)?;

                if let Some(infix) = infix {
                    self.walk(infix)?;
                }

                for (i, child) in children.iter().enumerate() {
                    let shift = match order {
                        PresenceOrder::MsbFirst => n - 1 - i,
                        PresenceOrder::LsbFirst => i,
                    };

                    if (mask >> shift) & 1 == 1 {
                        self.walk(child)?;
                    } else {
                        debug!(index = i, bit_pos = self.cursor, "bitmap child absent");
                    }
                }
            }
            Field::Repeat { count, child } => {
                for i in 0..*count {
                    let depth = self.path.len();
                    self.path.push('/');
                    self.path.push_str(&i.to_string());

                    let result = self.walk(child);
                    self.path.truncate(depth);
                    result?;
                }
            }
        }

        Ok(())
    }

    fn read_hex(&mut self, bits: usize) -> Result<HexValue, ReadError> {
        bits::check_span(self.data, self.cursor, bits)?;

        let mut bytes = Vec::with_capacity(bits.div_ceil(8));
        let partial = bits % 8;
        if partial > 0 {
            bytes.push(self.take(partial)? as u8);
        }
        for _ in 0..bits / 8 {
            bytes.push(self.take(8)? as u8);
        }

        Ok(HexValue::new(bits, bytes))
    }

    fn read_text(&mut self, bits: usize, encoding: StringEncoding) -> Result<String, ReadError> {
        bits::check_span(self.data, self.cursor, bits)?;

        let mut text = String::new();
        match encoding {
            StringEncoding::Latin1 => {
                for _ in 0..bits / 8 {
                    text.push(char::from(self.take(8)? as u8));
                }
                self.cursor += bits % 8;

                let kept = text.trim_end_matches('\0').len();
                text.truncate(kept);
            }
            StringEncoding::Alpha5 => {
                for _ in 0..bits / 5 {
                    match self.take(5)? as u8 {
                        0 | 31 => {
                            // Leading blanks are dropped.
                            if !text.is_empty() {
                                text.push(' ');
                            }
                        }
                        // 27..=30 continue past `Z` into `[\]^`.
                        c => text.push(char::from(b'A' + c - 1)),
                    }
                }
                self.cursor += bits % 5;

                let kept = text.trim_end().len();
                text.truncate(kept);
            }
        }

        Ok(text)
    }
}
