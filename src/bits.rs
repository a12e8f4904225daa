//! Low-level bit read utilities for byte slices.
//!
//! The buffer is addressed as one contiguous bitstream. With [BitOrder::MsbFirst]
//! bit 0 is the high bit of the first byte and multi-bit values are assembled
//! most significant bit first. [BitOrder::LsbFirst] numbers bits from the low
//! bit of each byte and assembles values least significant bit first, the layout
//! used by a few card schemes that store their records little-endian.

use crate::errors::ReadError;

/// Bit numbering used when reading from the byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BitOrder {
    #[default]
    MsbFirst,
    LsbFirst,
}

/// Total number of addressable bits in `data`.
pub fn bit_len(data: &[u8]) -> usize {
    data.len() * 8
}

fn check_read(data: &[u8], bit_pos: usize, n: usize) -> Result<(), ReadError> {
    if n > 64 {
        return Err(ReadError::TooManyBitsRead { asked: n });
    }

    check_span(data, bit_pos, n)
}

/// Fails unless `n` bits starting at `bit_pos` lie inside `data`.
pub fn check_span(data: &[u8], bit_pos: usize, n: usize) -> Result<(), ReadError> {
    let available = bit_len(data);
    if bit_pos.checked_add(n).is_none_or(|end| end > available) {
        return Err(ReadError::OutOfBounds {
            bit_pos,
            len: n,
            available,
        });
    }

    Ok(())
}

/// Reads `n` bits starting at `bit_pos` as an unsigned value (max 64 bits). MSB-first.
pub fn read_bits_at(data: &[u8], bit_pos: usize, n: usize) -> Result<u64, ReadError> {
    check_read(data, bit_pos, n)?;

    let end = bit_pos + n;
    let mut pos = bit_pos;
    let mut value = 0u64;

    while pos < end {
        let byte = data[pos / 8];
        let bit_offset = pos % 8;

        // Bits still wanted from this byte, counted from its high end.
        let take = (8 - bit_offset).min(end - pos);
        let mask = ((1u16 << take) - 1) as u8;
        let chunk = (byte >> (8 - bit_offset - take)) & mask;

        value = (value << take) | u64::from(chunk);
        pos += take;
    }

    Ok(value)
}

/// Reads `n` bits starting at `bit_pos` as an unsigned value (max 64 bits). LSB-first.
pub fn read_bits_at_lsb(data: &[u8], bit_pos: usize, n: usize) -> Result<u64, ReadError> {
    check_read(data, bit_pos, n)?;

    let mut read = 0;
    let mut value = 0u64;

    while read < n {
        let pos = bit_pos + read;
        let byte = data[pos / 8];
        let bit_offset = pos % 8;

        let take = (8 - bit_offset).min(n - read);
        let mask = ((1u16 << take) - 1) as u8;
        value |= u64::from((byte >> bit_offset) & mask) << read;

        read += take;
    }

    Ok(value)
}

/// Reads `n` bits in the given order.
pub fn read_bits(data: &[u8], bit_pos: usize, n: usize, order: BitOrder) -> Result<u64, ReadError> {
    match order {
        BitOrder::MsbFirst => read_bits_at(data, bit_pos, n),
        BitOrder::LsbFirst => read_bits_at_lsb(data, bit_pos, n),
    }
}

/// Reads `n` bits and interprets them as a two's complement value.
pub fn read_signed_bits(
    data: &[u8],
    bit_pos: usize,
    n: usize,
    order: BitOrder,
) -> Result<i64, ReadError> {
    read_bits(data, bit_pos, n, order).map(|raw| sign_extend(raw, n))
}

/// Sign-extends the low `bits` of `value` to a full `i64`.
pub fn sign_extend(value: u64, bits: usize) -> i64 {
    match bits {
        0 => 0,
        64.. => value as i64,
        _ => {
            let shift = 64 - bits;
            ((value << shift) as i64) >> shift
        }
    }
}
