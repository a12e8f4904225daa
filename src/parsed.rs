//! The flat, name-keyed result of one or more decode passes.
//!
//! Leaves are stored under their full name: the leaf name at top level, or the
//! repeat path followed by the leaf name (`/0/ContractsTariff`) inside a
//! [crate::field::Field::Repeat]. Fields skipped by a bitmap have no entry at all.

use std::{collections::BTreeMap, fmt};

use crate::{
    datetime::{self, CardTimeZone, Timestamp},
    decoder::{self, DecodeOptions},
    errors::{LookupError, ReadError},
    field::{Field, IntKind},
};

/// Raw bits of a hex leaf, right-aligned into `ceil(bits / 8)` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexValue {
    bits: usize,
    bytes: Vec<u8>,
}

impl HexValue {
    pub fn new(bits: usize, bytes: Vec<u8>) -> Self {
        Self { bits, bytes }
    }

    pub fn bits(&self) -> usize {
        self.bits
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Lowercase hex. A leading partial byte of four bits or fewer is a single digit.
impl fmt::Display for HexValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let partial = self.bits % 8;
        let full = match self.bytes.split_first() {
            Some((head, rest)) if partial > 0 => {
                if partial <= 4 {
                    write!(f, "{head:x}")?;
                } else {
                    write!(f, "{head:02x}")?;
                }
                rest
            }
            _ => &self.bytes[..],
        };

        f.write_str(&hex::encode(full))
    }
}

#[cfg(feature = "serde")]
impl ::serde::Serialize for HexValue {
    fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A decoded leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize), serde(untagged))]
pub enum Value {
    U64(u64),
    I64(i64),
    Hex(HexValue),
    Str(String),
}

impl Value {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::U64(v) => i64::try_from(*v).ok(),
            Value::I64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_hex(&self) -> Option<&HexValue> {
        match self {
            Value::Hex(h) => Some(h),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::U64(_) | Value::I64(_) => "integer",
            Value::Hex(_) => "hex",
            Value::Str(_) => "string",
        }
    }
}

/// Integers render as `0x..`, text as-is.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::U64(v) => write!(f, "0x{v:x}"),
            Value::I64(v) if *v < 0 => write!(f, "-0x{:x}", v.unsigned_abs()),
            Value::I64(v) => write!(f, "0x{v:x}"),
            Value::Hex(h) => write!(f, "{h}"),
            Value::Str(s) => f.write_str(s),
        }
    }
}

/// Key of `name` under a repeat index path.
pub fn full_name(name: &str, path: &[usize]) -> String {
    let mut key = String::new();
    for index in path {
        key.push('/');
        key.push_str(&index.to_string());
    }

    if key.is_empty() {
        return name.to_owned();
    }

    key.push('/');
    key.push_str(name);
    key
}

fn base_name(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}

/// Accumulated decode output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize), serde(transparent))]
pub struct Parsed {
    map: BTreeMap<String, Value>,
}

impl Parsed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Stores `value` under `key`, replacing any earlier value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.map.insert(key.into(), value)
    }

    pub(crate) fn merge(&mut self, other: Parsed) {
        self.map.extend(other.map);
    }

    /// Decodes `data` against `field` into this result. Nothing is added when
    /// the decode fails.
    pub fn append(&mut self, data: &[u8], field: &Field) -> Result<&mut Self, ReadError> {
        self.append_with(data, field, DecodeOptions::default())?;
        Ok(self)
    }

    /// Same as [Parsed::append] with explicit options. Returns the number of
    /// bits consumed.
    pub fn append_with(
        &mut self,
        data: &[u8],
        field: &Field,
        options: DecodeOptions,
    ) -> Result<usize, ReadError> {
        decoder::decode_into(self, data, field, options)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.map.get(name)
    }

    pub fn get_at(&self, name: &str, path: &[usize]) -> Option<&Value> {
        self.map.get(&full_name(name, path))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn contains_at(&self, name: &str, path: &[usize]) -> bool {
        self.map.contains_key(&full_name(name, path))
    }

    /// `None` when the field was never decoded or does not hold an integer.
    /// Unsigned values above `i64::MAX` only come from trees that skipped
    /// [crate::schema::Schema::compile]; they also read as `None`, use
    /// [Parsed::int] or [Parsed::get] to tell them apart.
    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_int)
    }

    pub fn get_int_at(&self, name: &str, path: &[usize]) -> Option<i64> {
        self.get_at(name, path).and_then(Value::as_int)
    }

    /// Zero both when the field is absent and when it decoded as zero.
    pub fn get_int_or_zero(&self, name: &str) -> i64 {
        self.get_int(name).unwrap_or(0)
    }

    pub fn get_int_or_zero_at(&self, name: &str, path: &[usize]) -> i64 {
        self.get_int_at(name, path).unwrap_or(0)
    }

    pub fn get_string(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn get_string_at(&self, name: &str, path: &[usize]) -> Option<&str> {
        self.get_at(name, path).and_then(Value::as_str)
    }

    pub fn get_hex(&self, name: &str) -> Option<&HexValue> {
        self.get(name).and_then(Value::as_hex)
    }

    fn typed<'a, T>(
        &'a self,
        name: &str,
        expected: &'static str,
        cast: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<T, LookupError> {
        let value = self
            .get(name)
            .ok_or_else(|| LookupError::Missing(name.to_owned()))?;

        cast(value).ok_or_else(|| LookupError::TypeMismatch {
            name: name.to_owned(),
            expected,
            found: value.type_name(),
        })
    }

    /// Integer value, failing if it is absent or of another type.
    pub fn int(&self, name: &str) -> Result<i64, LookupError> {
        match self.get(name) {
            Some(Value::U64(v)) if i64::try_from(*v).is_err() => Err(LookupError::OutOfRange {
                name: name.to_owned(),
                value: *v,
            }),
            _ => self.typed(name, "integer", Value::as_int),
        }
    }

    pub fn string(&self, name: &str) -> Result<&str, LookupError> {
        self.typed(name, "string", Value::as_str)
    }

    pub fn hex(&self, name: &str) -> Result<&HexValue, LookupError> {
        self.typed(name, "hex", Value::as_hex)
    }

    /// Which stored parts make up the timestamp of `base`, in priority order.
    fn timestamp_parts(&self, base: &str) -> Option<(IntKind, Option<IntKind>)> {
        use IntKind::*;

        let has = |kind: IntKind| self.contains(&kind.key(base));

        if has(DateTime) {
            return Some((DateTime, None));
        }
        if has(DateTimeLocal) {
            return Some((DateTimeLocal, None));
        }
        if has(Date) {
            if let Some(time) = [Time, TimeLocal, TimePacked16].into_iter().find(|k| has(*k)) {
                return Some((Date, Some(time)));
            }
        }
        if has(DatePacked) && has(TimePacked11Local) {
            return Some((DatePacked, Some(TimePacked11Local)));
        }

        [Date, DatePacked, DateBcd, TimeLocal]
            .into_iter()
            .find(|k| has(*k))
            .map(|k| (k, None))
    }

    /// Combines the date and time leaves stored for `base` into one timestamp.
    ///
    /// `None` when no date leaf was decoded for `base`, or when the stored
    /// values are the "not set" zero.
    pub fn get_timestamp(&self, base: &str, tz: &impl CardTimeZone) -> Option<Timestamp> {
        use IntKind::*;

        let (primary, time) = self.timestamp_parts(base)?;
        let p = self.get_int_or_zero(&primary.key(base));
        let t = time.map_or(0, |k| self.get_int_or_zero(&k.key(base)));

        match (primary, time) {
            (DateTime, _) => datetime::parse_date_time(p, tz),
            (DateTimeLocal, _) => datetime::parse_date_time_local(p, tz),
            (Date, Some(Time)) => datetime::parse_time(p, t, tz),
            (Date, Some(TimeLocal)) => datetime::parse_time_local(p, t, tz),
            (Date, Some(TimePacked16)) => datetime::parse_time_packed16(p, t, tz),
            (DatePacked, Some(_)) => datetime::parse_time_packed11_local(p, t, tz),
            (Date, _) => datetime::parse_date(p),
            (DatePacked, None) => datetime::parse_date_packed(p),
            (DateBcd, _) => datetime::parse_date_bcd(p),
            (TimeLocal, _) => datetime::parse_time_local(0, p, tz),
            _ => None,
        }
    }

    /// Whether the timestamp of `base` would carry a time of day.
    pub fn timestamp_has_time(&self, base: &str) -> bool {
        matches!(
            self.timestamp_parts(base),
            Some((_, Some(_)))
                | Some((IntKind::DateTime | IntKind::DateTimeLocal | IntKind::TimeLocal, None))
        )
    }

    /// Timestamp of `base` as text, falling back to `HH:MM` from a lone time leaf.
    pub fn time_string(&self, base: &str, tz: &impl CardTimeZone) -> Option<String> {
        if let Some(ts) = self.get_timestamp(base, tz) {
            return Some(ts.to_string());
        }

        let minutes = self
            .get_int(&IntKind::Time.key(base))
            .or_else(|| self.get_int(&IntKind::TimeLocal.key(base)))?;
        Some(format!("{:02}:{:02}", minutes / 60, minutes % 60))
    }

    /// All entries, sorted by key.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Rendered `(key, value)` pairs, skipping keys whose last path segment is
    /// listed in `skip`.
    pub fn info(&self, skip: &[&str]) -> Vec<(String, String)> {
        self.entries()
            .filter(|(key, _)| !skip.contains(&base_name(key)))
            .map(|(key, value)| (key.to_owned(), value.to_string()))
            .collect()
    }
}

impl fmt::Display for Parsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (key, value) in self.entries() {
            match value {
                Value::Str(s) => write!(f, "{key} = \"{s}\", ")?,
                _ => write!(f, "{key} = {value}, ")?,
            }
        }
        f.write_str("]")
    }
}
