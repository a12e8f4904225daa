//! Declarative field trees describing how a record is laid out.
//!
//! A [Field] is pure schema: it is built once, shared freely across threads and
//! reused for every buffer decoded against it.

/// Semantic tag of an integer leaf. Non-plain kinds store their value under the
/// base name plus a kind suffix so that date and time parts of one event can be
/// correlated by [crate::parsed::Parsed::get_timestamp].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntKind {
    #[default]
    Plain,
    /// Days since 1997-01-01, card-local.
    Date,
    /// Minutes of day, relative to the UTC epoch.
    Time,
    /// Minutes of day, card-local.
    TimeLocal,
    /// Seconds since 1997-01-01 UTC.
    DateTime,
    /// Seconds since 1997-01-01, card-local.
    DateTimeLocal,
    /// `hour << 11 | minute << 5 | second / 2`.
    TimePacked16,
    /// Four BCD bytes `YYYYMMDD`.
    DateBcd,
    /// `(year - 2000) << 9 | month << 5 | day`.
    DatePacked,
    /// `hour << 6 | minute`, card-local.
    TimePacked11Local,
}

impl IntKind {
    /// Suffix appended to the base name to form the stored key.
    pub fn suffix(self) -> &'static str {
        match self {
            IntKind::Plain => "",
            IntKind::Date => "Date",
            IntKind::Time => "Time",
            IntKind::TimeLocal => "TimeLocal",
            IntKind::DateTime => "DateTime",
            IntKind::DateTimeLocal => "DateTimeLocal",
            IntKind::TimePacked16 => "TimePacked16",
            IntKind::DateBcd => "DateBCD",
            IntKind::DatePacked => "DatePacked",
            IntKind::TimePacked11Local => "TimePacked11Local",
        }
    }

    /// Width the card schemes use for this kind. `None` for plain integers.
    pub fn default_bits(self) -> Option<usize> {
        match self {
            IntKind::Plain => None,
            IntKind::Date | IntKind::DatePacked => Some(14),
            IntKind::Time | IntKind::TimeLocal | IntKind::TimePacked11Local => Some(11),
            IntKind::DateTime | IntKind::DateTimeLocal => Some(30),
            IntKind::TimePacked16 => Some(16),
            IntKind::DateBcd => Some(32),
        }
    }

    /// Key under which a leaf of this kind named `base` is stored.
    pub fn key(self, base: &str) -> String {
        format!("{base}{}", self.suffix())
    }
}

pub fn date_name(base: &str) -> String {
    IntKind::Date.key(base)
}

pub fn time_name(base: &str) -> String {
    IntKind::Time.key(base)
}

pub fn time_local_name(base: &str) -> String {
    IntKind::TimeLocal.key(base)
}

pub fn date_time_name(base: &str) -> String {
    IntKind::DateTime.key(base)
}

pub fn date_time_local_name(base: &str) -> String {
    IntKind::DateTimeLocal.key(base)
}

pub fn time_packed16_name(base: &str) -> String {
    IntKind::TimePacked16.key(base)
}

pub fn date_bcd_name(base: &str) -> String {
    IntKind::DateBcd.key(base)
}

pub fn date_packed_name(base: &str) -> String {
    IntKind::DatePacked.key(base)
}

pub fn time_packed11_local_name(base: &str) -> String {
    IntKind::TimePacked11Local.key(base)
}

/// Character set of a text leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StringEncoding {
    /// One byte per character, `bits / 8` characters. Trailing NULs are dropped.
    #[default]
    Latin1,
    /// EN1545 five-bit alphabet: 1..=26 map to `A..=Z`, 0 and 31 to a space.
    /// The unassigned codes 27..=30 continue the ASCII run as `[`, `\`, `]`
    /// and `^`.
    Alpha5,
}

/// Which presence bit gates which bitmap child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PresenceOrder {
    /// The first bit read gates the first child.
    #[default]
    MsbFirst,
    /// The least significant bit of the presence word gates the first child.
    LsbFirst,
}

/// A node of a field tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    /// Fixed-width integer, stored under `name` (already suffixed for semantic kinds).
    Integer {
        name: String,
        bits: usize,
        kind: IntKind,
        signed: bool,
    },
    /// Raw bits kept as a hex blob. May be wider than 64 bits.
    Hex { name: String, bits: usize },
    /// Fixed-width text.
    Text {
        name: String,
        bits: usize,
        encoding: StringEncoding,
    },
    /// Children decoded in order.
    Container(Vec<Field>),
    /// One presence bit per child, then the present children in order. The
    /// optional infix is decoded unconditionally between the two.
    Bitmap {
        infix: Option<Box<Field>>,
        order: PresenceOrder,
        children: Vec<Field>,
    },
    /// `child` decoded `count` times, each iteration under its own index path.
    Repeat { count: usize, child: Box<Field> },
}

impl Field {
    pub fn int(name: impl Into<String>, bits: usize) -> Self {
        Field::Integer {
            name: name.into(),
            bits,
            kind: IntKind::Plain,
            signed: false,
        }
    }

    /// Two's complement integer.
    pub fn signed_int(name: impl Into<String>, bits: usize) -> Self {
        Field::Integer {
            name: name.into(),
            bits,
            kind: IntKind::Plain,
            signed: true,
        }
    }

    /// Semantic integer with an explicit width. The stored key is `base` plus
    /// the kind suffix.
    pub fn semantic(base: &str, kind: IntKind, bits: usize) -> Self {
        Field::Integer {
            name: kind.key(base),
            bits,
            kind,
            signed: false,
        }
    }

    fn semantic_default(base: &str, kind: IntKind) -> Self {
        Self::semantic(base, kind, kind.default_bits().unwrap_or_default())
    }

    pub fn date(base: &str) -> Self {
        Self::semantic_default(base, IntKind::Date)
    }

    pub fn time(base: &str) -> Self {
        Self::semantic_default(base, IntKind::Time)
    }

    pub fn time_local(base: &str) -> Self {
        Self::semantic_default(base, IntKind::TimeLocal)
    }

    pub fn date_time(base: &str) -> Self {
        Self::semantic_default(base, IntKind::DateTime)
    }

    pub fn date_time_local(base: &str) -> Self {
        Self::semantic_default(base, IntKind::DateTimeLocal)
    }

    pub fn time_packed16(base: &str) -> Self {
        Self::semantic_default(base, IntKind::TimePacked16)
    }

    pub fn date_bcd(base: &str) -> Self {
        Self::semantic_default(base, IntKind::DateBcd)
    }

    pub fn date_packed(base: &str) -> Self {
        Self::semantic_default(base, IntKind::DatePacked)
    }

    pub fn time_packed11_local(base: &str) -> Self {
        Self::semantic_default(base, IntKind::TimePacked11Local)
    }

    pub fn hex(name: impl Into<String>, bits: usize) -> Self {
        Field::Hex {
            name: name.into(),
            bits,
        }
    }

    /// Latin-1 text of `bits / 8` characters.
    pub fn string(name: impl Into<String>, bits: usize) -> Self {
        Field::Text {
            name: name.into(),
            bits,
            encoding: StringEncoding::Latin1,
        }
    }

    /// Five-bit alphabet text.
    pub fn alpha_string(name: impl Into<String>, bits: usize) -> Self {
        Field::Text {
            name: name.into(),
            bits,
            encoding: StringEncoding::Alpha5,
        }
    }

    pub fn container(children: impl IntoIterator<Item = Field>) -> Self {
        Field::Container(children.into_iter().collect())
    }

    pub fn bitmap(children: impl IntoIterator<Item = Field>) -> Self {
        Field::Bitmap {
            infix: None,
            order: PresenceOrder::MsbFirst,
            children: children.into_iter().collect(),
        }
    }

    /// Bitmap whose first child is gated by the last presence bit read.
    pub fn bitmap_lsb(children: impl IntoIterator<Item = Field>) -> Self {
        Field::Bitmap {
            infix: None,
            order: PresenceOrder::LsbFirst,
            children: children.into_iter().collect(),
        }
    }

    /// Bitmap with a field decoded between the presence bits and the children.
    pub fn infix_bitmap(infix: Field, children: impl IntoIterator<Item = Field>) -> Self {
        Field::Bitmap {
            infix: Some(Box::new(infix)),
            order: PresenceOrder::MsbFirst,
            children: children.into_iter().collect(),
        }
    }

    pub fn repeat(count: usize, child: Field) -> Self {
        Field::Repeat {
            count,
            child: Box::new(child),
        }
    }

    /// Stored name of a leaf, `None` for structural nodes.
    pub fn name(&self) -> Option<&str> {
        match self {
            Field::Integer { name, .. } | Field::Hex { name, .. } | Field::Text { name, .. } => {
                Some(name)
            }
            _ => None,
        }
    }

    /// Bits consumed when every bitmap bit in the tree is set.
    pub fn full_width_bits(&self) -> usize {
        match self {
            Field::Integer { bits, .. } | Field::Hex { bits, .. } | Field::Text { bits, .. } => {
                *bits
            }
            Field::Container(children) => children.iter().map(Field::full_width_bits).sum(),
            Field::Bitmap {
                infix, children, ..
            } => {
                children.len()
                    + infix.as_ref().map_or(0, |f| f.full_width_bits())
                    + children.iter().map(Field::full_width_bits).sum::<usize>()
            }
            Field::Repeat { count, child } => count * child.full_width_bits(),
        }
    }

    /// Number of leaves produced when every bitmap bit in the tree is set.
    pub fn full_leaf_count(&self) -> usize {
        match self {
            Field::Integer { .. } | Field::Hex { .. } | Field::Text { .. } => 1,
            Field::Container(children) => children.iter().map(Field::full_leaf_count).sum(),
            Field::Bitmap {
                infix, children, ..
            } => {
                infix.as_ref().map_or(0, |f| f.full_leaf_count())
                    + children.iter().map(Field::full_leaf_count).sum::<usize>()
            }
            Field::Repeat { count, child } => count * child.full_leaf_count(),
        }
    }
}
