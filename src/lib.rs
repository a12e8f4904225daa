//! # en1545
//!
//! A library for decoding EN1545-style transit card records described by
//! declarative field trees.
//!
//! Describe a record as a tree of fixed-width leaves, containers, presence
//! bitmaps and repeats, then decode byte buffers into a flat, name-keyed
//! [parsed::Parsed] result. Date and time leaves sharing a base name are
//! combined into timestamps at lookup time, in the card scheme's time zone.
//!
//! ## Example
//!
//! ```
//! use en1545::field::Field;
//! use en1545::schema::Schema;
//! use time::UtcOffset;
//!
//! let schema = Schema::compile(Field::container([
//!     Field::date("Event"),
//!     Field::time_local("Event"),
//! ]))
//! .unwrap();
//!
//! // Day 100 after 1997-01-01, minute 600.
//! let parsed = schema.decode(&[0x01, 0x91, 0x2C, 0x00]).unwrap();
//! assert_eq!(parsed.get_int("EventDate"), Some(100));
//!
//! let when = parsed.get_timestamp("Event", &UtcOffset::UTC).unwrap();
//! assert_eq!(when.to_string(), "1997-04-11 10:00");
//! ```

pub mod bits;
pub mod datetime;
pub mod decoder;
pub mod errors;
pub mod field;
pub mod names;
pub mod parsed;
pub mod schema;
#[cfg(feature = "serde")]
pub mod serde;
