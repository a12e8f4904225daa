//! Date and time packing conventions shared by the card schemes.
//!
//! Decoding only stores raw integers; these conversions run at lookup time,
//! when the caller supplies the time zone of the card scheme. Day counts and
//! second counts are relative to [EPOCH]. The `*_local` forms count from
//! midnight in the card's zone, the others from midnight UTC.

use std::fmt;

use time::{
    Date, Duration, Month, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset, macros::date,
};

/// Day zero of every day count.
pub const EPOCH: Date = date!(1997-01-01);

/// Time zone of a card scheme.
///
/// Implementations backed by daylight-saving rules receive a wall-clock time.
/// For instants counted from the UTC epoch the UTC wall-clock is passed, which
/// is only ambiguous within the hours around a transition.
pub trait CardTimeZone {
    fn utc_offset(&self, wall: PrimitiveDateTime) -> UtcOffset;
}

impl CardTimeZone for UtcOffset {
    fn utc_offset(&self, _wall: PrimitiveDateTime) -> UtcOffset {
        *self
    }
}

impl<T: CardTimeZone + ?Sized> CardTimeZone for &T {
    fn utc_offset(&self, wall: PrimitiveDateTime) -> UtcOffset {
        (**self).utc_offset(wall)
    }
}

/// A point in time decoded from a card, or a bare day when the record only
/// carries a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    Full(OffsetDateTime),
    Day(Date),
}

impl Timestamp {
    pub fn has_time(&self) -> bool {
        matches!(self, Timestamp::Full(_))
    }

    pub fn date(&self) -> Date {
        match self {
            Timestamp::Full(t) => t.date(),
            Timestamp::Day(d) => *d,
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.date();
        write!(f, "{:04}-{:02}-{:02}", d.year(), u8::from(d.month()), d.day())?;
        if let Timestamp::Full(t) = self {
            write!(f, " {:02}:{:02}", t.hour(), t.minute())?;
        }
        Ok(())
    }
}

fn span(days: i64, seconds: i64) -> Option<Duration> {
    let total = days.checked_mul(86_400)?.checked_add(seconds)?;
    Some(Duration::seconds(total))
}

fn epoch_plus(days: i64, seconds: i64) -> Option<PrimitiveDateTime> {
    PrimitiveDateTime::new(EPOCH, Time::MIDNIGHT).checked_add(span(days, seconds)?)
}

fn at_local(wall: PrimitiveDateTime, tz: &impl CardTimeZone) -> OffsetDateTime {
    wall.assume_offset(tz.utc_offset(wall))
}

fn at_utc(utc: PrimitiveDateTime, tz: &impl CardTimeZone) -> Option<OffsetDateTime> {
    utc.assume_utc().checked_to_offset(tz.utc_offset(utc))
}

/// Day `days` after [EPOCH].
pub fn date_from_days(days: i64) -> Option<Date> {
    EPOCH.checked_add(span(days, 0)?)
}

/// A day count on its own. Zero means "not set".
pub fn parse_date(days: i64) -> Option<Timestamp> {
    if days == 0 {
        return None;
    }

    date_from_days(days).map(Timestamp::Day)
}

/// Day count plus minutes of day, counted from the UTC epoch.
pub fn parse_time(days: i64, minutes: i64, tz: &impl CardTimeZone) -> Option<Timestamp> {
    if days == 0 && minutes == 0 {
        return None;
    }

    let utc = epoch_plus(days, minutes.checked_mul(60)?)?;
    at_utc(utc, tz).map(Timestamp::Full)
}

/// Day count plus minutes of day, both card-local.
pub fn parse_time_local(days: i64, minutes: i64, tz: &impl CardTimeZone) -> Option<Timestamp> {
    if days == 0 && minutes == 0 {
        return None;
    }

    let wall = epoch_plus(days, minutes.checked_mul(60)?)?;
    Some(Timestamp::Full(at_local(wall, tz)))
}

/// Day count plus a `hour << 11 | minute << 5 | second / 2` time, from the UTC epoch.
pub fn parse_time_packed16(days: i64, packed: i64, tz: &impl CardTimeZone) -> Option<Timestamp> {
    if days == 0 && packed == 0 {
        return None;
    }

    let seconds = (packed >> 11)
        .checked_mul(3600)?
        .checked_add(((packed >> 5) & 0x3f) * 60 + (packed & 0x1f) * 2)?;
    let utc = epoch_plus(days, seconds)?;
    at_utc(utc, tz).map(Timestamp::Full)
}

/// Seconds since the UTC epoch. Zero means "not set".
pub fn parse_date_time(seconds: i64, tz: &impl CardTimeZone) -> Option<Timestamp> {
    if seconds == 0 {
        return None;
    }

    at_utc(epoch_plus(0, seconds)?, tz).map(Timestamp::Full)
}

/// Seconds since local midnight of the epoch. Zero means "not set".
pub fn parse_date_time_local(seconds: i64, tz: &impl CardTimeZone) -> Option<Timestamp> {
    if seconds == 0 {
        return None;
    }

    Some(Timestamp::Full(at_local(epoch_plus(0, seconds)?, tz)))
}

fn packed_date(packed: i64) -> Option<Date> {
    let year = i32::try_from((packed >> 9) + 2000).ok()?;
    let month = Month::try_from(((packed >> 5) & 0xf) as u8).ok()?;
    Date::from_calendar_date(year, month, (packed & 0x1f) as u8).ok()
}

/// `(year - 2000) << 9 | month << 5 | day`. Zero means "not set".
pub fn parse_date_packed(packed: i64) -> Option<Timestamp> {
    if packed == 0 {
        return None;
    }

    packed_date(packed).map(Timestamp::Day)
}

/// Packed date plus a local `hour << 6 | minute` time.
pub fn parse_time_packed11_local(
    packed_date_value: i64,
    packed_time: i64,
    tz: &impl CardTimeZone,
) -> Option<Timestamp> {
    if packed_date_value == 0 {
        return None;
    }

    let day = packed_date(packed_date_value)?;
    let hour = u8::try_from(packed_time >> 6).ok()?;
    let time = Time::from_hms(hour, (packed_time & 0x3f) as u8, 0).ok()?;
    Some(Timestamp::Full(at_local(PrimitiveDateTime::new(day, time), tz)))
}

/// Decimal value of a BCD-encoded integer, `None` if any nibble exceeds 9.
pub fn bcd_to_int(bcd: i64) -> Option<i64> {
    if bcd < 0 {
        return None;
    }

    let mut value = 0;
    let mut scale = 1;
    let mut rest = bcd;
    while rest > 0 {
        let digit = rest & 0xf;
        if digit > 9 {
            return None;
        }
        value += digit * scale;
        scale *= 10;
        rest >>= 4;
    }

    Some(value)
}

/// Four BCD bytes `YYYYMMDD`. Zero means "not set".
pub fn parse_date_bcd(bcd: i64) -> Option<Timestamp> {
    if bcd == 0 {
        return None;
    }

    let year = i32::try_from(bcd_to_int(bcd >> 16)?).ok()?;
    let month = Month::try_from(u8::try_from(bcd_to_int((bcd >> 8) & 0xff)?).ok()?).ok()?;
    let day = u8::try_from(bcd_to_int(bcd & 0xff)?).ok()?;
    Date::from_calendar_date(year, month, day)
        .ok()
        .map(Timestamp::Day)
}
