//! Zone and offset resolution.

use std::fmt;

use chrono::{
    DateTime, FixedOffset, Local, LocalResult, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc,
};
use chrono_tz::Tz;

use crate::error::TemporalError;
use crate::names;

const MAX_OFFSET_SECONDS: i32 = 18 * 3600;

/// Localized city and region names mapped to IANA identifiers.
const NAMED_ZONES: &[(&str, &str)] = &[
    ("مكة", "Asia/Riyadh"),
    ("مكة المكرمة", "Asia/Riyadh"),
    ("المدينة", "Asia/Riyadh"),
    ("الرياض", "Asia/Riyadh"),
    ("جدة", "Asia/Riyadh"),
    ("السعودية", "Asia/Riyadh"),
    ("دبي", "Asia/Dubai"),
    ("أبوظبي", "Asia/Dubai"),
    ("الإمارات", "Asia/Dubai"),
    ("الكويت", "Asia/Kuwait"),
    ("الدوحة", "Asia/Qatar"),
    ("قطر", "Asia/Qatar"),
    ("المنامة", "Asia/Bahrain"),
    ("البحرين", "Asia/Bahrain"),
    ("مسقط", "Asia/Muscat"),
    ("صنعاء", "Asia/Aden"),
    ("عدن", "Asia/Aden"),
    ("بغداد", "Asia/Baghdad"),
    ("العراق", "Asia/Baghdad"),
    ("دمشق", "Asia/Damascus"),
    ("سوريا", "Asia/Damascus"),
    ("بيروت", "Asia/Beirut"),
    ("لبنان", "Asia/Beirut"),
    ("عمّان", "Asia/Amman"),
    ("الأردن", "Asia/Amman"),
    ("القاهرة", "Africa/Cairo"),
    ("مصر", "Africa/Cairo"),
    ("الخرطوم", "Africa/Khartoum"),
    ("السودان", "Africa/Khartoum"),
    ("طرابلس", "Africa/Tripoli"),
    ("ليبيا", "Africa/Tripoli"),
    ("تونس", "Africa/Tunis"),
    ("الجزائر", "Africa/Algiers"),
    ("الرباط", "Africa/Casablanca"),
    ("الدار البيضاء", "Africa/Casablanca"),
    ("المغرب", "Africa/Casablanca"),
    ("نواكشوط", "Africa/Nouakchott"),
    ("موريتانيا", "Africa/Nouakchott"),
    ("مقديشو", "Africa/Mogadishu"),
    ("جيبوتي", "Africa/Djibouti"),
    ("إسطنبول", "Europe/Istanbul"),
    ("تركيا", "Europe/Istanbul"),
    ("طهران", "Asia/Tehran"),
    ("كراتشي", "Asia/Karachi"),
    ("جاكرتا", "Asia/Jakarta"),
    ("كوالالمبور", "Asia/Kuala_Lumpur"),
    ("لندن", "Europe/London"),
    ("باريس", "Europe/Paris"),
    ("برلين", "Europe/Berlin"),
    ("موسكو", "Europe/Moscow"),
    ("نيويورك", "America/New_York"),
    ("طوكيو", "Asia/Tokyo"),
    ("غرينتش", "UTC"),
    ("غرينيتش", "UTC"),
    ("Mecca", "Asia/Riyadh"),
    ("Makkah", "Asia/Riyadh"),
    ("Riyadh", "Asia/Riyadh"),
    ("Dubai", "Asia/Dubai"),
    ("Abu Dhabi", "Asia/Dubai"),
    ("Kuwait", "Asia/Kuwait"),
    ("Doha", "Asia/Qatar"),
    ("Manama", "Asia/Bahrain"),
    ("Muscat", "Asia/Muscat"),
    ("Baghdad", "Asia/Baghdad"),
    ("Damascus", "Asia/Damascus"),
    ("Beirut", "Asia/Beirut"),
    ("Amman", "Asia/Amman"),
    ("Cairo", "Africa/Cairo"),
    ("Khartoum", "Africa/Khartoum"),
    ("Tripoli", "Africa/Tripoli"),
    ("Tunis", "Africa/Tunis"),
    ("Algiers", "Africa/Algiers"),
    ("Casablanca", "Africa/Casablanca"),
    ("Rabat", "Africa/Casablanca"),
    ("Istanbul", "Europe/Istanbul"),
    ("London", "Europe/London"),
    ("Paris", "Europe/Paris"),
    ("New York", "America/New_York"),
    ("Tokyo", "Asia/Tokyo"),
    ("GMT", "UTC"),
];

/// A resolved zone: a fixed offset or a named region with its own rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    Fixed(FixedOffset),
    Named(Tz),
}

impl Zone {
    /// Canonical identifier: `±HH:MM` for offsets, the IANA name otherwise.
    pub fn id(&self) -> String {
        match self {
            Self::Fixed(offset) => offset.to_string(),
            Self::Named(tz) => tz.name().to_string(),
        }
    }

    /// Offset from UTC in effect at an instant.
    pub fn offset_at(&self, instant: DateTime<Utc>) -> FixedOffset {
        match self {
            Self::Fixed(offset) => *offset,
            Self::Named(tz) => tz.offset_from_utc_datetime(&instant.naive_utc()).fix(),
        }
    }

    /// Wall-clock reading of an instant in this zone.
    pub fn to_local(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&self.offset_at(instant)).naive_local()
    }

    /// Instant of a wall-clock reading in this zone.
    pub fn to_utc(&self, local: NaiveDateTime) -> Result<DateTime<Utc>, TemporalError> {
        match self {
            Self::Fixed(offset) => local_to_utc(offset, local),
            Self::Named(tz) => local_to_utc(tz, local),
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

/// Converts a wall-clock reading to UTC.
///
/// Ambiguous readings (clocks turned back) pick the earlier instant; readings
/// inside a gap (clocks turned forward) are shifted forward by the gap length.
fn local_to_utc<T: TimeZone>(tz: &T, local: NaiveDateTime) -> Result<DateTime<Utc>, TemporalError> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Ok(dt.with_timezone(&Utc)),
        LocalResult::None => {
            let day_before = local
                .checked_sub_signed(TimeDelta::days(1))
                .ok_or_else(|| TemporalError::out_of_range("zone resolution"))?;
            let before = tz.offset_from_utc_datetime(&day_before).fix();
            let utc = local
                .checked_sub_signed(TimeDelta::seconds(i64::from(before.local_minus_utc())))
                .ok_or_else(|| TemporalError::out_of_range("zone resolution"))?;
            Ok(utc.and_utc())
        }
    }
}

/// Parses a fixed offset: `Z`, `±H`, `±HH`, `±HH:MM`, `±HHMM`, `±HH:MM:SS` or
/// `±HHMMSS`, optionally after a `UTC`/`GMT` prefix.
pub fn resolve_offset(text: &str) -> Result<Zone, TemporalError> {
    let invalid = || TemporalError::InvalidZoneSpec(text.to_string());
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("z") {
        return Ok(Zone::Fixed(FixedOffset::east_opt(0).ok_or_else(invalid)?));
    }
    let body = strip_utc_prefix(trimmed);

    let (sign, digits) = match body.chars().next() {
        Some('+') => (1, &body[1..]),
        Some('-') => (-1, &body[1..]),
        _ => return Err(invalid()),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit() || c == ':') {
        return Err(invalid());
    }

    let parts: Vec<&str> = if digits.contains(':') {
        digits.split(':').collect()
    } else {
        match digits.len() {
            1 | 2 => vec![digits],
            4 => vec![&digits[..2], &digits[2..]],
            6 => vec![&digits[..2], &digits[2..4], &digits[4..]],
            _ => return Err(invalid()),
        }
    };
    if parts.len() > 3 || parts.iter().skip(1).any(|p| p.len() != 2) || parts[0].len() > 2 {
        return Err(invalid());
    }

    let mut fields = [0_i32; 3];
    for (slot, part) in fields.iter_mut().zip(&parts) {
        *slot = part.parse().map_err(|_| invalid())?;
    }
    let [hours, minutes, seconds] = fields;
    if minutes > 59 || seconds > 59 {
        return Err(invalid());
    }
    let total = sign * (hours * 3600 + minutes * 60 + seconds);
    if total.abs() > MAX_OFFSET_SECONDS {
        return Err(invalid());
    }
    FixedOffset::east_opt(total).map(Zone::Fixed).ok_or_else(invalid)
}

/// Maps a localized city or region name (or a canonical IANA id) to a zone.
pub fn resolve_named_zone(text: &str) -> Result<Zone, TemporalError> {
    let name = strip_zone_prefix(text.trim());
    if name.is_empty() {
        return Err(TemporalError::InvalidZoneSpec(text.to_string()));
    }
    let id = NAMED_ZONES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(name))
        .map_or(name, |&(_, id)| id);
    id.parse::<Tz>()
        .map(Zone::Named)
        .map_err(|_| TemporalError::InvalidZoneSpec(text.to_string()))
}

fn strip_utc_prefix(text: &str) -> &str {
    for prefix in ["UTC", "GMT", "utc", "gmt"] {
        if let Some(rest) = text.strip_prefix(prefix) {
            if rest.starts_with(['+', '-']) {
                return rest;
            }
        }
    }
    text
}

fn strip_zone_prefix(text: &str) -> &str {
    text.strip_prefix(names::ZONE_PREFIX).map_or(text, str::trim)
}

/// Whether the text reads as a numeric offset rather than a zone name.
pub(crate) fn looks_like_offset(text: &str) -> bool {
    let text = text.trim();
    text.eq_ignore_ascii_case("z") || strip_utc_prefix(text).starts_with(['+', '-'])
}

/// A zone as the caller wrote it, together with its resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZoneOrOffset {
    raw: String,
    is_offset: bool,
    zone: Zone,
}

impl ZoneOrOffset {
    /// Resolves a fixed offset, keeping the text as written.
    pub fn offset(text: impl Into<String>) -> Result<Self, TemporalError> {
        let raw = text.into();
        let zone = resolve_offset(&raw)?;
        Ok(Self {
            raw: raw.trim().to_string(),
            is_offset: true,
            zone,
        })
    }

    /// Resolves a named zone, keeping the name as written.
    pub fn named(text: impl Into<String>) -> Result<Self, TemporalError> {
        let raw = text.into();
        let zone = resolve_named_zone(&raw)?;
        Ok(Self {
            raw: strip_zone_prefix(raw.trim()).to_string(),
            is_offset: false,
            zone,
        })
    }

    /// Resolves either form; text starting with a sign (or `Z`) is an offset.
    pub fn parse(text: &str) -> Result<Self, TemporalError> {
        if looks_like_offset(text) {
            Self::offset(text)
        } else {
            Self::named(text)
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub const fn is_offset(&self) -> bool {
        self.is_offset
    }

    pub const fn zone(&self) -> Zone {
        self.zone
    }
}

impl std::str::FromStr for ZoneOrOffset {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// The frame wall-clock fields are read in: an explicit zone or the host's local zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    Zone(Zone),
    Local,
}

impl Frame {
    /// The frame used when a point carries no zone: the installed default
    /// zone if any, else the host's local zone.
    pub fn implicit() -> Self {
        crate::config::settings()
            .zone
            .as_ref()
            .map_or(Self::Local, |z| Self::Zone(z.zone()))
    }

    /// The frame of an optional zone, falling back to the implicit frame.
    pub fn of(zone: Option<&ZoneOrOffset>) -> Self {
        zone.map_or_else(Self::implicit, |z| Self::Zone(z.zone()))
    }

    pub fn to_utc(&self, local: NaiveDateTime) -> Result<DateTime<Utc>, TemporalError> {
        match self {
            Self::Zone(zone) => zone.to_utc(local),
            Self::Local => local_to_utc(&Local, local),
        }
    }

    pub fn to_local(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        match self {
            Self::Zone(zone) => zone.to_local(instant),
            Self::Local => instant.with_timezone(&Local).naive_local(),
        }
    }
}
