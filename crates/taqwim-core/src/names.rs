//! Localized words: month and weekday names, calendar names, unit labels.
//!
//! Canonical names are Arabic. Resolution also accepts the Maghreb month
//! spellings and Latin transliterations, compared ASCII-case-insensitively.

/// Canonical solar (Gregorian) month names, January first.
pub const SOLAR_MONTHS: [&str; 12] = [
    "يناير",
    "فبراير",
    "مارس",
    "أبريل",
    "مايو",
    "يونيو",
    "يوليو",
    "أغسطس",
    "سبتمبر",
    "أكتوبر",
    "نوفمبر",
    "ديسمبر",
];

/// Canonical lunar (Hijri) month names, Muharram first.
pub const LUNAR_MONTHS: [&str; 12] = [
    "محرم",
    "صفر",
    "ربيع الأول",
    "ربيع الآخر",
    "جمادى الأولى",
    "جمادى الآخرة",
    "رجب",
    "شعبان",
    "رمضان",
    "شوال",
    "ذو القعدة",
    "ذو الحجة",
];

const SOLAR_MONTH_ALIASES: &[(&str, u32)] = &[
    ("جانفي", 1),
    ("January", 1),
    ("Jan", 1),
    ("فيفري", 2),
    ("February", 2),
    ("Feb", 2),
    ("March", 3),
    ("Mar", 3),
    ("أفريل", 4),
    ("ابريل", 4),
    ("April", 4),
    ("Apr", 4),
    ("ماي", 5),
    ("May", 5),
    ("جوان", 6),
    ("June", 6),
    ("Jun", 6),
    ("جويلية", 7),
    ("July", 7),
    ("Jul", 7),
    ("أوت", 8),
    ("اغسطس", 8),
    ("August", 8),
    ("Aug", 8),
    ("September", 9),
    ("Sep", 9),
    ("اكتوبر", 10),
    ("October", 10),
    ("Oct", 10),
    ("November", 11),
    ("Nov", 11),
    ("دجنبر", 12),
    ("December", 12),
    ("Dec", 12),
];

const LUNAR_MONTH_ALIASES: &[(&str, u32)] = &[
    ("Muharram", 1),
    ("Safar", 2),
    ("Rabi al-Awwal", 3),
    ("ربيع الثاني", 4),
    ("Rabi al-Thani", 4),
    ("Rabi al-Akhir", 4),
    ("جمادى الأول", 5),
    ("Jumada al-Ula", 5),
    ("Jumada al-Awwal", 5),
    ("جمادى الثانية", 6),
    ("Jumada al-Akhirah", 6),
    ("Jumada al-Thani", 6),
    ("Rajab", 7),
    ("Shaban", 8),
    ("Sha'ban", 8),
    ("Ramadan", 9),
    ("Shawwal", 10),
    ("ذو القعده", 11),
    ("Dhu al-Qadah", 11),
    ("Dhu al-Qi'dah", 11),
    ("ذو الحجه", 12),
    ("Dhu al-Hijjah", 12),
];

/// Weekday names, Monday first (index 1 is Monday).
pub const WEEKDAYS: [&str; 7] = [
    "الاثنين",
    "الثلاثاء",
    "الأربعاء",
    "الخميس",
    "الجمعة",
    "السبت",
    "الأحد",
];

/// Names that select the solar chronology. The first is canonical.
pub const SOLAR_CALENDAR_NAMES: &[&str] = &[
    "الميلادي",
    "ميلادي",
    "التقويم الميلادي",
    "جرجوري",
    "solar",
    "gregorian",
    "iso",
];

/// Names that select the lunar chronology. The first is canonical.
pub const LUNAR_CALENDAR_NAMES: &[&str] = &[
    "الهجري",
    "هجري",
    "التقويم الهجري",
    "lunar",
    "hijri",
    "hijrah",
];

/// Prefix placed before a calendar name.
pub const CALENDAR_PREFIX: &str = "بالتقويم";

/// The bare word "calendar"; a name containing it is rendered without prefix.
pub const CALENDAR_WORD: &str = "تقويم";

/// Prefix placed before a named zone ("at the time of").
pub const ZONE_PREFIX: &str = "بتوقيت";

/// Conjunction joining amount fields ("and").
pub const CONJUNCTION: &str = "و";

pub const AM_MARKER: &str = "ص";
pub const PM_MARKER: &str = "م";
const AM_ALIASES: &[&str] = &["ص", "صباحاً", "صباحا", "am", "a.m."];
const PM_ALIASES: &[&str] = &["م", "مساءً", "مساءا", "مساء", "pm", "p.m."];

pub const HOUR_LABEL: &str = "ساعة";
pub const MINUTE_LABEL: &str = "دقيقة";
pub const SECOND_LABEL: &str = "ثانية";
pub const NANOSECOND_LABEL: &str = "نانوثانية";
pub const YEAR_LABEL: &str = "سنة";
pub const MONTH_LABEL: &str = "شهر";
pub const DAY_LABEL: &str = "يوم";

fn lookup(aliases: &[(&str, u32)], name: &str) -> Option<u32> {
    aliases
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(name))
        .map(|&(_, number)| number)
}

fn position(canonical: &[&str; 12], name: &str) -> Option<u32> {
    canonical
        .iter()
        .position(|candidate| *candidate == name)
        .and_then(|idx| u32::try_from(idx + 1).ok())
}

pub(crate) fn solar_month_number(name: &str) -> Option<u32> {
    let name = name.trim();
    position(&SOLAR_MONTHS, name).or_else(|| lookup(SOLAR_MONTH_ALIASES, name))
}

pub(crate) fn lunar_month_number(name: &str) -> Option<u32> {
    let name = name.trim();
    position(&LUNAR_MONTHS, name).or_else(|| lookup(LUNAR_MONTH_ALIASES, name))
}

/// Weekday name for a 1-based index (1 = Monday).
pub(crate) fn weekday(index: usize) -> Option<&'static str> {
    index.checked_sub(1).and_then(|i| WEEKDAYS.get(i)).copied()
}

/// Parses a meridiem marker: `Some(true)` for PM, `Some(false)` for AM.
pub(crate) fn parse_meridiem(text: &str) -> Option<bool> {
    let text = text.trim();
    if PM_ALIASES.iter().any(|m| m.eq_ignore_ascii_case(text)) {
        Some(true)
    } else if AM_ALIASES.iter().any(|m| m.eq_ignore_ascii_case(text)) {
        Some(false)
    } else {
        None
    }
}
