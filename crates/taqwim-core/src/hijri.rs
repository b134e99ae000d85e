//! Tabular (arithmetic) Hijri calendar.
//!
//! Uses the civil epoch and the 30-year cycle with eleven leap years
//! (2, 5, 7, 10, 13, 16, 18, 21, 24, 26, 29). Day numbers are rata die
//! (R.D. 1 = 1 January 1 of the proleptic Gregorian calendar), the same
//! count `chrono` exposes through `num_days_from_ce`.

/// R.D. of 1 Muharram 1 AH (Julian 16 July 622).
const EPOCH: i64 = 227_015;

pub(crate) const fn is_leap_year(year: i64) -> bool {
    (14 + 11 * year).rem_euclid(30) < 11
}

/// Odd months have 30 days, even months 29; Dhu al-Hijjah gains a day in leap years.
pub(crate) const fn month_length(month: u32, year: i64) -> u32 {
    if month % 2 == 1 || (month == 12 && is_leap_year(year)) {
        30
    } else {
        29
    }
}

pub(crate) const fn year_length(year: i64) -> u32 {
    if is_leap_year(year) { 355 } else { 354 }
}

/// Rata die of a Hijri date. Fields are assumed valid.
pub(crate) const fn to_rata_die(year: i64, month: u32, day: u32) -> i64 {
    let month = month as i64;
    EPOCH - 1
        + (year - 1) * 354
        + (3 + 11 * year).div_euclid(30)
        + 29 * (month - 1)
        + (6 * month - 1).div_euclid(11)
        + day as i64
}

/// Hijri (year, month, day) of a rata die, or `None` when the year
/// computation overflows.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "month is in 1..=12 and day in 1..=30 by construction"
)]
pub(crate) fn from_rata_die(rata_die: i64) -> Option<(i64, u32, u32)> {
    let year = rata_die
        .checked_sub(EPOCH)?
        .checked_mul(30)?
        .checked_add(10_646)?
        .div_euclid(10_631);
    let prior_days = rata_die - to_rata_die(year, 1, 1);
    let month = (11 * prior_days + 330).div_euclid(325) as u32;
    let day = (rata_die - to_rata_die(year, month, 1) + 1) as u32;
    Some((year, month, day))
}

/// 1-based ordinal day within the Hijri year.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "ordinal is in 1..=355"
)]
pub(crate) const fn day_of_year(year: i64, month: u32, day: u32) -> u32 {
    (to_rata_die(year, month, day) - to_rata_die(year, 1, 1) + 1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_years_follow_the_cycle() {
        let leaps: Vec<i64> = (1441..=1450).filter(|&y| is_leap_year(y)).collect();
        assert_eq!(leaps, vec![1442, 1445, 1447, 1450]);
    }

    #[test]
    fn year_lengths_match_consecutive_new_years() {
        for year in 1..=1600 {
            let length = to_rata_die(year + 1, 1, 1) - to_rata_die(year, 1, 1);
            assert_eq!(length, i64::from(year_length(year)), "year {year}");
        }
    }

    #[test]
    fn rata_die_roundtrip() {
        for year in [1, 2, 622, 1389, 1445, 1446, 1500] {
            for month in 1..=12 {
                for day in 1..=month_length(month, year) {
                    let rd = to_rata_die(year, month, day);
                    assert_eq!(from_rata_die(rd), Some((year, month, day)));
                }
            }
        }
    }

    #[test]
    fn extreme_rata_die_is_rejected() {
        assert_eq!(from_rata_die(i64::MAX), None);
        assert_eq!(from_rata_die(i64::MIN), None);
        assert_eq!(from_rata_die(i64::MAX / 4), None);
    }

    #[test]
    fn known_new_year() {
        // 1 Muharram 1446 falls on 8 July 2024 in the tabular calendar.
        let rd = to_rata_die(1446, 1, 1);
        let gregorian = chrono::NaiveDate::from_ymd_opt(2024, 7, 8).unwrap();
        assert_eq!(rd, i64::from(chrono::Datelike::num_days_from_ce(&gregorian)));
    }

    #[test]
    fn day_of_year_counts_from_muharram() {
        assert_eq!(day_of_year(1445, 1, 1), 1);
        assert_eq!(day_of_year(1445, 2, 1), 31);
        assert_eq!(day_of_year(1445, 12, 30), 355);
    }
}
