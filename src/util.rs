use chrono::{Datelike, NaiveDate};

/// Julian day number of the Unix epoch, 1970-01-01.
pub const JD_UNIX_EPOCH: i64 = 2_440_588;

// Julian day number of 0001-01-01 CE minus chrono's day count for that date.
const JD_CE_OFFSET: i64 = 1_721_425;

/// UTC midnight of the given julian day, in seconds since the Unix epoch.
/// A calendar day `jd` spans `[epoch_from_jd(jd), epoch_from_jd(jd + 1))`.
pub fn epoch_from_jd(jd: i64) -> i64 {
    (jd - JD_UNIX_EPOCH) * 86_400
}

/// Julian day containing the given epoch second.
pub fn jd_from_epoch(epoch: i64) -> i64 {
    epoch.div_euclid(86_400) + JD_UNIX_EPOCH
}

pub fn jd_from_date(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) + JD_CE_OFFSET
}

/// `None` when the julian day falls outside chrono's representable dates.
pub fn date_from_jd(jd: i64) -> Option<NaiveDate> {
    let days = i32::try_from(jd - JD_CE_OFFSET).ok()?;
    NaiveDate::from_num_days_from_ce_opt(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn unix_epoch_is_jd_2440588() {
        assert_eq!(epoch_from_jd(JD_UNIX_EPOCH), 0);
        assert_eq!(jd_from_epoch(0), JD_UNIX_EPOCH);
    }

    #[test]
    fn matches_known_j2000_epoch() {
        // JD 2451545 is 2000-01-01, epoch 946684800
        assert_eq!(epoch_from_jd(2_451_545), 946_684_800);
        assert_eq!(jd_from_epoch(946_684_800), 2_451_545);
    }

    #[test]
    fn epoch_rounds_down_within_a_day() {
        assert_eq!(jd_from_epoch(86_399), JD_UNIX_EPOCH);
        assert_eq!(jd_from_epoch(86_400), JD_UNIX_EPOCH + 1);
        assert_eq!(jd_from_epoch(-1), JD_UNIX_EPOCH - 1);
    }

    #[test]
    fn civil_date_bridges_round_trip() {
        let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        assert_eq!(jd_from_date(date), 2_451_545);
        assert_eq!(date_from_jd(2_451_545), Some(date));
        assert_eq!(
            date_from_jd(JD_UNIX_EPOCH),
            NaiveDate::from_ymd_opt(1970, 1, 1)
        );
    }

    #[test]
    fn agrees_with_chrono_timestamps() {
        for jd in [2_440_588, 2_451_545, 2_459_216, 2_466_000] {
            let date = date_from_jd(jd).unwrap();
            let from_epoch = DateTime::from_timestamp(epoch_from_jd(jd), 0).unwrap();
            assert_eq!(from_epoch.date_naive(), date);
            assert_eq!(jd_from_date(date), jd);
        }
    }
}
