//! Clock readings at the precision the database keeps.

use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;

/// Fractional-second digits a PostgreSQL `TIMESTAMPTZ` stores.
const STORED_SUBSEC_DIGITS: u16 = 6;

/// Read `clock` truncated to microseconds.
///
/// Timestamps returned straight from a command then match the same record
/// read back from storage.
pub fn stored_now(clock: &dyn Clock) -> DateTime<Utc> {
    clock.utc().trunc_subsecs(STORED_SUBSEC_DIGITS)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Timelike};
    use rstest::rstest;

    use super::*;
    use crate::test_support::FixtureClock;

    #[rstest]
    #[case(510_552_239, 510_552_000)]
    #[case(999_999_999, 999_999_000)]
    #[case(7_000, 7_000)]
    #[case(0, 0)]
    fn drops_sub_microsecond_digits(#[case] nanos: u32, #[case] expected: u32) {
        let instant = Utc
            .with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .single()
            .and_then(|at| at.with_nanosecond(nanos))
            .expect("valid timestamp");
        let clock = FixtureClock::at(instant);

        let now = stored_now(&clock);

        assert_eq!(now.nanosecond(), expected);
        assert_eq!(now.timestamp(), instant.timestamp());
    }
}
