//! Linear unlock schedule between two timestamps.
//!
//! - fraction(t) = 0 for t <= unlock_start
//! - fraction(t) = 1 for t >= unlock_end
//! - fraction(t) = (t - unlock_start) / (unlock_end - unlock_start) otherwise
//!
//! Amounts are derived as floor(allocated * elapsed / duration), multiplied in
//! u128 before dividing. Truncation always rounds in the escrow's favour.

use anchor_lang::prelude::*;

use crate::error::KeeperError;

/// Immutable unlock window (Unix seconds, UTC).
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Schedule {
    pub unlock_start: i64,
    pub unlock_end: i64,
}

/// Exact unlocked fraction `numerator / denominator`, always within [0, 1].
#[derive(Clone, Copy, Debug)]
pub struct UnlockFraction {
    pub numerator: u64,
    pub denominator: u64,
}

impl UnlockFraction {
    pub const ZERO: Self = Self {
        numerator: 0,
        denominator: 1,
    };
    pub const ONE: Self = Self {
        numerator: 1,
        denominator: 1,
    };

    pub fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    pub fn is_one(&self) -> bool {
        self.numerator == self.denominator
    }

    /// floor(amount * numerator / denominator).
    pub fn apply(&self, amount: u64) -> std::result::Result<u64, KeeperError> {
        let v = (amount as u128)
            .checked_mul(self.numerator as u128)
            .ok_or(KeeperError::MathOverflow)?
            / (self.denominator as u128);
        u64::try_from(v).map_err(|_| KeeperError::MathOverflow)
    }
}

impl PartialEq for UnlockFraction {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for UnlockFraction {}

impl PartialOrd for UnlockFraction {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for UnlockFraction {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // a/b vs c/d  <=>  a*d vs c*b; both products fit in u128.
        let lhs = (self.numerator as u128) * (other.denominator as u128);
        let rhs = (other.numerator as u128) * (self.denominator as u128);
        lhs.cmp(&rhs)
    }
}

impl Schedule {
    pub const SIZE: usize = 8 + 8;

    /// Validates the window against the creation time. Never clamps.
    pub fn new(
        created_at: i64,
        unlock_start: i64,
        unlock_end: i64,
    ) -> std::result::Result<Self, KeeperError> {
        if unlock_start <= created_at || unlock_end <= unlock_start {
            return Err(KeeperError::InvalidSchedule);
        }
        Ok(Self {
            unlock_start,
            unlock_end,
        })
    }

    /// Window length in seconds. Positive for any validated schedule.
    pub fn duration(&self) -> u64 {
        span(self.unlock_start, self.unlock_end)
    }

    pub fn unlocked_fraction(&self, now: i64) -> UnlockFraction {
        if now <= self.unlock_start {
            return UnlockFraction::ZERO;
        }
        if now >= self.unlock_end {
            return UnlockFraction::ONE;
        }
        UnlockFraction {
            numerator: span(self.unlock_start, now),
            denominator: self.duration(),
        }
    }

    /// Portion of `allocated` unlocked at `now`, clamped to [0, allocated].
    pub fn unlocked_amount(
        &self,
        allocated: u64,
        now: i64,
    ) -> std::result::Result<u64, KeeperError> {
        let fraction = self.unlocked_fraction(now);
        if fraction.is_zero() {
            return Ok(0);
        }
        if fraction.is_one() {
            return Ok(allocated);
        }
        fraction.apply(allocated)
    }
}

/// `to - from` for `from < to`, computed without i64 overflow.
fn span(from: i64, to: i64) -> u64 {
    let d = (to as i128) - (from as i128);
    // Two i64 values are at most 2^64 - 1 apart.
    d.clamp(0, u64::MAX as i128) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: i64 = 3_600;
    const WEEK: i64 = 7 * 24 * HOUR;

    fn two_week_fixture() -> (i64, Schedule) {
        let created = 1_700_000_000;
        let start = created + WEEK;
        (created, Schedule::new(created, start, start + WEEK).unwrap())
    }

    #[test]
    fn construction_rejects_past_start() {
        let now = 1_700_000_000;
        let r = Schedule::new(now, now - 86_400, now + WEEK);
        assert!(matches!(r, Err(KeeperError::InvalidSchedule)));
        // start == creation time is not in the future either.
        let r = Schedule::new(now, now, now + WEEK);
        assert!(matches!(r, Err(KeeperError::InvalidSchedule)));
    }

    #[test]
    fn construction_rejects_inverted_or_empty_window() {
        let now = 1_700_000_000;
        let start = now + WEEK;
        let end = start + WEEK;
        assert!(matches!(
            Schedule::new(now, end, start),
            Err(KeeperError::InvalidSchedule)
        ));
        assert!(matches!(
            Schedule::new(now, start, start),
            Err(KeeperError::InvalidSchedule)
        ));
    }

    #[test]
    fn fraction_endpoints_are_exact() {
        let (_, s) = two_week_fixture();
        assert_eq!(s.unlocked_fraction(s.unlock_start), UnlockFraction::ZERO);
        assert_eq!(s.unlocked_fraction(s.unlock_start - 1), UnlockFraction::ZERO);
        assert_eq!(s.unlocked_fraction(0), UnlockFraction::ZERO);
        assert_eq!(s.unlocked_fraction(i64::MIN), UnlockFraction::ZERO);
        assert_eq!(s.unlocked_fraction(s.unlock_end), UnlockFraction::ONE);
        assert_eq!(s.unlocked_fraction(i64::MAX), UnlockFraction::ONE);

        let mid = s.unlocked_fraction(s.unlock_start + 1);
        assert!(mid > UnlockFraction::ZERO && mid < UnlockFraction::ONE);
        let mid = s.unlocked_fraction(s.unlock_end - 1);
        assert!(mid > UnlockFraction::ZERO && mid < UnlockFraction::ONE);
    }

    #[test]
    fn fraction_and_amount_are_monotonic() {
        let (_, s) = two_week_fixture();
        let allocated = 1_234_567_890u64;
        let mut prev_fraction = UnlockFraction::ZERO;
        let mut prev_amount = 0u64;
        let mut t = s.unlock_start - HOUR;
        while t <= s.unlock_end + HOUR {
            let f = s.unlocked_fraction(t);
            let a = s.unlocked_amount(allocated, t).unwrap();
            assert!(f >= prev_fraction);
            assert!(a >= prev_amount);
            assert!(a <= allocated);
            prev_fraction = f;
            prev_amount = a;
            t += 977;
        }
        assert_eq!(prev_amount, allocated);
    }

    #[test]
    fn one_hour_into_one_week_window() {
        let (_, s) = two_week_fixture();
        let allocated = 1_234_567_890u64;
        assert_eq!(s.unlocked_amount(allocated, s.unlock_start + HOUR).unwrap(), 7_348_618);
        assert_eq!(
            s.unlocked_amount(allocated, s.unlock_start + 2 * HOUR).unwrap(),
            14_697_236
        );
    }

    #[test]
    fn full_supply_range_does_not_overflow() {
        let (_, s) = two_week_fixture();
        let t = s.unlock_end - 1;
        let v = s.unlocked_amount(u64::MAX, t).unwrap();
        assert!(v < u64::MAX);
        let expected = ((u64::MAX as u128) * ((WEEK - 1) as u128) / (WEEK as u128)) as u64;
        assert_eq!(v, expected);
    }

    #[test]
    fn extreme_timestamps_do_not_overflow() {
        let s = Schedule::new(i64::MIN, i64::MIN + 1, i64::MAX).unwrap();
        assert_eq!(s.duration(), u64::MAX - 1);
        let v = s.unlocked_amount(1_000, 0).unwrap();
        assert!(v <= 1_000);
        assert_eq!(s.unlocked_amount(1_000, i64::MAX).unwrap(), 1_000);
    }

    #[test]
    fn truncates_toward_zero() {
        let now = 100;
        let s = Schedule::new(now, 101, 104).unwrap();
        // 10 * 1/3 = 3.33 -> 3, 10 * 2/3 = 6.66 -> 6
        assert_eq!(s.unlocked_amount(10, 102).unwrap(), 3);
        assert_eq!(s.unlocked_amount(10, 103).unwrap(), 6);
        assert_eq!(s.unlocked_amount(0, 103).unwrap(), 0);
    }
}
