//! Fixed-point helpers for the reward accumulator.
//!
//! `acc_reward_per_share` is stored scaled by [`SCALE`]. A position's
//! `reward_debt` is kept at the same scale (`amount * acc`), so unpaid reward
//! is `(amount * acc - reward_debt) / SCALE`, rounded down.
//!
//! Every operation is checked. `amount * acc` fits in `u128` as long as
//! `acc <= u128::MAX / u64::MAX`, i.e. the pool has emitted fewer than about
//! 1.8e7 reward units per staked unit over its lifetime; past that the engine
//! returns `ArithmeticOverflow` instead of wrapping.

use anchor_lang::prelude::*;

use crate::constants::SCALE;
use crate::errors::StakingError;

/// Reward tokens emitted over `elapsed` seconds at `reward_rate`.
pub fn emitted(elapsed: u64, reward_rate: u64) -> Result<u128> {
    (elapsed as u128)
        .checked_mul(reward_rate as u128)
        .ok_or_else(|| error!(StakingError::ArithmeticOverflow))
}

/// Increase of the scaled reward-per-share after `elapsed` seconds at `reward_rate`.
///
/// Rounds down: at most `total_staked / SCALE` base units are lost per call.
pub fn reward_per_share_increase(elapsed: u64, reward_rate: u64, total_staked: u64) -> Result<u128> {
    if total_staked == 0 {
        return Ok(0);
    }

    let increase = emitted(elapsed, reward_rate)?
        .checked_mul(SCALE)
        .ok_or(StakingError::ArithmeticOverflow)?
        / (total_staked as u128);

    Ok(increase)
}

/// Scaled reward debt of `amount` at the given accumulator value.
pub fn reward_debt(amount: u64, acc_reward_per_share: u128) -> Result<u128> {
    (amount as u128)
        .checked_mul(acc_reward_per_share)
        .ok_or_else(|| error!(StakingError::ArithmeticOverflow))
}

/// Reward accrued by `amount` since `debt` was recorded, in reward base units.
pub fn accrued_since(amount: u64, acc_reward_per_share: u128, debt: u128) -> Result<u64> {
    let accrued = reward_debt(amount, acc_reward_per_share)?
        .checked_sub(debt)
        .ok_or(StakingError::ArithmeticOverflow)?
        / SCALE;

    u64::try_from(accrued).map_err(|_| error!(StakingError::ArithmeticOverflow))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_overflow<T: std::fmt::Debug>(result: Result<T>) {
        assert_eq!(
            result.unwrap_err(),
            anchor_lang::error::Error::from(StakingError::ArithmeticOverflow)
        );
    }

    #[test]
    fn test_increase_is_zero_for_empty_pool() {
        assert_eq!(reward_per_share_increase(1_000, 100, 0).unwrap(), 0);
    }

    #[test]
    fn test_increase_scales_by_total_staked() {
        // 10s * 100/s = 1000 reward over 1000 staked = 1.0 per share
        assert_eq!(reward_per_share_increase(10, 100, 1_000).unwrap(), SCALE);
        // shared by 2000 staked = 0.5 per share
        assert_eq!(reward_per_share_increase(10, 100, 2_000).unwrap(), SCALE / 2);
    }

    #[test]
    fn test_increase_rounds_down() {
        // 1 reward unit over 3 staked
        assert_eq!(reward_per_share_increase(1, 1, 3).unwrap(), 333_333_333_333);
    }

    #[test]
    fn test_increase_overflow() {
        assert_overflow(reward_per_share_increase(u64::MAX, u64::MAX, 1));
    }

    #[test]
    fn test_emitted() {
        assert_eq!(emitted(10, 100).unwrap(), 1_000);
        assert_eq!(
            emitted(u64::MAX, u64::MAX).unwrap(),
            (u64::MAX as u128) * (u64::MAX as u128)
        );
    }

    #[test]
    fn test_accrued_since() {
        let debt = reward_debt(1_000, SCALE).unwrap();
        assert_eq!(accrued_since(1_000, SCALE, debt).unwrap(), 0);
        assert_eq!(accrued_since(1_000, SCALE * 3 / 2, debt).unwrap(), 500);
    }

    #[test]
    fn test_accrued_since_rejects_debt_above_entitlement() {
        assert_overflow(accrued_since(10, SCALE, 11 * SCALE));
    }

    #[test]
    fn test_reward_debt_boundary() {
        let max_acc = u128::MAX / (u64::MAX as u128);
        assert!(reward_debt(u64::MAX, max_acc).is_ok());
        assert_overflow(reward_debt(u64::MAX, max_acc + 1));
    }

    #[test]
    fn test_accrued_payout_must_fit_u64() {
        let acc = (u64::MAX as u128 + 1) * SCALE;
        assert_overflow(accrued_since(1, acc, 0));
    }
}
