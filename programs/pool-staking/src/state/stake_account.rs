use anchor_lang::prelude::*;

use crate::errors::StakingError;
use crate::math;

/// Individual user's stake in a pool
/// PDA: ["stake-account", pool, owner]
#[account]
#[derive(Default)]
pub struct StakeAccount {
    /// Owner of this stake account
    pub owner: Pubkey,

    /// The pool this stake belongs to
    pub pool: Pubkey,

    /// Amount of tokens staked
    pub amount: u64,

    /// `amount * acc_reward_per_share` at the last interaction (scaled by 1e12)
    pub reward_debt: u128,

    /// Settled rewards not yet paid out
    pub pending_reward: u64,

    /// Timestamp when the position was opened
    pub staked_at: i64,

    /// Timestamp of last claim
    pub last_claim_at: i64,

    /// Bump seed for PDA derivation
    pub bump: u8,

    /// Reserved for future use
    pub _reserved: [u8; 32],
}

impl StakeAccount {
    pub const SIZE: usize = 8 + // discriminator
        32 + // owner
        32 + // pool
        8 +  // amount
        16 + // reward_debt
        8 +  // pending_reward
        8 +  // staked_at
        8 +  // last_claim_at
        1 +  // bump
        32;  // reserved

    pub fn is_open(&self) -> bool {
        self.owner != Pubkey::default()
    }

    /// Storage may only be reclaimed once nothing is owed either way.
    pub fn is_empty(&self) -> bool {
        self.amount == 0 && self.pending_reward == 0
    }

    /// Pending reward plus whatever accrued since the last snapshot.
    pub fn claimable(&self, acc_reward_per_share: u128) -> Result<u64> {
        let accrued = math::accrued_since(self.amount, acc_reward_per_share, self.reward_debt)?;
        self.pending_reward
            .checked_add(accrued)
            .ok_or_else(|| error!(StakingError::ArithmeticOverflow))
    }

    /// Fail unless `owner` holds this position.
    pub fn require_owner(&self, owner: &Pubkey) -> Result<()> {
        require!(self.is_open(), StakingError::PositionNotFound);
        require_keys_eq!(self.owner, *owner, StakingError::Unauthorized);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SCALE;

    #[test]
    fn test_new_account_is_closed_and_empty() {
        let account = StakeAccount::default();
        assert!(!account.is_open());
        assert!(account.is_empty());
        assert_eq!(
            account.require_owner(&Pubkey::new_unique()).unwrap_err(),
            error!(StakingError::PositionNotFound)
        );
    }

    #[test]
    fn test_claimable_adds_pending_and_accrued() {
        let account = StakeAccount {
            owner: Pubkey::new_unique(),
            amount: 1_000,
            reward_debt: 1_000 * SCALE,
            pending_reward: 7,
            ..Default::default()
        };
        assert_eq!(account.claimable(SCALE).unwrap(), 7);
        assert_eq!(account.claimable(2 * SCALE).unwrap(), 1_007);
        assert!(!account.is_empty());
    }

    #[test]
    fn test_require_owner_rejects_stranger() {
        let owner = Pubkey::new_unique();
        let account = StakeAccount {
            owner,
            ..Default::default()
        };
        assert!(account.require_owner(&owner).is_ok());
        assert_eq!(
            account.require_owner(&Pubkey::new_unique()).unwrap_err(),
            error!(StakingError::Unauthorized)
        );
    }
}
