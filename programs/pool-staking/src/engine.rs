//! Pool state transitions.
//!
//! Each operation advances the accumulator, validates the request, computes
//! the new pool and position values, then calls the transfers it needs.
//! Records are written only after every transfer returns `Ok`, so a rejected
//! transfer leaves both accounts exactly as they were.
//!
//! Transfers are passed in as closures. Instruction handlers wrap the SPL
//! token CPI or the system-program fee transfer; tests pass in a plain function.

use anchor_lang::prelude::*;

use crate::errors::StakingError;
use crate::math;
use crate::state::{StakeAccount, StakingPool};

/// Result of a successful stake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StakeReceipt {
    /// The position did not exist before this stake
    pub opened: bool,
    pub position_amount: u64,
    pub total_staked: u64,
    /// Lamports charged as the stake fee
    pub fee: u64,
}

/// Result of a successful unstake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnstakeReceipt {
    pub position_amount: u64,
    pub total_staked: u64,
    /// Reward settled into `pending_reward` by this call
    pub settled_reward: u64,
    /// Lamports charged as the unstake fee
    pub fee: u64,
}

fn transfer_with<F>(transfer: F, amount: u64) -> Result<()>
where
    F: FnOnce(u64) -> Result<()>,
{
    transfer(amount).map_err(|err| {
        msg!("Transfer of {} rejected: {}", amount, err);
        error!(StakingError::TransferFailed)
    })
}

/// Charge `fee` lamports unless it is zero.
fn collect_with<G>(collect_fee: G, fee: u64) -> Result<()>
where
    G: FnOnce(u64) -> Result<()>,
{
    if fee == 0 {
        return Ok(());
    }
    transfer_with(collect_fee, fee)
}

/// Set up a freshly allocated pool.
pub fn initialize(
    pool: &mut StakingPool,
    authority: Pubkey,
    reward_rate: u64,
    stake_fee: u64,
    unstake_fee: u64,
    now: i64,
) -> Result<()> {
    require!(!pool.is_initialized(), StakingError::AlreadyInitialized);
    require_keys_neq!(authority, Pubkey::default(), StakingError::InvalidAuthority);

    pool.authority = authority;
    pool.total_staked = 0;
    pool.acc_reward_per_share = 0;
    pool.reward_rate = reward_rate;
    pool.last_update_time = now;
    pool.staker_count = 0;
    pool.rewards_funded = 0;
    pool.rewards_distributed = 0;
    pool.rewards_emitted = 0;
    pool.stake_fee = stake_fee;
    pool.unstake_fee = unstake_fee;
    pool.fees_collected = 0;
    pool.created_at = now;
    pool.paused = false;

    Ok(())
}

/// Permissionless accumulator tick.
pub fn sync(pool: &mut StakingPool, now: i64) -> Result<()> {
    pool.advance(now)
}

/// Reward `position` could claim at `now`.
pub fn pending_reward(pool: &StakingPool, position: &StakeAccount, now: i64) -> Result<u64> {
    position.claimable(pool.reward_per_share_at(now)?)
}

/// Deposit `amount` into the pool, opening the position on first use.
///
/// The pool's `stake_fee` is charged through `collect_fee` after the tokens
/// move in.
pub fn stake<F, G>(
    pool: &mut StakingPool,
    position: &mut StakeAccount,
    owner: Pubkey,
    amount: u64,
    now: i64,
    transfer_in: F,
    collect_fee: G,
) -> Result<StakeReceipt>
where
    F: FnOnce(u64) -> Result<()>,
    G: FnOnce(u64) -> Result<()>,
{
    require!(amount > 0, StakingError::InvalidAmount);
    require!(!pool.paused, StakingError::PoolPaused);

    let opened = !position.is_open();
    if !opened {
        require_keys_eq!(position.owner, owner, StakingError::Unauthorized);
    }

    let accrual = pool.accrue(now)?;
    let acc = accrual.acc_reward_per_share;
    let pending_reward = position.claimable(acc)?;
    let position_amount = position
        .amount
        .checked_add(amount)
        .ok_or(StakingError::ArithmeticOverflow)?;
    let total_staked = pool
        .total_staked
        .checked_add(amount)
        .ok_or(StakingError::ArithmeticOverflow)?;
    let reward_debt = math::reward_debt(position_amount, acc)?;
    let staker_count = if position.amount == 0 {
        pool.staker_count
            .checked_add(1)
            .ok_or(StakingError::ArithmeticOverflow)?
    } else {
        pool.staker_count
    };
    let fee = pool.stake_fee;
    let fees_collected = pool
        .fees_collected
        .checked_add(fee)
        .ok_or(StakingError::ArithmeticOverflow)?;

    transfer_with(transfer_in, amount)?;
    collect_with(collect_fee, fee)?;

    pool.commit(accrual);
    pool.total_staked = total_staked;
    pool.staker_count = staker_count;
    pool.fees_collected = fees_collected;

    if opened {
        position.owner = owner;
        position.staked_at = now;
    }
    position.amount = position_amount;
    position.pending_reward = pending_reward;
    position.reward_debt = reward_debt;

    Ok(StakeReceipt {
        opened,
        position_amount,
        total_staked,
        fee,
    })
}

/// Withdraw `amount` of stake back to `owner`.
///
/// `caller` is either the owner, who pays the pool's `unstake_fee`, or the
/// pool authority acting for the owner, in which case no fee is charged.
pub fn unstake<F, G>(
    pool: &mut StakingPool,
    position: &mut StakeAccount,
    caller: Pubkey,
    owner: Pubkey,
    amount: u64,
    now: i64,
    transfer_out: F,
    collect_fee: G,
) -> Result<UnstakeReceipt>
where
    F: FnOnce(u64) -> Result<()>,
    G: FnOnce(u64) -> Result<()>,
{
    require!(amount > 0, StakingError::InvalidAmount);
    position.require_owner(&owner)?;
    if caller != owner {
        require_keys_eq!(caller, pool.authority, StakingError::Unauthorized);
    }
    require!(amount <= position.amount, StakingError::InsufficientStake);

    let accrual = pool.accrue(now)?;
    let acc = accrual.acc_reward_per_share;
    let settled_reward = math::accrued_since(position.amount, acc, position.reward_debt)?;
    let pending_reward = position
        .pending_reward
        .checked_add(settled_reward)
        .ok_or(StakingError::ArithmeticOverflow)?;
    let position_amount = position.amount - amount;
    let total_staked = pool
        .total_staked
        .checked_sub(amount)
        .ok_or(StakingError::ArithmeticOverflow)?;
    let reward_debt = math::reward_debt(position_amount, acc)?;
    let staker_count = if position_amount == 0 {
        pool.staker_count.saturating_sub(1)
    } else {
        pool.staker_count
    };
    let fee = if caller == owner { pool.unstake_fee } else { 0 };
    let fees_collected = pool
        .fees_collected
        .checked_add(fee)
        .ok_or(StakingError::ArithmeticOverflow)?;

    collect_with(collect_fee, fee)?;
    transfer_with(transfer_out, amount)?;

    pool.commit(accrual);
    pool.total_staked = total_staked;
    pool.staker_count = staker_count;
    pool.fees_collected = fees_collected;

    position.amount = position_amount;
    position.pending_reward = pending_reward;
    position.reward_debt = reward_debt;

    Ok(UnstakeReceipt {
        position_amount,
        total_staked,
        settled_reward,
        fee,
    })
}

/// Pay out everything the position has earned. A zero claim is an error.
pub fn claim<F>(
    pool: &mut StakingPool,
    position: &mut StakeAccount,
    owner: Pubkey,
    now: i64,
    vault_balance: u64,
    pay_out: F,
) -> Result<u64>
where
    F: FnOnce(u64) -> Result<()>,
{
    position.require_owner(&owner)?;

    let accrual = pool.accrue(now)?;
    let acc = accrual.acc_reward_per_share;
    let claimable = position.claimable(acc)?;
    require!(claimable > 0, StakingError::NothingToClaim);
    require!(claimable <= vault_balance, StakingError::InsufficientRewards);

    let reward_debt = math::reward_debt(position.amount, acc)?;
    let rewards_distributed = pool
        .rewards_distributed
        .checked_add(claimable)
        .ok_or(StakingError::ArithmeticOverflow)?;

    transfer_with(pay_out, claimable)?;

    pool.commit(accrual);
    pool.rewards_distributed = rewards_distributed;

    position.pending_reward = 0;
    position.reward_debt = reward_debt;
    position.last_claim_at = now;

    Ok(claimable)
}

/// Change the emission rate. Accrual up to `now` is closed out at the old rate.
pub fn update_rate(pool: &mut StakingPool, caller: Pubkey, new_rate: u64, now: i64) -> Result<u64> {
    require_keys_eq!(caller, pool.authority, StakingError::Unauthorized);

    pool.advance(now)?;
    let old_rate = pool.reward_rate;
    pool.reward_rate = new_rate;

    Ok(old_rate)
}

/// Change the lamport fees charged on stake and unstake.
pub fn set_fees(pool: &mut StakingPool, caller: Pubkey, stake_fee: u64, unstake_fee: u64) -> Result<()> {
    require_keys_eq!(caller, pool.authority, StakingError::Unauthorized);
    pool.stake_fee = stake_fee;
    pool.unstake_fee = unstake_fee;
    Ok(())
}

/// Deposit reward tokens. Anyone may fund a pool.
pub fn fund_rewards<F>(pool: &mut StakingPool, amount: u64, transfer_in: F) -> Result<()>
where
    F: FnOnce(u64) -> Result<()>,
{
    require!(amount > 0, StakingError::InvalidAmount);
    let rewards_funded = pool
        .rewards_funded
        .checked_add(amount)
        .ok_or(StakingError::ArithmeticOverflow)?;

    transfer_with(transfer_in, amount)?;

    pool.rewards_funded = rewards_funded;
    Ok(())
}

/// Authority pulls unreserved reward tokens back out of the reward vault.
///
/// Rewards emitted up to `now` but not yet claimed belong to stakers and
/// cannot be withdrawn.
pub fn withdraw_rewards<F>(
    pool: &StakingPool,
    caller: Pubkey,
    amount: u64,
    vault_balance: u64,
    now: i64,
    transfer_out: F,
) -> Result<()>
where
    F: FnOnce(u64) -> Result<()>,
{
    require_keys_eq!(caller, pool.authority, StakingError::Unauthorized);
    require!(amount > 0, StakingError::InvalidAmount);

    let reserved = pool.accrue(now)?.reserved_rewards(pool.rewards_distributed)?;
    let required = reserved
        .checked_add(amount as u128)
        .ok_or(StakingError::ArithmeticOverflow)?;
    require!(required <= vault_balance as u128, StakingError::InsufficientRewards);

    transfer_with(transfer_out, amount)
}

/// Authority takes collected fee lamports out of the pool account.
pub fn withdraw_fees<F>(pool: &mut StakingPool, caller: Pubkey, amount: u64, pay_out: F) -> Result<()>
where
    F: FnOnce(u64) -> Result<()>,
{
    require_keys_eq!(caller, pool.authority, StakingError::Unauthorized);
    require!(amount > 0, StakingError::InvalidAmount);
    let fees_collected = pool
        .fees_collected
        .checked_sub(amount)
        .ok_or(StakingError::InsufficientFees)?;

    transfer_with(pay_out, amount)?;

    pool.fees_collected = fees_collected;
    Ok(())
}

pub fn set_paused(pool: &mut StakingPool, caller: Pubkey, paused: bool) -> Result<()> {
    require_keys_eq!(caller, pool.authority, StakingError::Unauthorized);
    pool.paused = paused;
    Ok(())
}

pub fn transfer_authority(pool: &mut StakingPool, caller: Pubkey, new_authority: Pubkey) -> Result<()> {
    require_keys_eq!(caller, pool.authority, StakingError::Unauthorized);
    require_keys_neq!(new_authority, Pubkey::default(), StakingError::InvalidAuthority);
    pool.authority = new_authority;
    Ok(())
}

/// Check that the position may be closed and its rent returned to `owner`.
pub fn close_position(position: &StakeAccount, owner: Pubkey) -> Result<()> {
    position.require_owner(&owner)?;
    require!(position.is_empty(), StakingError::PositionNotEmpty);
    Ok(())
}
