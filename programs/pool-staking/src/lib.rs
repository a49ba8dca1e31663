use anchor_lang::prelude::*;

pub mod constants;
pub mod engine;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod math;
pub mod state;

use instructions::*;

declare_id!("PooLStake1111111111111111111111111111111111");

/// Pool Staking Program
///
/// Stakers deposit tokens into a shared pool and earn rewards emitted at a
/// fixed rate per second, split in proportion to stake. Accrual is lazy:
/// every instruction advances the pool accumulator before touching a position.
#[program]
pub mod pool_staking {
    use super::*;

    /// Create a staking pool for a mint
    pub fn initialize_pool(
        ctx: Context<InitializePool>,
        reward_rate: u64,
        stake_fee: u64,
        unstake_fee: u64,
    ) -> Result<()> {
        instructions::initialize::handler(ctx, reward_rate, stake_fee, unstake_fee)
    }

    /// Stake tokens into a pool
    pub fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
        instructions::stake::handler(ctx, amount)
    }

    /// Unstake tokens from a pool, as the staker or as the pool authority
    pub fn unstake(ctx: Context<Unstake>, amount: u64) -> Result<()> {
        instructions::unstake::handler(ctx, amount)
    }

    /// Claim accumulated rewards
    pub fn claim_rewards(ctx: Context<ClaimRewards>) -> Result<()> {
        instructions::claim::handler(ctx)
    }

    /// Change the reward emission rate (authority only)
    pub fn update_rate(ctx: Context<UpdateRate>, new_rate: u64) -> Result<()> {
        instructions::update_rate::handler(ctx, new_rate)
    }

    /// Advance the reward accumulator (permissionless crank)
    pub fn update_rewards(ctx: Context<UpdateRewards>) -> Result<()> {
        instructions::update_rewards::handler(ctx)
    }

    /// Deposit reward tokens into the pool's reward vault
    pub fn fund_rewards(ctx: Context<FundRewards>, amount: u64) -> Result<()> {
        instructions::fund_rewards::handler(ctx, amount)
    }

    /// Withdraw reward tokens from the reward vault (authority only)
    pub fn withdraw_rewards(ctx: Context<WithdrawRewards>, amount: u64) -> Result<()> {
        instructions::withdraw_rewards::handler(ctx, amount)
    }

    /// Change the lamport fees charged on stake and unstake (authority only)
    pub fn set_fees(ctx: Context<SetFees>, stake_fee: u64, unstake_fee: u64) -> Result<()> {
        instructions::set_fees::handler(ctx, stake_fee, unstake_fee)
    }

    /// Withdraw collected fee lamports from the pool account (authority only)
    pub fn withdraw_fees(ctx: Context<WithdrawFees>, amount: u64) -> Result<()> {
        instructions::withdraw_fees::handler(ctx, amount)
    }

    /// Pause or resume staking (authority only)
    pub fn set_paused(ctx: Context<SetPaused>, paused: bool) -> Result<()> {
        instructions::set_paused::handler(ctx, paused)
    }

    /// Hand the pool over to a new authority
    pub fn transfer_authority(ctx: Context<TransferAuthority>, new_authority: Pubkey) -> Result<()> {
        instructions::transfer_authority::handler(ctx, new_authority)
    }

    /// Close an emptied stake account and reclaim its rent
    pub fn close_stake_account(ctx: Context<CloseStakeAccount>) -> Result<()> {
        instructions::close_stake_account::handler(ctx)
    }
}
