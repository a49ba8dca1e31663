use anchor_lang::prelude::*;
use anchor_lang::solana_program::{program::invoke, system_instruction};
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use crate::constants::*;
use crate::engine;
use crate::errors::StakingError;
use crate::events::Unstaked;
use crate::state::{StakingPool, StakeAccount};

#[derive(Accounts)]
pub struct Unstake<'info> {
    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.stake_mint.as_ref()],
        bump = staking_pool.bump,
        has_one = stake_vault @ StakingError::InvalidVault
    )]
    pub staking_pool: Account<'info, StakingPool>,
    
    #[account(
        mut,
        seeds = [STAKE_ACCOUNT_SEED, staking_pool.key().as_ref(), staker.key().as_ref()],
        bump = stake_account.bump
    )]
    pub stake_account: Account<'info, StakeAccount>,
    
    #[account(
        mut,
        constraint = staker_token_account.mint == staking_pool.stake_mint,
        constraint = staker_token_account.owner == staker.key()
    )]
    pub staker_token_account: Account<'info, TokenAccount>,
    
    #[account(mut)]
    pub stake_vault: Account<'info, TokenAccount>,
    
    /// CHECK: Pool authority for signing transfers
    #[account(
        seeds = [POOL_AUTHORITY_SEED, staking_pool.key().as_ref()],
        bump = staking_pool.authority_bump
    )]
    pub pool_authority: UncheckedAccount<'info>,
    
    /// Owner of the position. Equal to `signer` unless the pool authority is
    /// unstaking on the owner's behalf.
    pub staker: SystemAccount<'info>,
    
    /// The staker, or the pool authority
    #[account(mut)]
    pub signer: Signer<'info>,
    
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Unstake>, amount: u64) -> Result<()> {
    let pool_key = ctx.accounts.staking_pool.key();
    let staker = ctx.accounts.staker.key();
    let signer = ctx.accounts.signer.key();
    let clock = Clock::get()?;
    
    // Transfer tokens back to the staker
    let authority_bump = [ctx.accounts.staking_pool.authority_bump];
    let seeds: &[&[u8]] = &[POOL_AUTHORITY_SEED, pool_key.as_ref(), &authority_bump];
    let signer_seeds = &[seeds];
    
    let cpi_program = ctx.accounts.token_program.to_account_info();
    let cpi_accounts = Transfer {
        from: ctx.accounts.stake_vault.to_account_info(),
        to: ctx.accounts.staker_token_account.to_account_info(),
        authority: ctx.accounts.pool_authority.to_account_info(),
    };
    
    // Only charged when the staker signs, so the payer is the staker
    let fee_payer = ctx.accounts.signer.to_account_info();
    let fee_receiver = ctx.accounts.staking_pool.to_account_info();
    let system_program = ctx.accounts.system_program.to_account_info();
    
    let pool = &mut ctx.accounts.staking_pool;
    let stake_account = &mut ctx.accounts.stake_account;
    
    let receipt = engine::unstake(
        pool,
        stake_account,
        signer,
        staker,
        amount,
        clock.unix_timestamp,
        move |amount| {
            token::transfer(
                CpiContext::new_with_signer(cpi_program, cpi_accounts, signer_seeds),
                amount,
            )
        },
        move |fee| {
            invoke(
                &system_instruction::transfer(fee_payer.key, fee_receiver.key, fee),
                &[fee_payer, fee_receiver, system_program],
            )
            .map_err(Into::into)
        },
    )?;
    
    emit!(Unstaked {
        pool: pool_key,
        user: staker,
        signer,
        amount,
        rewards_settled: receipt.settled_reward,
        remaining_stake: receipt.position_amount,
        pool_total_staked: receipt.total_staked,
        fee: receipt.fee,
        timestamp: clock.unix_timestamp,
    });
    
    msg!("Unstaked {} tokens", amount);
    msg!("Remaining: {}", receipt.position_amount);
    if signer != staker {
        msg!("Unstaked by pool authority {}", signer);
    }
    
    Ok(())
}
