use anchor_lang::prelude::*;
use anchor_lang::solana_program::{program::invoke, system_instruction};
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use crate::constants::*;
use crate::engine;
use crate::errors::StakingError;
use crate::events::Staked;
use crate::state::{StakingPool, StakeAccount};

#[derive(Accounts)]
pub struct Stake<'info> {
    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.stake_mint.as_ref()],
        bump = staking_pool.bump,
        has_one = stake_vault @ StakingError::InvalidVault
    )]
    pub staking_pool: Account<'info, StakingPool>,
    
    #[account(
        init_if_needed,
        payer = user,
        space = StakeAccount::SIZE,
        seeds = [STAKE_ACCOUNT_SEED, staking_pool.key().as_ref(), user.key().as_ref()],
        bump
    )]
    pub stake_account: Account<'info, StakeAccount>,
    
    #[account(
        mut,
        constraint = user_token_account.mint == staking_pool.stake_mint,
        constraint = user_token_account.owner == user.key()
    )]
    pub user_token_account: Account<'info, TokenAccount>,
    
    #[account(mut)]
    pub stake_vault: Account<'info, TokenAccount>,
    
    #[account(mut)]
    pub user: Signer<'info>,
    
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Stake>, amount: u64) -> Result<()> {
    let pool_key = ctx.accounts.staking_pool.key();
    let user = ctx.accounts.user.key();
    let clock = Clock::get()?;
    
    let cpi_program = ctx.accounts.token_program.to_account_info();
    let cpi_accounts = Transfer {
        from: ctx.accounts.user_token_account.to_account_info(),
        to: ctx.accounts.stake_vault.to_account_info(),
        authority: ctx.accounts.user.to_account_info(),
    };
    
    // Stake fee is paid in lamports into the pool account
    let fee_payer = ctx.accounts.user.to_account_info();
    let fee_receiver = ctx.accounts.staking_pool.to_account_info();
    let system_program = ctx.accounts.system_program.to_account_info();
    
    let pool = &mut ctx.accounts.staking_pool;
    let stake_account = &mut ctx.accounts.stake_account;
    
    // Transfer tokens from user to pool
    let receipt = engine::stake(
        pool,
        stake_account,
        user,
        amount,
        clock.unix_timestamp,
        move |amount| token::transfer(CpiContext::new(cpi_program, cpi_accounts), amount),
        move |fee| {
            invoke(
                &system_instruction::transfer(fee_payer.key, fee_receiver.key, fee),
                &[fee_payer, fee_receiver, system_program],
            )
            .map_err(Into::into)
        },
    )?;
    
    if receipt.opened {
        stake_account.pool = pool_key;
        stake_account.bump = ctx.bumps.stake_account;
    }
    
    emit!(Staked {
        pool: pool_key,
        user,
        amount,
        new_total_staked: receipt.position_amount,
        pool_total_staked: receipt.total_staked,
        fee: receipt.fee,
        timestamp: clock.unix_timestamp,
    });
    
    msg!("Staked {} tokens", amount);
    msg!("Total staked: {}", receipt.position_amount);
    if receipt.fee > 0 {
        msg!("Stake fee: {} lamports", receipt.fee);
    }
    
    Ok(())
}
