//! ExerciseOption instruction handler
//!
//! Settles an option: the exerciser pays the strike amount to the creator's
//! strike token account and receives the escrowed underlying. The escrow
//! transfer is signed by the contract PDA. A contract can be exercised once,
//! any time up to and including its expiration timestamp.

use {
    crate::state::OptionContract,
    anchor_lang::prelude::*,
    anchor_spl::token::{Token, TokenAccount, Transfer},
};

/// Accounts required for exercising an option
#[derive(Accounts)]
pub struct ExerciseOption<'info> {
    /// Exerciser (signer, pays the strike)
    #[account(mut)]
    pub exerciser: Signer<'info>,

    /// Option contract being exercised
    #[account(
        mut,
        seeds = [b"option_contract",
                 option_contract.creator.as_ref()],
        bump = option_contract.bump
    )]
    pub option_contract: Box<Account<'info, OptionContract>>,

    /// Escrow token account holding the underlying
    #[account(
        mut,
        seeds = [b"escrow",
                 option_contract.key().as_ref()],
        bump
    )]
    pub escrow_account: Box<Account<'info, TokenAccount>>,

    /// Creator's strike token account (receives the strike payment)
    #[account(
        mut,
        constraint = creator_strike_account.owner == option_contract.creator,
        constraint = creator_strike_account.mint == option_contract.strike_asset_mint
    )]
    pub creator_strike_account: Box<Account<'info, TokenAccount>>,

    /// Exerciser's strike token account (pays the strike)
    #[account(
        mut,
        constraint = exerciser_strike_account.owner == exerciser.key(),
        constraint = exerciser_strike_account.mint == option_contract.strike_asset_mint
    )]
    pub exerciser_strike_account: Box<Account<'info, TokenAccount>>,

    /// Exerciser's underlying token account (receives the escrowed tokens)
    #[account(
        mut,
        constraint = exerciser_underlying_account.owner == exerciser.key(),
        constraint = exerciser_underlying_account.mint == option_contract.underlying_asset_mint
    )]
    pub exerciser_underlying_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

/// Exercise an option: pay the strike, receive the underlying
pub fn exercise_option(ctx: Context<ExerciseOption>) -> Result<()> {
    msg!("Check option state");
    let current_timestamp = Clock::get()?.unix_timestamp;
    ctx.accounts.option_contract.check_exercisable(
        current_timestamp,
        ctx.accounts.exerciser_strike_account.amount,
    )?;

    msg!("Transfer strike payment to creator");
    let cpi_ctx_strike = CpiContext::new(
        ctx.accounts.token_program.to_account_info(),
        Transfer {
            from: ctx.accounts.exerciser_strike_account.to_account_info(),
            to: ctx.accounts.creator_strike_account.to_account_info(),
            authority: ctx.accounts.exerciser.to_account_info(),
        },
    );
    anchor_spl::token::transfer(cpi_ctx_strike, ctx.accounts.option_contract.strike_price)?;

    msg!("Deliver underlying from escrow");
    ctx.accounts.option_contract.transfer_from_escrow(
        ctx.accounts.escrow_account.to_account_info(),
        ctx.accounts.exerciser_underlying_account.to_account_info(),
        ctx.accounts.option_contract.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.option_contract.amount,
    )?;

    let option_contract = ctx.accounts.option_contract.as_mut();
    option_contract.is_exercised = true;

    Ok(())
}
