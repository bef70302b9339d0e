//! CloseOption instruction handler
//!
//! Lets the creator wind down a settled contract. Once the option has been
//! exercised, or has expired unexercised, any remaining escrow balance is
//! returned to the creator, the escrow token account is closed, and the
//! contract account rent is refunded via the `close = creator` constraint.

use {
    crate::{error::ProtocolError, state::OptionContract},
    anchor_lang::prelude::*,
    anchor_spl::token::{Token, TokenAccount},
};

/// Accounts required for closing an option contract
#[derive(Accounts)]
pub struct CloseOption<'info> {
    /// Option writer (signer, receives escrow balance and rent)
    #[account(mut)]
    pub creator: Signer<'info>,

    /// Option contract to close
    #[account(
        mut,
        has_one = creator,
        seeds = [b"option_contract",
                 option_contract.creator.as_ref()],
        bump = option_contract.bump,
        close = creator
    )]
    pub option_contract: Box<Account<'info, OptionContract>>,

    /// Escrow token account to drain and close
    #[account(
        mut,
        seeds = [b"escrow",
                 option_contract.key().as_ref()],
        bump
    )]
    pub escrow_account: Box<Account<'info, TokenAccount>>,

    /// Creator's token account receiving any remaining underlying
    #[account(
        mut,
        constraint = creator_underlying_account.owner == creator.key(),
        constraint = creator_underlying_account.mint == option_contract.underlying_asset_mint
    )]
    pub creator_underlying_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

/// Close a settled or expired option and reclaim the escrow
pub fn close_option(ctx: Context<CloseOption>) -> Result<()> {
    let current_timestamp = Clock::get()?.unix_timestamp;
    require!(
        ctx.accounts.option_contract.is_exercised
            || ctx.accounts.option_contract.is_expired(current_timestamp),
        ProtocolError::OptionNotExpired
    );

    let escrow_balance = ctx.accounts.escrow_account.amount;
    if escrow_balance > 0 {
        msg!("Return escrowed tokens: {}", escrow_balance);
        ctx.accounts.option_contract.transfer_from_escrow(
            ctx.accounts.escrow_account.to_account_info(),
            ctx.accounts.creator_underlying_account.to_account_info(),
            ctx.accounts.option_contract.to_account_info(),
            ctx.accounts.token_program.to_account_info(),
            escrow_balance,
        )?;
    }

    msg!("Close escrow account");
    ctx.accounts.option_contract.close_escrow(
        ctx.accounts.creator.to_account_info(),
        ctx.accounts.escrow_account.to_account_info(),
        ctx.accounts.option_contract.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
    )?;

    Ok(())
}
