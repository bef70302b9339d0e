//! CreateOption instruction handler
//!
//! A creator writes a covered call: the underlying tokens are escrowed in a
//! program-owned token account, a premium is computed on-chain from the
//! caller-supplied market parameters, and the contract terms are recorded in
//! an `OptionContract` PDA.

use {
    crate::{math, pricing, state::OptionContract},
    anchor_lang::prelude::*,
    anchor_spl::token::{Mint, Token, TokenAccount, Transfer},
};

/// Accounts required for writing a new option
#[derive(Accounts)]
pub struct CreateOption<'info> {
    /// Option writer (signer, pays for account creation and escrows tokens)
    #[account(mut)]
    pub creator: Signer<'info>,

    /// New option contract account (PDA derived from the creator)
    #[account(
        init,
        payer = creator,
        space = OptionContract::LEN,
        seeds = [b"option_contract",
                 creator.key().as_ref()],
        bump
    )]
    pub option_contract: Box<Account<'info, OptionContract>>,

    /// Creator's token account the underlying is escrowed from
    #[account(
        mut,
        constraint = creator_underlying_account.owner == creator.key(),
        constraint = creator_underlying_account.mint == underlying_asset_mint.key()
    )]
    pub creator_underlying_account: Box<Account<'info, TokenAccount>>,

    /// Escrow token account holding the underlying until exercise or expiry
    ///
    /// Authority is the option contract PDA.
    #[account(
        init,
        payer = creator,
        seeds = [b"escrow",
                 option_contract.key().as_ref()],
        bump,
        token::mint = underlying_asset_mint,
        token::authority = option_contract
    )]
    pub escrow_account: Box<Account<'info, TokenAccount>>,

    /// Mint of the underlying asset
    pub underlying_asset_mint: Box<Account<'info, Mint>>,

    /// Mint the strike is denominated in
    pub strike_asset_mint: Box<Account<'info, Mint>>,

    /// Creator's token account that will receive the strike payment
    /// if the option is exercised
    #[account(
        constraint = creator_strike_account.owner == creator.key(),
        constraint = creator_strike_account.mint == strike_asset_mint.key()
    )]
    pub creator_strike_account: Box<Account<'info, TokenAccount>>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

/// Parameters for writing a new option
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy)]
pub struct CreateOptionParams {
    /// Strike amount payable on exercise (strike token units)
    pub strike_price: u64,
    /// Unix timestamp the option expires at
    pub expiration: i64,
    /// Current price of the underlying (smallest units)
    pub current_price: u64,
    /// Annualized risk-free rate scaled by 1e6
    pub risk_free_rate: u64,
    /// Annualized volatility scaled by 1e6
    pub volatility: u64,
    /// Amount of underlying tokens to escrow
    pub amount: u64,
}

/// Write a new covered call option
pub fn create_option(ctx: Context<CreateOption>, params: &CreateOptionParams) -> Result<()> {
    msg!("Validate inputs");
    let current_timestamp = Clock::get()?.unix_timestamp;
    OptionContract::validate_terms(
        params.strike_price,
        params.amount,
        params.expiration,
        current_timestamp,
    )?;
    let seconds_to_expiry =
        math::checked_as_u64(math::checked_sub(params.expiration, current_timestamp)?)?;

    let option_price = pricing::black_scholes_call(
        params.current_price,
        params.strike_price,
        seconds_to_expiry,
        params.risk_free_rate,
        params.volatility,
    )?;
    msg!("Option premium: {}", option_price);

    msg!("Record option contract");
    let option_contract = ctx.accounts.option_contract.as_mut();
    option_contract.creator = ctx.accounts.creator.key();
    option_contract.underlying_asset_mint = ctx.accounts.underlying_asset_mint.key();
    option_contract.strike_asset_mint = ctx.accounts.strike_asset_mint.key();
    option_contract.strike_price = params.strike_price;
    option_contract.expiration = params.expiration;
    option_contract.is_exercised = false;
    option_contract.option_price = option_price;
    option_contract.amount = params.amount;
    option_contract.bump = ctx.bumps.option_contract;

    msg!("Escrow underlying tokens");
    let cpi_ctx = CpiContext::new(
        ctx.accounts.token_program.to_account_info(),
        Transfer {
            from: ctx.accounts.creator_underlying_account.to_account_info(),
            to: ctx.accounts.escrow_account.to_account_info(),
            authority: ctx.accounts.creator.to_account_info(),
        },
    );
    anchor_spl::token::transfer(cpi_ctx, params.amount)?;

    Ok(())
}
