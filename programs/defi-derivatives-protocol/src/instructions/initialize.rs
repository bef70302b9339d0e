use {crate::state::ProtocolState, anchor_lang::prelude::*};

/// Initialize the protocol state singleton
pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
    let state = &mut ctx.accounts.state;

    state.admin = ctx.accounts.admin.key();
    state.bump = ctx.bumps.state;

    msg!("Protocol initialized");
    msg!("Admin: {}", state.admin);

    Ok(())
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = admin,
        space = ProtocolState::LEN,
        seeds = [b"state"],
        bump
    )]
    pub state: Account<'info, ProtocolState>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}
