//! Option contract state
//!
//! Defines the `OptionContract` account and the escrow CPI helpers that sign
//! with the contract PDA. The contract PDA is derived from
//! `[b"option_contract", creator]`, so each creator holds at most one live
//! option; `close_option` frees the slot. The PDA is also the authority over
//! the escrow token account holding the underlying.

use {
    crate::error::ProtocolError,
    anchor_lang::prelude::*,
    anchor_spl::token::Transfer,
};

/// Option contract account - one covered call written by `creator`
#[account]
#[derive(Default, Debug)]
pub struct OptionContract {
    /// Wallet that wrote the option and escrowed the underlying
    pub creator: Pubkey,
    /// Mint of the escrowed underlying token
    pub underlying_asset_mint: Pubkey,
    /// Mint of the token the strike is paid in
    pub strike_asset_mint: Pubkey,
    /// Strike amount payable to the creator on exercise (strike token units)
    pub strike_price: u64,
    /// Unix timestamp after which the option can no longer be exercised
    pub expiration: i64,
    /// Whether the option has been exercised
    pub is_exercised: bool,
    /// Premium computed at creation (underlying price units)
    pub option_price: u64,
    /// Amount of underlying tokens escrowed
    pub amount: u64,
    /// Bump seed for the contract PDA
    pub bump: u8,
}

impl OptionContract {
    /// Account size in bytes (8 byte discriminator + data)
    pub const LEN: usize = 8 + std::mem::size_of::<OptionContract>();

    /// An option is expired strictly after its expiration timestamp;
    /// it remains exercisable at the timestamp itself.
    pub fn is_expired(&self, current_time: i64) -> bool {
        current_time > self.expiration
    }

    /// Validate the terms of a new option before it is recorded
    pub fn validate_terms(
        strike_price: u64,
        amount: u64,
        expiration: i64,
        current_time: i64,
    ) -> Result<()> {
        require!(amount > 0 && strike_price > 0, ProtocolError::InvalidAmount);
        require!(expiration > current_time, ProtocolError::InvalidExpiration);
        Ok(())
    }

    /// Check that the option can be exercised now by a holder with
    /// `strike_balance` strike tokens
    pub fn check_exercisable(&self, current_time: i64, strike_balance: u64) -> Result<()> {
        require!(!self.is_exercised, ProtocolError::OptionAlreadyExercised);
        require!(
            !self.is_expired(current_time),
            ProtocolError::OptionExpired
        );
        require!(
            strike_balance >= self.strike_price,
            ProtocolError::InsufficientFunds
        );
        Ok(())
    }

    /// Transfer tokens out of the escrow, signing with the contract PDA
    ///
    /// # Arguments
    /// * `from` - Escrow token account
    /// * `to` - Destination token account
    /// * `authority` - The contract account itself (escrow authority)
    /// * `token_program` - Token program account
    /// * `amount` - Amount of tokens to transfer
    pub fn transfer_from_escrow<'info>(
        &self,
        from: AccountInfo<'info>,
        to: AccountInfo<'info>,
        authority: AccountInfo<'info>,
        token_program: AccountInfo<'info>,
        amount: u64,
    ) -> Result<()> {
        let authority_seeds: &[&[&[u8]]] =
            &[&[b"option_contract", self.creator.as_ref(), &[self.bump]]];

        let context = CpiContext::new(
            token_program,
            Transfer {
                from,
                to,
                authority,
            },
        )
        .with_signer(authority_seeds);

        anchor_spl::token::transfer(context, amount)
    }

    /// Close the escrow token account and send its rent to `receiver`,
    /// signing with the contract PDA
    pub fn close_escrow<'info>(
        &self,
        receiver: AccountInfo<'info>,
        escrow: AccountInfo<'info>,
        authority: AccountInfo<'info>,
        token_program: AccountInfo<'info>,
    ) -> Result<()> {
        let authority_seeds: &[&[&[u8]]] =
            &[&[b"option_contract", self.creator.as_ref(), &[self.bump]]];

        let cpi_accounts = anchor_spl::token::CloseAccount {
            account: escrow,
            destination: receiver,
            authority,
        };
        let cpi_context = CpiContext::new(token_program, cpi_accounts);

        anchor_spl::token::close_account(cpi_context.with_signer(authority_seeds))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_expiration_boundary() {
        let contract = OptionContract {
            expiration: 1_700_000_000,
            ..OptionContract::default()
        };

        assert!(!contract.is_expired(1_699_999_999));
        // still exercisable exactly at expiration
        assert!(!contract.is_expired(1_700_000_000));
        assert!(contract.is_expired(1_700_000_001));
    }

    #[test]
    fn test_validate_terms() {
        assert!(OptionContract::validate_terms(50, 10, 2_000, 1_000).is_ok());
        assert_eq!(
            OptionContract::validate_terms(50, 0, 2_000, 1_000).unwrap_err(),
            ProtocolError::InvalidAmount.into()
        );
        assert_eq!(
            OptionContract::validate_terms(0, 10, 2_000, 1_000).unwrap_err(),
            ProtocolError::InvalidAmount.into()
        );
        // expiration equal to the current time is rejected
        assert_eq!(
            OptionContract::validate_terms(50, 10, 1_000, 1_000).unwrap_err(),
            ProtocolError::InvalidExpiration.into()
        );
    }

    #[test]
    fn test_check_exercisable() {
        let contract = OptionContract {
            strike_price: 500,
            expiration: 1_700_000_000,
            ..OptionContract::default()
        };

        assert!(contract.check_exercisable(1_699_000_000, 500).is_ok());
        assert_eq!(
            contract.check_exercisable(1_699_000_000, 499).unwrap_err(),
            ProtocolError::InsufficientFunds.into()
        );
        assert_eq!(
            contract.check_exercisable(1_700_000_001, 500).unwrap_err(),
            ProtocolError::OptionExpired.into()
        );

        let exercised = OptionContract {
            is_exercised: true,
            ..contract
        };
        assert_eq!(
            exercised.check_exercisable(1_699_000_000, 500).unwrap_err(),
            ProtocolError::OptionAlreadyExercised.into()
        );
    }

    #[test]
    fn test_account_len_covers_fields() {
        // discriminator + three pubkeys + three u64 + i64 + bool + bump
        assert!(OptionContract::LEN >= 8 + 32 * 3 + 8 * 3 + 8 + 1 + 1);
    }
}
