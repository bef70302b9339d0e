//! Checked arithmetic helpers
//!
//! All on-chain arithmetic goes through these wrappers so that overflow,
//! underflow, and division by zero surface as `ProtocolError::MathOverflow`
//! instead of aborting the transaction with a panic.

use {crate::error::ProtocolError, anchor_lang::prelude::*, std::fmt::Display};

pub fn checked_add<T>(arg1: T, arg2: T) -> Result<T>
where
    T: num_traits::CheckedAdd + Display,
{
    if let Some(res) = arg1.checked_add(&arg2) {
        Ok(res)
    } else {
        msg!("Error: Overflow in {} + {}", arg1, arg2);
        err!(ProtocolError::MathOverflow)
    }
}

pub fn checked_sub<T>(arg1: T, arg2: T) -> Result<T>
where
    T: num_traits::CheckedSub + Display,
{
    if let Some(res) = arg1.checked_sub(&arg2) {
        Ok(res)
    } else {
        msg!("Error: Overflow in {} - {}", arg1, arg2);
        err!(ProtocolError::MathOverflow)
    }
}

pub fn checked_mul<T>(arg1: T, arg2: T) -> Result<T>
where
    T: num_traits::CheckedMul + Display,
{
    if let Some(res) = arg1.checked_mul(&arg2) {
        Ok(res)
    } else {
        msg!("Error: Overflow in {} * {}", arg1, arg2);
        err!(ProtocolError::MathOverflow)
    }
}

pub fn checked_div<T>(arg1: T, arg2: T) -> Result<T>
where
    T: num_traits::CheckedDiv + Display,
{
    if let Some(res) = arg1.checked_div(&arg2) {
        Ok(res)
    } else {
        msg!("Error: Overflow in {} / {}", arg1, arg2);
        err!(ProtocolError::MathOverflow)
    }
}

pub fn checked_as_u64<T>(arg: T) -> Result<u64>
where
    T: Display + num_traits::ToPrimitive + Clone,
{
    let option: Option<u64> = num_traits::NumCast::from(arg.clone());
    if let Some(res) = option {
        Ok(res)
    } else {
        msg!("Error: Overflow in {} as u64", arg);
        err!(ProtocolError::MathOverflow)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_checked_add() {
        assert_eq!(checked_add(2u64, 3u64).unwrap(), 5);
        assert!(checked_add(u64::MAX, 1u64).is_err());
    }

    #[test]
    fn test_checked_sub() {
        assert_eq!(checked_sub(5i128, 7i128).unwrap(), -2);
        assert!(checked_sub(0u64, 1u64).is_err());
    }

    #[test]
    fn test_checked_div_by_zero() {
        assert!(checked_div(1u64, 0u64).is_err());
        assert_eq!(checked_div(-7i128, 2i128).unwrap(), -3);
    }

    #[test]
    fn test_checked_as_u64() {
        assert_eq!(checked_as_u64(42i128).unwrap(), 42);
        assert!(checked_as_u64(-1i128).is_err());
        assert!(checked_as_u64(u128::MAX).is_err());
    }
}
