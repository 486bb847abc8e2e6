//! Input parsing helpers

use std::str::FromStr;

use solana_sdk::pubkey::Pubkey;

use crate::core::messages;
use crate::error::{SdkError, SdkResult};

/// Parse a base58 account address typed by the user.
///
/// `label` names the field in the error, e.g. "Mint address".
pub fn parse_address(label: &str, input: &str) -> SdkResult<Pubkey> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SdkError::Validation(format!("{} is required", label)));
    }
    Pubkey::from_str(trimmed)
        .map_err(|_| SdkError::Validation(format!("{} is not a valid address: {}", label, trimmed)))
}

/// Refuse zero, negative or non-numeric amounts before anything touches the
/// ledger. Precision is checked later against the mint's decimals.
pub fn check_positive_amount(input: &str) -> SdkResult<()> {
    let positive = input
        .trim()
        .parse::<f64>()
        .map(|value| value.is_finite() && value > 0.0)
        .unwrap_or(false);
    if !positive {
        return Err(SdkError::Validation(messages::INVALID_TRANSFER_FIELDS.to_string()));
    }
    Ok(())
}

/// Convert a decimal amount like `"12.5"` into base units for a mint with
/// `decimals` places. Zero is refused.
pub fn parse_ui_amount(input: &str, decimals: u8) -> SdkResult<u64> {
    let trimmed = input.trim();
    let amount = spl_token::try_ui_amount_into_amount(trimmed.to_string(), decimals)
        .map_err(|_| SdkError::Validation(format!("Invalid amount: {}", trimmed)))?;
    if amount == 0 {
        return Err(SdkError::Validation("Amount must be greater than zero".to_string()));
    }
    Ok(amount)
}

/// Base units rendered with trailing zeros trimmed
pub fn format_ui_amount(amount: u64, decimals: u8) -> String {
    spl_token::amount_to_ui_amount_string_trimmed(amount, decimals)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_is_trimmed_and_parsed() {
        let key = Pubkey::new_unique();
        let parsed = parse_address("Mint address", &format!("  {}\n", key)).unwrap();
        assert_eq!(parsed, key);
    }

    #[test]
    fn empty_or_malformed_address_is_a_validation_error() {
        match parse_address("Recipient address", "   ") {
            Err(SdkError::Validation(msg)) => assert_eq!(msg, "Recipient address is required"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(
            parse_address("Mint address", "not-base58-0OIl"),
            Err(SdkError::Validation(_))
        ));
    }

    #[test]
    fn ui_amount_scales_by_decimals() {
        assert_eq!(parse_ui_amount("1", 6).unwrap(), 1_000_000);
        assert_eq!(parse_ui_amount("12.5", 2).unwrap(), 1_250);
        assert_eq!(parse_ui_amount("42", 0).unwrap(), 42);
    }

    #[test]
    fn ui_amount_rejects_zero_negative_and_excess_precision() {
        assert!(parse_ui_amount("0", 6).is_err());
        assert!(parse_ui_amount("-3", 6).is_err());
        assert!(parse_ui_amount("abc", 6).is_err());
        assert!(parse_ui_amount("0.001", 2).is_err());
    }

    #[test]
    fn positive_amount_check_needs_no_decimals() {
        assert!(check_positive_amount("40.5").is_ok());
        assert!(check_positive_amount(" 0.000000001 ").is_ok());
        for input in ["0", "-1", "0.0", "", "abc", "inf", "NaN"] {
            match check_positive_amount(input) {
                Err(SdkError::Validation(msg)) => assert_eq!(msg, messages::INVALID_TRANSFER_FIELDS),
                other => panic!("{input:?} gave {other:?}"),
            }
        }
    }

    #[test]
    fn ui_amount_formatting_trims_zeros() {
        assert_eq!(format_ui_amount(1_500_000, 6), "1.5");
        assert_eq!(format_ui_amount(7, 0), "7");
    }
}
