use crate::model::validation::ValidationError;

/**
 * Number of digits in an OIB, including the control digit.
 */
pub const OIB_LENGTH: usize = 11;

/**
 * Validates a Croatian personal identification number (OIB).
 *
 * The last digit is a control digit computed over the first ten with the ISO 7064 MOD 11,10 scheme.
 *
 * # Arguments
 * `oib`: The identifier to validate, already trimmed.
 *
 * # Returns
 * `Ok(())` if valid, otherwise `InvalidLength`, `InvalidCharacters` or `InvalidChecksum`.
 */
pub fn validate_oib(oib: &str) -> Result<(), ValidationError> {
    if oib.chars().count() != OIB_LENGTH {
        return Err(ValidationError::InvalidLength);
    }
    if !oib.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(ValidationError::InvalidCharacters);
    }
    let digits: Vec<u8> = oib.bytes().map(|byte| byte - b'0').collect();
    let (prefix, control) = digits.split_at(OIB_LENGTH - 1);
    let prefix: [u8; OIB_LENGTH - 1] = prefix.try_into().map_err(|_| ValidationError::InvalidLength)?;
    if control.first() != Some(&control_digit(&prefix)) {
        return Err(ValidationError::InvalidChecksum);
    }
    Ok(())
}

/**
 * Computes the control digit for the first ten digits of an OIB.
 *
 * # Arguments
 * `prefix`: Ten digit values in the range 0-9.
 *
 * # Returns
 * The expected eleventh digit.
 */
pub fn control_digit(prefix: &[u8; OIB_LENGTH - 1]) -> u8 {
    let mut sum: u8 = 10;
    for digit in prefix {
        sum = (sum + digit) % 10;
        if sum == 0 {
            sum = 10;
        }
        sum = (sum * 2) % 11;
    }
    match 11 - sum {
        10 => 0,
        check => check,
    }
}

#[cfg(test)]
pub mod test {
    use super::*;

    /**
     * Builds a valid OIB from a ten digit seed.
     */
    pub fn make_oib(seed: u64) -> String {
        let prefix_str = format!("{:010}", seed % 10_000_000_000);
        let mut prefix = [0u8; 10];
        for (slot, byte) in prefix.iter_mut().zip(prefix_str.bytes()) {
            *slot = byte - b'0';
        }
        format!("{prefix_str}{}", control_digit(&prefix))
    }

    #[test]
    fn test_wrong_length() {
        for oib in ["", "12345", "1234567890", "123456789012", "           0"] {
            assert_eq!(validate_oib(oib), Err(ValidationError::InvalidLength), "{oib}");
        }
    }

    #[test]
    fn test_non_digits() {
        for oib in ["1234567890a", "a2345678901", "12345 78901", "１2345678901"] {
            assert!(matches!(validate_oib(oib), Err(ValidationError::InvalidCharacters) | Err(ValidationError::InvalidLength)), "{oib}");
        }
        assert_eq!(validate_oib("1234567890a"), Err(ValidationError::InvalidCharacters));
        assert_eq!(validate_oib("-1234567890"), Err(ValidationError::InvalidCharacters));
    }

    #[test]
    fn test_wrong_checksum() {
        assert_eq!(validate_oib("12345678901"), Err(ValidationError::InvalidChecksum));
        assert_eq!(validate_oib("12345678900"), Err(ValidationError::InvalidChecksum));
    }

    #[test]
    fn test_known_valid() {
        // 1234567890 -> control digit 3
        assert_eq!(control_digit(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 0]), 3);
        assert!(validate_oib("12345678903").is_ok());
        assert!(validate_oib("00000000001").is_ok());
        assert!(validate_oib("69435151530").is_ok());
    }

    #[test]
    fn test_exactly_one_control_digit_per_prefix() {
        for seed in [0u64, 1, 42, 1_234_567_890, 9_999_999_999, 5_551_234_000, 3_141_592_653, 2_718_281_828] {
            let valid = make_oib(seed);
            let prefix = &valid[..10];
            let accepted: Vec<char> = ('0'..='9').filter(|digit| validate_oib(&format!("{prefix}{digit}")).is_ok()).collect();
            assert_eq!(accepted.len(), 1, "{prefix}");
            assert_eq!(Some(accepted[0]), valid.chars().last());
        }
    }

    #[test]
    fn test_deterministic() {
        let oib = make_oib(7_654_321_098);
        assert_eq!(validate_oib(&oib), validate_oib(&oib));
        assert_eq!(validate_oib("12345678901"), validate_oib("12345678901"));
    }
}
