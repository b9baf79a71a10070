use std::fmt;

/**
 * Entity fields that carry construction-time checks.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Id,
    Oib,
    Name,
    Description,
    DateOfEstablishment,
    Logo,
    CreatedDate,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            Field::Id => "ID",
            Field::Oib => "OIB",
            Field::Name => "Name",
            Field::Description => "Description",
            Field::DateOfEstablishment => "Date of Establishment",
            Field::Logo => "Logo",
            Field::CreatedDate => "CreatedDate",
        };
        write!(f, "{label}")
    }
}

/**
 * Reasons an entity could not be constructed.
 *
 * The messages are part of the HTTP contract and are returned verbatim to clients.
 */
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(Field),
    #[error("{0} cannot be empty or just whitespace")]
    BlankField(Field),
    #[error("{field} must be less than {} characters", .max_length + 1)]
    TooLong { field: Field, max_length: usize },
    #[error("OIB must be 11 digits long.")]
    InvalidLength,
    #[error("OIB must contain only digits.")]
    InvalidCharacters,
    #[error("OIB is not valid.")]
    InvalidChecksum,
}

/**
 * Returns the value if it is present and not empty.
 *
 * # Arguments
 * `value`: The raw field value.
 * `field`: The field being checked, used in the error.
 *
 * # Returns
 * The untouched value or `MissingField`.
 */
pub fn require(value: Option<String>, field: Field) -> Result<String, ValidationError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ValidationError::MissingField(field)),
    }
}

/**
 * Strips leading and trailing whitespace, including the byte order mark U+FEFF.
 */
pub fn trim_text(value: &str) -> &str {
    value.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

/**
 * Returns the trimmed value if it is present and contains more than whitespace.
 *
 * # Arguments
 * `value`: The raw field value.
 * `field`: The field being checked, used in the error.
 *
 * # Returns
 * The trimmed value, `MissingField` when absent or empty, `BlankField` when only whitespace.
 */
pub fn require_trimmed(value: Option<String>, field: Field) -> Result<String, ValidationError> {
    let value = require(value, field)?;
    let trimmed = trim_text(&value);
    if trimmed.is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    Ok(trimmed.to_string())
}

/**
 * Fails with `TooLong` when the value has more than `max_length` characters.
 */
pub fn check_max_length(value: &str, field: Field, max_length: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max_length {
        return Err(ValidationError::TooLong { field, max_length });
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(ValidationError::MissingField(Field::Id).to_string(), "ID is required");
        assert_eq!(ValidationError::MissingField(Field::CreatedDate).to_string(), "CreatedDate is required");
        assert_eq!(ValidationError::MissingField(Field::DateOfEstablishment).to_string(), "Date of Establishment is required");
        assert_eq!(ValidationError::BlankField(Field::Name).to_string(), "Name cannot be empty or just whitespace");
        assert_eq!(ValidationError::TooLong { field: Field::Name, max_length: 255 }.to_string(), "Name must be less than 256 characters");
        assert_eq!(ValidationError::InvalidLength.to_string(), "OIB must be 11 digits long.");
        assert_eq!(ValidationError::InvalidCharacters.to_string(), "OIB must contain only digits.");
        assert_eq!(ValidationError::InvalidChecksum.to_string(), "OIB is not valid.");
    }

    #[test]
    fn test_require_empty_is_missing() {
        assert_eq!(require(Some(String::new()), Field::Logo), Err(ValidationError::MissingField(Field::Logo)));
        assert_eq!(require(None, Field::Logo), Err(ValidationError::MissingField(Field::Logo)));
        assert_eq!(require(Some("   ".to_string()), Field::Logo), Ok("   ".to_string()));
    }

    #[test]
    fn test_require_trimmed() {
        assert_eq!(require_trimmed(Some("  Bob  ".to_string()), Field::Name), Ok("Bob".to_string()));
        assert_eq!(require_trimmed(Some(" \t\n ".to_string()), Field::Name), Err(ValidationError::BlankField(Field::Name)));
        assert_eq!(require_trimmed(None, Field::Name), Err(ValidationError::MissingField(Field::Name)));
    }

    #[test]
    fn test_trim_strips_byte_order_mark() {
        assert_eq!(trim_text("\u{FEFF} Bob \u{FEFF}"), "Bob");
        assert_eq!(require_trimmed(Some("\u{FEFF}".to_string()), Field::Name), Err(ValidationError::BlankField(Field::Name)));
        assert_eq!(require_trimmed(Some("\u{FEFF}\u{00A0}Ana".to_string()), Field::Description), Ok("Ana".to_string()));
    }

    #[test]
    fn test_max_length_counts_characters() {
        let name = "č".repeat(255);
        assert!(check_max_length(&name, Field::Name, 255).is_ok());
        let name = "č".repeat(256);
        assert_eq!(check_max_length(&name, Field::Name, 255), Err(ValidationError::TooLong { field: Field::Name, max_length: 255 }));
    }
}
