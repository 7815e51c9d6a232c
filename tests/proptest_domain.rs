//! Property-Based Tests — Name Validation Invariants
//!
//! Uses `proptest` to verify the validation rules hold across random
//! inputs, including arbitrary unicode.

use proptest::prelude::*;

use user_directory::domain::user::{NewUser, ValidationError, MAX_NAME_LEN};

proptest! {
    /// Any name with at least one non-whitespace character and at most
    /// 100 characters is accepted, and the accepted value is verbatim.
    #[test]
    fn valid_names_accepted_verbatim(name in "[a-zA-Z0-9][a-zA-Z0-9 ]{0,99}") {
        let request = NewUser { name: name.clone() };
        prop_assert_eq!(request.validate(), Ok(name.as_str()));
    }

    /// Whitespace-only names are always a missing-name error.
    #[test]
    fn whitespace_only_names_rejected(name in "[ \\t\\n]{0,50}") {
        let request = NewUser { name };
        prop_assert_eq!(request.validate(), Err(ValidationError::MissingName));
    }

    /// Names over the column bound are always a too-long error.
    #[test]
    fn overlong_names_rejected(name in "[a-zA-Z0-9]{101,300}") {
        let request = NewUser { name };
        prop_assert_eq!(request.validate(), Err(ValidationError::NameTooLong));
    }

    /// Validation never panics, and accepted names satisfy the stored
    /// invariants: non-empty after trimming, within the length bound.
    #[test]
    fn validation_total_over_arbitrary_unicode(name in "\\PC*") {
        let request = NewUser { name };
        if let Ok(accepted) = request.validate() {
            prop_assert!(!accepted.trim().is_empty());
            prop_assert!(accepted.chars().count() <= MAX_NAME_LEN);
        }
    }
}
