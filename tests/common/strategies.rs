//! Proptest strategies for contact request fields.

use proptest::prelude::*;

/// Mobile numbers the validator must accept
pub fn valid_mobile_number_strategy() -> impl Strategy<Value = String> {
    "09[0-9]{9}"
}

/// Digit strings of the wrong length
pub fn wrong_length_mobile_number_strategy() -> impl Strategy<Value = String> {
    prop_oneof!["09[0-9]{0,8}", "09[0-9]{10,14}"]
}

/// Eleven digits that do not start with 09
pub fn wrong_prefix_mobile_number_strategy() -> impl Strategy<Value = String> {
    "(1[0-9]|0[0-8])[0-9]{9}"
}

/// Non-blank names within the length limit, including non-Latin letters
pub fn valid_full_name_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z\u{0600}-\u{06FF}][a-zA-Z \u{0600}-\u{06FF}]{0,98}[a-zA-Z\u{0600}-\u{06FF}]"
}
