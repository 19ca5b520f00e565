//! Errors in option declarations.
//!
//! A [`ConfigurationError`] means the program declared its options
//! inconsistently. It is detected when the option table is built, before
//! any argument is looked at, and is never caused by user input.

use thiserror::Error;

use crate::declaration::MaxOccurs;

/// A broken option declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("more than one argument processor declared: `{first}` and `{second}`")]
    DuplicateArgumentProcessor { first: String, second: String },

    #[error("member `{member}` is declared as an option more than once")]
    DuplicateMember { member: String },

    #[error("option form `{form}` of member `{member}` contains ':' but the member is not boolean")]
    ColonFormNotBoolean { member: String, form: String },

    #[error(
        "member `{member}` allows {max_occurs} occurrences but is neither a list nor a method"
    )]
    MultipleOccurrencesNeedList {
        member: String,
        max_occurs: MaxOccurs,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_display() {
        let err = ConfigurationError::ColonFormNotBoolean {
            member: "level".to_string(),
            form: "level:quiet".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "option form `level:quiet` of member `level` contains ':' but the member is not boolean"
        );

        let err = ConfigurationError::MultipleOccurrencesNeedList {
            member: "name".to_string(),
            max_occurs: MaxOccurs::Unlimited,
        };
        assert_eq!(
            err.to_string(),
            "member `name` allows unlimited occurrences but is neither a list nor a method"
        );
    }
}
