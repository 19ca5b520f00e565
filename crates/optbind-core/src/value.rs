//! Value types that options can bind to.
//!
//! Every member an option binds to holds values of some type implementing
//! [`OptionValue`]. The trait names the type for help and error messages,
//! says whether it is boolean (boolean options never take a parameter) and
//! converts raw command-line text into a value.

use std::{fmt, path::PathBuf};

/// Describes the type of value an option binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueType {
    name: &'static str,
    boolean: bool,
}

impl ValueType {
    /// The boolean value type.
    pub const BOOLEAN: ValueType = ValueType {
        name: "bool",
        boolean: true,
    };

    /// Create a non-boolean value type with a display name.
    pub const fn named(name: &'static str) -> Self {
        Self {
            name,
            boolean: false,
        }
    }

    /// The display name of the type (e.g., `i32`).
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if options of this type are toggles.
    pub fn is_boolean(&self) -> bool {
        self.boolean
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A type that command-line text can be converted into.
pub trait OptionValue: Sized + 'static {
    /// The type descriptor used for matching and help output.
    const VALUE_TYPE: ValueType;

    /// Convert raw argument text into a value.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason when the text is not a valid value.
    fn parse_value(raw: &str) -> Result<Self, String>;
}

impl OptionValue for bool {
    const VALUE_TYPE: ValueType = ValueType::BOOLEAN;

    fn parse_value(raw: &str) -> Result<Self, String> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" | "+" => Ok(true),
            "false" | "no" | "off" | "0" | "-" => Ok(false),
            _ => Err(format!("'{raw}' is not a boolean")),
        }
    }
}

macro_rules! from_str_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl OptionValue for $ty {
                const VALUE_TYPE: ValueType = ValueType::named(stringify!($ty));

                fn parse_value(raw: &str) -> Result<Self, String> {
                    raw.parse::<$ty>().map_err(|err| err.to_string())
                }
            }
        )*
    };
}

from_str_value!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, char, String,
    PathBuf,
);
