//! Compact option patterns such as `"vp:!f/"`.
//!
//! Each letter declares a short option. A value code after it makes the
//! option take an argument of the matching [`ValueType`], and `!` makes it
//! required:
//!
//! | code | value            |
//! |------|------------------|
//! | `:`  | string           |
//! | `@`  | string           |
//! | `+`  | string           |
//! | `%`  | number           |
//! | `#`  | date             |
//! | `>`  | path             |
//! | `*`  | path             |
//! | `<`  | existing file    |
//! | `/`  | http(s) URL      |

use crate::option::{Opt, OptionError};
use crate::options::Options;
use crate::value::ValueType;

#[derive(Debug, Default)]
struct Pending {
    key: Option<char>,
    required: bool,
    value_type: Option<ValueType>,
}

impl Pending {
    fn build(&mut self) -> Result<Option<Opt>, OptionError> {
        let Some(key) = self.key.take() else {
            return Ok(None);
        };

        let mut builder = Opt::builder().short_char(key);
        if let Some(value_type) = self.value_type.take() {
            builder = builder.has_arg().value_type(value_type);
        }
        if std::mem::take(&mut self.required) {
            builder = builder.required();
        }
        builder.build().map(Some)
    }
}

/// Build a registry from a pattern string.
pub fn parse_pattern(pattern: &str) -> Result<Options, OptionError> {
    let mut options = Options::new();
    let mut pending = Pending::default();

    for ch in pattern.chars() {
        if ch == '!' {
            pending.required = true;
        } else if let Some(value_type) = ValueType::from_code(ch) {
            pending.value_type = Some(value_type);
        } else {
            if let Some(opt) = pending.build()? {
                options.add_option(opt);
            }
            pending.key = Some(ch);
        }
    }

    if let Some(opt) = pending.build()? {
        options.add_option(opt);
    }
    Ok(options)
}
