//! Option definitions and the fluent option builder.

use crate::value::ValueType;
use std::fmt;
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// Characters reserved as value codes by the pattern builder.
pub const RESERVED_CHARS: [char; 10] = ['!', '@', ':', '%', '+', '#', '<', '>', '*', '/'];

/// Errors raised by malformed option definitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    #[error("option name must not be empty")]
    EmptyKey,

    #[error("illegal option name '{0}'")]
    IllegalKey(String),

    #[error("an option needs a short or a long name")]
    MissingName,

    #[error("option '{0}' does not take an argument")]
    NoArgsAllowed(String),

    #[error("cannot add value to option '{key}': it takes at most {limit} value(s)")]
    TooManyValues { key: String, limit: usize },
}

/// How many values an option accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Arity {
    /// A flag, no values
    #[default]
    Zero,
    /// Up to `n` values
    Exactly(usize),
    /// Any number of values
    Unlimited,
}

impl Arity {
    fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Zero => false,
            Arity::Exactly(n) => count < n,
            Arity::Unlimited => true,
        }
    }

    fn limit(self) -> usize {
        match self {
            Arity::Zero => 0,
            Arity::Exactly(n) => n,
            Arity::Unlimited => usize::MAX,
        }
    }
}

/// A single command-line option.
///
/// The definition half (names, arity, flags) is set up before registration;
/// the value list is filled by the parser on a per-parse copy.
#[derive(Debug, Clone)]
pub struct Opt {
    short: Option<String>,
    long: Option<String>,
    description: Option<String>,
    arg_name: Option<String>,
    arity: Arity,
    required: bool,
    optional_arg: bool,
    value_separator: Option<char>,
    value_type: ValueType,
    values: Vec<String>,
}

fn validate_key(key: &str) -> Result<(), OptionError> {
    if key.is_empty() {
        return Err(OptionError::EmptyKey);
    }
    if key.chars().any(char::is_whitespace) {
        return Err(OptionError::IllegalKey(key.to_string()));
    }
    Ok(())
}

impl Opt {
    /// Create an option with a short and/or long name.
    ///
    /// `has_arg` gives the option an arity of one.
    pub fn new(
        short: Option<&str>,
        long: Option<&str>,
        has_arg: bool,
        description: &str,
    ) -> Result<Opt, OptionError> {
        let mut builder = OptBuilder::new().desc(description);
        if let Some(short) = short {
            builder = builder.short(short);
        }
        if let Some(long) = long {
            builder = builder.long(long);
        }
        if has_arg {
            builder = builder.has_arg();
        }
        builder.build()
    }

    /// Start a fluent builder.
    pub fn builder() -> OptBuilder {
        OptBuilder::new()
    }

    /// The identity used by the registry: the short name, else the long name.
    pub fn key(&self) -> &str {
        self.short
            .as_deref()
            .or(self.long.as_deref())
            .unwrap_or("")
    }

    pub fn short(&self) -> Option<&str> {
        self.short.as_deref()
    }

    /// Replace the short name. `None` is only allowed while a long name is set.
    pub fn set_short(&mut self, short: Option<&str>) -> Result<(), OptionError> {
        match short {
            Some(s) => validate_key(s)?,
            None if self.long.is_none() => return Err(OptionError::MissingName),
            None => {}
        }
        self.short = short.map(str::to_string);
        Ok(())
    }

    pub fn long(&self) -> Option<&str> {
        self.long.as_deref()
    }

    /// Replace the long name. `None` is only allowed while a short name is set.
    pub fn set_long(&mut self, long: Option<&str>) -> Result<(), OptionError> {
        match long {
            Some(l) => validate_key(l)?,
            None if self.short.is_none() => return Err(OptionError::MissingName),
            None => {}
        }
        self.long = long.map(str::to_string);
        Ok(())
    }

    pub fn has_long(&self) -> bool {
        self.long.is_some()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    /// Name shown for the argument in help output.
    pub fn arg_name(&self) -> Option<&str> {
        self.arg_name.as_deref()
    }

    pub fn set_arg_name(&mut self, name: impl Into<String>) {
        self.arg_name = Some(name.into());
    }

    pub fn has_arg_name(&self) -> bool {
        self.arg_name.as_deref().is_some_and(|n| !n.is_empty())
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn set_arity(&mut self, arity: Arity) {
        self.arity = match arity {
            Arity::Exactly(0) => Arity::Zero,
            other => other,
        };
    }

    /// True when the option accepts at least one value.
    pub fn has_arg(&self) -> bool {
        !matches!(self.arity, Arity::Zero | Arity::Exactly(0))
    }

    /// True when the option accepts more than one value.
    pub fn has_args(&self) -> bool {
        matches!(self.arity, Arity::Unlimited) || matches!(self.arity, Arity::Exactly(n) if n > 1)
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    /// True when the option may appear without any of its values.
    pub fn has_optional_arg(&self) -> bool {
        self.optional_arg
    }

    pub fn set_optional_arg(&mut self, optional: bool) {
        self.optional_arg = optional;
    }

    pub fn value_separator(&self) -> Option<char> {
        self.value_separator
    }

    pub fn set_value_separator(&mut self, separator: Option<char>) {
        self.value_separator = separator;
    }

    pub fn has_value_separator(&self) -> bool {
        self.value_separator.is_some()
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn set_value_type(&mut self, value_type: ValueType) {
        self.value_type = value_type;
    }

    /// Bind a value, splitting it on the value separator if one is set.
    ///
    /// When only one value slot is left the remainder is kept whole, so
    /// `key=value=x` for an option of arity two yields `key` and `value=x`.
    pub fn add_value(&mut self, value: &str) -> Result<(), OptionError> {
        if !self.has_arg() {
            return Err(OptionError::NoArgsAllowed(self.key().to_string()));
        }

        let mut rest = value;
        if let Some(sep) = self.value_separator {
            while let Some(pos) = rest.find(sep) {
                if matches!(self.arity, Arity::Exactly(n) if self.values.len() + 1 == n) {
                    break;
                }
                self.push_value(&rest[..pos])?;
                rest = &rest[pos + sep.len_utf8()..];
            }
        }
        self.push_value(rest)
    }

    fn push_value(&mut self, value: &str) -> Result<(), OptionError> {
        if !self.arity.accepts(self.values.len()) {
            return Err(OptionError::TooManyValues {
                key: self.key().to_string(),
                limit: self.arity.limit(),
            });
        }
        self.values.push(value.to_string());
        Ok(())
    }

    pub fn clear_values(&mut self) {
        self.values.clear();
    }

    /// The first bound value.
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    pub fn value_at(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    pub fn value_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.value().unwrap_or(default)
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Copy of the definition with an empty value list.
    pub fn clone_definition(&self) -> Opt {
        Opt {
            values: Vec::new(),
            ..self.clone()
        }
    }
}

impl PartialEq for Opt {
    fn eq(&self, other: &Self) -> bool {
        self.short == other.short && self.long == other.long
    }
}

impl Eq for Opt {}

impl Hash for Opt {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.short.hash(state);
        self.long.hash(state);
    }
}

impl fmt::Display for Opt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ option: {}", self.key())?;
        if let (Some(_), Some(long)) = (&self.short, &self.long) {
            write!(f, " {}", long)?;
        }
        if self.has_args() {
            write!(f, " [ARG...]")?;
        } else if self.has_arg() {
            write!(f, " [ARG]")?;
        }
        write!(f, " :: {} ]", self.description.as_deref().unwrap_or(""))
    }
}

/// Fluent builder for [`Opt`].
///
/// Each builder is an independent value; nothing is shared between builds.
#[derive(Debug, Clone, Default)]
pub struct OptBuilder {
    short: Option<String>,
    long: Option<String>,
    description: Option<String>,
    arg_name: Option<String>,
    arity: Arity,
    required: bool,
    optional_arg: bool,
    value_separator: Option<char>,
    value_type: ValueType,
    char_key: bool,
}

impl OptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn short(mut self, short: impl Into<String>) -> Self {
        self.short = Some(short.into());
        self.char_key = false;
        self
    }

    /// Single-character short name; value-code characters are rejected.
    pub fn short_char(mut self, short: char) -> Self {
        self.short = Some(short.to_string());
        self.char_key = true;
        self
    }

    pub fn long(mut self, long: impl Into<String>) -> Self {
        self.long = Some(long.into());
        self
    }

    pub fn desc(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn arg_name(mut self, name: impl Into<String>) -> Self {
        self.arg_name = Some(name.into());
        self
    }

    /// Take exactly one value.
    pub fn has_arg(self) -> Self {
        self.args(1)
    }

    /// Take up to `n` values.
    pub fn args(mut self, n: usize) -> Self {
        self.arity = if n == 0 { Arity::Zero } else { Arity::Exactly(n) };
        self
    }

    pub fn unlimited_args(mut self) -> Self {
        self.arity = Arity::Unlimited;
        self
    }

    /// Take one value that may be omitted.
    pub fn optional_arg(self) -> Self {
        self.optional_args(1)
    }

    /// Take up to `n` values, all of which may be omitted.
    pub fn optional_args(mut self, n: usize) -> Self {
        self.optional_arg = true;
        self.args(n)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn value_separator(mut self, separator: char) -> Self {
        self.value_separator = Some(separator);
        self
    }

    pub fn value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = value_type;
        self
    }

    pub fn build(self) -> Result<Opt, OptionError> {
        if self.short.is_none() && self.long.is_none() {
            return Err(OptionError::MissingName);
        }
        if let Some(ref short) = self.short {
            validate_key(short)?;
            if self.char_key && short.chars().all(|c| RESERVED_CHARS.contains(&c)) {
                return Err(OptionError::IllegalKey(short.clone()));
            }
        }
        if let Some(ref long) = self.long {
            validate_key(long)?;
        }

        Ok(Opt {
            short: self.short,
            long: self.long,
            description: self.description,
            arg_name: self.arg_name,
            arity: self.arity,
            required: self.required,
            optional_arg: self.optional_arg,
            value_separator: self.value_separator,
            value_type: self.value_type,
            values: Vec::new(),
        })
    }
}
