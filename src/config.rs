//! JSON schema describing an option registry.

use crate::group::OptionGroup;
use crate::option::{Opt, OptionError};
use crate::options::Options;
use crate::value::ValueType;
use serde::Deserialize;
use std::collections::HashSet;
use thiserror::Error;

/// Prefix for exported variables when the schema does not set one.
pub const DEFAULT_PREFIX: &str = "OPTPARSE_";

/// Errors that can occur during config parsing and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse JSON config: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("duplicate option key: {0}")]
    DuplicateKey(String),

    #[error("option #{0} has neither a short nor a long name")]
    NoName(usize),

    #[error("'args' on option '{0}' must be at least 1 or \"unlimited\"")]
    ZeroArgs(String),

    #[error("'separator' on option '{0}' requires 'args'")]
    SeparatorWithoutArgs(String),

    #[error("group #{0} has no options")]
    EmptyGroup(usize),

    #[error("invalid option definition: {0}")]
    InvalidOption(#[from] OptionError),
}

/// How many values an option takes.
///
/// Written as a number or as the string `"unlimited"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgCount {
    Count(usize),
    Unlimited,
}

impl<'de> Deserialize<'de> for ArgCount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ArgCountVisitor;

        impl<'de> Visitor<'de> for ArgCountVisitor {
            type Value = ArgCount;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a number or \"unlimited\"")
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                usize::try_from(value)
                    .map(ArgCount::Count)
                    .map_err(|_| de::Error::custom("argument count out of range"))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if value == "unlimited" {
                    Ok(ArgCount::Unlimited)
                } else {
                    Err(de::Error::invalid_value(de::Unexpected::Str(value), &self))
                }
            }
        }

        deserializer.deserialize_any(ArgCountVisitor)
    }
}

/// Configuration for a single option.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OptionConfig {
    /// Short name, e.g. "v" for -v
    pub short: Option<String>,
    /// Long name, e.g. "verbose" for --verbose
    pub long: Option<String>,
    /// Help text for this option
    pub description: Option<String>,
    /// Name of the value in help output
    pub arg_name: Option<String>,
    /// Number of values; omitted for flags
    pub args: Option<ArgCount>,
    /// Whether this option must be given
    #[serde(default)]
    pub required: bool,
    /// Whether the values may be omitted
    #[serde(default)]
    pub optional_arg: bool,
    /// Character splitting a single value into several, e.g. '=' for -Dk=v
    pub separator: Option<char>,
    /// Declared value type; "string" (default), "number", "date", "path",
    /// "existing_file" or "url"
    #[serde(rename = "type", default)]
    pub value_type: ValueType,
}

impl OptionConfig {
    /// Name used in error messages and as the registry key.
    pub fn key(&self) -> Option<&str> {
        self.short.as_deref().or(self.long.as_deref())
    }

    /// Build the option definition.
    pub fn to_opt(&self) -> Result<Opt, ConfigError> {
        let mut builder = Opt::builder();
        if let Some(short) = &self.short {
            builder = builder.short(short);
        }
        if let Some(long) = &self.long {
            builder = builder.long(long);
        }
        if let Some(desc) = &self.description {
            builder = builder.desc(desc);
        }
        if let Some(name) = &self.arg_name {
            builder = builder.arg_name(name);
        }

        let count = match self.args {
            None if self.optional_arg => Some(ArgCount::Count(1)),
            args => args,
        };
        builder = match (count, self.optional_arg) {
            (None, _) => builder,
            (Some(ArgCount::Count(n)), false) => builder.args(n),
            (Some(ArgCount::Count(n)), true) => builder.optional_args(n),
            (Some(ArgCount::Unlimited), false) => builder.unlimited_args(),
            (Some(ArgCount::Unlimited), true) => builder.optional_arg().unlimited_args(),
        };
        if self.required {
            builder = builder.required();
        }
        if let Some(sep) = self.separator {
            builder = builder.value_separator(sep);
        }

        Ok(builder.value_type(self.value_type).build()?)
    }
}

/// Configuration for a mutually exclusive group.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroupConfig {
    /// Whether one of the group's options must be given
    #[serde(default)]
    pub required: bool,
    /// Members of the group
    #[serde(default)]
    pub options: Vec<OptionConfig>,
}

/// Top-level configuration for a program.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Program name shown in usage lines
    pub name: Option<String>,
    /// Environment variable prefix (default: "OPTPARSE_")
    pub prefix: Option<String>,
    /// Standalone options
    #[serde(default)]
    pub options: Vec<OptionConfig>,
    /// Option groups
    #[serde(default)]
    pub groups: Vec<GroupConfig>,
}

impl Config {
    /// Parse a JSON string into a Config.
    pub fn from_json(json: &str) -> Result<Config, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut keys = HashSet::new();

        for (i, group) in self.groups.iter().enumerate() {
            if group.options.is_empty() {
                return Err(ConfigError::EmptyGroup(i));
            }
        }

        let all = self
            .options
            .iter()
            .chain(self.groups.iter().flat_map(|g| g.options.iter()));
        for (index, opt) in all.enumerate() {
            let key = opt.key().ok_or(ConfigError::NoName(index))?;
            if !keys.insert(key) {
                return Err(ConfigError::DuplicateKey(key.to_string()));
            }
            Self::validate_option(key, opt)?;
        }

        Ok(())
    }

    fn validate_option(key: &str, opt: &OptionConfig) -> Result<(), ConfigError> {
        if opt.args == Some(ArgCount::Count(0)) {
            return Err(ConfigError::ZeroArgs(key.to_string()));
        }
        if opt.separator.is_some() && opt.args.is_none() && !opt.optional_arg {
            return Err(ConfigError::SeparatorWithoutArgs(key.to_string()));
        }
        opt.to_opt()?;
        Ok(())
    }

    /// Validate and build the option registry.
    pub fn to_options(&self) -> Result<Options, ConfigError> {
        self.validate()?;

        let mut options = Options::new();
        for opt in &self.options {
            options.add_option(opt.to_opt()?);
        }
        for group_config in &self.groups {
            let mut group = OptionGroup::new();
            group.set_required(group_config.required);
            for opt in &group_config.options {
                group.add_option(opt.to_opt()?);
            }
            options.add_option_group(group);
        }
        Ok(options)
    }

    /// Get the effective prefix (from config or default).
    pub fn effective_prefix(&self) -> &str {
        self.prefix.as_deref().unwrap_or(DEFAULT_PREFIX)
    }

    /// Program name, falling back to `fallback`.
    pub fn effective_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(fallback)
    }
}
