//! The result of a parse.

use crate::group::OptionGroup;
use crate::option::Opt;
use crate::util::strip_leading_hyphens;
use crate::value::{create_value, ConversionError, Value};
use indexmap::IndexMap;

/// Options and positional arguments found on a command line.
///
/// Each occurrence of an option is kept separately with its own values.
#[derive(Debug, Clone, Default)]
pub struct CommandLine {
    options: Vec<Opt>,
    args: Vec<String>,
    groups: Vec<OptionGroup>,
}

impl CommandLine {
    pub fn builder() -> Builder {
        Builder::default()
    }

    fn resolve(&self, name: &str) -> Option<&Opt> {
        let name = strip_leading_hyphens(name);
        self.options
            .iter()
            .find(|opt| opt.short() == Some(name) || opt.long() == Some(name))
    }

    fn occurrences<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Opt> + 'a {
        let found = self.resolve(name);
        self.options
            .iter()
            .filter(move |opt| found.is_some_and(|f| *opt == f))
    }

    /// True when the option was given, by short or long name.
    pub fn has_option(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    pub fn has_opt(&self, opt: &Opt) -> bool {
        self.options.contains(opt)
    }

    /// First value of the first occurrence of the option.
    pub fn option_value(&self, name: &str) -> Option<&str> {
        self.occurrences(name).flat_map(Opt::values).next().map(String::as_str)
    }

    pub fn option_value_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.option_value(name).unwrap_or(default)
    }

    /// Values of every occurrence of the option, in order.
    ///
    /// `None` when the option is absent or carries no values.
    pub fn option_values(&self, name: &str) -> Option<Vec<&str>> {
        let values: Vec<&str> = self
            .occurrences(name)
            .flat_map(Opt::values)
            .map(String::as_str)
            .collect();
        if values.is_empty() {
            None
        } else {
            Some(values)
        }
    }

    /// Key/value pairs given through a property-style option such as `-Dk=v`.
    ///
    /// An occurrence with a single value maps it to `"true"`.
    pub fn option_properties(&self, name: &str) -> IndexMap<String, String> {
        let mut props = IndexMap::new();
        for opt in self.occurrences(name) {
            match opt.values() {
                [key, value, ..] => {
                    props.insert(key.clone(), value.clone());
                }
                [key] => {
                    props.insert(key.clone(), "true".to_string());
                }
                [] => {}
            }
        }
        props
    }

    /// First value converted to the option's declared type.
    pub fn parsed_option_value(&self, name: &str) -> Result<Option<Value>, ConversionError> {
        let Some(opt) = self.resolve(name) else {
            return Ok(None);
        };
        match self.option_value(name) {
            Some(text) => create_value(text, opt.value_type()).map(Some),
            None => Ok(None),
        }
    }

    /// Positional arguments left over after option processing.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Every option occurrence, in command-line order.
    pub fn options(&self) -> &[Opt] {
        &self.options
    }

    /// The group `name` belongs to, with the selection made by this parse.
    pub fn option_group(&self, name: &str) -> Option<&OptionGroup> {
        let key = self.resolve(name)?.key();
        self.groups.iter().find(|group| group.contains(key))
    }

    pub(crate) fn push_option(&mut self, opt: Opt) {
        self.options.push(opt);
    }

    pub(crate) fn push_arg(&mut self, arg: impl Into<String>) {
        self.args.push(arg.into());
    }

    pub(crate) fn set_groups(&mut self, groups: Vec<OptionGroup>) {
        self.groups = groups;
    }
}

/// Assembles a [`CommandLine`] by hand.
#[derive(Debug, Default)]
pub struct Builder {
    command_line: CommandLine,
}

impl Builder {
    pub fn add_option(mut self, opt: Opt) -> Self {
        self.command_line.push_option(opt);
        self
    }

    pub fn add_arg(mut self, arg: impl Into<String>) -> Self {
        self.command_line.push_arg(arg);
        self
    }

    pub fn build(self) -> CommandLine {
        self.command_line
    }
}
