//! Mutually exclusive option groups.

use crate::option::Opt;
use indexmap::IndexMap;
use std::fmt;
use thiserror::Error;

/// A second option from a group was selected.
#[derive(Debug, Clone, Error)]
#[error(
    "The option '{}' was specified but an option from this group has already been selected: '{}'",
    .option.key(),
    .group.selected().unwrap_or("")
)]
pub struct AlreadySelectedError {
    /// The group, with its earlier selection
    pub group: OptionGroup,
    /// The option that was rejected
    pub option: Opt,
}

/// A set of options of which at most one may be given.
#[derive(Debug, Clone, Default)]
pub struct OptionGroup {
    options: IndexMap<String, Opt>,
    selected: Option<String>,
    required: bool,
}

impl OptionGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a member by key.
    pub fn add_option(&mut self, opt: Opt) -> &mut Self {
        self.options.insert(opt.key().to_string(), opt);
        self
    }

    /// Record `opt` as the selected member.
    ///
    /// `None` clears the selection. Selecting the current selection again
    /// is a no-op; selecting a different member fails.
    pub fn set_selected(&mut self, opt: Option<&Opt>) -> Result<(), AlreadySelectedError> {
        let Some(opt) = opt else {
            self.selected = None;
            return Ok(());
        };

        match self.selected.as_deref() {
            None => {
                self.selected = Some(opt.key().to_string());
                Ok(())
            }
            Some(key) if key == opt.key() => Ok(()),
            Some(_) => Err(AlreadySelectedError {
                group: self.clone(),
                option: opt.clone(),
            }),
        }
    }

    /// Key of the selected member.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    /// Member keys in the order they were first added.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.options.keys().map(String::as_str)
    }

    pub fn options(&self) -> impl Iterator<Item = &Opt> {
        self.options.values()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.options.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub(crate) fn options_mut(&mut self) -> impl Iterator<Item = &mut Opt> {
        self.options.values_mut()
    }
}

impl fmt::Display for OptionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, opt) in self.options.values().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match opt.short() {
                Some(short) => write!(f, "-{}", short)?,
                None => write!(f, "--{}", opt.long().unwrap_or(""))?,
            }
            if let Some(desc) = opt.description() {
                write!(f, " {}", desc)?;
            }
        }
        f.write_str("]")
    }
}
