//! The option registry.

use crate::group::OptionGroup;
use crate::option::{Opt, OptionError};
use crate::util::strip_leading_hyphens;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt;

/// An entry in the list of required options.
#[derive(Debug, Clone)]
pub enum RequiredItem {
    /// A required option, by key
    Opt(String),
    /// A required group; one of its members must be given
    Group(OptionGroup),
}

impl fmt::Display for RequiredItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequiredItem::Opt(key) => f.write_str(key),
            RequiredItem::Group(group) => fmt::Display::fmt(group, f),
        }
    }
}

/// Required entry as tracked internally; groups are referenced by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Required<'a> {
    Opt(&'a str),
    Group(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum RequiredKey {
    Opt(String),
    Group(usize),
}

/// The set of options a parser understands.
///
/// Definitions are fixed once added; parsing works on copies, so one
/// registry can serve any number of parses.
#[derive(Debug, Clone, Default)]
pub struct Options {
    by_key: IndexMap<String, Opt>,
    by_long: IndexMap<String, String>,
    required: Vec<RequiredKey>,
    groups: Vec<OptionGroup>,
    group_of: HashMap<String, usize>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an option, replacing any earlier option with the same key.
    pub fn add_option(&mut self, opt: Opt) -> &mut Self {
        let key = opt.key().to_string();

        if let Some(long) = opt.long() {
            self.by_long.insert(long.to_string(), key.clone());
        }

        let entry = RequiredKey::Opt(key.clone());
        self.required.retain(|r| *r != entry);
        if opt.is_required() {
            self.required.push(entry);
        }

        self.by_key.insert(key, opt);
        self
    }

    /// Register a flag or single-value option with only a short name.
    pub fn add(
        &mut self,
        short: &str,
        has_arg: bool,
        description: &str,
    ) -> Result<&mut Self, OptionError> {
        let opt = Opt::new(Some(short), None, has_arg, description)?;
        Ok(self.add_option(opt))
    }

    /// Register a flag or single-value option with a long name.
    pub fn add_long(
        &mut self,
        short: Option<&str>,
        long: &str,
        has_arg: bool,
        description: &str,
    ) -> Result<&mut Self, OptionError> {
        let opt = Opt::new(short, Some(long), has_arg, description)?;
        Ok(self.add_option(opt))
    }

    /// Register an option that must appear on every command line.
    pub fn add_required_option(
        &mut self,
        short: Option<&str>,
        long: Option<&str>,
        has_arg: bool,
        description: &str,
    ) -> Result<&mut Self, OptionError> {
        let mut opt = Opt::new(short, long, has_arg, description)?;
        opt.set_required(true);
        Ok(self.add_option(opt))
    }

    /// Register a group and all of its members.
    ///
    /// Members lose their own required flag; only the group can be required.
    pub fn add_option_group(&mut self, mut group: OptionGroup) -> &mut Self {
        let index = self.groups.len();
        if group.is_required() {
            self.required.push(RequiredKey::Group(index));
        }

        for opt in group.options_mut() {
            opt.set_required(false);
        }
        for opt in group.options() {
            self.group_of.insert(opt.key().to_string(), index);
            self.add_option(opt.clone());
        }

        self.groups.push(group);
        self
    }

    /// Look up an option by short or long name, with or without hyphens.
    pub fn option(&self, name: &str) -> Option<&Opt> {
        let name = strip_leading_hyphens(name);
        self.by_key.get(name).or_else(|| {
            self.by_long
                .get(name)
                .and_then(|key| self.by_key.get(key))
        })
    }

    pub fn has_option(&self, name: &str) -> bool {
        self.option(name).is_some()
    }

    /// True when `name` is the key of a registered option.
    pub fn has_short_option(&self, name: &str) -> bool {
        self.by_key.contains_key(strip_leading_hyphens(name))
    }

    pub fn has_long_option(&self, name: &str) -> bool {
        self.by_long.contains_key(strip_leading_hyphens(name))
    }

    /// Long names matching a possibly abbreviated `partial`.
    ///
    /// An exact match wins outright; otherwise every long name starting with
    /// `partial` is returned in registration order.
    pub fn matching_options(&self, partial: &str) -> Vec<String> {
        let partial = strip_leading_hyphens(partial);
        if self.by_long.contains_key(partial) {
            return vec![partial.to_string()];
        }
        self.by_long
            .keys()
            .filter(|long| long.starts_with(partial))
            .cloned()
            .collect()
    }

    /// The group `opt` belongs to, if any.
    pub fn option_group(&self, opt: &Opt) -> Option<&OptionGroup> {
        self.group_index(opt.key()).map(|i| &self.groups[i])
    }

    pub fn option_groups(&self) -> &[OptionGroup] {
        &self.groups
    }

    /// All registered options in registration order.
    pub fn options(&self) -> impl Iterator<Item = &Opt> {
        self.by_key.values()
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Snapshot of the required options and groups.
    pub fn required_options(&self) -> Vec<RequiredItem> {
        self.required
            .iter()
            .map(|r| match r {
                RequiredKey::Opt(key) => RequiredItem::Opt(key.clone()),
                RequiredKey::Group(i) => RequiredItem::Group(self.groups[*i].clone()),
            })
            .collect()
    }

    pub(crate) fn required_keys(&self) -> Vec<Required<'_>> {
        self.required
            .iter()
            .map(|r| match r {
                RequiredKey::Opt(key) => Required::Opt(key.as_str()),
                RequiredKey::Group(i) => Required::Group(*i),
            })
            .collect()
    }

    pub(crate) fn group_index(&self, key: &str) -> Option<usize> {
        self.group_of.get(key).copied()
    }
}
