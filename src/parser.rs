//! POSIX-style command-line parsing.
//!
//! Parsing runs in two passes. The first flattens the raw arguments into a
//! canonical token stream: abbreviated long options are expanded, `--name=value`
//! is split, and bursts like `-abc` become `-a -b -c`. The second pass walks
//! that stream and binds options and values against the registry.

use crate::command_line::CommandLine;
use crate::group::{AlreadySelectedError, OptionGroup};
use crate::option::{Opt, OptionError};
use crate::options::{Options, Required, RequiredItem};
use crate::util::strip_leading_and_trailing_quotes;
use thiserror::Error;
use tracing::{debug, trace};

/// Errors that can occur during parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unrecognized option: {0}")]
    UnrecognizedOption(String),

    #[error("Ambiguous option: '{option}'  (could be: {})", quote_list(.matches))]
    AmbiguousOption {
        option: String,
        matches: Vec<String>,
    },

    #[error("Missing argument for option: {}", .0.key())]
    MissingArgument(Box<Opt>),

    #[error("{}", missing_message(.0))]
    MissingOptions(Vec<RequiredItem>),

    #[error(transparent)]
    AlreadySelected(Box<AlreadySelectedError>),

    #[error(transparent)]
    InvalidOption(#[from] OptionError),
}

impl From<AlreadySelectedError> for ParseError {
    fn from(err: AlreadySelectedError) -> Self {
        ParseError::AlreadySelected(Box::new(err))
    }
}

fn quote_list(items: &[String]) -> String {
    items
        .iter()
        .map(|m| format!("'{}'", m))
        .collect::<Vec<_>>()
        .join(", ")
}

fn missing_message(items: &[RequiredItem]) -> String {
    let list = items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    if items.len() == 1 {
        format!("Missing required option: {}", list)
    } else {
        format!("Missing required options: {}", list)
    }
}

/// Parse `args` against `options` with default settings.
pub fn parse<S: AsRef<str>>(options: &Options, args: &[S]) -> Result<CommandLine, ParseError> {
    Parser::new(options).parse(args)
}

/// Parser settings for one registry.
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    options: &'a Options,
    stop_at_non_option: bool,
    properties: Vec<(String, String)>,
}

impl<'a> Parser<'a> {
    pub fn new(options: &'a Options) -> Self {
        Self {
            options,
            stop_at_non_option: false,
            properties: Vec::new(),
        }
    }

    /// Treat everything from the first non-option token on as positional.
    pub fn stop_at_non_option(mut self, stop: bool) -> Self {
        self.stop_at_non_option = stop;
        self
    }

    /// Defaults applied after the command line for options it did not set.
    ///
    /// Flags are only set when the value is `yes`, `true` or `1`.
    pub fn properties<I, K, V>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.properties = properties
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    pub fn parse<S: AsRef<str>>(&self, args: &[S]) -> Result<CommandLine, ParseError> {
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        let tokens = Flattener::new(self.options, self.stop_at_non_option).flatten(&args)?;
        debug!(?tokens, "flattened arguments");

        let mut matcher = Matcher::new(self.options, self.stop_at_non_option);
        matcher.run(&tokens)?;
        matcher.apply_properties(&self.properties)?;
        let cmd = matcher.finish()?;

        debug!(
            options = cmd.options().len(),
            args = cmd.args().len(),
            "parsed command line"
        );
        Ok(cmd)
    }
}

/// First pass: normalize raw arguments into canonical tokens.
struct Flattener<'a> {
    options: &'a Options,
    stop_at_non_option: bool,
    tokens: Vec<String>,
    eat_the_rest: bool,
    current: Option<&'a Opt>,
}

impl<'a> Flattener<'a> {
    fn new(options: &'a Options, stop_at_non_option: bool) -> Self {
        Self {
            options,
            stop_at_non_option,
            tokens: Vec::new(),
            eat_the_rest: false,
            current: None,
        }
    }

    fn flatten(mut self, args: &[&str]) -> Result<Vec<String>, ParseError> {
        for (i, &token) in args.iter().enumerate() {
            if token == "-" || token == "--" {
                self.tokens.push(token.to_string());
            } else if token.starts_with("--") {
                self.long_token(token)?;
            } else if token.starts_with('-') {
                if token.chars().count() == 2 || self.options.has_option(token) {
                    self.option_token(token);
                } else {
                    self.short_token(token)?;
                }
            } else {
                self.non_option_token(token);
            }

            if self.eat_the_rest {
                self.tokens
                    .extend(args[i + 1..].iter().map(|s| s.to_string()));
                break;
            }
        }
        Ok(self.tokens)
    }

    /// `--name` or `--name=value`, possibly abbreviated.
    fn long_token(&mut self, token: &str) -> Result<(), ParseError> {
        let (name, value) = match token.find('=') {
            Some(pos) => (&token[..pos], Some(&token[pos + 1..])),
            None => (token, None),
        };

        let matches = self.options.matching_options(name);
        match matches.len() {
            0 => self.non_option_token(token),
            1 => {
                let long = &matches[0];
                trace!(token, long = long.as_str(), "resolved long option");
                self.current = self.options.option(long);
                self.tokens.push(format!("--{}", long));
                if let Some(value) = value {
                    self.tokens.push(value.to_string());
                }
            }
            _ => {
                return Err(ParseError::AmbiguousOption {
                    option: name.to_string(),
                    matches,
                })
            }
        }
        Ok(())
    }

    /// `-xyz` that is neither a two-character token nor an exact option.
    fn short_token(&mut self, token: &str) -> Result<(), ParseError> {
        let matches = self.options.matching_options(token);
        match matches.len() {
            0 => self.burst(token),
            1 => {
                let canonical = format!("-{}", matches[0]);
                self.option_token(&canonical);
            }
            _ => {
                return Err(ParseError::AmbiguousOption {
                    option: token.to_string(),
                    matches,
                })
            }
        }
        Ok(())
    }

    fn option_token(&mut self, token: &str) {
        let opt = self.options.option(token);
        if self.stop_at_non_option && opt.is_none() {
            self.eat_the_rest = true;
        }
        if opt.is_some() {
            self.current = opt;
        }
        self.tokens.push(token.to_string());
    }

    fn non_option_token(&mut self, value: &str) {
        if self.stop_at_non_option && !self.current.is_some_and(Opt::has_arg) {
            self.eat_the_rest = true;
            self.tokens.push("--".to_string());
        }
        self.tokens.push(value.to_string());
    }

    /// Split `-abc` into `-a -b -c`.
    ///
    /// The first option that takes an argument swallows the rest of the token
    /// as its value.
    fn burst(&mut self, token: &str) {
        for (idx, ch) in token.char_indices().skip(1) {
            let mut buf = [0u8; 4];
            let name: &str = ch.encode_utf8(&mut buf);

            if let Some(opt) = self.options.option(name) {
                self.tokens.push(format!("-{}", ch));
                self.current = Some(opt);

                let rest = &token[idx + ch.len_utf8()..];
                if opt.has_arg() && !rest.is_empty() {
                    self.tokens.push(rest.to_string());
                    break;
                }
            } else if self.stop_at_non_option {
                self.non_option_token(&token[idx..]);
                break;
            } else {
                self.tokens.push(token.to_string());
                break;
            }
        }
    }
}

/// Second pass: bind tokens to per-parse copies of the definitions.
struct Matcher<'a> {
    options: &'a Options,
    stop_at_non_option: bool,
    cmd: CommandLine,
    required: Vec<Required<'a>>,
    groups: Vec<OptionGroup>,
}

impl<'a> Matcher<'a> {
    fn new(options: &'a Options, stop_at_non_option: bool) -> Self {
        let groups = options
            .option_groups()
            .iter()
            .cloned()
            .map(|mut group| {
                group.set_selected(None).ok();
                group
            })
            .collect();

        Self {
            options,
            stop_at_non_option,
            cmd: CommandLine::default(),
            required: options.required_keys(),
            groups,
        }
    }

    fn run(&mut self, tokens: &[String]) -> Result<(), ParseError> {
        let mut eat_the_rest = false;
        let mut i = 0;

        while i < tokens.len() {
            let token = tokens[i].as_str();

            if token == "--" {
                eat_the_rest = true;
            } else if token == "-" {
                if self.stop_at_non_option {
                    eat_the_rest = true;
                } else {
                    self.cmd.push_arg(token);
                }
            } else if token.starts_with('-') {
                if self.stop_at_non_option && !self.options.has_option(token) {
                    eat_the_rest = true;
                    self.cmd.push_arg(token);
                } else {
                    i = self.process_option(token, tokens, i)?;
                }
            } else {
                self.cmd.push_arg(token);
                if self.stop_at_non_option {
                    eat_the_rest = true;
                }
            }

            if eat_the_rest {
                for rest in &tokens[i + 1..] {
                    if rest != "--" {
                        self.cmd.push_arg(rest.as_str());
                    }
                }
                break;
            }
            i += 1;
        }
        Ok(())
    }

    /// Bind the option named by `tokens[index]`; returns the last index consumed.
    fn process_option(
        &mut self,
        token: &str,
        tokens: &[String],
        index: usize,
    ) -> Result<usize, ParseError> {
        let def = self
            .options
            .option(token)
            .ok_or_else(|| ParseError::UnrecognizedOption(token.to_string()))?;

        let mut opt = def.clone_definition();
        self.update_required(&opt)?;

        let mut index = index;
        if opt.has_arg() {
            index = self.process_args(&mut opt, tokens, index)?;
        }

        trace!(option = opt.key(), values = ?opt.values(), "matched option");
        self.cmd.push_option(opt);
        Ok(index)
    }

    /// Consume values following `tokens[index]` until the option is full or
    /// another registered option shows up.
    fn process_args(
        &self,
        opt: &mut Opt,
        tokens: &[String],
        mut index: usize,
    ) -> Result<usize, ParseError> {
        while let Some(next) = tokens.get(index + 1) {
            if next.starts_with('-') && self.options.has_option(next) {
                break;
            }
            if opt
                .add_value(strip_leading_and_trailing_quotes(next))
                .is_err()
            {
                break;
            }
            index += 1;
        }

        if opt.values().is_empty() && !opt.has_optional_arg() {
            return Err(ParseError::MissingArgument(Box::new(opt.clone())));
        }
        Ok(index)
    }

    /// Mark `opt` (or its group) as satisfied and record the group selection.
    fn update_required(&mut self, opt: &Opt) -> Result<(), ParseError> {
        if opt.is_required() {
            let key = opt.key();
            self.required.retain(|r| *r != Required::Opt(key));
        }

        if let Some(index) = self.options.group_index(opt.key()) {
            let group = &mut self.groups[index];
            if group.is_required() {
                self.required.retain(|r| *r != Required::Group(index));
            }
            group.set_selected(Some(opt))?;
        }
        Ok(())
    }

    fn group_selected(&self, opt: &Opt) -> bool {
        self.options
            .group_index(opt.key())
            .is_some_and(|i| self.groups[i].selected().is_some())
    }

    fn apply_properties(&mut self, properties: &[(String, String)]) -> Result<(), ParseError> {
        for (name, value) in properties {
            let def = self
                .options
                .option(name)
                .ok_or_else(|| ParseError::UnrecognizedOption(name.clone()))?;

            if self.cmd.has_option(name) || self.group_selected(def) {
                trace!(property = name.as_str(), "already set, skipping");
                continue;
            }

            let mut opt = def.clone_definition();
            if opt.has_arg() {
                if opt.values().is_empty() {
                    // a value the option cannot hold is dropped
                    opt.add_value(value).ok();
                }
            } else if !is_truthy(value) {
                continue;
            }

            trace!(property = name.as_str(), value = value.as_str(), "applied property");
            self.update_required(&opt)?;
            self.cmd.push_option(opt);
        }
        Ok(())
    }

    fn finish(mut self) -> Result<CommandLine, ParseError> {
        if !self.required.is_empty() {
            let missing = self
                .required
                .iter()
                .map(|r| match *r {
                    Required::Opt(key) => RequiredItem::Opt(key.to_string()),
                    Required::Group(i) => RequiredItem::Group(self.groups[i].clone()),
                })
                .collect();
            return Err(ParseError::MissingOptions(missing));
        }

        self.cmd.set_groups(self.groups);
        Ok(self.cmd)
    }
}

fn is_truthy(value: &str) -> bool {
    ["yes", "true", "1"]
        .iter()
        .any(|t| value.eq_ignore_ascii_case(t))
}
