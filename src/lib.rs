//! optparse - command-line option parsing and help formatting.
//!
//! An [`Options`] registry describes the options a program accepts. The
//! [`Parser`] turns an argument list into a [`CommandLine`], and the
//! [`HelpFormatter`] renders usage lines and option tables from the same
//! registry.
//!
//! ```
//! use optparse::{parse, Options};
//!
//! let mut options = Options::new();
//! options.add("v", false, "be noisy").unwrap();
//! options.add_long(Some("o"), "output", true, "write to FILE").unwrap();
//!
//! let cmd = parse(&options, &["-v", "--output", "out.txt", "input"]).unwrap();
//! assert!(cmd.has_option("v"));
//! assert_eq!(cmd.option_value("o"), Some("out.txt"));
//! assert_eq!(cmd.args(), ["input"]);
//! ```

pub mod command_line;
pub mod config;
pub mod group;
pub mod help;
pub mod option;
pub mod options;
pub mod output;
pub mod parser;
pub mod pattern;
pub mod util;
pub mod value;

pub use command_line::CommandLine;
pub use config::{Config, ConfigError};
pub use group::{AlreadySelectedError, OptionGroup};
pub use help::{HelpError, HelpFormatter};
pub use option::{Arity, Opt, OptBuilder, OptionError};
pub use options::{Options, RequiredItem};
pub use output::{generate_json, generate_output, generate_output_string};
pub use parser::{parse, ParseError, Parser};
pub use pattern::parse_pattern;
pub use value::{create_value, ConversionError, Value, ValueType};
