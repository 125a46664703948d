//! Typed conversion of option values after parsing.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Deserialize;
use std::fs::File;
use std::path::PathBuf;
use thiserror::Error;
use url::Url;

/// Errors raised when converting an option value to its declared type.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("unable to parse the option value as a number: {0}")]
    InvalidNumber(String),

    #[error("unable to parse the option value as a date: {0}")]
    InvalidDate(String),

    #[error("unable to find the file specified: {path}")]
    FileNotFound {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse the URL: {value}")]
    InvalidUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported URL scheme '{scheme}' in: {value}")]
    UnsupportedScheme { value: String, scheme: String },
}

/// The declared type of an option's value.
///
/// Only consulted by [`create_value`]; parsing itself always works on strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// Plain string (default)
    #[default]
    String,
    /// Integer, or float when the text contains a `.`
    Number,
    /// RFC 3339 timestamp or `YYYY-MM-DD` date
    Date,
    /// File system path, not checked for existence
    Path,
    /// Path to a file that must exist and is opened for reading
    ExistingFile,
    /// Absolute `http` or `https` URL
    Url,
}

impl ValueType {
    /// Map a pattern value code to its type.
    ///
    /// Returns `None` for characters that are not value codes.
    pub fn from_code(code: char) -> Option<ValueType> {
        match code {
            '@' | ':' | '+' => Some(ValueType::String),
            '%' => Some(ValueType::Number),
            '#' => Some(ValueType::Date),
            '>' | '*' => Some(ValueType::Path),
            '<' => Some(ValueType::ExistingFile),
            '/' => Some(ValueType::Url),
            _ => None,
        }
    }
}

/// A converted option value.
#[derive(Debug)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Date(DateTime<FixedOffset>),
    Day(NaiveDate),
    Path(PathBuf),
    File(File),
    Url(Url),
}

/// Convert `text` to a value of type `ty`.
pub fn create_value(text: &str, ty: ValueType) -> Result<Value, ConversionError> {
    match ty {
        ValueType::String => Ok(Value::String(text.to_string())),
        ValueType::Number => create_number(text),
        ValueType::Date => create_date(text),
        ValueType::Path => Ok(Value::Path(PathBuf::from(text))),
        ValueType::ExistingFile => File::open(text)
            .map(Value::File)
            .map_err(|source| ConversionError::FileNotFound {
                path: text.to_string(),
                source,
            }),
        ValueType::Url => create_url(text),
    }
}

fn create_number(text: &str) -> Result<Value, ConversionError> {
    let invalid = || ConversionError::InvalidNumber(text.to_string());
    if text.contains('.') {
        text.parse::<f64>().map(Value::Float).map_err(|_| invalid())
    } else {
        text.parse::<i64>().map(Value::Integer).map_err(|_| invalid())
    }
}

fn create_date(text: &str) -> Result<Value, ConversionError> {
    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Ok(Value::Date(date));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map(Value::Day)
        .map_err(|_| ConversionError::InvalidDate(text.to_string()))
}

fn create_url(text: &str) -> Result<Value, ConversionError> {
    let url = Url::parse(text).map_err(|source| ConversionError::InvalidUrl {
        value: text.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(Value::Url(url)),
        scheme => Err(ConversionError::UnsupportedScheme {
            value: text.to_string(),
            scheme: scheme.to_string(),
        }),
    }
}
