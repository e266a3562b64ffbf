//! Common types used across the dialogwiz crate.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Size of a dialog box in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Geometry {
    pub height: u16,
    pub width: u16,
}

impl Geometry {
    pub fn new(height: u16, width: u16) -> Self {
        Self { height, width }
    }

    /// Zero in either dimension lets the toolkit size the box itself.
    pub fn auto() -> Self {
        Self { height: 0, width: 0 }
    }
}

/// One entry of a menu.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MenuItem {
    pub tag: String,
    pub label: String,
}

impl MenuItem {
    pub fn new(tag: impl Into<String>, label: impl Into<String>) -> Self {
        Self { tag: tag.into(), label: label.into() }
    }
}

/// One entry of a radio list or check list.
///
/// Radio lists expect at most one entry with `selected` set; that is left to
/// the caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Choice {
    pub tag: String,
    pub label: String,
    #[serde(default)]
    pub selected: bool,
}

impl Choice {
    pub fn new(tag: impl Into<String>, label: impl Into<String>, selected: bool) -> Self {
        Self { tag: tag.into(), label: label.into(), selected }
    }
}

/// One editable field of a form. Field order is preserved in the result.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FormElement {
    pub label: String,
    #[serde(default)]
    pub value: String,
    #[serde(default = "get_default_field_width")]
    pub field_width: u16,
    #[serde(default = "get_default_input_width")]
    pub input_width: u16,
    #[serde(default)]
    pub hidden: bool,
}

impl FormElement {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            field_width: get_default_field_width(),
            input_width: get_default_input_width(),
            hidden: false,
        }
    }

    pub fn with_widths(mut self, field_width: u16, input_width: u16) -> Self {
        self.field_width = field_width;
        self.input_width = input_width;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

fn get_default_field_width() -> u16 {
    30
}

fn get_default_input_width() -> u16 {
    100
}

/// A wall-clock time as chosen in a time box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8, second: u8) -> Result<Self> {
        if hour > 23 || minute > 59 || second > 59 {
            return Err(Error::InvalidTime(format!("{hour:02}:{minute:02}:{second:02}")));
        }
        Ok(Self { hour, minute, second })
    }
}

impl FromStr for TimeOfDay {
    type Err = Error;

    /// Parses `HH:MM` or `HH:MM:SS`; a missing second is 0.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidTime(s.to_string());
        let parts: Vec<&str> = s.trim().split(':').collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(invalid());
        }

        let mut numbers = Vec::with_capacity(3);
        for part in &parts {
            if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            numbers.push(part.parse::<u8>().map_err(|_| invalid())?);
        }
        numbers.resize(3, 0);

        TimeOfDay::new(numbers[0], numbers[1], numbers[2]).map_err(|_| invalid())
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}
