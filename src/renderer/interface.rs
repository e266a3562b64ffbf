//! Capability interface of the terminal dialog renderer
//!
//! The controller never draws anything itself. It describes a widget with one
//! of the request configs below and hands it to a renderer, which owns the
//! terminal until the user submits or cancels.

use crate::error::Result;
use crate::types::{Choice, FormElement, Geometry, MenuItem, TimeOfDay};
use std::path::PathBuf;

/// Outcome of one rendering round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition<T> {
    /// The user confirmed the widget; `T` is the raw result.
    Accepted(T),
    /// The user pressed cancel or escape.
    Cancelled,
    /// The user pressed the help button.
    HelpRequested,
}

impl<T> Disposition<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Disposition<U> {
        match self {
            Disposition::Accepted(value) => Disposition::Accepted(f(value)),
            Disposition::Cancelled => Disposition::Cancelled,
            Disposition::HelpRequested => Disposition::HelpRequested,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Disposition::Accepted(_))
    }

    /// Short name used in log lines; never includes the payload.
    pub fn label(&self) -> &'static str {
        match self {
            Disposition::Accepted(_) => "accepted",
            Disposition::Cancelled => "cancelled",
            Disposition::HelpRequested => "help",
        }
    }
}

/// Display-only boxes: message, scroll box and yes/no question
#[derive(Debug, Clone, PartialEq)]
pub struct MessageConfig {
    pub text: String,
    pub geometry: Geometry,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuConfig {
    pub text: String,
    pub geometry: Geometry,
    pub title: String,
    pub items: Vec<MenuItem>,
}

/// Radio list and check list
#[derive(Debug, Clone, PartialEq)]
pub struct ListConfig {
    pub text: String,
    pub geometry: Geometry,
    pub title: String,
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormConfig {
    pub text: String,
    pub geometry: Geometry,
    pub title: String,
    pub elements: Vec<FormElement>,
}

/// File and folder selection
#[derive(Debug, Clone, PartialEq)]
pub struct FileConfig {
    pub path: PathBuf,
    pub geometry: Geometry,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputConfig {
    pub text: String,
    pub geometry: Geometry,
    pub title: String,
    pub init: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PasswordConfig {
    pub text: String,
    pub geometry: Geometry,
    pub title: String,
    pub init: String,
    /// Echo an asterisk for every typed character.
    pub insecure: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeConfig {
    pub text: String,
    pub geometry: Geometry,
    pub title: String,
    pub initial: Option<TimeOfDay>,
}

/// Widgets that pick tags out of a list
pub trait ChoiceRenderer {
    fn render_menu(&self, config: &MenuConfig) -> Result<Disposition<String>>;

    /// An accepted empty string means nothing was selected.
    fn render_radio_list(&self, config: &ListConfig) -> Result<Disposition<String>>;

    /// Tags come back in the order the toolkit produced them.
    fn render_check_list(&self, config: &ListConfig) -> Result<Disposition<Vec<String>>>;
}

/// Widgets that collect typed input
pub trait InputRenderer {
    fn render_input_box(&self, config: &InputConfig) -> Result<Disposition<String>>;

    fn render_password_box(&self, config: &PasswordConfig) -> Result<Disposition<String>>;

    /// One value per form element, in element order.
    fn render_form(&self, config: &FormConfig) -> Result<Disposition<Vec<String>>>;

    fn render_time_box(&self, config: &TimeConfig) -> Result<Disposition<TimeOfDay>>;
}

/// File system pickers. The raw path may be empty.
pub trait FileRenderer {
    fn render_file_select(&self, config: &FileConfig) -> Result<Disposition<String>>;

    fn render_folder_select(&self, config: &FileConfig) -> Result<Disposition<String>>;
}

/// Boxes that only show text
pub trait DisplayRenderer {
    fn render_message(&self, config: &MessageConfig) -> Result<()>;

    fn render_scroll_box(&self, config: &MessageConfig) -> Result<()>;

    /// `Accepted` for yes, `Cancelled` for no.
    fn render_yes_no(&self, config: &MessageConfig) -> Result<Disposition<()>>;
}

/// Combined interface that provides every widget kind
pub trait DialogRenderer:
    ChoiceRenderer + InputRenderer + FileRenderer + DisplayRenderer
{
}

// Blanket implementation for any type that implements all widget interfaces
impl<T> DialogRenderer for T where
    T: ChoiceRenderer + InputRenderer + FileRenderer + DisplayRenderer
{
}

// A shared reference renders the same way as the renderer itself, so a
// controller can borrow a renderer the caller keeps inspecting.
impl<R: ChoiceRenderer + ?Sized> ChoiceRenderer for &R {
    fn render_menu(&self, config: &MenuConfig) -> Result<Disposition<String>> {
        (**self).render_menu(config)
    }

    fn render_radio_list(&self, config: &ListConfig) -> Result<Disposition<String>> {
        (**self).render_radio_list(config)
    }

    fn render_check_list(&self, config: &ListConfig) -> Result<Disposition<Vec<String>>> {
        (**self).render_check_list(config)
    }
}

impl<R: InputRenderer + ?Sized> InputRenderer for &R {
    fn render_input_box(&self, config: &InputConfig) -> Result<Disposition<String>> {
        (**self).render_input_box(config)
    }

    fn render_password_box(&self, config: &PasswordConfig) -> Result<Disposition<String>> {
        (**self).render_password_box(config)
    }

    fn render_form(&self, config: &FormConfig) -> Result<Disposition<Vec<String>>> {
        (**self).render_form(config)
    }

    fn render_time_box(&self, config: &TimeConfig) -> Result<Disposition<TimeOfDay>> {
        (**self).render_time_box(config)
    }
}

impl<R: FileRenderer + ?Sized> FileRenderer for &R {
    fn render_file_select(&self, config: &FileConfig) -> Result<Disposition<String>> {
        (**self).render_file_select(config)
    }

    fn render_folder_select(&self, config: &FileConfig) -> Result<Disposition<String>> {
        (**self).render_folder_select(config)
    }
}

impl<R: DisplayRenderer + ?Sized> DisplayRenderer for &R {
    fn render_message(&self, config: &MessageConfig) -> Result<()> {
        (**self).render_message(config)
    }

    fn render_scroll_box(&self, config: &MessageConfig) -> Result<()> {
        (**self).render_scroll_box(config)
    }

    fn render_yes_no(&self, config: &MessageConfig) -> Result<Disposition<()>> {
        (**self).render_yes_no(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disposition_map_keeps_variant() {
        let accepted: Disposition<&str> = Disposition::Accepted("7");
        assert_eq!(accepted.map(str::len), Disposition::Accepted(1));
        assert_eq!(Disposition::<&str>::Cancelled.map(str::len), Disposition::Cancelled);
        assert_eq!(
            Disposition::<&str>::HelpRequested.map(str::len),
            Disposition::HelpRequested
        );
    }

    #[test]
    fn test_disposition_label() {
        assert_eq!(Disposition::Accepted("secret").label(), "accepted");
        assert_eq!(Disposition::<()>::Cancelled.label(), "cancelled");
        assert!(!Disposition::<()>::HelpRequested.is_accepted());
    }
}
