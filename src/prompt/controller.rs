//! Interaction controller: render, validate, retry, cancel
//!
//! Every prompt call renders its widget, checks the accepted result and either
//! returns it or shows a diagnostic box and renders again. Cancellation goes
//! through the controller's [`CancellationPolicy`].

use super::cancel::{CancelAction, CancellationPolicy, Response};
use super::spec::{
    FileSpec, FolderSpec, FormSpec, InputSpec, ListSpec, MenuSpec, MessageSpec, PasswordSpec,
    PromptKind, PromptSpec, TimeSpec,
};
use super::Answer;
use crate::constants::diagnostics;
use crate::error::{Error, Result};
use crate::renderer::interface::{
    DialogRenderer, Disposition, FileConfig, FormConfig, InputConfig, ListConfig, MenuConfig,
    MessageConfig, PasswordConfig, TimeConfig,
};
use crate::types::{Geometry, TimeOfDay};
use crate::validation::{ExtensionPolicy, ValidatorKind};
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// A rejected submission: the text and height of the box explaining why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub text: String,
    pub height: u16,
}

impl Diagnostic {
    fn new(text: impl Into<String>, height: u16) -> Self {
        Self { text: text.into(), height }
    }

    fn empty_value() -> Self {
        Self::new(diagnostics::EMPTY_VALUE, diagnostics::TALL_HEIGHT)
    }

    fn select_one() -> Self {
        Self::new(diagnostics::SELECT_ONE, diagnostics::SHORT_HEIGHT)
    }

    fn format(validator: &ValidatorKind) -> Self {
        Self::new(validator.diagnostic(), validator.diagnostic_height())
    }
}

/// How a `HelpRequested` disposition is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OnHelp {
    /// Show the widget again.
    Reprompt,
    /// Handle it like a cancellation.
    Cancel,
}

/// Drives one interactive session through a renderer.
///
/// The controller holds no state between calls beyond its renderer and its
/// cancellation policy, so it is reused for every prompt of a session.
pub struct DialogController<R: DialogRenderer> {
    renderer: R,
    policy: CancellationPolicy,
    diagnostic_title: String,
}

impl<R: DialogRenderer> DialogController<R> {
    pub fn new(renderer: R, policy: CancellationPolicy) -> Self {
        Self { renderer, policy, diagnostic_title: diagnostics::TITLE.to_string() }
    }

    /// Title of the boxes shown when a submission is rejected.
    pub fn with_diagnostic_title(mut self, title: impl Into<String>) -> Self {
        self.diagnostic_title = title.into();
        self
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn policy(&self) -> &CancellationPolicy {
        &self.policy
    }

    /// Runs any prompt kind and wraps its result in an [`Answer`].
    pub fn prompt(&self, spec: &PromptSpec) -> Result<Answer> {
        let answer = match spec {
            PromptSpec::Menu(spec) => self.menu(spec)?.into(),
            PromptSpec::Message(spec) => {
                self.message(spec)?;
                Answer::Shown
            }
            PromptSpec::Form(spec) => self.form(spec)?.into(),
            PromptSpec::FileSelect(spec) => self.file_select(spec)?.into(),
            PromptSpec::FolderSelect(spec) => self.folder_select(spec)?.into(),
            PromptSpec::RadioList(spec) => self.radio_list(spec)?.into(),
            PromptSpec::CheckList(spec) => self.check_list(spec)?.into(),
            PromptSpec::InputBox(spec) => self.input_box(spec)?.into(),
            PromptSpec::PasswordBox(spec) => self.password_box(spec)?.into(),
            PromptSpec::TimeBox(spec) => self.time_box(spec)?.into(),
            PromptSpec::YesNo(spec) => Answer::Confirmed(self.yes_no(spec)?),
            PromptSpec::ScrollBox(spec) => {
                self.scroll_box(spec)?;
                Answer::Shown
            }
        };
        Ok(answer)
    }

    /// Shows a message box.
    pub fn message(&self, spec: &MessageSpec) -> Result<()> {
        debug!("Showing {} '{}'", PromptKind::Message, spec.title);
        self.renderer.render_message(&self.create_message_config(spec))
    }

    /// Shows a scrollable text box.
    pub fn scroll_box(&self, spec: &MessageSpec) -> Result<()> {
        debug!("Showing {} '{}'", PromptKind::ScrollBox, spec.title);
        self.renderer.render_scroll_box(&self.create_message_config(spec))
    }

    /// Asks a yes/no question. The answer is returned as is; saying no or
    /// pressing escape is not a cancellation.
    pub fn yes_no(&self, spec: &MessageSpec) -> Result<bool> {
        let disposition = self.renderer.render_yes_no(&self.create_message_config(spec))?;
        debug!("{} dialog returned {}", PromptKind::YesNo, disposition.label());
        Ok(disposition.is_accepted())
    }

    /// Shows a menu and returns the chosen tag.
    pub fn menu(&self, spec: &MenuSpec) -> Result<Response<String>> {
        spec.check()?;
        let config = self.create_menu_config(spec);
        self.run(PromptKind::Menu, OnHelp::Cancel, || self.renderer.render_menu(&config), |_| None)
    }

    /// Shows a form. Every field must be non-empty and, when the spec has a
    /// validator, every field must pass it; otherwise the whole form is shown
    /// again.
    pub fn form(&self, spec: &FormSpec) -> Result<Response<Vec<String>>> {
        spec.check()?;
        let config = self.create_form_config(spec);
        let expected = spec.elements.len();

        self.run_checked(
            PromptKind::Form,
            OnHelp::Reprompt,
            || self.renderer.render_form(&config),
            |fields| {
                if fields.len() != expected {
                    return Err(Error::MalformedPrompt(format!(
                        "form has {expected} elements but the renderer returned {} values",
                        fields.len()
                    )));
                }
                if fields.iter().any(String::is_empty) {
                    return Ok(Some(Diagnostic::empty_value()));
                }
                Ok(spec.validator.as_ref().and_then(|validator| {
                    let passed = fields.iter().filter(|field| validator.validate(field)).count();
                    (passed != expected).then(|| {
                        debug!("{passed} of {expected} form fields passed {validator:?}");
                        Diagnostic::format(validator)
                    })
                }))
            },
        )
    }

    /// Shows a file picker. The selection must be non-empty, must exist as a
    /// regular file when the spec asks for it, and must carry an allowed
    /// extension.
    pub fn file_select(&self, spec: &FileSpec) -> Result<Response<PathBuf>> {
        spec.check()?;
        let config = self.create_file_config(&spec.path, spec.geometry(), &spec.title);

        let response = self.run(
            PromptKind::FileSelect,
            OnHelp::Reprompt,
            || self.renderer.render_file_select(&config),
            |selection| check_file_selection(selection, spec),
        )?;
        Ok(response.map(PathBuf::from))
    }

    /// Shows a folder picker. Any non-empty path is accepted; the folder is not
    /// checked on disk.
    pub fn folder_select(&self, spec: &FolderSpec) -> Result<Response<PathBuf>> {
        let config = self.create_file_config(&spec.path, spec.geometry(), &spec.title);

        let response = self.run(
            PromptKind::FolderSelect,
            OnHelp::Reprompt,
            || self.renderer.render_folder_select(&config),
            |selection| selection.is_empty().then(Diagnostic::empty_value),
        )?;
        Ok(response.map(PathBuf::from))
    }

    /// Shows a radio list and returns the selected tag.
    pub fn radio_list(&self, spec: &ListSpec) -> Result<Response<String>> {
        spec.check(PromptKind::RadioList)?;
        if spec.preselected() > 1 {
            warn!("Radio list '{}' starts with more than one selected entry", spec.title);
        }
        let config = self.create_list_config(spec);

        self.run(
            PromptKind::RadioList,
            OnHelp::Reprompt,
            || self.renderer.render_radio_list(&config),
            |tag| tag.is_empty().then(Diagnostic::select_one),
        )
    }

    /// Shows a check list and returns the selected tags in renderer order.
    pub fn check_list(&self, spec: &ListSpec) -> Result<Response<Vec<String>>> {
        spec.check(PromptKind::CheckList)?;
        let config = self.create_list_config(spec);

        self.run(
            PromptKind::CheckList,
            OnHelp::Reprompt,
            || self.renderer.render_check_list(&config),
            |tags| tags.is_empty().then(Diagnostic::select_one),
        )
    }

    /// Shows an input box. The value must be non-empty and pass the spec's
    /// validator, if any.
    pub fn input_box(&self, spec: &InputSpec) -> Result<Response<String>> {
        spec.check()?;
        let config = self.create_input_config(spec);

        self.run(
            PromptKind::InputBox,
            OnHelp::Reprompt,
            || self.renderer.render_input_box(&config),
            |value| check_input(value, spec.validator.as_ref()),
        )
    }

    /// Input box that only accepts an integer number.
    pub fn integer_input_box(&self, spec: &InputSpec) -> Result<Response<String>> {
        self.input_box(&spec.clone().with_validator(ValidatorKind::Integer))
    }

    /// Input box that only accepts a decimal number.
    pub fn decimal_input_box(&self, spec: &InputSpec) -> Result<Response<String>> {
        self.input_box(&spec.clone().with_validator(ValidatorKind::Decimal))
    }

    /// Input box that only accepts a port number.
    pub fn port_input_box(&self, spec: &InputSpec) -> Result<Response<String>> {
        self.input_box(&spec.clone().with_validator(ValidatorKind::Port))
    }

    /// Input box that only accepts a file or folder name.
    pub fn name_input_box(&self, spec: &InputSpec) -> Result<Response<String>> {
        self.input_box(&spec.clone().with_validator(ValidatorKind::FileName))
    }

    /// Input box that only accepts an IP address, host name or `localhost`.
    pub fn host_input_box(&self, spec: &InputSpec) -> Result<Response<String>> {
        self.input_box(&spec.clone().with_validator(ValidatorKind::Host))
    }

    /// Shows a password box. The insecure flag reaches the renderer untouched.
    pub fn password_box(&self, spec: &PasswordSpec) -> Result<Response<String>> {
        let config = self.create_password_config(spec);

        self.run(
            PromptKind::PasswordBox,
            OnHelp::Reprompt,
            || self.renderer.render_password_box(&config),
            |value| value.is_empty().then(Diagnostic::empty_value),
        )
    }

    /// Shows a time box and returns the chosen hour and minute. The second
    /// is always 0.
    pub fn time_box(&self, spec: &TimeSpec) -> Result<Response<TimeOfDay>> {
        let config = self.create_time_config(spec);
        let response = self.run(
            PromptKind::TimeBox,
            OnHelp::Cancel,
            || self.renderer.render_time_box(&config),
            |_| None,
        )?;
        Ok(response.map(|time| TimeOfDay { second: 0, ..time }))
    }

    fn run<T>(
        &self,
        kind: PromptKind,
        on_help: OnHelp,
        render: impl FnMut() -> Result<Disposition<T>>,
        mut check: impl FnMut(&T) -> Option<Diagnostic>,
    ) -> Result<Response<T>> {
        self.run_checked(kind, on_help, render, |value| Ok(check(value)))
    }

    /// The retry loop shared by every cancellable prompt.
    fn run_checked<T>(
        &self,
        kind: PromptKind,
        on_help: OnHelp,
        mut render: impl FnMut() -> Result<Disposition<T>>,
        mut check: impl FnMut(&T) -> Result<Option<Diagnostic>>,
    ) -> Result<Response<T>> {
        loop {
            let disposition = render()?;
            debug!("{kind} dialog returned {}", disposition.label());

            match disposition {
                Disposition::Accepted(value) => match check(&value)? {
                    None => return Ok(Response::Value(value)),
                    Some(diagnostic) => {
                        debug!("Rejected {kind} submission: {}", diagnostic.text.trim());
                        self.show_diagnostic(&diagnostic)?;
                    }
                },
                Disposition::HelpRequested if on_help == OnHelp::Reprompt => {
                    debug!("Help requested, showing {kind} again");
                }
                Disposition::Cancelled | Disposition::HelpRequested => {
                    if let Some(response) = self.cancel(kind)? {
                        return Ok(response);
                    }
                }
            }
        }
    }

    /// Applies the cancellation policy. `None` means render the prompt again.
    fn cancel<T>(&self, kind: PromptKind) -> Result<Option<Response<T>>> {
        debug!("{kind} cancelled, applying {} policy", self.policy.name());
        match &self.policy {
            CancellationPolicy::RaiseInterrupt => Err(Error::Interrupted),
            CancellationPolicy::ReturnSentinel(value) => Ok(Some(Response::Sentinel(value.clone()))),
            CancellationPolicy::InvokeCallback(callback) => match callback() {
                CancelAction::Reprompt => Ok(None),
                CancelAction::Interrupt => Err(Error::Interrupted),
                CancelAction::Sentinel(value) => Ok(Some(Response::Sentinel(value))),
            },
        }
    }

    fn show_diagnostic(&self, diagnostic: &Diagnostic) -> Result<()> {
        self.renderer.render_message(&MessageConfig {
            text: diagnostic.text.clone(),
            geometry: Geometry::new(diagnostic.height, diagnostics::WIDTH),
            title: self.diagnostic_title.clone(),
        })
    }

    // Configuration creation methods

    fn create_message_config(&self, spec: &MessageSpec) -> MessageConfig {
        MessageConfig {
            text: spec.text.clone(),
            geometry: spec.geometry(),
            title: spec.title.clone(),
        }
    }

    fn create_menu_config(&self, spec: &MenuSpec) -> MenuConfig {
        MenuConfig {
            text: spec.text.clone(),
            geometry: spec.geometry(),
            title: spec.title.clone(),
            items: spec.items.clone(),
        }
    }

    fn create_list_config(&self, spec: &ListSpec) -> ListConfig {
        ListConfig {
            text: spec.text.clone(),
            geometry: spec.geometry(),
            title: spec.title.clone(),
            choices: spec.choices.clone(),
        }
    }

    fn create_form_config(&self, spec: &FormSpec) -> FormConfig {
        FormConfig {
            text: spec.text.clone(),
            geometry: spec.geometry(),
            title: spec.title.clone(),
            elements: spec.elements.clone(),
        }
    }

    fn create_file_config(&self, path: &Path, geometry: Geometry, title: &str) -> FileConfig {
        FileConfig { path: path.to_path_buf(), geometry, title: title.to_string() }
    }

    fn create_input_config(&self, spec: &InputSpec) -> InputConfig {
        InputConfig {
            text: spec.text.clone(),
            geometry: spec.geometry(),
            title: spec.title.clone(),
            init: spec.init.clone(),
        }
    }

    fn create_password_config(&self, spec: &PasswordSpec) -> PasswordConfig {
        PasswordConfig {
            text: spec.text.clone(),
            geometry: spec.geometry(),
            title: spec.title.clone(),
            init: spec.init.clone(),
            insecure: spec.insecure,
        }
    }

    fn create_time_config(&self, spec: &TimeSpec) -> TimeConfig {
        TimeConfig {
            text: spec.text.clone(),
            geometry: spec.geometry(),
            title: spec.title.clone(),
            initial: spec.initial,
        }
    }
}

fn check_input(value: &str, validator: Option<&ValidatorKind>) -> Option<Diagnostic> {
    if value.is_empty() {
        return Some(match validator {
            // Format-bound boxes explain the format even for an empty value.
            Some(validator) if *validator != ValidatorKind::NonEmpty => {
                Diagnostic::format(validator)
            }
            _ => Diagnostic::empty_value(),
        });
    }
    validator.filter(|validator| !validator.validate(value)).map(Diagnostic::format)
}

fn check_file_selection(selection: &str, spec: &FileSpec) -> Option<Diagnostic> {
    let required = required_file_description(spec.extensions.as_ref());

    if selection.is_empty() {
        return Some(Diagnostic::new(
            format!("\nInvalid data. Required value: {required}."),
            diagnostics::SHORT_HEIGHT,
        ));
    }

    let path = Path::new(selection);
    if spec.must_exist && !path.is_file() {
        return Some(Diagnostic::new(
            format!("\nFile doesn't exist. Required value: {required}."),
            diagnostics::SHORT_HEIGHT,
        ));
    }

    match &spec.extensions {
        Some(policy) if !policy.matches(path) => Some(Diagnostic::new(
            format!("\nInvalid extension. Required value: {required}."),
            diagnostics::SHORT_HEIGHT,
        )),
        _ => None,
    }
}

fn required_file_description(extensions: Option<&ExtensionPolicy>) -> String {
    match extensions {
        Some(policy) => format!("{} file", policy.describe()),
        None => "existing file".to_string(),
    }
}
