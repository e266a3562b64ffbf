//! Renderer that shells out to the `dialog(1)` program
//!
//! Every widget is one invocation of the program with `--stdout`, so the
//! result can be read from a pipe while the widget itself is drawn on the
//! controlling terminal. The exit status tells accept, cancel and help apart.

use super::interface::{
    ChoiceRenderer, DisplayRenderer, Disposition, FileConfig, FileRenderer, FormConfig,
    InputConfig, InputRenderer, ListConfig, MenuConfig, MessageConfig, PasswordConfig,
    TimeConfig,
};
use crate::constants::{dialog_status, DEFAULT_DIALOG_PROGRAM, DIALOG_PROGRAM_ENV};
use crate::error::{Error, Result};
use crate::ext::PathExt;
use crate::types::{Choice, Geometry, TimeOfDay};
use log::debug;
use std::io::{BufReader, Read, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Output format requested from `--timebox`
const TIME_FORMAT: &str = "%H:%M";

/// `dialog(1)` based implementation of all renderer interfaces
#[derive(Debug, Clone)]
pub struct DialogProgramRenderer {
    program: PathBuf,
    background_title: String,
}

impl DialogProgramRenderer {
    /// Uses the program named by `DIALOGWIZ_DIALOG`, or `dialog` from `PATH`.
    pub fn new(background_title: impl Into<String>) -> Self {
        let program = std::env::var_os(DIALOG_PROGRAM_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DIALOG_PROGRAM));
        Self { program, background_title: background_title.into() }
    }

    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    pub fn program(&self) -> &PathBuf {
        &self.program
    }

    /// Options shared by every widget, placed before the widget flag.
    fn common_args(&self, title: &str) -> Vec<String> {
        let mut args = vec!["--stdout".to_string()];
        if !self.background_title.is_empty() {
            args.push("--backtitle".into());
            args.push(self.background_title.clone());
        }
        if !title.is_empty() {
            args.push("--title".into());
            args.push(title.to_string());
        }
        args
    }

    /// Run one widget and return its exit status and captured stdout.
    fn run(&self, args: &[String]) -> Result<(Option<i32>, String)> {
        debug!("Running {} {}", self.program.display(), args.join(" "));

        let mut child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|err| {
                Error::Renderer(format!(
                    "cannot start '{}': {err}",
                    self.program.display()
                ))
            })?;

        let mut output = Vec::new();
        let read = match child.stdout.take() {
            Some(stdout) => BufReader::new(stdout).read_to_end(&mut output).map(|_| ()),
            None => Ok(()),
        };
        // Reap the child even when reading its output failed
        let status = child.wait()?;
        read?;
        debug!("{} exited with {status}", self.program.display());

        Ok((status.code(), String::from_utf8_lossy(&output).into_owned()))
    }

    fn run_text(&self, args: &[String]) -> Result<Disposition<String>> {
        let (code, output) = self.run(args)?;
        disposition(code, output).map(|d| d.map(|text| strip_newline(&text).to_string()))
    }
}

impl Default for DialogProgramRenderer {
    fn default() -> Self {
        Self::new("")
    }
}

/// Map an exit status onto a disposition, keeping the output for an accept.
fn disposition<T>(code: Option<i32>, output: T) -> Result<Disposition<T>> {
    match code {
        Some(dialog_status::OK) => Ok(Disposition::Accepted(output)),
        Some(dialog_status::CANCEL) | Some(dialog_status::ESC) => Ok(Disposition::Cancelled),
        Some(dialog_status::HELP) => Ok(Disposition::HelpRequested),
        Some(other) => Err(Error::Renderer(format!("dialog exited with status {other}"))),
        None => Err(Error::Renderer("dialog was terminated by a signal".into())),
    }
}

fn strip_newline(output: &str) -> &str {
    output.strip_suffix('\n').unwrap_or(output)
}

fn geometry_args(args: &mut Vec<String>, geometry: Geometry) {
    args.push(geometry.height.to_string());
    args.push(geometry.width.to_string());
}

fn status(selected: bool) -> String {
    let status = if selected { "on" } else { "off" };
    status.to_string()
}

fn menu_args(config: &MenuConfig) -> Vec<String> {
    let mut args = vec!["--menu".to_string(), config.text.clone()];
    geometry_args(&mut args, config.geometry);
    args.push(config.items.len().to_string());
    for item in &config.items {
        args.push(item.tag.clone());
        args.push(item.label.clone());
    }
    args
}

fn list_args(flag: &str, config: &ListConfig) -> Vec<String> {
    let mut args = vec![flag.to_string(), config.text.clone()];
    geometry_args(&mut args, config.geometry);
    args.push(config.choices.len().to_string());
    for Choice { tag, label, selected } in &config.choices {
        args.push(tag.clone());
        args.push(label.clone());
        args.push(status(*selected));
    }
    args
}

fn form_args(config: &FormConfig) -> Vec<String> {
    let mixed = config.elements.iter().any(|element| element.hidden);
    let flag = if mixed { "--mixedform" } else { "--form" };
    let item_column =
        config.elements.iter().map(|e| e.label.chars().count()).max().unwrap_or(0) + 3;

    let mut args = vec![flag.to_string(), config.text.clone()];
    geometry_args(&mut args, config.geometry);
    args.push(config.elements.len().to_string());
    for (index, element) in config.elements.iter().enumerate() {
        let row = (index + 1).to_string();
        args.extend([
            element.label.clone(),
            row.clone(),
            "1".to_string(),
            element.value.clone(),
            row,
            item_column.to_string(),
            element.field_width.to_string(),
            element.input_width.to_string(),
        ]);
        if mixed {
            // 0 is a plain field, 1 hides the typed text
            args.push(if element.hidden { "1" } else { "0" }.to_string());
        }
    }
    args
}

fn file_args(flag: &str, config: &FileConfig) -> Vec<String> {
    let mut args = vec![flag.to_string(), config.path.to_string_lossy().into_owned()];
    geometry_args(&mut args, config.geometry);
    args
}

fn input_args(config: &InputConfig) -> Vec<String> {
    let mut args = vec!["--inputbox".to_string(), config.text.clone()];
    geometry_args(&mut args, config.geometry);
    if !config.init.is_empty() {
        args.push(config.init.clone());
    }
    args
}

/// `--insecure` is a common option, so it comes back separately.
fn password_args(config: &PasswordConfig) -> (Vec<String>, Vec<String>) {
    let common = if config.insecure { vec!["--insecure".to_string()] } else { Vec::new() };
    let mut args = vec!["--passwordbox".to_string(), config.text.clone()];
    geometry_args(&mut args, config.geometry);
    if !config.init.is_empty() {
        args.push(config.init.clone());
    }
    (common, args)
}

fn time_args(config: &TimeConfig) -> Vec<String> {
    let mut args = vec![
        "--time-format".to_string(),
        TIME_FORMAT.to_string(),
        "--timebox".to_string(),
        config.text.clone(),
    ];
    geometry_args(&mut args, config.geometry);
    if let Some(time) = config.initial {
        args.extend([time.hour.to_string(), time.minute.to_string(), "0".to_string()]);
    }
    args
}

fn text_args(flag: &str, config: &MessageConfig) -> Vec<String> {
    let mut args = vec![flag.to_string(), config.text.clone()];
    geometry_args(&mut args, config.geometry);
    args
}

/// One value per element. Missing trailing lines are empty fields.
fn parse_form(output: &str, expected: usize) -> Vec<String> {
    let mut values: Vec<String> = output.lines().map(str::to_string).collect();
    values.resize(expected.max(values.len()), String::new());
    values
}

/// Tags printed one per line by `--separate-output`.
fn parse_check_list(output: &str) -> Vec<String> {
    output.lines().filter(|tag| !tag.is_empty()).map(str::to_string).collect()
}

impl ChoiceRenderer for DialogProgramRenderer {
    fn render_menu(&self, config: &MenuConfig) -> Result<Disposition<String>> {
        let mut args = self.common_args(&config.title);
        args.extend(menu_args(config));
        self.run_text(&args)
    }

    fn render_radio_list(&self, config: &ListConfig) -> Result<Disposition<String>> {
        let mut args = self.common_args(&config.title);
        args.extend(list_args("--radiolist", config));
        self.run_text(&args)
    }

    fn render_check_list(&self, config: &ListConfig) -> Result<Disposition<Vec<String>>> {
        let mut args = self.common_args(&config.title);
        args.push("--separate-output".into());
        args.extend(list_args("--checklist", config));
        let (code, output) = self.run(&args)?;
        Ok(disposition(code, output)?.map(|output| parse_check_list(&output)))
    }
}

impl InputRenderer for DialogProgramRenderer {
    fn render_input_box(&self, config: &InputConfig) -> Result<Disposition<String>> {
        let mut args = self.common_args(&config.title);
        args.extend(input_args(config));
        self.run_text(&args)
    }

    fn render_password_box(&self, config: &PasswordConfig) -> Result<Disposition<String>> {
        let (common, widget) = password_args(config);
        let mut args = self.common_args(&config.title);
        args.extend(common);
        args.extend(widget);
        self.run_text(&args)
    }

    fn render_form(&self, config: &FormConfig) -> Result<Disposition<Vec<String>>> {
        let mut args = self.common_args(&config.title);
        args.extend(form_args(config));
        let (code, output) = self.run(&args)?;
        Ok(disposition(code, output)?
            .map(|output| parse_form(&output, config.elements.len())))
    }

    fn render_time_box(&self, config: &TimeConfig) -> Result<Disposition<TimeOfDay>> {
        let mut args = self.common_args(&config.title);
        args.extend(time_args(config));
        match self.run_text(&args)? {
            Disposition::Accepted(raw) => Ok(Disposition::Accepted(raw.trim().parse()?)),
            Disposition::Cancelled => Ok(Disposition::Cancelled),
            Disposition::HelpRequested => Ok(Disposition::HelpRequested),
        }
    }
}

impl FileRenderer for DialogProgramRenderer {
    fn render_file_select(&self, config: &FileConfig) -> Result<Disposition<String>> {
        let mut args = self.common_args(&config.title);
        args.extend(file_args("--fselect", config));
        self.run_text(&args)
    }

    fn render_folder_select(&self, config: &FileConfig) -> Result<Disposition<String>> {
        let mut args = self.common_args(&config.title);
        args.extend(file_args("--dselect", config));
        self.run_text(&args)
    }
}

impl DisplayRenderer for DialogProgramRenderer {
    fn render_message(&self, config: &MessageConfig) -> Result<()> {
        let mut args = self.common_args(&config.title);
        args.extend(text_args("--msgbox", config));
        // Escape on a message box is not a cancellation
        let (code, _) = self.run(&args)?;
        disposition(code, ())?;
        Ok(())
    }

    fn render_scroll_box(&self, config: &MessageConfig) -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(config.text.as_bytes())?;
        file.flush()?;

        let mut args = self.common_args(&config.title);
        args.push("--textbox".into());
        args.push(file.path().to_str_checked()?.to_string());
        geometry_args(&mut args, config.geometry);
        let (code, _) = self.run(&args)?;
        disposition(code, ())?;
        Ok(())
    }

    fn render_yes_no(&self, config: &MessageConfig) -> Result<Disposition<()>> {
        let mut args = self.common_args(&config.title);
        args.extend(text_args("--yesno", config));
        let (code, _) = self.run(&args)?;
        disposition(code, ())
    }
}
