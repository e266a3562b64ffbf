//! Dialoguer-based implementation of the renderer interfaces
//!
//! Draws every widget inline on the terminal. Dialoguer has no help button, so
//! this renderer never reports [`Disposition::HelpRequested`]. Escape on a
//! selection widget and Ctrl-C on a text widget both count as cancel.

use super::interface::{
    ChoiceRenderer, DisplayRenderer, Disposition, FileConfig, FileRenderer, FormConfig,
    InputConfig, InputRenderer, ListConfig, MenuConfig, MessageConfig, PasswordConfig,
    TimeConfig,
};
use crate::error::{Error, Result};
use crate::types::TimeOfDay;
use dialoguer::console::{style, Term};
use dialoguer::{Confirm, Input, MultiSelect, Password, Select};
use log::debug;
use std::io::ErrorKind;

/// Dialoguer-based implementation of all renderer interfaces
pub struct DialoguerRenderer {
    background_title: String,
}

impl DialoguerRenderer {
    pub fn new(background_title: impl Into<String>) -> Self {
        Self { background_title: background_title.into() }
    }

    pub fn background_title(&self) -> &str {
        &self.background_title
    }

    /// Print the background title and the widget title above a widget.
    fn header(&self, title: &str) -> Result<()> {
        let term = Term::stderr();
        if !self.background_title.is_empty() {
            term.write_line(&style(&self.background_title).dim().to_string())?;
        }
        if !title.is_empty() {
            term.write_line(&style(title).bold().to_string())?;
        }
        Ok(())
    }

    fn prompt_line(text: &str) -> String {
        text.trim().to_string()
    }

    /// Free text with an editable initial value
    fn read_text(&self, prompt: &str, init: &str) -> Result<Disposition<String>> {
        let input = Input::<String>::new()
            .with_prompt(prompt)
            .with_initial_text(init)
            .allow_empty(true)
            .interact_text();
        cancel_on_interrupt(input)
    }

    fn read_password(&self, prompt: &str) -> Result<Disposition<String>> {
        let password =
            Password::new().with_prompt(prompt).allow_empty_password(true).interact();
        cancel_on_interrupt(password)
    }

    /// Pause until the user presses a key.
    fn wait_for_key(&self, text: &str) -> Result<()> {
        let term = Term::stderr();
        for line in text.lines() {
            term.write_line(line)?;
        }
        term.write_line(&style("Press any key to continue").dim().to_string())?;
        term.read_key()?;
        Ok(())
    }
}

impl Default for DialoguerRenderer {
    fn default() -> Self {
        Self::new("")
    }
}

/// Turn a Ctrl-C on a text widget into a cancellation.
fn cancel_on_interrupt<T>(
    result: std::result::Result<T, dialoguer::Error>,
) -> Result<Disposition<T>> {
    match result {
        Ok(value) => Ok(Disposition::Accepted(value)),
        Err(dialoguer::Error::IO(err)) if err.kind() == ErrorKind::Interrupted => {
            Ok(Disposition::Cancelled)
        }
        Err(err) => Err(Error::Dialoguer(err)),
    }
}

/// `None` from an `interact_opt` call means escape or `q` was pressed.
fn cancel_on_none<T>(result: Option<T>) -> Disposition<T> {
    match result {
        Some(value) => Disposition::Accepted(value),
        None => Disposition::Cancelled,
    }
}

impl ChoiceRenderer for DialoguerRenderer {
    fn render_menu(&self, config: &MenuConfig) -> Result<Disposition<String>> {
        self.header(&config.title)?;
        let lines: Vec<String> = config
            .items
            .iter()
            .map(|item| format!("{:<12} {}", item.tag, item.label))
            .collect();

        let selection = Select::new()
            .with_prompt(Self::prompt_line(&config.text))
            .items(&lines)
            .default(0)
            .interact_opt()?;

        Ok(cancel_on_none(selection).map(|index| config.items[index].tag.clone()))
    }

    fn render_radio_list(&self, config: &ListConfig) -> Result<Disposition<String>> {
        self.header(&config.title)?;
        let labels: Vec<&str> = config.choices.iter().map(|c| c.label.as_str()).collect();
        let default_index = config.choices.iter().position(|c| c.selected).unwrap_or(0);

        let selection = Select::new()
            .with_prompt(Self::prompt_line(&config.text))
            .items(&labels)
            .default(default_index)
            .interact_opt()?;

        Ok(cancel_on_none(selection).map(|index| config.choices[index].tag.clone()))
    }

    fn render_check_list(&self, config: &ListConfig) -> Result<Disposition<Vec<String>>> {
        self.header(&config.title)?;
        let labels: Vec<&str> = config.choices.iter().map(|c| c.label.as_str()).collect();
        let defaults: Vec<bool> = config.choices.iter().map(|c| c.selected).collect();

        let indices = MultiSelect::new()
            .with_prompt(Self::prompt_line(&config.text))
            .items(&labels)
            .defaults(&defaults)
            .interact_opt()?;

        Ok(cancel_on_none(indices).map(|indices| {
            indices.into_iter().map(|index| config.choices[index].tag.clone()).collect()
        }))
    }
}

impl InputRenderer for DialoguerRenderer {
    fn render_input_box(&self, config: &InputConfig) -> Result<Disposition<String>> {
        self.header(&config.title)?;
        self.read_text(&Self::prompt_line(&config.text), &config.init)
    }

    fn render_password_box(&self, config: &PasswordConfig) -> Result<Disposition<String>> {
        if config.insecure {
            debug!("Terminal password prompt never echoes input; insecure flag ignored");
        }
        self.header(&config.title)?;
        self.read_password(&Self::prompt_line(&config.text))
    }

    fn render_form(&self, config: &FormConfig) -> Result<Disposition<Vec<String>>> {
        self.header(&config.title)?;
        if !config.text.trim().is_empty() {
            Term::stderr().write_line(config.text.trim())?;
        }

        let mut values = Vec::with_capacity(config.elements.len());
        for element in &config.elements {
            let label = Self::prompt_line(&element.label);
            let field = if element.hidden {
                self.read_password(&label)?
            } else {
                self.read_text(&label, &element.value)?
            };
            match field {
                Disposition::Accepted(value) => values.push(value),
                Disposition::Cancelled => return Ok(Disposition::Cancelled),
                Disposition::HelpRequested => return Ok(Disposition::HelpRequested),
            }
        }
        Ok(Disposition::Accepted(values))
    }

    fn render_time_box(&self, config: &TimeConfig) -> Result<Disposition<TimeOfDay>> {
        self.header(&config.title)?;
        let init = config
            .initial
            .map(|time| format!("{:02}:{:02}", time.hour, time.minute))
            .unwrap_or_default();

        let input = Input::<String>::new()
            .with_prompt(format!("{} (HH:MM)", Self::prompt_line(&config.text)))
            .with_initial_text(init)
            .validate_with(|raw: &String| -> std::result::Result<(), String> {
                raw.parse::<TimeOfDay>().map(|_| ()).map_err(|err| err.to_string())
            })
            .interact_text();

        match cancel_on_interrupt(input)? {
            Disposition::Accepted(raw) => Ok(Disposition::Accepted(raw.parse()?)),
            Disposition::Cancelled => Ok(Disposition::Cancelled),
            Disposition::HelpRequested => Ok(Disposition::HelpRequested),
        }
    }
}

impl FileRenderer for DialoguerRenderer {
    fn render_file_select(&self, config: &FileConfig) -> Result<Disposition<String>> {
        self.header(&config.title)?;
        self.read_text("File", &config.path.to_string_lossy())
    }

    fn render_folder_select(&self, config: &FileConfig) -> Result<Disposition<String>> {
        self.header(&config.title)?;
        self.read_text("Folder", &config.path.to_string_lossy())
    }
}

impl DisplayRenderer for DialoguerRenderer {
    fn render_message(&self, config: &MessageConfig) -> Result<()> {
        self.header(&config.title)?;
        self.wait_for_key(&config.text)
    }

    fn render_scroll_box(&self, config: &MessageConfig) -> Result<()> {
        self.header(&config.title)?;
        let term = Term::stderr();
        let page = usize::from(term.size().0.saturating_sub(2)).max(1);

        let lines: Vec<&str> = config.text.lines().collect();
        let mut chunks = lines.chunks(page).peekable();
        while let Some(chunk) = chunks.next() {
            if chunks.peek().is_some() {
                for line in chunk {
                    term.write_line(line)?;
                }
                term.write_line(&style("-- more --").dim().to_string())?;
                term.read_key()?;
            } else {
                self.wait_for_key(&chunk.join("\n"))?;
            }
        }
        if lines.is_empty() {
            self.wait_for_key("")?;
        }
        Ok(())
    }

    fn render_yes_no(&self, config: &MessageConfig) -> Result<Disposition<()>> {
        self.header(&config.title)?;
        let answer = Confirm::new()
            .with_prompt(Self::prompt_line(&config.text))
            .default(true)
            .interact_opt()?;

        Ok(match answer {
            Some(true) => Disposition::Accepted(()),
            Some(false) | None => Disposition::Cancelled,
        })
    }
}
