//! Renderer that replays predefined replies
//!
//! Useful for automation, testing, or CI/CD environments where no terminal is
//! attached. Replies are consumed in order; message and scroll boxes do not
//! consume anything and are only recorded.

use super::interface::{
    ChoiceRenderer, DisplayRenderer, Disposition, FileConfig, FileRenderer, FormConfig,
    InputConfig, InputRenderer, ListConfig, MenuConfig, MessageConfig, PasswordConfig,
    TimeConfig,
};
use crate::error::{Error, Result};
use crate::types::TimeOfDay;
use std::cell::RefCell;
use std::collections::VecDeque;

/// One queued reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedReply {
    /// Accepted tag, text value or path.
    Text(String),
    /// Accepted form fields or check list tags.
    Values(Vec<String>),
    Time(TimeOfDay),
    /// Answer to a yes/no question.
    YesNo(bool),
    /// Cancel whatever widget is shown.
    Cancel,
    /// Press help on whatever widget is shown.
    Help,
}

/// Renderer answering from a FIFO script
#[derive(Debug, Default)]
pub struct ScriptedRenderer {
    replies: RefCell<VecDeque<ScriptedReply>>,
    messages: RefCell<Vec<MessageConfig>>,
    widgets: RefCell<Vec<&'static str>>,
}

impl ScriptedRenderer {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_reply(self, reply: ScriptedReply) -> Self {
        self.replies.borrow_mut().push_back(reply);
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        self.with_reply(ScriptedReply::Text(text.to_string()))
    }

    pub fn with_values(self, values: &[&str]) -> Self {
        self.with_reply(ScriptedReply::Values(values.iter().map(|v| v.to_string()).collect()))
    }

    pub fn with_time(self, time: TimeOfDay) -> Self {
        self.with_reply(ScriptedReply::Time(time))
    }

    pub fn with_yes_no(self, yes: bool) -> Self {
        self.with_reply(ScriptedReply::YesNo(yes))
    }

    pub fn with_cancel(self) -> Self {
        self.with_reply(ScriptedReply::Cancel)
    }

    pub fn with_help(self) -> Self {
        self.with_reply(ScriptedReply::Help)
    }

    /// Every message and scroll box shown so far, diagnostics included.
    pub fn messages(&self) -> Vec<MessageConfig> {
        self.messages.borrow().clone()
    }

    /// Names of the interactive widgets rendered so far, in order.
    pub fn widgets(&self) -> Vec<&'static str> {
        self.widgets.borrow().clone()
    }

    /// Replies not consumed yet.
    pub fn remaining(&self) -> usize {
        self.replies.borrow().len()
    }

    fn next_reply(&self, widget: &'static str) -> Result<ScriptedReply> {
        self.widgets.borrow_mut().push(widget);
        self.replies
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| Error::Renderer(format!("script has no reply left for {widget}")))
    }

    fn next<T>(
        &self,
        widget: &'static str,
        accept: impl FnOnce(ScriptedReply) -> Option<T>,
    ) -> Result<Disposition<T>> {
        match self.next_reply(widget)? {
            ScriptedReply::Cancel => Ok(Disposition::Cancelled),
            ScriptedReply::Help => Ok(Disposition::HelpRequested),
            reply => {
                let description = format!("{reply:?}");
                accept(reply).map(Disposition::Accepted).ok_or_else(|| {
                    Error::Renderer(format!("scripted reply {description} does not fit {widget}"))
                })
            }
        }
    }

    fn next_text(&self, widget: &'static str) -> Result<Disposition<String>> {
        self.next(widget, |reply| match reply {
            ScriptedReply::Text(text) => Some(text),
            _ => None,
        })
    }

    fn next_values(&self, widget: &'static str) -> Result<Disposition<Vec<String>>> {
        self.next(widget, |reply| match reply {
            ScriptedReply::Values(values) => Some(values),
            _ => None,
        })
    }
}

impl ChoiceRenderer for ScriptedRenderer {
    fn render_menu(&self, _config: &MenuConfig) -> Result<Disposition<String>> {
        self.next_text("menu")
    }

    fn render_radio_list(&self, _config: &ListConfig) -> Result<Disposition<String>> {
        self.next_text("radiolist")
    }

    fn render_check_list(&self, _config: &ListConfig) -> Result<Disposition<Vec<String>>> {
        self.next_values("checklist")
    }
}

impl InputRenderer for ScriptedRenderer {
    fn render_input_box(&self, _config: &InputConfig) -> Result<Disposition<String>> {
        self.next_text("inputbox")
    }

    fn render_password_box(&self, _config: &PasswordConfig) -> Result<Disposition<String>> {
        self.next_text("passwordbox")
    }

    fn render_form(&self, _config: &FormConfig) -> Result<Disposition<Vec<String>>> {
        self.next_values("form")
    }

    fn render_time_box(&self, _config: &TimeConfig) -> Result<Disposition<TimeOfDay>> {
        self.next("timebox", |reply| match reply {
            ScriptedReply::Time(time) => Some(time),
            _ => None,
        })
    }
}

impl FileRenderer for ScriptedRenderer {
    fn render_file_select(&self, _config: &FileConfig) -> Result<Disposition<String>> {
        self.next_text("fselect")
    }

    fn render_folder_select(&self, _config: &FileConfig) -> Result<Disposition<String>> {
        self.next_text("dselect")
    }
}

impl DisplayRenderer for ScriptedRenderer {
    fn render_message(&self, config: &MessageConfig) -> Result<()> {
        self.messages.borrow_mut().push(config.clone());
        Ok(())
    }

    fn render_scroll_box(&self, config: &MessageConfig) -> Result<()> {
        self.messages.borrow_mut().push(config.clone());
        Ok(())
    }

    fn render_yes_no(&self, _config: &MessageConfig) -> Result<Disposition<()>> {
        match self.next_reply("yesno")? {
            ScriptedReply::YesNo(true) => Ok(Disposition::Accepted(())),
            ScriptedReply::YesNo(false) | ScriptedReply::Cancel => Ok(Disposition::Cancelled),
            ScriptedReply::Help => Ok(Disposition::HelpRequested),
            other => Err(Error::Renderer(format!("scripted reply {other:?} does not fit yesno"))),
        }
    }
}
