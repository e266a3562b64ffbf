//! Caller-side descriptions of one interaction
//!
//! A spec carries what the renderer needs to draw the widget plus the
//! validation that applies to the accepted result. Specs are plain values
//! built per call, either in code or from a wizard file.

use crate::error::{Error, Result};
use crate::types::{Choice, FormElement, Geometry, MenuItem, TimeOfDay};
use crate::validation::{ExtensionPolicy, ValidatorKind};
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt::Display;
use std::path::PathBuf;

/// Kind of widget a spec describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Menu,
    Message,
    Form,
    FileSelect,
    FolderSelect,
    RadioList,
    CheckList,
    InputBox,
    PasswordBox,
    TimeBox,
    YesNo,
    ScrollBox,
}

impl Display for PromptKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PromptKind::Menu => "menu",
            PromptKind::Message => "message",
            PromptKind::Form => "form",
            PromptKind::FileSelect => "file select",
            PromptKind::FolderSelect => "folder select",
            PromptKind::RadioList => "radio list",
            PromptKind::CheckList => "check list",
            PromptKind::InputBox => "input box",
            PromptKind::PasswordBox => "password box",
            PromptKind::TimeBox => "time box",
            PromptKind::YesNo => "yes/no",
            PromptKind::ScrollBox => "scroll box",
        };
        write!(f, "{s}")
    }
}

/// Adds the title and geometry builders shared by every spec.
macro_rules! dialog_spec_builders {
    ($($spec:ty),+ $(,)?) => {
        $(
            impl $spec {
                pub fn with_title(mut self, title: impl Into<String>) -> Self {
                    self.title = title.into();
                    self
                }

                pub fn with_geometry(mut self, height: u16, width: u16) -> Self {
                    self.height = height;
                    self.width = width;
                    self
                }

                pub fn geometry(&self) -> Geometry {
                    Geometry::new(self.height, self.width)
                }
            }
        )+
    };
}

/// Message, scroll box and yes/no question.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessageSpec {
    pub text: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub height: u16,
    #[serde(default)]
    pub width: u16,
}

impl MessageSpec {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), title: String::new(), height: 0, width: 0 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MenuSpec {
    pub text: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub height: u16,
    #[serde(default)]
    pub width: u16,
    #[serde(alias = "choices")]
    pub items: Vec<MenuItem>,
}

impl MenuSpec {
    pub fn new(text: impl Into<String>, items: Vec<MenuItem>) -> Self {
        Self { text: text.into(), title: String::new(), height: 0, width: 0, items }
    }

    pub fn check(&self) -> Result<()> {
        if self.items.is_empty() {
            return Err(Error::MalformedPrompt("menu has no items".into()));
        }
        check_unique_tags(PromptKind::Menu, self.items.iter().map(|item| item.tag.as_str()))
    }
}

/// Radio list and check list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListSpec {
    pub text: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub height: u16,
    #[serde(default)]
    pub width: u16,
    pub choices: Vec<Choice>,
}

impl ListSpec {
    pub fn new(text: impl Into<String>, choices: Vec<Choice>) -> Self {
        Self { text: text.into(), title: String::new(), height: 0, width: 0, choices }
    }

    pub fn check(&self, kind: PromptKind) -> Result<()> {
        if self.choices.is_empty() {
            return Err(Error::MalformedPrompt(format!("{kind} has no choices")));
        }
        check_unique_tags(kind, self.choices.iter().map(|choice| choice.tag.as_str()))
    }

    /// Number of entries that start out selected.
    pub fn preselected(&self) -> usize {
        self.choices.iter().filter(|choice| choice.selected).count()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FormSpec {
    pub text: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub height: u16,
    #[serde(default)]
    pub width: u16,
    pub elements: Vec<FormElement>,
    /// Applied to every field; the form is only accepted when all pass.
    #[serde(default)]
    pub validator: Option<ValidatorKind>,
}

impl FormSpec {
    pub fn new(text: impl Into<String>, elements: Vec<FormElement>) -> Self {
        Self {
            text: text.into(),
            title: String::new(),
            height: 0,
            width: 0,
            elements,
            validator: None,
        }
    }

    pub fn with_validator(mut self, validator: ValidatorKind) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn check(&self) -> Result<()> {
        if self.elements.is_empty() {
            return Err(Error::MalformedPrompt("form has no elements".into()));
        }
        if let Some(ValidatorKind::Extension(policy)) = &self.validator {
            check_extension_policy(policy)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FileSpec {
    pub path: PathBuf,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub height: u16,
    #[serde(default)]
    pub width: u16,
    /// Allowed extensions; `None` accepts any file.
    #[serde(default)]
    pub extensions: Option<ExtensionPolicy>,
    /// Require the selection to be an existing regular file.
    #[serde(default = "get_default_must_exist")]
    pub must_exist: bool,
}

fn get_default_must_exist() -> bool {
    true
}

impl FileSpec {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            title: String::new(),
            height: 0,
            width: 0,
            extensions: None,
            must_exist: true,
        }
    }

    pub fn with_extensions(mut self, extensions: ExtensionPolicy) -> Self {
        self.extensions = Some(extensions);
        self
    }

    pub fn allow_missing(mut self) -> Self {
        self.must_exist = false;
        self
    }

    pub fn check(&self) -> Result<()> {
        match &self.extensions {
            Some(policy) => check_extension_policy(policy),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FolderSpec {
    pub path: PathBuf,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub height: u16,
    #[serde(default)]
    pub width: u16,
}

impl FolderSpec {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), title: String::new(), height: 0, width: 0 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InputSpec {
    pub text: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub height: u16,
    #[serde(default)]
    pub width: u16,
    #[serde(default)]
    pub init: String,
    /// Format check on top of the non-empty check.
    #[serde(default)]
    pub validator: Option<ValidatorKind>,
}

impl InputSpec {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            title: String::new(),
            height: 0,
            width: 0,
            init: String::new(),
            validator: None,
        }
    }

    pub fn with_init(mut self, init: impl Into<String>) -> Self {
        self.init = init.into();
        self
    }

    pub fn with_validator(mut self, validator: ValidatorKind) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn check(&self) -> Result<()> {
        match &self.validator {
            Some(ValidatorKind::Extension(policy)) => check_extension_policy(policy),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PasswordSpec {
    pub text: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub height: u16,
    #[serde(default)]
    pub width: u16,
    #[serde(default)]
    pub init: String,
    /// Echo `*` for each typed character instead of nothing.
    #[serde(default)]
    pub insecure: bool,
}

impl PasswordSpec {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            title: String::new(),
            height: 0,
            width: 0,
            init: String::new(),
            insecure: false,
        }
    }

    pub fn insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimeSpec {
    pub text: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub height: u16,
    #[serde(default)]
    pub width: u16,
    #[serde(default)]
    pub initial: Option<TimeOfDay>,
}

impl TimeSpec {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), title: String::new(), height: 0, width: 0, initial: None }
    }

    pub fn with_initial(mut self, initial: TimeOfDay) -> Self {
        self.initial = Some(initial);
        self
    }
}

dialog_spec_builders!(
    MessageSpec,
    MenuSpec,
    ListSpec,
    FormSpec,
    FileSpec,
    FolderSpec,
    InputSpec,
    PasswordSpec,
    TimeSpec,
);

/// One interaction of any kind.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PromptSpec {
    Menu(MenuSpec),
    Message(MessageSpec),
    Form(FormSpec),
    FileSelect(FileSpec),
    FolderSelect(FolderSpec),
    RadioList(ListSpec),
    CheckList(ListSpec),
    InputBox(InputSpec),
    PasswordBox(PasswordSpec),
    TimeBox(TimeSpec),
    YesNo(MessageSpec),
    ScrollBox(MessageSpec),
}

impl PromptSpec {
    pub fn kind(&self) -> PromptKind {
        match self {
            PromptSpec::Menu(_) => PromptKind::Menu,
            PromptSpec::Message(_) => PromptKind::Message,
            PromptSpec::Form(_) => PromptKind::Form,
            PromptSpec::FileSelect(_) => PromptKind::FileSelect,
            PromptSpec::FolderSelect(_) => PromptKind::FolderSelect,
            PromptSpec::RadioList(_) => PromptKind::RadioList,
            PromptSpec::CheckList(_) => PromptKind::CheckList,
            PromptSpec::InputBox(_) => PromptKind::InputBox,
            PromptSpec::PasswordBox(_) => PromptKind::PasswordBox,
            PromptSpec::TimeBox(_) => PromptKind::TimeBox,
            PromptSpec::YesNo(_) => PromptKind::YesNo,
            PromptSpec::ScrollBox(_) => PromptKind::ScrollBox,
        }
    }

    /// Rejects specs that can never be rendered, without rendering anything.
    pub fn check(&self) -> Result<()> {
        match self {
            PromptSpec::Menu(spec) => spec.check(),
            PromptSpec::Form(spec) => spec.check(),
            PromptSpec::FileSelect(spec) => spec.check(),
            PromptSpec::RadioList(spec) => spec.check(PromptKind::RadioList),
            PromptSpec::CheckList(spec) => spec.check(PromptKind::CheckList),
            PromptSpec::InputBox(spec) => spec.check(),
            PromptSpec::Message(_)
            | PromptSpec::FolderSelect(_)
            | PromptSpec::PasswordBox(_)
            | PromptSpec::TimeBox(_)
            | PromptSpec::YesNo(_)
            | PromptSpec::ScrollBox(_) => Ok(()),
        }
    }
}

fn check_unique_tags<'a>(kind: PromptKind, tags: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for tag in tags {
        if !seen.insert(tag) {
            return Err(Error::MalformedPrompt(format!("{kind} has duplicate tag '{tag}'")));
        }
    }
    Ok(())
}

fn check_extension_policy(policy: &ExtensionPolicy) -> Result<()> {
    if policy.is_satisfiable() {
        Ok(())
    } else {
        Err(Error::MalformedPrompt("allowed extension set is empty".into()))
    }
}
