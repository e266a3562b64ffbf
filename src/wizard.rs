//! Wizard files: an ordered list of prompts run as one session

use crate::constants::WIZARD_FILENAMES;
use crate::error::{Error, Result};
use crate::ext::PathExt;
use crate::prompt::{Answer, CancelAction, CancellationPolicy, DialogController, PromptSpec};
use crate::renderer::DialogRenderer;
use indexmap::IndexMap;
use log::{debug, info};
use serde::Deserialize;
use std::path::Path;

/// What a cancelled step does
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OnCancel {
    /// `{ sentinel: "0" }`: the step's answer becomes the sentinel.
    Sentinel { sentinel: String },
    Named(NamedAction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedAction {
    /// Abort the whole wizard.
    Interrupt,
    /// Show the cancelled step again.
    Reprompt,
}

impl Default for OnCancel {
    fn default() -> Self {
        OnCancel::Named(NamedAction::Interrupt)
    }
}

impl OnCancel {
    pub fn to_policy(&self) -> CancellationPolicy {
        match self {
            OnCancel::Sentinel { sentinel } => CancellationPolicy::sentinel(sentinel.clone()),
            OnCancel::Named(NamedAction::Interrupt) => CancellationPolicy::RaiseInterrupt,
            OnCancel::Named(NamedAction::Reprompt) => {
                CancellationPolicy::callback(|| CancelAction::Reprompt)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct WizardV1 {
    #[serde(default)]
    pub background_title: String,
    #[serde(default)]
    pub on_cancel: OnCancel,
    #[serde(default)]
    pub steps: IndexMap<String, PromptSpec>,
}

impl WizardV1 {
    /// Checks every step before anything is drawn.
    pub fn validate(&self) -> Result<()> {
        if self.steps.is_empty() {
            return Err(Error::ConfigParse("wizard has no steps".into()));
        }
        for (name, spec) in &self.steps {
            spec.check().map_err(|err| match err {
                Error::MalformedPrompt(reason) => {
                    Error::MalformedPrompt(format!("step '{name}': {reason}"))
                }
                other => other,
            })?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "schemaVersion")]
pub enum Wizard {
    #[serde(rename = "v1")]
    V1(WizardV1),
}

impl Wizard {
    /// Loads a wizard from a file, or from the first wizard file found inside
    /// a directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.is_dir() {
            for file_name in WIZARD_FILENAMES.iter() {
                let candidate = path.join(file_name);
                if candidate.exists() {
                    return Self::load_file(&candidate);
                }
            }
            return Err(Error::WizardNotFound {
                path: path.to_str_checked()?.to_string(),
                tried: WIZARD_FILENAMES.join(", "),
            });
        }

        if !path.exists() {
            return Err(Error::WizardNotFound {
                path: path.to_str_checked()?.to_string(),
                tried: path.to_str_checked()?.to_string(),
            });
        }
        Self::load_file(path)
    }

    fn load_file(path: &Path) -> Result<Self> {
        debug!("Loading wizard from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        let wizard = match path.final_suffix().as_str() {
            ".json" => Self::from_json(&content)?,
            ".yaml" | ".yml" => Self::from_yaml(&content)?,
            other => {
                return Err(Error::ConfigParse(format!(
                    "unsupported wizard file extension '{other}', expected .json, .yaml or .yml"
                )))
            }
        };
        Ok(wizard)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let wizard: Wizard = serde_json::from_str(content)?;
        wizard.validate()?;
        Ok(wizard)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let wizard: Wizard = serde_yaml::from_str(content)?;
        wizard.validate()?;
        Ok(wizard)
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Wizard::V1(wizard) => wizard.validate(),
        }
    }

    pub fn background_title(&self) -> &str {
        match self {
            Wizard::V1(wizard) => &wizard.background_title,
        }
    }

    pub fn steps(&self) -> &IndexMap<String, PromptSpec> {
        match self {
            Wizard::V1(wizard) => &wizard.steps,
        }
    }

    pub fn cancellation_policy(&self) -> CancellationPolicy {
        match self {
            Wizard::V1(wizard) => wizard.on_cancel.to_policy(),
        }
    }
}

/// Runs every step in order and collects the answers under the step names.
///
/// A step answered with a sentinel is recorded and the run goes on. An
/// [`Error::Interrupted`] stops the run and is returned as is.
pub fn run_wizard<R: DialogRenderer>(
    wizard: &Wizard,
    controller: &DialogController<R>,
) -> Result<IndexMap<String, Answer>> {
    let mut answers = IndexMap::with_capacity(wizard.steps().len());

    for (name, spec) in wizard.steps() {
        debug!("Running step '{name}' ({})", spec.kind());
        let answer = controller.prompt(spec)?;
        if answer.is_sentinel() {
            info!("Step '{name}' was cancelled");
        }
        answers.insert(name.clone(), answer);
    }

    Ok(answers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::spec::PromptKind;
    use crate::validation::ValidatorKind;
    use std::fs;
    use tempfile::TempDir;

    const YAML_WIZARD: &str = r#"
schemaVersion: v1
background_title: "Setup"
on_cancel:
  sentinel: "0"
steps:
  host:
    kind: form
    text: "Connection"
    title: "Server"
    height: 12
    width: 60
    validator: host
    elements:
      - { label: "Primary", value: "", field_width: 30, input_width: 80 }
  port:
    kind: input_box
    text: "Port"
    validator: port
"#;

    #[test]
    fn test_load_yaml_keeps_step_order() {
        let wizard = Wizard::from_yaml(YAML_WIZARD).unwrap();

        assert_eq!(wizard.background_title(), "Setup");
        let names: Vec<&String> = wizard.steps().keys().collect();
        assert_eq!(names, vec!["host", "port"]);
        assert_eq!(wizard.steps()["host"].kind(), PromptKind::Form);
        match &wizard.steps()["port"] {
            PromptSpec::InputBox(spec) => assert_eq!(spec.validator, Some(ValidatorKind::Port)),
            other => panic!("unexpected step {other:?}"),
        }
        assert!(matches!(
            wizard.cancellation_policy(),
            CancellationPolicy::ReturnSentinel(ref value) if value == "0"
        ));
    }

    #[test]
    fn test_on_cancel_defaults_to_interrupt() {
        let json = r#"{
            "schemaVersion": "v1",
            "steps": { "ok": { "kind": "yes_no", "text": "Continue?" } }
        }"#;
        let wizard = Wizard::from_json(json).unwrap();
        assert!(matches!(wizard.cancellation_policy(), CancellationPolicy::RaiseInterrupt));
        assert_eq!(wizard.background_title(), "");
    }

    #[test]
    fn test_on_cancel_reprompt_uses_callback() {
        let on_cancel: OnCancel = serde_yaml::from_str("reprompt").unwrap();
        assert_eq!(on_cancel, OnCancel::Named(NamedAction::Reprompt));
        match on_cancel.to_policy() {
            CancellationPolicy::InvokeCallback(callback) => {
                assert_eq!(callback(), CancelAction::Reprompt)
            }
            other => panic!("unexpected policy {other:?}"),
        }
    }

    #[test]
    fn test_unknown_schema_version_is_rejected() {
        let json = r#"{ "schemaVersion": "v9", "steps": {} }"#;
        assert!(matches!(Wizard::from_json(json), Err(Error::JsonParse(_))));
    }

    #[test]
    fn test_malformed_step_is_reported_with_its_name() {
        let json = r#"{
            "schemaVersion": "v1",
            "steps": { "pick": { "kind": "menu", "text": "Pick", "items": [] } }
        }"#;
        let err = Wizard::from_json(json).unwrap_err();
        assert!(matches!(err, Error::MalformedPrompt(_)));
        assert!(err.to_string().contains("step 'pick'"));
    }

    #[test]
    fn test_empty_wizard_is_rejected() {
        let json = r#"{ "schemaVersion": "v1" }"#;
        assert!(matches!(Wizard::from_json(json), Err(Error::ConfigParse(_))));
    }

    #[test]
    fn test_load_from_directory_prefers_json() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("wizard.json"),
            r#"{"schemaVersion":"v1","background_title":"json","steps":{"m":{"kind":"message","text":"hi"}}}"#,
        )
        .unwrap();
        fs::write(dir.path().join("wizard.yaml"), YAML_WIZARD).unwrap();

        let wizard = Wizard::load(dir.path()).unwrap();
        assert_eq!(wizard.background_title(), "json");
    }

    #[test]
    fn test_load_explicit_yml_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("network.yml");
        fs::write(&path, YAML_WIZARD).unwrap();

        let wizard = Wizard::load(&path).unwrap();
        assert_eq!(wizard.steps().len(), 2);
    }

    #[test]
    fn test_missing_wizard_lists_tried_files() {
        let dir = TempDir::new().unwrap();
        let err = Wizard::load(dir.path()).unwrap_err();
        match err {
            Error::WizardNotFound { tried, .. } => {
                assert_eq!(tried, "wizard.json, wizard.yaml, wizard.yml")
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wizard.toml");
        fs::write(&path, "").unwrap();
        assert!(matches!(Wizard::load(&path), Err(Error::ConfigParse(_))));
    }
}
