//! Validated dialog prompts
//!
//! This module turns a caller's prompt description into a validated result:
//! - `spec`: what to show and which checks apply
//! - `cancel`: the uniform cancellation policy and the `Response` it shapes
//! - `controller`: the render / validate / retry loop

use crate::types::TimeOfDay;
use serde::Serialize;
use std::path::PathBuf;

pub mod cancel;
pub mod controller;
pub mod spec;

pub use cancel::{CancelAction, CancelCallback, CancellationPolicy, Response};
pub use controller::{DialogController, Diagnostic};
pub use spec::{
    FileSpec, FolderSpec, FormSpec, InputSpec, ListSpec, MenuSpec, MessageSpec, PasswordSpec,
    PromptKind, PromptSpec, TimeSpec,
};

/// Result of any prompt kind, as returned by [`DialogController::prompt`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Answer {
    /// Menu or radio list tag, input or password value.
    Text(String),
    /// Form fields in element order, or check list tags in selection order.
    Values(Vec<String>),
    Path(PathBuf),
    Time(TimeOfDay),
    /// Yes/no answer.
    Confirmed(bool),
    /// The user cancelled and the policy returned a sentinel.
    Sentinel { sentinel: String },
    /// Display-only box; nothing to return.
    Shown,
}

impl Answer {
    pub fn is_sentinel(&self) -> bool {
        matches!(self, Answer::Sentinel { .. })
    }
}

impl<T> From<Response<T>> for Answer
where
    Answer: From<T>,
{
    fn from(response: Response<T>) -> Self {
        match response {
            Response::Value(value) => Answer::from(value),
            Response::Sentinel(sentinel) => Answer::Sentinel { sentinel },
        }
    }
}

impl From<String> for Answer {
    fn from(value: String) -> Self {
        Answer::Text(value)
    }
}

impl From<Vec<String>> for Answer {
    fn from(values: Vec<String>) -> Self {
        Answer::Values(values)
    }
}

impl From<PathBuf> for Answer {
    fn from(path: PathBuf) -> Self {
        Answer::Path(path)
    }
}

impl From<TimeOfDay> for Answer {
    fn from(time: TimeOfDay) -> Self {
        Answer::Time(time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_answer_from_response() {
        let answer: Answer = Response::Value("blue".to_string()).into();
        assert_eq!(answer, Answer::Text("blue".to_string()));

        let answer: Answer = Response::<Vec<String>>::Sentinel("0".to_string()).into();
        assert!(answer.is_sentinel());
    }

    #[test]
    fn test_answer_serializes_plainly() {
        let answers = vec![
            Answer::Text("8080".into()),
            Answer::Values(vec!["a".into(), "b".into()]),
            Answer::Path(PathBuf::from("/etc/app.yaml")),
            Answer::Time(TimeOfDay::new(6, 30, 0).unwrap()),
            Answer::Confirmed(false),
            Answer::Sentinel { sentinel: "0".into() },
            Answer::Shown,
        ];
        assert_eq!(
            serde_json::to_value(&answers).unwrap(),
            json!([
                "8080",
                ["a", "b"],
                "/etc/app.yaml",
                {"hour": 6, "minute": 30, "second": 0},
                false,
                {"sentinel": "0"},
                null
            ])
        );
    }
}
