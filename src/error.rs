use thiserror::Error;

use crate::constants::exit_codes;

#[derive(Error, Debug)]
pub enum Error {
    /// Raised by the `RaiseInterrupt` cancellation policy.
    #[error("Interrupted: the user cancelled the dialog.")]
    Interrupted,

    /// A prompt description that can never be rendered. This is a caller bug,
    /// never a user-input problem, so it is reported before anything is drawn.
    #[error("Malformed prompt: {0}.")]
    MalformedPrompt(String),

    #[error("IO error: {0}.")]
    Io(#[from] std::io::Error),

    #[error("Terminal prompt failed. Original error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    #[error("Dialog renderer error: {0}.")]
    Renderer(String),

    #[error("Invalid time '{0}'. Expected HH:MM or HH:MM:SS.")]
    InvalidTime(String),

    #[error("Failed to parse wizard file: {0}.")]
    ConfigParse(String),

    #[error("Failed to parse JSON. Original error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Failed to parse YAML. Original error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("No wizard file found at '{path}'. Tried: {tried}.")]
    WizardNotFound { path: String, tried: String },
}

impl Error {
    /// Whether this error is the cancellation signal rather than a fault.
    pub fn is_interrupt(&self) -> bool {
        matches!(self, Error::Interrupted)
    }
}

/// Convenience type alias for Results with dialogwiz's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler for the binary: prints the error chain and exits.
///
/// A cancelled wizard exits with [`exit_codes::CANCELLED`], anything else with
/// [`exit_codes::FAILURE`].
pub fn default_error_handler(err: anyhow::Error) -> ! {
    let cancelled = err.downcast_ref::<Error>().is_some_and(Error::is_interrupt);
    if cancelled {
        eprintln!("Cancelled.");
        std::process::exit(exit_codes::CANCELLED);
    }
    eprintln!("{err:#}");
    std::process::exit(exit_codes::FAILURE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interrupt_is_recognised() {
        assert!(Error::Interrupted.is_interrupt());
        assert!(!Error::Renderer("boom".into()).is_interrupt());
    }

    #[test]
    fn messages_name_the_problem() {
        let err = Error::MalformedPrompt("choices list is empty".into());
        assert_eq!(err.to_string(), "Malformed prompt: choices list is empty.");

        let err = Error::WizardNotFound {
            path: "/tmp/w".into(),
            tried: "wizard.json, wizard.yaml".into(),
        };
        assert!(err.to_string().contains("/tmp/w"));
    }
}
