/// Command line interface of the `dialogwiz` binary.
pub mod cli;

/// Constants shared across modules.
pub mod constants;

/// Defines custom error types.
pub mod error;

/// Extension traits for standard library types.
pub mod ext;

/// Validated prompts: specs, cancellation policy and the retry loop.
pub mod prompt;

/// Terminal dialog backends.
pub mod renderer;

/// Value types exchanged with the renderers.
pub mod types;

/// Input-format validators.
pub mod validation;

/// Wizard files and their runner.
pub mod wizard;
