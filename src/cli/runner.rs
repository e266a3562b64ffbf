use crate::{
    cli::{Backend, CheckArgs, RunArgs},
    prompt::{Answer, DialogController},
    renderer::{DialogProgramRenderer, DialogRenderer, DialoguerRenderer},
    validation::validate,
    wizard::{run_wizard, Wizard},
};
use anyhow::Context;
use indexmap::IndexMap;
use log::{debug, info};

/// Runs a wizard end to end and prints or writes its answers
pub struct Runner {
    args: RunArgs,
}

impl Runner {
    pub fn new(args: RunArgs) -> Self {
        Self { args }
    }

    pub fn run(self) -> anyhow::Result<()> {
        let wizard = Wizard::load(&self.args.wizard).with_context(|| {
            format!("failed to load wizard from '{}'", self.args.wizard.display())
        })?;

        let background_title = self
            .args
            .background_title
            .clone()
            .unwrap_or_else(|| wizard.background_title().to_string());
        debug!("Using the {} backend", self.args.backend);

        let answers = match self.args.backend {
            Backend::Dialoguer => {
                self.collect(&wizard, DialoguerRenderer::new(background_title))?
            }
            Backend::Dialog => {
                self.collect(&wizard, DialogProgramRenderer::new(background_title))?
            }
        };

        self.write_answers(&answers)
    }

    fn collect<R: DialogRenderer>(
        &self,
        wizard: &Wizard,
        renderer: R,
    ) -> anyhow::Result<IndexMap<String, Answer>> {
        let controller = DialogController::new(renderer, wizard.cancellation_policy());
        // Interrupted is passed through untouched so the exit code can tell it apart
        Ok(run_wizard(wizard, &controller)?)
    }

    fn write_answers(&self, answers: &IndexMap<String, Answer>) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(answers)
            .context("failed to serialize the answers")?;

        match &self.args.output {
            Some(path) => {
                std::fs::write(path, format!("{json}\n")).with_context(|| {
                    format!("failed to write answers to '{}'", path.display())
                })?;
                info!("Answers written to {}", path.display());
            }
            None => println!("{json}"),
        }
        Ok(())
    }
}

/// Runs a wizard with the given arguments.
pub fn run(args: RunArgs) -> anyhow::Result<()> {
    Runner::new(args).run()
}

/// Evaluates one validator and prints `valid` or `invalid`.
pub fn check(args: &CheckArgs) -> anyhow::Result<bool> {
    let validator = args.validator.to_validator(&args.extensions)?;
    let valid = validate(&validator, &args.value);
    debug!("{validator:?} on '{}': {valid}", args.value);
    println!("{}", if valid { "valid" } else { "invalid" });
    Ok(valid)
}
