//! Yes/no gate in front of destructive release steps.

use tracing::debug;

use crate::error::{ReleaseError, Result};
use crate::options::ReleaseOptions;
use crate::ui::{Prompt, Ui};

/// Turns a yes/no prompt into either a continuation or [ReleaseError::Aborted].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationGate {
    skip: bool,
}

impl ConfirmationGate {
    /// `skip` answers "yes" to every bypassable prompt without asking.
    pub fn new(skip: bool) -> Self {
        ConfirmationGate { skip }
    }

    pub fn from_options(options: &ReleaseOptions) -> Self {
        Self::new(options.yes)
    }

    /// Ask `"<message>, proceed?"` unless prompts are skipped.
    pub fn proceed(&self, ui: &mut dyn Ui, message: &str) -> Result<()> {
        if self.skip {
            debug!(message, "confirmation skipped");
            return Ok(());
        }

        Self::ask(ui, message)
    }

    /// Ask `"<message>, proceed?"` even when prompts are skipped.
    pub fn ask(ui: &mut dyn Ui, message: &str) -> Result<()> {
        let response = ui.prompt(&Prompt::new(prompt_message(message)))?;

        if response.proceed {
            Ok(())
        } else {
            debug!(message, "confirmation declined");
            Err(ReleaseError::Aborted)
        }
    }
}

/// The full question shown to the user.
pub fn prompt_message(message: &str) -> String {
    format!("{}, proceed?", message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUi;

    #[test]
    fn test_proceed_prompts_once() {
        let mut ui = MockUi::new();
        ConfirmationGate::new(false)
            .proceed(&mut ui, "About to create tag \"v1.0.0\"")
            .unwrap();

        assert_eq!(ui.prompts, vec!["About to create tag \"v1.0.0\", proceed?"]);
    }

    #[test]
    fn test_declining_aborts() {
        let mut ui = MockUi::declining();
        let err = ConfirmationGate::new(false)
            .proceed(&mut ui, "Do it")
            .unwrap_err();

        assert!(err.is_aborted());
    }

    #[test]
    fn test_skip_bypasses_prompt() {
        let mut ui = MockUi::declining();
        ConfirmationGate::new(true).proceed(&mut ui, "Do it").unwrap();

        assert!(ui.prompts.is_empty());
    }

    #[test]
    fn test_ask_ignores_skip() {
        let mut ui = MockUi::declining();
        let result = ConfirmationGate::ask(&mut ui, "Dirty tree");

        assert!(result.unwrap_err().is_aborted());
        assert_eq!(ui.prompts, vec!["Dirty tree, proceed?"]);
    }

    #[test]
    fn test_from_options() {
        let options = ReleaseOptions {
            yes: true,
            ..Default::default()
        };
        assert_eq!(ConfirmationGate::from_options(&options), ConfirmationGate::new(true));
    }
}
