//! Name → handler lookup used by the host bridge and the CLI.

use std::collections::HashMap;

use crate::actions::{
    ActionContext, ActionInput, CustomAction, FillFromConfig, FillParcelArea, GoIntoEntry,
    LoadDataDetail, Screenshot, SelectDatasetRow,
};
use crate::host::AutomationHost;
use crate::recognizers::{
    CustomRecognizer, FindPlantableFlower, FindToChallenge, Recognition, RecognizerInput,
};

/// What the host sees after an action ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    Succeeded,
    Failed,
}

impl ActionOutcome {
    pub fn is_success(self) -> bool {
        self == ActionOutcome::Succeeded
    }
}

#[derive(Default)]
pub struct Registry {
    actions: HashMap<&'static str, Box<dyn CustomAction>>,
    recognizers: HashMap<&'static str, Box<dyn CustomRecognizer>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in action and recognizer.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_action(Box::new(Screenshot));
        registry.register_action(Box::new(GoIntoEntry));
        registry.register_action(Box::new(SelectDatasetRow));
        registry.register_action(Box::new(LoadDataDetail));
        registry.register_action(Box::new(FillFromConfig::estate_survey_project_name()));
        registry.register_action(Box::new(FillParcelArea));
        registry.register_recognizer(Box::new(FindToChallenge));
        registry.register_recognizer(Box::new(FindPlantableFlower));
        registry
    }

    /// Adds an action, replacing any previous one with the same name.
    pub fn register_action(&mut self, action: Box<dyn CustomAction>) {
        let name = action.name();
        if self.actions.insert(name, action).is_some() {
            tracing::warn!("Action {} registered twice, keeping the latest", name);
        }
    }

    pub fn register_recognizer(&mut self, recognizer: Box<dyn CustomRecognizer>) {
        let name = recognizer.name();
        if self.recognizers.insert(name, recognizer).is_some() {
            tracing::warn!("Recognizer {} registered twice, keeping the latest", name);
        }
    }

    /// Runs the named action. Errors are logged and reported as `Failed`.
    pub fn run_action(
        &self,
        name: &str,
        ctx: &mut ActionContext<'_>,
        input: &ActionInput,
    ) -> ActionOutcome {
        let Some(action) = self.actions.get(name) else {
            tracing::error!("Unknown action: {}", name);
            return ActionOutcome::Failed;
        };

        tracing::info!("Running action {}", name);
        match action.execute(ctx, input) {
            Ok(()) => {
                tracing::info!("Action {} succeeded", name);
                ActionOutcome::Succeeded
            }
            Err(e) => {
                tracing::error!("Action {} failed: {:#}", name, e);
                ActionOutcome::Failed
            }
        }
    }

    /// Runs the named recognizer. Errors are logged and reported as no result.
    pub fn run_recognizer(
        &self,
        name: &str,
        host: &mut dyn AutomationHost,
        input: &RecognizerInput,
    ) -> Option<Recognition> {
        let Some(recognizer) = self.recognizers.get(name) else {
            tracing::error!("Unknown recognizer: {}", name);
            return None;
        };

        match recognizer.analyze(host, input) {
            Ok(result) => result,
            Err(e) => {
                tracing::error!("Recognizer {} failed: {:#}", name, e);
                None
            }
        }
    }

    /// Registered action names, sorted.
    pub fn action_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.actions.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Registered recognizer names, sorted.
    pub fn recognizer_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.recognizers.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::test_support::temp_store;
    use crate::config::keys;
    use crate::dialogs::testing::ScriptedDialogs;
    use crate::geometry::Rect;
    use crate::host::testing::ScriptedHost;

    #[test]
    fn test_defaults_registered() {
        let registry = Registry::with_defaults();

        assert_eq!(
            registry.action_names(),
            vec![
                "GoIntoEntry",
                "Screenshot",
                "fill_estate_survey_project_name",
                "fill_parcel_area",
                "load_data_detail",
                "select_dataset_row",
            ]
        );
        assert_eq!(
            registry.recognizer_names(),
            vec!["FindPlantableFlower", "FindToChallenge"]
        );
    }

    #[test]
    fn test_unknown_names() {
        let registry = Registry::with_defaults();
        let (_dir, mut store) = temp_store();
        let mut host = ScriptedHost::new();
        let dialogs = ScriptedDialogs::default();

        let input = RecognizerInput::new(host.screen.clone());
        assert!(registry.run_recognizer("Nope", &mut host, &input).is_none());

        let mut ctx = ActionContext::new(&mut host, &mut store, &dialogs);
        assert_eq!(
            registry.run_action("nope", &mut ctx, &ActionInput::default()),
            ActionOutcome::Failed
        );
    }

    #[test]
    fn test_action_errors_become_failure() {
        let registry = Registry::with_defaults();
        let (_dir, mut store) = temp_store();
        let mut host = ScriptedHost::new();
        let dialogs = ScriptedDialogs::default();
        let mut ctx = ActionContext::new(&mut host, &mut store, &dialogs);

        let outcome = registry.run_action("fill_parcel_area", &mut ctx, &ActionInput::default());
        assert_eq!(outcome, ActionOutcome::Failed);
    }

    #[test]
    fn test_action_success() {
        let registry = Registry::with_defaults();
        let (_dir, mut store) = temp_store();
        store.set(keys::ZDMJ, "88").unwrap();
        let mut host = ScriptedHost::new();
        let dialogs = ScriptedDialogs::default();
        let mut ctx = ActionContext::new(&mut host, &mut store, &dialogs);
        let input = ActionInput::default().with_located(Rect::new(0, 0, 10, 10));

        let outcome = registry.run_action("fill_parcel_area", &mut ctx, &input);

        assert!(outcome.is_success());
        assert_eq!(host.inputs[0].0, "88");
    }
}
