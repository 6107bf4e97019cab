//! Opens a feature from the main screen by locating its entry icon.

use anyhow::{Context, Result};

use super::{ActionContext, ActionError, ActionInput, CustomAction};
use crate::host::SearchTarget;
use crate::search::{EntrySearch, SearchState};

/// Parameter: `{"template": "<image>" | ["<image>", ...]}`.
///
/// A malformed template also asks the host to stop the task, since every
/// following pipeline node would act on the wrong screen.
pub struct GoIntoEntry;

impl CustomAction for GoIntoEntry {
    fn name(&self) -> &'static str {
        "GoIntoEntry"
    }

    fn execute(&self, ctx: &mut ActionContext<'_>, input: &ActionInput) -> Result<()> {
        let raw = input.get("template").cloned().unwrap_or_default();
        let target = match SearchTarget::from_param(&raw) {
            Ok(target) => target,
            Err(e) => {
                tracing::error!("Invalid entry template: {}", e);
                ctx.host.request_stop();
                return Err(ActionError::InvalidParam {
                    key: "template".to_string(),
                    reason: e.to_string(),
                }
                .into());
            }
        };

        let described = target.to_string();
        match EntrySearch::new(target).run(ctx.host)? {
            SearchState::Found(rect) => {
                let (x, y) = rect.random_point(&mut rand::rng());
                tracing::info!("Entering {} via click at ({}, {})", described, x, y);
                if !ctx.host.click(x, y).context("Failed to click entry")? {
                    return Err(ActionError::HostRejected("entry click").into());
                }
                Ok(())
            }
            SearchState::Aborted => Err(ActionError::Stopped.into()),
            _ => Err(ActionError::EntryNotFound(described).into()),
        }
    }
}
