//! Typing stored values into form fields beside a recognized label.

use anyhow::{Context, Result};
use serde_json::Value;

use super::{ActionContext, ActionError, ActionInput, CustomAction, config_text};
use crate::compare::smaller;
use crate::config::keys;
use crate::geometry::{GeometryError, compute_adjacent_box};

const DEFAULT_POSITION: &str = "right";

/// Types `text` into the control next to the located label.
///
/// Optional parameters `position` (`right`/`bottom`) and `multiplier`
/// override the placement.
fn type_beside_label(
    ctx: &mut ActionContext<'_>,
    input: &ActionInput,
    default_multiplier: f64,
    text: &str,
) -> Result<()> {
    let label = input.located.ok_or(ActionError::NoLocatedBox)?;
    let position = input.str_or("position", DEFAULT_POSITION)?;
    let multiplier = input.f64_or("multiplier", default_multiplier)?;
    if !multiplier.is_finite() || multiplier < 0.0 {
        return Err(ActionError::InvalidParam {
            key: "multiplier".to_string(),
            reason: format!("expected a non-negative number, got {}", multiplier),
        }
        .into());
    }

    let target = compute_adjacent_box(label, position, multiplier).map_err(|e| {
        let key = match e {
            GeometryError::UnsupportedDirection(_) => "position",
            GeometryError::OffsetOutOfRange { .. } => "multiplier",
        };
        ActionError::InvalidParam {
            key: key.to_string(),
            reason: e.to_string(),
        }
    })?;

    tracing::info!("Typing {:?} into {} (label at {})", text, target, label);
    if !ctx.host.input_text(text, target).context("Failed to input text")? {
        return Err(ActionError::HostRejected("text input").into());
    }
    Ok(())
}

/// Fills a field with a single store value.
pub struct FillFromConfig {
    name: &'static str,
    key: &'static str,
    default_multiplier: f64,
}

impl FillFromConfig {
    pub const fn new(name: &'static str, key: &'static str, default_multiplier: f64) -> Self {
        Self {
            name,
            key,
            default_multiplier,
        }
    }

    /// `fill_estate_survey_project_name`
    pub const fn estate_survey_project_name() -> Self {
        Self::new(
            "fill_estate_survey_project_name",
            keys::ESTATE_SURVEY_PROJECT_NAME,
            1.5,
        )
    }
}

impl CustomAction for FillFromConfig {
    fn name(&self) -> &'static str {
        self.name
    }

    fn execute(&self, ctx: &mut ActionContext<'_>, input: &ActionInput) -> Result<()> {
        let value = ctx
            .store
            .get(self.key)
            .ok_or_else(|| ActionError::MissingConfig(self.key.to_string()))?;
        let text = config_text(value).ok_or_else(|| ActionError::InvalidConfig {
            key: self.key.to_string(),
            reason: format!("cannot type {}", value),
        })?;

        type_beside_label(ctx, input, self.default_multiplier, &text)
    }
}

/// Fills the parcel area field with `min(zdmj, zdmj_max)`.
pub struct FillParcelArea;

impl FillParcelArea {
    const DEFAULT_MULTIPLIER: f64 = 2.0;

    /// Parcel area from the top level, else from the loaded row.
    fn parcel_area(ctx: &ActionContext<'_>) -> Option<Value> {
        ctx.store.get(keys::ZDMJ).cloned().or_else(|| {
            ctx.store
                .get(keys::CURRENT_DATA_ROW)
                .and_then(|row| row.get(keys::ZDMJ))
                .cloned()
        })
    }
}

impl CustomAction for FillParcelArea {
    fn name(&self) -> &'static str {
        "fill_parcel_area"
    }

    fn execute(&self, ctx: &mut ActionContext<'_>, input: &ActionInput) -> Result<()> {
        let area = Self::parcel_area(ctx)
            .ok_or_else(|| ActionError::MissingConfig(keys::ZDMJ.to_string()))?;
        let cap = ctx
            .store
            .get(keys::ZDMJ_MAX)
            .cloned()
            .ok_or_else(|| ActionError::MissingConfig(keys::ZDMJ_MAX.to_string()))?;

        let value = smaller(&area, &cap).context("Invalid parcel area")?;
        tracing::info!("Parcel area {} capped at {} -> {}", area, cap, value);

        type_beside_label(ctx, input, Self::DEFAULT_MULTIPLIER, &value.to_string())
    }
}
