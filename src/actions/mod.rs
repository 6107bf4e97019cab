//! Custom actions invoked by name from the host pipeline.
//!
//! This module provides:
//! - The [`CustomAction`] capability every action implements
//! - The per-call [`ActionContext`] (host, config store, dialogs)
//! - Parameter helpers and the shared [`ActionError`] taxonomy

pub mod dataset;
pub mod entry;
pub mod fill;
pub mod screenshot;

pub use dataset::{LoadDataDetail, SelectDatasetRow};
pub use entry::GoIntoEntry;
pub use fill::{FillFromConfig, FillParcelArea};
pub use screenshot::Screenshot;

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::ConfigStore;
use crate::dialogs::Dialogs;
use crate::geometry::Rect;
use crate::host::AutomationHost;

/// Everything an action may touch while it runs.
pub struct ActionContext<'a> {
    pub host: &'a mut dyn AutomationHost,
    pub store: &'a mut ConfigStore,
    pub dialogs: &'a dyn Dialogs,
}

impl<'a> ActionContext<'a> {
    pub fn new(
        host: &'a mut dyn AutomationHost,
        store: &'a mut ConfigStore,
        dialogs: &'a dyn Dialogs,
    ) -> Self {
        Self {
            host,
            store,
            dialogs,
        }
    }
}

/// Arguments the pipeline passes to an action.
#[derive(Clone, Debug, Default)]
pub struct ActionInput {
    /// Parsed action parameter object.
    pub param: Map<String, Value>,
    /// Box found by the recognition step that triggered the action, if any.
    pub located: Option<Rect>,
}

impl ActionInput {
    pub fn new(param: Map<String, Value>) -> Self {
        Self {
            param,
            located: None,
        }
    }

    /// Parses the raw parameter string; blank means no parameters.
    pub fn from_param_str(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let value: Value = serde_json::from_str(raw).context("Action parameter is not valid JSON")?;
        match value {
            Value::Object(param) => Ok(Self::new(param)),
            other => Err(ActionError::InvalidParam {
                key: "<root>".to_string(),
                reason: format!("expected an object, got {}", other),
            }
            .into()),
        }
    }

    pub fn with_located(mut self, located: Rect) -> Self {
        self.located = Some(located);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.param.get(key)
    }

    /// Returns a required parameter.
    pub fn require(&self, key: &str) -> Result<&Value, ActionError> {
        self.param
            .get(key)
            .ok_or_else(|| ActionError::MissingParam(key.to_string()))
    }

    /// Returns an optional string parameter, falling back to `default`.
    pub fn str_or<'s>(&'s self, key: &str, default: &'s str) -> Result<&'s str, ActionError> {
        match self.param.get(key) {
            None => Ok(default),
            Some(Value::String(s)) => Ok(s),
            Some(other) => Err(ActionError::InvalidParam {
                key: key.to_string(),
                reason: format!("expected a string, got {}", other),
            }),
        }
    }

    /// Returns an optional numeric parameter, falling back to `default`.
    pub fn f64_or(&self, key: &str, default: f64) -> Result<f64, ActionError> {
        match self.param.get(key) {
            None => Ok(default),
            Some(value) => value.as_f64().ok_or_else(|| ActionError::InvalidParam {
                key: key.to_string(),
                reason: format!("expected a number, got {}", value),
            }),
        }
    }
}

/// Validation failures shared by actions and recognizers.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("missing parameter: {0}")]
    MissingParam(String),
    #[error("invalid parameter {key}: {reason}")]
    InvalidParam { key: String, reason: String },
    #[error("missing config key: {0}")]
    MissingConfig(String),
    #[error("invalid config value for {key}: {reason}")]
    InvalidConfig { key: String, reason: String },
    #[error("invalid path for {label}: {path}")]
    InvalidPath { label: String, path: String },
    #[error("no box was located for this action")]
    NoLocatedBox,
    #[error("entry not found: {0}")]
    EntryNotFound(String),
    #[error("task stop requested")]
    Stopped,
    #[error("host did not complete {0}")]
    HostRejected(&'static str),
}

/// A named handler the pipeline can invoke.
pub trait CustomAction {
    fn name(&self) -> &'static str;

    /// Runs the action to completion. Any `Err` is reported as failure.
    fn execute(&self, ctx: &mut ActionContext<'_>, input: &ActionInput) -> Result<()>;
}

/// Renders a config value as text to type into a field.
pub(crate) fn config_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
