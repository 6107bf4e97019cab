//! Choosing the input workbook and loading one of its rows.

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use super::{ActionContext, ActionError, ActionInput, CustomAction};
use crate::compare::as_whole_number;
use crate::config::keys;
use crate::spreadsheet::read_cells;

const WORKBOOK_FILTERS: &[(&str, &[&str])] = &[("Excel文件", &["xlsx", "xls"])];

/// Asks the operator for the workbook and the three attachment folders, then
/// records them along with the row selector from the parameter.
///
/// Parameter: `{"row_number": 12, "table_name": "Sheet1", "region": "..."}`.
pub struct SelectDatasetRow;

/// Parameter keys copied verbatim into the store.
const ROW_SELECTOR_KEYS: [&str; 3] = [keys::ROW_NUMBER, keys::TABLE_NAME, keys::REGION];

fn require_existing(label: &str, picked: Option<PathBuf>) -> Result<PathBuf, ActionError> {
    match picked {
        Some(path) if path.exists() => Ok(path),
        Some(path) => Err(ActionError::InvalidPath {
            label: label.to_string(),
            path: path.display().to_string(),
        }),
        None => Err(ActionError::InvalidPath {
            label: label.to_string(),
            path: "<cancelled>".to_string(),
        }),
    }
}

impl CustomAction for SelectDatasetRow {
    fn name(&self) -> &'static str {
        "select_dataset_row"
    }

    fn execute(&self, ctx: &mut ActionContext<'_>, input: &ActionInput) -> Result<()> {
        // Nothing is stored unless every selector and path is valid
        let selectors = ROW_SELECTOR_KEYS
            .into_iter()
            .map(|key| input.require(key).map(|value| (key, value.clone())))
            .collect::<Result<Vec<_>, _>>()?;

        let workbook = ctx.dialogs.pick_file("请选择主工作簿文件", WORKBOOK_FILTERS);
        let house_plan = ctx.dialogs.pick_directory("请选择户型图文件夹");
        let estate_plan = ctx.dialogs.pick_directory("请选择宗地图文件夹");
        let family_member = ctx.dialogs.pick_directory("请选择家庭成员信息文件夹");

        let paths = [
            (keys::MAIN_WORKBOOK_PATH, require_existing(keys::MAIN_WORKBOOK_PATH, workbook)?),
            (keys::HOUSE_PLAN_DIR, require_existing(keys::HOUSE_PLAN_DIR, house_plan)?),
            (keys::ESTATE_PLAN_DIR, require_existing(keys::ESTATE_PLAN_DIR, estate_plan)?),
            (keys::FAMILY_MEMBER_DIR, require_existing(keys::FAMILY_MEMBER_DIR, family_member)?),
        ];

        for (key, path) in paths {
            let text = path.display().to_string();
            ctx.store.set(key, text.as_str())?;
            tracing::info!("Set {} to {}", key, text);
        }

        for (key, value) in selectors {
            tracing::info!("Set {} to {}", key, value);
            ctx.store.set(key, value)?;
        }

        Ok(())
    }
}

/// Reads the configured row of the workbook into `current_data_row`.
///
/// Parameter: `{"columns": {"<field>": "<column letter>", ...}}`.
pub struct LoadDataDetail;

impl LoadDataDetail {
    fn row_number(ctx: &ActionContext<'_>) -> Result<u32, ActionError> {
        let value = ctx
            .store
            .get(keys::ROW_NUMBER)
            .ok_or_else(|| ActionError::MissingConfig(keys::ROW_NUMBER.to_string()))?;
        as_whole_number(value)
            .and_then(|n| u32::try_from(n).ok())
            .filter(|n| *n > 0)
            .ok_or_else(|| ActionError::InvalidConfig {
                key: keys::ROW_NUMBER.to_string(),
                reason: format!("expected a positive row number, got {}", value),
            })
    }

    fn columns(input: &ActionInput) -> Result<Vec<(String, String)>, ActionError> {
        let invalid = |reason: String| ActionError::InvalidParam {
            key: "columns".to_string(),
            reason,
        };

        let Value::Object(columns) = input.require("columns")? else {
            return Err(invalid("expected an object of field -> column".to_string()));
        };
        if columns.is_empty() {
            return Err(invalid("no columns requested".to_string()));
        }

        columns
            .iter()
            .map(|(field, column)| match column.as_str() {
                Some(letters) => Ok((field.clone(), letters.to_string())),
                None => Err(invalid(format!("column for {} is not a string: {}", field, column))),
            })
            .collect()
    }
}

impl CustomAction for LoadDataDetail {
    fn name(&self) -> &'static str {
        "load_data_detail"
    }

    fn execute(&self, ctx: &mut ActionContext<'_>, input: &ActionInput) -> Result<()> {
        let row = Self::row_number(ctx)?;
        let table = ctx
            .store
            .get_str(keys::TABLE_NAME)
            .ok_or_else(|| ActionError::MissingConfig(keys::TABLE_NAME.to_string()))?
            .to_string();
        tracing::info!("Loading row {} of table {}", row, table);

        let columns = Self::columns(input)?;
        for (field, letters) in &columns {
            tracing::info!("Column for {}: {}", field, letters);
        }

        let workbook = ctx.store.get_str(keys::MAIN_WORKBOOK_PATH).unwrap_or_default();
        let letters: Vec<&str> = columns.iter().map(|(_, l)| l.as_str()).collect();
        let values = read_cells(Path::new(workbook), &table, row, &letters)
            .with_context(|| format!("Failed to read row {} of {}", row, table))?;

        let mut record = Map::new();
        for ((field, _), value) in columns.into_iter().zip(values) {
            tracing::info!("Read {}: {}", field, value);
            record.insert(field, Value::String(value));
        }

        ctx.store.set(keys::CURRENT_DATA_ROW, Value::Object(record))
    }
}
