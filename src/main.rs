//! Operator CLI for the host-independent agent actions.
//!
//! Runs dataset selection and row loading outside the automation host, so
//! the config store can be prepared before a task starts.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde_json::{Map, Value};

use maa_field_agent::actions::{ActionContext, ActionInput};
use maa_field_agent::config::{ConfigStore, keys};
use maa_field_agent::dialogs::{Dialogs, NativeDialogs};
use maa_field_agent::host::DetachedHost;
use maa_field_agent::logging::setup_logging;
use maa_field_agent::paths;
use maa_field_agent::registry::Registry;
use maa_field_agent::window::resize_window_by_title;

const LOG_PREFIX: &str = "maa_field_agent.log";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pick the workbook and attachment folders, then store the row selector
    SelectDataset {
        #[arg(long)]
        row: u32,
        #[arg(long)]
        table: String,
        #[arg(long)]
        region: String,
    },
    /// Load the configured row into the store
    LoadRow {
        /// Comma-separated `field=COLUMN` pairs, e.g. `name=A,zdmj=Q`
        #[arg(long, value_parser = parse_columns)]
        columns: Map<String, Value>,
    },
    /// Print the config store
    ShowConfig,
    /// Move a window to the origin and resize it
    ResizeWindow {
        #[arg(long)]
        title: String,
        #[arg(long, default_value_t = 1200)]
        width: i32,
        #[arg(long, default_value_t = 900)]
        height: i32,
    },
}

fn parse_columns(raw: &str) -> Result<Map<String, Value>, String> {
    let mut columns = Map::new();
    for pair in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let Some((field, column)) = pair.split_once('=') else {
            return Err(format!("expected field=COLUMN, got {:?}", pair));
        };
        columns.insert(field.trim().to_string(), Value::from(column.trim()));
    }
    if columns.is_empty() {
        return Err("no columns given".to_string());
    }
    Ok(columns)
}

fn run_action(
    registry: &Registry,
    store: &mut ConfigStore,
    name: &str,
    param: Map<String, Value>,
) -> Result<()> {
    let mut host = DetachedHost::new();
    let dialogs = NativeDialogs;
    let mut ctx = ActionContext::new(&mut host, store, &dialogs);

    if !registry.run_action(name, &mut ctx, &ActionInput::new(param)).is_success() {
        bail!("{} failed, see the log for details", name);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    paths::ensure_directories().context("Failed to create output directories")?;
    let _guard = setup_logging(&paths::get_logs_dir(), LOG_PREFIX, cli.debug, true)?;

    let mut store = ConfigStore::open_default()?;
    let registry = Registry::with_defaults();

    match cli.command {
        Command::SelectDataset { row, table, region } => {
            if let Some(current) = store.get_str(keys::MAIN_WORKBOOK_PATH) {
                let message = format!("当前主工作簿: {}\n是否重新选择?", current);
                if !NativeDialogs.confirm("重新选择数据", &message) {
                    tracing::info!("Dataset selection cancelled");
                    return Ok(());
                }
            }
            let mut param = Map::new();
            param.insert(keys::ROW_NUMBER.to_string(), Value::from(row));
            param.insert(keys::TABLE_NAME.to_string(), Value::from(table));
            param.insert(keys::REGION.to_string(), Value::from(region));
            run_action(&registry, &mut store, "select_dataset_row", param)?;
        }
        Command::LoadRow { columns } => {
            let mut param = Map::new();
            param.insert("columns".to_string(), Value::Object(columns));
            run_action(&registry, &mut store, "load_data_detail", param)?;
            if let Some(row) = store.get(keys::CURRENT_DATA_ROW) {
                println!("{}", serde_json::to_string_pretty(row)?);
            }
        }
        Command::ShowConfig => {
            println!("# {}", store.path().display());
            println!("{}", store);
        }
        Command::ResizeWindow {
            title,
            width,
            height,
        } => {
            if !resize_window_by_title(&title, width, height)? {
                bail!("No window title contains {:?}", title);
            }
        }
    }

    Ok(())
}
