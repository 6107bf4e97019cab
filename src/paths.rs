use std::path::PathBuf;
use std::sync::OnceLock;

/// Environment variable that overrides the project root.
pub const ROOT_ENV_VAR: &str = "MAA_AGENT_ROOT";

static PROJECT_ROOT: OnceLock<PathBuf> = OnceLock::new();

/// Returns the project root.
///
/// `MAA_AGENT_ROOT` wins when set; otherwise the directory containing the
/// executable is used.
pub fn get_project_root() -> &'static PathBuf {
    PROJECT_ROOT.get_or_init(|| {
        if let Some(root) = std::env::var_os(ROOT_ENV_VAR) {
            return PathBuf::from(root);
        }
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
    })
}

/// Returns the config directory: `<root>/config/`
pub fn get_config_dir() -> PathBuf {
    get_project_root().join("config")
}

/// Returns the backing document of the config store: `<root>/config/config.json`
pub fn get_config_file() -> PathBuf {
    get_config_dir().join("config.json")
}

/// Returns the logs directory: `<root>/logs/`
pub fn get_logs_dir() -> PathBuf {
    get_project_root().join("logs")
}

/// Returns the screenshots directory: `<root>/logs/screenshots/`
pub fn get_screenshots_dir() -> PathBuf {
    get_logs_dir().join("screenshots")
}

/// Ensures all output directories exist. Call at startup.
pub fn ensure_directories() -> std::io::Result<()> {
    std::fs::create_dir_all(get_config_dir())?;
    std::fs::create_dir_all(get_logs_dir())?;
    std::fs::create_dir_all(get_screenshots_dir())?;
    Ok(())
}
