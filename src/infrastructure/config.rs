use serde::Deserialize;
use std::path::Path;

const DEFAULT_CONFIG_FILE: &str = "config/converter";

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Settings {
    pub server: ServerSettings,
    pub output: OutputSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct OutputSettings {
    /// Spaces per indentation level for written JSON, 0 for compact output
    pub indent: usize,
    /// Brotli-compress every written profile, not only `.br` paths
    pub compress: bool,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LogSettings {
    pub level: String,
}

/// Load settings from defaults, an optional config file and `EPC_*`
/// environment variables, in increasing precedence.
///
/// An explicit `path` must exist; the default `config/converter` file may be
/// absent.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    load_settings_with_env(path, environment())
}

/// `EPC_SERVER__PORT` sets `server.port`
fn environment() -> config::Environment {
    config::Environment::with_prefix("EPC")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn load_settings_with_env(
    path: Option<&Path>,
    env: config::Environment,
) -> anyhow::Result<Settings> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let settings = config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("output.indent", 4)?
        .set_default("output.compress", false)?
        .set_default("log.level", "info")?
        .add_source(file)
        .add_source(env)
        .build()?;

    Ok(settings.try_deserialize()?)
}
