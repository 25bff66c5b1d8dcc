use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use stocksense_core::config::AppConfig;

/// 配置文件路径的环境变量名
pub const CONFIG_PATH_ENV: &str = "STOCKSENSE_CONFIG";
/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "stocksense.toml";
/// 环境变量覆盖前缀，如 `STOCKSENSE__SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "STOCKSENSE";

/// # Summary
/// 分层加载应用配置。
///
/// # Logic
/// 1. 读取配置文件 (不存在时跳过)。
/// 2. 叠加 `STOCKSENSE__` 前缀的环境变量，层级以 `__` 分隔。
/// 3. 反序列化为 `AppConfig`，未出现的键取默认值。
///
/// # Arguments
/// * `path` - 配置文件路径，为 None 时读取 `STOCKSENSE_CONFIG` 或默认路径。
pub fn load(path: Option<PathBuf>) -> Result<AppConfig, ConfigError> {
    let path = path.unwrap_or_else(|| {
        std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
    });
    load_with_env(path, env_source())
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

fn load_with_env(path: PathBuf, env: Environment) -> Result<AppConfig, ConfigError> {
    Config::builder()
        .add_source(File::from(path).required(false))
        .add_source(env)
        .build()?
        .try_deserialize()
}

/// # Summary
/// 读取 `.env` 文件到进程环境变量。
///
/// # Logic
/// 文件不存在时视为未配置并返回 `Ok(None)`；文件存在但无法读取或解析时返回错误。
///
/// # Arguments
/// * `path` - `.env` 文件路径，为 None 时从当前目录向上查找 `.env`。
///
/// # Returns
/// 实际加载的文件路径。
pub fn load_dotenv(path: Option<&Path>) -> Result<Option<PathBuf>, dotenvy::Error> {
    let loaded = match path {
        Some(path) => dotenvy::from_path(path).map(|()| path.to_path_buf()),
        None => dotenvy::dotenv(),
    };
    match loaded {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e),
    }
}
