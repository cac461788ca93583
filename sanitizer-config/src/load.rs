use std::{
    fmt, io,
    path::{Path, PathBuf},
};

use config::builder::{ConfigBuilder, DefaultState};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::environment::{Environment, EnvironmentError};

/// Directory containing configuration files relative to the application root.
const CONFIGURATION_DIR: &str = "configuration";

/// Supported extensions for base and environment configuration files.
const CONFIG_FILE_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

/// Prefix for environment variable configuration overrides.
const ENV_PREFIX: &str = "APP";

const ENV_PREFIX_SEPARATOR: &str = "_";

/// Separator for nested configuration keys in environment variables.
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Copy)]
enum ConfigFileKind {
    Base,
    Environment(Environment),
}

impl ConfigFileKind {
    fn stem(&self) -> &'static str {
        match self {
            ConfigFileKind::Base => "base",
            ConfigFileKind::Environment(env) => env.as_str(),
        }
    }
}

impl fmt::Display for ConfigFileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigFileKind::Base => f.write_str("base configuration"),
            ConfigFileKind::Environment(env) => write!(f, "{env} environment configuration"),
        }
    }
}

/// Errors that can occur while loading configuration files and overrides.
#[derive(Debug, Error)]
pub enum LoadConfigError {
    #[error("failed to determine the current directory: {0}")]
    CurrentDir(#[source] io::Error),

    #[error("configuration directory `{0}` does not exist")]
    MissingConfigurationDirectory(PathBuf),

    #[error("could not locate {kind_description} in `{directory}`; attempted: {attempted}")]
    ConfigurationFileMissing {
        kind_description: String,
        directory: PathBuf,
        attempted: String,
    },

    #[error("failed to load {kind_description} from `{path}`: {source}")]
    ConfigurationFileLoad {
        kind_description: String,
        path: PathBuf,
        source: config::ConfigError,
    },

    /// Files and overrides merged, but the result does not match the target type.
    #[error("failed to deserialize configuration: {0}")]
    Deserialization(#[source] config::ConfigError),

    #[error("failed to determine runtime environment: {0}")]
    Environment(#[from] EnvironmentError),

    /// Covers failures of the final merge, including malformed environment overrides.
    #[error("failed to build configuration: {0}")]
    Builder(#[source] config::ConfigError),
}

/// Loads configuration for the current working directory and `APP_ENVIRONMENT`.
///
/// See [`load_config_from`] for the layering rules.
pub fn load_config<T>() -> Result<T, LoadConfigError>
where
    T: DeserializeOwned,
{
    let base_path = std::env::current_dir().map_err(LoadConfigError::CurrentDir)?;
    let environment = Environment::load()?;

    load_config_from(&base_path, environment)
}

/// Loads hierarchical configuration rooted at `base_path`.
///
/// Reads `configuration/base.(yaml|yml|json)`, then `configuration/{environment}.(yaml|yml|json)`,
/// then applies `APP_`-prefixed environment variables. Nested keys use double underscores
/// (`APP_SOURCE__URL`). Later layers override earlier ones key by key.
pub fn load_config_from<T>(base_path: &Path, environment: Environment) -> Result<T, LoadConfigError>
where
    T: DeserializeOwned,
{
    load_config_with_overrides(base_path, environment, environment_source())
}

fn environment_source() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_PREFIX_SEPARATOR)
        .separator(ENV_SEPARATOR)
}

fn load_config_with_overrides<T>(
    base_path: &Path,
    environment: Environment,
    environment_source: config::Environment,
) -> Result<T, LoadConfigError>
where
    T: DeserializeOwned,
{
    let configuration_directory = base_path.join(CONFIGURATION_DIR);

    if !configuration_directory.is_dir() {
        return Err(LoadConfigError::MissingConfigurationDirectory(
            configuration_directory,
        ));
    }

    let base_file = find_configuration_file(&configuration_directory, ConfigFileKind::Base)?;
    let environment_file = find_configuration_file(
        &configuration_directory,
        ConfigFileKind::Environment(environment),
    )?;

    let builder = config::Config::builder().add_source(config::File::from(base_file.clone()));
    validate_configuration_source(&builder, ConfigFileKind::Base, &base_file)?;

    let builder = builder.add_source(config::File::from(environment_file.clone()));
    validate_configuration_source(
        &builder,
        ConfigFileKind::Environment(environment),
        &environment_file,
    )?;

    let settings = builder
        .add_source(environment_source)
        .build()
        .map_err(LoadConfigError::Builder)?;

    settings
        .try_deserialize::<T>()
        .map_err(LoadConfigError::Deserialization)
}

fn find_configuration_file(
    directory: &Path,
    kind: ConfigFileKind,
) -> Result<PathBuf, LoadConfigError> {
    let stem = kind.stem();
    let mut attempted_paths = Vec::with_capacity(CONFIG_FILE_EXTENSIONS.len());

    for extension in CONFIG_FILE_EXTENSIONS {
        let path = directory.join(format!("{stem}.{extension}"));
        attempted_paths.push(path.clone());

        if path.is_file() {
            return Ok(path);
        }
    }

    let attempted = attempted_paths
        .iter()
        .map(|path| format!("`{}`", path.display()))
        .collect::<Vec<_>>()
        .join(", ");

    Err(LoadConfigError::ConfigurationFileMissing {
        kind_description: kind.to_string(),
        directory: directory.to_path_buf(),
        attempted,
    })
}

/// Builds the layers added so far so that a broken file is reported by name.
fn validate_configuration_source(
    builder: &ConfigBuilder<DefaultState>,
    kind: ConfigFileKind,
    path: &Path,
) -> Result<(), LoadConfigError> {
    builder
        .clone()
        .build()
        .map_err(|source| LoadConfigError::ConfigurationFileLoad {
            kind_description: kind.to_string(),
            path: path.to_path_buf(),
            source,
        })
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::Duration;

    use secrecy::ExposeSecret;
    use tempfile::TempDir;

    use super::*;
    use crate::shared::RunnerConfig;

    const BASE_YAML: &str = "\
source:
  url: https://users.example.com/api/users
sink:
  path: out/base.json
";

    fn configuration_root(files: &[(&str, &str)]) -> TempDir {
        let root = tempfile::tempdir().unwrap();
        let directory = root.path().join(CONFIGURATION_DIR);
        fs::create_dir(&directory).unwrap();
        for (name, contents) in files {
            fs::write(directory.join(name), contents).unwrap();
        }

        root
    }

    fn overrides(vars: &[(&str, &str)]) -> config::Environment {
        let vars = vars
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect::<config::Map<String, String>>();

        environment_source().source(Some(vars))
    }

    fn load(root: &TempDir, environment: Environment, vars: &[(&str, &str)]) -> RunnerConfig {
        load_config_with_overrides(root.path(), environment, overrides(vars)).unwrap()
    }

    #[test]
    fn environment_file_overrides_base() {
        let root = configuration_root(&[
            ("base.yaml", BASE_YAML),
            ("dev.yaml", "source:\n  bearer_token: abc123\n  timeout_ms: 500\n"),
        ]);

        let config = load(&root, Environment::Dev, &[]);

        assert_eq!(config.source.url, "https://users.example.com/api/users");
        assert_eq!(
            config.source.bearer_token.as_ref().map(|t| t.expose_secret().as_str()),
            Some("abc123")
        );
        assert_eq!(config.source.timeout(), Duration::from_millis(500));
        assert_eq!(config.sink.path, PathBuf::from("out/base.json"));
    }

    #[test]
    fn defaults_apply_when_keys_are_missing() {
        let root = configuration_root(&[
            ("base.yml", "source:\n  url: http://localhost/users\n"),
            ("prod.json", "{}"),
        ]);

        let config = load(&root, Environment::Prod, &[]);

        assert!(config.source.bearer_token.is_none());
        assert_eq!(config.source.timeout_ms, 30_000);
        assert_eq!(config.sink.path, PathBuf::from("transformed.json"));
    }

    #[test]
    fn environment_variables_override_files() {
        let root = configuration_root(&[("base.yaml", BASE_YAML), ("dev.yaml", "{}")]);

        let config = load(
            &root,
            Environment::Dev,
            &[
                ("APP_SOURCE__URL", "http://127.0.0.1:8080/api/users"),
                ("APP_SINK__PATH", "/tmp/users.json"),
            ],
        );

        assert_eq!(config.source.url, "http://127.0.0.1:8080/api/users");
        assert_eq!(config.sink.path, PathBuf::from("/tmp/users.json"));
    }

    #[test]
    fn numeric_environment_override_is_parsed() {
        let root = configuration_root(&[("base.yaml", BASE_YAML), ("dev.yaml", "{}")]);

        let config = load(
            &root,
            Environment::Dev,
            &[
                ("APP_SOURCE__TIMEOUT_MS", "1500"),
                ("APP_SOURCE__BEARER_TOKEN", "from-env"),
            ],
        );

        assert_eq!(config.source.timeout(), Duration::from_millis(1_500));
        assert_eq!(
            config.source.bearer_token.as_ref().map(|t| t.expose_secret().as_str()),
            Some("from-env")
        );
    }

    #[test]
    fn missing_directory_is_reported() {
        let root = tempfile::tempdir().unwrap();

        let err = load_config_with_overrides::<RunnerConfig>(
            root.path(),
            Environment::Dev,
            overrides(&[]),
        )
        .unwrap_err();

        assert!(matches!(err, LoadConfigError::MissingConfigurationDirectory(_)));
    }

    #[test]
    fn missing_environment_file_lists_attempted_paths() {
        let root = configuration_root(&[("base.yaml", BASE_YAML)]);

        let err = load_config_with_overrides::<RunnerConfig>(
            root.path(),
            Environment::Prod,
            overrides(&[]),
        )
        .unwrap_err();

        let LoadConfigError::ConfigurationFileMissing {
            kind_description,
            attempted,
            ..
        } = err
        else {
            panic!("unexpected error: {err}");
        };
        assert_eq!(kind_description, "prod environment configuration");
        assert!(attempted.contains("prod.yaml"));
        assert!(attempted.contains("prod.json"));
    }

    #[test]
    fn broken_file_is_reported_by_name() {
        let root = configuration_root(&[
            ("base.yaml", BASE_YAML),
            ("dev.yaml", "source: [unterminated\n"),
        ]);

        let err = load_config_with_overrides::<RunnerConfig>(
            root.path(),
            Environment::Dev,
            overrides(&[]),
        )
        .unwrap_err();

        let LoadConfigError::ConfigurationFileLoad { path, .. } = err else {
            panic!("unexpected error: {err}");
        };
        assert!(path.ends_with("dev.yaml"));
    }

    #[test]
    fn missing_required_key_fails_deserialization() {
        let root =
            configuration_root(&[("base.yaml", "sink:\n  path: x.json\n"), ("dev.yaml", "{}")]);

        let err = load_config_with_overrides::<RunnerConfig>(
            root.path(),
            Environment::Dev,
            overrides(&[]),
        )
        .unwrap_err();

        assert!(matches!(err, LoadConfigError::Deserialization(_)));
    }
}
