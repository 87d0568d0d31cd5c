use {
    crate::error::Error,
    config::{Config, Environment, File},
    std::path::Path,
};

/// Load a configuration from an optional TOML file, then override it with
/// environment variables.
///
/// Environment variables take the form `{PREFIX}__{SECTION}__{KEY}`, e.g.
/// `LENDING__DISPLAY__JSON=true` sets `display.json` under prefix `LENDING`.
/// A missing file is not an error: every key then comes from the environment
/// or from the type's `serde` defaults.
pub fn parse_config<D>(path: impl AsRef<Path>, env_prefix: &str) -> Result<D, Error>
where
    D: serde::de::DeserializeOwned,
{
    let env_override = Environment::with_prefix(env_prefix)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true);

    let config = Config::builder()
        .add_source(File::from(path.as_ref()).required(false))
        .add_source(env_override)
        .build()?;

    Ok(config.try_deserialize()?)
}
