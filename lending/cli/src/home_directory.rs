use std::path::PathBuf;

/// Where the CLI looks for its configuration.
pub struct HomeDirectory {
    home: PathBuf,
}

impl HomeDirectory {
    pub fn new(home: PathBuf) -> Self {
        Self { home }
    }

    /// Use the given directory, or `~/.lending` if none is given.
    pub fn new_or_default(home: Option<PathBuf>) -> anyhow::Result<Self> {
        if let Some(home) = home {
            return Ok(Self::new(home));
        }

        let Some(user_home) = home::home_dir() else {
            anyhow::bail!("failed to find the user's home directory; use `--home` to set one");
        };

        Ok(Self::new(user_home.join(".lending")))
    }

    pub fn config_file(&self) -> PathBuf {
        self.home.join("app.toml")
    }
}
