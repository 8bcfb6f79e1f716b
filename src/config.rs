use std::env;
use std::path::PathBuf;

const HOME_ENV: &str = "PASTESTORE_HOME";

pub struct AppPaths {
    pub base_dir: PathBuf,
    pub db_path: PathBuf,
}

impl AppPaths {
    /// Resolves the data directory: `$PASTESTORE_HOME` when set, otherwise
    /// `~/.pastestore`.
    pub fn new() -> Option<Self> {
        if let Some(base) = env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Some(Self::from_base(PathBuf::from(base)));
        }
        dirs::home_dir().map(|home| Self::from_base(home.join(".pastestore")))
    }

    pub fn from_base(base: PathBuf) -> Self {
        Self {
            db_path: base.join("pastestore.db"),
            base_dir: base,
        }
    }
}
