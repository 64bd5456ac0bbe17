// ⚙️ Configuration - Where the NASA data files live
// Resolution order (handled by the CLI): flag → environment variable → default.

use std::path::PathBuf;

pub const DEFAULT_NEO_FILE: &str = "data/neos.csv";
pub const DEFAULT_CAD_FILE: &str = "data/cad.json";

pub const NEO_FILE_ENV: &str = "NEO_FILE";
pub const CAD_FILE_ENV: &str = "CAD_FILE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    /// SBDB NEO export (CSV)
    pub neos: PathBuf,

    /// JPL close-approach export (JSON)
    pub approaches: PathBuf,
}

impl DataPaths {
    pub fn new(neos: impl Into<PathBuf>, approaches: impl Into<PathBuf>) -> Self {
        DataPaths {
            neos: neos.into(),
            approaches: approaches.into(),
        }
    }

    /// Both files resolved against a data directory
    #[cfg(test)]
    pub(crate) fn in_dir(dir: &std::path::Path) -> Self {
        DataPaths::new(dir.join("neos.csv"), dir.join("cad.json"))
    }
}

impl Default for DataPaths {
    fn default() -> Self {
        DataPaths::new(DEFAULT_NEO_FILE, DEFAULT_CAD_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_default_paths() {
        let paths = DataPaths::default();
        assert_eq!(paths.neos, PathBuf::from("data/neos.csv"));
        assert_eq!(paths.approaches, PathBuf::from("data/cad.json"));
    }

    #[test]
    fn test_in_dir() {
        let paths = DataPaths::in_dir(Path::new("/srv/nasa"));
        assert_eq!(paths.neos, PathBuf::from("/srv/nasa/neos.csv"));
        assert_eq!(paths.approaches, PathBuf::from("/srv/nasa/cad.json"));
    }
}
