use std::path::PathBuf;

use anyhow::Result;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub log_filter: Option<String>,
}

impl AppConfig {
    /// `data_file` arrives already resolved by the command line (flag, then
    /// `HR_DATA_FILE`, then the default). Reads `HR_LOG`; call after `.env`
    /// has been loaded.
    pub fn load(data_file: PathBuf) -> Result<Self> {
        let log_filter = std::env::var("HR_LOG")
            .ok()
            .map(|val| val.trim().to_string())
            .filter(|val| !val.is_empty());

        Ok(Self {
            data_file,
            log_filter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_resolved_data_file() {
        let config = AppConfig::load(PathBuf::from("/tmp/override.json")).unwrap();
        assert_eq!(config.data_file, PathBuf::from("/tmp/override.json"));
    }
}
