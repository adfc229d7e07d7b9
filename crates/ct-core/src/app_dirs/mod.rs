use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    pub app_data_root: PathBuf,
}

impl AppDirs {
    /// Directory holding one JSON file per preference namespace.
    pub fn preferences_dir(&self) -> PathBuf {
        self.app_data_root.join("prefs")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.app_data_root.join("logs")
    }

    /// State of the local remote user service provider.
    pub fn remote_dir(&self) -> PathBuf {
        self.app_data_root.join("remote")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn app_dirs_derives_concrete_locations() {
        let dirs = AppDirs {
            app_data_root: PathBuf::from("/tmp/comtam"),
        };
        assert_eq!(dirs.preferences_dir(), PathBuf::from("/tmp/comtam/prefs"));
        assert_eq!(dirs.logs_dir(), PathBuf::from("/tmp/comtam/logs"));
        assert_eq!(dirs.remote_dir(), PathBuf::from("/tmp/comtam/remote"));
    }
}
