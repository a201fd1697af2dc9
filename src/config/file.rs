use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::defaults;
use super::ConfigError;

/// Create a new configuration file at the specified path
pub fn create_config_file(path: Option<&str>) -> Result<PathBuf, ConfigError> {
    let config_path = path
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(defaults::DEFAULT_CONFIG_FILENAME));

    if config_path.exists() {
        return Err(ConfigError::Io(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Configuration file already exists at {:?}", config_path),
        )));
    }

    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(&config_path, defaults::example_config())?;

    Ok(config_path)
}

/// Get the global configuration file path
pub fn global_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| {
        dir.join(defaults::GLOBAL_CONFIG_DIRNAME)
            .join(defaults::GLOBAL_CONFIG_FILENAME)
    })
}

/// Find the project configuration file by walking up from `start`
pub fn find_project_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(defaults::DEFAULT_CONFIG_FILENAME))
        .find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");
        let path_str = path.to_str().unwrap();

        let created = create_config_file(Some(path_str)).unwrap();
        assert_eq!(created, path);

        let content = fs::read_to_string(&created).unwrap();
        assert!(content.contains("endpoint = \"http://localhost:11434\""));
        assert!(content.contains("model = \"llama2:7b-chat\""));
    }

    #[test]
    fn test_create_config_file_refuses_to_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "model = \"mine\"").unwrap();

        let result = create_config_file(path.to_str());
        assert!(matches!(
            result,
            Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::AlreadyExists
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), "model = \"mine\"");
    }

    #[test]
    fn test_find_project_config_walks_up() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(defaults::DEFAULT_CONFIG_FILENAME);
        fs::write(&config_path, "").unwrap();

        let nested = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_project_config(&nested), Some(config_path));
    }
}
