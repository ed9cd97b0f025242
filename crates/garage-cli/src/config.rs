use std::fs;
use std::path::Path;
use std::path::PathBuf;

use garage_core::config::Config;

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("garage").join("config.toml"))
}

pub fn read_config(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(path)?;
    Ok(toml::from_str(&raw)?)
}

/// Falls back to built-in defaults; a broken file is worth a warning, not an exit.
pub fn load_config(explicit: Option<&Path>) -> Config {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => return Config::default(),
        },
    };
    match read_config(&path) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "using default config");
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_texts_theme_and_title() {
        let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("tempdir: {err}"));
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[texts]\ntake = \"SACAR\"\n\n[theme]\nprimary = \"#ff0000\"\n\n[ui]\ndefault_title = \"DEPOT\"\n",
        )
        .unwrap_or_else(|err| panic!("write: {err}"));

        let config = load_config(Some(&path));
        assert_eq!(config.texts.get("take").map(String::as_str), Some("SACAR"));
        assert_eq!(config.theme.get("primary").map(String::as_str), Some("#ff0000"));
        assert_eq!(config.ui.default_title.as_deref(), Some("DEPOT"));
    }

    #[test]
    fn broken_or_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("tempdir: {err}"));
        let broken = dir.path().join("broken.toml");
        fs::write(&broken, "texts = [").unwrap_or_else(|err| panic!("write: {err}"));

        assert_eq!(load_config(Some(&broken)), Config::default());
        assert_eq!(
            load_config(Some(&dir.path().join("absent.toml"))),
            Config::default()
        );
    }
}
