use std::env;
use std::path::{Path, PathBuf};

pub const DATA_FILE_VAR: &str = "WORKOUT_LOG_DATA";
pub const FONT_FILE_VAR: &str = "WORKOUT_LOG_FONT";
pub const DEFAULT_DATA_FILE: &str = "dados_treino.json";
pub const DEFAULT_FONT_FILE: &str = "Poppins-Regular.ttf";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub data_file: PathBuf,
    /// `None` falls back to the egui default font.
    pub font_file: Option<PathBuf>,
}

impl Config {
    /// Reads `.env` (if any) and then the process environment.
    pub fn from_env() -> Self {
        if let Err(err) = dotenv::dotenv() {
            log::debug!("no .env file loaded: {}", err);
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_file = lookup(DATA_FILE_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

        let font_file = match lookup(FONT_FILE_VAR) {
            Some(v) if !v.trim().is_empty() => Some(PathBuf::from(v)),
            _ if Path::new(DEFAULT_FONT_FILE).is_file() => Some(PathBuf::from(DEFAULT_FONT_FILE)),
            _ => None,
        };

        Config { data_file, font_file }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_to_dados_treino_json() {
        let config = Config::from_lookup(lookup_in(&[]));
        assert_eq!(config.data_file, PathBuf::from(DEFAULT_DATA_FILE));
    }

    #[test]
    fn environment_overrides_paths() {
        let config = Config::from_lookup(lookup_in(&[
            (DATA_FILE_VAR, "/var/lib/gym/log.json"),
            (FONT_FILE_VAR, "fonts/Inter.ttf"),
        ]));
        assert_eq!(config.data_file, PathBuf::from("/var/lib/gym/log.json"));
        assert_eq!(config.font_file, Some(PathBuf::from("fonts/Inter.ttf")));
    }

    #[test]
    fn blank_data_file_uses_default() {
        let config = Config::from_lookup(lookup_in(&[(DATA_FILE_VAR, "  ")]));
        assert_eq!(config.data_file, PathBuf::from(DEFAULT_DATA_FILE));
    }
}
