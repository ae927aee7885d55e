/*!
Configuration for reaching the backend API.
*/
use std::path::Path;

use serde::Deserialize;

#[derive(Deserialize)]
struct ConfigFile {
    api_base: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Cfg {
    /// Root of the backend REST API; endpoint paths are appended to this.
    pub api_base: String,
}

impl std::default::Default for Cfg {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:8080/api".to_owned(),
        }
    }
}

impl Cfg {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let file_contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Unable to read config file: {}", &e))?;
        let cf: ConfigFile = toml::from_str(&file_contents)
            .map_err(|e| format!("Unable to deserialize config file: {}", &e))?;

        let mut c = Self::default();

        if let Some(s) = cf.api_base {
            c.api_base = s;
        }

        Ok(c)
    }
}
