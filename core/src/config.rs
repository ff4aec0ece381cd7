//! Build-time configuration (spec section 4.B parameters).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BuildConfig {
    /// Probability of taking the silence branch between words. Default: 0.5.
    pub p_sil: f32,
    /// Silence symbol: `"<space>"` for character-based spellers, `"SIL"`
    /// for phone-based ones.
    pub sil_symbol: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            p_sil: 0.5,
            sil_symbol: "<space>".to_string(),
        }
    }
}

impl BuildConfig {
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
