use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;

const CONFIG_FILE: &str = "report.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Render records as Markdown instead of plain text.
    pub markdown: bool,
    /// Show the step-by-step trace, not just the answer.
    pub show_steps: bool,
    /// Emit records as a JSON array.
    pub json: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            markdown: false,
            show_steps: true,
            json: false,
        }
    }
}

impl ReportConfig {
    pub fn load() -> Self {
        let path = Path::new(CONFIG_FILE);
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => eprintln!("Error parsing {}: {}. Using defaults.", CONFIG_FILE, e),
                },
                Err(e) => eprintln!("Error reading {}: {}. Using defaults.", CONFIG_FILE, e),
            }
        }
        Self::default()
    }

    pub fn save(&self) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        let mut file = fs::File::create(CONFIG_FILE)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}
