//! `config generate`

use colored::Colorize;

use crate::config::StaticConfig;
use crate::errors::Result;

pub const DEFAULT_SAMPLE_PATH: &str = "config.example.toml";

/// Write a sample configuration with every default filled in
pub fn config_generate(output_path: Option<String>) -> Result<String> {
    let path = output_path.unwrap_or_else(|| DEFAULT_SAMPLE_PATH.to_string());

    println!(
        "{} {}",
        "Generating configuration file...".yellow(),
        path.blue()
    );

    StaticConfig::default().save_to_file(&path)?;

    println!(
        "  {} {}",
        "Configuration file generated successfully".green(),
        path.blue()
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generated_file_loads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("sample.toml");

        let written = config_generate(Some(path.to_string_lossy().to_string())).unwrap();
        let content = std::fs::read_to_string(&written).unwrap();
        assert!(content.contains("[visits]"));
        assert!(content.contains("atomic_increment = true"));

        let loaded = StaticConfig::load_with_env(Some(written.as_str()), "COMB_GEN_TEST").unwrap();
        assert_eq!(loaded.server.port, 8080);
    }
}
