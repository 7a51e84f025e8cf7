//! Output configuration from TOML (`[output]` section)

use avalon_domain::{ConfigIssue, ConfigIssueCode, OutputFormat};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw output configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Directory that receives one `game-<timestamp>` folder per game
    pub dir: PathBuf,
    /// Result format: "summary", "full" or "json"
    pub format: Option<String>,
    /// Enable colored terminal output
    pub color: bool,
    /// Write `conversation.jsonl` with every prompt and response
    pub conversation_log: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("outputs"),
            format: None,
            color: true,
            conversation_log: true,
        }
    }
}

impl FileOutputConfig {
    pub fn parse_format(&self) -> (OutputFormat, Vec<ConfigIssue>) {
        let Some(format) = &self.format else {
            return (OutputFormat::default(), vec![]);
        };
        match format.parse::<OutputFormat>() {
            Ok(format) => (format, vec![]),
            Err(_) => {
                let issue = ConfigIssue::warning(
                    ConfigIssueCode::UnknownOutputFormat,
                    format!(
                        "output.format: unknown value '{}', falling back to 'summary'",
                        format
                    ),
                );
                (OutputFormat::default(), vec![issue])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_deserialize() {
        let toml_str = r#"
[output]
format = "json"
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.output.parse_format().0, OutputFormat::Json);
        assert_eq!(config.output.dir, PathBuf::from("outputs"));
    }

    #[test]
    fn test_unknown_format_warns() {
        let config = FileOutputConfig {
            format: Some("xml".to_string()),
            ..Default::default()
        };
        let (format, issues) = config.parse_format();
        assert_eq!(format, OutputFormat::Summary);
        assert_eq!(issues[0].code, ConfigIssueCode::UnknownOutputFormat);
    }
}
