//! Exercise catalog loading.

use std::path::Path;
use anyhow::{Context, Result};
use grammatik_core::Exercise;
use tracing::debug;

/// Load a JSON array of exercises.
pub fn load_catalog(path: &Path) -> Result<Vec<Exercise>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;
    let exercises: Vec<Exercise> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse catalog {}", path.display()))?;
    debug!("Loaded {} exercises from {}", exercises.len(), path.display());
    Ok(exercises)
}

/// Load the catalog or explain that the command needs one.
pub fn require_catalog(path: Option<&Path>) -> Result<Vec<Exercise>> {
    let path = path.context("This command needs an exercise catalog (--catalog <file>)")?;
    load_catalog(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use grammatik_core::{Level, Topic};

    #[test]
    fn test_load_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"[{"id":"x1","level":"B2","grammarUiTopics":["verben"]},
                {"id":"x2","level":"a1","grammarUiTopics":["satzbau","nomen"]}]"#,
        )
        .unwrap();

        let catalog = load_catalog(&path).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].level, Level::B2);
        assert_eq!(catalog[1].grammar_ui_topics, vec![Topic::Satzbau, Topic::Nomen]);
    }

    #[test]
    fn test_require_catalog_without_path() {
        let err = require_catalog(None).unwrap_err();
        assert!(err.to_string().contains("--catalog"));
    }

    #[test]
    fn test_load_catalog_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, r#"[{"id":"x1","level":"Z9"}]"#).unwrap();

        let err = load_catalog(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse catalog"));
    }
}
