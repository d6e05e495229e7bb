//! Rewrites the top-level `version` field of JSON manifests (`package.json` and friends).

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use crate::domain::strip_prefix;
use crate::error::{ReleaseError, Result};
use crate::git::Repository;

/// Rewrites manifest files relative to a project root
#[derive(Debug, Clone)]
pub struct ManifestRewriter {
    root: PathBuf,
}

impl ManifestRewriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ManifestRewriter { root: root.into() }
    }

    /// Candidates that exist under the root, in the given order.
    pub fn existing(&self, candidates: &[String]) -> Vec<PathBuf> {
        candidates
            .iter()
            .map(PathBuf::from)
            .filter(|relative| self.root.join(relative).is_file())
            .collect()
    }

    /// Set `version` in every existing candidate to `tag` without its `v` prefix.
    ///
    /// Missing files are skipped silently. Files already at the target version
    /// are left untouched. Returns the relative paths that were rewritten.
    pub fn rewrite(&self, candidates: &[String], tag: &str) -> Result<Vec<PathBuf>> {
        let version = strip_prefix(tag);
        let mut changed = Vec::new();

        for relative in self.existing(candidates) {
            let path = self.root.join(&relative);
            let content = fs::read_to_string(&path)?;

            match set_version(&content, version, &path)? {
                Some(updated) => {
                    fs::write(&path, updated)?;
                    info!(manifest = %relative.display(), version, "rewrote manifest version");
                    changed.push(relative);
                }
                None => debug!(manifest = %relative.display(), "manifest already up to date"),
            }
        }

        Ok(changed)
    }

    /// [Self::rewrite], then stage the rewritten files in the same order.
    pub fn rewrite_and_stage(
        &self,
        candidates: &[String],
        tag: &str,
        repo: &dyn Repository,
    ) -> Result<Vec<PathBuf>> {
        let changed = self.rewrite(candidates, tag)?;
        repo.stage_files(&changed)?;
        Ok(changed)
    }
}

/// Replace the top-level `version` of a JSON document.
///
/// All other keys keep their values and order. The output uses 2-space
/// indentation. Returns `None` when `version` already has the target value.
pub fn set_version(content: &str, version: &str, path: &Path) -> Result<Option<String>> {
    let mut json: Value = serde_json::from_str(content).map_err(|source| ReleaseError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let object = json.as_object_mut().ok_or_else(|| {
        ReleaseError::manifest(format!(
            "'{}' must contain a JSON object at the top level",
            path.display()
        ))
    })?;

    if object.get("version").and_then(Value::as_str) == Some(version) {
        return Ok(None);
    }

    object.insert("version".to_string(), Value::String(version.to_string()));

    serde_json::to_string_pretty(&json)
        .map(Some)
        .map_err(|source| ReleaseError::Json {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite(content: &str, version: &str) -> Option<String> {
        set_version(content, version, Path::new("package.json")).unwrap()
    }

    #[test]
    fn test_set_version_preserves_other_fields_and_order() {
        let updated = rewrite(
            r#"{"name":"app","version":"0.0.0","author":"x","nested":{"yes":"indeed"}}"#,
            "0.1.0",
        )
        .unwrap();

        assert_eq!(
            updated,
            "{\n  \"name\": \"app\",\n  \"version\": \"0.1.0\",\n  \"author\": \"x\",\n  \"nested\": {\n    \"yes\": \"indeed\"\n  }\n}"
        );
    }

    #[test]
    fn test_set_version_adds_missing_field() {
        let updated = rewrite(r#"{"name":"app"}"#, "1.0.0").unwrap();
        assert_eq!(updated, "{\n  \"name\": \"app\",\n  \"version\": \"1.0.0\"\n}");
    }

    #[test]
    fn test_set_version_unchanged() {
        assert_eq!(rewrite(r#"{"version":"1.0.0"}"#, "1.0.0"), None);
    }

    #[test]
    fn test_set_version_rejects_non_object() {
        let err = set_version("[1, 2]", "1.0.0", Path::new("list.json")).unwrap_err();
        assert!(err.to_string().contains("list.json"));
    }

    #[test]
    fn test_set_version_rejects_invalid_json() {
        let err = set_version("{", "1.0.0", Path::new("broken.json")).unwrap_err();
        assert!(matches!(err, ReleaseError::Json { .. }));
    }

    #[test]
    fn test_rewrite_strips_prefix_and_skips_missing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("package.json"), r#"{"version":"0.0.0"}"#).unwrap();

        let rewriter = ManifestRewriter::new(dir.path());
        let changed = rewriter
            .rewrite(
                &["missing.json".to_string(), "package.json".to_string()],
                "v1.0.0",
            )
            .unwrap();

        assert_eq!(changed, vec![PathBuf::from("package.json")]);
        let content = fs::read_to_string(dir.path().join("package.json")).unwrap();
        assert_eq!(content, "{\n  \"version\": \"1.0.0\"\n}");
    }

    #[test]
    fn test_rewrite_only_strips_one_prefix() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("package.json"), r#"{"version":"0.0.0"}"#).unwrap();

        ManifestRewriter::new(dir.path())
            .rewrite(&["package.json".to_string()], "vv1.0.0")
            .unwrap();

        let content = fs::read_to_string(dir.path().join("package.json")).unwrap();
        assert_eq!(content, "{\n  \"version\": \"v1.0.0\"\n}");
    }
}
