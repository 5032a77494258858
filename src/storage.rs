use crate::errors::{AppError, AppResult};
use crate::models::ActivityMap;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

pub const DEFAULT_OUTPUT_FILE: &str = "output.svg";

pub fn resolve_output_path(output_dir: Option<&Path>, output_file: &str) -> PathBuf {
    match output_dir {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(output_file),
        _ => PathBuf::from(output_file),
    }
}

/// Reads a `{"YYYY-MM-DD": count}` JSON object from disk.
pub async fn load_activity_file(path: &Path) -> AppResult<ActivityMap> {
    let bytes = fs::read(path).await.map_err(|err| {
        AppError::data_unavailable(format!("failed to read {}: {err}", path.display()))
    })?;
    parse_activity_json(&bytes)
}

pub fn parse_activity_json(bytes: &[u8]) -> AppResult<ActivityMap> {
    let raw: BTreeMap<String, u64> =
        serde_json::from_slice(bytes).map_err(|err| AppError::malformed(err.to_string()))?;
    if raw.is_empty() {
        return Err(AppError::data_unavailable("activity file has no days"));
    }
    ActivityMap::from_iso_pairs(raw)
}

pub async fn write_document(path: &Path, document: &str) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|err| AppError::output_write(parent, err))?;
    }
    fs::write(path, document)
        .await
        .map_err(|err| AppError::output_write(path, err))?;
    info!(path = %path.display(), bytes = document.len(), "wrote svg");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn scratch_dir(tag: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("commit_thief_{tag}_{}_{nanos}", std::process::id()))
    }

    #[test]
    fn output_path_joins_directory() {
        assert_eq!(
            resolve_output_path(Some(Path::new("out")), "graph.svg"),
            PathBuf::from("out/graph.svg")
        );
        assert_eq!(
            resolve_output_path(Some(Path::new("")), DEFAULT_OUTPUT_FILE),
            PathBuf::from("output.svg")
        );
        assert_eq!(resolve_output_path(None, "a.svg"), PathBuf::from("a.svg"));
    }

    #[test]
    fn parse_activity_json_reads_counts() {
        let map = parse_activity_json(br#"{"2024-06-15": 3, "2024-06-10": 7}"#).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.count_on(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()), 7);
    }

    #[test]
    fn parse_activity_json_rejects_bad_input() {
        assert!(matches!(
            parse_activity_json(br#"{"2024-06-15": -1}"#),
            Err(AppError::MalformedData(_))
        ));
        assert!(matches!(
            parse_activity_json(br#"{"yesterday": 1}"#),
            Err(AppError::MalformedData(_))
        ));
        assert!(matches!(
            parse_activity_json(b"{}"),
            Err(AppError::DataUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn write_document_creates_missing_directories() {
        let dir = scratch_dir("write");
        let path = dir.join("nested").join("graph.svg");
        write_document(&path, "<svg/>").await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<svg/>");
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn write_document_reports_unwritable_directory() {
        let dir = scratch_dir("blocked");
        std::fs::create_dir_all(&dir).unwrap();
        let blocker = dir.join("not-a-dir");
        std::fs::write(&blocker, "plain file").unwrap();

        let err = write_document(&blocker.join("graph.svg"), "<svg/>")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::OutputWrite { ref path, .. } if *path == blocker));
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn missing_activity_file_is_unavailable() {
        let path = scratch_dir("missing").join("activity.json");
        let err = load_activity_file(&path).await.unwrap_err();
        assert!(matches!(err, AppError::DataUnavailable(_)));
    }
}
