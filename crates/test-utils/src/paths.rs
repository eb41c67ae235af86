//! Path utilities for locating test data files.

use std::path::PathBuf;

use particle_data::ParticleSnapshotSet;

/// Returns the workspace root directory.
pub fn workspace_root() -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir)
        .parent() // crates/
        .and_then(|p| p.parent()) // workspace root
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(manifest_dir))
}

/// Returns `crates/{crate_name}/testdata/`.
pub fn crate_testdata_dir(crate_name: &str) -> PathBuf {
    workspace_root()
        .join("crates")
        .join(crate_name)
        .join("testdata")
}

/// Searches for a test file.
///
/// Checks `TEST_DATA_DIR` first, then `crates/test-utils/testdata/`.
pub fn find_test_file(name: &str) -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(test_data_dir) = std::env::var("TEST_DATA_DIR") {
        candidates.push(PathBuf::from(test_data_dir).join(name));
    }
    candidates.push(crate_testdata_dir("test-utils").join(name));

    candidates.into_iter().find(|path| path.exists())
}

/// Creates a temporary directory for test output, removed on drop.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary test directory")
}

/// Writes `set` as JSON into `dir` and returns the file path.
pub fn write_dataset(dir: &tempfile::TempDir, name: &str, set: &ParticleSnapshotSet) -> PathBuf {
    let path = dir.path().join(name);
    let json = serde_json::to_string(set).expect("Failed to serialize dataset");
    std::fs::write(&path, json).expect("Failed to write dataset");
    path
}
