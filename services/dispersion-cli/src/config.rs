//! Loading datasets and layer options from disk.
//!
//! Options files are JSON unless their extension is `.yaml` or `.yml`.

use std::path::Path;

use anyhow::{Context, Result};
use dispersion_layer::LayerOptions;
use particle_data::ParticleSnapshotSet;
use tracing::{debug, info};

/// Options file encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsFormat {
    Json,
    Yaml,
}

impl OptionsFormat {
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Parse layer options from a document.
pub fn parse_options(content: &str, format: OptionsFormat) -> Result<LayerOptions> {
    let options = match format {
        OptionsFormat::Json => {
            serde_json::from_str(content).context("Failed to parse JSON layer options")?
        }
        OptionsFormat::Yaml => {
            serde_yaml::from_str(content).context("Failed to parse YAML layer options")?
        }
    };
    Ok(options)
}

/// Load layer options, falling back to defaults when no file is given.
pub fn load_options(path: Option<&Path>) -> Result<LayerOptions> {
    let Some(path) = path else {
        debug!("No options file, using defaults");
        return Ok(LayerOptions::default());
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read options file: {:?}", path))?;
    let options = parse_options(&content, OptionsFormat::from_path(path))
        .with_context(|| format!("Invalid options file: {:?}", path))?;

    info!(
        path = %path.display(),
        mode = ?options.display_mode,
        binned = options.heat_options.heat_bin.enabled,
        "Loaded layer options"
    );
    Ok(options)
}

/// Load a particle dataset from a JSON file.
pub fn load_dataset(path: &Path) -> Result<ParticleSnapshotSet> {
    let data = ParticleSnapshotSet::from_file(path)
        .with_context(|| format!("Failed to load dataset: {:?}", path))?;

    info!(
        path = %path.display(),
        steps = data.step_count(),
        occurrences = data.total_occurrences(),
        "Loaded particle dataset"
    );
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dispersion_layer::DisplayMode;
    use test_utils::{temp_test_dir, three_step_example, write_dataset};

    #[test]
    fn test_format_from_extension() {
        assert_eq!(OptionsFormat::from_path(Path::new("a.yaml")), OptionsFormat::Yaml);
        assert_eq!(OptionsFormat::from_path(Path::new("a.YML")), OptionsFormat::Yaml);
        assert_eq!(OptionsFormat::from_path(Path::new("a.json")), OptionsFormat::Json);
        assert_eq!(OptionsFormat::from_path(Path::new("options")), OptionsFormat::Json);
    }

    #[test]
    fn test_load_yaml_options() {
        let dir = temp_test_dir();
        let path = dir.path().join("layer.yaml");
        std::fs::write(
            &path,
            "displayMode: keyframe\nageColorScale: [blue, '#ff0000']\nageDomain: [0, 12]\n",
        )
        .unwrap();

        let options = load_options(Some(&path)).unwrap();
        assert_eq!(options.display_mode, Some(DisplayMode::Keyframe));
        assert_eq!(options.age_domain, Some((0.0, 12.0)));
        assert_eq!(options.age_color_scale.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_load_json_options() {
        let dir = temp_test_dir();
        let path = dir.path().join("layer.json");
        std::fs::write(&path, r#"{"dataFormat": {"idIndex": 4, "lonIndex": 0, "latIndex": 1, "depthIndex": 2, "ageIndex": 3}}"#)
            .unwrap();

        let options = load_options(Some(&path)).unwrap();
        assert_eq!(options.data_format, test_utils::lon_first_format());
    }

    #[test]
    fn test_missing_options_file_is_an_error() {
        let dir = temp_test_dir();
        let err = load_options(Some(&dir.path().join("absent.json"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read options file"));
    }

    #[test]
    fn test_invalid_mode_in_options_is_an_error() {
        assert!(parse_options(r#"{"displayMode": "SPARKLES"}"#, OptionsFormat::Json).is_err());
    }

    #[test]
    fn test_defaults_without_file() {
        assert_eq!(load_options(None).unwrap(), LayerOptions::default());
    }

    #[test]
    fn test_load_dataset() {
        let dir = temp_test_dir();
        let path = write_dataset(&dir, "data.json", &three_step_example());
        assert_eq!(load_dataset(&path).unwrap(), three_step_example());
    }
}
