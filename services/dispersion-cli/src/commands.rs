//! Subcommand implementations.
//!
//! Each command drives a layer on a headless map and returns a JSON report
//! of what the renderer was handed.

use std::sync::Arc;

use anyhow::{bail, Result};
use dispersion_layer::headless::{HeadlessMap, RecordingRenderer};
use dispersion_layer::{
    DisplayMode, HeatBinUpdate, HeatOptionsUpdate, LayerOptions, LayerOptionsUpdate,
    ParticleDispersionLayer,
};
use particle_data::ParticleSnapshotSet;
use serde_json::{json, Value};
use tracing::{debug, warn};

pub type HeadlessLayer = ParticleDispersionLayer<HeadlessMap, RecordingRenderer>;

/// Build an active layer over `data` and display the configured mode.
///
/// A configured mode that cannot be displayed is logged and left in place,
/// so commands that only query the dataset still run.
pub fn build_layer(mut options: LayerOptions, data: ParticleSnapshotSet) -> Result<HeadlessLayer> {
    options.data = Some(Arc::new(data));

    let mut layer = ParticleDispersionLayer::new(options, RecordingRenderer::new());
    if let Err(err) = layer.activate(HeadlessMap::new()) {
        if !layer.is_active() {
            return Err(err.into());
        }
        warn!(error = %err, mode = ?layer.display_mode(), "Configured display mode not displayed");
    }
    Ok(layer)
}

/// Display `mode`, optionally at a specific keyframe.
pub fn render(layer: &mut HeadlessLayer, mode: DisplayMode, frame: Option<usize>) -> Result<Value> {
    layer.set_display_mode(mode)?;
    if let Some(frame) = frame {
        layer.set_frame_index(frame)?;
    }

    let rendered = layer
        .rendered_layer()
        .and_then(|id| layer.renderer().layer(id));
    debug!(%mode, rendered = rendered.is_some(), "Rendered layer");

    let frame_index = (mode == DisplayMode::Keyframe).then(|| layer.frame_index());
    Ok(json!({
        "mode": mode,
        "frameIndex": frame_index,
        "frameCount": layer.frame_count(),
        "gridStats": layer.grid_stats(),
        "layer": rendered,
    }))
}

pub fn bounds(layer: &HeadlessLayer) -> Value {
    match layer.lat_lng_bounds() {
        Some(b) => json!({
            "west": b.west(),
            "south": b.south(),
            "east": b.east(),
            "north": b.north(),
        }),
        None => Value::Null,
    }
}

pub fn ids(layer: &HeadlessLayer) -> Value {
    json!(layer.unique_particle_ids())
}

/// Grid statistics of a binned heatmap in `mode`.
pub fn stats(layer: &mut HeadlessLayer, mode: DisplayMode, cell_size_km: Option<f64>) -> Result<Value> {
    if !mode.is_heatmap() {
        bail!("Grid statistics need a heatmap mode, got {}", mode);
    }

    layer.set_options(LayerOptionsUpdate {
        display_mode: Some(mode),
        heat_options: Some(HeatOptionsUpdate {
            heat_bin: Some(HeatBinUpdate {
                enabled: Some(true),
                cell_size_km,
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    })?;

    Ok(json!(layer.grid_stats()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::three_step_example;

    fn layer() -> HeadlessLayer {
        build_layer(LayerOptions::default(), three_step_example()).unwrap()
    }

    #[test]
    fn test_render_final() {
        let mut layer = layer();
        let report = render(&mut layer, DisplayMode::Final, None).unwrap();

        assert_eq!(report["mode"], "FINAL");
        assert_eq!(report["frameIndex"], Value::Null);
        assert_eq!(report["layer"]["kind"], "heat");
        assert_eq!(report["layer"]["payload"]["max"], 10.0);
        assert_eq!(report["layer"]["payload"]["data"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_render_keyframe_at_frame() {
        let mut layer = layer();
        let report = render(&mut layer, DisplayMode::Keyframe, Some(2)).unwrap();

        assert_eq!(report["frameIndex"], 2);
        assert_eq!(report["frameCount"], 3);
        let markers = report["layer"]["markers"].as_array().unwrap();
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0]["position"]["lat"], 15.0);
        assert_eq!(markers[0]["radius"], 8.0);
    }

    #[test]
    fn test_render_bad_frame_fails() {
        let mut layer = layer();
        let err = render(&mut layer, DisplayMode::Keyframe, Some(9)).unwrap_err();
        assert!(err.to_string().contains("no such frame"));
    }

    #[test]
    fn test_bounds_and_ids() {
        let layer = layer();
        let bounds = bounds(&layer);
        assert_eq!(bounds["south"], 10.0);
        assert_eq!(bounds["east"], 25.0);
        assert_eq!(bounds["west"], 20.0);
        assert_eq!(bounds["north"], 15.0);
        assert_eq!(ids(&layer), json!([1.0, 2.0]));
    }

    #[test]
    fn test_stats_enables_binning() {
        let mut layer = layer();
        let report = stats(&mut layer, DisplayMode::Final, Some(2000.0)).unwrap();
        assert_eq!(report["totalCells"], 1);
        assert_eq!(report["maxCount"], 2);
        assert_eq!(report["maxPercent"], 100.0);

        assert!(stats(&mut layer, DisplayMode::Keyframe, None).is_err());
    }

    #[test]
    fn test_configured_mode_is_rendered_on_build() {
        let options = LayerOptions {
            display_mode: Some(DisplayMode::Exposure),
            ..LayerOptions::default()
        };
        let layer = build_layer(options, three_step_example()).unwrap();
        assert_eq!(layer.display_mode(), Some(DisplayMode::Exposure));
        assert!(layer.rendered_layer().is_some());
    }

    #[test]
    fn test_undisplayable_configured_mode_still_builds() {
        let options = LayerOptions {
            display_mode: Some(DisplayMode::Keyframe),
            start_frame_index: 9,
            ..LayerOptions::default()
        };
        let layer = build_layer(options, three_step_example()).unwrap();

        assert!(layer.is_active());
        assert_eq!(layer.display_mode(), Some(DisplayMode::Keyframe));
        assert_eq!(bounds(&layer)["north"], 15.0);
        assert_eq!(ids(&layer), json!([1.0, 2.0]));
    }

    #[test]
    fn test_sample_dataset() {
        let path = test_utils::require_test_file!("sample_dispersion.json");
        let data = ParticleSnapshotSet::from_file(path).unwrap();
        let mut layer = build_layer(LayerOptions::default(), data).unwrap();

        let report = render(&mut layer, DisplayMode::Exposure, None).unwrap();
        let points = report["layer"]["payload"]["data"].as_array().unwrap().len();
        assert_eq!(points, layer.data().unwrap().total_occurrences());
    }
}
