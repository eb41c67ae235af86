//! The particle dispersion layer.

use std::sync::Arc;

use aggregation::{exposure, final_positions, keyframe, HeatmapPayload};
use dispersion_common::{BoundingBox, ColorScale, LatLng};
use heatbin::{GridStats, HeatBinner};
use particle_data::{ParticleId, ParticleSnapshotSet};
use tracing::{debug, error, info, warn};

use crate::options::Merge;
use crate::{
    CircleMarker, DisplayMode, LayerError, LayerId, LayerOptions, LayerOptionsUpdate,
    LayerRenderer, MapHost, Result,
};

/// Name of the pane the layer draws into.
pub const PANE_NAME: &str = "particle-dispersion";

/// Lifecycle of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerState {
    /// Not on a map. Mode changes are only recorded.
    Inactive,
    /// On a map. `mode` is what is currently displayed, `None` when nothing
    /// is (no mode chosen yet, or the last attempt failed).
    Active { mode: Option<DisplayMode> },
}

/// Presents a [`ParticleSnapshotSet`] on a host map in one [`DisplayMode`].
///
/// The layer owns at most one rendered layer at a time. Every mode change,
/// data change or option change tears it down before building the next
/// one, so nothing accumulates across switches.
pub struct ParticleDispersionLayer<M, R> {
    options: LayerOptions,
    renderer: R,
    map: Option<M>,
    state: LayerState,
    rendered: Option<LayerId>,
    next_id: u64,
    frame_index: usize,
    markers: Vec<CircleMarker>,
    colors: Option<ColorScale>,
    grid_stats: Option<GridStats>,
}

impl<M: MapHost, R: LayerRenderer> ParticleDispersionLayer<M, R> {
    pub fn new(options: LayerOptions, renderer: R) -> Self {
        let frame_index = options.start_frame_index;
        Self {
            options,
            renderer,
            map: None,
            state: LayerState::Inactive,
            rendered: None,
            next_id: 0,
            frame_index,
            markers: Vec::new(),
            colors: None,
            grid_stats: None,
        }
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Put the layer on `map` and display the configured mode, if any.
    ///
    /// The layer stays active even when displaying the mode fails.
    pub fn activate(&mut self, mut map: M) -> Result<()> {
        if self.map.is_some() {
            warn!("Attempted to activate a layer that is already active");
            return Err(LayerError::AlreadyActive);
        }

        map.create_pane(PANE_NAME);
        self.map = Some(map);
        self.state = LayerState::Active { mode: None };
        info!(mode = ?self.options.display_mode, "Activated particle dispersion layer");

        match self.options.display_mode {
            Some(mode) => self.render(mode),
            None => Ok(()),
        }
    }

    /// Take the layer off its map and hand the map back.
    pub fn deactivate(&mut self) -> Option<M> {
        if self.map.is_none() {
            debug!("Deactivate called on inactive layer");
            return None;
        }

        self.clear_display();
        let mut map = self.map.take()?;
        map.remove_pane(PANE_NAME);
        self.state = LayerState::Inactive;
        info!("Deactivated particle dispersion layer");
        Some(map)
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Switch to `mode`, replacing whatever is displayed.
    ///
    /// While inactive the mode is only recorded and applied on activation.
    pub fn set_display_mode(&mut self, mode: DisplayMode) -> Result<()> {
        self.options.display_mode = Some(mode);
        if !self.is_active() {
            debug!(%mode, "Layer inactive, display mode recorded");
            return Ok(());
        }
        self.render(mode)
    }

    /// Parse and switch to a mode name. An unknown name changes nothing.
    pub fn set_display_mode_str(&mut self, mode: &str) -> Result<()> {
        let mode = mode.parse::<DisplayMode>().map_err(|e| {
            error!(error = %e, "Attempted to set invalid display mode");
            e
        })?;
        self.set_display_mode(mode)
    }

    /// Replace the dataset and redisplay the current mode.
    pub fn set_data(&mut self, data: impl Into<Arc<ParticleSnapshotSet>>) -> Result<()> {
        let data = data.into();
        info!(
            steps = data.step_count(),
            occurrences = data.total_occurrences(),
            "Replacing particle dataset"
        );
        self.options.data = Some(data);
        self.colors = None;
        self.update()
    }

    /// Merge `update` into the options and redisplay the current mode.
    ///
    /// A new `start_frame_index` also moves the current keyframe there.
    pub fn set_options(&mut self, update: LayerOptionsUpdate) -> Result<()> {
        let scale_changed = update.data.is_some()
            || update.age_color_scale.is_some()
            || update.age_domain.is_some();

        if let Some(start) = update.start_frame_index {
            self.frame_index = start;
        }
        self.options.merge(update);
        if scale_changed {
            self.colors = None;
        }
        self.update()
    }

    /// Redisplay the current mode.
    pub fn update(&mut self) -> Result<()> {
        match self.options.display_mode {
            Some(mode) => self.set_display_mode(mode),
            None => Ok(()),
        }
    }

    /// Show the step at positional `index`. Only valid while a keyframe
    /// layer is displayed; an invalid index keeps the current frame.
    pub fn set_frame_index(&mut self, index: usize) -> Result<()> {
        let result = self.try_set_frame_index(index);
        if let Err(err) = &result {
            error!(index, error = %err, "Cannot display frame");
        }
        result
    }

    fn try_set_frame_index(&mut self, index: usize) -> Result<()> {
        let current = match self.state {
            LayerState::Inactive => return Err(LayerError::Inactive),
            LayerState::Active { mode } => mode,
        };
        if current != Some(DisplayMode::Keyframe) {
            return Err(LayerError::WrongMode {
                expected: DisplayMode::Keyframe,
                current,
            });
        }
        let data = self.require_data(DisplayMode::Keyframe)?;
        self.show_frame(&data, index)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn is_active(&self) -> bool {
        matches!(self.state, LayerState::Active { .. })
    }

    pub fn state(&self) -> LayerState {
        self.state
    }

    /// The configured display mode, displayed or not.
    pub fn display_mode(&self) -> Option<DisplayMode> {
        self.options.display_mode
    }

    pub fn options(&self) -> &LayerOptions {
        &self.options
    }

    pub fn data(&self) -> Option<&Arc<ParticleSnapshotSet>> {
        self.options.data.as_ref()
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn frame_count(&self) -> usize {
        self.options.data.as_ref().map_or(0, |d| d.step_count())
    }

    /// Markers of the displayed keyframe.
    pub fn markers(&self) -> &[CircleMarker] {
        &self.markers
    }

    /// Statistics of the displayed binned heatmap.
    pub fn grid_stats(&self) -> Option<&GridStats> {
        self.grid_stats.as_ref()
    }

    pub fn rendered_layer(&self) -> Option<LayerId> {
        self.rendered
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn map(&self) -> Option<&M> {
        self.map.as_ref()
    }

    /// Bounds of every particle position, wrapped through the map while
    /// active.
    pub fn lat_lng_bounds(&self) -> Option<BoundingBox> {
        let data = self.options.data.as_ref()?;
        BoundingBox::from_points(
            data.positions(&self.options.data_format)
                .map(|p| self.wrap(p)),
        )
    }

    pub fn unique_particle_ids(&self) -> Vec<ParticleId> {
        self.options
            .data
            .as_ref()
            .map(|d| d.unique_particle_ids(&self.options.data_format))
            .unwrap_or_default()
    }

    // ========================================================================
    // Display
    // ========================================================================

    fn render(&mut self, mode: DisplayMode) -> Result<()> {
        self.clear_display();
        let result = self.build(mode);
        if let Err(err) = &result {
            error!(%mode, error = %err, "Failed to display particle layer");
        }
        result
    }

    fn build(&mut self, mode: DisplayMode) -> Result<()> {
        self.options
            .data_format
            .validate(mode.required_fields())
            .map_err(|source| LayerError::InvalidDataFormat { mode, source })?;
        let data = self.require_data(mode)?;

        match mode {
            DisplayMode::Final | DisplayMode::Exposure => self.build_heatmap(mode, &data),
            DisplayMode::Keyframe => self.build_keyframe(&data),
        }
    }

    fn build_heatmap(&mut self, mode: DisplayMode, data: &ParticleSnapshotSet) -> Result<()> {
        let format = self.options.data_format;
        let points = match mode {
            DisplayMode::Final => final_positions(data, &format, self.options.final_intensity),
            _ => exposure(data, &format, self.options.exposure_intensity),
        };

        let bin = self.options.heat_options.heat_bin.clone();
        let mut outlines = Vec::new();
        let payload = if !bin.enabled {
            HeatmapPayload::new(0.0, self.options.heat_options.max_value, points)
        } else if points.is_empty() {
            HeatmapPayload::default()
        } else {
            let binned = HeatBinner::new(bin.clone())?
                .bin(points.iter().map(|p| self.wrap(p.position())))?;
            self.grid_stats = Some(binned.stats(data.unique_particle_ids(&format).len()));
            if bin.show_bin_grid {
                outlines = binned.outlines();
            }
            binned.payload()
        };

        let id = self.allocate_id();
        self.renderer
            .create_heat_layer(id, PANE_NAME, &self.options.heat_options);
        self.renderer.set_heat_data(id, &payload);
        if !outlines.is_empty() {
            self.renderer.set_grid_outlines(id, &outlines);
        }
        self.attach(id, mode);

        info!(
            %mode,
            points = payload.len(),
            binned = bin.enabled,
            min = payload.min,
            max = payload.max,
            "Displayed heatmap"
        );
        Ok(())
    }

    fn build_keyframe(&mut self, data: &ParticleSnapshotSet) -> Result<()> {
        self.color_scale(data)?;
        let id = self.allocate_id();
        self.renderer.create_marker_layer(id, PANE_NAME);
        self.attach(id, DisplayMode::Keyframe);
        self.show_frame(data, self.frame_index)
    }

    fn show_frame(&mut self, data: &ParticleSnapshotSet, index: usize) -> Result<()> {
        let scale = self.color_scale(data)?;
        let frame = keyframe(data, &self.options.data_format, index, &scale)?;

        self.frame_index = index;
        self.markers.clear();
        for record in frame.records {
            let position = self.wrap(record.position);
            self.markers
                .push(CircleMarker::for_particle(position, record.color, record.particle));
        }
        if let Some(id) = self.rendered {
            self.renderer.set_markers(id, &self.markers);
        }

        debug!(index, key = %frame.key, markers = self.markers.len(), "Displayed keyframe");
        Ok(())
    }

    /// Remove the rendered layer, if any. Safe to call repeatedly.
    fn clear_display(&mut self) {
        if let Some(id) = self.rendered.take() {
            if let Some(map) = self.map.as_mut() {
                map.remove_layer(id);
            }
            self.renderer.destroy_layer(id);
            debug!(layer = %id, "Removed rendered layer");
        }
        self.markers.clear();
        self.grid_stats = None;
        if let LayerState::Active { mode } = &mut self.state {
            *mode = None;
        }
    }

    fn attach(&mut self, id: LayerId, mode: DisplayMode) {
        if let Some(map) = self.map.as_mut() {
            map.add_layer(id);
        }
        self.rendered = Some(id);
        self.state = LayerState::Active { mode: Some(mode) };
    }

    fn allocate_id(&mut self) -> LayerId {
        self.next_id += 1;
        LayerId(self.next_id)
    }

    /// The cached age scale, rebuilt after data or scale option changes.
    fn color_scale(&mut self, data: &ParticleSnapshotSet) -> Result<ColorScale> {
        if let Some(scale) = &self.colors {
            return Ok(scale.clone());
        }
        let domain = self
            .options
            .age_domain
            .unwrap_or((0.0, data.step_count() as f64));
        let scale = ColorScale::new(self.options.age_colors(), domain)?;
        debug!(?domain, stops = scale.stops().len(), "Built age color scale");
        self.colors = Some(scale.clone());
        Ok(scale)
    }

    fn require_data(&self, mode: DisplayMode) -> Result<Arc<ParticleSnapshotSet>> {
        self.options
            .data
            .clone()
            .ok_or_else(|| LayerError::missing_data(format!("{mode} mode requires a dataset")))
    }

    fn wrap(&self, position: LatLng) -> LatLng {
        match &self.map {
            Some(map) => map.wrap_lat_lng(position),
            None => position,
        }
    }
}
