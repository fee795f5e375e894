use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tracing::{debug, instrument};

use super::animation::{AnimationHandle, SpokeAnimation, SpokeMarker};
use super::projection::{CanvasPoint, GeoProjector, Viewport};
use super::scene::Scene;
use super::svg;
use crate::config::MapConfig;
use crate::models::{AnchorSet, ResultSet};

/// Owns the current scene and the animation loops started for it.
///
/// Every [`render`](Self::render) cancels the previous loops before
/// building anything new, so at most one scene's spokes are ever animating.
pub struct SceneRenderer {
    anchors: AnchorSet,
    viewport: Viewport,
    spoke_duration: Duration,
    frame_interval: Duration,
    runtime: Handle,
    scene: Option<Scene>,
    animations: Vec<AnimationHandle>,
}

impl SceneRenderer {
    #[must_use]
    pub fn new(anchors: AnchorSet, config: &MapConfig, runtime: Handle) -> Self {
        Self {
            anchors,
            viewport: Viewport::from_config(config),
            spoke_duration: Duration::from_millis(config.spoke_duration_ms),
            frame_interval: Duration::from_millis(config.frame_interval_ms),
            runtime,
            scene: None,
            animations: Vec::new(),
        }
    }

    /// Discard the current scene and draw `results` with `selected` emphasised.
    #[instrument(level = "debug", skip_all, fields(results = results.len(), selected = ?selected))]
    pub fn render(&mut self, results: &ResultSet, selected: Option<&str>) -> &Scene {
        self.cancel_animations();

        let projector = GeoProjector::fit(
            self.anchors.coordinates().chain(results.coordinates()),
            &self.viewport,
        );
        let scene = Scene::build(&self.anchors, results, selected, &projector);

        self.animations = scene
            .connectors
            .iter()
            .map(|connector| {
                SpokeAnimation::new(connector, self.spoke_duration, self.frame_interval)
                    .spawn(&self.runtime)
            })
            .collect();

        debug!(
            nodes = scene.nodes.len(),
            animations = self.animations.len(),
            "Scene replaced"
        );
        self.scene.insert(scene)
    }

    fn cancel_animations(&mut self) {
        if self.animations.is_empty() {
            return;
        }
        debug!(count = self.animations.len(), "Cancelling spoke animations");
        for handle in self.animations.drain(..) {
            handle.cancel();
        }
    }

    /// Drop the scene and stop every animation.
    pub fn clear(&mut self) {
        self.cancel_animations();
        self.scene = None;
    }

    #[must_use]
    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    #[must_use]
    pub fn anchors(&self) -> &AnchorSet {
        &self.anchors
    }

    /// Click-to-select: id of the hotel marker under `point`, if any
    #[must_use]
    pub fn hit_test(&self, point: CanvasPoint) -> Option<&str> {
        self.scene.as_ref()?.hit_test(point)
    }

    #[must_use]
    pub fn active_animations(&self) -> usize {
        self.animations.iter().filter(|h| h.is_running()).count()
    }

    #[must_use]
    pub fn animation_abort_handles(&self) -> Vec<AbortHandle> {
        self.animations.iter().map(AnimationHandle::abort_handle).collect()
    }

    #[must_use]
    pub fn marker_positions(&self) -> Vec<SpokeMarker> {
        self.animations.iter().map(AnimationHandle::marker).collect()
    }

    /// SVG of the current scene with the travelling markers at their latest positions
    #[must_use]
    pub fn to_svg(&self) -> String {
        match &self.scene {
            Some(scene) => svg::render_svg(scene, &self.marker_positions()),
            None => svg::render_svg(
                &Scene {
                    viewport: self.viewport,
                    nodes: Vec::new(),
                    connectors: Vec::new(),
                    selected: None,
                },
                &[],
            ),
        }
    }
}

impl Drop for SceneRenderer {
    fn drop(&mut self) {
        self.cancel_animations();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ranking::tests::hotel;

    fn results() -> ResultSet {
        ResultSet::new(vec![
            hotel("a", 32.00, 118.79, [20.0, 25.0, 30.0, 15.0]),
            hotel("b", 32.03, 118.80, [25.0, 25.0, 30.0, 15.0]),
            hotel("c", 31.98, 118.77, [30.0, 25.0, 30.0, 15.0]),
        ])
        .unwrap()
    }

    fn renderer() -> SceneRenderer {
        SceneRenderer::new(AnchorSet::nanjing(), &MapConfig::default(), Handle::current())
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_selection_starts_no_animations() {
        let mut renderer = renderer();
        let scene = renderer.render(&results(), None);
        assert_eq!(scene.result_markers().count(), 3);
        assert_eq!(renderer.active_animations(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_selection_starts_one_animation_per_anchor() {
        let mut renderer = renderer();
        renderer.render(&results(), Some("b"));
        settle().await;
        assert_eq!(renderer.active_animations(), 4);

        let markers = renderer.marker_positions();
        let ids: Vec<&str> = markers.iter().map(|m| m.anchor_id.as_str()).collect();
        assert_eq!(ids, ["nanjing_south", "fuzimiao", "zhongshanling", "niushoushan"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeated_renders_leave_only_latest_animations() {
        let mut renderer = renderer();
        let set = results();
        let mut previous: Vec<AbortHandle> = Vec::new();

        for round in 0..5 {
            let selected = ["a", "b", "c"][round % 3];
            renderer.render(&set, Some(selected));
            settle().await;

            assert!(previous.iter().all(AbortHandle::is_finished));
            assert_eq!(renderer.active_animations(), 4);
            previous.extend(renderer.animation_abort_handles());
        }

        let latest = renderer.animation_abort_handles();
        assert!(latest.iter().all(|h| !h.is_finished()));
        let finished = previous.iter().filter(|h| h.is_finished()).count();
        assert_eq!(finished, previous.len() - latest.len());
    }

    #[tokio::test(start_paused = true)]
    async fn test_replacing_results_cancels_spokes() {
        let mut renderer = renderer();
        renderer.render(&results(), Some("a"));
        let old = renderer.animation_abort_handles();

        renderer.render(&ResultSet::empty(), None);
        settle().await;

        assert!(old.iter().all(AbortHandle::is_finished));
        assert_eq!(renderer.active_animations(), 0);
        assert_eq!(renderer.scene().map(|s| s.anchor_markers().count()), Some(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_selection_renders_without_spokes() {
        let mut renderer = renderer();
        let scene = renderer.render(&results(), Some("gone"));
        assert_eq!(scene.connector_lines().count(), 0);
        assert_eq!(renderer.active_animations(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_renderer_cancels_spokes() {
        let mut renderer = renderer();
        renderer.render(&results(), Some("a"));
        let handles = renderer.animation_abort_handles();
        drop(renderer);
        settle().await;
        assert!(handles.iter().all(AbortHandle::is_finished));
    }

    #[tokio::test(start_paused = true)]
    async fn test_hit_test_through_renderer() {
        let mut renderer = renderer();
        assert_eq!(renderer.hit_test(CanvasPoint::new(400.0, 300.0)), None);

        let scene = renderer.render(&results(), None);
        let position = scene
            .result_markers()
            .next()
            .map(|n| n.position)
            .unwrap();
        assert_eq!(renderer.hit_test(position), Some("a"));
    }
}
