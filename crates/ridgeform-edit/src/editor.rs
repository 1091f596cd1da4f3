use ridgeform_core::{Ray, TerrainError, VertexIndex};
use ridgeform_world::{EditSummary, Terrain};

use crate::brush::BrushStroke;
use crate::camera::{CameraPose, CameraRig};
use crate::gesture::{GestureDetector, GestureEvent};
use crate::pick::{MeshRaycaster, PickingIndex, SurfaceIntersector};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Idle,
    /// A pointer ray is waiting to be resolved on the next tick.
    Picking,
    Selected { center: VertexIndex },
    Editing { center: VertexIndex },
}

/// Turns pointer and scroll input into brush strokes.
///
/// Input methods only record what happened; `tick` runs picking and at most
/// one stroke per frame.
pub struct BrushEditor<I = MeshRaycaster> {
    state: EditorState,
    edit_mode: bool,
    picking: PickingIndex<I>,
    gesture: GestureDetector,
    saved_pose: Option<CameraPose>,
    saved_free_look: bool,
    pending_ray: Option<Ray>,
    pending_delta: f32,
    pointer_held: bool,
}

impl BrushEditor<MeshRaycaster> {
    pub fn new(double_press_ms: u64) -> Self {
        Self::with_intersector(double_press_ms, MeshRaycaster)
    }
}

impl<I: SurfaceIntersector> BrushEditor<I> {
    pub fn with_intersector(double_press_ms: u64, intersector: I) -> Self {
        Self {
            state: EditorState::Idle,
            edit_mode: false,
            picking: PickingIndex::new(intersector),
            gesture: GestureDetector::new(double_press_ms),
            saved_pose: None,
            saved_free_look: true,
            pending_ray: None,
            pending_delta: 0.0,
            pointer_held: false,
        }
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn is_edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// Feed a press of the mode key. A double press toggles edit mode.
    pub fn mode_press(&mut self, timestamp_ms: u64, camera: &mut dyn CameraRig) -> bool {
        if self.gesture.press(timestamp_ms) == GestureEvent::Confirmed {
            let enable = !self.edit_mode;
            self.set_edit_mode(enable, camera);
            true
        } else {
            false
        }
    }

    /// Entering parks the camera; leaving hands its pose back and drops any selection.
    pub fn set_edit_mode(&mut self, enabled: bool, camera: &mut dyn CameraRig) {
        if enabled == self.edit_mode {
            return;
        }
        self.edit_mode = enabled;
        if enabled {
            self.saved_pose = Some(camera.snapshot());
            self.saved_free_look = camera.free_look();
            camera.set_free_look(false);
            log::debug!("Entered edit mode");
        } else {
            self.transition(EditorState::Idle);
            self.pending_ray = None;
            self.pending_delta = 0.0;
            self.pointer_held = false;
            if let Some(pose) = self.saved_pose.take() {
                camera.restore(pose);
            }
            camera.set_free_look(self.saved_free_look);
            log::debug!("Left edit mode");
        }
    }

    pub fn pointer_down(&mut self, ray: Ray) {
        if !self.edit_mode {
            return;
        }
        self.pointer_held = true;
        self.pending_ray = Some(ray);
        self.transition(EditorState::Picking);
    }

    pub fn pointer_up(&mut self) {
        self.pointer_held = false;
        if let EditorState::Editing { center } = self.state {
            self.transition(EditorState::Selected { center });
        }
    }

    /// Accumulate scroll or drag input until the next tick.
    pub fn scroll(&mut self, delta: f32) {
        if self.edit_mode {
            self.pending_delta += delta;
        }
    }

    /// Advance one frame: expire gestures, resolve a pending pick, apply one stroke.
    pub fn tick(
        &mut self,
        terrain: &mut Terrain,
        now_ms: u64,
    ) -> Result<Option<EditSummary>, TerrainError> {
        if let Some(GestureEvent::TimedOut) = self.gesture.poll(now_ms) {
            log::debug!("Mode key press expired at {now_ms} ms");
        }

        if self.state == EditorState::Picking {
            let next = match self.pending_ray.take() {
                Some(ray) => match self.picking.pick(&ray, terrain.mesh()) {
                    Some(hit) => EditorState::Selected {
                        center: hit.nearest_vertex,
                    },
                    None => EditorState::Idle,
                },
                None => EditorState::Idle,
            };
            self.transition(next);
        }

        let delta = std::mem::take(&mut self.pending_delta);
        let center = match self.state {
            EditorState::Selected { center } | EditorState::Editing { center } => center,
            _ => return Ok(None),
        };
        if delta == 0.0 {
            return Ok(None);
        }

        self.transition(EditorState::Editing { center });
        let config = terrain.config();
        let scale = config.mouse_scale;
        let stroke = BrushStroke::from_config(center, delta, config);
        let summary = stroke.apply(terrain, scale)?;
        log::debug!(
            "Stroke at vertex {} delta {:.3}: {} vertices",
            center,
            delta,
            summary.touched
        );
        if !self.pointer_held {
            self.transition(EditorState::Selected { center });
        }
        Ok(Some(summary))
    }

    fn transition(&mut self, next: EditorState) {
        if self.state != next {
            log::debug!("Brush editor {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::FlyCamera;
    use glam::Vec3;
    use ridgeform_core::TerrainConfig;
    use ridgeform_world::heightfield::HeightField;

    fn terrain() -> Terrain {
        let config = TerrainConfig {
            mesh_size: 4.0,
            divisions: 4,
            brush_radius: 1.5,
            gaussian_variance: 1.0,
            mouse_scale: 1.0,
            ..TerrainConfig::seeded(9)
        };
        Terrain::from_height_field(config, None, HeightField::flat(4, 4.0))
            .expect("field matches config")
    }

    fn down_at(x: f32, z: f32) -> Ray {
        Ray::new(Vec3::new(x, 10.0, z), Vec3::NEG_Y)
    }

    fn editing_editor(camera: &mut FlyCamera) -> BrushEditor {
        let mut editor = BrushEditor::new(300);
        editor.set_edit_mode(true, camera);
        editor
    }

    #[test]
    fn test_double_press_toggles_mode_and_parks_camera() {
        let mut camera = FlyCamera::new(Vec3::new(0.0, 20.0, 0.0));
        let mut editor = BrushEditor::new(300);
        assert!(!editor.mode_press(0, &mut camera));
        assert!(editor.mode_press(200, &mut camera));
        assert!(editor.is_edit_mode());
        assert!(!camera.free_look());

        let pose = camera.snapshot();
        camera.position = Vec3::new(5.0, 5.0, 5.0);
        editor.mode_press(1000, &mut camera);
        editor.mode_press(1100, &mut camera);
        assert!(!editor.is_edit_mode());
        assert!(camera.free_look());
        assert_eq!(camera.snapshot(), pose);
    }

    #[test]
    fn test_leaving_edit_mode_keeps_suspended_camera_suspended() {
        let mut camera = FlyCamera::new(Vec3::ZERO);
        camera.set_free_look(false);
        let mut editor = BrushEditor::new(300);
        editor.set_edit_mode(true, &mut camera);
        assert!(!camera.free_look());
        editor.set_edit_mode(false, &mut camera);
        assert!(!camera.free_look());
    }

    #[test]
    fn test_pointer_ignored_outside_edit_mode() {
        let mut editor = BrushEditor::new(300);
        editor.pointer_down(down_at(0.05, -0.05));
        assert_eq!(editor.state(), EditorState::Idle);
    }

    #[test]
    fn test_pick_selects_nearest_vertex() {
        let mut camera = FlyCamera::new(Vec3::ZERO);
        let mut editor = editing_editor(&mut camera);
        let mut terrain = terrain();
        editor.pointer_down(down_at(0.1, -0.2));
        assert_eq!(editor.state(), EditorState::Picking);
        let summary = editor.tick(&mut terrain, 0).expect("tick");
        assert!(summary.is_none());
        assert_eq!(editor.state(), EditorState::Selected { center: 12 });
    }

    #[test]
    fn test_pick_miss_returns_to_idle() {
        let mut camera = FlyCamera::new(Vec3::ZERO);
        let mut editor = editing_editor(&mut camera);
        let mut terrain = terrain();
        editor.pointer_down(down_at(50.0, 0.0));
        editor.tick(&mut terrain, 0).expect("tick");
        assert_eq!(editor.state(), EditorState::Idle);
    }

    #[test]
    fn test_scroll_while_held_edits_until_release() {
        let mut camera = FlyCamera::new(Vec3::ZERO);
        let mut editor = editing_editor(&mut camera);
        let mut terrain = terrain();
        editor.pointer_down(down_at(0.0, 0.1));
        editor.tick(&mut terrain, 0).expect("tick");

        editor.scroll(1.0);
        let summary = editor
            .tick(&mut terrain, 16)
            .expect("tick")
            .expect("stroke applied");
        assert_eq!(summary.touched, 9);
        assert_eq!(editor.state(), EditorState::Editing { center: 12 });
        assert!((terrain.height_field().height(12) - 0.159_154_94).abs() < 1e-6);

        // No input this frame: still editing, nothing applied.
        assert!(editor.tick(&mut terrain, 32).expect("tick").is_none());
        assert_eq!(editor.state(), EditorState::Editing { center: 12 });

        editor.pointer_up();
        assert_eq!(editor.state(), EditorState::Selected { center: 12 });
    }

    #[test]
    fn test_scroll_after_release_applies_once() {
        let mut camera = FlyCamera::new(Vec3::ZERO);
        let mut editor = editing_editor(&mut camera);
        let mut terrain = terrain();
        editor.pointer_down(down_at(0.05, -0.05));
        editor.pointer_up();
        editor.tick(&mut terrain, 0).expect("tick");
        assert_eq!(editor.state(), EditorState::Selected { center: 12 });

        editor.scroll(0.5);
        editor.scroll(0.5);
        editor.tick(&mut terrain, 16).expect("tick").expect("stroke applied");
        assert_eq!(editor.state(), EditorState::Selected { center: 12 });
        assert_eq!(terrain.stroke_count(), 1);
        assert!((terrain.height_field().height(12) - 0.159_154_94).abs() < 1e-6);
    }

    #[test]
    fn test_leaving_edit_mode_drops_selection() {
        let mut camera = FlyCamera::new(Vec3::ZERO);
        let mut editor = editing_editor(&mut camera);
        let mut terrain = terrain();
        editor.pointer_down(down_at(0.05, -0.05));
        editor.tick(&mut terrain, 0).expect("tick");
        editor.scroll(1.0);
        editor.set_edit_mode(false, &mut camera);
        assert_eq!(editor.state(), EditorState::Idle);
        assert!(editor.tick(&mut terrain, 16).expect("tick").is_none());
        assert_eq!(terrain.stroke_count(), 0);
    }
}
