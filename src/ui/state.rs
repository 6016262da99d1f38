use crate::geometry::{KnotParams, TorusParams};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum SceneMode {
    Curves,
    Sphere,
}

pub struct UiState {
    pub scene_mode: SceneMode,

    pub torus: TorusParams,
    pub knot: KnotParams,
    pub sphere_depth: u32,

    pub torus_wireframe: bool,
    pub knot_wireframe: bool,
    pub sphere_wireframe: bool,

    pub vsync_enabled: bool,
    pub show_help: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            scene_mode: SceneMode::Curves,

            torus: TorusParams::default(),
            knot: KnotParams::default(),
            sphere_depth: 0,

            torus_wireframe: false,
            knot_wireframe: false,
            sphere_wireframe: false,

            vsync_enabled: true,
            show_help: true,
        }
    }
}

/// Most recent parameter rejection, one slot per mesh. A successful
/// rebuild clears only its own slot, so an unrelated rebuild cannot hide
/// another mesh's error.
#[derive(Default)]
pub struct RebuildErrors {
    pub torus: Option<String>,
    pub knot: Option<String>,
    pub sphere: Option<String>,
}

impl RebuildErrors {
    /// Error to surface in the panel for the active scene.
    pub fn for_scene(&self, mode: SceneMode) -> Option<&str> {
        match mode {
            SceneMode::Curves => self.torus.as_deref().or(self.knot.as_deref()),
            SceneMode::Sphere => self.sphere.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_slots_are_scene_scoped() {
        let mut errors = RebuildErrors::default();
        errors.knot = Some("segment counts must be at least 1".into());
        assert!(errors.for_scene(SceneMode::Curves).is_some());
        assert_eq!(errors.for_scene(SceneMode::Sphere), None);
    }

    #[test]
    fn successful_rebuild_clears_only_its_own_slot() {
        let mut errors = RebuildErrors::default();
        errors.sphere = Some("subdivision depth 6 exceeds maximum 5".into());

        // A later torus rebuild succeeding must not hide the sphere error.
        errors.torus = None;
        assert_eq!(
            errors.for_scene(SceneMode::Sphere),
            Some("subdivision depth 6 exceeds maximum 5")
        );
    }
}
