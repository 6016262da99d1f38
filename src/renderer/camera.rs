use glam::{Mat4, Vec3};

/// Camera that orbits the origin in the xz-plane at a fixed height.
/// Angle and radius are the only live controls, driven by the UI sliders
/// and the keyboard.
pub struct OrbitCamera {
    pub angle: f32,
    pub radius: f32,
    pub height: f32,

    pub min_radius: f32,
    pub max_radius: f32,

    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl OrbitCamera {
    /// Camera for the torus/knot scene, framed for radii around 100.
    pub fn for_curves() -> Self {
        Self {
            angle: 45.0_f32.to_radians(),
            radius: 400.0,
            height: 0.0,
            min_radius: 50.0,
            max_radius: 1000.0,
            fov: std::f32::consts::FRAC_PI_4,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }

    /// Camera for the unit-sphere scene.
    pub fn for_sphere() -> Self {
        Self {
            angle: 0.0,
            radius: 4.0,
            height: 0.0,
            min_radius: 1.5,
            max_radius: 20.0,
            fov: std::f32::consts::FRAC_PI_4,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
        }
    }

    pub fn eye(&self) -> Vec3 {
        Vec3::new(
            self.angle.cos() * self.radius,
            self.height,
            self.angle.sin() * self.radius,
        )
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), Vec3::ZERO, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn rotate(&mut self, delta: f32) {
        self.angle += delta;
    }

    pub fn zoom(&mut self, delta: f32) {
        self.radius = (self.radius + delta).clamp(self.min_radius, self.max_radius);
    }

    pub fn set_aspect(&mut self, width: f32, height: f32) {
        self.aspect = width / height;
    }
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniform {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 3],
    pub _pad0: f32,
    pub light_pos: [f32; 3],
    pub _pad1: f32,
}

impl SceneUniform {
    pub fn new(camera: &OrbitCamera, light_pos: Vec3) -> Self {
        Self {
            view_proj: camera.view_projection_matrix().to_cols_array_2d(),
            camera_pos: camera.eye().to_array(),
            _pad0: 0.0,
            light_pos: light_pos.to_array(),
            _pad1: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eye_orbits_in_the_xz_plane() {
        let mut cam = OrbitCamera::for_curves();
        cam.angle = 0.0;
        cam.radius = 400.0;
        let eye = cam.eye();
        assert!((eye.x - 400.0).abs() < 1e-3);
        assert!(eye.y.abs() < 1e-6);
        assert!(eye.z.abs() < 1e-3);
    }

    #[test]
    fn zoom_respects_radius_clamps() {
        let mut cam = OrbitCamera::for_sphere();
        cam.zoom(-100.0);
        assert_eq!(cam.radius, cam.min_radius);
        cam.zoom(1000.0);
        assert_eq!(cam.radius, cam.max_radius);
    }
}
