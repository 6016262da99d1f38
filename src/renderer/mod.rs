pub mod camera;
pub mod gpu;

pub use camera::OrbitCamera;
pub use gpu::{GpuState, MeshBuffers};
