pub mod error;
pub mod knot;
pub mod mesh;
pub mod sphere;
pub mod torus;

pub use knot::KnotParams;
pub use mesh::Mesh;
pub use torus::TorusParams;
