pub mod bounds;
pub mod material;
pub mod mesh;
pub mod part;

pub use bounds::BoundingBox;
pub use material::{ImageHandle, MaterialDescriptor, ShaderModel};
pub use mesh::Mesh;
pub use part::{AnatomicalPart, PartKind};
