//! Boundaries to the host environment: image loading and the scene sink
//! that receives finished parts.

use std::path::Path;

use glam::Vec3;
use tracing::debug;

use crate::error::{EyeModelError, Result};
use crate::types::{AnatomicalPart, ImageHandle, MaterialDescriptor, Mesh};

/// Loads external images for textured materials.
pub trait ImageProvider: Sync {
    /// Fails with `ResourceNotFound` when `path` cannot be resolved.
    fn load_image(&self, path: &Path) -> Result<ImageHandle>;
}

/// Receives finished meshes and takes ownership of them.
pub trait SceneSink {
    type Handle;

    fn add_mesh(
        &mut self,
        name: &str,
        mesh: Mesh,
        material: MaterialDescriptor,
        translation: Vec3,
        scale: Vec3,
    ) -> Result<Self::Handle>;
}

impl AnatomicalPart {
    /// Hand this part over to `sink`.
    pub fn hand_off<S: SceneSink>(self, sink: &mut S) -> Result<S::Handle> {
        sink.add_mesh(
            &self.name,
            self.mesh,
            self.material,
            self.translation,
            self.scale,
        )
    }
}

/// Reads images from the local filesystem via the `image` crate.
///
/// Only the header is decoded; the handle records path and dimensions.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskImageProvider;

impl ImageProvider for DiskImageProvider {
    fn load_image(&self, path: &Path) -> Result<ImageHandle> {
        if !path.is_file() {
            return Err(EyeModelError::ResourceNotFound(format!(
                "Image not found: {}",
                path.display()
            )));
        }

        let (width, height) = image::image_dimensions(path).map_err(|e| {
            EyeModelError::ResourceNotFound(format!(
                "Failed to decode image {}: {e}",
                path.display()
            ))
        })?;

        debug!(path = %path.display(), width, height, "Loaded image");

        Ok(ImageHandle {
            path: path.to_path_buf(),
            width,
            height,
        })
    }
}

/// One object recorded by [`SceneCollector`].
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub mesh: Mesh,
    pub material: MaterialDescriptor,
    pub translation: Vec3,
    pub scale: Vec3,
}

/// In-memory scene sink; handles are insertion indices.
#[derive(Debug, Clone, Default)]
pub struct SceneCollector {
    pub objects: Vec<SceneObject>,
}

impl SceneCollector {
    pub fn get(&self, handle: usize) -> Option<&SceneObject> {
        self.objects.get(handle)
    }

    pub fn find(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.name == name)
    }
}

impl SceneSink for SceneCollector {
    type Handle = usize;

    fn add_mesh(
        &mut self,
        name: &str,
        mesh: Mesh,
        material: MaterialDescriptor,
        translation: Vec3,
        scale: Vec3,
    ) -> Result<usize> {
        self.objects.push(SceneObject {
            name: name.to_owned(),
            mesh,
            material,
            translation,
            scale,
        });
        Ok(self.objects.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PartKind;

    #[test]
    fn disk_provider_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let err = DiskImageProvider
            .load_image(&tmp.path().join("Fundas_Image.png"))
            .unwrap_err();
        assert!(matches!(err, EyeModelError::ResourceNotFound(_)));
    }

    #[test]
    fn disk_provider_undecodable_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("fundus.png");
        std::fs::write(&path, b"not a png").unwrap();

        let err = DiskImageProvider.load_image(&path).unwrap_err();
        assert!(matches!(err, EyeModelError::ResourceNotFound(_)));
    }

    #[test]
    fn disk_provider_reads_dimensions() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("fundus.png");
        image::RgbaImage::from_pixel(8, 4, image::Rgba([180, 60, 30, 255]))
            .save(&path)
            .unwrap();

        let handle = DiskImageProvider.load_image(&path).unwrap();
        assert_eq!(handle.path, path);
        assert_eq!((handle.width, handle.height), (8, 4));
    }

    #[test]
    fn collector_records_hand_off() {
        let part = AnatomicalPart {
            kind: PartKind::Cornea,
            name: "Cornea".into(),
            mesh: Mesh::default(),
            material: MaterialDescriptor::default(),
            translation: Vec3::new(5.0, 0.0, 0.0),
            scale: Vec3::ONE,
        };

        let mut scene = SceneCollector::default();
        let handle = part.hand_off(&mut scene).unwrap();

        assert_eq!(handle, 0);
        let obj = scene.get(handle).unwrap();
        assert_eq!(obj.name, "Cornea");
        assert_eq!(obj.translation, Vec3::new(5.0, 0.0, 0.0));
        assert!(scene.find("Cornea").is_some());
        assert!(scene.find("Lens").is_none());
    }
}
