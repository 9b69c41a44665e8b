use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::info;

use crate::config::ModelConfig;
use crate::error::Result;
use crate::factory::EyePartFactory;
use crate::scene::{DiskImageProvider, ImageProvider, SceneCollector, SceneSink};
use crate::types::{AnatomicalPart, BoundingBox, MaterialDescriptor, PartKind};

/// The four finished parts, in [`PartKind::ALL`] order.
#[derive(Debug, Clone)]
pub struct EyeModel {
    pub parts: Vec<AnatomicalPart>,
}

impl EyeModel {
    /// Build every part described by `config`.
    pub fn build(config: &ModelConfig, images: &dyn ImageProvider) -> Result<Self> {
        let factory = EyePartFactory::new(config, images);
        let parts = factory.build_all()?;
        Ok(Self { parts })
    }

    pub fn part(&self, kind: PartKind) -> Option<&AnatomicalPart> {
        self.parts.iter().find(|p| p.kind == kind)
    }

    /// Per-part statistics.
    pub fn summaries(&self) -> Vec<PartSummary> {
        self.parts.iter().map(PartSummary::from).collect()
    }

    /// Transfer every part to `sink`, returning the handles in part order.
    pub fn into_scene<S: SceneSink>(self, sink: &mut S) -> Result<Vec<S::Handle>> {
        self.parts
            .into_iter()
            .map(|part| {
                info!(part = %part.kind, "Adding part to scene");
                part.hand_off(&mut *sink)
            })
            .collect()
    }
}

/// Statistics for one part.
#[derive(Debug, Clone, Serialize)]
pub struct PartSummary {
    pub name: String,
    pub kind: PartKind,
    pub vertices: usize,
    pub faces: usize,
    pub triangles: usize,
    pub has_uvs: bool,
    pub translation: [f32; 3],
    pub scale: [f32; 3],
    pub world_bounds: Option<BoundingBox>,
    pub material: MaterialDescriptor,
}

impl From<&AnatomicalPart> for PartSummary {
    fn from(part: &AnatomicalPart) -> Self {
        Self {
            name: part.name.clone(),
            kind: part.kind,
            vertices: part.mesh.vertex_count(),
            faces: part.mesh.face_count(),
            triangles: part.mesh.triangle_count(),
            has_uvs: part.mesh.has_uvs(),
            translation: part.translation.to_array(),
            scale: part.scale.to_array(),
            world_bounds: part.world_bounds(),
            material: part.material.clone(),
        }
    }
}

/// Summary of a completed run.
#[derive(Debug, Serialize)]
pub struct ProcessingResult {
    pub parts: Vec<PartSummary>,
    pub scene_objects: usize,
    #[serde(skip)]
    pub duration: Duration,
}

/// Pipeline orchestrator: build the model, then hand it to the scene.
pub struct Pipeline;

impl Pipeline {
    /// Run with the filesystem image loader and an in-memory scene.
    pub fn run(config: &ModelConfig) -> Result<ProcessingResult> {
        let mut scene = SceneCollector::default();
        Self::run_with(config, &DiskImageProvider, &mut scene)
    }

    pub fn run_with<S: SceneSink>(
        config: &ModelConfig,
        images: &dyn ImageProvider,
        sink: &mut S,
    ) -> Result<ProcessingResult> {
        let start = Instant::now();

        info!(
            segments = config.tessellation.segments,
            rings = config.tessellation.rings,
            parallel = config.parallel,
            "Stage 1/2: Building parts"
        );
        let model = EyeModel::build(config, images)?;
        let parts = model.summaries();

        info!("Stage 2/2: Scene hand-off");
        let handles = model.into_scene(sink)?;

        let duration = start.elapsed();
        info!(parts = handles.len(), elapsed = ?duration, "Model complete");

        Ok(ProcessingResult {
            parts,
            scene_objects: handles.len(),
            duration,
        })
    }
}

/// Print a human-readable per-part summary.
pub fn print_summary(result: &ProcessingResult) {
    println!("=== Eye Model ===");
    for part in &result.parts {
        println!("  {}", part.name);
        println!("    Vertices:  {}", part.vertices);
        println!("    Faces:     {} ({} triangles)", part.faces, part.triangles);
        println!("    UVs:       {}", if part.has_uvs { "yes" } else { "no" });
        println!(
            "    Position:  ({:.3}, {:.3}, {:.3})",
            part.translation[0], part.translation[1], part.translation[2]
        );
        if part.scale != [1.0, 1.0, 1.0] {
            println!(
                "    Scale:     ({:.3}, {:.3}, {:.3})",
                part.scale[0], part.scale[1], part.scale[2]
            );
        }
        if let Some(bb) = &part.world_bounds {
            println!(
                "    Bounds:    ({:.3}, {:.3}, {:.3}) → ({:.3}, {:.3}, {:.3})",
                bb.min[0], bb.min[1], bb.min[2], bb.max[0], bb.max[1], bb.max[2]
            );
        }
        let m = &part.material;
        println!(
            "    Material:  {} (IOR {:.3}, alpha {:.2}, roughness {:.2})",
            m.name, m.ior, m.alpha, m.roughness
        );
        if let Some(tex) = &m.texture {
            println!(
                "    Texture:   {} ({}x{})",
                tex.path.display(),
                tex.width,
                tex.height
            );
        }
    }
}
