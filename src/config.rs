use std::path::PathBuf;

use clap::Parser;

use crate::factory::LensShape;

/// Fundus photograph looked up when none is given on the command line.
pub const DEFAULT_FUNDUS_IMAGE: &str = "Fundas_Image.png";

/// How the lens vertex set is split into anterior and posterior halves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LensSplit {
    /// Anterior = vertices with x > 0.
    #[default]
    #[value(name = "geometric")]
    Geometric,
    /// First half / second half of the sphere's vertex order.
    #[value(name = "vertex-order")]
    VertexOrder,
}

impl std::fmt::Display for LensSplit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LensSplit::Geometric => write!(f, "geometric"),
            LensSplit::VertexOrder => write!(f, "vertex-order"),
        }
    }
}

/// Summary output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Sphere tessellation counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tessellation {
    pub segments: u32,
    pub rings: u32,
}

impl Default for Tessellation {
    fn default() -> Self {
        Self {
            segments: 128,
            rings: 64,
        }
    }
}

/// Lens construction parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LensConfig {
    pub shape: LensShape,
    pub tessellation: Tessellation,
    pub split: LensSplit,
}

impl Default for LensConfig {
    fn default() -> Self {
        Self {
            shape: LensShape::default(),
            tessellation: Tessellation {
                segments: 32,
                rings: 16,
            },
            split: LensSplit::Geometric,
        }
    }
}

/// Fully resolved model configuration (constructed from CLI args).
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Tessellation of sclera, retina and cornea.
    pub tessellation: Tessellation,
    pub lens: LensConfig,
    /// Fundus photograph mapped onto the retina, `None` for an untextured retina.
    pub fundus_image: Option<PathBuf>,
    /// Build the four parts on the rayon pool.
    pub parallel: bool,
    pub threads: Option<usize>,
    pub format: OutputFormat,
    pub verbose: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            tessellation: Tessellation::default(),
            lens: LensConfig::default(),
            fundus_image: Some(PathBuf::from(DEFAULT_FUNDUS_IMAGE)),
            parallel: true,
            threads: None,
            format: OutputFormat::Text,
            verbose: false,
        }
    }
}

/// CLI argument definition (clap derive).
#[derive(Parser, Debug)]
#[command(
    name = "eye-model",
    about = "Procedural anatomical eye model builder",
    version
)]
pub struct CliArgs {
    /// Longitudinal segments for sclera, retina and cornea
    #[arg(long, default_value_t = 128)]
    pub segments: u32,

    /// Latitudinal rings for sclera, retina and cornea
    #[arg(long, default_value_t = 64)]
    pub rings: u32,

    /// Longitudinal segments for the lens
    #[arg(long, default_value_t = 32)]
    pub lens_segments: u32,

    /// Latitudinal rings for the lens
    #[arg(long, default_value_t = 16)]
    pub lens_rings: u32,

    /// Lens thickness
    #[arg(long, default_value_t = 4.979)]
    pub lens_thickness: f32,

    /// Anterior radius / lens thickness
    #[arg(long, default_value_t = 1.7417)]
    pub anterior_ratio: f32,

    /// Posterior radius / lens thickness
    #[arg(long, default_value_t = 1.2709)]
    pub posterior_ratio: f32,

    /// How lens vertices are split into anterior and posterior halves
    #[arg(long, value_enum, default_value = "geometric")]
    pub lens_split: LensSplit,

    /// Fundus image textured onto the retina (PNG, JPEG, WebP)
    #[arg(long, default_value = DEFAULT_FUNDUS_IMAGE)]
    pub fundus: PathBuf,

    /// Skip the fundus image and leave the retina untextured
    #[arg(long, conflicts_with = "fundus")]
    pub no_texture: bool,

    /// Summary output format: text or json
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Build parts one after another instead of in parallel
    #[arg(long)]
    pub sequential: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Worker thread count (default: all cores)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,
}

impl From<CliArgs> for ModelConfig {
    fn from(args: CliArgs) -> Self {
        ModelConfig {
            tessellation: Tessellation {
                segments: args.segments,
                rings: args.rings,
            },
            lens: LensConfig {
                shape: LensShape {
                    thickness: args.lens_thickness,
                    anterior_ratio: args.anterior_ratio,
                    posterior_ratio: args.posterior_ratio,
                },
                tessellation: Tessellation {
                    segments: args.lens_segments,
                    rings: args.lens_rings,
                },
                split: args.lens_split,
            },
            fundus_image: (!args.no_texture).then_some(args.fundus),
            parallel: !args.sequential,
            threads: args.threads,
            format: args.format,
            verbose: args.verbose,
        }
    }
}
