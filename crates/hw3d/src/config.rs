use crate::error::MyResult;
use crate::scene::SceneKind;
use clap::Parser;
use eyre::eyre;

/// Command line for the HW3D harness.
#[derive(Parser, Debug)]
#[command(name = "hw3d", about = "Direct3D 11 learning harness", version)]
pub struct Cli {
    /// Demo scene to run.
    #[arg(long, value_enum, default_value_t = SceneKind::Boxes)]
    pub scene: SceneKind,

    /// Client area width in pixels.
    #[arg(long, default_value_t = Config::DEFAULT_WIDTH)]
    pub width: u32,

    /// Client area height in pixels.
    #[arg(long, default_value_t = Config::DEFAULT_HEIGHT)]
    pub height: u32,

    /// Window title.
    #[arg(long, default_value = Config::DEFAULT_TITLE)]
    pub title: String,

    /// Use the WARP software rasterizer instead of the hardware driver.
    #[arg(long)]
    pub warp: bool,

    /// Present without waiting for vertical blank.
    #[arg(long)]
    pub no_vsync: bool,

    /// Number of boxes in the boxes scene.
    #[arg(long = "boxes", default_value_t = Config::DEFAULT_BOX_COUNT)]
    pub box_count: usize,

    /// Seed for the box layout.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Exit after N frames.
    #[arg(long)]
    pub max_frames: Option<u64>,

    /// Run the frame loop without a window or GPU.
    #[arg(long)]
    pub headless: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub scene: SceneKind,
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub use_warp_device: bool,
    pub vsync: bool,
    pub box_count: usize,
    pub seed: u64,
    pub max_frames: Option<u64>,
    pub headless: bool,
}

impl Config {
    pub const DEFAULT_WIDTH: u32 = 1280;
    pub const DEFAULT_HEIGHT: u32 = 720;
    pub const DEFAULT_TITLE: &'static str = "HW3D Engine";
    pub const DEFAULT_BOX_COUNT: usize = 80;
    /// Largest 2D texture edge Direct3D 11 accepts
    /// (`D3D11_REQ_TEXTURE2D_U_OR_V_DIMENSION`).
    pub const MAX_DIMENSION: u32 = 16384;

    pub fn client_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Title shown in the caption bar; the WARP device is called out.
    pub fn window_title(&self) -> String {
        match self.use_warp_device {
            true => format!("{} (WARP)", self.title),
            false => self.title.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scene: SceneKind::default(),
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            title: Self::DEFAULT_TITLE.to_string(),
            use_warp_device: false,
            vsync: true,
            box_count: Self::DEFAULT_BOX_COUNT,
            seed: 0,
            max_frames: None,
            headless: false,
        }
    }
}

impl TryFrom<Cli> for Config {
    type Error = crate::error::MyReport;

    fn try_from(cli: Cli) -> MyResult<Self> {
        if cli.width == 0 || cli.height == 0 {
            return Err(eyre!(
                "window size must be non-zero, got {}x{}",
                cli.width,
                cli.height
            )
            .into());
        }
        if cli.width > Self::MAX_DIMENSION || cli.height > Self::MAX_DIMENSION {
            return Err(eyre!(
                "window size {}x{} exceeds the {} pixel limit",
                cli.width,
                cli.height,
                Self::MAX_DIMENSION
            )
            .into());
        }
        Ok(Self {
            scene: cli.scene,
            width: cli.width,
            height: cli.height,
            title: cli.title,
            use_warp_device: cli.warp,
            vsync: !cli.no_vsync,
            box_count: cli.box_count,
            seed: cli.seed,
            max_frames: cli.max_frames,
            headless: cli.headless,
        })
    }
}
