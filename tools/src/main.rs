// Generate a palette and write it as a strip of swatches to a PNG file.
//
// Logging is controlled by RUST_LOG, e.g.
// RUST_LOG=distinct_palette=debug distinct-palette 8 -s force

use std::{fs::File,
          io::BufWriter,
          path::{Path, PathBuf}};
use anyhow::{bail, Context, Result};
use clap::Parser;
use rgb::{RGB, RGB8};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use distinct_palette::{rgb_to_lab, simulate, ConfusionType, DistanceType,
                       Generator, Lab, Strategy, DEFAULT_QUALITY};

#[derive(Parser)]
#[command(name = "distinct-palette")]
#[command(about = "Generate palettes of perceptually distinct colors")]
struct Cli {
    /// Number of colors in the palette
    #[arg(default_value_t = 11)]
    count: usize,

    /// Optimization: "kmeans" or "force"
    #[arg(short, long, default_value_t = Strategy::KMeans)]
    strategy: Strategy,

    /// Iterations factor
    #[arg(short, long, default_value_t = DEFAULT_QUALITY)]
    quality: usize,

    /// Sample the color space more finely (k-means only)
    #[arg(long)]
    high_resolution: bool,

    /// Color distance: euclidean, cmc, compromise, protanope,
    /// deuteranope or tritanope
    #[arg(short, long, default_value_t = DistanceType::Cmc)]
    distance: DistanceType,

    /// Seed of the random generator (for reproducible palettes)
    #[arg(long)]
    seed: Option<u64>,

    /// Only accept colors with at least this L* lightness
    #[arg(long, default_value_t = 0.)]
    min_lightness: f64,

    /// Only accept colors with at most this L* lightness
    #[arg(long, default_value_t = 100.)]
    max_lightness: f64,

    /// Only accept colors with at least this chroma (√(a*² + b*²)).
    /// Too strict bounds may make "force" run forever.
    #[arg(long, default_value_t = 0.)]
    min_chroma: f64,

    /// Draw the palette as seen with a color vision deficiency
    #[arg(long)]
    simulate: Option<ConfusionType>,

    /// Output PNG file path
    #[arg(short, long, default_value = "palette.png")]
    output: PathBuf,

    /// Width of each swatch in pixels
    #[arg(long, default_value_t = 25)]
    swatch_width: u32,

    /// Height of the image in pixels
    #[arg(long, default_value_t = 100)]
    height: u32,
}

/// Acceptance region in L*C* coordinates.
struct Bounds {
    min_lightness: f64,
    max_lightness: f64,
    min_chroma: f64,
}

impl Bounds {
    fn accept(&self, rgb: RGB<f64>) -> bool {
        let Lab { l, a, b } = rgb_to_lab(rgb);
        (self.min_lightness ..= self.max_lightness).contains(&l)
            && a.hypot(b) >= self.min_chroma
    }
}

fn css_string(c: RGB8) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
}

fn write_png(path: &Path, colors: &[RGB8], swatch_width: u32,
             height: u32) -> Result<()> {
    let width = swatch_width * colors.len() as u32;
    let row: Vec<u8> = colors.iter()
        .flat_map(|c| (0 .. swatch_width).flat_map(move |_| [c.r, c.g, c.b]))
        .collect();
    let data = row.repeat(height as usize);

    let fh = BufWriter::new(File::create(path)?);
    let mut encoder = png::Encoder::new(fh, width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&data)?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "distinct_palette=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    if cli.min_lightness > cli.max_lightness {
        bail!("--min-lightness {} exceeds --max-lightness {}",
              cli.min_lightness, cli.max_lightness);
    }
    if cli.swatch_width == 0 || cli.height == 0 {
        bail!("the image must not be empty");
    }
    let bounds = Bounds {
        min_lightness: cli.min_lightness,
        max_lightness: cli.max_lightness,
        min_chroma: cli.min_chroma,
    };

    let mut generator = Generator::new(cli.count)
        .strategy(cli.strategy)
        .quality(cli.quality)
        .high_resolution(cli.high_resolution)
        .distance(cli.distance);
    if let Some(seed) = cli.seed {
        generator = generator.seed(seed);
    }
    let palette = generator.generate(|rgb| bounds.accept(rgb))?;

    for c in &palette {
        println!("{}  L={:6.2} a={:7.2} b={:7.2}",
                 css_string(c.rgb()), c.l, c.a, c.b);
    }

    let colors: Vec<RGB8> = palette.iter()
        .map(|&c| match cli.simulate {
            Some(t) => simulate(c, t, 1.).rgb(),
            None => c.rgb(),
        })
        .collect();
    write_png(&cli.output, &colors, cli.swatch_width, cli.height)
        .with_context(|| format!("cannot write {}", cli.output.display()))?;
    tracing::info!(path = %cli.output.display(), "palette written");
    Ok(())
}
