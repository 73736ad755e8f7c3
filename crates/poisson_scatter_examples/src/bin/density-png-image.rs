use std::path::PathBuf;

use poisson_scatter::prelude::*;
use poisson_scatter_examples::{
    init_tracing, load_density_png, render_points_to_png, save_luminance_png, RenderConfig,
};
use tracing::info;

/// Usage: `density-png-image [path/to/density.png]`. Without a path a striped
/// density image is generated first.
fn main() -> anyhow::Result<()> {
    init_tracing();

    let path = match std::env::args().nth(1) {
        Some(path) => PathBuf::from(path),
        None => {
            let path = std::env::temp_dir().join("poisson-scatter-stripes.png");
            let stripes =
                GrayImage::from_fn(512, 256, |x, _| if (x / 64) % 2 == 0 { 0.0 } else { 1.0 });
            save_luminance_png(&stripes, &path)?;
            info!("Generated density image at {}", path.display());
            path
        }
    };

    let image = load_density_png(&path)?;
    let config = SamplingConfig::default()
        .with_radii(3.0, 10.0)
        .with_max_points(50_000)
        .with_seed(12)
        .with_density_image(image.clone());

    let sampler = PoissonSampler::try_new(config)?;
    let run = sampler.run();

    let render =
        RenderConfig::new((1024, 512), sampler.domain().extent()).with_points([0, 0, 160], 2);
    render_points_to_png(
        &run.points,
        Some(&image as &dyn LuminanceSource),
        &render,
        "density-png-image.png",
    )?;
    Ok(())
}
