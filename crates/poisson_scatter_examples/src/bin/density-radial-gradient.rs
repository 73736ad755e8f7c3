use glam::Vec2;
use poisson_scatter::prelude::*;
use poisson_scatter_examples::{init_tracing, render_points_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Dark center, bright rim: dense in the middle, sparse at the edges.
    let (w, h) = (400u32, 400u32);
    let center = Vec2::new(w as f32, h as f32) * 0.5;
    let image = GrayImage::from_fn(w, h, |x, y| {
        let d = Vec2::new(x as f32, y as f32).distance(center);
        d / center.length()
    });

    let config = SamplingConfig::default()
        .with_radii(3.0, 14.0)
        .with_cutoffs(0.1, 0.7)
        .with_max_points(20_000)
        .with_seed(1)
        .with_density_image(image.clone());

    let sampler = PoissonSampler::try_new(config)?;
    let run = sampler.run();

    let render =
        RenderConfig::new((800, 800), sampler.domain().extent()).with_points([200, 40, 40], 2);
    render_points_to_png(
        &run.points,
        Some(&image as &dyn LuminanceSource),
        &render,
        "density-radial-gradient.png",
    )?;
    Ok(())
}
