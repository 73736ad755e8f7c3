use glam::Vec2;
use poisson_scatter::prelude::*;
use poisson_scatter_examples::{init_tracing, render_points_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = SamplingConfig::new(Vec2::new(200.0, 200.0))
        .with_radii(5.0, 5.0)
        .with_density(30)
        .with_max_points(5_000)
        .with_seed(42);

    let points = generate(&config)?;

    let render =
        RenderConfig::new((800, 800), Vec2::new(200.0, 200.0)).with_points([30, 30, 30], 3);
    render_points_to_png(&points, None, &render, "samplers-poisson-uniform.png")?;
    Ok(())
}
