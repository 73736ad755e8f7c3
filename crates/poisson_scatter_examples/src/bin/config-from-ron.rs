use anyhow::Context;
use poisson_scatter::prelude::*;
use poisson_scatter_examples::{init_tracing, render_points_to_png, RenderConfig};
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let path = format!(
        "{}/assets/config-from-ron/sampling.ron",
        env!("CARGO_MANIFEST_DIR")
    );
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let config: SamplingConfig =
        ron::from_str(&text).with_context(|| format!("parsing {path}"))?;
    info!("Loaded {:?}", config);

    let sampler = PoissonSampler::try_new(config)?;
    let run = sampler.run();

    let extent = sampler.domain().extent();
    let render = RenderConfig::new(((extent.x * 2.0) as u32, (extent.y * 2.0) as u32), extent);
    render_points_to_png(&run.points, None, &render, "config-from-ron.png")?;
    Ok(())
}
