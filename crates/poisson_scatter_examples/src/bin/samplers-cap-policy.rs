use glam::Vec2;
use poisson_scatter::prelude::*;
use poisson_scatter_examples::init_tracing;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let base = SamplingConfig::new(Vec2::new(500.0, 500.0))
        .with_radii(5.0, 5.0)
        .with_density(30)
        .with_seed(7);

    for max_points in [1, 5, 50, 500] {
        let strict = generate(&base.clone().with_max_points(max_points))?;
        let per_origin = generate(
            &base
                .clone()
                .with_max_points(max_points)
                .with_cap_policy(CapPolicy::PerOrigin),
        )?;
        info!(
            "max_points {:>4}: strict {:>4}, per-origin {:>4}",
            max_points,
            strict.len(),
            per_origin.len()
        );
    }

    Ok(())
}
