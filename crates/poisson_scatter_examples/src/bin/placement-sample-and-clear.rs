use glam::Vec2;
use poisson_scatter::prelude::*;
use poisson_scatter_examples::init_tracing;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

/// Drives a sampler the way an editor would: "sample" twice, then "clear".
fn main() -> anyhow::Result<()> {
    init_tracing();

    let sampler = PoissonSampler::try_new(
        SamplingConfig::new(Vec2::new(120.0, 80.0))
            .with_radii(8.0, 8.0)
            .with_max_points(40),
    )?;

    let mut instances: Vec<String> = Vec::new();
    let mut cleared = 0usize;
    {
        let mut host = FnPlacement::with_clear(
            |points: &[Point]| {
                for p in points {
                    instances.push(format!("Point {},{}", p.x as i32, p.y as i32));
                }
            },
            || cleared += 1,
        );

        let mut rng = StdRng::seed_from_u64(2024);
        let first = sampler.sample_into(&mut rng, &mut host);
        let second = sampler.sample_into(&mut rng, &mut host);
        info!("Placed {first} then {second} points");
        host.clear();
    }

    info!(
        "Host received {} instances, clear requested {} time(s); first: {:?}",
        instances.len(),
        cleared,
        instances.first()
    );
    Ok(())
}
