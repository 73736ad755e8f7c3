//! Bridson-style Poisson disk sampling with an optional luminance-driven spacing field.
use std::f32::consts::TAU;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, info, warn};

use crate::config::{CapPolicy, SamplingConfig};
use crate::density::DensityField;
use crate::domain::{Domain, Point};
use crate::error::Result;
use crate::grid::SpatialGrid;
use crate::placement::PlacementSink;
use crate::sampling::{next_down, rand01, rand_index};

/// Cells scanned on each side of a candidate's cell. With `cell_size = radius / sqrt(2)`
/// two cells span more than the largest spacing any neighbor can demand.
const NEIGHBORHOOD_REACH: u32 = 2;

/// Samples a config once, seeding the generator from `config.seed`.
pub fn generate(config: &SamplingConfig) -> Result<Vec<Point>> {
    Ok(PoissonSampler::try_new(config.clone())?.run().points)
}

/// Outcome of a sampling run.
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct SampleRun {
    /// Accepted points in acceptance order. The first entry is the initial seed point.
    pub points: Vec<Point>,
    /// Candidates drawn around active points.
    pub candidates_generated: usize,
    /// Candidates that fell outside the domain.
    pub rejected_out_of_bounds: usize,
    /// Candidates too close to an accepted neighbor.
    pub rejected_too_close: usize,
}

/// Poisson disk sampler bound to a validated [`SamplingConfig`].
///
/// Each run owns a fresh [`SpatialGrid`] and active list; nothing is shared between runs.
#[derive(Debug, Clone)]
pub struct PoissonSampler {
    config: SamplingConfig,
    domain: Domain,
    empty_grid: SpatialGrid,
}

/// Mutable state of one run.
struct RunState {
    grid: SpatialGrid,
    /// Indices into `accepted` still eligible to spawn candidates.
    active: Vec<usize>,
    accepted: Vec<Point>,
}

impl RunState {
    fn new(grid: SpatialGrid) -> Self {
        Self {
            grid,
            active: Vec::new(),
            accepted: Vec::new(),
        }
    }

    fn accept(&mut self, p: Point) {
        if self.grid.insert(p).is_ok() {
            self.active.push(self.accepted.len());
            self.accepted.push(p);
        }
    }

    fn take_random_active(&mut self, rng: &mut dyn RngCore) -> Point {
        let pick = rand_index(rng, self.active.len());
        self.accepted[self.active.swap_remove(pick)]
    }
}

impl PoissonSampler {
    /// Validates `config` and prepares a sampler for it.
    pub fn try_new(config: SamplingConfig) -> Result<Self> {
        config.validate()?;
        let domain = config.domain()?;
        let empty_grid = SpatialGrid::with_domain(domain, config.cell_size())?;
        Ok(Self {
            config,
            domain,
            empty_grid,
        })
    }

    pub fn config(&self) -> &SamplingConfig {
        &self.config
    }

    /// Domain points are drawn from, after resolving the density image size.
    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Runs with a generator seeded from the config.
    pub fn run(&self) -> SampleRun {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        self.run_with_rng(&mut rng)
    }

    /// Returns the accepted points drawn from `rng`.
    pub fn generate(&self, rng: &mut dyn RngCore) -> Vec<Point> {
        self.run_with_rng(rng).points
    }

    /// Samples and forwards the result to `sink` in one call. Returns the number placed.
    pub fn sample_into(&self, rng: &mut dyn RngCore, sink: &mut dyn PlacementSink) -> usize {
        let points = self.generate(rng);
        sink.place(&points);
        points.len()
    }

    /// Runs the sampler, returning points together with candidate statistics.
    pub fn run_with_rng(&self, rng: &mut dyn RngCore) -> SampleRun {
        let config = &self.config;
        let mut run = SampleRun::default();

        if config.max_points == 0 {
            warn!("max_points is 0; nothing to sample.");
            return run;
        }

        info!(
            "Poisson sampling {}x{} (cell size {:.3}, radii {}..{}, density {}, max {} points, image: {}).",
            self.domain.width,
            self.domain.height,
            self.empty_grid.cell_size(),
            config.min_radius,
            config.max_radius,
            config.density,
            config.max_points,
            config.density_image.is_some(),
        );

        let field = config.density_image.as_deref().map(|image| {
            DensityField::new(
                image,
                config.min_radius,
                config.max_radius,
                config.black_cutoff,
                config.white_cutoff,
            )
        });

        let mut state = RunState::new(self.empty_grid.clone());

        let initial = self.initial_point(rng);
        debug!("Initial point {},{}", initial.x, initial.y);
        state.accept(initial);

        while !state.active.is_empty() && state.accepted.len() < config.max_points {
            let origin = state.take_random_active(rng);

            for _ in 0..config.density {
                if config.cap_policy == CapPolicy::Strict
                    && state.accepted.len() >= config.max_points
                {
                    break;
                }

                let candidate = self.candidate_around(origin, rng);
                run.candidates_generated += 1;

                if !self.domain.contains(candidate) {
                    run.rejected_out_of_bounds += 1;
                    continue;
                }
                if !self.is_far_enough(&state.grid, field.as_ref(), candidate) {
                    run.rejected_too_close += 1;
                    continue;
                }

                state.accept(candidate);
            }
        }

        if state.accepted.len() >= config.max_points {
            debug!(
                "Reached max_points with {} active points left.",
                state.active.len()
            );
        }

        run.points = state.accepted;
        info!(
            "Poisson sampling finished: {} points from {} candidates ({} out of bounds, {} too close).",
            run.points.len(),
            run.candidates_generated,
            run.rejected_out_of_bounds,
            run.rejected_too_close,
        );
        run
    }

    /// Uniform point strictly inside the domain.
    fn initial_point(&self, rng: &mut dyn RngCore) -> Point {
        let Domain { width, height } = self.domain;
        let x = (rand01(rng) * width).min(next_down(width));
        let y = (rand01(rng) * height).min(next_down(height));
        Vec2::new(x, y)
    }

    /// Candidate at radius `[max_radius, 2 * max_radius)` and a uniform angle around `origin`.
    fn candidate_around(&self, origin: Point, rng: &mut dyn RngCore) -> Point {
        let r = self.config.max_radius * (1.0 + rand01(rng));
        let angle = TAU * rand01(rng);
        Vec2::new(origin.x + r * angle.cos(), origin.y + r * angle.sin())
    }

    /// Tests `p` against every accepted point in the 5x5 cell window around it.
    ///
    /// With a density field the required spacing is read at the existing neighbor.
    fn is_far_enough(
        &self,
        grid: &SpatialGrid,
        field: Option<&DensityField<'_>>,
        p: Point,
    ) -> bool {
        let Ok(cell) = grid.cell_of(p) else {
            return false;
        };

        for s in grid.neighborhood(cell, NEIGHBORHOOD_REACH) {
            let min_distance = match field {
                Some(field) => field.min_distance_at(s),
                None => self.config.min_radius,
            };
            if s.distance_squared(p) < min_distance * min_distance {
                return false;
            }
        }

        true
    }
}
