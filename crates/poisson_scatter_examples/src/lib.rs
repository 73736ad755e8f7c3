#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{
    init_tracing, load_density_png, render_points_to_png, save_luminance_png, RenderConfig,
};
