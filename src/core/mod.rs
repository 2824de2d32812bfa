pub mod band_scale;
pub mod scale;
pub mod types;

pub use band_scale::CategoryBandScale;
pub use scale::{LinearScale, recommended_value_tick_count, tick_step};
pub use types::{PlotArea, Viewport};
