//! pl-chart: PNG line charts of grade lines along the route.

pub mod error;
pub mod line;

pub use error::{ChartError, ChartResult};
pub use line::{ChartSeries, LineChart, colors, grid_lines, nice_step};
