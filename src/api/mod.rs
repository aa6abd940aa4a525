mod gestures;
mod view;
mod view_config;

pub use view::{ChartView, DeviceBuffer};
pub use view_config::ChartViewConfig;
