pub mod inputs;
pub mod workflow;

pub use inputs::{read_float, HeatmapForm, PricingForm};
pub use workflow::{Calculation, Dashboard, HeatmapOutput};
