pub mod solve;
pub mod transform;

pub use solve::{plan, target_width};
pub use transform::{halve, resample_bilinear};
