pub mod assessment;
pub mod record;
pub mod thresholds;
pub mod tiers;
