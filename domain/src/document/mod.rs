//! Document segmentation into reviewable units and batches.

pub mod batch;
pub mod unit;
