mod assembler;
mod types;

pub use assembler::{assemble, encode_mainroad};
pub use types::{FEATURE_COLUMNS, FeatureFrame, FeatureVector, HouseFeatures, NumericValue};
