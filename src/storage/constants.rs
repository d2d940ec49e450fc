// Buffer related constants
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

// Region used when neither the caller nor the environment names one
pub const DEFAULT_REGION: &str = "ap-southeast-1";

// S3 rejects an explicit location constraint for this region
pub const US_EAST_1: &str = "us-east-1";
