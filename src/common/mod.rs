pub mod errors;
pub mod utils;

pub const FAL_ENDPOINT_DEFAULT: &str = "https://queue.fal.run/fal-ai/fast-svd/text-to-video";
