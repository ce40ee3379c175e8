use lambda_http::{run, service_fn, Error as LambdaError, Request as LambdaRequest};
use tracing::{info, warn};

use video_generation_lambda::common::FAL_ENDPOINT_DEFAULT;
use video_generation_lambda::fal::FalQueueClient;
use video_generation_lambda::generator::VideoGenerator;
use video_generation_lambda::handler::handle_request;

#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .without_time() // CloudWatch will add the ingestion time
        .with_target(false)
        .init();

    let endpoint = std::env::var("FAL_ENDPOINT").unwrap_or(FAL_ENDPOINT_DEFAULT.into());
    let api_key = std::env::var("FAL_KEY").ok().filter(|key| !key.is_empty());
    if api_key.is_none() {
        warn!("FAL_KEY is not set, generation requests will be rejected");
    }

    info!("Using fal.ai endpoint: {}", endpoint);
    let generator = VideoGenerator::new(FalQueueClient::new(endpoint));

    run(service_fn(|request: LambdaRequest| {
        handle_request(request, &generator, api_key.as_deref())
    }))
    .await
}
