//! Serverless entry point for the metadata-only handler.

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use logoped_materials::handler::{handle_metadata, HttpRequest, HttpResponse};

async fn function_handler(event: LambdaEvent<HttpRequest>) -> Result<HttpResponse, Error> {
    Ok(handle_metadata(&event.payload))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    run(service_fn(function_handler)).await
}
