//! Lambda entry point for the empty-repository custom resource.
//!
//! Deployed as the `onEvent` function of a CloudFormation custom resource
//! provider. On stack deletion it empties the ECR repository named by the
//! `imageRepoName` property; returning an error marks the resource operation
//! as failed.

use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::{info, info_span, Instrument};
use tracing_subscriber::EnvFilter;

use sweep_core::{EcrRegistry, ImageRegistry, LifecycleHandler, SweepConfig};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = SweepConfig::from_env()?;

    // Initialize tracing for Lambda CloudWatch logs
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_ansi(false) // CloudWatch doesn't render ANSI colors
        .without_time() // Lambda adds timestamps
        .init();

    info!(version = sweep_core::VERSION, "Empty-repository handler initializing");

    // One client per cold start, shared by every invocation
    let registry = EcrRegistry::from_config(&config).await;
    let handler = LifecycleHandler::new(registry);
    let handler = &handler;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        function_handler(handler, event).await
    }))
    .await
}

async fn function_handler<R: ImageRegistry>(
    handler: &LifecycleHandler<R>,
    event: LambdaEvent<Value>,
) -> Result<(), Error> {
    let (payload, context) = event.into_parts();
    let span = info_span!("invocation", request_id = %context.request_id);

    handler
        .handle(payload)
        .instrument(span)
        .await
        .map_err(Error::from)
}
