//! # Alipay Gateway Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the provider and billing adapters
//! - Create the gateway service
//! - Start the HTTP server

mod config;

use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use alipay_hex::{AlipayGateway, inbound::HttpServer, outbound::HttpBillingHooks};
use alipay_openapi::OpenApiClient;
use alipay_types::{EnvSettings, SiteContext};

fn init_tracer() -> (sdktrace::Tracer, sdktrace::SdkTracerProvider) {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()
        .expect("failed to create OTLP span exporter");

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    (provider.tracer("alipay-gateway"), provider)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize OpenTelemetry tracing
    let (otel_tracer, otel_provider) = init_tracer();
    let telemetry = tracing_opentelemetry::layer().with_tracer(otel_tracer);

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,alipay_app=debug,alipay_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry)
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Starting Alipay gateway on port {}", config.port);
    tracing::info!("Public base URL: {}", config.public_base_url);

    // Host-side URL and path resolution
    let site = SiteContext::new(config.public_base_url, config.base_path);

    // Provider adapter; gateway settings are re-read from ALIPAY_* env vars
    // on every operation
    let provider = OpenApiClient::new(EnvSettings, site.clone());

    // Host billing adapter
    let billing = HttpBillingHooks::new(
        config.billing_callback_url,
        config.billing_callback_secret,
        config.invoice_url_template,
    );

    // Create the gateway service
    let gateway = AlipayGateway::new(provider, EnvSettings, billing, site);

    // Create and run the HTTP server
    let server = HttpServer::with_rate_limit(gateway, config.rate_limit_per_minute);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    // Ensure traces are flushed before exit
    let _ = otel_provider.shutdown();
    Ok(())
}
