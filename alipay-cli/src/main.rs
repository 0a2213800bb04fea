//! Alipay Gateway CLI
//!
//! Operator tooling for the gateway: inspect the settings schema, poll an
//! order's trade status, or emit a checkout form without going through the
//! HTTP surface. Gateway settings come from the same `ALIPAY_*` environment
//! variables the server reads.

use anyhow::Result;
use clap::{Parser, Subcommand};

use alipay_openapi::OpenApiClient;
use alipay_types::{
    Amount, EnvSettings, LineItem, OrderId, PagePayRequest, ProviderClient, SiteContext,
    config_schema, metadata, order_description,
};

#[derive(Parser)]
#[command(name = "alipay")]
#[command(author, version, about = "Alipay gateway operator CLI", long_about = None)]
struct Cli {
    /// Public base URL of the gateway deployment
    #[arg(
        long,
        env = "PUBLIC_BASE_URL",
        default_value = "http://localhost:3000"
    )]
    base_url: String,

    /// Base directory certificate paths resolve against
    #[arg(long, env = "BASE_PATH", default_value = ".")]
    base_path: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the settings schema consumed by the host settings UI
    Schema,
    /// Query the provider for an order's trade status
    Status {
        /// Order ID (out_trade_no)
        order_id: String,
    },
    /// Emit the hosted-checkout form HTML for an order
    Checkout {
        /// Order ID (out_trade_no)
        #[arg(long)]
        order_id: String,
        /// Total in minor units (fen)
        #[arg(long)]
        amount: i64,
        /// Line items as `name` or `name:quantity` (repeatable)
        #[arg(long = "product")]
        products: Vec<String>,
    },
}

fn parse_order_id(s: &str) -> Result<OrderId> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Invalid order ID: {}", s))
}

fn parse_product(s: &str) -> Result<LineItem> {
    match s.rsplit_once(':') {
        Some((name, quantity)) => {
            let quantity = quantity
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid quantity in product: {}", s))?;
            Ok(LineItem::new(name, quantity))
        }
        None => Ok(LineItem::new(s, 1)),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let site = SiteContext::new(&cli.base_url, &cli.base_path);
    let client = OpenApiClient::new(EnvSettings, site.clone());

    match cli.command {
        Commands::Schema => {
            let schema = serde_json::json!({
                "gateway": metadata(),
                "fields": config_schema(),
            });
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }

        Commands::Status { order_id } => {
            let order_id = parse_order_id(&order_id)?;
            let status = client.query_trade(&order_id).await?;
            let report = serde_json::json!({
                "order_id": order_id,
                "trade_status": status,
                "paid": status.is_paid(),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Commands::Checkout {
            order_id,
            amount,
            products,
        } => {
            let order_id = parse_order_id(&order_id)?;
            let total = Amount::from_minor(amount)
                .map_err(|e| anyhow::anyhow!("Invalid amount: {}", e))?;
            let products = products
                .iter()
                .map(|p| parse_product(p))
                .collect::<Result<Vec<_>>>()?;

            let request = PagePayRequest {
                subject: order_description(&products),
                order_id,
                total,
                return_url: site.url("/alipay/redirect"),
            };
            let page = client.create_page_payment(&request).await?;
            println!("{}", page.html);
        }
    }

    Ok(())
}
