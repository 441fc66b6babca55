//! Entry point: pick a face (`order` or `admin`), wire the shared
//! transport, and hand off to the terminal front-end.

use std::sync::Arc;

use orderdesk::api::OrdersApi;
use orderdesk::config::AppConfig;
use orderdesk::push::{PushChannel, WsTransport};
use orderdesk::ui;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "orderdesk=debug,info".parse().expect("valid env filter")),
        )
        .init();

    let config = AppConfig::from_env();
    if let Err(error) = config.validate() {
        eprintln!("{error}");
        std::process::exit(2);
    }

    let mode = std::env::args().nth(1).unwrap_or_else(|| "order".to_string());

    let api = OrdersApi::new(config.base_url.clone());
    let transport = Arc::new(WsTransport::new(config.push_url()));
    let channel = Arc::new(PushChannel::new(transport));
    if let Err(error) = channel.connect().await {
        // A dead push channel is not fatal; the views degrade to no live
        // updates and only the connection indicator shows it.
        tracing::warn!("push channel unavailable: {error}");
    }

    let result = match mode.as_str() {
        "admin" => ui::run_admin(&api, &channel).await,
        "order" => ui::run_customer(&api, &channel).await,
        other => {
            eprintln!("unknown mode '{other}' (expected 'order' or 'admin')");
            std::process::exit(2);
        }
    };

    let _ = channel.close().await;
    result
}
