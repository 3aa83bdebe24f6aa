use std::sync::Arc;

use clap::Parser;
use storefront_search::api::{AppState, create_router};
use storefront_search::cli::{Cli, Command, decode_argument, parse_toggle};
use storefront_search::config::Config;
use storefront_search::data_models::{RefinementToggle, SearchState};
use storefront_search::location::{MemoryLocation, SearchParams};
use storefront_search::refinements::RefinementCatalog;
use storefront_search::search_params::{self, EncodeOptions};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::get()?;

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Bridge log crate -> tracing (so log::info! etc. work)
    tracing_log::LogTracer::init()?;

    let cli = Cli::parse();
    match cli.command {
        Command::Decode { query } => {
            let state = decode_argument(&query);
            println!("{}", serde_json::to_string_pretty(&state)?);
        }
        Command::Encode {
            state,
            path,
            toggle,
        } => {
            let state: SearchState = serde_json::from_str(&state)?;
            let options = EncodeOptions {
                include_path: path.is_some(),
                toggle_refinement: toggle.as_deref().map(parse_toggle),
            };
            println!(
                "{}",
                search_params::encode(&state, &options, path.as_deref().unwrap_or_default())
            );
        }
        Command::Toggle {
            url,
            attribute,
            value,
        } => {
            let mut params = SearchParams::from_config(MemoryLocation::new(url), config);
            let toggle = RefinementToggle {
                attribute_id: attribute,
                value,
            };
            println!("{}", params.toggle(toggle));
        }
        Command::Serve => {
            let state = Arc::new(AppState {
                catalog: RefinementCatalog::default(),
                defaults: config.default_search_state(),
            });
            let app = create_router(state, &config.static_dir);

            let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
            tracing::info!("listening on {}", config.bind_addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
