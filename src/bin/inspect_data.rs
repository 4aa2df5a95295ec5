// src/bin/inspect_data.rs
use index_valuation_board::config::AppConfig;
use index_valuation_board::services::data_source::DataSource;
use index_valuation_board::services::list_view::{build_list_view, ListView};
use index_valuation_board::services::symbols::resolve_symbol;
use log::{info, warn, error};
use env_logger;
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env()?;
    let source = DataSource::from_location(&config.data_source);
    info!("Inspecting data document at {}", source.describe());

    let doc = match source.fetch().await {
        Ok(doc) => doc,
        Err(e) => {
            error!("ERROR: failed to load data document: {:#}", e);
            return Err(e.into());
        }
    };
    info!("Updated at: {}", doc.updated_at.as_deref().unwrap_or("-"));

    for it in &doc.indexes {
        if it.history.is_empty() {
            warn!("{} has no percentile history", it.code);
        }
        match resolve_symbol(&it.code) {
            Some(hit) => info!("{} -> {} ({:?})", it.code, hit.symbol, hit.tier),
            None => warn!("{} has no charting symbol", it.code),
        }
    }

    match build_list_view(Ok(doc)) {
        ListView::Cards { cards, .. } => {
            for card in cards {
                println!(
                    "{:<12} {:<16} {:>10}  {}  PE分位 {:>4} / PB分位 {:>4}",
                    card.code, card.name, card.price, card.badge.label, card.pe_percentile, card.pb_percentile
                );
            }
        }
        ListView::Placeholder { message, .. } => println!("{}", message),
    }

    Ok(())
}
