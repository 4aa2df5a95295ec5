// src/bin/trigger_build.rs
use index_valuation_board::config::AppConfig;
use index_valuation_board::services::build_hook::BuildHookTrigger;
use log::{info, error};
use env_logger;
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env()?;
    let trigger = BuildHookTrigger::new(config.build_hook_url);

    info!("Triggering a build outside the schedule...");
    let outcome = trigger.trigger().await;
    println!("{}", serde_json::to_string_pretty(&outcome.report)?);

    if outcome.report.ok {
        info!("SUCCESS: build hook answered with status {:?}", outcome.report.status);
        Ok(())
    } else {
        error!("ERROR: build trigger failed: {:?}", outcome.report.error);
        Err(outcome.report.error.unwrap_or_default().into())
    }
}
