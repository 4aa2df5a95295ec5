use dotenv::dotenv;
use env_logger;
use log::{error, info, warn};
use std::net::SocketAddr;
use warp::Filter;

use index_valuation_board::config::AppConfig;
use index_valuation_board::routes::{self, AppState};
use index_valuation_board::services::scheduler::start_build_schedule;
use index_valuation_board::BoxError;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    dotenv().ok();
    env_logger::init();
    info!("Logger initialized. Starting the application...");

    let config = AppConfig::from_env()?;
    info!("Using PORT: {}", config.port);

    // Bind to 0.0.0.0 for container hosts
    let addr: SocketAddr = ([0, 0, 0, 0], config.port).into();
    info!("Will bind to: {}", addr);

    let state = AppState::from_config(&config);

    // The scheduler stops when its handle is dropped; keep it for the
    // lifetime of the server.
    let _scheduler = if config.scheduler_enabled {
        match start_build_schedule(state.trigger.clone(), &config.build_schedule).await {
            Ok(sched) => Some(sched),
            Err(e) => {
                error!("Failed to start build scheduler: {:#}", e);
                return Err(e.into());
            }
        }
    } else {
        warn!("Build scheduler disabled");
        None
    };

    // Set up CORS
    let cors = warp::cors()
        .allow_any_origin()
        .allow_header("content-type")
        .allow_methods(vec!["GET", "POST"]);

    let api = routes::routes(state).with(cors);
    info!("Routes configured successfully with CORS.");

    info!("Starting server on {}", addr);
    warp::serve(api).run(addr).await;
    Ok(())
}
