use std::process::ExitCode;

use web::{config::WebConfig, start_web_server, WebState};

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    // configuration
    let config = match WebConfig::from_env() {
        Ok(config) => config,
        Err(why) => {
            log::error!("could not read configuration: {}", why);
            return ExitCode::FAILURE;
        }
    };
    log::debug!("{:?}", config);

    // web server
    let state = WebState {
        planner: config.planner(),
    };
    if let Err(why) = start_web_server(config.bind_address, state).await {
        log::error!("web server stopped: {}", why);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
