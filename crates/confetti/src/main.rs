use std::process::ExitCode;

use confetti::prelude::*;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Game::new(WINDOW_TITLE).run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("startup failed: {e}");
            println!("Could not start game! Check logs for details...");
            ExitCode::FAILURE
        }
    }
}
