use std::process::ExitCode;

use discord_timeplot::{
    cli::{report_error, run_cli},
    utils::runtime::single_thread_runtime,
};

fn main() -> ExitCode {
    let result = single_thread_runtime().and_then(|runtime| runtime.block_on(run_cli()));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}
