use std::process::ExitCode;

use arch_bot_commons::*;

fn main() -> ExitCode {
    start_everything(
        "WARN,agent_confessional_bot=debug",
        agent_confessional_bot::entry(),
    )
}
