use std::{process::ExitCode, sync::Arc};

use arch_bot_commons::read_bot_key;
use teloxide::{dptree::deps, prelude::*};

use crate::{
    commands::generate_bot_commands,
    config::{Config, TOKEN_VAR},
    handlers::{handle_message, Confessional},
};

/// Run the bot until Ctrl-C.
///
/// Fails right away if there's no bot token.
pub async fn entry() -> ExitCode {
    log::info!("ASYNC WOOOO");

    let Some(key) = read_bot_key(TOKEN_VAR) else {
        log::error!("No bot token! Set {TOKEN_VAR} or put it into a \"key\" file.");
        return ExitCode::FAILURE;
    };

    let bot = Bot::new(key);

    let config = Config::from_env();
    let confessional = Arc::new(Confessional::new(config));

    if let Err(e) = bot.set_my_commands(generate_bot_commands()).await {
        log::warn!("Failed to set bot commands: {e}");
    }

    log::info!("Creating the handler...");

    let handler = Update::filter_message().endpoint(handle_message);

    log::info!("Dispatching the dispatcher!");

    Dispatcher::builder(bot, handler)
        .default_handler(|_| async {})
        .dependencies(deps![confessional])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    log::info!("it appears we have been bonked.");

    ExitCode::SUCCESS
}
