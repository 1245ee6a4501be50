//! Source code for Agent Confessional, an anonymous confession bot on Telegram.
//!
//! People DM the bot their confessions, the admin approves or rejects them,
//! and approved ones go to a public channel under a random ID.

/// Confession records and their IDs.
mod types;

/// The confessions file.
mod store;

/// Settings from the environment.
mod config;

/// Everything the bot says.
mod messages;

/// Figuring out what a message wants.
mod commands;

/// Functions that handle events from Telegram.
mod handlers;

/// Entry function that starts the bot.
mod entry;
pub use entry::*;
