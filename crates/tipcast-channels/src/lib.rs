//! # Tipcast Channels
//! Outbound channel implementations. Telegram Bot API only for now.

pub mod telegram;

pub use telegram::{TelegramConfig, TelegramTransport};
