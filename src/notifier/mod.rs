mod telegram;

pub use telegram::{TELEGRAM_API_URL, TelegramNotifier};

use thiserror::Error;

/// Delivers a text message to a chat.
pub trait Notifier {
    async fn send(&self, chat_id: &str, text: &str) -> Result<(), NotifyError>;
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Telegram rejected message (status {status}): {description}")]
    Rejected { status: u16, description: String },
}
