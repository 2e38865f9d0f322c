//! Outbound chat webhooks (Slack, Chatwork, generic JSON)

pub mod sender;
pub mod template;

pub use sender::HttpWebhookSender;
pub use template::{MessageRenderer, DEFAULT_SALE_TEMPLATE};
