pub mod dispatch;
pub mod error;
pub mod template;
pub mod transport;

pub use dispatch::OutreachDispatcher;
pub use error::MailError;
pub use template::{render_message, OutreachMessage};
pub use transport::{MailTransport, MailgunTransport, SEND_SPACING};
