use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailError {
    /// Network or TLS failure talking to the mail API.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The mail API answered with a non-2xx status.
    #[error("mail API rejected message ({status}): {body}")]
    Rejected { status: u16, body: String },
}
