use std::path::PathBuf;

/// Mailgun credentials. Outreach only performs network sends when these are
/// present.
#[derive(Clone)]
pub struct MailCredentials {
    pub api_key: String,
    pub domain: String,
    pub base_url: String,
    pub from_address: String,
}

impl std::fmt::Debug for MailCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailCredentials")
            .field("api_key", &"[redacted]")
            .field("domain", &self.domain)
            .field("base_url", &self.base_url)
            .field("from_address", &self.from_address)
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub google_maps_api_key: String,
    pub search_location: String,
    pub search_keyword: String,
    pub additional_keywords: Vec<String>,
    /// Search radius in metres. Always strictly positive.
    pub search_radius_m: f64,
    pub mail: Option<MailCredentials>,
    pub email_from_name: String,
    pub email_subject: String,
    pub output_dir: PathBuf,
    pub log_level: String,
    pub scraper_timeout_secs: u64,
    pub scraper_user_agent: String,
    pub scraper_single_page: bool,
}

impl AppConfig {
    /// Primary keyword followed by every additional keyword, in order.
    #[must_use]
    pub fn keywords(&self) -> Vec<String> {
        std::iter::once(self.search_keyword.clone())
            .chain(self.additional_keywords.iter().cloned())
            .collect()
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("google_maps_api_key", &"[redacted]")
            .field("search_location", &self.search_location)
            .field("search_keyword", &self.search_keyword)
            .field("additional_keywords", &self.additional_keywords)
            .field("search_radius_m", &self.search_radius_m)
            .field("mail", &self.mail)
            .field("email_from_name", &self.email_from_name)
            .field("email_subject", &self.email_subject)
            .field("output_dir", &self.output_dir)
            .field("log_level", &self.log_level)
            .field("scraper_timeout_secs", &self.scraper_timeout_secs)
            .field("scraper_user_agent", &self.scraper_user_agent)
            .field("scraper_single_page", &self.scraper_single_page)
            .finish()
    }
}
