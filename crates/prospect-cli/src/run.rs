//! Command handlers: search, persist, and outreach.
//!
//! Only configuration errors, a failed geocode, and snapshot I/O abort a
//! command. Per-place and per-business failures are absorbed by the
//! aggregator and dispatcher.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use prospect_core::{load_json, save_json, AppConfig, Business, OutreachReport};
use prospect_mailer::{MailTransport, MailgunTransport, OutreachDispatcher};
use prospect_places::{PlaceSearchAggregator, PlacesClient, PlacesSearch};
use prospect_scraper::{pick_best, EmailFinder, HttpPageFetcher, WebsiteEmailScraper};

pub(crate) const ALL_FILE: &str = "companies_all.json";
pub(crate) const ACTIVE_FILE: &str = "companies_active.json";
pub(crate) const RESULTS_FILE: &str = "email_results.json";

const PLACES_TIMEOUT_SECS: u64 = 30;

/// Counts printed at the end of a command.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RunSummary {
    pub found: usize,
    pub active: usize,
    pub sent: u32,
    pub failed: u32,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "found {} companies, {} active, {} emails sent, {} failed",
            self.found, self.active, self.sent, self.failed
        )
    }
}

pub(crate) async fn run_full(config: &AppConfig) -> anyhow::Result<RunSummary> {
    let aggregator = PlaceSearchAggregator::new(build_places_client(config)?);
    let dispatcher = build_dispatcher(config)?;
    full_pipeline(&aggregator, &dispatcher, config).await
}

pub(crate) async fn run_search(config: &AppConfig) -> anyhow::Result<RunSummary> {
    let aggregator = PlaceSearchAggregator::new(build_places_client(config)?);
    let (businesses, active) = search_and_persist(&aggregator, config).await?;
    Ok(RunSummary {
        found: businesses.len(),
        active: active.len(),
        ..RunSummary::default()
    })
}

/// Emails the active subset of a saved business snapshot.
pub(crate) async fn run_send(config: &AppConfig, input: &Path) -> anyhow::Result<RunSummary> {
    let businesses: Vec<Business> = load_json(input)
        .await
        .with_context(|| format!("failed to load businesses from {}", input.display()))?;
    let active = active_only(&businesses);
    tracing::info!(
        input = %input.display(),
        total = businesses.len(),
        active = active.len(),
        "loaded snapshot"
    );

    let dispatcher = build_dispatcher(config)?;
    let report = outreach_and_persist(&dispatcher, &active, &config.output_dir).await?;
    Ok(RunSummary {
        found: businesses.len(),
        active: active.len(),
        sent: report.success,
        failed: report.failed,
    })
}

/// Crawls one website and prints every validated address plus the preferred
/// one.
pub(crate) async fn run_find_email(config: &AppConfig, url: &str) -> anyhow::Result<()> {
    let scraper = build_scraper(config)?;
    let emails = scraper.extract_emails(url).await;
    match pick_best(&emails) {
        None => println!("no email addresses found on {url}"),
        Some(best) => {
            for email in &emails {
                println!("{email}");
            }
            println!("best: {best}");
        }
    }
    Ok(())
}

/// Search, persist both snapshots, then contact the active businesses and
/// persist the outreach report. Outreach is skipped entirely when nothing
/// is active.
pub(crate) async fn full_pipeline<P, E, M>(
    aggregator: &PlaceSearchAggregator<P>,
    dispatcher: &OutreachDispatcher<E, M>,
    config: &AppConfig,
) -> anyhow::Result<RunSummary>
where
    P: PlacesSearch,
    E: EmailFinder,
    M: MailTransport,
{
    let (businesses, active) = search_and_persist(aggregator, config).await?;

    let report = if active.is_empty() {
        tracing::warn!("no active companies found; skipping outreach");
        OutreachReport::default()
    } else {
        outreach_and_persist(dispatcher, &active, &config.output_dir).await?
    };

    Ok(RunSummary {
        found: businesses.len(),
        active: active.len(),
        sent: report.success,
        failed: report.failed,
    })
}

/// Returns all businesses found and the active subset, both already saved.
async fn search_and_persist<P: PlacesSearch>(
    aggregator: &PlaceSearchAggregator<P>,
    config: &AppConfig,
) -> anyhow::Result<(Vec<Business>, Vec<Business>)> {
    let origin = aggregator
        .resolve_origin(&config.search_location)
        .await
        .with_context(|| format!("failed to geocode search location {:?}", config.search_location))?;

    let keywords = config.keywords();
    tracing::info!(
        location = %config.search_location,
        radius_m = config.search_radius_m,
        keywords = keywords.len(),
        "searching places"
    );
    let businesses = aggregator
        .aggregate(origin, config.search_radius_m, &keywords)
        .await;

    let active = active_only(&businesses);
    tracing::info!(found = businesses.len(), active = active.len(), "search complete");

    save_json(&config.output_dir, ALL_FILE, &businesses).await?;
    save_json(&config.output_dir, ACTIVE_FILE, &active).await?;
    Ok((businesses, active))
}

async fn outreach_and_persist<E: EmailFinder, M: MailTransport>(
    dispatcher: &OutreachDispatcher<E, M>,
    businesses: &[Business],
    output_dir: &Path,
) -> anyhow::Result<OutreachReport> {
    let report = dispatcher.dispatch(businesses).await;
    save_json(output_dir, RESULTS_FILE, &report).await?;
    Ok(report)
}

pub(crate) fn active_only(businesses: &[Business]) -> Vec<Business> {
    businesses.iter().filter(|b| b.is_active()).cloned().collect()
}

fn build_places_client(config: &AppConfig) -> anyhow::Result<PlacesClient> {
    PlacesClient::new(&config.google_maps_api_key, PLACES_TIMEOUT_SECS)
        .context("failed to build places client")
}

fn build_scraper(config: &AppConfig) -> anyhow::Result<WebsiteEmailScraper<HttpPageFetcher>> {
    let fetcher = HttpPageFetcher::new(
        Duration::from_secs(config.scraper_timeout_secs),
        &config.scraper_user_agent,
    )
    .context("failed to build page fetcher")?;
    let scraper = WebsiteEmailScraper::new(fetcher);
    Ok(if config.scraper_single_page {
        scraper.single_page()
    } else {
        scraper
    })
}

fn build_dispatcher(
    config: &AppConfig,
) -> anyhow::Result<OutreachDispatcher<WebsiteEmailScraper<HttpPageFetcher>, MailgunTransport>> {
    let transport = config
        .mail
        .as_ref()
        .map(|credentials| MailgunTransport::new(credentials, &config.email_from_name))
        .transpose()
        .context("failed to build mail transport")?;
    Ok(OutreachDispatcher::new(
        build_scraper(config)?,
        transport,
        &config.email_subject,
        &config.email_from_name,
    ))
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
