use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use prospect_core::{BusinessStatus, Coordinate, OutreachOutcome};
use prospect_scraper::{CrawlPacing, FetchError, PageFetcher, WebsiteEmailScraper};

use super::*;
use crate::error::MailError;

fn business(name: &str, website: Option<&str>) -> Business {
    Business {
        place_id: format!("id-{name}"),
        name: name.to_owned(),
        address: "Merter".to_owned(),
        formatted_address: None,
        location: Coordinate {
            lat: 41.0,
            lng: 28.9,
        },
        rating: Some(4.0),
        user_ratings_total: 5,
        business_status: BusinessStatus::Operational,
        types: Vec::new(),
        phone: None,
        website: website.map(str::to_owned),
        opening_hours: None,
    }
}

#[derive(Default)]
struct FakeFinder {
    emails: HashMap<String, String>,
    lookups: Mutex<Vec<String>>,
}

impl FakeFinder {
    fn with(mut self, website: &str, email: &str) -> Self {
        self.emails.insert(website.to_owned(), email.to_owned());
        self
    }
}

#[async_trait]
impl EmailFinder for FakeFinder {
    async fn find_email(&self, website: &str) -> Option<String> {
        self.lookups.lock().unwrap().push(website.to_owned());
        self.emails.get(website).cloned()
    }
}

#[derive(Default)]
struct FakeTransport {
    reject: HashSet<String>,
    sent: Mutex<Vec<(String, String, String)>>,
}

#[async_trait]
impl MailTransport for FakeTransport {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        if self.reject.contains(to) {
            return Err(MailError::Rejected {
                status: 400,
                body: "'to' parameter is not a valid address".to_owned(),
            });
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_owned(), subject.to_owned(), body.to_owned()));
        Ok(())
    }
}

#[tokio::test]
async fn without_transport_returns_empty_report_and_does_no_lookups() {
    let dispatcher: OutreachDispatcher<FakeFinder, FakeTransport> =
        OutreachDispatcher::new(FakeFinder::default(), None, "Hi", "Me");
    assert!(!dispatcher.is_enabled());

    let report = dispatcher
        .dispatch(&[business("Ada", Some("https://ada.com.tr"))])
        .await;

    assert_eq!(report, OutreachReport::default());
    assert!(dispatcher.finder.lookups.lock().unwrap().is_empty());
}

#[tokio::test]
async fn business_without_website_is_skipped_without_lookup() {
    let dispatcher = OutreachDispatcher::new(
        FakeFinder::default(),
        Some(FakeTransport::default()),
        "Hi",
        "Me",
    );

    let report = dispatcher.dispatch(&[business("Nosite", None)]).await;

    assert_eq!(report.success, 0);
    assert_eq!(report.failed, 0);
    assert_eq!(
        report.details,
        vec![OutreachResult::skipped("Nosite", SKIP_REASON_NO_EMAIL)]
    );
    assert!(dispatcher.finder.lookups.lock().unwrap().is_empty());
}

#[tokio::test]
async fn mixed_batch_records_sent_skipped_and_failed_in_order() {
    let finder = FakeFinder::default()
        .with("https://ada.com.tr", "info@ada.com.tr")
        .with("https://bora.com.tr", "bad@bora.com.tr");
    let transport = FakeTransport {
        reject: HashSet::from(["bad@bora.com.tr".to_owned()]),
        ..FakeTransport::default()
    };
    let dispatcher = OutreachDispatcher::new(finder, Some(transport), "Business Inquiry", "Kerem");

    let report = dispatcher
        .dispatch(&[
            business("Ada", Some("https://ada.com.tr")),
            business("Quiet", Some("https://quiet.com.tr")),
            business("Bora", Some("https://bora.com.tr")),
        ])
        .await;

    assert_eq!(report.success, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(report.skipped(), 1);
    assert_eq!(report.details[0], OutreachResult::sent("Ada", "info@ada.com.tr"));
    assert_eq!(
        report.details[1],
        OutreachResult::skipped("Quiet", SKIP_REASON_NO_EMAIL)
    );
    assert_eq!(report.details[2].company, "Bora");
    assert!(
        matches!(&report.details[2].outcome, OutreachOutcome::Failed { error } if error.contains("rejected")),
        "got: {:?}",
        report.details[2]
    );

    let sent = dispatcher.transport.as_ref().unwrap().sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    let (to, subject, body) = &sent[0];
    assert_eq!(to, "info@ada.com.tr");
    assert_eq!(subject, "Business Inquiry");
    assert!(body.starts_with("Dear Ada Team,"));
    assert!(body.ends_with("Kerem"));
}

/// Every page times out.
struct TimeoutFetcher;

#[async_trait]
impl PageFetcher for TimeoutFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        Err(FetchError::Timeout {
            url: url.to_owned(),
        })
    }
}

#[tokio::test]
async fn website_timeout_is_skipped_and_loop_continues() {
    let scraper = WebsiteEmailScraper::new(TimeoutFetcher)
        .with_paths(["", "/contact"])
        .with_pacing(CrawlPacing::none());
    let dispatcher = OutreachDispatcher::new(scraper, Some(FakeTransport::default()), "Hi", "Me");

    let report = dispatcher
        .dispatch(&[
            business("Slow One", Some("https://slow-one.com.tr")),
            business("Slow Two", Some("https://slow-two.com.tr")),
        ])
        .await;

    assert_eq!(report.details.len(), 2);
    assert_eq!(report.skipped(), 2);
    assert_eq!(report.success, 0);
    assert_eq!(report.failed, 0);
}
