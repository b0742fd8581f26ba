//! Plain-text outreach message.

use prospect_core::Business;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutreachMessage {
    pub subject: String,
    pub body: String,
}

/// Renders the inquiry message for `business`. Phone and website lines are
/// omitted when the business has none.
#[must_use]
pub fn render_message(business: &Business, subject: &str, from_name: &str) -> OutreachMessage {
    let mut details = vec![
        format!("- Name: {}", business.name),
        format!("- Address: {}", business.display_address()),
    ];
    if let Some(phone) = business.phone.as_deref() {
        details.push(format!("- Phone: {phone}"));
    }
    if let Some(website) = business.website.as_deref() {
        details.push(format!("- Website: {website}"));
    }

    let body = format!(
        "Dear {name} Team,\n\
         \n\
         I hope this message finds you well.\n\
         \n\
         I am reaching out to explore potential business opportunities with your esteemed textile company.\n\
         \n\
         We would be interested in learning more about your products and services.\n\
         \n\
         Company Details:\n\
         {details}\n\
         \n\
         We look forward to the possibility of working together.\n\
         \n\
         Best regards,\n\
         {from_name}",
        name = business.name,
        details = details.join("\n"),
    );

    OutreachMessage {
        subject: subject.to_owned(),
        body,
    }
}

#[cfg(test)]
mod tests {
    use prospect_core::{BusinessStatus, Coordinate};

    use super::*;

    fn business() -> Business {
        Business {
            place_id: "p1".to_owned(),
            name: "Ada Tekstil".to_owned(),
            address: "Merter".to_owned(),
            formatted_address: Some("Merter Mah. 1, Güngören/İstanbul".to_owned()),
            location: Coordinate {
                lat: 41.0,
                lng: 28.9,
            },
            rating: Some(4.5),
            user_ratings_total: 20,
            business_status: BusinessStatus::Operational,
            types: Vec::new(),
            phone: Some("0212 555 00 00".to_owned()),
            website: Some("https://ada.com.tr".to_owned()),
            opening_hours: None,
        }
    }

    #[test]
    fn full_message_lists_all_details() {
        let msg = render_message(&business(), "Business Inquiry", "Kerem Yılmaz");
        assert_eq!(msg.subject, "Business Inquiry");
        assert!(msg.body.starts_with("Dear Ada Tekstil Team,\n\nI hope"));
        assert!(msg.body.contains(
            "Company Details:\n\
             - Name: Ada Tekstil\n\
             - Address: Merter Mah. 1, Güngören/İstanbul\n\
             - Phone: 0212 555 00 00\n\
             - Website: https://ada.com.tr\n\n"
        ));
        assert!(msg.body.ends_with("Best regards,\nKerem Yılmaz"));
    }

    #[test]
    fn falls_back_to_short_address_and_omits_missing_lines() {
        let mut b = business();
        b.formatted_address = None;
        b.phone = None;
        b.website = None;
        let msg = render_message(&b, "Hello", "Sourcing");
        assert!(msg.body.contains("- Address: Merter\n\nWe look forward"));
        assert!(!msg.body.contains("- Phone:"));
        assert!(!msg.body.contains("- Website:"));
    }
}
