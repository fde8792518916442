use crate::domain::Lead;
use crate::email::links::{escape_html, HelpfulLink};

/// Builders for the two intake emails. Markup is assembled by hand, one
/// element per line; visitor-supplied fields go through `escape_html`,
/// while `HelpfulLink` values are spliced verbatim because the
/// recommender already escaped them.

pub fn confirmation_subject() -> String {
    "We received your message — Mango Law".to_string()
}

pub fn confirmation_html(name: &str, links: &[HelpfulLink]) -> String {
    let mut html = String::from("<html><body>\n");
    html.push_str(&format!("<p>Hi {},</p>\n", escape_html(name)));
    html.push_str(
        "<p>Thank you for contacting Mango Law. An attorney reviews every \
         message personally, and we will follow up as soon as possible — \
         usually within one business day.</p>\n",
    );
    html.push_str(
        "<p>If this is urgent (you or a family member is in custody, or you \
         have a court date within 48 hours), please call our office line \
         instead of waiting for a reply.</p>\n",
    );

    if !links.is_empty() {
        html.push_str("<p>In the meantime, these may help:</p>\n<ul>\n");
        for link in links {
            html.push_str(&format!(
                "    <li><a href=\"{}\">{}</a></li>\n",
                link.href, link.label
            ));
        }
        html.push_str("</ul>\n");
    }

    html.push_str("<p>— Mango Law</p>\n</body></html>\n");
    html
}

pub fn confirmation_text(name: &str, links: &[HelpfulLink]) -> String {
    let mut text = format!(
        "Hi {},\n\nThank you for contacting Mango Law. An attorney reviews \
         every message personally, and we will follow up as soon as \
         possible — usually within one business day.\n\nIf this is urgent, \
         please call our office line instead of waiting for a reply.\n",
        name
    );

    if !links.is_empty() {
        text.push_str("\nIn the meantime, these may help:\n");
        for link in links {
            text.push_str(&format!("  - {}: {}\n", link.label, link.href));
        }
    }

    text.push_str("\n— Mango Law\n");
    text
}

pub fn notification_subject(lead: &Lead) -> String {
    format!("New website lead: {}", lead.name)
}

pub fn notification_html(lead: &Lead) -> String {
    let mut html = String::from("<html><body>\n<h2>New website lead</h2>\n<table>\n");

    let mut row = |label: &str, value: &str| {
        html.push_str(&format!(
            "    <tr><td><b>{}</b></td><td>{}</td></tr>\n",
            label,
            escape_html(value)
        ));
    };

    row("Name", &lead.name);
    row("Channel", &format!("{:?}", lead.channel));
    if let Some(email) = &lead.email {
        row("Email", email);
    }
    if let Some(phone) = &lead.phone {
        row("Phone", phone);
    }
    if let Some(case_type) = &lead.case_type {
        row("Case type", case_type);
    }
    if let Some(urgency) = &lead.urgency {
        row("Urgency", urgency);
    }
    if let Some(county) = &lead.county {
        row("County", county);
    }
    if let Some(source) = &lead.lead_source {
        row("Source", source);
    }
    if let Some(checkpoint_id) = &lead.checkpoint_id {
        row("Checkpoint", checkpoint_id);
    }

    html.push_str("</table>\n");
    html.push_str(&format!("<p>{}</p>\n", escape_html(&lead.message)));
    html.push_str("</body></html>\n");
    html
}

pub fn notification_text(lead: &Lead) -> String {
    let mut text = String::from("New website lead\n\n");
    text.push_str(&format!("Name: {}\n", lead.name));
    text.push_str(&format!("Channel: {:?}\n", lead.channel));
    if let Some(email) = &lead.email {
        text.push_str(&format!("Email: {}\n", email));
    }
    if let Some(phone) = &lead.phone {
        text.push_str(&format!("Phone: {}\n", phone));
    }
    if let Some(case_type) = &lead.case_type {
        text.push_str(&format!("Case type: {}\n", case_type));
    }
    if let Some(urgency) = &lead.urgency {
        text.push_str(&format!("Urgency: {}\n", urgency));
    }
    if let Some(county) = &lead.county {
        text.push_str(&format!("County: {}\n", county));
    }
    if let Some(source) = &lead.lead_source {
        text.push_str(&format!("Source: {}\n", source));
    }
    if let Some(checkpoint_id) = &lead.checkpoint_id {
        text.push_str(&format!("Checkpoint: {}\n", checkpoint_id));
    }
    text.push_str(&format!("\n{}\n", lead.message));
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LeadChannel, LeadStatus};
    use chrono::Utc;
    use uuid::Uuid;

    fn lead() -> Lead {
        Lead {
            id: Uuid::new_v4(),
            channel: LeadChannel::ContactForm,
            name: "Pat <script>".to_string(),
            email: Some("pat@example.com".to_string()),
            phone: None,
            message: "Arrested for OVI & scared".to_string(),
            lead_source: None,
            case_type: None,
            urgency: None,
            county: None,
            checkpoint_id: None,
            status: LeadStatus::New,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn confirmation_escapes_visitor_name() {
        let html = confirmation_html("Pat <script>", &[]);
        assert!(html.contains("Pat &lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn confirmation_omits_link_section_when_empty() {
        let html = confirmation_html("Pat", &[]);
        assert!(!html.contains("<ul>"));
        let text = confirmation_text("Pat", &[]);
        assert!(!text.contains("these may help"));
    }

    #[test]
    fn confirmation_splices_links_without_re_escaping() {
        let links = vec![HelpfulLink {
            label: "Bond &amp; Jail Information".to_string(),
            href: "https://mango.law/resources/bond-and-jail".to_string(),
        }];
        let html = confirmation_html("Pat", &links);
        // Escaped once by the recommender, spliced verbatim here.
        assert!(html.contains(">Bond &amp; Jail Information</a>"));
        assert!(!html.contains("&amp;amp;"));
        assert!(html.contains("href=\"https://mango.law/resources/bond-and-jail\""));
    }

    #[test]
    fn notification_escapes_lead_fields() {
        let html = notification_html(&lead());
        assert!(html.contains("Pat &lt;script&gt;"));
        assert!(html.contains("OVI &amp; scared"));
    }
}
