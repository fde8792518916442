use std::collections::HashSet;

/// One resource link recommended for an outbound email. Both fields are
/// already HTML-escaped; splice them into markup as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpfulLink {
    pub label: String,
    pub href: String,
}

/// What we know about the inquiry when picking links. Only `message`,
/// `lead_source` and `checkpoint_id` feed the keyword match; the rest is
/// accepted for callers that build this straight from a lead record.
#[derive(Debug, Default)]
pub struct LinkRequest<'a> {
    pub site_url: &'a str,
    pub message: Option<&'a str>,
    pub lead_source: Option<&'a str>,
    pub checkpoint_id: Option<&'a str>,
    pub case_type: Option<&'a str>,
    pub urgency: Option<&'a str>,
    pub county: Option<&'a str>,
}

/// Keyword-trigger rules, applied in this order. Targets starting with
/// `/` are resolved against the site base URL; absolute URLs (statute
/// citations) pass through untouched.
const LINK_RULES: &[(&[&str], &[(&str, &str)])] = &[
    (
        &["ovi", "dui", "drunk", "impaired", "breath", "bac"],
        &[
            ("What to Do After an OVI Arrest", "/guides/ovi-arrest"),
            (
                "Ohio OVI Statute (ORC 4511.19)",
                "https://codes.ohio.gov/ohio-revised-code/section-4511.19",
            ),
            ("Ohio Criminal Statute Glossary", "/resources/statute-glossary"),
        ],
    ),
    (
        &["checkpoint"],
        &[("Ohio DUI Checkpoint Map", "/dui-checkpoints")],
    ),
    (
        &["bond", "bail", "jail"],
        &[("Bond & Jail Information", "/resources/bond-and-jail")],
    ),
    (
        &["protection order", "cpo", "restraining"],
        &[
            ("Protection Order Defense", "/practice-areas/protection-orders"),
            (
                "Ohio Civil Protection Order Statute (ORC 3113.31)",
                "https://codes.ohio.gov/ohio-revised-code/section-3113.31",
            ),
        ],
    ),
    (
        &["drug", "possession", "trafficking"],
        &[("Drug Crimes Defense", "/practice-areas/drug-crimes")],
    ),
    (
        &["sex crime", "rape", "importuning"],
        &[("Sex Crimes Defense", "/practice-areas/sex-crimes")],
    ),
    (
        &["fraud", "embezzle", "white collar"],
        &[("White Collar Crimes Defense", "/practice-areas/white-collar-crimes")],
    ),
];

const MAX_LINKS: usize = 4;

/// Scans the inquiry text for practice-area keywords and returns up to
/// four links worth including in the confirmation email. Deterministic,
/// never fails: no keyword hits means an empty list.
pub fn recommend_helpful_links(request: &LinkRequest) -> Vec<HelpfulLink> {
    let haystack = [
        request.message.unwrap_or(""),
        request.lead_source.unwrap_or(""),
        request.checkpoint_id.unwrap_or(""),
    ]
    .join(" ")
    .to_lowercase();

    let mut seen = HashSet::new();
    let mut picked: Vec<(&str, &str)> = Vec::new();

    for (triggers, entries) in LINK_RULES {
        if !triggers.iter().any(|t| haystack.contains(t)) {
            continue;
        }
        for (label, target) in *entries {
            // Dedup by target, first rule wins.
            if seen.insert(*target) {
                picked.push((label, target));
            }
        }
    }

    picked.truncate(MAX_LINKS);

    picked
        .into_iter()
        .map(|(label, target)| HelpfulLink {
            label: escape_html(label),
            href: escape_html(&resolve_href(request.site_url, target)),
        })
        .collect()
}

fn resolve_href(site_url: &str, target: &str) -> String {
    if target.starts_with("http://") || target.starts_with("https://") {
        return target.to_string();
    }
    let base = site_url.trim_end_matches('/');
    if target.starts_with('/') {
        format!("{base}{target}")
    } else {
        format!("{base}/{target}")
    }
}

/// Minimal HTML entity escaping for text spliced into email markup.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SITE: &str = "https://mango.law";

    fn from_message(message: &str) -> Vec<HelpfulLink> {
        recommend_helpful_links(&LinkRequest {
            site_url: SITE,
            message: Some(message),
            ..Default::default()
        })
    }

    #[test]
    fn ovi_keyword_yields_guide_statute_glossary_in_order() {
        let links = from_message("I was arrested for OVI last night");
        assert_eq!(links.len(), 3);
        assert_eq!(links[0].label, "What to Do After an OVI Arrest");
        assert_eq!(links[0].href, "https://mango.law/guides/ovi-arrest");
        assert_eq!(
            links[1].href,
            "https://codes.ohio.gov/ohio-revised-code/section-4511.19"
        );
        assert_eq!(links[2].href, "https://mango.law/resources/statute-glossary");
    }

    #[test]
    fn matching_is_case_insensitive_across_fields() {
        let links = recommend_helpful_links(&LinkRequest {
            site_url: SITE,
            lead_source: Some("DUI-Checkpoint-Page"),
            ..Default::default()
        });
        // "dui" fires the OVI rule and "checkpoint" fires the map rule,
        // but the cap keeps only the first four.
        assert_eq!(links.len(), 4);
        assert_eq!(links[3].href, "https://mango.law/dui-checkpoints");
    }

    #[test]
    fn rule_order_is_preserved_and_capped_at_four() {
        let links = from_message("ovi checkpoint bond drug fraud");
        assert_eq!(links.len(), 4);
        assert_eq!(links[0].label, "What to Do After an OVI Arrest");
        assert_eq!(links[3].href, "https://mango.law/dui-checkpoints");
    }

    #[test]
    fn multiple_triggers_from_one_rule_fire_it_once() {
        // "dui" and "bac" both belong to the first rule; its entries must
        // not be appended twice.
        let links = from_message("dui and bac test");
        assert_eq!(links.len(), 3);
        let hrefs: Vec<_> = links.iter().map(|l| l.href.as_str()).collect();
        let unique: HashSet<_> = hrefs.iter().collect();
        assert_eq!(hrefs.len(), unique.len());
    }

    #[test]
    fn no_keywords_yields_empty_list() {
        assert!(from_message("I have a question about billing").is_empty());
    }

    #[test]
    fn output_is_always_escaped() {
        let links = recommend_helpful_links(&LinkRequest {
            site_url: "https://mango.law/\"><script>",
            message: Some("ovi"),
            ..Default::default()
        });
        for link in &links {
            for c in ['<', '>', '"', '\''] {
                assert!(!link.label.contains(c), "unescaped {c:?} in label");
                assert!(!link.href.contains(c), "unescaped {c:?} in href");
            }
        }
    }

    #[test]
    fn trailing_slash_on_site_url_does_not_double_slash() {
        let links = recommend_helpful_links(&LinkRequest {
            site_url: "https://mango.law/",
            message: Some("ovi arrest last night"),
            ..Default::default()
        });
        assert_eq!(links[0].href, "https://mango.law/guides/ovi-arrest");
    }

    #[test]
    fn protection_order_phrase_triggers_both_links() {
        let links = from_message("she filed a protection order against me");
        assert_eq!(links.len(), 2);
        assert_eq!(
            links[1].href,
            "https://codes.ohio.gov/ohio-revised-code/section-3113.31"
        );
    }

    #[test]
    fn escape_html_covers_all_five_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">&'"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;"
        );
    }
}
