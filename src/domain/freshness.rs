use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::domain::{CheckpointAnnouncement, CheckpointStatus};

/// Decides whether a pending-details announcement is still worth showing
/// on the public checkpoint list.
///
/// Confirmed and cancelled records always report fresh here; their public
/// visibility is decided by the listing service, not by recency. For
/// pending records the rules are, in order:
///
/// 1. event happens today, in the future, or within the last 24 hours
/// 2. same check against the precise start time, when the source gave one
/// 3. the source announced it within the last 14 days
/// 4. only when the source gave no announcement date at all: the record
///    was ingested within the last 14 days
///
/// A stale `announcement_date` is never rescued by a recent `created_at`;
/// re-importing an old announcement must not resurrect it.
///
/// `now` is always supplied by the caller so one listing pass evaluates
/// every record against the same instant.
pub fn is_fresh_for_public(announcement: &CheckpointAnnouncement, now: DateTime<Utc>) -> bool {
    if announcement.status != CheckpointStatus::PendingDetails {
        return true;
    }

    let one_day_ago = now - Duration::hours(24);
    let fourteen_days_ago = now - Duration::days(14);

    if let Some(event) = announcement.event_date.as_deref().and_then(parse_event_date) {
        if event >= one_day_ago {
            return true;
        }
    }

    if let Some(start) = parse_timestamp(announcement.start_date.as_deref()) {
        if start >= one_day_ago {
            return true;
        }
    }

    match parse_timestamp(announcement.announcement_date.as_deref()) {
        Some(announced) => announced >= fourteen_days_ago,
        None => announcement.created_at >= fourteen_days_ago,
    }
}

/// Strict `YYYY-MM-DD`, interpreted at UTC midnight. Anything else — wrong
/// shape, out-of-range components, free text — is "no date", not an error.
pub(crate) fn parse_event_date(raw: &str) -> Option<DateTime<Utc>> {
    let bytes = raw.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !digits_ok {
        return None;
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn pending(now: DateTime<Utc>) -> CheckpointAnnouncement {
        CheckpointAnnouncement {
            id: Uuid::new_v4(),
            title: "OVI checkpoint announced".to_string(),
            county: Some("Franklin".to_string()),
            location_name: None,
            address: None,
            latitude: None,
            longitude: None,
            status: CheckpointStatus::PendingDetails,
            event_date: None,
            start_date: None,
            end_date: None,
            announcement_date: None,
            source_url: None,
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-06-15T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn non_pending_statuses_are_always_fresh() {
        let now = now();
        for status in [CheckpointStatus::Confirmed, CheckpointStatus::Cancelled] {
            let mut a = pending(now - Duration::days(400));
            a.status = status;
            a.event_date = Some("2001-01-01".to_string());
            a.announcement_date = Some("2001-01-01T00:00:00Z".to_string());
            assert!(is_fresh_for_public(&a, now));
        }
    }

    #[test]
    fn future_event_date_is_fresh() {
        let mut a = pending(now());
        a.event_date = Some("2030-01-01".to_string());
        assert!(is_fresh_for_public(&a, now()));

        // Still fresh up to 24 hours past the event's UTC midnight.
        let boundary = DateTime::parse_from_rfc3339("2030-01-02T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert!(is_fresh_for_public(&a, boundary));
        assert!(!is_fresh_for_public(&a, boundary + Duration::seconds(1)));
    }

    #[test]
    fn recent_start_date_is_fresh_when_event_date_missing() {
        let now = now();
        let mut a = pending(now - Duration::days(60));
        a.announcement_date = Some((now - Duration::days(60)).to_rfc3339());
        a.start_date = Some((now - Duration::hours(3)).to_rfc3339());
        assert!(is_fresh_for_public(&a, now));
    }

    #[test]
    fn created_at_fallback_applies_without_announcement_date() {
        let now = now();
        let mut a = pending(now - Duration::hours(1));
        a.announcement_date = None;
        assert!(is_fresh_for_public(&a, now));

        a.created_at = now - Duration::days(15);
        assert!(!is_fresh_for_public(&a, now));
    }

    #[test]
    fn stale_announcement_date_is_not_rescued_by_recent_created_at() {
        let now = now();
        let mut a = pending(now - Duration::hours(1));
        a.announcement_date = Some((now - Duration::days(20)).to_rfc3339());
        assert!(!is_fresh_for_public(&a, now));
    }

    #[test]
    fn malformed_event_date_falls_through_to_announcement_date() {
        let now = now();
        let mut a = pending(now - Duration::days(60));
        a.event_date = Some("not-a-date".to_string());
        a.announcement_date = Some((now - Duration::days(10)).to_rfc3339());
        assert!(is_fresh_for_public(&a, now));
    }

    #[test]
    fn announcement_date_boundary_is_inclusive() {
        let now = now();
        let mut a = pending(now - Duration::days(60));

        a.announcement_date = Some((now - Duration::days(14)).to_rfc3339());
        assert!(is_fresh_for_public(&a, now));

        a.announcement_date = Some((now - Duration::days(14) - Duration::seconds(1)).to_rfc3339());
        assert!(!is_fresh_for_public(&a, now));
    }

    #[test]
    fn event_date_parsing_is_strict() {
        assert!(parse_event_date("2025-06-15").is_some());
        assert!(parse_event_date("2025-6-15").is_none());
        assert!(parse_event_date("06/15/2025").is_none());
        assert!(parse_event_date("2025-13-40").is_none());
        assert!(parse_event_date("2025-06-15T00:00:00Z").is_none());
        assert!(parse_event_date("").is_none());
        assert!(parse_event_date("soon").is_none());
    }

    #[test]
    fn invalid_timestamps_are_treated_as_absent() {
        let now = now();
        let mut a = pending(now - Duration::hours(2));
        a.start_date = Some("next friday".to_string());
        a.announcement_date = Some("".to_string());
        // Both signals unusable, so the created_at fallback decides.
        assert!(is_fresh_for_public(&a, now));
    }
}
