use chrono::NaiveDate;
use uuid::Uuid;

use crate::repo::Repository;
use crate::schedule::MeetingSchedule;

/// Collect every assignment the member already holds on the given date,
/// across all categories, as display-ready labels.
///
/// Each source is queried independently; one failing source is logged and
/// contributes nothing, the rest still report. Under-reporting a conflict is
/// worse than a missing source, so this never aborts. Duplicates across
/// sources are left to the caller (see [`dedup_labels`]).
pub async fn scan_conflicts(repo: &dyn Repository, date: NaiveDate, member: Uuid) -> Vec<String> {
    let (support, schedule, field_service) = tokio::join!(
        repo.support_for(date),
        repo.schedule_for(date),
        repo.field_service_for(date),
    );

    let mut labels = Vec::new();

    match support {
        Ok(items) => {
            for item in items.iter().filter(|s| s.member == member) {
                labels.push(item.function.to_string());
            }
        }
        Err(e) => tracing::warn!(date = %date, error = %e, "Support conflict source failed"),
    }

    match schedule {
        Ok(Some(schedule)) => labels.extend(schedule_conflicts(&schedule, member)),
        Ok(None) => {}
        Err(e) => tracing::warn!(date = %date, error = %e, "Schedule conflict source failed"),
    }

    match field_service {
        Ok(Some(fs)) if fs.director == member => {
            labels.push("Field service director".to_string());
        }
        Ok(_) => {}
        Err(e) => {
            tracing::warn!(date = %date, error = %e, "Field service conflict source failed")
        }
    }

    labels
}

/// Pure in-memory variant over one schedule, used both by [`scan_conflicts`]
/// and by callers checking an edited-but-unsaved schedule.
pub fn schedule_conflicts(schedule: &MeetingSchedule, member: Uuid) -> Vec<String> {
    let mut labels = Vec::new();
    if schedule.chairman.member == Some(member) {
        labels.push("Chairman".to_string());
    }
    if schedule.opening_prayer.member == Some(member) {
        labels.push("Opening prayer".to_string());
    }
    if schedule.closing_prayer.member == Some(member) {
        labels.push("Closing prayer".to_string());
    }
    for part in &schedule.parts {
        if part.member == Some(member) {
            labels.push(format!("Part: {}", part.name));
        }
        if part.assistant == Some(member) {
            labels.push(format!("Assistant: {}", part.name));
        }
    }
    labels
}

/// Order-preserving de-duplication of merged conflict lists.
pub fn dedup_labels(labels: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    labels.into_iter().filter(|l| seen.insert(l.clone())).collect()
}
