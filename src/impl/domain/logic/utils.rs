use fractic_server_error::ServerError;

use crate::{
    entities::{Attachment, BillingPeriod, Entry, EntryId},
    errors::{DuplicateBillingPeriod, UnsupportedAttachmentType},
};

/// Entries oldest first. The sort is stable, so entries sharing a period keep
/// their input order.
pub(crate) fn chronological(entries: &[Entry]) -> Vec<&Entry> {
    let mut sorted: Vec<&Entry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.period);
    sorted
}

/// Entries newest first.
pub(crate) fn newest_first(mut entries: Vec<Entry>) -> Vec<Entry> {
    entries.sort_by(|a, b| b.period.cmp(&a.period));
    entries
}

pub(crate) fn latest(entries: &[Entry]) -> Option<&Entry> {
    entries.iter().max_by_key(|e| e.period)
}

pub(crate) fn ensure_period_available(
    entries: &[Entry],
    period: BillingPeriod,
    except: Option<&EntryId>,
) -> Result<(), ServerError> {
    let taken = entries
        .iter()
        .any(|e| e.period == period && Some(&e.id) != except);
    if taken {
        return Err(DuplicateBillingPeriod::new(&period.to_string()));
    }
    Ok(())
}

pub(crate) fn ensure_accepted_attachment(
    field: &str,
    attachment: Option<&Attachment>,
) -> Result<(), ServerError> {
    match attachment {
        Some(a) if !a.has_accepted_mime_type() => {
            Err(UnsupportedAttachmentType::new(field, &a.mime_type))
        }
        _ => Ok(()),
    }
}
