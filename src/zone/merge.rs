//! Computes the replacement record list for a zone from a change set.

use tracing::debug;

use super::types::{ChangeSet, Record};

/// Merge a change set into the zone's current record list.
///
/// Existing records survive unless a delete entry matches them exactly on
/// (type, name, first target); surviving records keep their original order,
/// and creates are appended in the order given. Deleting one value of a
/// multi-valued record requires a delete entry naming that exact first
/// target. Duplicate creates are not rejected here; accepting or refusing
/// them is the remote store's call.
pub fn merge(existing: Vec<Record>, changes: &ChangeSet) -> Vec<Record> {
    let mut merged = Vec::with_capacity(existing.len() + changes.create.len());

    for rec in existing {
        let matched = changes.delete.iter().find(|del| {
            del.rtype == rec.rtype
                && del.name == rec.name
                && del.first_target() == rec.first_target()
        });
        match matched {
            Some(del) => {
                debug!(name = %del.name, rtype = %del.rtype, "dropping record from zone");
            }
            None => merged.push(rec),
        }
    }

    for rec in &changes.create {
        debug!(name = %rec.name, rtype = %rec.rtype, ttl = rec.ttl, "appending record to zone");
        merged.push(rec.clone());
    }

    merged
}
