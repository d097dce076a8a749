//! Authority Interpreter: first-match scan over a zone's records.
//!
//! Record order is priority. The scan is an explicit ordered walk with a
//! single early-exit rule; once a directive is selected, every remaining
//! record is ignored.

use tracing::debug;

use crate::zone::{AuthorityRecord, TxtEntry, Zone};

/// TXT entry prefix whose rest is a full redirect target.
pub const PATH_PREFIX: &str = ":path:";
/// TXT entry prefix whose rest is a directory-style target.
pub const PKAR_PREFIX: &str = ":pkar:";

/// Select the first actionable directive in a zone.
///
/// An `A` record is actionable as-is: its target wins immediately. A `TXT`
/// record is actionable if one of its entries carries a `:path:` or `:pkar:`
/// prefix; within one record the first `:path:` entry takes precedence over
/// any `:pkar:` entry. Prefix matching is case-sensitive and exact.
///
/// Returns `None` when no record in the whole sequence is actionable — a
/// zone that resolved but carries no directive, which is not the same as a
/// missing zone. Unrecognized or non-text entries are logged and skipped;
/// they never abort interpretation of the remaining records.
pub fn interpret(zone: &Zone) -> Option<String> {
    for record in &zone.authorities {
        match record {
            AuthorityRecord::A { name, address } => {
                debug!(space = %name, target = %address, "A record selected");
                return Some(address.clone());
            }
            AuthorityRecord::Txt { name, entries } => {
                if let Some(target) = interpret_txt(name, entries) {
                    return Some(target);
                }
            }
        }
    }
    None
}

/// Scan one TXT record's entries in order for a directive.
fn interpret_txt(name: &str, entries: &[TxtEntry]) -> Option<String> {
    let mut pkar: Option<String> = None;

    for entry in entries {
        let text = match entry {
            TxtEntry::Text(text) => text,
            TxtEntry::Other(value) => {
                debug!(space = %name, entry = %value, "skipping non-text TXT entry");
                continue;
            }
        };

        if let Some(rest) = text.strip_prefix(PATH_PREFIX) {
            debug!(space = %name, target = %rest, "TXT :path: entry selected");
            return Some(rest.to_string());
        }
        if let Some(rest) = text.strip_prefix(PKAR_PREFIX) {
            if pkar.is_none() {
                pkar = Some(directory_target(rest));
            }
        } else {
            debug!(space = %name, entry = %text, "TXT entry carries no directive");
        }
    }

    if let Some(target) = &pkar {
        debug!(space = %name, target = %target, "TXT :pkar: entry selected");
    }
    pkar
}

/// Append the trailing path separator exactly once.
fn directory_target(rest: &str) -> String {
    if rest.ends_with('/') {
        rest.to_string()
    } else {
        format!("{rest}/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a(address: &str) -> AuthorityRecord {
        AuthorityRecord::A {
            name: "@test".to_string(),
            address: address.to_string(),
        }
    }

    fn txt(entries: &[&str]) -> AuthorityRecord {
        AuthorityRecord::Txt {
            name: "@test".to_string(),
            entries: entries
                .iter()
                .map(|e| TxtEntry::Text(e.to_string()))
                .collect(),
        }
    }

    fn zone(authorities: Vec<AuthorityRecord>) -> Zone {
        Zone { authorities }
    }

    #[test]
    fn empty_zone_yields_no_directive() {
        assert_eq!(interpret(&zone(vec![])), None);
    }

    #[test]
    fn first_a_record_wins() {
        let z = zone(vec![a("10.0.0.5"), a("10.0.0.6")]);
        assert_eq!(interpret(&z), Some("10.0.0.5".to_string()));
    }

    #[test]
    fn a_record_wins_after_inert_txt() {
        let z = zone(vec![txt(&["hello"]), a("10.0.0.5")]);
        assert_eq!(interpret(&z), Some("10.0.0.5".to_string()));
    }

    #[test]
    fn path_entry_yields_rest_verbatim() {
        let z = zone(vec![txt(&[":path:http://10.0.0.1"])]);
        assert_eq!(interpret(&z), Some("http://10.0.0.1".to_string()));
    }

    #[test]
    fn records_after_the_selected_one_are_ignored() {
        // The actionable record at index 1 wins regardless of what follows.
        let z = zone(vec![
            txt(&["nothing"]),
            txt(&[":path:first"]),
            a("10.0.0.9"),
            txt(&[":path:second"]),
        ]);
        assert_eq!(interpret(&z), Some("first".to_string()));

        let z = zone(vec![
            txt(&["nothing"]),
            a("10.0.0.9"),
            txt(&[":path:late"]),
        ]);
        assert_eq!(interpret(&z), Some("10.0.0.9".to_string()));
    }

    #[test]
    fn path_takes_precedence_over_earlier_pkar_in_same_record() {
        let z = zone(vec![txt(&[":pkar:dir", ":path:exact"])]);
        assert_eq!(interpret(&z), Some("exact".to_string()));
    }

    #[test]
    fn pkar_appends_separator_exactly_once() {
        let z = zone(vec![txt(&[":pkar:foo"])]);
        assert_eq!(interpret(&z), Some("foo/".to_string()));

        let z = zone(vec![txt(&[":pkar:foo/"])]);
        assert_eq!(interpret(&z), Some("foo/".to_string()));
    }

    #[test]
    fn prefix_matching_is_case_sensitive_and_exact() {
        assert_eq!(interpret(&zone(vec![txt(&[":PATH:x"])])), None);
        assert_eq!(interpret(&zone(vec![txt(&[":Pkar:x"])])), None);
        assert_eq!(interpret(&zone(vec![txt(&[":path"])])), None);
        assert_eq!(interpret(&zone(vec![txt(&["path:x"])])), None);
    }

    #[test]
    fn non_text_entries_are_skipped_without_effect() {
        let record = AuthorityRecord::Txt {
            name: "@test".to_string(),
            entries: vec![
                TxtEntry::Other(serde_json::json!({"type": "Buffer", "data": [1, 2]})),
                TxtEntry::Other(serde_json::json!(42)),
                TxtEntry::Text(":path:target".to_string()),
            ],
        };
        assert_eq!(
            interpret(&zone(vec![record])),
            Some("target".to_string())
        );
    }

    #[test]
    fn zone_with_only_inert_records_yields_none() {
        let z = zone(vec![txt(&["hello", "world"]), txt(&["no directive here"])]);
        assert_eq!(interpret(&z), None);
    }
}
