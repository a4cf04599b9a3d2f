use std::fmt;

use serde::{Deserialize, Serialize};
use triage_types::{DatasetKey, TicketId};

/// Storage lifetime class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Cleared when the surface's session ends.
    Ephemeral,
    /// Survives reloads.
    Durable,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Ephemeral => "ephemeral",
            Tier::Durable => "durable",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Composite key identifying one cache record: ticket + dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace {
    pub ticket_id: TicketId,
    pub dataset: DatasetKey,
}

impl Namespace {
    pub fn new(ticket_id: TicketId, dataset: DatasetKey) -> Self {
        Self { ticket_id, dataset }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ticket_id, self.dataset.canonical_name())
    }
}

/// Key prefix for the current naming scheme.
pub const KEY_PREFIX: &str = "triage:";

/// Prefix of the naming scheme before the schema bump. Swept on migration.
pub const LEGACY_PREFIX: &str = "assist:";

/// Historical alternate spellings of canonical dataset keys. The mapping is a
/// bijection: every canonical key has at most one alias and vice versa.
const ALIAS_PAIRS: &[(&str, &str)] = &[("summary.timeline", "summary.chronological")];

/// Resolve an alias spelling to its canonical key. Canonical keys (and keys
/// with no alias) map to themselves.
pub fn to_canonical(key: &str) -> &str {
    for (canonical, alias) in ALIAS_PAIRS {
        if key == *alias {
            return canonical;
        }
    }
    key
}

/// Resolve a canonical key to its historical alias spelling, when one exists.
pub fn to_alias(key: &str) -> &str {
    for (canonical, alias) in ALIAS_PAIRS {
        if key == *canonical {
            return alias;
        }
    }
    key
}

/// Physical storage key: `<prefix><tier>:<ticketId>:<datasetKey>`.
pub fn physical_key(prefix: &str, tier: Tier, namespace: &Namespace) -> String {
    format!(
        "{}{}:{}:{}",
        prefix,
        tier,
        namespace.ticket_id,
        namespace.dataset.canonical_name()
    )
}

/// Global key holding the schema-version marker.
pub fn marker_key(prefix: &str) -> String {
    format!("{}schema", prefix)
}

/// Whether a physical key was written under a legacy naming scheme: the old
/// prefix, or a current-prefix key whose dataset segment uses an alias
/// spelling.
pub fn is_legacy_key(prefix: &str, key: &str) -> bool {
    if key.starts_with(LEGACY_PREFIX) {
        return true;
    }
    if let Some(rest) = key.strip_prefix(prefix) {
        if let Some(dataset_segment) = rest.rsplit(':').next() {
            return ALIAS_PAIRS.iter().any(|(_, alias)| dataset_segment == *alias);
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_types::SummaryKind;

    #[test]
    fn test_alias_bijection() {
        // Canonical -> alias -> canonical.
        for (canonical, alias) in ALIAS_PAIRS {
            assert_eq!(to_canonical(to_alias(canonical)), *canonical);
            assert_eq!(to_alias(to_canonical(alias)), *alias);
        }

        // Keys without an alias map to themselves both ways.
        assert_eq!(to_canonical("related.tickets"), "related.tickets");
        assert_eq!(to_alias("related.tickets"), "related.tickets");
    }

    #[test]
    fn test_physical_key_layout() {
        let ns = Namespace::new(
            TicketId::from("T-42"),
            DatasetKey::Summary(SummaryKind::Concise),
        );
        assert_eq!(
            physical_key(KEY_PREFIX, Tier::Durable, &ns),
            "triage:durable:T-42:summary.concise"
        );
        assert_eq!(
            physical_key(KEY_PREFIX, Tier::Ephemeral, &ns),
            "triage:ephemeral:T-42:summary.concise"
        );
    }

    #[test]
    fn test_legacy_detection() {
        assert!(is_legacy_key(KEY_PREFIX, "assist:durable:T-1:summary.concise"));
        assert!(is_legacy_key(
            KEY_PREFIX,
            "triage:durable:T-1:summary.chronological"
        ));
        assert!(!is_legacy_key(
            KEY_PREFIX,
            "triage:durable:T-1:summary.timeline"
        ));
        assert!(!is_legacy_key(KEY_PREFIX, "triage:schema"));
    }
}
