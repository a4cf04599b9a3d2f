use std::collections::HashSet;

/// Allow-list of principals whose messages are applied.
///
/// The trust boundary of the whole bridge: anything from an unlisted
/// principal is dropped before it can touch state. Injected into the
/// endpoint so the boundary is testable without any transport.
#[derive(Debug, Clone, Default)]
pub struct OriginValidator {
    allowed: HashSet<String>,
}

impl OriginValidator {
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    pub fn allow(&mut self, principal: impl Into<String>) {
        self.allowed.insert(principal.into());
    }

    pub fn is_trusted(&self, principal: &str) -> bool {
        self.allowed.contains(principal)
    }
}
