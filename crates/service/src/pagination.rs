//! Result-size cap for list endpoints.

/// Requested list size combined with the configured upper bound.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListLimit {
    /// what the caller asked for; `None` means "everything"
    pub requested: Option<usize>,
    /// configured maximum, if any
    pub cap: Option<usize>,
}

impl ListLimit {
    /// Number of records to return, or `None` for all of them.
    pub fn effective(self) -> Option<usize> {
        match (self.requested, self.cap) {
            (Some(r), Some(c)) => Some(r.min(c)),
            (r, c) => r.or(c),
        }
    }

    pub fn apply<T>(self, mut records: Vec<T>) -> Vec<T> {
        if let Some(n) = self.effective() {
            records.truncate(n);
        }
        records
    }
}
