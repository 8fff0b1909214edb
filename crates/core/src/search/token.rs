/// Identifies one issued search query. Later queries get larger tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueryToken(u64);

impl QueryToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Issues query tokens and decides which responses may still be applied.
///
/// Invariant: `applied <= issued`. A response is applied only if its token
/// is not older than the last applied one.
#[derive(Debug, Default)]
pub struct TokenSequencer {
    issued: u64,
    applied: u64,
}

impl TokenSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> QueryToken {
        self.issued += 1;
        QueryToken(self.issued)
    }

    /// Record a response for `token`. Returns false when it is stale.
    pub fn accept(&mut self, token: QueryToken) -> bool {
        if token.0 < self.applied {
            return false;
        }
        self.applied = token.0;
        true
    }

    /// Make every outstanding token stale.
    pub fn invalidate(&mut self) {
        self.issued += 1;
        self.applied = self.issued;
    }

    /// Whether an issued query has not been answered yet.
    pub fn has_outstanding(&self) -> bool {
        self.issued > self.applied
    }

    pub fn issued(&self) -> u64 {
        self.issued
    }

    pub fn applied(&self) -> u64 {
        self.applied
    }
}
