/// Allocates unique member ids of the form `member-<n>`.
///
/// Owned by the editing session, not module-global, so independent trees and
/// tests never share counter state.
#[derive(Clone, Debug, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        IdAllocator { next: 0 }
    }

    pub fn next_id(&mut self) -> String {
        let id = format!("member-{}", self.next);
        self.next += 1;
        id
    }

    pub fn reset(&mut self, next: u64) {
        self.next = next;
    }

    /// Re-derive the counter from existing ids: max numeric suffix + 1.
    ///
    /// Ids that are not exactly `member-<integer>` are ignored. The floor is
    /// 0, so an empty or non-matching scan lands on 1 — the next free id
    /// after the implicit `member-0`.
    pub fn resync<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let max = ids
            .into_iter()
            .filter_map(|id| member_suffix(id.as_ref()))
            .fold(0u64, u64::max);
        self.next = max + 1;
    }
}

fn member_suffix(id: &str) -> Option<u64> {
    id.strip_prefix("member-")?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::member_suffix;

    #[test]
    fn suffix_requires_full_integer() {
        assert_eq!(member_suffix("member-12"), Some(12));
        assert_eq!(member_suffix("member-12b"), None);
        assert_eq!(member_suffix("member--3"), None);
        assert_eq!(member_suffix("other"), None);
    }
}
