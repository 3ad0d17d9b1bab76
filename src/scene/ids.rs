use std::sync::atomic::{AtomicU64, Ordering};

/// Generates unique, human-readable ids such as `layer-1718000000000-3`.
#[derive(Debug, Default)]
pub struct IdGenerator {
    counter: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self, prefix: &str) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{}-{}", prefix, chrono::Utc::now().timestamp_millis(), n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_and_prefixed() {
        let ids = IdGenerator::new();
        let a = ids.next_id("entry");
        let b = ids.next_id("entry");
        assert_ne!(a, b);
        assert!(a.starts_with("entry-"));
        assert!(b.ends_with("-2"));
    }
}
