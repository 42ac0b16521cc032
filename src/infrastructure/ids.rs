//! 记录 ID 生成

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::IdStrategy;

pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// 毫秒时间戳 ID，与旧数据文件中的 ID 格式一致
///
/// 同一毫秒内连续调用时顺延到上一个值加一，进程内严格递增。
#[derive(Debug, Default)]
pub struct TimestampIds {
    last: AtomicU64,
}

impl TimestampIds {
    pub fn new() -> Self {
        Self::default()
    }

    fn now_millis() -> u64 {
        chrono::Utc::now().timestamp_millis().max(0) as u64
    }
}

impl IdGenerator for TimestampIds {
    fn next_id(&self) -> String {
        let now = Self::now_millis();
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let next = now.max(prev + 1);
            match self
                .last
                .compare_exchange_weak(prev, next, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return next.to_string(),
                Err(actual) => prev = actual,
            }
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

pub fn id_generator(strategy: IdStrategy) -> Arc<dyn IdGenerator> {
    match strategy {
        IdStrategy::Timestamp => Arc::new(TimestampIds::new()),
        IdStrategy::Uuid => Arc::new(UuidIds),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn test_timestamp_ids_are_strictly_increasing() {
        let ids = TimestampIds::new();
        let values: Vec<u64> = (0..1000).map(|_| ids.next_id().parse().unwrap()).collect();

        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_timestamp_ids_unique_across_threads() {
        let ids = Arc::new(TimestampIds::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ids = Arc::clone(&ids);
                thread::spawn(move || (0..500).map(|_| ids.next_id()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id));
            }
        }
        assert_eq!(seen.len(), 2000);
    }

    #[test]
    fn test_uuid_ids() {
        let ids = id_generator(IdStrategy::Uuid);
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a).is_ok());
    }
}
