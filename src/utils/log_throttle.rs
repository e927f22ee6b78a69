use std::collections::HashMap;
use std::sync::{Mutex, OnceLock, PoisonError};
use std::time::{Duration, Instant};

#[derive(Debug)]
struct Window {
    opened_at: Instant,
    suppressed: u64,
}

static WINDOWS: OnceLock<Mutex<HashMap<&'static str, Window>>> = OnceLock::new();

/// Returns `Some(suppressed_count)` when a log for `key` should be emitted,
/// otherwise `None` and the event is counted against the open window.
///
/// A burst of concurrent 401s all clear the same session; this keeps that
/// burst to one warning plus a count.
pub fn should_emit(key: &'static str, interval: Duration) -> Option<u64> {
    let mut windows = WINDOWS
        .get_or_init(|| Mutex::new(HashMap::new()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    let now = Instant::now();

    let Some(window) = windows.get_mut(key) else {
        windows.insert(
            key,
            Window {
                opened_at: now,
                suppressed: 0,
            },
        );
        return Some(0);
    };
    if now.duration_since(window.opened_at) >= interval {
        let suppressed = std::mem::take(&mut window.suppressed);
        window.opened_at = now;
        Some(suppressed)
    } else {
        window.suppressed += 1;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::should_emit;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn emits_then_suppresses_then_emits_with_count() {
        let key = "test.log_throttle.emits_then_suppresses_then_emits_with_count";
        let interval = Duration::from_millis(20);

        assert_eq!(should_emit(key, interval), Some(0));
        assert_eq!(should_emit(key, interval), None);
        assert_eq!(should_emit(key, interval), None);

        sleep(Duration::from_millis(30));
        assert_eq!(should_emit(key, interval), Some(2));
    }

    #[test]
    fn keys_are_independent() {
        let interval = Duration::from_secs(60);
        assert_eq!(should_emit("test.log_throttle.a", interval), Some(0));
        assert_eq!(should_emit("test.log_throttle.b", interval), Some(0));
        assert_eq!(should_emit("test.log_throttle.a", interval), None);
    }
}
