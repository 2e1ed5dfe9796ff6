//! Fixed-delay pacing between successive calls to one backend.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Sleeps so that consecutive [`Pacer::wait`] calls are at least `delay` apart.
#[derive(Debug)]
pub struct Pacer {
    delay: Duration,
    last: Option<Instant>,
}

impl Pacer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, last: None }
    }

    /// Block until the delay since the previous call has elapsed.
    /// The first call never waits.
    pub fn wait(&mut self) {
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.delay {
                std::thread::sleep(self.delay - elapsed);
            }
        }
        self.last = Some(Instant::now());
    }
}

/// One [`Pacer`] per backend key, shared by every stage of a run.
///
/// Ports that report the same `backend()` draw from the same pacer, so a
/// service answering several lookups sees one evenly spaced call stream.
#[derive(Debug)]
pub struct Pacers {
    delay: Duration,
    by_backend: HashMap<String, Pacer>,
}

impl Pacers {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            by_backend: HashMap::new(),
        }
    }

    /// Block until `backend` may be called again.
    pub fn wait(&mut self, backend: &str) {
        let delay = self.delay;
        self.by_backend
            .entry(backend.to_string())
            .or_insert_with(|| Pacer::new(delay))
            .wait();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_call_does_not_wait() {
        let mut pacer = Pacer::new(Duration::from_secs(5));
        let start = Instant::now();
        pacer.wait();
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn consecutive_calls_are_spaced() {
        let mut pacer = Pacer::new(Duration::from_millis(30));
        let start = Instant::now();
        pacer.wait();
        pacer.wait();
        pacer.wait();
        assert!(start.elapsed() >= Duration::from_millis(60));
    }

    #[test]
    fn backends_are_paced_independently() {
        let mut pacers = Pacers::new(Duration::from_secs(5));
        let start = Instant::now();
        pacers.wait("keyword-tool");
        pacers.wait("naver-blog");
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn same_backend_shares_one_pacer() {
        let mut pacers = Pacers::new(Duration::from_millis(40));
        let start = Instant::now();
        pacers.wait("keyword-tool");
        pacers.wait("naver-blog");
        pacers.wait("keyword-tool");
        assert!(start.elapsed() >= Duration::from_millis(40));
    }
}
