use std::collections::{HashSet, VecDeque};
use url::Url;

/// Breadth-first crawl frontier
///
/// A URL enters `visited` at most once and a visited URL is never queued
/// again. The queue itself may hold duplicates of not-yet-visited URLs; they
/// are dropped when popped.
#[derive(Debug, Clone)]
pub struct Frontier {
    visited: HashSet<String>,
    to_visit: VecDeque<(Url, u32)>,
    queue_limit: usize,
}

impl Frontier {
    /// Creates a frontier holding only the seed at depth 0
    pub fn new(seed: Url, queue_limit: usize) -> Self {
        let mut to_visit = VecDeque::new();
        to_visit.push_back((seed, 0));
        Self {
            visited: HashSet::new(),
            to_visit,
            queue_limit,
        }
    }

    /// Takes the oldest queued entry
    pub fn pop(&mut self) -> Option<(Url, u32)> {
        self.to_visit.pop_front()
    }

    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(url.as_str())
    }

    /// Records a URL as visited; returns false if it already was
    pub fn mark_visited(&mut self, url: &Url) -> bool {
        self.visited.insert(url.as_str().to_string())
    }

    /// Queues a URL unless it was visited or the queue is full
    pub fn enqueue(&mut self, url: Url, depth: u32) -> bool {
        if self.is_visited(&url) || self.to_visit.len() >= self.queue_limit {
            return false;
        }
        self.to_visit.push_back((url, depth));
        true
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn queue_len(&self) -> usize {
        self.to_visit.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_visit.is_empty()
    }
}
