use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub type JobId = u64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum JobError {
    #[error("Invalid page count: {0} (a job needs at least one page)")]
    InvalidPages(u32),
}

/// Coarse size classification of a job by page count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeTier {
    Small,
    Medium,
    Large,
    VeryLarge,
}

impl SizeTier {
    pub fn from_pages(pages: u32) -> Self {
        match pages {
            0..=10 => SizeTier::Small,
            11..=25 => SizeTier::Medium,
            26..=50 => SizeTier::Large,
            _ => SizeTier::VeryLarge,
        }
    }
}

/// A print job. Immutable once created; moved into exactly one printer queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    id: JobId,
    pages: u32,
}

impl Job {
    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn pages(&self) -> u32 {
        self.pages
    }

    pub fn size_tier(&self) -> SizeTier {
        SizeTier::from_pages(self.pages)
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Job {} ({} Pages)", self.id, self.pages)
    }
}

/// Hands out sequential job ids, starting at 0.
///
/// One factory is owned per simulation run, so repeated runs in the same
/// process each start numbering from zero.
#[derive(Debug, Default)]
pub struct JobFactory {
    next_id: JobId,
}

impl JobFactory {
    pub fn new() -> Self {
        Self { next_id: 0 }
    }

    pub fn create(&mut self, pages: u32) -> Result<Job, JobError> {
        if pages == 0 {
            return Err(JobError::InvalidPages(pages));
        }
        let id = self.next_id;
        self.next_id += 1;
        Ok(Job { id, pages })
    }

    /// Number of jobs created so far.
    pub fn created(&self) -> u64 {
        self.next_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential() {
        let mut factory = JobFactory::new();
        let a = factory.create(3).unwrap();
        let b = factory.create(40).unwrap();
        assert_eq!(a.id(), 0);
        assert_eq!(b.id(), 1);
        assert_eq!(factory.created(), 2);
    }

    #[test]
    fn test_zero_pages_rejected_without_consuming_an_id() {
        let mut factory = JobFactory::new();
        assert_eq!(factory.create(0), Err(JobError::InvalidPages(0)));
        assert_eq!(factory.create(1).unwrap().id(), 0);
    }

    #[test]
    fn test_size_tier_boundaries() {
        assert_eq!(SizeTier::from_pages(1), SizeTier::Small);
        assert_eq!(SizeTier::from_pages(10), SizeTier::Small);
        assert_eq!(SizeTier::from_pages(11), SizeTier::Medium);
        assert_eq!(SizeTier::from_pages(25), SizeTier::Medium);
        assert_eq!(SizeTier::from_pages(26), SizeTier::Large);
        assert_eq!(SizeTier::from_pages(50), SizeTier::Large);
        assert_eq!(SizeTier::from_pages(51), SizeTier::VeryLarge);
        assert_eq!(SizeTier::from_pages(99), SizeTier::VeryLarge);
    }

    #[test]
    fn test_display() {
        let job = JobFactory::new().create(12).unwrap();
        assert_eq!(job.to_string(), "Job 0 (12 Pages)");
        assert_eq!(job.size_tier(), SizeTier::Medium);
    }
}
