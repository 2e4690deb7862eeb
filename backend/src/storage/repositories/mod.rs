//! In-memory repositories.
//!
//! Each repository loads its collection through the [`StorageCodec`] once,
//! keeps it behind a mutex, and writes the whole collection back after every
//! mutation. Holding the lock across the read-modify-write keeps concurrent
//! requests from interleaving their updates.
//!
//! [`StorageCodec`]: super::codec::StorageCodec

pub mod pet_repository;
pub mod health_log_repository;
pub mod survey_repository;
pub mod feedback_repository;

pub use pet_repository::PetRepository;
pub use health_log_repository::HealthLogRepository;
pub use survey_repository::SurveyRepository;
pub use feedback_repository::FeedbackRepository;

/// Return `candidate`, or `candidate-<n>` with the smallest n that is not taken
pub(crate) fn unique_id(candidate: String, is_taken: impl Fn(&str) -> bool) -> String {
    if !is_taken(&candidate) {
        return candidate;
    }
    let mut n = 2;
    loop {
        let id = format!("{}-{}", candidate, n);
        if !is_taken(&id) {
            return id;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_id_keeps_free_candidate() {
        assert_eq!(unique_id("pet-100".to_string(), |_| false), "pet-100");
    }

    #[test]
    fn test_unique_id_appends_suffix_on_collision() {
        let taken = ["pet-100", "pet-100-2"];
        let id = unique_id("pet-100".to_string(), |id| taken.contains(&id));
        assert_eq!(id, "pet-100-3");
    }
}
