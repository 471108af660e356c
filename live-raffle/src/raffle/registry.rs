use crate::{errors::registry_error::RegistryError, models::participant::Participant};
use chrono::Utc;
use rand::{Rng, seq::IndexedRandom};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    DuplicateUser,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added {
        participant: Participant,
        count: usize,
    },
    Rejected(RejectReason),
}

/// Raffle entrants in arrival order.
///
/// Entries are keyed by the user id, or by a synthesized key when one user
/// may enter more than once. User ids are tracked on their own so a later
/// entry without duplicates is still rejected after a policy change.
#[derive(Debug, Default)]
pub struct Registry {
    entries: Vec<(String, Participant)>,
    members: HashSet<String>,
    sequence: u64,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    pub fn try_add(&mut self, candidate: Participant, allow_duplicates: bool) -> AddOutcome {
        if !allow_duplicates && self.members.contains(&candidate.id) {
            return AddOutcome::Rejected(RejectReason::DuplicateUser);
        }

        let key = if allow_duplicates {
            self.sequence += 1;
            format!(
                "{}_{}_{}",
                candidate.id,
                Utc::now().timestamp_millis(),
                self.sequence
            )
        } else {
            candidate.id.clone()
        };

        self.members.insert(candidate.id.clone());
        self.entries.push((key, candidate.clone()));

        AddOutcome::Added {
            participant: candidate,
            count: self.entries.len(),
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.members.clear();
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    #[cfg(test)]
    fn participants(&self) -> impl Iterator<Item = &Participant> {
        self.entries.iter().map(|(_, participant)| participant)
    }

    pub fn draw_winner(&self) -> Result<Participant, RegistryError> {
        self.draw_winner_with(&mut rand::rng())
    }

    /// Picks an entry uniformly at random without removing it
    pub fn draw_winner_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Participant, RegistryError> {
        self.entries
            .choose(rng)
            .map(|(_, participant)| participant.clone())
            .ok_or(RegistryError::Empty)
    }
}
