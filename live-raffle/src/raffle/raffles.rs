use super::registry::Registry;
use crate::errors::session_error::SessionError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Registries of every operator, keyed by operator
#[derive(Debug, Clone, Default)]
pub struct Raffles {
    registries: Arc<Mutex<HashMap<Arc<String>, Registry>>>,
}

impl Raffles {
    pub fn new() -> Self {
        Raffles::default()
    }

    /// Runs `f` on the registry of `operator`, creating an empty one first if needed
    pub fn with<T>(
        &self,
        operator: &Arc<String>,
        f: impl FnOnce(&mut Registry) -> T,
    ) -> Result<T, SessionError> {
        let mut registries = self
            .registries
            .lock()
            .or(Err(SessionError::RafflesLockError))?;

        let registry = registries.entry(operator.clone()).or_default();
        Ok(f(registry))
    }

    /// Runs `f` on the registry of `operator` only if it already has one
    pub fn with_existing<T>(
        &self,
        operator: &Arc<String>,
        f: impl FnOnce(&mut Registry) -> T,
    ) -> Result<Option<T>, SessionError> {
        Ok(self
            .registries
            .lock()
            .or(Err(SessionError::RafflesLockError))?
            .get_mut(operator)
            .map(f))
    }

    pub fn remove(&self, operator: &Arc<String>) -> Result<(), SessionError> {
        self.registries
            .lock()
            .or(Err(SessionError::RafflesLockError))?
            .remove(operator);
        Ok(())
    }

    pub fn len(&self) -> Result<usize, SessionError> {
        Ok(self
            .registries
            .lock()
            .or(Err(SessionError::RafflesLockError))?
            .len())
    }
}
