use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Could not get raffles, lock poisoned")]
    RafflesLockError,
}
