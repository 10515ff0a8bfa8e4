//! Bot replies: draw the next idiom from the session's pool.

use log::debug;

use super::store::IdiomPool;

/// Draws replies for one session. Holds the session's pool; the pool is never
/// shared, so a draw-and-remove cannot race with another session.
#[derive(Debug)]
pub struct ResponseGenerator {
    pool: IdiomPool,
}

impl ResponseGenerator {
    pub fn new(pool: IdiomPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &IdiomPool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut IdiomPool {
        &mut self.pool
    }

    /// Draw an unused idiom starting with `required` (any idiom when `None`).
    ///
    /// On success the idiom is written to `last_idiom`. `None` means the pool
    /// has nothing left for that letter, which ends the game.
    pub fn respond_to(
        &mut self,
        required: Option<char>,
        last_idiom: &mut Option<String>,
    ) -> Option<String> {
        let drawn = match required {
            Some(letter) => self.pool.take_unused(letter),
            None => self.pool.take_any(),
        };
        match &drawn {
            Some(idiom) => {
                debug!(
                    "drew '{}' for {:?}; {} idioms left",
                    idiom,
                    required,
                    self.pool.len()
                );
                *last_idiom = Some(idiom.clone());
            }
            None => debug!("pool exhausted for {:?}", required),
        }
        drawn
    }
}
