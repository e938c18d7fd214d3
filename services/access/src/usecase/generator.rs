use rand::RngExt;

use crate::domain::repository::AccessCodeRepository;
use crate::domain::types::{CODE_LEN, MAX_GENERATION_ATTEMPTS};
use crate::error::AccessServiceError;

/// Alphabet for access codes: decimal digits only, easy to read out over a gate intercom.
const DIGITS: &[u8] = b"0123456789";

/// Source of candidate codes.
pub trait CodeSource: Send + Sync {
    fn draw(&self) -> String;
}

/// Uniformly random `CODE_LEN`-digit strings from the thread RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomDigits;

impl CodeSource for RandomDigits {
    fn draw(&self) -> String {
        let mut rng = rand::rng();
        (0..CODE_LEN)
            .map(|_| DIGITS[rng.random_range(0..DIGITS.len())] as char)
            .collect()
    }
}

/// Draws candidates until one is not present in the store.
///
/// Only reads from the store; persisting the code is the caller's job, so a
/// concurrent issue can still claim the same code before the insert.
pub struct CodeGenerator<'a, A, S>
where
    A: AccessCodeRepository,
    S: CodeSource,
{
    pub access_codes: &'a A,
    pub source: &'a S,
}

impl<A, S> CodeGenerator<'_, A, S>
where
    A: AccessCodeRepository,
    S: CodeSource,
{
    pub async fn generate(&self) -> Result<String, AccessServiceError> {
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let candidate = self.source.draw();
            if self.access_codes.find_by_code(&candidate).await?.is_none() {
                return Ok(candidate);
            }
            tracing::debug!(attempt, "access code collision, redrawing");
        }
        tracing::warn!(
            attempts = MAX_GENERATION_ATTEMPTS,
            "access code generation exhausted"
        );
        Err(AccessServiceError::GenerationExhausted {
            attempts: MAX_GENERATION_ATTEMPTS,
        })
    }
}
