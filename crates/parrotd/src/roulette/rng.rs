//! Bullet placement randomness.

use thiserror::Error;

/// Failure to obtain randomness for a bullet placement.
#[derive(Debug, Error)]
pub enum RollError {
    /// The operating system entropy source failed.
    #[error("entropy source failed: {0}")]
    Entropy(getrandom::Error),
    /// A revolver needs at least one chamber.
    #[error("revolver must have at least one chamber")]
    NoChambers,
}

/// Chooses which chamber holds the bullet.
pub trait BulletRoller {
    /// Returns a chamber number in `1..=chambers`, uniformly distributed.
    fn roll(&mut self, chambers: u8) -> Result<u8, RollError>;
}

/// Roller backed by the operating system's entropy source.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsBulletRoller;

impl BulletRoller for OsBulletRoller {
    fn roll(&mut self, chambers: u8) -> Result<u8, RollError> {
        if chambers == 0 {
            return Err(RollError::NoChambers);
        }
        // Largest multiple of `chambers` not above 256; bytes past it would bias
        // the low chambers.
        let limit = 256 - (256 % u16::from(chambers));
        loop {
            let mut byte = [0_u8; 1];
            getrandom::getrandom(&mut byte).map_err(RollError::Entropy)?;
            let [draw] = byte;
            if u16::from(draw) < limit {
                return Ok(draw % chambers + 1);
            }
        }
    }
}
