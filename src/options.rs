//! Game configuration options.

use crate::error::OptionsError;

/// Conditions under which doubling down is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum DoubleOption {
    /// Double down allowed on any two-card hand.
    #[default]
    Any,
    /// Double down allowed only on 9 or 10.
    NineOrTen,
    /// Double down allowed only on 9 through 11.
    NineThrough11,
    /// Double down not allowed.
    None,
}

impl DoubleOption {
    /// Returns whether doubling is allowed on a hand totalling `value`.
    #[must_use]
    pub fn allows(self, value: u8) -> bool {
        match self {
            Self::Any => true,
            Self::NineOrTen => value == 9 || value == 10,
            Self::NineThrough11 => (9..=11).contains(&value),
            Self::None => false,
        }
    }
}

/// Rounding mode for fractional payouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    /// Round up.
    Up,
    /// Round down.
    Down,
    /// Round to nearest.
    Nearest,
}

/// Configuration options for a blackjack round engine.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use shoebox::GameOptions;
///
/// let options = GameOptions::default()
///     .with_decks(2)
///     .with_penetration(0.8)
///     .with_hit_soft_17(true);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GameOptions {
    /// Number of 52-card decks in the shoe.
    pub decks: u8,
    /// Fraction of the shoe dealt before a forced reshuffle.
    /// 0 disables penetration-driven reshuffling.
    pub penetration: f64,
    /// Whether the dealer hits a soft 17.
    pub hit_soft_17: bool,
    /// Double down conditions.
    pub double: DoubleOption,
    /// Rounding mode for fractional blackjack winnings.
    pub rounding_blackjack: RoundingMode,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            decks: 6,
            penetration: 0.75,
            hit_soft_17: false,
            double: DoubleOption::Any,
            rounding_blackjack: RoundingMode::Down,
        }
    }
}

impl GameOptions {
    /// Checks that the options describe a playable shoe.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no decks or the penetration is outside
    /// `[0, 1)`.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.decks == 0 {
            return Err(OptionsError::NoDecks);
        }
        if !(0.0..1.0).contains(&self.penetration) {
            return Err(OptionsError::InvalidPenetration);
        }
        Ok(())
    }

    /// Sets the number of decks.
    ///
    /// # Example
    ///
    /// ```
    /// use shoebox::GameOptions;
    ///
    /// let options = GameOptions::default().with_decks(1);
    /// assert_eq!(options.decks, 1);
    /// ```
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Sets the deck penetration.
    ///
    /// # Example
    ///
    /// ```
    /// use shoebox::GameOptions;
    ///
    /// let options = GameOptions::default().with_penetration(0.5);
    /// assert_eq!(options.penetration, 0.5);
    /// ```
    #[must_use]
    pub const fn with_penetration(mut self, penetration: f64) -> Self {
        self.penetration = penetration;
        self
    }

    /// Sets whether the dealer hits a soft 17.
    ///
    /// # Example
    ///
    /// ```
    /// use shoebox::GameOptions;
    ///
    /// let options = GameOptions::default().with_hit_soft_17(true);
    /// assert!(options.hit_soft_17);
    /// ```
    #[must_use]
    pub const fn with_hit_soft_17(mut self, hit: bool) -> Self {
        self.hit_soft_17 = hit;
        self
    }

    /// Sets the double down conditions.
    #[must_use]
    pub const fn with_double(mut self, double: DoubleOption) -> Self {
        self.double = double;
        self
    }

    /// Sets the rounding mode for blackjack payouts.
    #[must_use]
    pub const fn with_rounding_blackjack(mut self, mode: RoundingMode) -> Self {
        self.rounding_blackjack = mode;
        self
    }
}
