use core::fmt;

use serde::{Deserialize, Serialize};

/// The binary demographic label. Female is the positive class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Returns true if this label is Male
    #[must_use]
    pub fn is_male(&self) -> bool {
        matches!(self, Self::Male)
    }

    /// Returns true if this label is Female
    #[must_use]
    pub fn is_female(&self) -> bool {
        matches!(self, Self::Female)
    }

    /// Class index: 0 for Male, 1 for Female.
    #[must_use]
    pub fn index(&self) -> usize {
        match self {
            Self::Male => 0,
            Self::Female => 1,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
        }
    }
}

impl From<Gender> for usize {
    fn from(gender: Gender) -> Self {
        gender.index()
    }
}

/// Struct to hold prediction probabilities
/// 0: P(Male), 1: P(Female)
#[derive(Debug, Clone, Copy)]
pub struct Prediction(f64, f64);

impl Prediction {
    /// Create a new Prediction instance
    /// `male_prob` + `female_prob` must equal 1.0
    fn new(male_prob: f64, female_prob: f64) -> Self {
        debug_assert!(
            (male_prob + female_prob - 1.0).abs() < f64::EPSILON,
            "Probabilities must sum to 1.0"
        );
        Self(male_prob, female_prob)
    }

    /// Build from the positive-class probability alone.
    #[must_use]
    pub fn from_female_probability(female_prob: f64) -> Self {
        Self::new(1.0 - female_prob, female_prob)
    }

    #[must_use]
    pub fn male_probability(&self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn female_probability(&self) -> f64 {
        self.1
    }

    #[must_use]
    pub fn probability_of(&self, gender: Gender) -> f64 {
        match gender {
            Gender::Male => self.0,
            Gender::Female => self.1,
        }
    }

    #[inline]
    #[must_use]
    pub fn classification(&self, threshold: f64) -> Gender {
        if self.1 >= threshold {
            Gender::Female
        } else {
            Gender::Male
        }
    }

    /// The label at the standard 0.5 cutoff.
    #[must_use]
    pub fn predicted(&self) -> Gender {
        self.classification(0.5)
    }

    /// Probability assigned to the predicted label.
    #[must_use]
    pub fn confidence(&self) -> f64 {
        self.probability_of(self.predicted())
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P(male)={:.3}, P(female)={:.3}", self.0, self.1)
    }
}
