use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const BUILTIN_COUNTRIES: [&str; 24] = [
    "Argentina",
    "Brazil",
    "Canada",
    "Denmark",
    "Egypt",
    "Finland",
    "Germany",
    "Hungary",
    "India",
    "Japan",
    "Kenya",
    "Lebanon",
    "Mexico",
    "Nigeria",
    "Oman",
    "Portugal",
    "Qatar",
    "Russia",
    "Spain",
    "Turkey",
    "Uganda",
    "Vietnam",
    "Yemen",
    "Zimbabwe",
];

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("country pool is empty")]
    Empty,
    #[error("country pool entry {0} is blank")]
    BlankEntry(usize),
    #[error("country pool JSON is invalid: {0}")]
    Json(#[from] serde_json::Error),
}

/// Ordered, read-only list of candidate country names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryPool {
    countries: Vec<String>,
}

impl Default for CountryPool {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CountryPool {
    /// The 24-entry pool the game ships with.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            countries: BUILTIN_COUNTRIES.iter().map(|c| (*c).to_string()).collect(),
        }
    }

    /// Build a pool from already-known names.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty or any entry is blank.
    pub fn from_names<I, S>(names: I) -> Result<Self, PoolError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let countries: Vec<String> = names.into_iter().map(Into::into).collect();
        Self { countries }.validated()
    }

    /// Load a pool from JSON of the form `{"countries": ["..."]}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or the pool fails validation.
    pub fn from_json(json: &str) -> Result<Self, PoolError> {
        let pool: Self = serde_json::from_str(json)?;
        pool.validated()
    }

    fn validated(self) -> Result<Self, PoolError> {
        if self.countries.is_empty() {
            return Err(PoolError::Empty);
        }
        if let Some(idx) = self.countries.iter().position(|c| c.trim().is_empty()) {
            return Err(PoolError::BlankEntry(idx));
        }
        Ok(self)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.countries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.countries.iter().map(String::as_str)
    }

    /// Draw a uniformly random entry, upper-cased for use as a round target.
    ///
    /// Returns `None` only for an empty pool, which validation rules out.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<String> {
        if self.countries.is_empty() {
            return None;
        }
        let idx = rng.gen_range(0..self.countries.len());
        self.countries.get(idx).map(|c| c.trim().to_uppercase())
    }
}
