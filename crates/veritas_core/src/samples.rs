use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The two sample pools offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SamplePool {
    Real,
    Fake,
}

impl SamplePool {
    pub fn as_str(self) -> &'static str {
        match self {
            SamplePool::Real => "real",
            SamplePool::Fake => "fake",
        }
    }
}

impl fmt::Display for SamplePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SamplePool {
    type Err = SampleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "real" => Ok(SamplePool::Real),
            "fake" => Ok(SamplePool::Fake),
            other => Err(SampleError::UnknownPool(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SampleError {
    #[error("unknown sample pool '{0}' (expected real or fake)")]
    UnknownPool(String),
    #[error("sample pool '{0}' is empty")]
    EmptyPool(SamplePool),
}

/// Sample texts per pool, as loaded from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleCatalog {
    pub real: Vec<String>,
    pub fake: Vec<String>,
}

impl Default for SampleCatalog {
    fn default() -> Self {
        Self {
            real: to_owned_all(&[
                "NASA launches new satellite to monitor climate change. The mission aims to gather critical data on global temperature trends and sea-level rise.",
                "Stock market closes higher today as tech stocks lead the rally. Investors are optimistic about upcoming quarterly earnings reports.",
                "Local election results are in: Mayor Smith wins re-election by a narrow margin after a record turnout at the polls.",
                "New legislation passes to increase funding for public schools, aiming to improve infrastructure and teacher salaries across the state.",
                "Major city announces plans to become carbon neutral by 2030, involving a massive shift to renewable energy and electric public transport.",
            ]),
            fake: to_owned_all(&[
                "Aliens have landed in New York City and are distributing free gold bars to everyone! The government has confirmed that these extraterrestrial visitors are friendly and plan to stay for tea.",
                "President declares water is now illegal, stating that hydration is a sign of weakness. Citizens are urged to drink sand instead.",
                "New study shows chocolate helps you live forever. Scientists claim that eating 1kg of chocolate daily reverses aging completely.",
                "Government creates new department for time travel regulation after a tourist from 2050 accidentally deleted the internet.",
                "Doctors recommend eating rocks for better digestion. A leading 'expert' claims that gravel is essential for a balanced diet.",
                "Celebrity chef claims he can cook pasta with his mind. Witnesses say the water boiled instantly when he stared at it.",
            ]),
        }
    }
}

fn to_owned_all(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_owned()).collect()
}

/// Picks sample texts uniformly at random from a validated catalog.
#[derive(Debug, Clone, Default)]
pub struct SampleProvider {
    catalog: SampleCatalog,
}

impl SampleProvider {
    /// Both pools must be non-empty.
    pub fn new(catalog: SampleCatalog) -> Result<Self, SampleError> {
        if catalog.real.is_empty() {
            return Err(SampleError::EmptyPool(SamplePool::Real));
        }
        if catalog.fake.is_empty() {
            return Err(SampleError::EmptyPool(SamplePool::Fake));
        }
        Ok(Self { catalog })
    }

    pub fn pool(&self, pool: SamplePool) -> &[String] {
        match pool {
            SamplePool::Real => &self.catalog.real,
            SamplePool::Fake => &self.catalog.fake,
        }
    }

    /// Independent uniform pick; repeats are allowed.
    pub fn pick<R: Rng>(&self, pool: SamplePool, rng: &mut R) -> &str {
        let samples = self.pool(pool);
        &samples[rng.gen_range(0..samples.len())]
    }

    pub fn pick_random(&self, pool: SamplePool) -> &str {
        self.pick(pool, &mut rand::thread_rng())
    }
}
