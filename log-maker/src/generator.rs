use chrono::{DateTime, Utc};
use rand::{
    Rng,
    distr::{
        Distribution,
        weighted::{Error as WeightError, WeightedIndex},
    },
};
use serde::Serialize;

pub const ANIMALS: [(&str, &str); 9] = [
    ("cow", "moo"),
    ("pig", "oink"),
    ("dog", "woof"),
    ("cat", "meow"),
    ("bird", "squawk"),
    ("horse", "neigh"),
    ("goat", "??"),
    ("mouse", "squeak"),
    ("sheep", "bahh"),
];

/// Chance that an animal makes another animal's sound.
pub const MISMATCH_PROBABILITY: f64 = 0.01;

/// Weights out of 10,000 draws.
pub const LEVELS: [(Level, u16); 5] = [
    (Level::Fatal, 1),
    (Level::Error, 10),
    (Level::Warn, 129),
    (Level::Info, 360),
    (Level::Debug, 9500),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

/// One line of the output file. Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub container: &'static str,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "msg")]
    pub message: &'static str,
    pub level: Level,
    pub happiness: i64,
    pub id: u64,
}

#[derive(Debug, Clone)]
pub struct EntryGenerator {
    levels: WeightedIndex<u16>,
}

impl EntryGenerator {
    pub fn new() -> Result<Self, WeightError> {
        let levels = WeightedIndex::new(LEVELS.iter().map(|(_, w)| *w))?;
        Ok(Self { levels })
    }

    pub fn create_entry<R: Rng + ?Sized>(&self, rng: &mut R, id: u64) -> LogEntry {
        let animal = rng.random_range(0..ANIMALS.len());
        let (container, mut message) = ANIMALS[animal];
        if rng.random_bool(MISMATCH_PROBABILITY) {
            // shift by 1..len so the substitute is never the animal itself
            let other = (animal + rng.random_range(1..ANIMALS.len())) % ANIMALS.len();
            message = ANIMALS[other].1;
        }
        let level = LEVELS[self.levels.sample(rng)].0;

        LogEntry {
            container,
            timestamp: Utc::now(),
            message,
            level,
            happiness: rng.random_range(0..=i64::MAX),
            id,
        }
    }
}
