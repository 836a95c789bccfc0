use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, VecDeque};

use crate::{
    invariants::{Container, Level},
    models::LogRecord,
};

/// Rows shown by default, split evenly between the head and the tail.
pub const MAX_DISPLAY_ROWS: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelCount {
    pub level: Level,
    pub count: u64,
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContainerCount {
    pub container: Container,
    pub count: u64,
    pub dominant_message: String,
    pub mismatches: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeRange {
    pub earliest: DateTime<Utc>,
    pub latest: DateTime<Utc>,
    pub ordered: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HappinessStats {
    pub min: i64,
    pub max: i64,
    pub mean: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total: u64,
    pub levels: Vec<LevelCount>,
    pub containers: Vec<ContainerCount>,
    pub mismatch_ratio: f64,
    pub out_of_sequence: u64,
    pub time_range: Option<TimeRange>,
    pub happiness: Option<HappinessStats>,
    pub head: Vec<LogRecord>,
    pub tail: Vec<LogRecord>,
}

#[derive(Debug)]
pub struct Analytics {
    rows: usize,
    total: u64,
    levels: BTreeMap<Level, u64>,
    messages: BTreeMap<Container, BTreeMap<String, u64>>,
    out_of_sequence: u64,
    time_range: Option<TimeRange>,
    happiness_min: i64,
    happiness_max: i64,
    happiness_sum: i128,
    head: Vec<LogRecord>,
    tail: VecDeque<LogRecord>,
}

impl Default for Analytics {
    fn default() -> Self {
        Self::with_rows(MAX_DISPLAY_ROWS / 2)
    }
}

impl Analytics {
    /// Keeps `rows` records from each end of the stream for display.
    pub fn with_rows(rows: usize) -> Self {
        Self {
            rows,
            total: 0,
            levels: Level::ALL.iter().map(|level| (*level, 0)).collect(),
            messages: BTreeMap::new(),
            out_of_sequence: 0,
            time_range: None,
            happiness_min: i64::MAX,
            happiness_max: i64::MIN,
            happiness_sum: 0,
            head: Vec::new(),
            tail: VecDeque::new(),
        }
    }

    pub fn record(&mut self, record: LogRecord) {
        let position = self.total;
        self.total += 1;

        *self.levels.entry(record.level).or_default() += 1;
        *self
            .messages
            .entry(record.container.clone())
            .or_default()
            .entry(record.message.clone())
            .or_default() += 1;

        if record.id != position {
            self.out_of_sequence += 1;
        }

        self.record_timestamp(record.timestamp);

        self.happiness_min = self.happiness_min.min(record.happiness);
        self.happiness_max = self.happiness_max.max(record.happiness);
        self.happiness_sum += i128::from(record.happiness);

        if self.head.len() < self.rows {
            self.head.push(record);
        } else if self.rows > 0 {
            if self.tail.len() == self.rows {
                self.tail.pop_front();
            }
            self.tail.push_back(record);
        }
    }

    fn record_timestamp(&mut self, ts: DateTime<Utc>) {
        match &mut self.time_range {
            None => {
                self.time_range = Some(TimeRange {
                    earliest: ts,
                    latest: ts,
                    ordered: true,
                })
            }
            Some(range) => {
                // ordered means each timestamp is >= the latest seen before it
                range.ordered &= ts >= range.latest;
                range.earliest = range.earliest.min(ts);
                range.latest = range.latest.max(ts);
            }
        }
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn level_frequency(&self) -> Vec<LevelCount> {
        self.levels
            .iter()
            .map(|(level, count)| LevelCount {
                level: *level,
                count: *count,
                share: ratio(*count, self.total),
            })
            .collect()
    }

    /// Containers by descending count, each with the message it makes most often.
    pub fn container_frequency(&self) -> Vec<ContainerCount> {
        let mut entries: Vec<_> = self
            .messages
            .iter()
            .map(|(container, messages)| {
                let count: u64 = messages.values().sum();
                // BTreeMap order makes ties resolve to the first message alphabetically
                let (dominant_message, dominant) = messages
                    .iter()
                    .rev()
                    .max_by_key(|(_, n)| **n)
                    .map(|(m, n)| (m.clone(), *n))
                    .unwrap_or_default();
                ContainerCount {
                    container: container.clone(),
                    count,
                    dominant_message,
                    mismatches: count - dominant,
                }
            })
            .collect();
        entries.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.container.cmp(&b.container))
        });
        entries
    }

    pub fn summary(&self) -> Summary {
        let containers = self.container_frequency();
        let mismatches: u64 = containers.iter().map(|c| c.mismatches).sum();

        let happiness = (self.total > 0).then(|| HappinessStats {
            min: self.happiness_min,
            max: self.happiness_max,
            mean: self.happiness_sum as f64 / self.total as f64,
        });

        let mut head = self.head.clone();
        head.sort_by_key(|r| r.timestamp);
        let mut tail: Vec<_> = self.tail.iter().cloned().collect();
        tail.sort_by_key(|r| r.timestamp);

        Summary {
            total: self.total,
            levels: self.level_frequency(),
            containers,
            mismatch_ratio: ratio(mismatches, self.total),
            out_of_sequence: self.out_of_sequence,
            time_range: self.time_range.clone(),
            happiness,
            head,
            tail,
        }
    }
}

fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
