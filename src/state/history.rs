//! In-memory history of completed workouts

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::workout::SessionSummary;

/// A completed session as stored in history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub id: Uuid,
    pub recorded_at: DateTime<Utc>,
    #[serde(flatten)]
    pub summary: SessionSummary,
}

/// Aggregates over everything currently held in history
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryTotals {
    pub sessions: usize,
    pub duration_secs: u64,
    pub calories_burned: u64,
}

/// Bounded list of workout records, oldest evicted first
#[derive(Debug)]
pub struct WorkoutHistory {
    records: VecDeque<WorkoutRecord>,
    limit: usize,
}

impl WorkoutHistory {
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            records: VecDeque::with_capacity(limit),
            limit,
        }
    }

    /// Store a finished session and return the created record
    pub fn record(&mut self, summary: SessionSummary) -> WorkoutRecord {
        let record = WorkoutRecord {
            id: Uuid::new_v4(),
            recorded_at: Utc::now(),
            summary,
        };

        if self.records.len() == self.limit {
            if let Some(evicted) = self.records.pop_front() {
                debug!("History full, evicting record {}", evicted.id);
            }
        }
        self.records.push_back(record.clone());

        record
    }

    /// Records, newest first
    pub fn records(&self) -> Vec<WorkoutRecord> {
        self.records.iter().rev().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop every record, returning how many were removed
    pub fn clear(&mut self) -> usize {
        let removed = self.records.len();
        self.records.clear();
        removed
    }

    pub fn totals(&self) -> HistoryTotals {
        self.records.iter().fold(HistoryTotals::default(), |mut totals, record| {
            totals.sessions += 1;
            totals.duration_secs += record.summary.duration_secs;
            totals.calories_burned += record.summary.calories_burned;
            totals
        })
    }
}

impl Default for WorkoutHistory {
    fn default() -> Self {
        Self::new(50)
    }
}
