//models.rs
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LogError, Result};

/// Body region a session trains. Stored on disk under its Portuguese name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Peito")]
    Chest,
    #[serde(rename = "Perna")]
    Legs,
    #[serde(rename = "Costas")]
    Back,
    #[serde(rename = "Posterior")]
    PosteriorChain,
    #[serde(rename = "Braços")]
    Arms,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Chest,
        Category::Legs,
        Category::Back,
        Category::PosteriorChain,
        Category::Arms,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Chest => "Chest",
            Category::Legs => "Legs",
            Category::Back => "Back",
            Category::PosteriorChain => "Posterior-chain",
            Category::Arms => "Arms",
        }
    }

    fn stored_name(&self) -> &'static str {
        match self {
            Category::Chest => "Peito",
            Category::Legs => "Perna",
            Category::Back => "Costas",
            Category::PosteriorChain => "Posterior",
            Category::Arms => "Braços",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.label().to_lowercase() == wanted || c.stored_name().to_lowercase() == wanted)
            .ok_or(LogError::InvalidInput { field: "category" })
    }
}

/// One recorded unit of work. Serialized as `[sets, reps, weight]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "(u32, u32, f64)", into = "(u32, u32, f64)")]
pub struct SetEntry {
    pub sets: u32,
    pub reps: u32,
    pub weight: f64,
}

impl SetEntry {
    pub fn volume(&self) -> f64 {
        f64::from(self.sets) * f64::from(self.reps) * self.weight
    }
}

impl From<(u32, u32, f64)> for SetEntry {
    fn from((sets, reps, weight): (u32, u32, f64)) -> Self {
        SetEntry { sets, reps, weight }
    }
}

impl From<SetEntry> for (u32, u32, f64) {
    fn from(entry: SetEntry) -> Self {
        (entry.sets, entry.reps, entry.weight)
    }
}

/// Raw text of one set row as typed into the UI.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SetInput {
    pub sets: String,
    pub reps: String,
    pub weight: String,
}

impl SetInput {
    pub fn new(sets: impl Into<String>, reps: impl Into<String>, weight: impl Into<String>) -> Self {
        SetInput {
            sets: sets.into(),
            reps: reps.into(),
            weight: weight.into(),
        }
    }

    pub fn parse(&self) -> Result<SetEntry> {
        let sets = parse_count("sets", &self.sets)?;
        let reps = parse_count("reps", &self.reps)?;
        let weight = self
            .weight
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|w| w.is_finite() && *w >= 0.0)
            .ok_or_else(|| invalid_numeric("weight", &self.weight))?;
        Ok(SetEntry { sets, reps, weight })
    }
}

fn parse_count(field: &'static str, raw: &str) -> Result<u32> {
    match raw.trim().parse::<u32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(invalid_numeric(field, raw)),
    }
}

fn invalid_numeric(field: &'static str, raw: &str) -> LogError {
    LogError::InvalidNumeric {
        field,
        value: raw.to_string(),
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    #[serde(rename = "nome")]
    name: String,
    #[serde(rename = "historico")]
    history: Vec<SetEntry>,
}

impl Exercise {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(LogError::InvalidInput { field: "exercise name" });
        }
        Ok(Exercise {
            name,
            history: Vec::new(),
        })
    }

    pub fn record_set(&mut self, sets: u32, reps: u32, weight: f64) {
        self.history.push(SetEntry { sets, reps, weight });
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn history(&self) -> &[SetEntry] {
        &self.history
    }

    pub fn total_volume(&self) -> f64 {
        self.history.iter().map(SetEntry::volume).sum()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "tipo")]
    category: Category,
    /// Kept in its `DD/MM/YYYY` text form; parsed only when a series needs it.
    #[serde(rename = "data")]
    date: String,
    #[serde(rename = "exercicios")]
    exercises: Vec<Exercise>,
}

impl Session {
    pub fn new(category: Category, date: impl Into<String>) -> Self {
        Session {
            category,
            date: date.into(),
            exercises: Vec::new(),
        }
    }

    pub fn add_exercise(&mut self, exercise: Exercise) {
        self.exercises.push(exercise);
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn total_volume(&self) -> f64 {
        self.exercises.iter().map(Exercise::total_volume).sum()
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.category, self.date)
    }
}

/// Refers to a session by position, tied to the history epoch it was issued in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SessionHandle {
    index: usize,
    epoch: u64,
}

#[derive(Clone, Debug, Default)]
pub struct TrainingHistory {
    sessions: Vec<Session>,
    epoch: u64,
}

impl PartialEq for TrainingHistory {
    fn eq(&self, other: &Self) -> bool {
        self.sessions == other.sessions
    }
}

impl TrainingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_sessions(sessions: Vec<Session>) -> Self {
        TrainingHistory { sessions, epoch: 0 }
    }

    pub fn add_session(&mut self, category: Category, date: impl Into<String>) -> Result<SessionHandle> {
        let date = date.into();
        if date.trim().is_empty() {
            return Err(LogError::InvalidInput { field: "date" });
        }
        self.sessions.push(Session::new(category, date));
        Ok(SessionHandle {
            index: self.sessions.len() - 1,
            epoch: self.epoch,
        })
    }

    pub fn add_exercise_to_session(&mut self, handle: SessionHandle, exercise: Exercise) -> Result<()> {
        self.session_mut(handle)?.add_exercise(exercise);
        Ok(())
    }

    pub fn session(&self, handle: SessionHandle) -> Result<&Session> {
        if handle.epoch != self.epoch {
            return Err(LogError::StaleSession);
        }
        self.sessions.get(handle.index).ok_or(LogError::StaleSession)
    }

    fn session_mut(&mut self, handle: SessionHandle) -> Result<&mut Session> {
        if handle.epoch != self.epoch {
            return Err(LogError::StaleSession);
        }
        self.sessions.get_mut(handle.index).ok_or(LogError::StaleSession)
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn handles(&self) -> impl Iterator<Item = (SessionHandle, &Session)> + '_ {
        let epoch = self.epoch;
        self.sessions
            .iter()
            .enumerate()
            .map(move |(index, session)| (SessionHandle { index, epoch }, session))
    }

    pub fn sessions_by_category(&self, category: Category) -> Vec<&Session> {
        self.sessions
            .iter()
            .filter(|s| s.category == category)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Drops every session. Handles issued before this call become stale.
    pub fn clear(&mut self) {
        self.sessions.clear();
        self.epoch += 1;
    }
}
