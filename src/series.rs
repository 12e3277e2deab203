use chrono::NaiveDate;

use crate::error::{LogError, Result};
use crate::models::{Category, Session, TrainingHistory};

pub const DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolumePoint {
    pub date: NaiveDate,
    pub volume: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SeriesOrder {
    /// Order the sessions were recorded in.
    #[default]
    Stored,
    /// Oldest date first; sessions on the same day keep their stored order.
    ByDate,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TableRow {
    pub category: Category,
    pub date: String,
    pub exercise: String,
    pub sets: u32,
    pub reps: u32,
    pub weight: f64,
}

pub fn parse_session_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| LogError::InvalidDate {
        date: date.to_string(),
    })
}

/// Per-session volume, optionally restricted to one category.
///
/// Any unparseable date fails the whole series.
pub fn volume_series(
    history: &TrainingHistory,
    filter: Option<Category>,
    order: SeriesOrder,
) -> Result<Vec<VolumePoint>> {
    let sessions: Vec<&Session> = match filter {
        Some(category) => history.sessions_by_category(category),
        None => history.sessions().iter().collect(),
    };

    let mut points = sessions
        .into_iter()
        .map(|session| {
            Ok(VolumePoint {
                date: parse_session_date(session.date())?,
                volume: session.total_volume(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if order == SeriesOrder::ByDate {
        points.sort_by_key(|p| p.date);
    }
    Ok(points)
}

pub fn series_title(filter: Option<Category>) -> String {
    match filter {
        Some(category) => format!("Kg lifted in {} sessions", category),
        None => "Kg lifted per training session".to_string(),
    }
}

/// One row per recorded set entry, in session, exercise, entry order.
pub fn tabular_view(history: &TrainingHistory) -> Vec<TableRow> {
    let mut rows = Vec::new();
    for session in history.sessions() {
        for exercise in session.exercises() {
            for entry in exercise.history() {
                rows.push(TableRow {
                    category: session.category(),
                    date: session.date().to_string(),
                    exercise: exercise.name().to_string(),
                    sets: entry.sets,
                    reps: entry.reps,
                    weight: entry.weight,
                });
            }
        }
    }
    rows
}
