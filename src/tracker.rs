//! The operations the UI calls. Every structural change is persisted before returning.

use log::{info, warn};

use crate::error::{LogError, Result};
use crate::models::{Category, Exercise, SessionHandle, SetEntry, SetInput, TrainingHistory};
use crate::series::{self, SeriesOrder, TableRow, VolumePoint};
use crate::store::JsonStore;

pub struct Tracker {
    history: TrainingHistory,
    store: JsonStore,
    load_warning: Option<String>,
}

impl Tracker {
    /// Loads the stored history. A corrupt document is reported through
    /// [`Tracker::load_warning`] and the tracker starts empty.
    pub fn initialize(store: JsonStore) -> Result<Self> {
        let (history, load_warning) = match store.load() {
            Ok(history) => (history, None),
            Err(err @ LogError::CorruptStore { .. }) => {
                warn!("{}; starting with an empty history", err);
                (TrainingHistory::new(), Some(err.to_string()))
            }
            Err(err) => return Err(err),
        };
        info!(
            "training log {:?} ready with {} sessions",
            store.path(),
            history.len()
        );
        Ok(Tracker {
            history,
            store,
            load_warning,
        })
    }

    pub fn history(&self) -> &TrainingHistory {
        &self.history
    }

    pub fn store(&self) -> &JsonStore {
        &self.store
    }

    pub fn load_warning(&self) -> Option<&str> {
        self.load_warning.as_deref()
    }

    pub fn add_session(&mut self, category: Category, date: &str) -> Result<SessionHandle> {
        let mut next = self.history.clone();
        let handle = next.add_session(category, date)?;
        self.commit(next)?;
        info!("added {} session on {}", category, date);
        Ok(handle)
    }

    /// Records an exercise with all of its sets, or nothing at all.
    pub fn add_exercise(&mut self, session: SessionHandle, name: &str, sets: &[SetInput]) -> Result<()> {
        let mut exercise = Exercise::new(name)?;
        self.history.session(session)?;
        let entries = sets
            .iter()
            .map(SetInput::parse)
            .collect::<Result<Vec<SetEntry>>>()?;
        for entry in &entries {
            exercise.record_set(entry.sets, entry.reps, entry.weight);
        }

        let summary = format!(
            "{} ({} sets, {:.1} kg)",
            exercise.name(),
            entries.len(),
            exercise.total_volume()
        );
        let mut next = self.history.clone();
        next.add_exercise_to_session(session, exercise)?;
        self.commit(next)?;
        info!("added {} to session", summary);
        Ok(())
    }

    /// Clears the history and deletes the stored document.
    pub fn wipe_all(&mut self) -> Result<()> {
        self.store.delete()?;
        info!("wiped {} sessions", self.history.len());
        self.history.clear();
        self.load_warning = None;
        Ok(())
    }

    /// Saves `next` and only then makes it the current history, so a failed
    /// write leaves memory matching the stored document.
    fn commit(&mut self, next: TrainingHistory) -> Result<()> {
        self.store.save(&next)?;
        self.history = next;
        Ok(())
    }

    pub fn volume_series(&self, filter: Option<Category>, order: SeriesOrder) -> Result<Vec<VolumePoint>> {
        series::volume_series(&self.history, filter, order)
    }

    pub fn tabular_view(&self) -> Vec<TableRow> {
        series::tabular_view(&self.history)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    use super::*;

    struct TrackerCtx {
        dir: TempDir,
        tracker: Tracker,
    }

    impl TrackerCtx {
        fn store(&self) -> JsonStore {
            JsonStore::new(self.dir.path().join("log.json"))
        }
    }

    #[fixture]
    fn ctx() -> TrackerCtx {
        let dir = TempDir::new().unwrap();
        let tracker = Tracker::initialize(JsonStore::new(dir.path().join("log.json"))).unwrap();
        TrackerCtx { dir, tracker }
    }

    fn bench_sets() -> Vec<SetInput> {
        vec![SetInput::new("3", "10", "50.0"), SetInput::new("3", "8", "55.0")]
    }

    #[rstest]
    fn starts_empty_without_a_document(ctx: TrackerCtx) {
        assert!(ctx.tracker.history().is_empty());
        assert!(ctx.tracker.load_warning().is_none());
        assert!(!ctx.tracker.store().exists());
    }

    #[rstest]
    fn every_mutation_is_persisted(mut ctx: TrackerCtx) {
        let handle = ctx.tracker.add_session(Category::Chest, "01/01/2024").unwrap();
        assert_eq!(ctx.store().load().unwrap().len(), 1);

        ctx.tracker.add_exercise(handle, "Bench Press", &bench_sets()).unwrap();
        let reloaded = ctx.store().load().unwrap();
        assert_eq!(&reloaded, ctx.tracker.history());
        assert_eq!(reloaded.sessions()[0].total_volume(), 2820.0);
    }

    #[rstest]
    fn bad_weight_records_nothing(mut ctx: TrackerCtx) {
        let handle = ctx.tracker.add_session(Category::Chest, "01/01/2024").unwrap();
        let sets = vec![SetInput::new("3", "10", "50"), SetInput::new("3", "8", "abc")];

        let err = ctx.tracker.add_exercise(handle, "Bench Press", &sets).unwrap_err();
        assert!(matches!(err, LogError::InvalidNumeric { field: "weight", .. }));
        assert!(ctx.tracker.history().session(handle).unwrap().exercises().is_empty());
        assert!(ctx.store().load().unwrap().sessions()[0].exercises().is_empty());
    }

    #[rstest]
    fn blank_inputs_are_rejected(mut ctx: TrackerCtx) {
        assert!(matches!(
            ctx.tracker.add_session(Category::Legs, "  "),
            Err(LogError::InvalidInput { field: "date" })
        ));
        let handle = ctx.tracker.add_session(Category::Legs, "02/01/2024").unwrap();
        assert!(matches!(
            ctx.tracker.add_exercise(handle, "", &bench_sets()),
            Err(LogError::InvalidInput { .. })
        ));
        assert_eq!(ctx.tracker.history().len(), 1);
    }

    #[rstest]
    fn wipe_removes_everything(mut ctx: TrackerCtx) {
        let handle = ctx.tracker.add_session(Category::Back, "03/01/2024").unwrap();
        ctx.tracker.add_exercise(handle, "Row", &bench_sets()).unwrap();

        ctx.tracker.wipe_all().unwrap();
        assert!(ctx.tracker.history().is_empty());
        assert!(!ctx.tracker.store().exists());
        assert!(matches!(
            ctx.tracker.add_exercise(handle, "Row", &bench_sets()),
            Err(LogError::StaleSession)
        ));

        let reopened = Tracker::initialize(ctx.store()).unwrap();
        assert!(reopened.history().is_empty());
    }

    fn block_store_path(ctx: &TrackerCtx) {
        let path = ctx.store().path().to_path_buf();
        let _ = fs::remove_file(&path);
        fs::create_dir_all(path.join("occupied")).unwrap();
    }

    #[rstest]
    fn failed_save_leaves_history_unchanged(mut ctx: TrackerCtx) {
        let handle = ctx.tracker.add_session(Category::Chest, "01/01/2024").unwrap();
        block_store_path(&ctx);

        for _ in 0..2 {
            let err = ctx.tracker.add_exercise(handle, "Bench Press", &bench_sets()).unwrap_err();
            assert!(matches!(err, LogError::Io { .. }));
        }
        assert!(ctx.tracker.history().session(handle).unwrap().exercises().is_empty());

        assert!(ctx.tracker.add_session(Category::Legs, "02/01/2024").is_err());
        assert_eq!(ctx.tracker.history().len(), 1);
    }

    #[rstest]
    fn failed_delete_keeps_the_history(mut ctx: TrackerCtx) {
        let handle = ctx.tracker.add_session(Category::Back, "03/01/2024").unwrap();
        ctx.tracker.add_exercise(handle, "Row", &bench_sets()).unwrap();
        block_store_path(&ctx);

        assert!(matches!(ctx.tracker.wipe_all(), Err(LogError::Io { .. })));
        assert_eq!(ctx.tracker.history().len(), 1);
        ctx.tracker.add_exercise(handle, "Pulldown", &bench_sets()).unwrap_err();
        assert_eq!(ctx.tracker.history().session(handle).unwrap().exercises().len(), 1);
    }

    #[rstest]
    fn date_and_name_are_stored_as_typed(mut ctx: TrackerCtx) {
        let handle = ctx.tracker.add_session(Category::Arms, " 04/01/2024").unwrap();
        ctx.tracker.add_exercise(handle, "Curl ", &bench_sets()).unwrap();

        let reloaded = ctx.store().load().unwrap();
        let session = &reloaded.sessions()[0];
        assert_eq!(session.date(), " 04/01/2024");
        assert_eq!(session.exercises()[0].name(), "Curl ");
    }

    #[rstest]
    fn corrupt_document_falls_back_with_warning(ctx: TrackerCtx) {
        fs::write(ctx.store().path(), "{\"sessions\": 42}").unwrap();
        let tracker = Tracker::initialize(ctx.store()).unwrap();
        assert!(tracker.history().is_empty());
        assert!(tracker.load_warning().is_some_and(|w| w.contains("corrupt")));
    }

    #[rstest]
    fn series_and_table_follow_the_history(mut ctx: TrackerCtx) {
        let chest = ctx.tracker.add_session(Category::Chest, "01/01/2024").unwrap();
        let legs = ctx.tracker.add_session(Category::Legs, "02/01/2024").unwrap();
        ctx.tracker.add_exercise(chest, "Bench Press", &bench_sets()).unwrap();
        ctx.tracker
            .add_exercise(legs, "Squat", &[SetInput::new("5", "5", "100")])
            .unwrap();

        let all = ctx.tracker.volume_series(None, SeriesOrder::Stored).unwrap();
        assert_eq!(all.iter().map(|p| p.volume).collect::<Vec<_>>(), vec![2820.0, 2500.0]);
        let only_chest = ctx
            .tracker
            .volume_series(Some(Category::Chest), SeriesOrder::Stored)
            .unwrap();
        assert_eq!(only_chest.len(), 1);
        assert_eq!(ctx.tracker.tabular_view().len(), 3);
    }
}
