//! Application controller
//!
//! Routes discrete user actions (pick a category, pick a screen, submit an
//! entry, search, reset) into the store and renders the current screen.
//! One action is handled at a time; the controller is the store's only writer.

use crate::category::Category;
use crate::error::{AppError, InputError};
use crate::input::{self, EntryInput};
use crate::platform::KeyValueStorage;
use crate::settings::Settings;
use crate::store::{LoadReport, Store};
use crate::view::{self, Rendered, ViewKind};

pub struct App<S: KeyValueStorage> {
    store: Store<S>,
    settings: Settings,
    /// Result of the last Consult search, cleared on navigation
    last_search: Option<Rendered>,
}

impl<S: KeyValueStorage> App<S> {
    /// Load settings and data from `storage`
    pub fn new(storage: S) -> (Self, LoadReport) {
        let settings = Settings::load(&storage);
        let (store, report) = Store::load(storage);
        let app = Self {
            store,
            settings,
            last_search: None,
        };
        (app, report)
    }

    pub fn category(&self) -> Category {
        self.settings.category
    }

    pub fn view(&self) -> ViewKind {
        self.settings.view
    }

    pub fn store(&self) -> &Store<S> {
        &self.store
    }

    pub fn select_category(&mut self, category: Category) {
        if self.settings.category != category {
            self.settings.category = category;
            self.last_search = None;
            self.save_settings();
        }
    }

    pub fn select_view(&mut self, view: ViewKind) {
        if self.settings.view != view {
            self.settings.view = view;
            self.last_search = None;
            self.save_settings();
        }
    }

    fn save_settings(&mut self) {
        if let Err(e) = self.settings.save(self.store.storage_mut()) {
            log::warn!("Failed to save settings: {e}");
        }
    }

    /// Validate raw form input and record it in the current category.
    ///
    /// On a write failure the entry is still kept in memory and the error is
    /// returned for the user to see.
    pub fn submit_entry(&mut self, num: &str, pos: &str, value: &str) -> Result<Rendered, AppError> {
        let input = EntryInput::parse(num, pos, value).inspect_err(|e| {
            log::warn!("Rejected entry input: {e}");
        })?;
        self.store.upsert_entry(self.settings.category, input)?;
        Ok(self.render())
    }

    /// Look up a number in the current category
    pub fn search(&mut self, num: &str) -> Result<Rendered, InputError> {
        let num = input::parse_num(num)?;
        let matches = self.store.query(self.settings.category, num);
        let rendered = view::search_result_view(num, &matches);
        self.last_search = Some(rendered.clone());
        Ok(rendered)
    }

    /// Clear every category
    pub fn factory_reset(&mut self) -> Result<(), AppError> {
        self.last_search = None;
        self.store.reset()?;
        Ok(())
    }

    /// Render the current screen
    pub fn render(&self) -> Rendered {
        let category = self.settings.category;
        match self.settings.view {
            ViewKind::Entries => view::entries_view(category, self.store.entries(category)),
            ViewKind::Consult => self
                .last_search
                .clone()
                .unwrap_or_else(|| view::consult_view(category)),
            ViewKind::Stats => view::stats_view(category, self.store.stats(category)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{DATA_KEY, SETTINGS_KEY};
    use crate::platform::MemoryStorage;
    use crate::store::LoadOutcome;

    fn app() -> App<MemoryStorage> {
        App::new(MemoryStorage::new()).0
    }

    #[test]
    fn test_fresh_app_defaults() {
        let (app, report) = App::new(MemoryStorage::new());
        assert!(matches!(report.outcome, LoadOutcome::Initialized));
        assert_eq!(app.category(), Category::GH18);
        assert_eq!(app.view(), ViewKind::Entries);
        assert_eq!(app.render().lines, ["No entries"]);
    }

    #[test]
    fn test_submit_entry_records_in_current_category() {
        let mut app = app();
        app.select_category(Category::CIV10);
        let rendered = app.submit_entry("5", "0", "3").unwrap();
        assert_eq!(rendered.title, "Entries - CIV10 (1)");
        let rendered = app.submit_entry("005", "0", "7").unwrap();
        assert_eq!(rendered.lines, ["Num 005, P1 = 3;7"]);
        assert!(app.store().entries(Category::GH18).is_empty());
    }

    #[test]
    fn test_submit_invalid_leaves_state_unchanged() {
        let mut app = app();
        let before = app.store().state().clone();
        for (num, pos, value) in [("1000", "0", "1"), ("5", "10", "1"), ("5", "0", "x"), ("", "0", "1")] {
            let err = app.submit_entry(num, pos, value).unwrap_err();
            assert!(matches!(err, AppError::Input(_)));
        }
        assert_eq!(app.store().state(), &before);
    }

    #[test]
    fn test_submit_write_failure_surfaces_error() {
        let mut app = app();
        app.store.storage_mut().set_fail_writes(true);
        let err = app.submit_entry("1", "1", "1").unwrap_err();
        assert!(matches!(err, AppError::Store(_)));
        assert!(err.user_message().starts_with("Failed to save data"));
    }

    #[test]
    fn test_search_and_consult_view() {
        let mut app = app();
        app.submit_entry("42", "0", "1").unwrap();
        app.submit_entry("42", "3", "2").unwrap();
        app.select_view(ViewKind::Consult);
        assert_eq!(app.render().title, "Consult - GH18");

        let rendered = app.search("42").unwrap();
        assert_eq!(rendered.lines, ["P1: 1", "P4: 2"]);
        assert_eq!(app.render(), rendered);

        assert!(app.search("abc").is_err());
        app.select_category(Category::CIV13);
        assert_eq!(app.render().title, "Consult - CIV13");
    }

    #[test]
    fn test_out_of_range_stored_pos_renders() {
        let json = r#"{"GH18":[{"num":5,"pos":255,"values":[1]},{"num":5,"pos":2,"values":[4]}],
            "CIV10":[],"CIV13":[],"CIV16":[]}"#;
        let (mut app, report) = App::new(MemoryStorage::with_item(DATA_KEY, json));
        assert!(matches!(report.outcome, LoadOutcome::Restored));
        assert_eq!(app.render().lines, ["Num 005, P3 = 4"]);
        app.select_view(ViewKind::Consult);
        assert_eq!(app.search("5").unwrap().lines, ["P3: 4"]);
    }

    #[test]
    fn test_stats_view() {
        let mut app = app();
        app.submit_entry("1", "0", "1").unwrap();
        app.submit_entry("1", "0", "2").unwrap();
        app.select_view(ViewKind::Stats);
        assert_eq!(
            app.render().lines,
            ["Positions filled: 1", "Total values: 2"]
        );
    }

    #[test]
    fn test_factory_reset() {
        let mut app = app();
        app.submit_entry("9", "9", "9").unwrap();
        app.factory_reset().unwrap();
        assert!(app.store().state().is_empty());
        assert_eq!(
            app.store().storage().get(DATA_KEY).unwrap().as_deref(),
            Some(r#"{"GH18":[],"CIV10":[],"CIV13":[],"CIV16":[]}"#)
        );
    }

    #[test]
    fn test_navigation_persists_settings() {
        let mut app = app();
        app.select_category(Category::CIV16);
        app.select_view(ViewKind::Stats);
        let storage = app.store().storage().clone();
        assert!(storage.get(SETTINGS_KEY).unwrap().is_some());

        let (reopened, report) = App::new(storage);
        assert!(matches!(report.outcome, LoadOutcome::Restored));
        assert_eq!(reopened.category(), Category::CIV16);
        assert_eq!(reopened.view(), ViewKind::Stats);
    }
}
