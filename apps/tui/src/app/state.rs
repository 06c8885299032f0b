use crate::app::actions::AppActions;
use crate::domain::{build_center_groups, AreaIndex, CenterGroup};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde_json::Value;
use std::collections::HashSet;
use std::time::Instant;

/// Shown in the content pane before any area has been selected.
pub const IDLE_PLACEHOLDER: &str = "地域を選択すると天気データが表示されます";

/// Fixed text shown in place of forecast data when a fetch fails.
pub const FETCH_FAILURE_TEXT: &str = "天気データの取得に失敗しました";

/// Shown instead of the normal layout when the startup hierarchy fetch failed.
pub const HIERARCHY_FAILURE_TEXT: &str = "エリアデータの読み込みに失敗しました";

/// Header line above a displayed forecast document.
pub fn forecast_header(area_code: &str) -> String {
    format!("エリアコード {area_code} の天気情報:")
}

/// Which pane receives the arrow keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneFocus {
    Sidebar,
    Content,
}

/// One visible line of the navigation tree, indexing into `App::groups`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeRow {
    Center(usize),
    Area(usize, usize),
}

/// The content pane state machine. Exactly two states; every navigation
/// activation replaces the pane wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentState {
    Idle,
    Displaying { code: String, content: Content },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Pretty-printed forecast document.
    Document(String),
    /// Renders `FETCH_FAILURE_TEXT`.
    Failed,
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub actions: AppActions,
    pub hierarchy_loaded: bool,
    pub index: AreaIndex,
    pub groups: Vec<CenterGroup>,
    pub expanded: HashSet<usize>,
    pub selected_row: usize,
    pub focus: PaneFocus,
    pub content: ContentState,
    pub content_scroll: u16,
    /// Area code whose forecast the event loop should fetch next. Set by
    /// input handlers from the activated row's own code field.
    pub pending_fetch: Option<String>,
    /// Set when the user asks to retry the startup hierarchy fetch.
    pub pending_reload: bool,
    pub search_active: bool,
    pub search_query: String,
    pub filtered_areas: Vec<(usize, usize)>,
    pub status_message: String,
    pub show_help: bool,
    pub animation_counter: f64,
    pub last_frame: Instant,
}

impl App {
    pub fn new(actions: AppActions) -> Self {
        Self {
            running: true,
            actions,
            hierarchy_loaded: false,
            index: AreaIndex::default(),
            groups: Vec::new(),
            expanded: HashSet::new(),
            selected_row: 0,
            focus: PaneFocus::Sidebar,
            content: ContentState::Idle,
            content_scroll: 0,
            pending_fetch: None,
            pending_reload: false,
            search_active: false,
            search_query: String::new(),
            filtered_areas: Vec::new(),
            status_message: String::new(),
            show_help: false,
            animation_counter: 0.0,
            last_frame: Instant::now(),
        }
    }

    /// Startup fetch: area hierarchy → index → navigation groups.
    pub async fn initialize(&mut self) {
        let hierarchy = self.actions.load_area_hierarchy().await;
        self.apply_hierarchy(hierarchy);
    }

    /// Applies a (possibly absent) hierarchy document. Absent means the
    /// startup fetch failed; the UI then shows a single error message and
    /// stays alive so the user can retry or quit.
    pub fn apply_hierarchy(&mut self, hierarchy: Option<Value>) {
        match hierarchy {
            Some(doc) => {
                self.index = AreaIndex::from_hierarchy(&doc);
                self.groups = build_center_groups(&doc, &self.index);
                self.hierarchy_loaded = true;
                self.expanded.clear();
                self.selected_row = 0;
                self.status_message = format!(
                    "Loaded {} centers / {} areas",
                    self.groups.len(),
                    self.index.len()
                );
            }
            None => {
                self.hierarchy_loaded = false;
                self.status_message = "Error: failed to load area data".to_string();
            }
        }
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        // Update animation counter (cycles between 0 and 2*PI)
        self.animation_counter += delta.as_secs_f64() * 2.0;
        if self.animation_counter > 2.0 * std::f64::consts::PI {
            self.animation_counter -= 2.0 * std::f64::consts::PI;
        }
    }

    /// The rows the sidebar currently shows, top to bottom. With an active
    /// search this is the filtered area rows; otherwise center rows with
    /// their children interleaved when expanded.
    pub fn visible_rows(&self) -> Vec<TreeRow> {
        if !self.search_query.is_empty() {
            return self
                .filtered_areas
                .iter()
                .map(|&(gi, ci)| TreeRow::Area(gi, ci))
                .collect();
        }

        let mut rows = Vec::new();
        for (gi, group) in self.groups.iter().enumerate() {
            rows.push(TreeRow::Center(gi));
            if self.expanded.contains(&gi) {
                for ci in 0..group.areas.len() {
                    rows.push(TreeRow::Area(gi, ci));
                }
            }
        }
        rows
    }

    pub fn selected_tree_row(&self) -> Option<TreeRow> {
        self.visible_rows().get(self.selected_row).copied()
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_row > 0 {
            self.selected_row -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        let total = self.visible_rows().len();
        if total > 0 && self.selected_row + 1 < total {
            self.selected_row += 1;
        }
    }

    pub fn move_selection_page_up(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(5);
    }

    pub fn move_selection_page_down(&mut self) {
        let total = self.visible_rows().len();
        if total > 0 {
            self.selected_row = (self.selected_row + 5).min(total - 1);
        }
    }

    pub fn move_selection_home(&mut self) {
        self.selected_row = 0;
    }

    pub fn move_selection_end(&mut self) {
        let total = self.visible_rows().len();
        if total > 0 {
            self.selected_row = total - 1;
        }
    }

    /// Enter on a center toggles expansion; Enter on an area row schedules
    /// a forecast fetch for that row's own code.
    pub fn activate_selected(&mut self) {
        match self.selected_tree_row() {
            Some(TreeRow::Center(gi)) => self.toggle_expanded(gi),
            Some(TreeRow::Area(gi, ci)) => {
                if let Some(row) = self.groups.get(gi).and_then(|g| g.areas.get(ci)) {
                    self.pending_fetch = Some(row.code.clone());
                }
            }
            None => {}
        }
    }

    pub fn toggle_expanded(&mut self, group_index: usize) {
        if !self.expanded.remove(&group_index) {
            self.expanded.insert(group_index);
        }
        self.clamp_selection();
    }

    pub fn expand_selected(&mut self) {
        if let Some(TreeRow::Center(gi)) = self.selected_tree_row() {
            self.expanded.insert(gi);
        }
    }

    /// Left on an area row jumps back to its center; on a center it collapses.
    pub fn collapse_selected(&mut self) {
        match self.selected_tree_row() {
            Some(TreeRow::Center(gi)) => {
                self.expanded.remove(&gi);
                self.clamp_selection();
            }
            Some(TreeRow::Area(gi, _)) => {
                if self.expanded.remove(&gi) {
                    let rows = self.visible_rows();
                    if let Some(pos) = rows.iter().position(|row| *row == TreeRow::Center(gi)) {
                        self.selected_row = pos;
                    }
                }
            }
            None => {}
        }
    }

    fn clamp_selection(&mut self) {
        let total = self.visible_rows().len();
        if total == 0 {
            self.selected_row = 0;
        } else if self.selected_row >= total {
            self.selected_row = total - 1;
        }
    }

    /// Content-pane transition for a finished fetch. The pane is replaced
    /// wholesale in both directions and the scroll position resets.
    pub fn apply_forecast_result(&mut self, area_code: String, result: Option<Value>) {
        match result {
            Some(doc) => {
                let body =
                    serde_json::to_string_pretty(&doc).unwrap_or_else(|_| doc.to_string());
                self.status_message = format!(
                    "Fetched forecast for {area_code} at {}",
                    chrono::Local::now().format("%H:%M:%S")
                );
                self.content = ContentState::Displaying {
                    code: area_code,
                    content: Content::Document(body),
                };
            }
            None => {
                self.status_message = format!("Error: forecast fetch failed for {area_code}");
                self.content = ContentState::Displaying {
                    code: area_code,
                    content: Content::Failed,
                };
            }
        }
        self.content_scroll = 0;
    }

    /// Code currently shown in the content pane, if any.
    pub fn displayed_code(&self) -> Option<&str> {
        match &self.content {
            ContentState::Displaying { code, .. } => Some(code),
            ContentState::Idle => None,
        }
    }

    pub fn scroll_content_up(&mut self, lines: u16) {
        self.content_scroll = self.content_scroll.saturating_sub(lines);
    }

    pub fn scroll_content_down(&mut self, lines: u16) {
        self.content_scroll = self.content_scroll.saturating_add(lines);
    }

    pub fn start_search(&mut self) {
        self.search_active = true;
        self.search_query.clear();
        self.filtered_areas.clear();
    }

    pub fn clear_search(&mut self) {
        self.search_active = false;
        self.search_query.clear();
        self.filtered_areas.clear();
        self.clamp_selection();
    }

    pub fn push_search_char(&mut self, ch: char) {
        self.search_query.push(ch);
        self.update_search_filter();
    }

    pub fn pop_search_char(&mut self) {
        self.search_query.pop();
        self.update_search_filter();
    }

    /// Fuzzy-matches the query against every area row label, best first.
    pub fn update_search_filter(&mut self) {
        self.filtered_areas.clear();
        self.selected_row = 0;

        if self.search_query.is_empty() {
            return;
        }

        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(i64, usize, usize)> = Vec::new();
        for (gi, group) in self.groups.iter().enumerate() {
            for (ci, row) in group.areas.iter().enumerate() {
                let haystack = format!("{} {}", row.label(), group.name);
                if let Some(score) = matcher.fuzzy_match(&haystack, &self.search_query) {
                    scored.push((score, gi, ci));
                }
            }
        }
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        self.filtered_areas = scored.into_iter().map(|(_, gi, ci)| (gi, ci)).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stub_app() -> App {
        let mut app = App::new(AppActions::new());
        app.apply_hierarchy(Some(json!({
            "centers": {
                "C1": { "name": "Kanto", "children": ["130010", "130020"] },
                "C2": { "name": "Tohoku", "children": ["020010"] }
            },
            "offices": {
                "130010": { "name": "Tokyo" },
                "130020": { "name": "Chiba" },
                "020010": { "name": "Aomori" }
            }
        })));
        app
    }

    #[test]
    fn groups_start_collapsed() {
        let app = stub_app();

        assert_eq!(
            app.visible_rows(),
            vec![TreeRow::Center(0), TreeRow::Center(1)]
        );
    }

    #[test]
    fn enter_on_center_expands_and_collapses() {
        let mut app = stub_app();

        app.activate_selected();
        assert_eq!(
            app.visible_rows(),
            vec![
                TreeRow::Center(0),
                TreeRow::Area(0, 0),
                TreeRow::Area(0, 1),
                TreeRow::Center(1)
            ]
        );

        app.activate_selected();
        assert_eq!(
            app.visible_rows(),
            vec![TreeRow::Center(0), TreeRow::Center(1)]
        );
    }

    #[test]
    fn rows_dispatch_their_own_codes_in_order() {
        // Activating each child row in turn must produce the codes in
        // document order, never a repeated last value.
        let mut app = stub_app();
        app.activate_selected(); // expand C1

        let mut dispatched = Vec::new();
        for row_index in [1, 2] {
            app.selected_row = row_index;
            app.activate_selected();
            if let Some(code) = app.pending_fetch.take() {
                dispatched.push(code);
            }
        }

        assert_eq!(dispatched, ["130010", "130020"]);
    }

    #[test]
    fn selection_clamps_at_both_ends() {
        let mut app = stub_app();

        app.move_selection_up();
        assert_eq!(app.selected_row, 0);

        app.move_selection_end();
        assert_eq!(app.selected_row, 1);
        app.move_selection_down();
        assert_eq!(app.selected_row, 1);

        app.move_selection_home();
        assert_eq!(app.selected_row, 0);
    }

    #[test]
    fn collapse_from_child_returns_to_center() {
        let mut app = stub_app();
        app.activate_selected(); // expand C1
        app.selected_row = 2; // Chiba

        app.collapse_selected();

        assert_eq!(app.selected_tree_row(), Some(TreeRow::Center(0)));
        assert!(!app.expanded.contains(&0));
    }

    #[test]
    fn successful_fetch_displays_pretty_document() {
        let mut app = stub_app();
        let doc = json!({ "temp": 20, "reportDatetime": "2024-05-01T05:00:00+09:00" });

        app.apply_forecast_result("130010".to_string(), Some(doc.clone()));

        let ContentState::Displaying { code, content } = &app.content else {
            panic!("expected Displaying state");
        };
        assert_eq!(code, "130010");
        let Content::Document(body) = content else {
            panic!("expected a document body");
        };
        assert!(body.contains("\"temp\": 20"));

        // The displayed text round-trips to the exact source document.
        let parsed: Value = serde_json::from_str(body).unwrap();
        assert_eq!(parsed, doc);

        assert!(forecast_header(code).contains("130010"));
    }

    #[test]
    fn failed_fetch_displays_fixed_failure_text() {
        let mut app = stub_app();

        app.apply_forecast_result("130010".to_string(), None);

        assert_eq!(
            app.content,
            ContentState::Displaying {
                code: "130010".to_string(),
                content: Content::Failed,
            }
        );
        assert!(app.status_message.starts_with("Error"));
    }

    #[test]
    fn fetch_replaces_previous_content_wholesale() {
        let mut app = stub_app();
        app.apply_forecast_result("130010".to_string(), Some(json!({ "temp": 20 })));
        app.content_scroll = 7;

        app.apply_forecast_result("130020".to_string(), None);

        assert_eq!(app.displayed_code(), Some("130020"));
        assert_eq!(app.content_scroll, 0);
    }

    #[test]
    fn absent_hierarchy_marks_startup_failure() {
        let mut app = App::new(AppActions::new());

        app.apply_hierarchy(None);

        assert!(!app.hierarchy_loaded);
        assert!(app.status_message.starts_with("Error"));
    }

    #[test]
    fn malformed_hierarchy_degrades_to_empty_tree() {
        let mut app = App::new(AppActions::new());

        app.apply_hierarchy(Some(json!({ "something": "else" })));

        assert!(app.hierarchy_loaded);
        assert!(app.groups.is_empty());
        assert!(app.visible_rows().is_empty());
    }

    #[test]
    fn search_filters_to_matching_area_rows() {
        let mut app = stub_app();

        app.start_search();
        for ch in "Tokyo".chars() {
            app.push_search_char(ch);
        }

        assert_eq!(app.visible_rows().len(), 1);
        app.activate_selected();
        assert_eq!(app.pending_fetch.as_deref(), Some("130010"));

        app.clear_search();
        assert_eq!(
            app.visible_rows(),
            vec![TreeRow::Center(0), TreeRow::Center(1)]
        );
    }

    #[test]
    fn end_to_end_over_stubbed_data() {
        // One center, one office: the tree renders one group with one row,
        // and activating it with a stubbed response shows the code and the
        // document text.
        let mut app = App::new(AppActions::new());
        app.apply_hierarchy(Some(json!({
            "centers": { "C1": { "name": "Kanto", "children": ["130010"] } },
            "offices": { "130010": { "name": "Tokyo" } }
        })));

        assert_eq!(app.visible_rows(), vec![TreeRow::Center(0)]);
        assert_eq!(app.groups[0].name, "Kanto");
        assert_eq!(app.groups[0].areas[0].label(), "Tokyo (130010)");

        app.activate_selected(); // expand
        app.selected_row = 1;
        app.activate_selected();
        let code = app.pending_fetch.take().unwrap();
        assert_eq!(code, "130010");

        app.apply_forecast_result(code, Some(json!({ "temp": 20 })));
        let Some("130010") = app.displayed_code() else {
            panic!("expected 130010 to be displayed");
        };
        let ContentState::Displaying {
            content: Content::Document(body),
            ..
        } = &app.content
        else {
            panic!("expected a document");
        };
        assert!(body.contains("\"temp\": 20"));
    }
}
