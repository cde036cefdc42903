// Filter bar state: language picker, sort picker, search box
use reporeel_core::models::LANGUAGE_OPTIONS;
use reporeel_core::SortKey;

/// What the user just asked the feed to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    Language(String),
    Sort(SortKey),
    Search(String),
    ClearSearch,
}

#[derive(Debug, Clone)]
pub struct FilterBar {
    /// (value, label); value "" is "All Languages"
    languages: Vec<(String, String)>,
    language_index: usize,
    sort: SortKey,
    input: String,
    editing: bool,
}

impl FilterBar {
    /// A language that isn't in the stock list gets appended to it
    pub fn new(language: &str, sort: SortKey) -> Self {
        let mut languages: Vec<(String, String)> = LANGUAGE_OPTIONS
            .iter()
            .map(|(value, label)| (value.to_string(), label.to_string()))
            .collect();

        let language = language.trim();
        let language_index = match languages.iter().position(|(value, _)| value == language) {
            Some(index) => index,
            None => {
                languages.push((language.to_string(), language.to_string()));
                languages.len() - 1
            }
        };

        Self {
            languages,
            language_index,
            sort,
            input: String::new(),
            editing: false,
        }
    }

    pub fn language(&self) -> &str {
        &self.languages[self.language_index].0
    }

    pub fn language_label(&self) -> &str {
        &self.languages[self.language_index].1
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn next_language(&mut self) -> FilterChange {
        self.language_index = (self.language_index + 1) % self.languages.len();
        FilterChange::Language(self.language().to_string())
    }

    pub fn previous_language(&mut self) -> FilterChange {
        self.language_index = self
            .language_index
            .checked_sub(1)
            .unwrap_or(self.languages.len() - 1);
        FilterChange::Language(self.language().to_string())
    }

    pub fn next_sort(&mut self) -> FilterChange {
        self.sort = self.sort.next();
        FilterChange::Sort(self.sort)
    }

    pub fn previous_sort(&mut self) -> FilterChange {
        self.sort = self.sort.previous();
        FilterChange::Sort(self.sort)
    }

    pub fn start_editing(&mut self) {
        self.editing = true;
    }

    /// Leave the box without submitting; typed text stays
    pub fn stop_editing(&mut self) {
        self.editing = false;
    }

    pub fn push(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    /// Enter pressed: the only way typed text reaches the feed
    pub fn submit(&mut self) -> FilterChange {
        self.editing = false;
        FilterChange::Search(self.input.trim().to_string())
    }

    /// One-click clear of the search box
    pub fn clear_search(&mut self) -> FilterChange {
        self.input.clear();
        self.editing = false;
        FilterChange::ClearSearch
    }

    /// Read-only "what's active" text, e.g. `Rust · Most Stars`
    pub fn indicator(&self) -> String {
        if self.language().is_empty() {
            self.sort.label().to_string()
        } else {
            format!("{} · {}", self.language(), self.sort.label())
        }
    }
}

impl Default for FilterBar {
    fn default() -> Self {
        Self::new("", SortKey::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_all_languages() {
        let bar = FilterBar::default();
        assert_eq!(bar.language(), "");
        assert_eq!(bar.language_label(), "All Languages");
        assert_eq!(bar.indicator(), "Most Stars");
    }

    #[test]
    fn test_language_cycle_wraps_both_ways() {
        let mut bar = FilterBar::default();
        assert_eq!(bar.next_language(), FilterChange::Language("JavaScript".into()));
        bar.previous_language();
        assert_eq!(
            bar.previous_language(),
            FilterChange::Language("PHP".into())
        );
        assert_eq!(bar.next_language(), FilterChange::Language(String::new()));
    }

    #[test]
    fn test_unknown_language_is_appended() {
        let bar = FilterBar::new("Haskell", SortKey::Updated);
        assert_eq!(bar.language(), "Haskell");
        assert_eq!(bar.indicator(), "Haskell · Recently Updated");
    }

    #[test]
    fn test_typing_does_not_submit() {
        let mut bar = FilterBar::default();
        bar.start_editing();
        for c in "tui ".chars() {
            bar.push(c);
        }
        bar.backspace();
        bar.push('s');
        assert_eq!(bar.input(), "tuis");
        assert!(bar.is_editing());

        assert_eq!(bar.submit(), FilterChange::Search("tuis".into()));
        assert!(!bar.is_editing());
    }

    #[test]
    fn test_clear_search_empties_box() {
        let mut bar = FilterBar::default();
        bar.push('x');
        assert_eq!(bar.clear_search(), FilterChange::ClearSearch);
        assert_eq!(bar.input(), "");
    }

    #[test]
    fn test_sort_cycle() {
        let mut bar = FilterBar::default();
        assert_eq!(bar.next_sort(), FilterChange::Sort(SortKey::Forks));
        assert_eq!(bar.previous_sort(), FilterChange::Sort(SortKey::Stars));
        assert_eq!(bar.previous_sort(), FilterChange::Sort(SortKey::Created));
        assert_eq!(bar.indicator(), "Newest");
    }
}
