// TUI application state and key handling
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;
use reporeel_core::{FeedController, FetchOutcome, FetchTicket, Repository};

use crate::{
    filter_bar::{FilterBar, FilterChange},
    scroll::InfiniteScroll,
    theme::Theme,
    toast::ToastQueue,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,    // Browsing the feed
    Searching, // Typing in the search box
}

/// Side effects the event loop has to carry out for the app
#[derive(Debug)]
pub enum Action {
    Fetch(FetchTicket),
    OpenUrl(String),
    Quit,
}

pub struct App {
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub feed: FeedController,
    pub filter_bar: FilterBar,
    pub selected_index: usize,
    pub list_state: ListState,
    pub dark_mode: bool,
    pub toasts: ToastQueue,
    pub scroll: InfiniteScroll,
}

impl App {
    /// `toasts` should be the same queue the controller notifies
    pub fn new(feed: FeedController, toasts: ToastQueue, scroll_margin: usize, dark_mode: bool) -> Self {
        let filters = feed.filters();
        let filter_bar = FilterBar::new(&filters.language, filters.sort);
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self {
            should_quit: false,
            input_mode: InputMode::Normal,
            feed,
            filter_bar,
            selected_index: 0,
            list_state,
            dark_mode,
            toasts,
            scroll: InfiniteScroll::new(scroll_margin),
        }
    }

    pub fn theme(&self) -> Theme {
        Theme::for_mode(self.dark_mode)
    }

    pub fn toggle_theme(&mut self) {
        self.dark_mode = !self.dark_mode;
    }

    pub fn selected_repository(&self) -> Option<&Repository> {
        self.feed.repos().get(self.selected_index)
    }

    pub fn next_result(&mut self) {
        let len = self.feed.repos().len();
        if len > 0 {
            self.selected_index = (self.selected_index + 1).min(len - 1);
            self.list_state.select(Some(self.selected_index));
        }
    }

    pub fn previous_result(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    fn reset_selection(&mut self) {
        self.selected_index = 0;
        self.list_state.select(Some(0));
    }

    /// Route a filter bar change into the feed
    pub fn apply_filter(&mut self, change: FilterChange) -> Option<FetchTicket> {
        let ticket = match change {
            FilterChange::Language(language) => self.feed.set_language(language),
            FilterChange::Sort(sort) => self.feed.set_sort(sort),
            FilterChange::Search(query) => self.feed.submit_search(query),
            FilterChange::ClearSearch => self.feed.clear_search(),
        };
        if self.feed.repos().is_empty() {
            self.reset_selection();
        }
        ticket
    }

    pub fn complete(&mut self, outcome: FetchOutcome) -> Option<FetchTicket> {
        let next = self.feed.complete(outcome);
        let len = self.feed.repos().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
            self.list_state.select(Some(self.selected_index));
        }
        next
    }

    /// Ask for the next page if the selection has scrolled near the end
    pub fn poll_infinite_scroll(&mut self) -> Option<FetchTicket> {
        let fire = self.scroll.should_load(
            self.selected_index,
            self.feed.repos().len(),
            self.feed.is_loading(),
            self.feed.has_more(),
            (self.feed.generation(), self.feed.page()),
        );
        if fire {
            self.feed.load_more()
        } else {
            None
        }
    }

    pub fn toggle_star_selected(&mut self) -> Option<bool> {
        let id = self.selected_repository()?.id;
        self.feed.toggle_star(id)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        match self.input_mode {
            InputMode::Searching => self.handle_search_key(key),
            InputMode::Normal => self.handle_normal_key(key),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                let change = self.filter_bar.submit();
                self.apply_filter(change).map(Action::Fetch)
            }
            KeyCode::Esc => {
                self.filter_bar.stop_editing();
                self.input_mode = InputMode::Normal;
                None
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.filter_bar.clear_input();
                None
            }
            KeyCode::Char(c) => {
                self.filter_bar.push(c);
                None
            }
            KeyCode::Backspace => {
                self.filter_bar.backspace();
                None
            }
            _ => None,
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                Some(Action::Quit)
            }
            KeyCode::Char('/') => {
                self.filter_bar.start_editing();
                self.input_mode = InputMode::Searching;
                None
            }
            KeyCode::Char('l') => {
                let change = self.filter_bar.next_language();
                self.apply_filter(change).map(Action::Fetch)
            }
            KeyCode::Char('L') => {
                let change = self.filter_bar.previous_language();
                self.apply_filter(change).map(Action::Fetch)
            }
            KeyCode::Char('s') => {
                let change = self.filter_bar.next_sort();
                self.apply_filter(change).map(Action::Fetch)
            }
            KeyCode::Char('S') => {
                let change = self.filter_bar.previous_sort();
                self.apply_filter(change).map(Action::Fetch)
            }
            KeyCode::Char('c') => {
                let change = self.filter_bar.clear_search();
                self.apply_filter(change).map(Action::Fetch)
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.next_result();
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.previous_result();
                None
            }
            KeyCode::Char('f') | KeyCode::Char(' ') => {
                self.toggle_star_selected();
                None
            }
            KeyCode::Char('t') => {
                self.toggle_theme();
                None
            }
            // Manual retry after an error, same gate as scrolling
            KeyCode::Char('r') => self.feed.load_more().map(Action::Fetch),
            KeyCode::Enter => self
                .selected_repository()
                .map(|repo| Action::OpenUrl(repo.url.clone())),
            _ => None,
        }
    }
}
