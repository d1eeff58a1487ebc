// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dexview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dexview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! The renderer keeps its own view of the application (current page, open detail, preference
//! lists, status line) built only from [`AppEvent`]s. Key presses become commands that the run
//! loop hands to [`DexApp`] on the async runtime, so the terminal never blocks on the network.

use std::{
    collections::VecDeque,
    error::Error,
    io,
    sync::Arc,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use tokio::runtime::Handle;
use tracing::{debug, info};

use crate::app::DexApp;
use crate::controller::{AppEvent, EventReceiver, ListingMode, PageView};
use crate::model::{EntryDetail, EntryName, PageLabel, PaginationDescriptor};
use crate::remote::CatalogSource;
use crate::store::PreferenceStore;
use crate::ui::{StatusBoard, StatusKind, StatusNotice};

const FOCUS_COLOR: Color = Color::LightGreen;
const FAVORITE_COLOR: Color = Color::LightRed;
const MUTED_COLOR: Color = Color::DarkGray;
const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const FOOTER_BRAND_COLOR: Color = Color::White;
const FOOTER_BRAND: &str = "🅳 🅴 🆇 ";
const CARD_WIDTH: u16 = 26;
const PAGINATION_WINDOW: usize = 2;
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Work the run loop performs on behalf of a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    SetSearchTerm(String),
    GoToPage(usize),
    Reload,
    ShowDetail(String),
    ClearDetail,
    ToggleFavorite(EntryName),
}

/// Runs the interactive terminal UI until the user quits.
///
/// `dex` is started on `runtime` (catalog size plus page 1) once the terminal is ready.
pub fn run<C, S>(
    dex: Arc<DexApp<C, S>>,
    mut events: EventReceiver,
    runtime: Handle,
    status_ttl: Duration,
) -> Result<(), Box<dyn Error>>
where
    C: CatalogSource + 'static,
    S: PreferenceStore + 'static,
{
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(status_ttl);
    app.loading = true;

    {
        let dex = Arc::clone(&dex);
        runtime.spawn(async move {
            if let Err(err) = dex.start().await {
                debug!(error = %err, "initial page load failed");
            }
        });
    }
    info!("terminal UI started");

    while !app.should_quit {
        while let Ok(event) = events.try_recv() {
            app.apply_event(event);
        }
        app.status.expire(Instant::now());
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key);
                }
                _ => {}
            }
        }

        for command in app.take_commands() {
            dispatch(&dex, &runtime, command);
        }
    }

    info!("terminal UI closed");
    Ok(())
}

fn dispatch<C, S>(dex: &Arc<DexApp<C, S>>, runtime: &Handle, command: Command)
where
    C: CatalogSource + 'static,
    S: PreferenceStore + 'static,
{
    debug!(?command, "dispatching");
    match command {
        Command::ToggleFavorite(name) => {
            dex.toggle_favorite(&name);
        }
        Command::ClearDetail => dex.clear_detail(),
        // Tokens are taken here, in key order; the spawned tasks may start in any order.
        Command::SetSearchTerm(term) => {
            let token = dex.controller().begin_search();
            let dex = Arc::clone(dex);
            runtime.spawn(async move {
                let _ = dex.controller().set_search_term_with(token, &term).await;
            });
        }
        Command::GoToPage(page) => {
            let token = dex.controller().begin_request();
            let dex = Arc::clone(dex);
            runtime.spawn(async move {
                let _ = dex.controller().go_to_page_with(token, page).await;
            });
        }
        Command::Reload => {
            let token = dex.controller().begin_request();
            let dex = Arc::clone(dex);
            runtime.spawn(async move {
                let _ = dex.controller().load_current_page_with(token).await;
            });
        }
        Command::ShowDetail(name) => {
            let dex = Arc::clone(dex);
            runtime.spawn(async move {
                let _ = dex.show_detail(&name).await;
            });
        }
    }
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);
    let (search_area, main_area, pagination_area, footer_area) =
        (rows[0], rows[1], rows[2], rows[3]);

    let panes = Layout::default()
        .direction(if stack_panes_vertically(main_area) {
            Direction::Vertical
        } else {
            Direction::Horizontal
        })
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(main_area);
    let (grid_area, side_area) = (panes[0], panes[1]);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(side_area);
    let (detail_area, favorites_area, recents_area) = (side[0], side[1], side[2]);

    let editing = app.search_mode == SearchMode::Editing;
    let search_style = if editing {
        Style::default().fg(FOCUS_COLOR)
    } else {
        Style::default()
    };
    let search = Paragraph::new(app.search_query.clone()).block(
        Block::default()
            .borders(Borders::ALL)
            .title(view_title("Search", '/', search_title_tail(app).as_deref()))
            .border_style(search_style),
    );
    frame.render_widget(search, search_area);
    if editing {
        let cursor_x = search_area
            .x
            .saturating_add(1)
            .saturating_add(app.search_query.chars().count() as u16)
            .min(search_area.x.saturating_add(search_area.width.saturating_sub(2)));
        frame.set_cursor_position((cursor_x, search_area.y.saturating_add(1)));
    }

    let columns = grid_columns(grid_area.width.saturating_sub(2));
    app.grid_columns = columns;
    let grid = Paragraph::new(Text::from(grid_lines(app, columns)))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(grid_title(app))
                .border_style(panel_border_style(app.focus, Focus::Grid)),
        );
    frame.render_widget(grid, grid_area);

    let detail_favorite = app
        .detail
        .as_ref()
        .is_some_and(|detail| app.is_favorite(&detail.name));
    let detail_text = match &app.detail {
        Some(detail) => Text::from(detail_lines(detail, detail_favorite)),
        None => Text::from(Line::from(Span::styled(
            "Press Enter on a card or search by name",
            Style::default().fg(MUTED_COLOR),
        ))),
    };
    let detail = Paragraph::new(detail_text).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(view_title("Detail", 'F', None)),
    );
    frame.render_widget(detail, detail_area);

    let favorite_items = app
        .favorites_display()
        .map(|name| ListItem::new(name.to_string()))
        .collect::<Vec<_>>();
    let favorites = List::new(favorite_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(badge_title("Favorites", app.favorites.len()))
                .border_style(panel_border_style(app.focus, Focus::Favorites)),
        )
        .highlight_style(list_cursor_style(app.focus == Focus::Favorites));
    frame.render_stateful_widget(favorites, favorites_area, &mut app.favorites_state);

    let recent_items = app
        .recents
        .iter()
        .map(|name| ListItem::new(name.to_string()))
        .collect::<Vec<_>>();
    let recents = List::new(recent_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(badge_title("Recent searches", app.recents.len()))
                .border_style(panel_border_style(app.focus, Focus::Recents)),
        )
        .highlight_style(list_cursor_style(app.focus == Focus::Recents));
    frame.render_stateful_widget(recents, recents_area, &mut app.recents_state);

    if let Some(page) = &app.page {
        frame.render_widget(
            Paragraph::new(pagination_line(&page.pagination)).alignment(Alignment::Center),
            pagination_area,
        );
    }

    let footer = match app.status.current() {
        Some(notice) => footer_status_line(notice),
        None => footer_help_line(app),
    };
    frame.render_widget(Paragraph::new(footer), footer_area);
    frame.render_widget(
        Paragraph::new(footer_brand_line()).alignment(Alignment::Right),
        footer_area,
    );

    if app.show_help {
        render_help(frame, main_area);
    }
}

// Panel, title, footer and help helpers.
include!("chrome.rs");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchMode {
    Inactive,
    Editing,
}

struct App {
    page: Option<PageView>,
    page_error: Option<String>,
    loading: bool,
    detail: Option<EntryDetail>,
    favorites: Vec<EntryName>,
    recents: Vec<EntryName>,
    status: StatusBoard,
    focus: Focus,
    grid_cursor: usize,
    grid_columns: usize,
    favorites_state: ListState,
    recents_state: ListState,
    search_mode: SearchMode,
    search_query: String,
    show_help: bool,
    should_quit: bool,
    pending: VecDeque<Command>,
}

impl App {
    fn new(status_ttl: Duration) -> Self {
        Self {
            page: None,
            page_error: None,
            loading: false,
            detail: None,
            favorites: Vec::new(),
            recents: Vec::new(),
            status: StatusBoard::new(status_ttl),
            focus: Focus::Grid,
            grid_cursor: 0,
            grid_columns: 1,
            favorites_state: ListState::default(),
            recents_state: ListState::default(),
            search_mode: SearchMode::Inactive,
            search_query: String::new(),
            show_help: false,
            should_quit: false,
            pending: VecDeque::new(),
        }
    }

    fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::PageLoaded(view) => {
                let same_page = self.page.as_ref().is_some_and(|page| {
                    page.pagination.current_page() == view.pagination.current_page()
                        && page.term == view.term
                });
                self.grid_cursor = if same_page {
                    self.grid_cursor.min(view.entries.len().saturating_sub(1))
                } else {
                    0
                };
                self.loading = false;
                self.page_error = None;
                self.page = Some(view);
            }
            AppEvent::PageFailed { page, reason } => {
                self.loading = false;
                self.page_error = Some(format!("Page {page} could not be loaded: {reason}"));
            }
            AppEvent::DetailLoaded(detail) => self.detail = Some(detail),
            AppEvent::DetailCleared => self.detail = None,
            AppEvent::FavoritesChanged(favorites) => {
                self.favorites = favorites;
                clamp_list_state(&mut self.favorites_state, self.favorites.len());
            }
            AppEvent::RecentsChanged(recents) => {
                self.recents = recents;
                clamp_list_state(&mut self.recents_state, self.recents.len());
            }
            AppEvent::Status(notice) => self.status.post(notice),
        }
    }

    fn take_commands(&mut self) -> Vec<Command> {
        self.pending.drain(..).collect()
    }

    fn queue(&mut self, command: Command) {
        if matches!(
            command,
            Command::SetSearchTerm(_) | Command::GoToPage(_) | Command::Reload
        ) {
            self.loading = true;
        }
        self.pending.push_back(command);
    }

    fn is_favorite(&self, name: &EntryName) -> bool {
        self.favorites.contains(name)
    }

    /// Favorites newest first.
    fn favorites_display(&self) -> impl Iterator<Item = &EntryName> {
        self.favorites.iter().rev()
    }

    fn selected_card(&self) -> Option<&EntryDetail> {
        self.page.as_ref()?.entries.get(self.grid_cursor)
    }

    fn selected_favorite(&self) -> Option<&EntryName> {
        let idx = self.favorites_state.selected()?;
        self.favorites_display().nth(idx)
    }

    fn selected_recent(&self) -> Option<&EntryName> {
        self.recents.get(self.recents_state.selected()?)
    }

    /// The entry under the cursor in the focused panel.
    fn selected_name(&self) -> Option<EntryName> {
        match self.focus {
            Focus::Grid => self.selected_card().map(|entry| entry.name.clone()),
            Focus::Favorites => self.selected_favorite().cloned(),
            Focus::Recents => self.selected_recent().cloned(),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        self.handle_key_code(key.code);
    }

    fn handle_key_code(&mut self, code: KeyCode) -> bool {
        if self.search_mode == SearchMode::Editing {
            return self.handle_search_key(code);
        }
        if self.show_help {
            if matches!(code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                self.show_help = false;
                return true;
            }
            return false;
        }

        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('/') => self.search_mode = SearchMode::Editing,
            KeyCode::Char('c') => {
                let unfiltered = self.page.as_ref().is_some_and(|p| p.term.is_none());
                if self.search_query.is_empty() && unfiltered {
                    return false;
                }
                self.search_query.clear();
                self.queue(Command::SetSearchTerm(String::new()));
            }
            KeyCode::Tab => self.focus = self.focus.cycle(),
            KeyCode::BackTab => self.focus = self.focus.cycle_back(),
            KeyCode::Char('j') | KeyCode::Down => self.move_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-1),
            KeyCode::Char('l') => self.move_cursor(1),
            KeyCode::Char('h') => self.move_cursor(-1),
            KeyCode::Right | KeyCode::Char('n') => return self.go_to(PageLabel::Next),
            KeyCode::Left | KeyCode::Char('p') => return self.go_to(PageLabel::Previous),
            KeyCode::Home | KeyCode::Char('g') => return self.go_to(PageLabel::First),
            KeyCode::End | KeyCode::Char('G') => return self.go_to(PageLabel::Last),
            KeyCode::Char('r') => self.queue(Command::Reload),
            KeyCode::Enter => {
                let Some(name) = self.selected_name() else {
                    return false;
                };
                self.queue(Command::ShowDetail(name.to_string()));
            }
            KeyCode::Char('f') => {
                let Some(name) = self.selected_name() else {
                    return false;
                };
                self.queue(Command::ToggleFavorite(name));
            }
            KeyCode::Char('F') => {
                let Some(name) = self.detail.as_ref().map(|detail| detail.name.clone()) else {
                    return false;
                };
                self.queue(Command::ToggleFavorite(name));
            }
            KeyCode::Esc | KeyCode::Backspace => {
                if self.detail.is_none() {
                    return false;
                }
                self.queue(Command::ClearDetail);
            }
            _ => return false,
        }
        true
    }

    fn handle_search_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char(ch) => {
                self.search_query.push(ch);
                self.queue(Command::SetSearchTerm(self.search_query.clone()));
            }
            KeyCode::Backspace => {
                if self.search_query.pop().is_none() {
                    return false;
                }
                self.queue(Command::SetSearchTerm(self.search_query.clone()));
            }
            KeyCode::Enter => {
                self.search_mode = SearchMode::Inactive;
                let term = self.search_query.trim();
                if !term.is_empty() {
                    let term = term.to_owned();
                    self.queue(Command::ShowDetail(term));
                }
            }
            KeyCode::Esc => self.search_mode = SearchMode::Inactive,
            _ => return false,
        }
        true
    }

    fn go_to(&mut self, label: PageLabel) -> bool {
        let Some(pagination) = self.page.as_ref().map(|page| &page.pagination) else {
            return false;
        };
        let Some(target) = pagination.target_of(label) else {
            return false;
        };
        if target == pagination.current_page() {
            return false;
        }
        self.queue(Command::GoToPage(target));
        true
    }

    fn move_cursor(&mut self, delta: isize) {
        match self.focus {
            Focus::Grid => {
                let len = self.page.as_ref().map_or(0, |page| page.entries.len());
                self.grid_cursor = step_index(Some(self.grid_cursor), len, delta).unwrap_or(0);
            }
            Focus::Favorites => {
                let next = step_index(self.favorites_state.selected(), self.favorites.len(), delta);
                self.favorites_state.select(next);
            }
            Focus::Recents => {
                let next = step_index(self.recents_state.selected(), self.recents.len(), delta);
                self.recents_state.select(next);
            }
        }
    }
}

fn step_index(current: Option<usize>, len: usize, delta: isize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let Some(current) = current else {
        return Some(0);
    };
    let next = current.saturating_add_signed(delta).min(len - 1);
    Some(next)
}

fn clamp_list_state(state: &mut ListState, len: usize) {
    match state.selected() {
        _ if len == 0 => state.select(None),
        Some(idx) if idx >= len => state.select(Some(len - 1)),
        _ => {}
    }
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}
