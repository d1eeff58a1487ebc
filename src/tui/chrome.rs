// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dexview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dexview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Layout, title, card, footer, and help helpers used by TUI rendering.
fn stack_panes_vertically(area: Rect) -> bool {
    area.width < 90
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Grid,
    Favorites,
    Recents,
}

impl Focus {
    fn cycle(self) -> Self {
        match self {
            Self::Grid => Self::Favorites,
            Self::Favorites => Self::Recents,
            Self::Recents => Self::Grid,
        }
    }

    fn cycle_back(self) -> Self {
        match self {
            Self::Grid => Self::Recents,
            Self::Favorites => Self::Grid,
            Self::Recents => Self::Favorites,
        }
    }
}

fn panel_border_style(active: Focus, panel: Focus) -> Style {
    if active != panel {
        return Style::default();
    }

    Style::default().fg(FOCUS_COLOR)
}

fn list_cursor_style(focused: bool) -> Style {
    if focused {
        Style::default().bg(Color::Rgb(0, 70, 0)).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    }
}

fn view_title(label: &str, key: char, tail: Option<&str>) -> String {
    let mut title = format!("─[{key}]─ {label}");
    if let Some(tail) = tail {
        let tail = tail.trim();
        if !tail.is_empty() {
            title.push(' ');
            title.push_str(tail);
        }
    }
    title.push(' ');
    title
}

fn badge_title(label: &str, count: usize) -> String {
    format!("─ {label} [{count}] ")
}

fn search_title_tail(app: &App) -> Option<String> {
    match app.search_mode {
        SearchMode::Editing => Some("— typing filters, Enter looks up by name".to_owned()),
        SearchMode::Inactive => None,
    }
}

fn grid_title(app: &App) -> String {
    let loading = if app.loading { " …" } else { "" };
    let Some(page) = &app.page else {
        return format!("─ Catalog{loading} ");
    };
    let position = format!(
        "page {}/{}",
        page.pagination.current_page(),
        page.pagination.total_pages()
    );
    match (page.mode, page.term.as_deref()) {
        (ListingMode::Filtered, Some(term)) => format!(
            "─ Search \"{term}\" — {} {} · {position}{loading} ",
            page.item_count,
            if page.item_count == 1 { "match" } else { "matches" }
        ),
        _ => format!("─ Catalog — {} entries · {position}{loading} ", page.item_count),
    }
}

fn grid_columns(inner_width: u16) -> usize {
    usize::from((inner_width / CARD_WIDTH).max(1))
}

fn card_label(entry: &EntryDetail, favorite: bool) -> String {
    let heart = if favorite { '♥' } else { '♡' };
    format!("{heart} #{:03} {}", entry.id, entry.name)
}

fn grid_lines(app: &App, columns: usize) -> Vec<Line<'static>> {
    if let Some(error) = &app.page_error {
        return vec![
            Line::from(Span::styled(error.clone(), Style::default().fg(Color::LightRed))),
            Line::from(Span::styled(
                "Press r to retry.",
                Style::default().fg(MUTED_COLOR),
            )),
        ];
    }
    let Some(page) = &app.page else {
        return vec![Line::from(Span::styled(
            "Loading catalog…",
            Style::default().fg(MUTED_COLOR),
        ))];
    };
    if page.entries.is_empty() {
        let message = match &page.term {
            Some(term) => format!("No entries match \"{term}\""),
            None => "The catalog is empty".to_owned(),
        };
        return vec![Line::from(Span::styled(message, Style::default().fg(MUTED_COLOR)))];
    }

    let grid_focused = app.focus == Focus::Grid;
    page.entries
        .chunks(columns.max(1))
        .enumerate()
        .map(|(row, chunk)| {
            let spans = chunk
                .iter()
                .enumerate()
                .map(|(col, entry)| {
                    let favorite = app.is_favorite(&entry.name);
                    let label = card_label(entry, favorite);
                    let cell = format!("{label:<width$}", width = usize::from(CARD_WIDTH));
                    let mut style = if favorite {
                        Style::default().fg(FAVORITE_COLOR)
                    } else {
                        Style::default()
                    };
                    if row * columns + col == app.grid_cursor {
                        style = style.add_modifier(Modifier::REVERSED);
                        if grid_focused {
                            style = style.add_modifier(Modifier::BOLD);
                        }
                    }
                    Span::styled(cell, style)
                })
                .collect::<Vec<_>>();
            Line::from(spans)
        })
        .collect()
}

fn detail_lines(detail: &EntryDetail, favorite: bool) -> Vec<Line<'static>> {
    let label_style = Style::default().fg(FOOTER_LABEL_COLOR);
    let heart = if favorite {
        Span::styled(" ♥", Style::default().fg(FAVORITE_COLOR))
    } else {
        Span::styled(" ♡", Style::default().fg(MUTED_COLOR))
    };
    let field = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{label:<10}"), label_style),
            Span::raw(value),
        ])
    };

    vec![
        Line::from(vec![
            Span::styled(
                format!("#{:03} {}", detail.id, detail.name),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            heart,
        ]),
        Line::default(),
        field("Types", detail.types_label()),
        field("Height", format!("{:.1} m", detail.height_metres())),
        field("Weight", format!("{:.1} kg", detail.weight_kilograms())),
        field("Abilities", detail.abilities_label()),
        field(
            "Artwork",
            detail.artwork_url.clone().unwrap_or_else(|| "—".to_owned()),
        ),
    ]
}

/// Page numbers to show around `current`, with `None` marking an elided run.
fn visible_page_numbers(current: usize, total: usize, window: usize) -> Vec<Option<usize>> {
    let mut out = Vec::new();
    let mut last_shown = 0;
    for page in 1..=total {
        let near_current = page.abs_diff(current) <= window;
        if page == 1 || page == total || near_current {
            if last_shown != 0 && page > last_shown + 1 {
                out.push(None);
            }
            out.push(Some(page));
            last_shown = page;
        }
    }
    out
}

fn pagination_line(pagination: &PaginationDescriptor) -> Line<'static> {
    let current = pagination.current_page();
    let total = pagination.total_pages();
    let key_style = Style::default().fg(FOOTER_KEY_COLOR);
    let disabled_style = Style::default().fg(MUTED_COLOR);
    let current_style = Style::default()
        .fg(Color::Black)
        .bg(FOCUS_COLOR)
        .add_modifier(Modifier::BOLD);

    let edge = |label: PageLabel| {
        let style = match pagination.target_of(label) {
            Some(target) if target != current => key_style,
            _ => disabled_style,
        };
        Span::styled(label.to_string(), style)
    };

    let mut spans = vec![edge(PageLabel::First), Span::raw(" "), edge(PageLabel::Previous)];
    for page in visible_page_numbers(current, total, PAGINATION_WINDOW) {
        spans.push(Span::raw(" "));
        match page {
            Some(page) if page == current => {
                spans.push(Span::styled(format!(" {page} "), current_style));
            }
            Some(page) => spans.push(Span::raw(page.to_string())),
            None => spans.push(Span::styled("…", disabled_style)),
        }
    }
    spans.extend([
        Span::raw(" "),
        edge(PageLabel::Next),
        Span::raw(" "),
        edge(PageLabel::Last),
    ]);
    Line::from(spans)
}

fn footer_status_line(notice: &StatusNotice) -> Line<'static> {
    let color = match notice.kind {
        StatusKind::Info => Color::White,
        StatusKind::Warning => Color::Yellow,
        StatusKind::Error => Color::LightRed,
    };
    Line::from(vec![Span::styled(
        notice.message.clone(),
        Style::default().fg(color),
    )])
}

fn footer_help_line(app: &App) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();
    if app.search_mode == SearchMode::Editing {
        push_footer_entry(&mut spans, "LOOKUP", "Enter");
        push_footer_entry(&mut spans, "DONE", "Esc");
        return Line::from(spans);
    }

    push_footer_entry(&mut spans, "SEARCH", "/");
    push_footer_entry(&mut spans, "PAGE", "←/→");
    push_footer_entry(&mut spans, "OPEN", "Enter");
    push_footer_entry(&mut spans, "FAV", "f");
    push_footer_entry(&mut spans, "FOCUS", "Tab");
    push_footer_entry(&mut spans, "HELP", "?");
    push_footer_entry(&mut spans, "QUIT", "q");
    Line::from(spans)
}

fn footer_brand_line() -> Line<'static> {
    Line::from(vec![Span::styled(
        FOOTER_BRAND.to_owned(),
        Style::default().fg(FOOTER_BRAND_COLOR),
    )])
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, label: &str, value: &str) {
    if !spans.is_empty() {
        spans.push(Span::styled(" | ", Style::default().fg(FOOTER_LABEL_COLOR)));
    }
    spans.push(Span::styled(
        format!("{}:", footer_label_ucfirst(label)),
        Style::default().fg(FOOTER_LABEL_COLOR),
    ));
    spans.push(Span::styled(
        value.to_owned(),
        Style::default()
            .fg(FOOTER_KEY_COLOR)
            .add_modifier(Modifier::BOLD),
    ));
}

fn footer_label_ucfirst(label: &str) -> String {
    let lower = label.to_lowercase();
    let mut chars = lower.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = first.to_uppercase().collect::<String>();
    out.push_str(chars.as_str());
    out
}

fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let vertical_margin = (100u16.saturating_sub(height_percent)) / 2;
    let horizontal_margin = (100u16.saturating_sub(width_percent)) / 2;

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(vertical_margin),
            Constraint::Percentage(height_percent),
            Constraint::Percentage(vertical_margin),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(horizontal_margin),
            Constraint::Percentage(width_percent),
            Constraint::Percentage(horizontal_margin),
        ])
        .split(vertical[1])[1]
}

const HELP_KEYS: &[(&str, &str)] = &[
    ("/", "Edit search (live filter)"),
    ("Enter (search)", "Look up the typed name"),
    ("Esc (search)", "Stop editing"),
    ("c", "Clear search"),
    ("Tab/Shift-Tab", "Focus next/previous panel"),
    ("j/k, ↑/↓", "Move cursor"),
    ("←/→, p/n", "Previous/next page"),
    ("Home/End, g/G", "First/last page"),
    ("Enter", "Open selected entry"),
    ("f", "Toggle favorite (selected)"),
    ("F", "Toggle favorite (detail)"),
    ("Esc/Backspace", "Close detail"),
    ("r", "Reload page"),
    ("?", "Help (toggle)"),
    ("q", "Quit"),
];

fn render_help(frame: &mut Frame<'_>, main_area: Rect) {
    let area = centered_rect(70, 80, main_area);
    frame.render_widget(Clear, area);

    let key_style = Style::default()
        .fg(FOOTER_KEY_COLOR)
        .add_modifier(Modifier::BOLD);
    let key_width = HELP_KEYS.iter().map(|(key, _)| key.chars().count()).max().unwrap_or(0);
    let lines = HELP_KEYS
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(format!("{key:>key_width$}"), key_style),
                Span::raw("  "),
                Span::raw((*desc).to_owned()),
            ])
        })
        .collect::<Vec<_>>();

    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title(" Help "))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
