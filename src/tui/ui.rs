// UI rendering logic
//
// All drawing lives here. Ratatui is immediate-mode: draw() rebuilds the
// widget tree from scratch every frame out of whatever App currently
// holds. Nothing in this module mutates the app - the event loop drives
// state, draw() only paints it.

use super::app::App;
use crate::gallery::{FetchPhase, Item};
use crate::logging::{LogEntry, LogLevel};
use crate::tui::theme::Theme;
use crate::util::{fit_width, pad_to_width};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{
        Block, Borders, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
    },
    Frame,
};

/// Fixed chrome rows around the gallery list: title bar (3), activity
/// strip (3), status bar (3), plus the log panel when visible.
///
/// The event loop uses this to tell the app how many image rows fit on
/// screen before the frame is drawn, so the same number drives both
/// scrolling and the end-of-list observation.
pub fn gallery_rows(terminal_height: u16, show_logs: bool) -> usize {
    let mut chrome = 3 + 3 + 3;
    if show_logs {
        chrome += 6;
    }
    // Two more rows for the gallery block's own borders.
    (terminal_height as usize).saturating_sub(chrome + 2)
}

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &App) {
    let theme = app.theme.theme();

    // Split the terminal into vertical sections:
    // - Title bar (3 lines fixed)
    // - Gallery list (fills remaining space)
    // - Activity strip (3 lines - what the loader is doing)
    // - System logs (6 lines, toggled with 'l')
    // - Status bar (3 lines fixed)
    let constraints = if app.show_logs {
        vec![
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Length(3),
        ]
    } else {
        vec![
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(3),
        ]
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    render_title(f, chunks[0], app, &theme);

    if app.show_help {
        render_help_view(f, chunks[1], app, &theme);
    } else {
        render_gallery(f, chunks[1], app, &theme);
    }

    render_activity_strip(f, chunks[2], app, &theme);

    if app.show_logs {
        render_logs_panel(f, chunks[3], app, &theme);
    }

    let status_chunk = if app.show_logs { chunks[4] } else { chunks[3] };
    render_status(f, status_chunk, app, &theme);
}

/// Render the title bar
fn render_title(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    // Spinner only while a page is actually in flight
    let indicator = if app.loader.phase().is_loading() {
        format!(" {} ", app.spinner_char())
    } else {
        String::new()
    };

    let title = Paragraph::new(format!(" ✦ photofall{}", indicator))
        .style(theme.title_style())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style())
                .title_top(Line::from(" ? ").right_aligned()),
        );

    f.render_widget(title, area);
}

/// Render the scrolling image list
fn render_gallery(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let images = app.loader.items();

    if images.is_empty() {
        let placeholder = match app.loader.phase() {
            FetchPhase::Failed { .. } => "  nothing loaded yet, press r to retry",
            FetchPhase::Exhausted => "  the catalog came back empty",
            _ => "  fetching the first page…",
        };
        let paragraph = Paragraph::new(placeholder).style(theme.dim_style()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style())
                .title(" Gallery "),
        );
        f.render_widget(paragraph, area);
        return;
    }

    let inner_width = area.width.saturating_sub(2) as usize;
    let (start, end) = app.scroll.visible_range();

    let rows: Vec<ListItem> = images[start..end]
        .iter()
        .map(|image| ListItem::new(format_image_row(image, inner_width, theme)))
        .collect();

    let title = if app.loader.phase().has_more() {
        format!(" Gallery ({} images) ", images.len())
    } else {
        format!(" Gallery ({} images, complete) ", images.len())
    };
    let list = List::new(rows).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style())
            .title(title),
    );

    f.render_widget(list, area);

    // Render scrollbar if content overflows
    if app.scroll.needs_scrollbar() {
        let height = area.height.saturating_sub(2) as usize; // Account for borders
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"));

        let mut scrollbar_state =
            ScrollbarState::new(images.len().saturating_sub(height)).position(app.scroll.offset());

        f.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
    }
}

/// Format one image as a single list row: id, author, dimensions, URL.
/// Column budgets are in display columns, not bytes.
fn format_image_row<'a>(image: &'a Item, inner_width: usize, theme: &Theme) -> Line<'a> {
    let id_col = format!("{:>6}", format!("#{}", image.id));
    let author_col = pad_to_width(&fit_width(&image.author, 22), 22);
    let dims_col = format!("{:>11}", image.dimensions());

    let mut spans = vec![
        Span::styled(id_col, theme.dim_style()),
        Span::raw("  "),
        Span::styled(author_col, theme.author_style()),
        Span::raw("  "),
        Span::styled(dims_col, Style::default().fg(theme.detail)),
    ];

    // Whatever columns remain go to the download link
    let used = 6 + 2 + 22 + 2 + 11 + 2;
    let link_budget = inner_width.saturating_sub(used);
    if link_budget > 0 {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            fit_width(&image.download_url, link_budget),
            Style::default().fg(theme.link),
        ));
    }

    Line::from(spans)
}

/// Render the activity strip: one line describing what the loader is
/// doing right now. The failed state doubles as the retry prompt.
fn render_activity_strip(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let line = match app.loader.phase() {
        FetchPhase::Idle => {
            if app.loader.items().is_empty() {
                Line::from(Span::styled("  warming up…", theme.dim_style()))
            } else {
                Line::from(Span::styled(
                    format!("  scroll to the end to load page {}", app.loader.next_page()),
                    theme.dim_style(),
                ))
            }
        }
        FetchPhase::Loading => Line::from(vec![
            Span::styled(
                format!("  {} ", app.spinner_char()),
                Style::default().fg(theme.accent),
            ),
            Span::styled(
                format!("loading page {}…", app.loader.next_page()),
                theme.base_style(),
            ),
        ]),
        FetchPhase::Exhausted => Line::from(Span::styled(
            format!("  ● end of catalog · {} images", app.loader.items().len()),
            theme.dim_style(),
        )),
        FetchPhase::Failed { error } => Line::from(vec![
            Span::styled("  ✗ ", theme.error_style()),
            Span::styled(error.as_str(), theme.error_style()),
            Span::styled(" · press r to retry", theme.base_style()),
        ]),
    };

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style()),
    );

    f.render_widget(paragraph, area);
}

/// Render the Help view in place of the gallery
fn render_help_view(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let content = format!(
        r#"
  Keyboard Shortcuts
  ──────────────────────────────────

  Navigation
    ↑/↓, j/k    Scroll one image
    PgUp/PgDn   Scroll one screen
    Home, g     Jump to the top
    End, G      Jump to the bottom

  Gallery
    r           Retry after a failed page
    t           Cycle color theme
    l           Toggle the log panel

  General
    ?           Help (this screen)
    Esc         Close help
    q           Quit

  Mouse
    Scroll      Move through the gallery

  ──────────────────────────────────
  Theme: {}
    "#,
        app.theme.name()
    );

    let paragraph = Paragraph::new(content).style(theme.base_style()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style())
            .title(" Help (?) ─ Press Esc to go back "),
    );

    f.render_widget(paragraph, area);
}

/// Render system logs panel at the bottom of the screen
fn render_logs_panel(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let height = area.height.saturating_sub(2) as usize; // Account for borders
    let log_entries = app.log_buffer.get_recent(height);

    let items: Vec<ListItem> = log_entries
        .iter()
        .map(|entry| {
            let formatted = format_log_entry(entry);
            let style = log_level_style(&entry.level, theme);
            ListItem::new(formatted).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style())
            .title(" System Logs "),
    );

    f.render_widget(list, area);
}

/// Format a log entry for display
fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "[{}] {:5} {}: {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.target,
        entry.message
    )
}

/// Get color style for log level
fn log_level_style(level: &LogLevel, theme: &Theme) -> Style {
    match level {
        LogLevel::Error => Style::default().fg(theme.log_error),
        LogLevel::Warn => Style::default().fg(theme.log_warn),
        LogLevel::Info => Style::default().fg(theme.log_info),
        LogLevel::Debug => Style::default().fg(theme.log_debug),
        LogLevel::Trace => Style::default().fg(theme.log_trace),
    }
}

/// Render the status bar: uptime, source, progress, phase, theme
fn render_status(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let status_text = format!(
        " {} │ {} │ {} images │ page {} │ {} │ {}",
        app.uptime(),
        app.source_name(),
        app.loader.items().len(),
        app.loader.next_page(),
        app.loader.phase().label(),
        app.theme.name(),
    );

    let status = Paragraph::new(status_text)
        .style(theme.status_style())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style()),
        );

    f.render_widget(status, area);
}
