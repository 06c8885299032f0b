use crate::app::state::{
    forecast_header, Content, ContentState, PaneFocus, TreeRow, FETCH_FAILURE_TEXT,
    HIERARCHY_FAILURE_TEXT, IDLE_PLACEHOLDER,
};
use crate::app::App;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_browse(app: &App, f: &mut Frame<'_>) {
    if !app.hierarchy_loaded {
        render_startup_failure(f);
        return;
    }

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title area
            Constraint::Min(5),    // Panes
            Constraint::Length(3), // Status area
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(2, 1)));

    render_title(f, main_layout[0]);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(40), Constraint::Min(20)])
        .split(main_layout[1]);

    render_sidebar(app, f, panes[0]);
    render_content(app, f, panes[1]);
    render_status(app, f, main_layout[2]);
    render_shortcuts(f, main_layout[3]);
}

/// A wholly absent hierarchy blocks the normal layout; only a single error
/// message is shown and the process stays interactive.
fn render_startup_failure(f: &mut Frame<'_>) {
    let block = Block::default()
        .title("== JMA Forecast Area Browser ==")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let lines = vec![
        TextLine::from(""),
        TextLine::from(Span::styled(
            HIERARCHY_FAILURE_TEXT,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        TextLine::from(Span::styled(
            "r: Retry   q: Quit",
            Style::default().fg(Color::Gray),
        )),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .alignment(Alignment::Center);

    f.render_widget(paragraph, f.area());
}

fn render_title(f: &mut Frame<'_>, area: Rect) {
    let title_block = Block::default()
        .title("== JMA Forecast Area Browser ==")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let title_paragraph = Paragraph::new(TextLine::from(vec![
        Span::styled(
            "JMA ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Forecast Area Browser",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .block(title_block)
    .alignment(Alignment::Left);

    f.render_widget(title_paragraph, area);
}

fn pane_border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    }
}

fn render_sidebar(app: &App, f: &mut Frame<'_>, area: Rect) {
    let title = if app.search_active {
        let blink = (app.animation_counter * 2.0).sin() > 0.0;
        let cursor = if blink { "█" } else { " " };
        format!(" Areas /{}{} ", app.search_query, cursor)
    } else {
        " Areas ".to_string()
    };

    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(Color::Green))
        .borders(Borders::ALL)
        .border_style(pane_border_style(app.focus == PaneFocus::Sidebar));

    let rows = app.visible_rows();
    if rows.is_empty() {
        let message = if app.search_query.is_empty() {
            "No areas available"
        } else {
            "No matching areas"
        };
        let paragraph = Paragraph::new(message)
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, area);
        return;
    }

    let total_rows = rows.len();
    let max_visible_rows = area.height.saturating_sub(2) as usize;

    let mut scroll_offset = 0;
    if total_rows > max_visible_rows {
        if app.selected_row >= max_visible_rows + scroll_offset {
            scroll_offset = app.selected_row.saturating_sub(max_visible_rows) + 1;
        } else if app.selected_row < scroll_offset {
            scroll_offset = app.selected_row;
        }
    }

    let lines: Vec<TextLine<'_>> = rows
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(max_visible_rows)
        .map(|(i, row)| tree_row_line(app, *row, i == app.selected_row))
        .collect();

    let paragraph = Paragraph::new(Text::from(lines)).block(block);
    f.render_widget(paragraph, area);
}

fn tree_row_line(app: &App, row: TreeRow, is_selected: bool) -> TextLine<'_> {
    let selected_style = Style::default()
        .bg(Color::Rgb(0, 0, 238))
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    match row {
        TreeRow::Center(gi) => {
            let Some(group) = app.groups.get(gi) else {
                return TextLine::from("");
            };
            let marker = if app.expanded.contains(&gi) {
                "▾"
            } else {
                "▸"
            };
            let base_style = if is_selected {
                selected_style
            } else {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            };
            let subtitle_style = if is_selected {
                selected_style
            } else {
                Style::default().fg(Color::Gray)
            };

            let mut spans = vec![Span::styled(format!("{marker} {}", group.name), base_style)];
            if !group.en_name.is_empty() {
                spans.push(Span::styled(format!("  {}", group.en_name), subtitle_style));
            }
            TextLine::from(spans)
        }
        TreeRow::Area(gi, ci) => {
            let Some(row) = app.groups.get(gi).and_then(|g| g.areas.get(ci)) else {
                return TextLine::from("");
            };
            let style = if is_selected {
                selected_style
            } else {
                Style::default().fg(Color::White)
            };
            TextLine::from(Span::styled(format!("   {}", row.label()), style))
        }
    }
}

fn render_content(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Forecast ")
        .title_style(Style::default().fg(Color::Green))
        .borders(Borders::ALL)
        .border_style(pane_border_style(app.focus == PaneFocus::Content));

    match &app.content {
        ContentState::Idle => {
            let paragraph = Paragraph::new(TextLine::from(Span::styled(
                IDLE_PLACEHOLDER,
                Style::default().fg(Color::Gray),
            )))
            .block(block)
            .alignment(Alignment::Center);
            f.render_widget(paragraph, area);
        }
        ContentState::Displaying { code, content } => match content {
            Content::Document(body) => {
                let mut lines = vec![
                    TextLine::from(Span::styled(
                        forecast_header(code),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    )),
                    TextLine::from(""),
                ];
                lines.extend(body.lines().map(TextLine::from));

                let paragraph = Paragraph::new(Text::from(lines))
                    .block(block)
                    .wrap(Wrap { trim: false })
                    .scroll((app.content_scroll, 0));
                f.render_widget(paragraph, area);
            }
            Content::Failed => {
                let paragraph = Paragraph::new(TextLine::from(Span::styled(
                    FETCH_FAILURE_TEXT,
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )))
                .block(block)
                .alignment(Alignment::Center);
                f.render_widget(paragraph, area);
            }
        },
    }
}

fn render_status(app: &App, f: &mut Frame<'_>, area: Rect) {
    let status_block = Block::default()
        .title(" Status ")
        .title_style(Style::default().fg(Color::Yellow))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let status_text = if app.status_message.is_empty() {
        Text::from("")
    } else {
        let style = if app.status_message.starts_with("Error") {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Green)
        };

        Text::from(Span::styled(&app.status_message, style))
    };

    let status_paragraph = Paragraph::new(status_text)
        .block(status_block)
        .wrap(Wrap { trim: true });
    f.render_widget(status_paragraph, area);
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let label_style = Style::default().fg(Color::Gray);

    let shortcuts = TextLine::from(vec![
        Span::styled("↑/↓", key_style),
        Span::styled(": Navigate | ", label_style),
        Span::styled("Enter", key_style),
        Span::styled(": Expand/Select | ", label_style),
        Span::styled("Tab", key_style),
        Span::styled(": Focus | ", label_style),
        Span::styled("/", key_style),
        Span::styled(": Search | ", label_style),
        Span::styled("r", key_style),
        Span::styled(": Reload | ", label_style),
        Span::styled("F1", key_style),
        Span::styled(": Help | ", label_style),
        Span::styled("q", key_style),
        Span::styled(": Quit", label_style),
    ]);

    let shortcuts_paragraph = Paragraph::new(shortcuts).alignment(Alignment::Center);
    f.render_widget(shortcuts_paragraph, area);
}
