use crate::cli::CliArgs;
use crate::ui::widgets::popup::{centered_rect, ClearWidget};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_help_popup(f: &mut Frame<'_>) {
    let area = centered_rect(70, 80, f.area());
    f.render_widget(ClearWidget, area);

    let help_block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut help_text = vec![
        TextLine::from(vec![Span::styled(
            "JMA Forecast Area Browser",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )]),
        TextLine::from(""),
        TextLine::from(
            "Browse the JMA forecast area tree on the left; selecting an area fetches its raw forecast document into the right pane.",
        ),
        TextLine::from(""),
        TextLine::from(vec![Span::styled(
            "Keyboard Shortcuts:",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        TextLine::from(vec![
            Span::styled("  F1", key_style),
            Span::raw(" - Toggle this help screen"),
        ]),
        TextLine::from(vec![
            Span::styled("  ↑/↓", key_style),
            Span::raw(" - Move the selection / scroll the focused pane"),
        ]),
        TextLine::from(vec![
            Span::styled("  Enter", key_style),
            Span::raw(" - Expand a center / fetch the selected area's forecast"),
        ]),
        TextLine::from(vec![
            Span::styled("  ←/→", key_style),
            Span::raw(" - Collapse / expand the selected center"),
        ]),
        TextLine::from(vec![
            Span::styled("  Tab", key_style),
            Span::raw(" - Switch focus between sidebar and forecast pane"),
        ]),
        TextLine::from(vec![
            Span::styled("  /", key_style),
            Span::raw(" - Fuzzy-search areas (Esc clears)"),
        ]),
        TextLine::from(vec![
            Span::styled("  r", key_style),
            Span::raw(" - Refetch the displayed forecast (or retry startup)"),
        ]),
        TextLine::from(vec![
            Span::styled("  q", key_style),
            Span::raw(" - Quit application"),
        ]),
        TextLine::from(""),
        TextLine::from(vec![Span::styled(
            "Data source:",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        TextLine::from("  https://www.jma.go.jp/bosai/common/const/area.json"),
        TextLine::from("  https://www.jma.go.jp/bosai/forecast/data/forecast/{code}.json"),
        TextLine::from(""),
        TextLine::from(vec![Span::styled(
            "Command line:",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
    ];

    for line in CliArgs::help_text().lines() {
        help_text.push(TextLine::from(format!("  {line}")));
    }

    help_text.push(TextLine::from(""));
    help_text.push(TextLine::from(vec![Span::styled(
        "Press Esc to close this help screen",
        Style::default().fg(Color::Yellow),
    )]));

    let help_paragraph = Paragraph::new(Text::from(help_text))
        .block(help_block)
        .wrap(Wrap { trim: true });

    f.render_widget(help_paragraph, area);
}
