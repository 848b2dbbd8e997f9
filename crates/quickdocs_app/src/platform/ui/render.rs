use quickdocs_core::{
    AppViewModel, ConfidenceTier, Connectivity, Role, Severity, TranscriptEntry, UploadStatus,
};
use ratatui::{prelude::*, widgets::*};

use super::constants::APP_TITLE;
use super::UiState;

/// Draws one frame: status header, transcript, notices, input line.
pub fn draw(f: &mut Frame, view: &AppViewModel, ui: &UiState) {
    let footer = footer_lines(view, ui);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(3),
            Constraint::Length(footer.len() as u16),
            Constraint::Length(3),
        ])
        .split(f.area());

    let header = Paragraph::new(header_lines(view)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(format!(" {APP_TITLE} ")),
    );
    f.render_widget(header, chunks[0]);

    draw_transcript(f, chunks[1], view, ui.scroll);
    f.render_widget(Paragraph::new(footer), chunks[2]);
    draw_input(f, chunks[3], &ui.input);
}

fn draw_transcript(f: &mut Frame, area: Rect, view: &AppViewModel, scroll: usize) {
    let lines = transcript_lines(view);
    // Show the bottom of the conversation, scrolled back by `scroll`.
    let max_visible = area.height.saturating_sub(2) as usize;
    let total = lines.len();
    let offset = scroll.min(total.saturating_sub(max_visible));
    let start = total.saturating_sub(max_visible + offset);

    let title = if offset > 0 {
        format!("Chat (scrolled {offset})")
    } else {
        "Chat".to_string()
    };
    let paragraph = Paragraph::new(lines.into_iter().skip(start).collect::<Vec<_>>())
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn draw_input(f: &mut Frame, area: Rect, input: &str) {
    let block = Block::default().borders(Borders::ALL).title("Message");
    let inner = block.inner(area);
    // Keep the end of a long line visible.
    let room = inner.width.saturating_sub(1) as usize;
    let skip = input.chars().count().saturating_sub(room);
    let visible: String = input.chars().skip(skip).collect();
    let cursor_x = inner.x + Span::raw(visible.as_str()).width() as u16;

    f.render_widget(Paragraph::new(visible).block(block), area);
    f.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), inner.y));
}

pub(crate) fn header_lines(view: &AppViewModel) -> Vec<Line<'static>> {
    let documents = view
        .document_count
        .map(|count| count.to_string())
        .unwrap_or_else(|| "-".to_string());
    let mut status = vec![
        Span::styled(
            connectivity_label(view.connectivity),
            connectivity_style(view.connectivity),
        ),
        Span::raw(format!(" | Documents: {documents}")),
    ];
    if let Some(at) = &view.last_ingested_at {
        status.push(Span::raw(format!(" | Last updated: {at}")));
    }

    vec![
        Line::from(status),
        Line::from(format!(
            "Backend: {} | In flight: {} chat, {} upload",
            view.backend_address, view.chats_in_flight, view.uploads_in_flight
        ))
        .style(Style::default().fg(Color::DarkGray)),
    ]
}

pub(crate) fn transcript_lines(view: &AppViewModel) -> Vec<Line<'static>> {
    if view.transcript.is_empty() {
        return vec![Line::from(
            "(Upload a document, then ask a question. Type /help for commands.)",
        )];
    }
    let mut lines = Vec::new();
    for entry in &view.transcript {
        lines.extend(entry_lines(entry));
        lines.push(Line::from(""));
    }
    lines
}

fn entry_lines(entry: &TranscriptEntry) -> Vec<Line<'static>> {
    let (avatar, style) = match entry.role {
        Role::User => ("👤", Style::default().fg(Color::Green)),
        Role::Assistant if entry.is_error => ("🤖", Style::default().fg(Color::Red)),
        Role::Assistant => ("🤖", Style::default().fg(Color::Cyan)),
        Role::System => ("📢", Style::default().fg(Color::Magenta)),
    };
    let text = if entry.pending {
        format!("⏳ {}", entry.text)
    } else {
        entry.text.clone()
    };

    let mut lines: Vec<Line<'static>> = text
        .lines()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                Line::from(format!("{avatar} {line}")).style(style)
            } else {
                Line::from(format!("   {line}"))
            }
        })
        .collect();

    if let Some(tier) = entry.confidence_tier() {
        lines.push(
            Line::from(format!(
                "   {} Sources ({} confidence):",
                confidence_emoji(tier),
                tier.label()
            ))
            .style(Style::default().add_modifier(Modifier::BOLD)),
        );
        for source in entry.sources() {
            lines.push(
                Line::from(format!(
                    "   📄 {} ({}) - {}% match",
                    source.label,
                    source.file_type,
                    (source.similarity * 100.0).round() as u32
                ))
                .style(Style::default().fg(Color::DarkGray)),
            );
        }
    }
    lines
}

/// Upload row, notice and local command output. Always at least one line so
/// the layout does not jump when a notice appears.
pub(crate) fn footer_lines(view: &AppViewModel, ui: &UiState) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if !view.uploads.is_empty() {
        let uploads: Vec<String> = view
            .uploads
            .iter()
            .map(|row| format!("{} {}", upload_marker(row.status), row.label))
            .collect();
        lines.push(Line::from(format!("Uploads: {}", uploads.join(", "))));
    }
    if let Some(notice) = &view.notice {
        lines.push(Line::from(notice.message.clone()).style(severity_style(notice.severity)));
    }
    lines.extend(ui.footer.iter().cloned().map(Line::from));
    if lines.is_empty() {
        lines.push(Line::from(""));
    }
    lines
}

fn confidence_emoji(tier: ConfidenceTier) -> &'static str {
    match tier {
        ConfidenceTier::High => "🎯",
        ConfidenceTier::Medium => "👍",
        ConfidenceTier::Low => "🤔",
    }
}

fn connectivity_label(connectivity: Connectivity) -> &'static str {
    match connectivity {
        Connectivity::Unknown => "… Checking",
        Connectivity::Connected => "✅ Connected",
        Connectivity::Error => "❌ Error",
        Connectivity::Offline => "❌ Offline",
    }
}

fn connectivity_style(connectivity: Connectivity) -> Style {
    match connectivity {
        Connectivity::Unknown => Style::default().fg(Color::Yellow),
        Connectivity::Connected => Style::default().fg(Color::Green),
        Connectivity::Error | Connectivity::Offline => Style::default().fg(Color::Red),
    }
}

fn severity_style(severity: Severity) -> Style {
    match severity {
        Severity::Loading => Style::default().fg(Color::Yellow),
        Severity::Success => Style::default().fg(Color::Green),
        Severity::Error => Style::default().fg(Color::Red),
    }
}

fn upload_marker(status: UploadStatus) -> &'static str {
    match status {
        UploadStatus::Idle => "·",
        UploadStatus::InFlight => "⏳",
        UploadStatus::Succeeded => "✅",
        UploadStatus::Failed => "❌",
    }
}
