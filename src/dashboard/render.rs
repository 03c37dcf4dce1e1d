//! Terminal rendering of the dashboard.
//!
//! Layout is computed as styled text first ([`layout`]) and then written to
//! any `Write` with crossterm commands ([`draw`]), so the content can be
//! tested without a terminal. Headless runs use [`plain_line`] instead.

use crossterm::{
    cursor, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, Write};

use super::Dashboard;
use crate::calendar::MetricKind;
use crate::common::constants::{COLOR_ACCENT, COLOR_MUTED, COLOR_WARM};
use crate::common::utils::ProgressBar;

const LEFT_MARGIN: u16 = 2;
const TOP_MARGIN: u16 = 1;
const FIGURE_WIDTH: usize = 9;

/// Colour role of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Strong,
    Accent,
    Warm,
    Muted,
}

impl Tone {
    fn color(self) -> Option<Color> {
        let (r, g, b) = match self {
            Tone::Accent => COLOR_ACCENT,
            Tone::Warm => COLOR_WARM,
            Tone::Muted => COLOR_MUTED,
            Tone::Plain | Tone::Strong => return None,
        };
        Some(Color::Rgb { r, g, b })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub tone: Tone,
}

impl Span {
    fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

pub type Line = Vec<Span>;

/// Plain text of a line, styles dropped.
pub fn line_text(line: &[Span]) -> String {
    line.iter().map(|span| span.text.as_str()).collect()
}

/// Lay out the dashboard from its displayed (animated) values.
pub fn layout(dashboard: &Dashboard, bar: ProgressBar) -> Vec<Line> {
    let mut lines = Vec::new();
    let snapshot = dashboard.snapshot();

    let header = dashboard
        .upcoming()
        .first()
        .map(|today| today.date.format("%A, %-d %B %Y").to_string())
        .unwrap_or_default();
    lines.push(vec![Span::new(header, Tone::Strong)]);
    lines.push(Vec::new());

    // Day counter
    lines.push(vec![
        Span::new("DAY ", Tone::Muted),
        Span::new(
            MetricKind::DayOfYear.format_value(dashboard.value(MetricKind::DayOfYear)),
            Tone::Accent,
        ),
        Span::new(format!(" / {}", snapshot.days_in_year), Tone::Muted),
    ]);

    // Day progress bar
    let day_percent = dashboard.value(MetricKind::PercentOfDay);
    lines.push(vec![
        Span::new("[", Tone::Muted),
        Span::new(bar.render(day_percent / 100.0), Tone::Warm),
        Span::new("] ", Tone::Muted),
        Span::new(MetricKind::PercentOfDay.format_value(day_percent), Tone::Accent),
    ]);
    lines.push(Vec::new());

    // Weekday strip
    let mut strip = Vec::new();
    for (idx, cell) in dashboard.upcoming().iter().enumerate() {
        if idx > 0 {
            strip.push(Span::new("  ", Tone::Plain));
        }
        let tone = if cell.is_today { Tone::Accent } else { Tone::Muted };
        strip.push(Span::new(format!("{} {:>2}", cell.weekday, cell.day_of_month), tone));
    }
    lines.push(strip);
    lines.push(Vec::new());

    // Figures column
    let figures = [
        MetricKind::HoursPassed,
        MetricKind::FridaysRemaining,
        MetricKind::MonthsPassed,
        MetricKind::PercentYearPassed,
    ];
    let label_width = figures
        .iter()
        .map(|kind| kind.label().len())
        .max()
        .unwrap_or(0);

    for kind in figures {
        lines.push(vec![
            Span::new(format!("{:<label_width$}", kind.label()), Tone::Plain),
            Span::new(
                format!(
                    "{:>FIGURE_WIDTH$}",
                    kind.format_value(dashboard.value(kind))
                ),
                Tone::Accent,
            ),
        ]);
    }

    lines.push(Vec::new());
    lines.push(vec![Span::new("q quit   r refresh", Tone::Muted)]);

    lines
}

/// Clear the screen and write `lines`. Flushes `out`.
pub fn draw<W: Write>(out: &mut W, lines: &[Line], color: bool) -> io::Result<()> {
    queue!(out, terminal::Clear(ClearType::All))?;

    for (row, line) in lines.iter().enumerate() {
        let row = TOP_MARGIN.saturating_add(u16::try_from(row).unwrap_or(u16::MAX));
        queue!(out, cursor::MoveTo(LEFT_MARGIN, row))?;

        for span in line {
            if color {
                if let Some(fg) = span.tone.color() {
                    queue!(out, SetForegroundColor(fg))?;
                }
                if span.tone == Tone::Strong || span.tone == Tone::Accent {
                    queue!(out, SetAttribute(Attribute::Bold))?;
                }
            }
            queue!(out, Print(&span.text))?;
            if color && span.tone != Tone::Plain {
                queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
            }
        }
    }

    out.flush()
}

/// One-line summary of the current targets for non-terminal output.
pub fn plain_line(dashboard: &Dashboard) -> String {
    let snapshot = dashboard.snapshot();
    let date = dashboard
        .upcoming()
        .first()
        .map(|today| today.date.to_string())
        .unwrap_or_default();

    format!(
        "{date}  day {}/{}  day {}  hours {}  fridays {}  months {}  year {}",
        snapshot.day_of_year,
        snapshot.days_in_year,
        MetricKind::PercentOfDay.format_value(snapshot.percent_of_day),
        MetricKind::HoursPassed.format_value(snapshot.hours_passed_today),
        snapshot.fridays_remaining,
        snapshot.months_passed,
        MetricKind::PercentYearPassed.format_value(snapshot.percent_year_passed),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::DashboardSettings;
    use chrono::{FixedOffset, TimeZone};
    use std::time::Duration;

    fn dashboard_at(hour: u32) -> Dashboard {
        let now = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, 3, 14, hour, 0, 0)
            .unwrap();
        Dashboard::new(DashboardSettings::default(), &now, Duration::ZERO)
    }

    fn texts(lines: &[Line]) -> Vec<String> {
        lines.iter().map(|line| line_text(line)).collect()
    }

    #[test]
    fn test_layout_content() {
        let dashboard = dashboard_at(18);
        let lines = texts(&layout(&dashboard, ProgressBar::new(20)));

        assert_eq!(lines[0], "Friday, 14 March 2025");
        assert!(lines.contains(&"DAY 73 / 365".to_string()));
        assert!(lines.contains(&"[==============>     ] 75.00%".to_string()));
        assert!(lines.contains(&"FRI 14  SAT 15  SUN 16  MON 17  TUE 18".to_string()));
        assert!(lines.iter().any(|l| l.starts_with("Hours passed today") && l.ends_with("18.00")));
        assert!(lines.iter().any(|l| l.starts_with("Months passed") && l.ends_with(" 3")));
    }

    #[test]
    fn test_figures_are_aligned() {
        let dashboard = dashboard_at(9);
        let lines = texts(&layout(&dashboard, ProgressBar::new(20)));
        let figure_lines: Vec<&String> = lines
            .iter()
            .filter(|l| MetricKind::ALL.iter().any(|k| l.starts_with(k.label())))
            .collect();

        assert_eq!(figure_lines.len(), 4);
        let width = figure_lines[0].chars().count();
        assert!(figure_lines.iter().all(|l| l.chars().count() == width));
    }

    #[test]
    fn test_today_is_highlighted() {
        let dashboard = dashboard_at(9);
        let lines = layout(&dashboard, ProgressBar::new(20));
        let strip = lines
            .iter()
            .find(|line| line_text(line).starts_with("FRI 14"))
            .unwrap();

        assert_eq!(strip[0].tone, Tone::Accent);
        assert!(strip.iter().skip(1).all(|span| span.tone != Tone::Accent));
    }

    #[test]
    fn test_draw_without_color_has_no_sgr() {
        let dashboard = dashboard_at(12);
        let lines = layout(&dashboard, ProgressBar::new(20));
        let mut out = Vec::new();
        draw(&mut out, &lines, false).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("DAY 73 / 365"));
        assert!(!text.contains("38;2;"));
    }

    #[test]
    fn test_draw_with_color_uses_palette() {
        let dashboard = dashboard_at(12);
        let lines = layout(&dashboard, ProgressBar::new(20));
        let mut out = Vec::new();
        draw(&mut out, &lines, true).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("38;2;254;84;106"));
    }

    #[test]
    fn test_plain_line() {
        let dashboard = dashboard_at(12);
        assert_eq!(
            plain_line(&dashboard),
            format!(
                "2025-03-14  day 73/365  day 50.00%  hours 12.00  fridays {}  months 3  year {}",
                dashboard.snapshot().fridays_remaining,
                MetricKind::PercentYearPassed.format_value(dashboard.snapshot().percent_year_passed)
            )
        );
    }
}
