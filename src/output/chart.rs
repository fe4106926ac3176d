use std::io::Write;
use unicode_width::UnicodeWidthStr;

use crate::error::Result;

/// Anything that can draw a labeled bar chart.
pub trait ChartSink {
    /// Draw one bar per item, in the order given.
    fn render(&mut self, title: &str, series: &[(String, usize)]) -> Result<()>;
}

/// Horizontal bar chart drawn with block characters.
pub struct TerminalBarChart<W: Write> {
    out: W,
    max_bar: usize,
}

impl<W: Write> TerminalBarChart<W> {
    pub fn new(out: W, max_bar: usize) -> Self {
        Self { out, max_bar }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn pad(label: &str, width: usize) -> String {
    let fill = width.saturating_sub(UnicodeWidthStr::width(label));
    format!("{label}{}", " ".repeat(fill))
}

impl<W: Write> ChartSink for TerminalBarChart<W> {
    fn render(&mut self, title: &str, series: &[(String, usize)]) -> Result<()> {
        writeln!(self.out, "{title}\n")?;

        if series.is_empty() {
            writeln!(self.out, "  (no words to plot)")?;
            return Ok(());
        }

        let label_width = series
            .iter()
            .map(|(l, _)| UnicodeWidthStr::width(l.as_str()))
            .max()
            .unwrap_or(0);
        let max = series.iter().map(|(_, c)| *c).max().unwrap_or(0).max(1);

        for (label, count) in series {
            let len = count * self.max_bar / max;
            writeln!(
                self.out,
                "  {} │{} {count}",
                pad(label, label_width),
                "█".repeat(len)
            )?;
        }

        writeln!(self.out, "\n  {} Word Frequency", " ".repeat(label_width))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_scales_bars_in_given_order() {
        let mut chart = TerminalBarChart::new(Vec::new(), 10);
        chart
            .render(
                "Top words",
                &[("of".to_string(), 5), ("the".to_string(), 10)],
            )
            .unwrap();
        let out = String::from_utf8(chart.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "Top words");
        assert_eq!(lines[2], format!("  of  │{} 5", "█".repeat(5)));
        assert_eq!(lines[3], format!("  the │{} 10", "█".repeat(10)));
    }

    #[test]
    fn test_render_empty_series() {
        let mut chart = TerminalBarChart::new(Vec::new(), 10);
        chart.render("Nothing", &[]).unwrap();
        let out = String::from_utf8(chart.into_inner()).unwrap();
        assert!(out.contains("(no words to plot)"));
    }

    #[test]
    fn test_pad_uses_display_width() {
        assert_eq!(pad("日本", 6), "日本  ");
        assert_eq!(pad("long", 2), "long");
    }
}
