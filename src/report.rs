use crate::national_parks::Park;
use crate::sentiment_client::Sentiment;
use crate::temperature::{Reading, ReadingSummary};
use crossterm::queue;
use crossterm::style::{self, Color};
use regex::Regex;
use serde::Serialize;
use std::io::{Result, Write};
use unicode_truncate::UnicodeTruncateStr;

pub const DEFAULT_WIDTH: u16 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub width: u16,
    pub color: bool,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            color: true,
        }
    }
}

fn sentiment_color(sentiment: &Sentiment) -> Color {
    match sentiment {
        Sentiment::Positive => Color::DarkGreen,
        Sentiment::Negative => Color::DarkRed,
        Sentiment::Neutral => Color::DarkYellow,
        Sentiment::Other(_) => Color::Grey,
    }
}

fn print_colored(w: &mut impl Write, layout: Layout, color: Color, text: &str) -> Result<()> {
    if layout.color {
        queue!(
            w,
            style::SetForegroundColor(color),
            style::Print(text),
            style::ResetColor
        )
    } else {
        queue!(w, style::Print(text))
    }
}

fn display_width(text: &str) -> usize {
    text.unicode_truncate(usize::MAX).1
}

pub fn collapse_newlines(text: &str) -> String {
    let re_newlines = Regex::new(r"[\r\n]+").unwrap();
    re_newlines.replace_all(text, "⏎ ").into_owned()
}

pub fn write_reading(w: &mut impl Write, reading: &Reading, layout: Layout) -> Result<()> {
    let str_unknown = "[unknown]";

    for classified in &reading.tweets {
        let tweet = &classified.tweet;
        let mut col_offset: usize = 0;

        let sentiment = &classified.classification.sentiment;
        let label = format!("{:<9}", sentiment.to_string());
        print_colored(w, layout, sentiment_color(sentiment), &label)?;
        col_offset += display_width(&label);

        let author = format!(" @{}", tweet.author_screen_name(str_unknown));
        print_colored(w, layout, Color::DarkCyan, &author)?;
        col_offset += display_width(&author);

        if let Some(created_at) = tweet.created_at() {
            let tweet_time = format!(" {}", created_at.format("%m-%d %H:%M:%S"));
            print_colored(w, layout, Color::DarkGrey, &tweet_time)?;
            col_offset += display_width(&tweet_time);
        }

        let formatted = collapse_newlines(&tweet.full_text);
        let (truncated, _) =
            formatted.unicode_truncate((layout.width as usize).saturating_sub(col_offset + 4));
        queue!(w, style::Print(format!("  > {truncated}\n")))?;
    }

    let tally = reading.tally();
    queue!(
        w,
        style::Print(format!(
            "\n\"{}\": {} tweets, {} positive, {} negative, {} neutral",
            reading.query,
            reading.tweets.len(),
            tally.positive,
            tally.negative,
            tally.neutral
        ))
    )?;
    if tally.other > 0 {
        queue!(w, style::Print(format!(", {} other", tally.other)))?;
    }
    queue!(w, style::Print("\nTemperature: "))?;
    match reading.dominant() {
        Some(sentiment) => {
            print_colored(w, layout, sentiment_color(&sentiment), &sentiment.to_string())?
        }
        None => queue!(w, style::Print("mixed"))?,
    }
    queue!(w, style::Print("\n"))?;

    w.flush()
}

pub fn write_json<T: Serialize + ?Sized>(w: &mut impl Write, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *w, value)?;
    writeln!(w)?;
    Ok(())
}

pub fn write_reading_json(w: &mut impl Write, reading: &Reading) -> anyhow::Result<()> {
    write_json(w, &ReadingSummary::from(reading))
}

pub fn write_park_names(w: &mut impl Write, names: &[&str]) -> Result<()> {
    for name in names {
        writeln!(w, "{name}")?;
    }
    w.flush()
}

pub fn write_park(w: &mut impl Write, park: &Park, layout: Layout) -> Result<()> {
    print_colored(w, layout, Color::DarkCyan, park.name)?;
    queue!(
        w,
        style::Print(format!(
            " ({}): {} annual visitors, {} sq mi\n",
            park.state, park.annual_visitors, park.size
        ))
    )?;

    let options = textwrap::Options::new(layout.width as usize).subsequent_indent("  ");

    let attractions = park
        .attractions
        .iter()
        .map(|attraction| format!("{} ({})", attraction.name, attraction.kind))
        .collect::<Vec<_>>()
        .join(", ");
    for line in textwrap::wrap(&format!("Attractions: {attractions}"), &options) {
        queue!(w, style::Print(format!("{line}\n")))?;
    }

    queue!(w, style::Print("Trails:\n"))?;
    for trail in park.trails {
        let kind = if trail.is_loop { "loop" } else { "one way" };
        queue!(
            w,
            style::Print(format!("  {} ({} mi, {kind})\n", trail.name, trail.length))
        )?;
    }

    w.flush()
}
