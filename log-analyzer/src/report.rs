use chrono::SecondsFormat;
use num_format::{Locale, ToFormattedString};
use std::io::{self, Write};

use crate::{analytics::Summary, models::LogRecord};

pub fn write_json(summary: &Summary, out: &mut impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, summary)?;
    writeln!(out)
}

pub fn write_text(source: &str, summary: &Summary, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{source}: {} log entries", count(summary.total))?;
    if let Some(range) = &summary.time_range {
        let order = if range.ordered { "in order" } else { "out of order" };
        writeln!(
            out,
            "timestamps: {} .. {} ({order})",
            range.earliest.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            range.latest.to_rfc3339_opts(SecondsFormat::AutoSi, true)
        )?;
    }
    writeln!(out, "ids out of sequence: {}", count(summary.out_of_sequence))?;

    writeln!(out)?;
    writeln!(out, "{:<6} {:>14} {:>8}", "level", "count", "share")?;
    for level in &summary.levels {
        writeln!(
            out,
            "{:<6} {:>14} {:>7.3}%",
            level.level.to_string(),
            count(level.count),
            level.share * 100.0
        )?;
    }

    if !summary.containers.is_empty() {
        writeln!(out)?;
        writeln!(
            out,
            "{:<10} {:>14} {:<8} {:>12}",
            "container", "count", "message", "mismatched"
        )?;
        for c in &summary.containers {
            writeln!(
                out,
                "{:<10} {:>14} {:<8} {:>12}",
                c.container.as_str(),
                count(c.count),
                c.dominant_message,
                count(c.mismatches)
            )?;
        }
        writeln!(out, "mismatched messages: {:.3}%", summary.mismatch_ratio * 100.0)?;
    }

    if let Some(happiness) = &summary.happiness {
        writeln!(
            out,
            "happiness: min {} max {} mean {:.0}",
            happiness.min, happiness.max, happiness.mean
        )?;
    }

    write_rows(out, "first", &summary.head)?;
    write_rows(out, "last", &summary.tail)?;
    Ok(())
}

fn write_rows(out: &mut impl Write, label: &str, rows: &[LogRecord]) -> io::Result<()> {
    if rows.is_empty() {
        return Ok(());
    }
    writeln!(out)?;
    writeln!(out, "{label} {} rows", rows.len())?;
    for row in rows {
        serde_json::to_writer(&mut *out, row)?;
        writeln!(out)?;
    }
    Ok(())
}

fn count(n: u64) -> String {
    n.to_formatted_string(&Locale::en)
}
