use std::path::PathBuf;
use std::time::Duration;

use pricing_engine::{write_interim, BatchEvent};
use pricing_logging::{price_error, price_info};

/// Turns batch events into status lines and persists interim snapshots.
pub struct ProgressReporter {
    output_dir: PathBuf,
}

impl ProgressReporter {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    pub fn handle(&mut self, event: &BatchEvent) {
        if let BatchEvent::Snapshot {
            records,
            is_final: false,
        } = event
        {
            if let Err(err) = write_interim(&self.output_dir, records) {
                price_error!("Interim save to {:?} failed: {}", self.output_dir, err);
            }
        }
        if let Some(line) = describe(event) {
            price_info!("{}", line);
            println!("{line}");
        }
    }
}

pub fn describe(event: &BatchEvent) -> Option<String> {
    match event {
        BatchEvent::Started { total } => Some(format!("Processing {total} codes")),
        BatchEvent::ItemCompleted {
            position,
            total,
            record,
        } => {
            let mut line = format!(
                "{position}/{total} {} price={}",
                record.code,
                record.price_text()
            );
            if !record.note.is_empty() {
                line.push_str(&format!(" ({})", record.note));
            }
            Some(line)
        }
        BatchEvent::RateLimitWait {
            position,
            total,
            code,
            wait,
        } => Some(format!(
            "{position}/{total} {code} rate limited, waiting {} before retrying",
            format_wait(*wait)
        )),
        BatchEvent::WaitRemaining { remaining } => {
            Some(format!("{} remaining", format_wait(*remaining)))
        }
        BatchEvent::TransientSkip {
            position,
            total,
            code,
            note,
            cooldown,
        } => Some(format!(
            "{position}/{total} {code} skipped: {note}; pausing {}",
            format_wait(*cooldown)
        )),
        BatchEvent::Snapshot {
            records,
            is_final: false,
        } => Some(format!("Interim save: {} records", records.len())),
        BatchEvent::Snapshot { is_final: true, .. } => None,
        BatchEvent::Finished {
            processed,
            total,
            cancelled,
        } => Some(if *cancelled {
            format!("Cancelled after {processed}/{total} codes")
        } else {
            format!("Finished {processed}/{total} codes")
        }),
    }
}

fn format_wait(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 && secs % 60 == 0 {
        format!("{} min", secs / 60)
    } else if secs > 0 {
        format!("{secs} s")
    } else {
        format!("{} ms", duration.as_millis())
    }
}
