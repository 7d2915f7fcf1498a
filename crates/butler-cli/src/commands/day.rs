//! Day-level edits: set, add, note, cycle.

use butler_core::{DayStore, DrinkCount, MAX_DRINKS_PER_DAY};
use chrono::NaiveDate;
use clap::{Args, Subcommand};

use super::{format_count, CommandResult, Context};

/// Which day an edit applies to. Defaults to today.
#[derive(Args)]
pub struct DayTarget {
    /// Apply to yesterday
    #[arg(short, long)]
    yesterday: bool,
    /// Apply to a specific date (YYYY-MM-DD)
    #[arg(short, long, conflicts_with = "yesterday")]
    date: Option<NaiveDate>,
}

impl DayTarget {
    fn resolve(&self, today: NaiveDate) -> NaiveDate {
        match (self.date, self.yesterday) {
            (Some(date), _) => date,
            (None, true) => today.pred_opt().unwrap_or(today),
            (None, false) => today,
        }
    }
}

#[derive(Subcommand)]
pub enum DayAction {
    /// Set the number of drinks for a day
    Set {
        /// Number of drinks (0 or more)
        n: u32,
        #[command(flatten)]
        target: DayTarget,
        /// Optional note for the day
        #[arg(long)]
        note: Option<String>,
    },
    /// Add drinks to a day's count
    Add {
        /// Increment (default 1)
        #[arg(default_value_t = 1)]
        n: u32,
        #[command(flatten)]
        target: DayTarget,
    },
    /// Set or replace the note for a day
    Note {
        /// Note text; an empty string clears it
        text: String,
        #[command(flatten)]
        target: DayTarget,
    },
    /// Cycle a day's count: 0 -> 1 -> 2 -> 3 -> 4 -> 0
    Cycle {
        #[command(flatten)]
        target: DayTarget,
    },
}

pub fn run(action: DayAction) -> CommandResult {
    let ctx = Context::load()?;
    let mut store = ctx.store()?;
    let hat = ctx.hat();

    match action {
        DayAction::Set { n, target, note } => {
            let day = target.resolve(ctx.today);
            let note = note.map(|text| text.trim().to_string());
            store.upsert(day, Some(DrinkCount::Recorded(n)), note)?;
            if n > MAX_DRINKS_PER_DAY {
                println!("{hat}A spirited evening! Marked {day}: {n} (over the limit).");
            } else {
                println!("{hat}{n} logged for {day}. Quite proper.");
            }
        }
        DayAction::Add { n, target } => {
            let day = target.resolve(ctx.today);
            let before = store.find(day)?.map_or(0, |r| r.count.effective());
            let record = store.add_drinks(day, n)?;
            let after = record.count.effective();
            if after > MAX_DRINKS_PER_DAY && before <= MAX_DRINKS_PER_DAY {
                println!(
                    "{hat}Crossed the line on {day}: now {after} (>3). A gentle tap on the wrist."
                );
            } else {
                println!("{hat}+{n} → {after} for {day}.");
            }
        }
        DayAction::Note { text, target } => {
            let day = target.resolve(ctx.today);
            store.set_note(day, text.trim().to_string())?;
            println!("{hat}Note updated for {day}.");
        }
        DayAction::Cycle { target } => {
            let day = target.resolve(ctx.today);
            let record = store.cycle_drinks(day)?;
            let remark = match record.count.effective() {
                0 => "Returned to abstinence.",
                1 => "A single libation noted.",
                2 => "A modest pair recorded.",
                3 => "Precisely at the limit.",
                _ => "Entering spirited territory...",
            };
            println!("{hat}{day}: {} — {remark}", format_count(record.count));
        }
    }
    Ok(())
}
