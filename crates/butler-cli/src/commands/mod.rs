//! Subcommand implementations. Each module exposes an action enum and `run`.

pub mod config;
pub mod day;
pub mod report;

use butler_core::{Config, CsvStore, DrinkCount};
use chrono::NaiveDate;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Overrides the clock for the whole invocation (YYYY-MM-DD).
const TODAY_ENV: &str = "BUTLER_TODAY";

/// Per-invocation state: loaded config and the reference date.
pub struct Context {
    pub config: Config,
    pub today: NaiveDate,
}

impl Context {
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let ctx = Self {
            config: Config::load_or_default(),
            today: today()?,
        };
        tracing::debug!(today = %ctx.today, "loaded context");
        Ok(ctx)
    }

    pub fn store(&self) -> Result<CsvStore, Box<dyn std::error::Error>> {
        Ok(CsvStore::open_at(self.config.csv_path()?)?)
    }

    pub fn hat(&self) -> &'static str {
        if self.config.display.show_hat {
            "🎩 "
        } else {
            ""
        }
    }

    /// `--json` on the command line, or the configured default.
    pub fn wants_json(&self, flag: bool) -> bool {
        flag || self.config.display.json
    }
}

/// The only place the clock is read.
fn today() -> Result<NaiveDate, Box<dyn std::error::Error>> {
    match std::env::var(TODAY_ENV) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<NaiveDate>()
            .map_err(|e| format!("invalid {TODAY_ENV} '{raw}': {e}").into()),
        _ => Ok(chrono::Local::now().date_naive()),
    }
}

/// Short display for a day's count.
pub fn format_count(count: DrinkCount) -> String {
    match count {
        DrinkCount::Absent => "—".to_string(),
        DrinkCount::Recorded(n) if count.exceeds_limit() => format!(">3 ({n})"),
        DrinkCount::Recorded(n) => n.to_string(),
    }
}

pub fn check(ok: bool) -> &'static str {
    if ok {
        "✅"
    } else {
        "❌"
    }
}

pub fn plural<'a>(n: u32, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 {
        one
    } else {
        many
    }
}
