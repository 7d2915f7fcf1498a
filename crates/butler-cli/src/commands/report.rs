//! Read-only reports over the stored history.

use butler_core::calendar::shift_days;
use butler_core::{
    compute_streak_stats, history_weeks, summarize_month, week_bounds, week_insights, DayStore,
    History, WeekSummary, WeekendConduct,
};
use chrono::NaiveDate;
use clap::Subcommand;

use super::{check, format_count, plural, CommandResult, Context};

#[derive(Subcommand)]
pub enum ReportAction {
    /// Show the week containing today (or --date)
    Week {
        /// Any date in the week (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<NaiveDate>,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the month containing today (or --date)
    Month {
        /// Any date in the month (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<NaiveDate>,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// Concise summary for today, yesterday and this week
    Status,
    /// Streaks and lifetime achievements
    Streaks {
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// Weeks from the first record through the lookahead, with verdicts
    History {
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: ReportAction) -> CommandResult {
    let ctx = Context::load()?;
    let records = ctx.store()?.load()?;
    let history = History::new(&records);
    let hat = ctx.hat();

    match action {
        ReportAction::Week { date, json } => {
            let anchor = date.unwrap_or(ctx.today);
            let week = history.week(anchor);
            let insights = week_insights(&records, anchor);
            if ctx.wants_json(json) {
                let out = serde_json::json!({ "summary": week, "insights": insights });
                println!("{}", serde_json::to_string_pretty(&out)?);
                return Ok(());
            }

            println!("{hat}Week {} → {}", week.start, week.end);
            for day in week.start.iter_days().take(7) {
                let (count, note) = match week.record_on(day) {
                    Some(r) => (format_count(r.count), r.note.as_str()),
                    None => (format_count(Default::default()), ""),
                };
                println!("  {}  {:>8}  {note}", day.format("%a %Y-%m-%d"), count);
            }
            print_verdict(&week);
            let weekend = match insights.weekend {
                WeekendConduct::AlcoholFree => "alcohol-free",
                WeekendConduct::Restrained => "restrained",
                WeekendConduct::Indulgent => "indulgent",
            };
            println!("Weekend: {weekend}");
        }
        ReportAction::Month { date, json } => {
            let month = summarize_month(&records, date.unwrap_or(ctx.today));
            if ctx.wants_json(json) {
                println!("{}", serde_json::to_string_pretty(&month)?);
                return Ok(());
            }

            println!("{hat}Month {} → {}", month.start, month.end);
            for week in &month.weeks {
                println!(
                    "  {} → {}  {} drinking {}, {} total  {}",
                    week.start,
                    week.end,
                    week.drinking_days,
                    plural(week.drinking_days, "day", "days"),
                    week.total_drinks,
                    week_badge(week),
                );
            }
            println!("Drinking days: {}", month.total_drinking_days);
            println!("Total drinks: {}", month.total_drinks);
            println!("Sober days: {}", month.sober_days);
            println!(
                "Compliant weeks: {}/{}",
                month.compliant_weeks,
                month.weeks.len()
            );
        }
        ReportAction::Status => {
            let today = ctx.today;
            let yesterday = shift_days(today, -1);
            let week = history.week(today);
            println!(
                "{hat}Today's tally: {} | Yesterday: {}",
                tally(history.count_on(today).effective()),
                tally(history.count_on(yesterday).effective()),
            );
            println!(
                "   This week: {} drinking {}, total {} {}.",
                week.drinking_days,
                plural(week.drinking_days, "day", "days"),
                week.total_drinks,
                plural(week.total_drinks, "drink", "drinks"),
            );
            if week.rule_ok {
                println!("   You're within the limits. Keep it up! ✅");
            } else {
                println!("   You've exceeded the limits. A gentle reminder. ⚠");
            }
        }
        ReportAction::Streaks { json } => {
            let stats = compute_streak_stats(&records, ctx.today);
            if ctx.wants_json(json) {
                println!("{}", serde_json::to_string_pretty(&stats)?);
                return Ok(());
            }

            println!("{hat}Streaks as of {}", stats.as_of);
            println!("  Current abstinence: {} days", stats.current_abstinence);
            println!("  Longest abstinence: {} days", stats.longest_abstinence);
            if stats.current_drinking > 1 {
                println!("  Consecutive drinking: {} days", stats.current_drinking);
            }
            println!(
                "  Compliance: {} {} (best {})",
                stats.current_compliance_weeks,
                plural(stats.current_compliance_weeks, "week", "weeks"),
                stats.longest_compliance_weeks,
            );
            match stats.days_since_violation {
                Some(days) => println!("  Days since >3 in a day: {days}"),
                None => println!("  No day over the limit in the past year"),
            }
            println!("  Alcohol-free weekends: {}", stats.alcohol_free_weekends);
            println!("  Perfect weeks: {}", stats.perfect_weeks);
        }
        ReportAction::History { json } => {
            let lookahead = ctx.config.display.history_lookahead_weeks;
            let current = week_bounds(ctx.today).0;
            let weeks: Vec<WeekSummary> = history_weeks(&records, ctx.today, lookahead)
                .into_iter()
                .map(|monday| history.week(monday))
                .collect();
            if ctx.wants_json(json) {
                println!("{}", serde_json::to_string_pretty(&weeks)?);
                return Ok(());
            }

            if weeks.is_empty() {
                println!("{hat}Nothing recorded yet.");
            }
            for week in &weeks {
                let marker = if week.start == current { "▶" } else { " " };
                println!(
                    "{marker} {}  {}/7 recorded  {}",
                    week.start.format("%b %d %Y"),
                    week.recorded_days,
                    week_badge(week),
                );
            }
        }
    }
    Ok(())
}

fn print_verdict(week: &WeekSummary) {
    println!(
        "Drinking days: {} (limit {})",
        week.drinking_days,
        butler_core::MAX_DRINKING_DAYS_PER_WEEK
    );
    println!("Total drinks: {}", week.total_drinks);
    println!("Recorded days: {}/7", week.recorded_days);
    let badge = if week.rule_ok {
        "✅ within limits"
    } else {
        "⚠ over limit"
    };
    println!("Rule of 3: {badge}");
    println!(
        "  days ≤3 {}  per-day ≤3 {}  gap {}",
        check(week.rule_days_ok),
        check(week.rule_per_day_ok),
        check(week.rule_gap_ok),
    );
}

fn week_badge(week: &WeekSummary) -> &'static str {
    match (week.has_data(), week.rule_ok) {
        (false, _) => "—",
        (true, true) => "✅",
        (true, false) => "⚠",
    }
}

fn tally(n: u32) -> String {
    match n {
        0 => "none".to_string(),
        1..=3 => format!("{n} 🍷"),
        _ => format!(">3 ({n})"),
    }
}
