use anyhow::{anyhow, Result};
use std::io::{self, BufRead, Write};
use tracing::info;

use crate::error::ValidationError;
use crate::record::{ActivityRecord, Category};
use crate::session::Session;
use crate::utils;

pub fn handle_add_command<R: BufRead>(
    session: &mut Session,
    date: Option<String>,
    category: Option<String>,
    hours: Option<f64>,
    yes: bool,
    input: &mut R,
) -> Result<()> {
    let is_interactive = date.is_none() && category.is_none() && hours.is_none();

    let record = if is_interactive {
        let (d, c, h) = prompt_for_record_details(input)?;
        ActivityRecord::from_input(&d, &c, &h)?
    } else {
        let date = match date {
            Some(d) => utils::parse_date(&d)?,
            None => utils::today(),
        };
        let category = match category {
            Some(c) => Category::parse_input(&c)?,
            None => Category::Work,
        };
        let hours = hours.ok_or_else(|| ValidationError::MissingField("hours (-H)".to_string()))?;
        ActivityRecord::validated(date, category, hours)?
    };

    println!("\n=== New Activity ===");
    println!("Date: {}", utils::format_date(record.date));
    println!(
        "Category: {} ({})",
        record.category,
        record.category.english_name()
    );
    println!("Hours: {}", utils::format_hours(record.hours));
    println!("Store: {}", session.store().path().display());

    if !yes && !confirm("\n💾 Save this activity? (y/N)", input)? {
        println!("Operation cancelled.");
        return Ok(());
    }

    let date = record.date;
    let category = record.category.clone();
    let hours = record.hours;
    session.append(record)?;
    info!(date = %date, category = %category, hours, "activity added");
    println!("✅ Activity added! ({} records in total)", session.len());

    let summary = session.summary();
    let day_total = summary
        .by_date
        .iter()
        .find(|(d, _)| *d == date)
        .map(|(_, total)| *total)
        .unwrap_or(0.0);
    println!(
        "Total for {}: {}",
        utils::format_date(date),
        utils::format_hours(day_total)
    );
    if summary.is_over_limit(date) {
        println!(
            "⚠️  {} exceeds the 24h limit for a single day",
            utils::format_date(date)
        );
    }

    if is_interactive {
        println!("\n💡 Equivalent command line:");
        println!("   {}", equivalent_command(&date, &category, hours));
    }

    Ok(())
}

/// Command line that would add the same record without prompting
pub fn equivalent_command(date: &chrono::NaiveDate, category: &Category, hours: f64) -> String {
    let category_arg = category.english_name().to_lowercase();
    format!(
        "lifetracker add -D {} -c {} -H {} -y",
        utils::format_date(*date),
        category_arg,
        hours
    )
}

/// Ask a y/N question; anything other than "y" is a no
pub fn confirm<R: BufRead>(question: &str, input: &mut R) -> Result<bool> {
    println!("{}", question);
    let answer = read_line(input)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

fn read_line<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    let read = input.read_line(&mut line)?;
    if read == 0 {
        return Err(anyhow!("Unexpected end of input"));
    }
    Ok(line.trim().to_string())
}

fn prompt<R: BufRead>(label: &str, input: &mut R) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    read_line(input)
}

/// Prompt for date, category and hours; returns the raw answers with
/// defaults applied
fn prompt_for_record_details<R: BufRead>(input: &mut R) -> Result<(String, String, String)> {
    println!("\n=== Log Activity ===");

    let date = prompt(
        "Date (YYYY-MM-DD, YYYY.MM.DD, or YYYY/MM/DD, optional - default: today): ",
        input,
    )?;
    let date = if date.is_empty() {
        utils::format_date(utils::today())
    } else {
        utils::validate_date(&date)?;
        utils::normalize_date(&date)
    };

    println!("\nAvailable categories:");
    for category in Category::ALL.iter() {
        if let Some(number) = category.menu_number() {
            println!(" {} - {} ({})", number, category.label(), category.english_name());
        }
    }
    let category = prompt(
        "\nCategory (enter number or name, optional - default: 1): ",
        input,
    )?;
    let category = if category.is_empty() {
        "1".to_string()
    } else {
        category
    };

    let hours = prompt("Hours (0.1 - 24): ", input)?;

    Ok((date, category, hours))
}
