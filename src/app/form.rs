//! Line-oriented entry form for the interactive session.

use crate::app::display::{render_added, render_entries, render_rejected};
use crate::core::session::{EntryForm, SessionState};
use crate::domain::settings::EntryRules;
use crate::utils::error::{HotelError, Result};
use std::io::{BufRead, Write};

const QUIT: &str = "q";

fn parse_number(field: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| HotelError::ValidationError {
            message: format!("{} must be a number (got '{}')", field, raw.trim()),
        })
}

/// Parses a `--add` value of the form `TITLE;DISTANCE;SCORE`.
pub fn parse_entry_arg(value: &str) -> Result<EntryForm> {
    let parts: Vec<&str> = value.split(';').collect();
    let [title, distance, score] = parts.as_slice() else {
        return Err(HotelError::ValidationError {
            message: format!("expected TITLE;DISTANCE;SCORE, got '{}'", value),
        });
    };

    Ok(EntryForm::new(
        *title,
        parse_number("Distance", distance)?,
        parse_number("Review score", score)?,
    ))
}

/// Submits a form and reports the outcome on `output`. Returns whether it was accepted.
pub fn submit_and_report<W: Write>(
    output: &mut W,
    session: &mut SessionState,
    form: EntryForm,
    rules: &EntryRules,
) -> Result<bool> {
    match session.submit(form, rules) {
        Ok(entry) => {
            writeln!(output, "{}", render_added(entry))?;
            Ok(true)
        }
        Err(HotelError::ValidationError { message }) => {
            writeln!(output, "{}", render_rejected(&message))?;
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> Result<Option<String>> {
    write!(output, "{}", label)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Reads entries until `q` or end of input, showing the entry list after each one.
/// Returns the number of accepted entries.
pub fn run_form<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    session: &mut SessionState,
    rules: &EntryRules,
) -> Result<usize> {
    let mut accepted = 0;
    writeln!(
        output,
        "Add a hotel (review score {}-{}). Enter '{}' as the name to finish.",
        rules.min_review_score, rules.max_review_score, QUIT
    )?;

    loop {
        let Some(title) = prompt(input, output, "Hotel name: ")? else {
            break;
        };
        if title.trim() == QUIT {
            break;
        }
        let Some(distance) = prompt(input, output, "Distance (km): ")? else {
            break;
        };
        let Some(score) = prompt(input, output, "Review score: ")? else {
            break;
        };

        let form = match (
            parse_number("Distance", &distance),
            parse_number("Review score", &score),
        ) {
            (Ok(distance), Ok(score)) => EntryForm::new(title, distance, score),
            (Err(HotelError::ValidationError { message }), _)
            | (_, Err(HotelError::ValidationError { message })) => {
                writeln!(output, "{}", render_rejected(&message))?;
                continue;
            }
            (Err(e), _) | (_, Err(e)) => return Err(e),
        };

        if submit_and_report(output, session, form, rules)? {
            accepted += 1;
            write!(output, "{}", render_entries(session.entries()))?;
        }
    }

    tracing::debug!("Form closed after {} accepted entries", accepted);
    Ok(accepted)
}
