mod breakdown_text;
mod categories_text;
mod config_text;
mod error_text;
mod format;
mod json;
mod members_text;
mod mode;
mod spending_text;

use std::io;

use cartwise_report::{ReportError, SuccessEnvelope};

pub use mode::{OutputMode, mode_for_command};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    println!("{body}");
    Ok(())
}

pub fn print_failure(error: &ReportError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    println!("{body}");
    Ok(())
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command.as_str() {
        "spending" => spending_text::render_spending(&success.data),
        "members" => members_text::render_members(&success.data),
        "categories" => categories_text::render_categories(&success.data),
        "breakdown" => breakdown_text::render_breakdown(&success.data),
        "config show" => config_text::render_config_show(&success.data),
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}
