use colored::*;
use zxb::api::{CmdMessage, MessageLevel};
use zxb::error::ZxbError;
use zxb::model::SourceListing;

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut output = String::new();
    for message in messages {
        let content = match message.level {
            MessageLevel::Info => message.content.dimmed(),
            MessageLevel::Success => message.content.green(),
            MessageLevel::Warning => message.content.yellow(),
            MessageLevel::Error => message.content.red(),
        };
        output.push_str(&format!("{}\n", content));
    }
    output
}

pub fn print_messages(messages: &[CmdMessage]) {
    let output = render_messages(messages);
    if !output.is_empty() {
        print!("{}", output);
    }
}

/// One block per source directory: linked scripts get a green dot, scripts
/// without an executable a red cross.
pub fn render_listings(listings: &[SourceListing]) -> String {
    let mut output = String::new();

    for (i, listing) in listings.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        output.push_str(&format!(
            "{}\n",
            listing.directory.display().to_string().bold()
        ));

        if listing.scripts.is_empty() {
            output.push_str(&format!("  {}\n", "No scripts found.".dimmed()));
            continue;
        }

        for script in &listing.scripts {
            if script.bin_present {
                output.push_str(&format!("  {} {}\n", "·".green(), script.slug));
            } else {
                output.push_str(&format!(
                    "  {} {} {}\n",
                    "x".red(),
                    script.slug,
                    "<-- script executable missing".red()
                ));
            }
        }
    }

    output
}

pub fn print_listings(listings: &[SourceListing]) {
    print!("{}", render_listings(listings));
}

pub fn print_error(error: &ZxbError) {
    eprintln!("{} {}", "Error:".red().bold(), error);
}

pub fn print_notice(notice: &str) {
    eprintln!("{}", notice.yellow());
}
