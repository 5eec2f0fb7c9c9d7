//! Terminal output for the tagger.
//!
//! Status lines go to stdout, errors and warnings to stderr.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::cli::orchestration::WorkflowResult;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Display the proposed tag change (or initial tag).
///
/// # Arguments
/// * `old_tag` - Previous tag (None if this is the initial tag)
/// * `new_tag` - The new tag being proposed
pub fn display_proposed_tag(old_tag: Option<&str>, new_tag: &str) {
    match old_tag {
        Some(old) => {
            println!("\n{}", style("Proposed Tag Change:").bold());
            println!("  From: {}", style(old).red());
            println!("  To:   {}", style(new_tag).green());
        }
        None => {
            println!("\n{}", style("Initial Tag:").bold());
            println!("  New tag: {}", style(new_tag).green());
        }
    }
}

/// Display manual push instruction for a tag.
pub fn display_manual_push_instruction(tag: &str, remote: &str) {
    println!(
        "\n{} To push this tag later, run:\n  {}",
        style("→").yellow(),
        style(format!("git push {} {}", remote, tag)).cyan()
    );
}

/// Summarize a finished workflow.
///
/// Dry runs describe the steps that would have been taken.
pub fn display_result(result: &WorkflowResult, remote: &str, push_requested: bool) {
    if !result.created {
        display_status("Dry run:");
        display_success(&format!("  Would create tag: {}", result.tag));
        if push_requested {
            display_success(&format!("  Would push {} to {}", result.tag, remote));
        }
        display_status("No changes made");
        return;
    }

    if result.pushed {
        println!(
            "\n{} Successfully published tag {}\n",
            style("✓").green(),
            result.tag
        );
    } else {
        println!(
            "\n{} Tag {} created locally",
            style("✓").green(),
            result.tag
        );
        display_manual_push_instruction(&result.tag, remote);
        println!();
    }
}
