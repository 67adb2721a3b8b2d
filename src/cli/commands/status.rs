use colored::*;

use crate::context::PortalContext;

pub fn status_command(ctx: &PortalContext, database: &str) {
    println!("{}", "UNEX Portal".bright_white().bold());
    println!("  {} {}", "Database:".dimmed(), database.cyan());

    match ctx.current_user() {
        Some(user) => {
            println!(
                "  {} Signed in as {}",
                "●".bright_green().bold(),
                user.name.bright_green().bold()
            );
            println!("    {} {}", "Email:".dimmed(), user.email);
            println!("    {} {}", "Course:".dimmed(), user.course);
            println!("    {} {}", "Role:".dimmed(), user.role);
        }
        None => println!("  {} {}", "○".dimmed(), "Not signed in".bright_yellow()),
    }

    println!("  {} {}", "Theme:".dimmed(), ctx.theme.current().as_str().cyan());
    let tutorial = if ctx.tutorial.is_seen() {
        "seen".bright_green()
    } else {
        "pending".bright_yellow()
    };
    println!("  {} {}", "Tutorial:".dimmed(), tutorial);
}
