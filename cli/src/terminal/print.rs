//! Plain terminal rendering for scan reports and interface info.

use colored::*;

pub const TOTAL_WIDTH: usize = 64;

pub fn header(msg: &str, quiet: u8) {
    if quiet > 0 {
        return;
    }
    let formatted = format!("⟦ {} ⟧", msg.to_uppercase());
    let dashes = TOTAL_WIDTH.saturating_sub(formatted.chars().count());
    let (left, right) = (dashes / 2, dashes - dashes / 2);
    println!(
        "{}{}{}",
        "─".repeat(left).bright_black(),
        formatted.bright_green(),
        "─".repeat(right).bright_black()
    );
}

pub fn separator() {
    println!("{}", "═".repeat(TOTAL_WIDTH).bright_black());
}

pub fn status<T: AsRef<str>>(msg: T) {
    println!("{} {}", ">".bright_black(), msg.as_ref());
}

pub fn aligned_line(key: &str, value: &str) {
    let dots = ".".repeat(14usize.saturating_sub(key.len()));
    println!(
        "{} {}{}{} {}",
        ">".bright_black(),
        key.cyan(),
        dots.bright_black(),
        ":".bright_black(),
        value
    );
}

pub fn tree_head(idx: usize, title: &str) {
    println!(
        "{} {}",
        format!("[{idx}]").bright_black(),
        title.cyan()
    );
}

pub fn tree_details(details: &[(&str, ColoredString)]) {
    for (i, (key, value)) in details.iter().enumerate() {
        let branch = if i + 1 == details.len() {
            "└─"
        } else {
            "├─"
        };
        let dots = ".".repeat(7usize.saturating_sub(key.len()));
        println!(
            " {} {}{}{} {}",
            branch.bright_black(),
            key,
            dots.bright_black(),
            ":".bright_black(),
            value
        );
    }
}
