//! Themed status lines. Report text never goes through these helpers.

use crate::ui::{theme, Icons};
use owo_colors::OwoColorize;

pub fn success(label: &str) {
    println!("{} {}", Icons::CHECK, label.style(theme().success.clone()));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, label.style(theme().error.clone()));
}

pub fn info(label: &str, value: &str) {
    println!(
        "{} {}: {}",
        Icons::INFO.style(theme().info.clone()),
        label.style(theme().dim.clone()),
        value
    );
}

pub fn phase(icon: &str, name: &str) {
    println!(
        "{} {}",
        icon.style(theme().info.clone()),
        name.style(theme().header.clone())
    );
}

pub fn summary_row(label: &str, value: &str) {
    println!("  {} {}", label.style(theme().dim.clone()), value);
}
