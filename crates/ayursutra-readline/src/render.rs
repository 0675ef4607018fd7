//! Terminal rendering of view snapshots and notices.

use ayursutra_application::view::SUBMITTING_LABEL;
use ayursutra_application::{AuthView, ConsultationView, Notice, NoticeKind};
use ayursutra_core::auth::AuthField;
use ayursutra_core::consultation::{Priority, Recommendation};
use colored::Colorize;
use strum::IntoEnumIterator;

use crate::command::COMMANDS;

pub fn banner() {
    println!("{}", "=== AyurSutra: AI-Powered Panchakarma Consultation ===".bright_magenta().bold());
    println!("{}", "Type '/help' for commands, or 'quit' to exit.".bright_black());
    println!();
}

pub fn help() {
    for (name, args, description) in COMMANDS {
        let usage = if args.is_empty() {
            name.to_string()
        } else {
            format!("{} {}", name, args)
        };
        println!("  {:<34} {}", usage.bright_cyan(), description.bright_black());
    }
    println!("  {:<34} {}", "quit".bright_cyan(), "Exit".bright_black());
}

pub fn form(view: &ConsultationView) {
    println!("{}", "Consultation".bright_yellow().bold());
    println!("  Name:     {}", view.draft.name);
    println!("  Problem:  {}", view.draft.problem);
    println!("  Priority: {}", view.draft.priority.option_label());
    let options: Vec<&str> = Priority::iter().map(|p| p.into()).collect();
    println!("{}", format!("  (priorities: {})", options.join(", ")).bright_black());

    let label = if view.can_submit {
        view.submit_label.green()
    } else {
        view.submit_label.bright_black()
    };
    println!("  [{}]", label);
}

pub fn submitting() {
    println!("{}", SUBMITTING_LABEL.bright_black());
}

pub fn recommendation(rec: &Recommendation) {
    println!(
        "{} {}",
        format!("[{}]", rec.priority).bold(),
        format!("{}: {}", rec.name, rec.problem).bright_white()
    );
    println!("  {} {}", "Therapy:".bright_black(), rec.therapy.bright_blue());
    println!("  {} {}", "Doctor:".bright_black(), rec.doctor_label);
    println!("  {} {}", "Schedule:".bright_black(), rec.schedule_label);
}

pub fn sessions(view: &ConsultationView) {
    if let Some((title, hint)) = view.empty_state() {
        println!("{}", title.bright_yellow());
        println!("{}", hint.bright_black());
        return;
    }
    for rec in &view.recommendations {
        recommendation(rec);
        println!();
    }
}

pub fn auth(view: &AuthView) {
    println!("{}", format!("{} form", view.mode).bright_yellow().bold());
    for field in view.fields {
        let value = match field {
            AuthField::Username => view.draft.username.clone(),
            AuthField::FirstName => view.draft.first_name.clone(),
            AuthField::LastName => view.draft.last_name.clone(),
            AuthField::Email => view.draft.email.clone(),
            AuthField::Phone => view.draft.phone.clone(),
            AuthField::Role => view.draft.role.to_string(),
            AuthField::Password => "*".repeat(view.draft.password.chars().count()),
        };
        println!("  {:<11} {}", format!("{}:", field), value);
    }
}

pub fn whoami(view: &AuthView) {
    match &view.current_user {
        Some(user) => println!("{}", format!("Logged in as {}", user.display_name()).green()),
        None => println!("{}", "Not logged in".bright_black()),
    }
}

pub fn notice(notice: &Notice) {
    match notice.kind {
        NoticeKind::Alert => println!("{}", format!("! {}", notice.message).red().bold()),
        NoticeKind::Confirmation => println!("{}", notice.message.bright_green()),
    }
}

pub fn error(message: impl std::fmt::Display) {
    eprintln!("{}", format!("Error: {}", message).red());
}
