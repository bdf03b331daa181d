//! Subcommand-driven presentation layer. Everything here is a thin wrapper:
//! commands load a snapshot through the services, hand it to the pure
//! schedule/report functions, and print.

pub mod forms;
pub mod icons;
pub mod output;
pub mod payment;

use std::collections::HashSet;

use chrono::NaiveDate;
use colored::Colorize;
use uuid::Uuid;

use crate::config::{load_settings, load_theme, save_settings, save_theme, Theme};
use crate::domain::common::Displayable;
use crate::currency::{convert, format_amount, Currency};
use crate::domain::reservation::{Reservation, ReservationStatus, ReservationType};
use crate::domain::subscription::{BillingCycle, Category, Subscription};
use crate::errors::TrackerError;
use crate::reports::{category_breakdown, spending_summary, trailing_monthly_trend};
use crate::schedule::{classify, days_until, next_payment_date, Clock, PaymentStatus, SystemClock};
use crate::services::{ProfileService, ReservationService, SortOrder, SubscriptionService};
use crate::storage::JsonStore;

const TREND_MONTHS: u32 = 6;
const UPCOMING_LIMIT: usize = 5;

/// Entry point for the binary: dispatches on the first argument.
pub fn run_cli() -> Result<(), TrackerError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let store = JsonStore::open_default()?;
    run_with(&args, store, &SystemClock)
}

fn run_with(args: &[String], store: JsonStore, clock: &dyn Clock) -> Result<(), TrackerError> {
    let command = args.first().map(String::as_str).unwrap_or("dashboard");
    let rest = if args.is_empty() { &args[..] } else { &args[1..] };
    let today = clock.today();
    match command {
        "dashboard" => dashboard(store, today),
        "list" => list(store, rest, today),
        "add" => add(store, rest, today),
        "edit" => edit(store, rest, today),
        "remove" => remove(store, rest, today),
        "pay" => pay(store, rest, today),
        "reservations" => reservations(store, rest, today),
        "signup" => signup(store),
        "login" => login(store),
        "profile" => profile(store),
        "config" => config_cmd(store, rest),
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "version" | "--version" | "-V" => {
            println!("subtrack {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_help();
            Err(TrackerError::Validation(format!(
                "unknown command `{other}`"
            )))
        }
    }
}

fn dashboard(store: JsonStore, today: NaiveDate) -> Result<(), TrackerError> {
    let settings = load_settings(&store);
    let display = settings.display_currency;
    let service = SubscriptionService::new(store);
    let subs = service.sorted(SortOrder::NextPaymentDate, today);
    // Session-only acknowledgement set; a fresh run starts with none.
    let paid: HashSet<Uuid> = HashSet::new();

    output::section("Dashboard");
    let summary = spending_summary(&subs, settings.monthly_budget_usd, display);
    println!(
        "Total Monthly Cost: {} out of {} budget",
        format_amount(summary.total_monthly, display).bold(),
        format_amount(summary.budget, display)
    );
    println!(
        "  {} {:.0}%",
        output::bar(summary.percent_of_budget, 100.0, 24),
        summary.percent_of_budget
    );

    output::section("Expenses by Category");
    let breakdown = category_breakdown(&subs, display);
    if breakdown.by_category.is_empty() {
        output::info("Add a subscription to see your spending breakdown.");
    } else {
        let max = breakdown.by_category.values().cloned().fold(0.0, f64::max);
        for (category, amount) in &breakdown.by_category {
            println!(
                "  {:<14} {:>14}  {}",
                category.to_string(),
                format_amount(*amount, display),
                output::bar(*amount, max, 20)
            );
        }
        println!(
            "  {:<14} {:>14}",
            "Total".bold(),
            format_amount(breakdown.total, display).bold()
        );
    }

    output::section("Spending Last 6 Months");
    if subs.is_empty() {
        output::info("Add subscriptions to see your spending trend.");
    } else {
        let trend = trailing_monthly_trend(&subs, TREND_MONTHS, today, display);
        let max = trend.iter().map(|point| point.amount).fold(0.0, f64::max);
        for point in &trend {
            println!(
                "  {:<4} {:>14}  {}",
                point.label,
                format_amount(point.amount, display),
                output::bar(point.amount, max, 24)
            );
        }
    }

    let overdue: Vec<&Subscription> = subs
        .iter()
        .filter(|sub| classify(sub, today, &paid) == PaymentStatus::Overdue)
        .collect();
    if !overdue.is_empty() {
        output::section("Overdue Payments");
        for sub in overdue {
            let next = next_payment_date(sub.first_payment_date, sub.billing_cycle, today);
            output::warn(&format!(
                "  {} {} - {} ({})",
                icons::service_icon(&sub.name),
                sub.name,
                next,
                output::due_label(days_until(next, today))
            ));
        }
    }

    output::section("Upcoming Payments");
    if subs.is_empty() {
        output::info("No subscriptions yet. Try `subtrack_cli add`.");
    }
    for sub in subs.iter().take(UPCOMING_LIMIT) {
        let next = next_payment_date(sub.first_payment_date, sub.billing_cycle, today);
        println!(
            "  {} {:<24} {:>14}  {} ({})",
            icons::service_icon(&sub.name),
            sub.name,
            format_amount(convert(sub.amount, sub.currency, display), display),
            next,
            output::due_label(days_until(next, today))
        );
    }
    Ok(())
}

fn list(store: JsonStore, args: &[String], today: NaiveDate) -> Result<(), TrackerError> {
    let order = match flag_value(args, "--sort") {
        Some(raw) => raw.parse::<SortOrder>()?,
        None => SortOrder::default(),
    };
    let service = SubscriptionService::new(store);
    let subs = service.sorted(order, today);

    output::section("Subscriptions");
    for sub in &subs {
        let next = next_payment_date(sub.first_payment_date, sub.billing_cycle, today);
        println!(
            "  {} {:<24} {:>12} {:<14} {:<14} {}  {} ({})",
            icons::service_icon(&sub.name),
            sub.name,
            format_amount(sub.amount, sub.currency),
            sub.billing_cycle.to_string(),
            sub.category.to_string(),
            sub.id,
            next,
            output::due_label(days_until(next, today))
        );
        if let Some(notes) = &sub.notes {
            println!("      {}", notes.dimmed());
        }
    }
    if subs.is_empty() {
        output::info("No subscriptions yet. Try `subtrack_cli add`.");
    }
    Ok(())
}

fn add(store: JsonStore, args: &[String], today: NaiveDate) -> Result<(), TrackerError> {
    let subscription = if args.is_empty() {
        forms::subscription_form(None)?
    } else {
        subscription_from_flags(args)?
    };
    let service = SubscriptionService::new(store);
    let added = service.add(subscription, today)?;
    let next = next_payment_date(added.first_payment_date, added.billing_cycle, today);
    output::success(&format!(
        "Added {} - next payment {} ({})",
        added.name,
        next,
        output::due_label(days_until(next, today))
    ));
    Ok(())
}

fn edit(store: JsonStore, args: &[String], today: NaiveDate) -> Result<(), TrackerError> {
    let query = args
        .first()
        .ok_or_else(|| TrackerError::Validation("usage: edit <id|name>".into()))?;
    let service = SubscriptionService::new(store);
    let existing = service
        .find(query, today)
        .ok_or_else(|| TrackerError::Validation(format!("no subscription matching `{query}`")))?;
    let updated = forms::subscription_form(Some(&existing))?;
    service.update(updated.clone(), today)?;
    output::success(&format!("Updated {}", updated.name));
    Ok(())
}

fn remove(store: JsonStore, args: &[String], today: NaiveDate) -> Result<(), TrackerError> {
    let query = args
        .first()
        .ok_or_else(|| TrackerError::Validation("usage: remove <id|name>".into()))?;
    let service = SubscriptionService::new(store);
    let existing = service
        .find(query, today)
        .ok_or_else(|| TrackerError::Validation(format!("no subscription matching `{query}`")))?;
    if !payment::confirm(&format!("Delete {}?", existing.display_label()))? {
        output::info("Cancelled.");
        return Ok(());
    }
    service.remove(existing.id, today)?;
    output::success(&format!("Removed {}", existing.name));
    Ok(())
}

fn pay(store: JsonStore, args: &[String], today: NaiveDate) -> Result<(), TrackerError> {
    let query = args
        .first()
        .ok_or_else(|| TrackerError::Validation("usage: pay <id|name>".into()))?;
    let service = SubscriptionService::new(store);
    let sub = service
        .find(query, today)
        .ok_or_else(|| TrackerError::Validation(format!("no subscription matching `{query}`")))?;
    let amount_label = format_amount(sub.amount, sub.currency);
    if !payment::confirm(&format!("Pay {} for {}?", amount_label, sub.name))? {
        output::info("Cancelled.");
        return Ok(());
    }
    payment::process(&sub.name, &amount_label);

    // One confirmation, one anchor reset; the acknowledgement set keeps the
    // subscription out of overdue prompts for the rest of this run.
    let updated = service.mark_as_paid(sub.id, today)?;
    let mut paid: HashSet<Uuid> = HashSet::new();
    paid.insert(updated.id);
    let next = next_payment_date(updated.first_payment_date, updated.billing_cycle, today);
    output::info(&format!(
        "{} is now {} - next payment {} ({})",
        updated.name,
        classify(&updated, today, &paid).label().to_lowercase(),
        next,
        output::due_label(days_until(next, today))
    ));
    Ok(())
}

fn reservations(store: JsonStore, args: &[String], today: NaiveDate) -> Result<(), TrackerError> {
    let action = args.first().map(String::as_str).unwrap_or("list");
    let rest = if args.is_empty() { &args[..] } else { &args[1..] };
    let service = ReservationService::new(store);
    match action {
        "list" => {
            output::section("Reservations");
            let reservations = service.list(today);
            for res in &reservations {
                println!(
                    "  {} {:<24} {:<28} {}  {:<10}",
                    icons::reservation_icon(res.kind),
                    res.name,
                    res.location,
                    res.date.format("%Y-%m-%d %H:%M"),
                    res.status.to_string()
                );
                if let Some(details) = &res.details {
                    println!("      {}", details.dimmed());
                }
            }
            if reservations.is_empty() {
                output::info("No reservations yet.");
            }
            Ok(())
        }
        "add" => {
            let reservation = if rest.is_empty() {
                forms::reservation_form(None)?
            } else {
                reservation_from_flags(rest)?
            };
            let added = service.add(reservation, today)?;
            output::success(&format!(
                "Added {} on {}",
                added.name,
                added.date.format("%Y-%m-%d %H:%M")
            ));
            Ok(())
        }
        "remove" => {
            let query = rest.first().ok_or_else(|| {
                TrackerError::Validation("usage: reservations remove <id|name>".into())
            })?;
            let existing = service.find(query, today).ok_or_else(|| {
                TrackerError::Validation(format!("no reservation matching `{query}`"))
            })?;
            if !payment::confirm(&format!("Delete {}?", existing.display_label()))? {
                output::info("Cancelled.");
                return Ok(());
            }
            service.remove(existing.id, today)?;
            output::success(&format!("Removed {}", existing.name));
            Ok(())
        }
        other => Err(TrackerError::Validation(format!(
            "unknown reservations action `{other}`"
        ))),
    }
}

fn signup(store: JsonStore) -> Result<(), TrackerError> {
    let (name, email, password) = forms::signup_form()?;
    let service = ProfileService::new(store);
    let profile = service.sign_up(&name, &email, &password)?;
    output::success(&format!("Welcome, {}!", profile.name));
    Ok(())
}

fn login(store: JsonStore) -> Result<(), TrackerError> {
    let (email, password) = forms::login_form()?;
    let service = ProfileService::new(store);
    let profile = service.login(&email, &password)?;
    output::success(&format!("Welcome back, {}!", profile.name));
    Ok(())
}

fn profile(store: JsonStore) -> Result<(), TrackerError> {
    let service = ProfileService::new(store);
    match service.profile() {
        Some(profile) => {
            output::section("Profile");
            println!("  Name:    {}", profile.name);
            println!("  Email:   {}", profile.email);
            println!("  Address: {}", profile.address);
            println!("  Phone:   {}", profile.phone);
        }
        None => output::info("No profile yet. Try `subtrack_cli signup`."),
    }
    Ok(())
}

fn config_cmd(store: JsonStore, args: &[String]) -> Result<(), TrackerError> {
    let action = args.first().map(String::as_str).unwrap_or("show");
    match action {
        "show" => {
            let settings = load_settings(&store);
            let theme = load_theme(&store);
            output::section("Settings");
            println!("  Display currency: {}", settings.display_currency);
            println!(
                "  Monthly budget:   {}",
                format_amount(settings.monthly_budget_usd, Currency::Usd)
            );
            println!("  Theme:            {theme}");
            Ok(())
        }
        "currency" => {
            let code = args
                .get(1)
                .ok_or_else(|| TrackerError::Validation("usage: config currency <code>".into()))?;
            let mut settings = load_settings(&store);
            settings.display_currency = code.parse()?;
            save_settings(&store, &settings);
            output::success(&format!("Display currency set to {}", settings.display_currency));
            Ok(())
        }
        "theme" => {
            let name = args
                .get(1)
                .ok_or_else(|| TrackerError::Validation("usage: config theme <name>".into()))?;
            let theme: Theme = name.parse()?;
            save_theme(&store, theme);
            output::success(&format!("Theme set to {theme}"));
            Ok(())
        }
        "budget" => {
            let raw = args
                .get(1)
                .ok_or_else(|| TrackerError::Validation("usage: config budget <usd>".into()))?;
            let budget: f64 = raw
                .parse()
                .map_err(|_| TrackerError::Validation(format!("invalid budget `{raw}`")))?;
            if !(budget > 0.0) {
                return Err(TrackerError::Validation("budget must be positive".into()));
            }
            let mut settings = load_settings(&store);
            settings.monthly_budget_usd = budget;
            save_settings(&store, &settings);
            output::success(&format!(
                "Monthly budget set to {}",
                format_amount(budget, Currency::Usd)
            ));
            Ok(())
        }
        other => Err(TrackerError::Validation(format!(
            "unknown config action `{other}`"
        ))),
    }
}

fn subscription_from_flags(args: &[String]) -> Result<Subscription, TrackerError> {
    let name = required(args, "--name")?;
    let amount: f64 = required(args, "--amount")?
        .parse()
        .map_err(|_| TrackerError::Validation("invalid --amount".into()))?;
    let currency: Currency = required(args, "--currency")?.parse()?;
    let cycle: BillingCycle = required(args, "--cycle")?.parse()?;
    let first_payment: NaiveDate = required(args, "--first-payment")?
        .parse()
        .map_err(|_| TrackerError::Validation("invalid --first-payment, expected YYYY-MM-DD".into()))?;
    let category: Category = required(args, "--category")?.parse()?;
    let mut subscription =
        Subscription::new(name, amount, currency, cycle, first_payment, category);
    if let Some(notes) = flag_value(args, "--notes") {
        subscription.notes = Some(notes.to_string());
    }
    Ok(subscription)
}

fn reservation_from_flags(args: &[String]) -> Result<Reservation, TrackerError> {
    let kind: ReservationType = required(args, "--type")?.parse()?;
    let name = required(args, "--name")?;
    let location = required(args, "--location")?;
    let date = forms::parse_datetime(required(args, "--date")?)?;
    let status: ReservationStatus = match flag_value(args, "--status") {
        Some(raw) => raw.parse()?,
        None => ReservationStatus::Confirmed,
    };
    let mut reservation = Reservation::new(kind, name, location, date, status);
    if let Some(details) = flag_value(args, "--details") {
        reservation.details = Some(details.to_string());
    }
    if let Some(url) = flag_value(args, "--url") {
        reservation.booking_url = Some(url.to_string());
    }
    Ok(reservation)
}

fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == name)
        .and_then(|index| args.get(index + 1))
        .map(String::as_str)
}

fn required<'a>(args: &'a [String], name: &str) -> Result<&'a str, TrackerError> {
    flag_value(args, name).ok_or_else(|| TrackerError::Validation(format!("missing {name}")))
}

fn print_help() {
    println!("subtrack - track subscriptions and reservations");
    println!();
    println!("Usage: subtrack_cli <command> [options]");
    println!();
    println!("Commands:");
    println!("  dashboard              Spending overview (default)");
    println!("  list [--sort <order>]  All subscriptions (next|name|amount|category)");
    println!("  add [flags]            Add a subscription (interactive without flags)");
    println!("  edit <id|name>         Edit a subscription");
    println!("  remove <id|name>       Delete a subscription");
    println!("  pay <id|name>          Pay a subscription and advance its cycle");
    println!("  reservations [action]  list | add | remove");
    println!("  signup / login         Local demo account");
    println!("  profile                Show the stored profile");
    println!("  config [action]        show | currency | theme | budget");
    println!("  help, version");
    println!();
    println!("Add flags: --name --amount --currency --cycle --first-payment");
    println!("           --category [--notes]");
}
