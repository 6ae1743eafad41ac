use chrono::{DateTime, Utc};
use colored::*;
use shipaddr::commands::{CmdMessage, MessageLevel};
use shipaddr::renderer::AddressCard;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const SELECTED_MARKER: &str = "●";

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// One-line summary of the non-empty parts of a card.
pub fn summarize(card: &AddressCard) -> String {
    let street = card.street.join(", ");
    [
        card.name.as_str(),
        card.company.as_str(),
        street.as_str(),
        card.city.as_str(),
        card.region.as_str(),
        card.postcode.as_str(),
        card.country.as_str(),
    ]
    .iter()
    .filter(|part| !part.is_empty())
    .copied()
    .collect::<Vec<_>>()
    .join(", ")
}

/// Cards with their 1-based index, selected one marked.
pub fn print_cards(cards: &[AddressCard]) {
    if cards.is_empty() {
        println!("No addresses found.");
        return;
    }

    for (i, card) in cards.iter().enumerate() {
        let marker = if card.selected {
            format!("  {} ", SELECTED_MARKER)
        } else {
            "    ".to_string()
        };
        let idx_str = format!("{}. ", i + 1);
        let available = LINE_WIDTH.saturating_sub(marker.width() + idx_str.width());
        let summary = truncate_to_width(&summarize(card), available);

        if card.selected {
            println!("{}{}{}", marker.green(), idx_str.green(), summary.bold());
        } else {
            println!("{}{}{}", marker, idx_str, summary);
        }

        if !card.telephone.is_empty() {
            println!("{}{}", " ".repeat(8), card.telephone.dimmed());
        }
        for (code, label) in &card.attributes {
            println!("{}{}", " ".repeat(8), format!("{}: {}", code, label).dimmed());
        }
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

pub fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    timeago::Formatter::new().convert(duration.to_std().unwrap_or_default())
}
