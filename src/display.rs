use crate::prompts::PHOTO_PLACEHOLDER;
use crate::session::message::{Message, Role};
use chrono::Local;
use console::style;

const COMPANION_NAME: &str = "작은 한 걸음";

/// Replays the stored conversation on startup.
pub fn display_history(messages: &[Message]) {
    for message in messages {
        display_message(message);
    }
}

pub fn display_message(message: &Message) {
    match message.role {
        Role::Model => {
            println!("\n{}", style(COMPANION_NAME).bold().green());
            display_text_block(message.text.as_deref().unwrap_or_default());
        }
        Role::User => {
            println!("\n{}", style("나").bold().cyan());
            if message.image_data.is_some() {
                println!("  {}", style(PHOTO_PLACEHOLDER).dim());
            }
            if let Some(text) = message.text.as_deref().filter(|t| !t.is_empty()) {
                display_text_block(text);
            }
        }
    }
}

/// Echo for a photo the user just sent, before the reply arrives.
pub fn display_user_photo_echo() {
    println!("\n{}", style("나").bold().cyan());
    println!("  {}", style(PHOTO_PLACEHOLDER).dim());
}

/// Shows a model reply; replies that look like markdown render through
/// termimad, everything else through the plain styled path.
pub fn display_reply(text: &str) {
    println!("\n{}", style(COMPANION_NAME).bold().green());
    if text.contains("```") || text.contains('*') || text.contains('`') || text.contains('#') {
        let skin = termimad::MadSkin::default();
        skin.print_text(text);
    } else {
        display_text_block(text);
    }
}

/// Inline notice for local problems (capture failures, busy session).
/// Never touches the message sequence.
pub fn display_notice(text: &str) {
    println!("{} {}", style("!").bold().yellow(), style(text).yellow());
}

/// Journey review: the session's user photos as a numbered timeline.
pub fn display_review(messages: &[Message]) {
    println!("\n{}", style("나의 작은 여정").bold().underlined());

    let steps: Vec<&Message> = messages
        .iter()
        .filter(|m| m.role == Role::User && m.image_data.is_some())
        .collect();

    if steps.is_empty() {
        println!(
            "  {}",
            style("아직 기록된 사진이 없네. 내일은 작은 사진 하나 남겨볼까?").dim()
        );
        return;
    }

    for (index, step) in steps.iter().enumerate() {
        let time = step.timestamp.with_timezone(&Local).format("%H:%M");
        println!(
            "  {} {}  {}",
            style(format!("Step {}", index + 1)).bold().green(),
            style(time).dim(),
            step.text.as_deref().unwrap_or(PHOTO_PLACEHOLDER)
        );
    }

    println!(
        "\n  {}",
        style("\"완벽하지 않아도 괜찮아. 너는 이미 충분히 잘하고 있어.\"").italic()
    );
}

fn display_text_block(text: &str) {
    let width = terminal_text_width();
    for line in text.lines() {
        for wrapped in wrap_line(line, width) {
            println!("  {}", wrapped);
        }
    }
}

fn terminal_text_width() -> usize {
    let term = console::Term::stdout();
    let cols = term.size().1 as usize;
    cols.saturating_sub(4).clamp(20, 100)
}

// Hangul and CJK take two terminal columns
fn char_width(c: char) -> usize {
    match c {
        '\u{1100}'..='\u{115F}'
        | '\u{3000}'..='\u{303F}'
        | '\u{3130}'..='\u{318F}'
        | '\u{4E00}'..='\u{9FFF}'
        | '\u{AC00}'..='\u{D7AF}'
        | '\u{FF00}'..='\u{FFEF}' => 2,
        _ => 1,
    }
}

fn wrap_line(line: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for c in line.chars() {
        let w = char_width(c);
        if current_width + w > max_width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push(c);
        current_width += w;
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
