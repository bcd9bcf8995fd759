//! Rule-weight inspector: feed it a review text, see how every category
//! scores and where the text lands. Used when tuning the rule table.
//!
//! Usage: cargo run --bin debug_classify -- "I was suspended and never got paid"

use review_insights::{classifier, sentiment};

fn main() {
    let text: String = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if text.trim().is_empty() {
        eprintln!("Usage: debug_classify <review text>");
        std::process::exit(1);
    }

    println!("🔎 Text: {}", text);

    let score = sentiment::polarity(&text);
    println!(
        "🧠 Sentiment: {:.3} ({})",
        score,
        sentiment::label_for_score(score).as_str()
    );

    println!("⚖️ Category weights:");
    for cw in classifier::analyze(&text) {
        let marker = if cw.weight >= 2 { "→" } else { " " };
        println!("  {} {:<20} {:>3}  {}", marker, cw.category, cw.weight, cw.theme);
    }

    println!("🏷️ Theme: {}", classifier::classify(&text));
}
