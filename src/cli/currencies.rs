use super::ui;
use crate::converter::supported_currencies;

/// Prints the currencies known to work with the calculator.
pub fn run() {
    println!("{}", ui::style_text("Supported currencies", ui::StyleType::Title));
    for code in supported_currencies() {
        println!("  {code}");
    }
    println!(
        "{}",
        ui::style_text(
            "Other 3-letter codes are passed through to the upstream as-is.",
            ui::StyleType::Subtle
        )
    );
}
