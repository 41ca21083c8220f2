use super::ui;
use crate::converter::Converter;
use crate::core::{ConversionOptions, ConversionResult, ExchangeError, ExchangeRateProvider};
use anyhow::Result;
use futures::future::join_all;

/// Arguments of the `convert` command. Unset values fall back to the
/// configured defaults.
#[derive(Debug, Clone, Default)]
pub struct ConvertCommand {
    pub amount: Option<f64>,
    pub from: Option<String>,
    /// One conversion per target; empty means the default target.
    pub targets: Vec<String>,
    pub bank: Option<String>,
    pub unit: Option<String>,
    pub direction: Option<String>,
    pub content_id: Option<u32>,
    pub json: bool,
}

impl ConvertCommand {
    fn options(&self) -> Vec<ConversionOptions> {
        let base = ConversionOptions {
            bank: self.bank.clone(),
            amount: self.amount,
            from: self.from.clone(),
            to: None,
            unit: self.unit.clone(),
            direction: self.direction.clone(),
            content_id: self.content_id,
        };

        if self.targets.is_empty() {
            return vec![base];
        }
        self.targets
            .iter()
            .map(|to| base.clone().to_currency(to.as_str()))
            .collect()
    }
}

pub async fn run<P: ExchangeRateProvider>(converter: &Converter<P>, command: &ConvertCommand) -> Result<()> {
    let options = command.options();
    let labels: Vec<String> = options
        .iter()
        .map(|o| o.to.clone().unwrap_or_else(|| "-".to_string()))
        .collect();

    let pb = ui::new_spinner("Fetching exchange rates");
    let results = join_all(options.into_iter().map(|o| converter.convert(o))).await;
    pb.finish_and_clear();

    let failed = results.iter().filter(|r| r.is_err()).count();
    if command.json {
        print_json(&results)?;
    } else {
        print_table(&labels, &results);
    }

    if failed > 0 {
        anyhow::bail!("{} of {} conversions failed", failed, results.len());
    }
    Ok(())
}

fn print_json(results: &[Result<ConversionResult, ExchangeError>]) -> Result<()> {
    for result in results {
        match result {
            Ok(r) => println!("{}", serde_json::to_string(r)?),
            Err(e) => eprintln!("{}", ui::style_text(&e.to_string(), ui::StyleType::Error)),
        }
    }
    Ok(())
}

fn print_table(labels: &[String], results: &[Result<ConversionResult, ExchangeError>]) {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("From"),
        ui::header_cell("To"),
        ui::header_cell("Amount"),
        ui::header_cell("Rate"),
        ui::header_cell("Result"),
    ]);

    for (label, result) in labels.iter().zip(results) {
        match result {
            Ok(r) => {
                table.add_row(vec![
                    comfy_table::Cell::new(&r.from),
                    comfy_table::Cell::new(&r.to),
                    ui::number_cell(r.amount.to_string()),
                    ui::number_cell(ui::format_rate(r.rate)),
                    ui::total_cell(r.result),
                ]);
            }
            Err(e) => {
                table.add_row(vec![
                    comfy_table::Cell::new("-"),
                    comfy_table::Cell::new(label),
                    ui::error_cell(&e.to_string()),
                ]);
            }
        }
    }

    println!("{table}");
}
