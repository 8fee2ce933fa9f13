use clap::Args;
use serde_json::Value;

use tariff_core::dashboard::{generate_dashboard, DashboardItem};

use crate::input;

/// Arguments for the tariff-burden dashboard
#[derive(Args)]
pub struct DashboardArgs {
    /// Path to a JSON array of analyzed purchases; omit to read stdin
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_dashboard(args: DashboardArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let items: Vec<DashboardItem> = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("provide --input <items.json> or pipe purchase JSON on stdin".into());
    };

    let output = generate_dashboard(&items)?;
    Ok(serde_json::to_value(output)?)
}
