//! `meup presets`: list the quick-select presets and what they resolve to
//! right now.

use anyhow::Result;
use tabled::{Table, Tabled};

use meup_core::{Clock, QuickKey, SystemClock};

#[derive(Tabled)]
struct PresetRow {
    #[tabled(rename = "Preset")]
    key: &'static str,
    #[tabled(rename = "Label")]
    label: &'static str,
    #[tabled(rename = "Resolves To")]
    range: String,
}

pub fn run() -> Result<()> {
    let today = SystemClock.today();
    let rows: Vec<PresetRow> = QuickKey::all()
        .iter()
        .map(|key| PresetRow {
            key: key.key(),
            label: key.label(),
            range: key.resolve(today).to_string(),
        })
        .collect();

    println!("{}", Table::new(rows));
    Ok(())
}
