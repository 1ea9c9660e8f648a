use crate::analysis::TwinSunsReport;
use crate::config::Settings;
use crate::error::Result;

pub fn analyze_twin_suns(settings: &Settings) -> Result<()> {
    println!("Loading card database...");
    let report = TwinSunsReport::load(&settings.cards_csv_path())?;
    println!("\n{}", report);
    Ok(())
}
