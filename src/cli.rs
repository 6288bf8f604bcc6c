use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "listing-form",
    version,
    about = "Pick a location and sector for a property listing"
)]
pub struct Args {
    /// Location selected when the form opens (e.g., "Dwarka")
    #[arg(short, long)]
    pub location: Option<String>,

    /// Catalog file with locations, sectors and price ranges
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Config file to use instead of the default one
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
