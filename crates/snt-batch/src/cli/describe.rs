use anyhow::Result;

use snt::prelude::describe;
use snt_batch::api::BATCH_OPTIONS;

/// Print every option with its default
pub fn run() -> Result<()> {
    println!("{:<22} {:>8}  Description", "Option", "Default");
    println!("{:-<80}", "");
    for option in describe().iter().chain(BATCH_OPTIONS) {
        println!("{:<22} {:>8}  {}", option.name, option.default, option.description);
    }
    Ok(())
}
