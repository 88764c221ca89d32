pub mod config;
pub mod event;
pub mod prep;
pub mod timer;

use podium_core::Event;

pub(crate) fn print_json(event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(event)?);
    Ok(())
}
