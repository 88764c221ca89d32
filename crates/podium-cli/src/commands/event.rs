use clap::Subcommand;
use podium_core::{catalog, Store, EVENT_NAMES};

use super::print_json;

#[derive(Subcommand)]
pub enum EventAction {
    /// List the available debate formats
    List,
    /// Select an event and build its segment timers
    Select {
        /// Event name, e.g. "Lincoln Douglas"
        name: String,
    },
    /// End the round and return to event selection
    End,
}

pub fn run(action: EventAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        EventAction::List => {
            for name in EVENT_NAMES {
                // Catalog names always resolve; skip defensively if not.
                let Some(preset) = catalog::preset(name) else {
                    continue;
                };
                println!(
                    "{name}  ({} segments, {} min prep)",
                    preset.segment_count(),
                    preset.prep_secs / 60
                );
            }
        }
        EventAction::Select { name } => {
            let store = Store::open()?;
            let mut session = store.load_session();
            let event = session.select_event(&name)?;
            store.save_session(&session)?;
            print_json(&event)?;
        }
        EventAction::End => {
            let store = Store::open()?;
            let mut session = store.load_session();
            let event = session.end_round();
            store.save_session(&session)?;
            print_json(&event)?;
        }
    }
    Ok(())
}
