use clap::{Subcommand, ValueEnum};
use podium_core::{Side, Store};

use super::print_json;

#[derive(Clone, Copy, ValueEnum)]
pub enum SideArg {
    Aff,
    Neg,
}

impl From<SideArg> for Side {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::Aff => Side::Aff,
            SideArg::Neg => Side::Neg,
        }
    }
}

#[derive(Subcommand)]
pub enum PrepAction {
    /// Start drawing from a side's prep budget
    Start { side: SideArg },
    /// Stop the side's prep clock
    Stop { side: SideArg },
    /// Restore a side's prep budget to its baseline
    Reset { side: SideArg },
    /// Print the current session state as JSON
    Status,
}

pub fn run(action: PrepAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let mut session = store.load_session();
    session.tick();

    let event = match action {
        PrepAction::Start { side } => session.prep_start(side.into()),
        PrepAction::Stop { side } => session.prep_stop(side.into()),
        PrepAction::Reset { side } => session.prep_reset(side.into()),
        PrepAction::Status => session.snapshot(),
    };
    print_json(&event)?;

    store.save_session(&session)?;
    Ok(())
}
