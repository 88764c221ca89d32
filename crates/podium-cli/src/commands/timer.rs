use clap::Subcommand;
use podium_core::Store;

use super::print_json;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start the timer for the current segment
    Start {
        /// Replace the segment's allotted time (seconds) before starting
        #[arg(long)]
        secs: Option<u32>,
    },
    /// Stop the current segment timer, freezing its remaining time
    Stop,
    /// Reset the current segment timer to its allotted time
    Reset,
    /// Move to the next segment
    Next,
    /// Move to the previous segment
    Prev,
    /// Jump to a segment by index
    Select { index: usize },
    /// Print the current session state as JSON
    Status,
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let mut session = store.load_session();
    // Bring remaining times up to date before applying the command.
    session.tick();

    let event = match action {
        TimerAction::Start { secs } => match secs {
            Some(secs) => session.start_current_with(secs),
            None => session.start_current(),
        },
        TimerAction::Stop => session.stop_current(),
        TimerAction::Reset => session.reset_current(),
        TimerAction::Next => session.next_segment(),
        TimerAction::Prev => session.prev_segment(),
        TimerAction::Select { index } => session.select_segment(index),
        TimerAction::Status => None,
    };

    match event {
        Some(event) => print_json(&event)?,
        None => print_json(&session.snapshot())?,
    }

    store.save_session(&session)?;
    Ok(())
}
