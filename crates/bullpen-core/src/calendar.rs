//! Calendar expansion: the fixed daily rhythm of the studio.
//!
//! One pass before the run starts turns the configured day window into the
//! full event set: a manager kickoff at the open, a coffee break, a lunch
//! break and a team meeting per day at fixed clock anchors, a gossip slot
//! every half hour of working time, and a single deadline event at the
//! horizon. Gossip speakers are drawn here, during expansion, so a fixed
//! seed reproduces the same roster of whispers.
//!
//! Anchors are clock times (10:00 coffee, 12:30 lunch, 15:00 meeting)
//! translated into simulated hours relative to the opening hour, and
//! dropped when the translation falls outside `[0, total_hours]`. An
//! afternoon-only studio simply has no coffee break.

use bullpen_agents::roster;
use bullpen_types::{AgentKind, SimHours, TimeError};
use rand::Rng;
use tracing::debug;

use crate::config::StudioConfig;
use crate::event::{Event, EventAction, EventQueue};

/// Clock-time anchor for the daily coffee break (10:00).
const COFFEE_HOUR: f64 = 10.0;

/// Clock-time anchor for the daily lunch break (12:30).
const LUNCH_HOUR: f64 = 12.5;

/// Clock-time anchor for the daily team meeting (15:00).
const MEETING_HOUR: f64 = 15.0;

/// Simulated hours between gossip opportunities at the kettle.
const GOSSIP_STEP: f64 = 0.5;

/// Seed the queue with every scheduled moment of the run.
///
/// The expansion happens in one fixed order (kickoff, then each day's
/// anchors followed by its gossip slots, then the deadline), so events
/// that share a timestamp execute in exactly that order.
///
/// # Errors
///
/// Returns [`TimeError`] if a computed timestamp is not a valid simulated
/// time; with a validated configuration this does not happen.
pub fn seed(
    queue: &mut EventQueue,
    config: &StudioConfig,
    rng: &mut impl Rng,
) -> Result<(), TimeError> {
    let total_hours = config.total_hours();
    let hours_per_day = config.hours_per_day();
    let open = f64::from(config.start_hour);

    push(
        queue,
        0.0,
        EventAction::Crew(AgentKind::Manager),
        "Manager kickoff",
    )?;

    for day in 0..config.days {
        let day_base = f64::from(day) * hours_per_day;

        // Daily anchors, dropped when they fall outside the run.
        let coffee = day_base + (COFFEE_HOUR - open);
        let lunch = day_base + (LUNCH_HOUR - open);
        let meeting = day_base + (MEETING_HOUR - open);
        if (0.0..=total_hours).contains(&coffee) {
            push(queue, coffee, EventAction::CoffeeBreak, "Coffee break")?;
        }
        if (0.0..=total_hours).contains(&lunch) {
            push(queue, lunch, EventAction::LunchBreak, "Lunch break")?;
        }
        if (0.0..=total_hours).contains(&meeting) {
            push(queue, meeting, EventAction::TeamMeeting, "Team meeting")?;
        }

        // Gossip every half hour of working time. The speaker is drawn
        // now, during expansion, so the rng is consumed in a stable order.
        let mut slot = day_base + GOSSIP_STEP;
        let day_end = day_base + hours_per_day;
        while slot < day_end {
            let speaker = roster::pick_speaker(rng);
            let label = format!("{} gossips", speaker.display_name());
            push(queue, slot, EventAction::Gossip(speaker), &label)?;
            slot += GOSSIP_STEP;
        }
    }

    push(queue, total_hours, EventAction::Deadline, "Deadline")?;

    debug!(scheduled = queue.len(), total_hours, "Calendar expanded");
    Ok(())
}

fn push(
    queue: &mut EventQueue,
    hours: f64,
    action: EventAction,
    label: &str,
) -> Result<(), TimeError> {
    let time = SimHours::new(hours)?;
    queue.push(Event {
        time,
        action,
        label: label.to_owned(),
    });
    Ok(())
}
