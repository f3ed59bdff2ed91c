mod events;
mod scheduler;
mod simulation;

pub use events::{SimulationEvent, SubscriptionId};
pub use scheduler::{ManualClock, Scheduler, SystemClock, TimerHandle};
pub use simulation::{MAX_STEPS_PER_TICK, RunState, Simulation, StepReport};
