//! A single run of play mode, from an empty board to failure.

use std::time::Duration;

use piano_tiles_core::{
    Command, Event, FailureReason, InputEvent, MouseButton, SurfacePoint, GAME_TITLE,
};
use piano_tiles_system_click_resolution::ClickResolution;
use piano_tiles_system_spawning::{LaneSource, Spawning};
use piano_tiles_world::{self as world, query, World, WorldConfig};

/// Result of advancing a play session by one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlayOutcome {
    /// The session continues.
    Running,
    /// The session reached its terminal state.
    Failed(FailureReason),
    /// The window was asked to close.
    QuitRequested,
}

/// Owns the board of one session together with the systems that drive it.
#[derive(Debug)]
pub struct PlaySession<L> {
    world: World,
    spawning: Spawning<L>,
    clicks: ClickResolution,
    commands: Vec<Command>,
    events: Vec<Event>,
}

impl<L: LaneSource> PlaySession<L> {
    /// Starts a session on an empty board.
    #[must_use]
    pub fn new(config: WorldConfig, lanes: L) -> Self {
        Self {
            world: World::new(config),
            spawning: Spawning::new(lanes),
            clicks: ClickResolution::new(),
            commands: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Advances the session by one frame.
    ///
    /// Clicks are resolved first, then the board is replenished, then tiles
    /// move. A click that fails the session stops the frame immediately.
    pub fn step(&mut self, input: &[InputEvent], dt: Duration) -> PlayOutcome {
        self.events.clear();

        for event in input {
            match *event {
                InputEvent::Quit => {
                    log::info!("exit requested during play");
                    return PlayOutcome::QuitRequested;
                }
                InputEvent::MouseDown {
                    button: MouseButton::Left,
                    position,
                } => {
                    self.resolve_click(position);
                    if let Some(reason) = query::failure(&self.world) {
                        return PlayOutcome::Failed(reason);
                    }
                }
                InputEvent::MouseDown { .. } | InputEvent::KeyDown { .. } => {}
            }
        }

        self.spawning.handle(
            &query::tile_view(&self.world),
            &query::geometry(&self.world),
            &mut self.commands,
        );
        self.commands.push(Command::Tick { dt });
        self.flush_commands();

        match query::failure(&self.world) {
            Some(reason) => PlayOutcome::Failed(reason),
            None => PlayOutcome::Running,
        }
    }

    fn resolve_click(&mut self, position: SurfacePoint) {
        self.clicks
            .handle(position, &query::tile_view(&self.world), &mut self.commands);
        self.flush_commands();
    }

    fn flush_commands(&mut self) {
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
    }

    /// Board of the session.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Events broadcast by the world during the most recent step.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Points scored so far.
    #[must_use]
    pub fn points(&self) -> u32 {
        query::points(&self.world)
    }

    /// Window title carrying the live score and scroll speed.
    #[must_use]
    pub fn window_title(&self) -> String {
        format!(
            "{GAME_TITLE} | Score: {} | Speed: {:.2}",
            query::points(&self.world),
            query::scroll_speed(&self.world)
        )
    }

    /// Ends the session, handing back the lane source for the next one.
    #[must_use]
    pub fn into_lane_source(self) -> L {
        self.spawning.into_lane_source()
    }
}
