use bevy::prelude::*;
use std::time::Duration;

use crate::paths::build_paths;
use crate::settings::VoyageSettings;

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running,
}

impl RunState {
    pub fn toggled(self) -> Self {
        match self {
            RunState::Idle => RunState::Running,
            RunState::Running => RunState::Idle,
        }
    }
}

#[derive(Event, Default)]
pub struct ToggleRunEvent;

#[derive(Event, Default)]
pub struct ResetEvent;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ShipId {
    /// Crosses the deformed corridor.
    A,
    /// Flat-space reference.
    B,
}

#[derive(Clone, Debug)]
pub struct Ship {
    pub name: &'static str,
    pub color: Color,
    pub path: Vec<Vec3>,
    pub position: Vec3,
    /// Normalized distance along `path`, in `[0, 1]`.
    pub progress: f32,
    /// Proper time in seconds.
    pub time_elapsed: f64,
    /// Rate of proper time against wall-clock time for the current tick.
    pub time_dilation: f32,
}

impl Ship {
    pub fn new(name: &'static str, color: Color, path: Vec<Vec3>) -> Self {
        Self {
            name,
            color,
            position: path.first().copied().unwrap_or(Vec3::ZERO),
            path,
            progress: 0.0,
            time_elapsed: 0.0,
            time_dilation: 1.0,
        }
    }

    pub fn arrived(&self) -> bool {
        self.progress >= 1.0
    }

    /// Moves along the path and snaps to the waypoint at or behind `progress`.
    /// There is no blending between waypoints, so motion is stepwise.
    fn travel(&mut self, speed: f32, delta_seconds: f64) {
        if self.progress < 1.0 {
            self.progress = (self.progress + speed * delta_seconds as f32).min(1.0);
            if self.arrived() {
                debug!("{} reached the end of its path", self.name);
            }
        }
        let Some(last) = self.path.len().checked_sub(1) else {
            return;
        };
        let idx = ((self.progress * last as f32).floor() as usize).min(last);
        self.position = self.path[idx];
    }

    fn accumulate(&mut self, delta_seconds: f64) {
        self.time_elapsed += delta_seconds * f64::from(self.time_dilation);
    }
}

#[derive(Resource, Clone, Debug)]
pub struct Fleet {
    pub ship_a: Ship,
    pub ship_b: Ship,
}

impl Fleet {
    pub fn launch() -> Self {
        let (curved, flat) = build_paths();
        Self {
            ship_a: Ship::new("Ship A (curved space)", Color::srgb_u8(0xff, 0x44, 0x66), curved),
            ship_b: Ship::new("Ship B (flat space)", Color::srgb_u8(0x44, 0xff, 0x88), flat),
        }
    }

    pub fn ship(&self, id: ShipId) -> &Ship {
        match id {
            ShipId::A => &self.ship_a,
            ShipId::B => &self.ship_b,
        }
    }

    pub fn any_progress(&self) -> bool {
        self.ship_a.progress > 0.0 || self.ship_b.progress > 0.0
    }
}

/// One simulation step. `curved` takes its dilation from the deformation field,
/// `flat` always runs at the wall-clock rate.
pub fn advance(curved: &mut Ship, flat: &mut Ship, delta_seconds: f64, settings: &VoyageSettings) {
    curved.travel(settings.speed, delta_seconds);
    flat.travel(settings.speed, delta_seconds);

    curved.time_dilation = settings.dilation_at(curved.position.x, curved.position.z);
    flat.time_dilation = 1.0;

    curved.accumulate(delta_seconds);
    flat.accumulate(delta_seconds);
}

/// Wall-clock reference for frame deltas. Only advanced while running.
#[derive(Resource, Default, Debug)]
pub struct FrameClock {
    last: Duration,
}

impl FrameClock {
    pub fn anchor(&mut self, now: Duration) {
        self.last = now;
    }

    /// Seconds since the previous tick or anchor.
    pub fn tick(&mut self, now: Duration) -> f64 {
        let delta = now.saturating_sub(self.last);
        self.last = now;
        delta.as_secs_f64()
    }
}

/// Proper times as shown by the HUD.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct ElapsedReadout {
    pub ship_a: f64,
    pub ship_b: f64,
}

impl ElapsedReadout {
    pub fn difference(&self) -> f64 {
        (self.ship_b - self.ship_a).abs()
    }
}

pub struct SimPlugin;
impl Plugin for SimPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<VoyageSettings>()
            .init_resource::<FrameClock>()
            .init_resource::<ElapsedReadout>()
            .init_state::<RunState>()
            .add_event::<ToggleRunEvent>()
            .add_event::<ResetEvent>()
            .add_systems(Startup, spawn_fleet)
            // Requests land before StateTransition so the same frame sees the new state.
            .add_systems(PreUpdate, (handle_reset, handle_toggle).chain())
            .add_systems(OnEnter(RunState::Running), anchor_clock)
            .add_systems(
                Update,
                tick_fleet
                    .in_set(SimSet::Advance)
                    .run_if(in_state(RunState::Running)),
            );
    }
}

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimSet {
    Advance,
}

pub fn spawn_fleet(mut commands: Commands) {
    commands.insert_resource(Fleet::launch());
}

fn handle_reset(
    mut ev_reset: EventReader<ResetEvent>,
    mut fleet: Option<ResMut<Fleet>>,
    mut readout: ResMut<ElapsedReadout>,
    mut next_state: ResMut<NextState<RunState>>,
) {
    if ev_reset.is_empty() {
        return;
    }
    ev_reset.clear();

    next_state.set(RunState::Idle);
    if let Some(fleet) = fleet.as_mut() {
        **fleet = Fleet::launch();
    }
    *readout = ElapsedReadout::default();
    info!("simulation reset");
}

fn handle_toggle(
    mut ev_toggle: EventReader<ToggleRunEvent>,
    mut ev_reset: EventReader<ResetEvent>,
    state: Res<State<RunState>>,
    mut next_state: ResMut<NextState<RunState>>,
) {
    // A reset in the same frame leaves the fresh run idle.
    if !ev_reset.is_empty() {
        ev_reset.clear();
        ev_toggle.clear();
        return;
    }
    // Pairs of presses in one frame cancel out.
    let presses = ev_toggle.read().count();
    if presses % 2 == 0 {
        return;
    }
    let target = state.get().toggled();
    next_state.set(target);
    match target {
        RunState::Running => info!("simulation started"),
        RunState::Idle => info!("simulation paused"),
    }
}

fn anchor_clock(mut clock: ResMut<FrameClock>, time: Res<Time<Real>>) {
    clock.anchor(time.elapsed());
}

fn tick_fleet(
    mut clock: ResMut<FrameClock>,
    time: Res<Time<Real>>,
    settings: Res<VoyageSettings>,
    fleet: Option<ResMut<Fleet>>,
    mut readout: ResMut<ElapsedReadout>,
) {
    let Some(mut fleet) = fleet else {
        return;
    };
    let delta = clock.tick(time.elapsed());
    let Fleet { ship_a, ship_b } = &mut *fleet;
    advance(ship_a, ship_b, delta, &settings);
    readout.ship_a = ship_a.time_elapsed;
    readout.ship_b = ship_b.time_elapsed;
}
