//! Interlock state machine.
//!
//! Reconciles one [`CommandFrame`] against the held [`AxisState`] and
//! produces a [`Plan`]: the per-field transitions to commit and the ordered
//! actuator calls each one needs.
//!
//! # Rules
//!
//! - **Edge-triggered**: a field only yields a transition when it requests a
//!   value different from the held one. Repeating a held request is a no-op.
//! - **Snapshot**: every field is judged against the state as it was before
//!   the frame, never against sibling updates of the same frame.
//! - **Order**: transitions (and their calls) appear in wire field order.
//!
//! | Field        | Start gate                               | Stop gate                     |
//! |--------------|------------------------------------------|-------------------------------|
//! | longitudinal | lateral neutral                          | lateral neutral               |
//! | lateral      | none                                     | longitudinal neutral          |
//! | pitch        | none                                     | none                          |
//! | zoom out/in  | both zoom flags clear                    | none (no call)                |
//! | descend/asc. | opposite vertical flag clear             | opposite clear, pitch neutral |
//! | shutter      | none (one shot per rising edge)          | none (no call)                |
//!
//! When one frame starts both members of an exclusive flag pair (zoom out /
//! zoom in, descend / ascend) the lower wire field wins.
//!
//! The lateral and vertical stop gates are asymmetric with their start
//! gates. This is the rig's established behaviour and is kept as is.

use crate::frame::{CommandFrame, FrameField, Tri};
use crate::state::AxisState;
use rov_common::actuator::types::{ActuatorCommand, CameraAction, Direction, MotorId};
use rov_common::consts::FRAME_FIELDS;

/// Most actuator calls a single field transition can need.
pub const MAX_CALLS_PER_FIELD: usize = 2;

/// Calls of one transition.
pub type Calls = heapless::Vec<ActuatorCommand, MAX_CALLS_PER_FIELD>;

/// State change requested by one frame field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Field that requested the change.
    pub field: FrameField,
    /// Actuator calls to issue, in order.
    pub calls: Calls,
    /// Flags raised on commit.
    pub set: AxisState,
    /// Flags cleared on commit.
    pub clear: AxisState,
}

impl Transition {
    fn new(field: FrameField, calls: Calls, set: AxisState, clear: AxisState) -> Self {
        Self {
            field,
            calls,
            set,
            clear,
        }
    }

    /// State after committing this transition on top of `state`.
    #[inline]
    pub fn apply(&self, state: AxisState) -> AxisState {
        state.difference(self.clear).union(self.set)
    }
}

/// Ordered transitions for one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    transitions: heapless::Vec<Transition, FRAME_FIELDS>,
}

impl Plan {
    /// True if the frame changes nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Transitions in wire field order.
    #[inline]
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// All actuator calls, in emission order.
    pub fn commands(&self) -> impl Iterator<Item = &ActuatorCommand> + '_ {
        self.transitions.iter().flat_map(|t| t.calls.iter())
    }

    /// State after committing every transition.
    pub fn apply(&self, state: AxisState) -> AxisState {
        self.transitions.iter().fold(state, |acc, t| t.apply(acc))
    }
}

/// Per-field handler: held snapshot and frame in, optional transition out.
type FieldHandler = fn(AxisState, &CommandFrame) -> Option<Transition>;

/// Handlers keyed by field, in wire order.
const HANDLERS: [(FrameField, FieldHandler); FRAME_FIELDS] = [
    (FrameField::Longitudinal, longitudinal),
    (FrameField::Lateral, lateral),
    (FrameField::Pitch, pitch),
    (FrameField::ZoomOut, zoom_out),
    (FrameField::ZoomIn, zoom_in),
    (FrameField::Descend, descend),
    (FrameField::Ascend, ascend),
    (FrameField::Shutter, shutter),
];

/// Compute the transitions a frame requests from the held state.
pub fn plan(state: AxisState, frame: &CommandFrame) -> Plan {
    let mut plan = Plan::default();
    for (field, handler) in HANDLERS.iter() {
        if let Some(transition) = handler(state, frame) {
            debug_assert_eq!(transition.field, *field);
            // Capacity is one slot per field.
            let _ = plan.transitions.push(transition);
        }
    }
    plan
}

/// Pure interlock step: next state and the ordered calls to emit.
pub fn step(state: AxisState, frame: &CommandFrame) -> (AxisState, Vec<ActuatorCommand>) {
    let plan = plan(state, frame);
    (plan.apply(state), plan.commands().copied().collect())
}

fn motor_pair(first: (MotorId, Direction), second: (MotorId, Direction)) -> Calls {
    let mut calls = Calls::new();
    let _ = calls.push(ActuatorCommand::motor(first.0, first.1));
    let _ = calls.push(ActuatorCommand::motor(second.0, second.1));
    calls
}

fn camera_call(action: CameraAction) -> Calls {
    let mut calls = Calls::new();
    let _ = calls.push(ActuatorCommand::camera(action));
    calls
}

fn drive(left: Direction, right: Direction) -> Calls {
    motor_pair((MotorId::Left, left), (MotorId::Right, right))
}

fn thrust(front: Direction, rear: Direction) -> Calls {
    motor_pair((MotorId::TopFront, front), (MotorId::TopRear, rear))
}

fn longitudinal(s: AxisState, frame: &CommandFrame) -> Option<Transition> {
    use Direction::*;
    const FIELD: FrameField = FrameField::Longitudinal;

    // No straight-line change while turning.
    if !s.lateral_neutral() {
        return None;
    }
    match frame.longitudinal {
        Tri::Negative if !s.contains(AxisState::FORWARD) => Some(Transition::new(
            FIELD,
            drive(Forward, Forward),
            AxisState::FORWARD,
            AxisState::BACKWARD,
        )),
        Tri::Positive if !s.contains(AxisState::BACKWARD) => Some(Transition::new(
            FIELD,
            drive(Reverse, Reverse),
            AxisState::BACKWARD,
            AxisState::FORWARD,
        )),
        Tri::Neutral if !s.longitudinal_neutral() => Some(Transition::new(
            FIELD,
            drive(Off, Off),
            AxisState::empty(),
            AxisState::LONGITUDINAL,
        )),
        _ => None,
    }
}

fn lateral(s: AxisState, frame: &CommandFrame) -> Option<Transition> {
    use Direction::*;
    const FIELD: FrameField = FrameField::Lateral;

    match frame.lateral {
        Tri::Positive if !s.contains(AxisState::LEFT) => Some(Transition::new(
            FIELD,
            drive(Forward, Reverse),
            AxisState::LEFT,
            AxisState::RIGHT,
        )),
        Tri::Negative if !s.contains(AxisState::RIGHT) => Some(Transition::new(
            FIELD,
            drive(Reverse, Forward),
            AxisState::RIGHT,
            AxisState::LEFT,
        )),
        // A turn is only cleared once straight-line motion has stopped.
        Tri::Neutral if !s.lateral_neutral() && s.longitudinal_neutral() => {
            Some(Transition::new(
                FIELD,
                drive(Off, Off),
                AxisState::empty(),
                AxisState::LATERAL,
            ))
        }
        _ => None,
    }
}

fn pitch(s: AxisState, frame: &CommandFrame) -> Option<Transition> {
    use Direction::*;
    const FIELD: FrameField = FrameField::Pitch;

    match frame.pitch {
        Tri::Positive if !s.contains(AxisState::PITCH_UP) => Some(Transition::new(
            FIELD,
            thrust(Forward, Reverse),
            AxisState::PITCH_UP,
            AxisState::PITCH_DOWN,
        )),
        Tri::Negative if !s.contains(AxisState::PITCH_DOWN) => Some(Transition::new(
            FIELD,
            thrust(Reverse, Forward),
            AxisState::PITCH_DOWN,
            AxisState::PITCH_UP,
        )),
        Tri::Neutral if !s.pitch_neutral() => Some(Transition::new(
            FIELD,
            thrust(Off, Off),
            AxisState::empty(),
            AxisState::PITCH,
        )),
        _ => None,
    }
}

/// Momentary camera flag shared by zoom out / zoom in.
fn zoom(
    s: AxisState,
    field: FrameField,
    requested: bool,
    flag: AxisState,
    action: CameraAction,
    yield_to_sibling: bool,
) -> Option<Transition> {
    if requested {
        if s.intersects(AxisState::ZOOM) || yield_to_sibling {
            return None;
        }
        Some(Transition::new(
            field,
            camera_call(action),
            flag,
            AxisState::empty(),
        ))
    } else if s.contains(flag) {
        Some(Transition::new(field, Calls::new(), AxisState::empty(), flag))
    } else {
        None
    }
}

fn zoom_out(s: AxisState, frame: &CommandFrame) -> Option<Transition> {
    zoom(
        s,
        FrameField::ZoomOut,
        frame.zoom_out,
        AxisState::ZOOM_OUT,
        CameraAction::ZoomOut,
        false,
    )
}

fn zoom_in(s: AxisState, frame: &CommandFrame) -> Option<Transition> {
    zoom(
        s,
        FrameField::ZoomIn,
        frame.zoom_in,
        AxisState::ZOOM_IN,
        CameraAction::ZoomIn,
        frame.zoom_out,
    )
}

/// Vertical thrust shared by descend / ascend.
fn vertical(
    s: AxisState,
    field: FrameField,
    requested: bool,
    flag: AxisState,
    opposite: AxisState,
    direction: Direction,
    yield_to_sibling: bool,
) -> Option<Transition> {
    if requested {
        if s.contains(flag) || s.contains(opposite) || yield_to_sibling {
            return None;
        }
        Some(Transition::new(
            field,
            thrust(direction, direction),
            flag,
            AxisState::empty(),
        ))
    } else if s.contains(flag) && !s.contains(opposite) && s.pitch_neutral() {
        // Vertical thrust is held while pitching.
        Some(Transition::new(
            field,
            thrust(Direction::Off, Direction::Off),
            AxisState::empty(),
            flag,
        ))
    } else {
        None
    }
}

fn descend(s: AxisState, frame: &CommandFrame) -> Option<Transition> {
    vertical(
        s,
        FrameField::Descend,
        frame.descend,
        AxisState::DESCEND,
        AxisState::ASCEND,
        Direction::Reverse,
        false,
    )
}

fn ascend(s: AxisState, frame: &CommandFrame) -> Option<Transition> {
    vertical(
        s,
        FrameField::Ascend,
        frame.ascend,
        AxisState::ASCEND,
        AxisState::DESCEND,
        Direction::Forward,
        frame.descend,
    )
}

fn shutter(s: AxisState, frame: &CommandFrame) -> Option<Transition> {
    const FIELD: FrameField = FrameField::Shutter;

    match (frame.shutter, s.contains(AxisState::SHOOTING)) {
        (true, false) => Some(Transition::new(
            FIELD,
            camera_call(CameraAction::Shutter),
            AxisState::SHOOTING,
            AxisState::empty(),
        )),
        // The shot already happened on the rising edge.
        (false, true) => Some(Transition::new(
            FIELD,
            Calls::new(),
            AxisState::empty(),
            AxisState::SHOOTING,
        )),
        _ => None,
    }
}
