//! Held axis state.
//!
//! `AxisState` is the single persistent state vector of the endpoint. It is
//! created all-clear when the accept loop starts, owned by that loop and
//! updated only through the interlock's transitions.

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Axis flags currently held by the rig.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AxisState: u16 {
        /// Motors 0&1 driving forward.
        const FORWARD    = 0x0001;
        /// Motors 0&1 driving backward.
        const BACKWARD   = 0x0002;
        /// Turning left.
        const LEFT       = 0x0004;
        /// Turning right.
        const RIGHT      = 0x0008;
        /// Motors 2&3 ascending.
        const ASCEND     = 0x0010;
        /// Motors 2&3 descending.
        const DESCEND    = 0x0020;
        /// Pitching up.
        const PITCH_UP   = 0x0040;
        /// Pitching down.
        const PITCH_DOWN = 0x0080;
        /// Zoom in held.
        const ZOOM_IN    = 0x0100;
        /// Zoom out held.
        const ZOOM_OUT   = 0x0200;
        /// Shutter held (shot already taken).
        const SHOOTING   = 0x0400;
    }
}

impl AxisState {
    /// Longitudinal flags.
    pub const LONGITUDINAL: Self = Self::FORWARD.union(Self::BACKWARD);
    /// Lateral flags.
    pub const LATERAL: Self = Self::LEFT.union(Self::RIGHT);
    /// Vertical thrust flags.
    pub const VERTICAL: Self = Self::ASCEND.union(Self::DESCEND);
    /// Pitch flags.
    pub const PITCH: Self = Self::PITCH_UP.union(Self::PITCH_DOWN);
    /// Zoom flags.
    pub const ZOOM: Self = Self::ZOOM_IN.union(Self::ZOOM_OUT);

    /// Pairs of which at most one flag may be held.
    pub const EXCLUSIVE_PAIRS: [Self; 5] = [
        Self::LONGITUDINAL,
        Self::LATERAL,
        Self::VERTICAL,
        Self::PITCH,
        Self::ZOOM,
    ];

    /// Neither forward nor backward held.
    #[inline]
    pub const fn longitudinal_neutral(&self) -> bool {
        !self.intersects(Self::LONGITUDINAL)
    }

    /// Neither left nor right held.
    #[inline]
    pub const fn lateral_neutral(&self) -> bool {
        !self.intersects(Self::LATERAL)
    }

    /// Neither ascend nor descend held.
    #[inline]
    pub const fn vertical_neutral(&self) -> bool {
        !self.intersects(Self::VERTICAL)
    }

    /// Neither pitch flag held.
    #[inline]
    pub const fn pitch_neutral(&self) -> bool {
        !self.intersects(Self::PITCH)
    }

    /// True if no exclusive pair has both flags held.
    pub fn is_consistent(&self) -> bool {
        Self::EXCLUSIVE_PAIRS
            .iter()
            .all(|pair| !self.contains(*pair))
    }
}

impl Default for AxisState {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for AxisState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (idx, (name, _)) in self.iter_names().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            f.write_str(&name.to_ascii_lowercase())?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_all_clear() {
        let state = AxisState::default();
        assert!(state.is_empty());
        assert!(state.longitudinal_neutral());
        assert!(state.lateral_neutral());
        assert!(state.vertical_neutral());
        assert!(state.pitch_neutral());
        assert!(state.is_consistent());
    }

    #[test]
    fn test_consistency_detects_conflicting_pair() {
        let state = AxisState::FORWARD | AxisState::LEFT | AxisState::ZOOM_IN;
        assert!(state.is_consistent());

        let state = AxisState::ASCEND | AxisState::DESCEND;
        assert!(!state.is_consistent());
    }

    #[test]
    fn test_display_lists_held_flags() {
        assert_eq!(AxisState::default().to_string(), "{}");
        let state = AxisState::BACKWARD | AxisState::PITCH_UP;
        assert_eq!(state.to_string(), "{backward, pitch_up}");
    }
}
