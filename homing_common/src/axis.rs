//! Axis enumeration and axis selection sets.
//!
//! `AxisSet` replaces raw per-axis booleans and magic bit positions: every
//! operation that selects axes (homing phases, position zeroing) takes a set.

use crate::consts::N_AXES;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Machine axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Axis {
    /// First linear axis (reference axis for rate conversion).
    X = 0,
    /// Second linear axis.
    Y = 1,
    /// Vertical axis, homed before all others.
    Z = 2,
    /// Rotary axis.
    C = 3,
}

impl Axis {
    /// All axes in index order.
    pub const ALL: [Axis; N_AXES] = [Axis::X, Axis::Y, Axis::Z, Axis::C];

    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::X),
            1 => Some(Self::Y),
            2 => Some(Self::Z),
            3 => Some(Self::C),
            _ => None,
        }
    }

    /// Array index of this axis.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Single-member set for this axis.
    #[inline]
    pub const fn as_set(self) -> AxisSet {
        match self {
            Self::X => AxisSet::X,
            Self::Y => AxisSet::Y,
            Self::Z => AxisSet::Z,
            Self::C => AxisSet::C,
        }
    }

    /// Axis letter.
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            Self::X => 'X',
            Self::Y => 'Y',
            Self::Z => 'Z',
            Self::C => 'C',
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

bitflags! {
    /// Set of axes.
    ///
    /// Flag values are set membership only; they carry no meaning as
    /// hardware bit positions (see `PinMap` for those).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AxisSet: u8 {
        const X = 0x01;
        const Y = 0x02;
        const Z = 0x04;
        const C = 0x08;
    }
}

impl AxisSet {
    /// Build a set from per-axis flags in X, Y, Z, C order.
    pub fn from_flags(x: bool, y: bool, z: bool, c: bool) -> Self {
        let mut set = Self::empty();
        set.set(Self::X, x);
        set.set(Self::Y, y);
        set.set(Self::Z, z);
        set.set(Self::C, c);
        set
    }

    /// Whether `axis` is a member.
    #[inline]
    pub const fn contains_axis(&self, axis: Axis) -> bool {
        self.contains(axis.as_set())
    }

    /// Members in index order.
    pub fn axes(self) -> impl Iterator<Item = Axis> {
        Axis::ALL.into_iter().filter(move |a| self.contains_axis(*a))
    }

    /// Number of members.
    #[inline]
    pub const fn len(&self) -> usize {
        self.bits().count_ones() as usize
    }
}

impl FromIterator<Axis> for AxisSet {
    fn from_iter<I: IntoIterator<Item = Axis>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, axis| set | axis.as_set())
    }
}

impl fmt::Display for AxisSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        for axis in self.axes() {
            write!(f, "{axis}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_roundtrip() {
        for v in 0..N_AXES as u8 {
            let axis = Axis::from_u8(v).unwrap();
            assert_eq!(axis as u8, v);
            assert_eq!(axis.index(), v as usize);
        }
        assert!(Axis::from_u8(4).is_none());
    }

    #[test]
    fn from_flags_selects_members() {
        let set = AxisSet::from_flags(true, false, true, false);
        assert!(set.contains_axis(Axis::X));
        assert!(!set.contains_axis(Axis::Y));
        assert!(set.contains_axis(Axis::Z));
        assert!(!set.contains_axis(Axis::C));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn axes_iterates_in_index_order() {
        let set = AxisSet::C | AxisSet::X | AxisSet::Z;
        let axes: Vec<Axis> = set.axes().collect();
        assert_eq!(axes, vec![Axis::X, Axis::Z, Axis::C]);
    }

    #[test]
    fn collect_from_axes() {
        let set: AxisSet = [Axis::Y, Axis::C].into_iter().collect();
        assert_eq!(set, AxisSet::Y | AxisSet::C);
    }

    #[test]
    fn display_letters() {
        assert_eq!((AxisSet::X | AxisSet::Y).to_string(), "XY");
        assert_eq!(AxisSet::empty().to_string(), "-");
        assert_eq!(Axis::C.to_string(), "C");
    }
}
