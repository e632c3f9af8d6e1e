//! cumulants::stage — typed stage slots and precursor checks.
//!
//! Purpose
//! -------
//! Every intermediate array held by the assembler lives in a [`Stage`] slot
//! that records the window it was computed with. Readers go through
//! [`Stage::require`], which turns "never computed" and "computed for another
//! window" into `PrecursorMissing` / `StalePrecursor` errors instead of
//! silently reading stale data.
//!
//! Conventions
//! -----------
//! - Slots are written only after the whole gather of a stage succeeds; a
//!   failed stage leaves its slot untouched.
//! - Window-independent slots (rates, theoretical counterparts) are tagged with
//!   `None`.
use crate::cumulants::{
    errors::{CumulantError, CumulantResult},
    window::WindowParameter,
};

/// Names of the assembler stages, used in errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageName {
    Rates,
    B,
    C,
    E,
    Ec,
    J,
    K,
    KPart,
    Reference,
    CTheory,
    KTheory,
    KPartTheory,
}

impl std::fmt::Display for StageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StageName::Rates => "L",
            StageName::B => "B",
            StageName::C => "C",
            StageName::E => "E",
            StageName::Ec => "E_c",
            StageName::J => "J",
            StageName::K => "K",
            StageName::KPart => "K_part",
            StageName::Reference => "R_true",
            StageName::CTheory => "C_th",
            StageName::KTheory => "K_th",
            StageName::KPartTheory => "K_part_th",
        };
        f.write_str(name)
    }
}

/// A stage slot: either empty or holding a value computed for a window.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Stage<T> {
    #[default]
    NotComputed,
    Computed { window: Option<WindowParameter>, value: T },
}

impl<T> Stage<T> {
    pub fn computed(window: Option<WindowParameter>, value: T) -> Self {
        Stage::Computed { window, value }
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, Stage::Computed { .. })
    }

    /// Value regardless of the window it was computed with.
    pub fn value(&self) -> Option<&T> {
        match self {
            Stage::NotComputed => None,
            Stage::Computed { value, .. } => Some(value),
        }
    }

    /// Window the value was computed with (`None` for window-free stages or
    /// empty slots).
    pub fn window(&self) -> Option<&WindowParameter> {
        match self {
            Stage::NotComputed => None,
            Stage::Computed { window, .. } => window.as_ref(),
        }
    }

    /// Read the slot as a precursor of `stage`.
    ///
    /// Parameters
    /// ----------
    /// - `name`: the stage this slot holds.
    /// - `stage`: the stage being computed (for the error message).
    /// - `window`: the window the caller is computing with, or `None` when
    ///   the precursor is window-independent.
    ///
    /// Errors
    /// ------
    /// - `PrecursorMissing` if the slot is empty.
    /// - `StalePrecursor` if the slot was computed with another window.
    pub fn require(
        &self, name: StageName, stage: StageName, window: Option<&WindowParameter>,
    ) -> CumulantResult<&T> {
        match self {
            Stage::NotComputed => Err(CumulantError::PrecursorMissing { stage, missing: name }),
            Stage::Computed { window: held, value } => match window {
                Some(w) if held.as_ref() != Some(w) => {
                    Err(CumulantError::StalePrecursor { stage, stale: name })
                }
                _ => Ok(value),
            },
        }
    }

    /// Read the slot for an accessor.
    pub fn get(&self, name: StageName) -> CumulantResult<&T> {
        self.value().ok_or(CumulantError::NotComputed { stage: name })
    }

    pub fn clear(&mut self) {
        *self = Stage::NotComputed;
    }
}
