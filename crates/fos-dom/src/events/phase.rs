//! Event phases

use std::fmt;

/// Phase of an event's dispatch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum EventPhase {
    #[default]
    None = 0,
    Capturing = 1,
    AtTarget = 2,
    Bubbling = 3,
}

impl EventPhase {
    /// Script-visible `eventPhase` value
    pub const fn value(self) -> u16 {
        self as u16
    }
}

impl TryFrom<u16> for EventPhase {
    type Error = u16;

    fn try_from(value: u16) -> Result<Self, u16> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Capturing),
            2 => Ok(Self::AtTarget),
            3 => Ok(Self::Bubbling),
            other => Err(other),
        }
    }
}

impl fmt::Display for EventPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "NONE",
            Self::Capturing => "CAPTURING_PHASE",
            Self::AtTarget => "AT_TARGET",
            Self::Bubbling => "BUBBLING_PHASE",
        };
        f.write_str(name)
    }
}
