//! The fixed command vocabulary and its exact wire text.

use std::fmt;
use std::num::ParseIntError;

// ════════════════════════════════════════════════════════════════════════════
// Rgb
// ════════════════════════════════════════════════════════════════════════════

/// An eye LED colour, one byte per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const OFF:   Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Equal level on all three channels.
    pub fn grey(level: u8) -> Self { Rgb(level, level, level) }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.0, self.1, self.2)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Command
// ════════════════════════════════════════════════════════════════════════════

/// One board command. `Display` yields the exact line sent to the board.
///
/// | Variant | Wire text |
/// |---|---|
/// | `Select(2)` | `sel(2)` |
/// | `Servo { pin: 1, angle: 90 }` | `servost(1,90)` |
/// | `Fan(60)` | `fan(60)` |
/// | `Distance` | `distance()` |
/// | `RightEye(Rgb::WHITE)` | `REye(255,255,255)` |
/// | `LeftEye(Rgb::OFF)` | `LEye(0,0,0)` |
/// | `StatusLed { high: 1, low: 0, count: 0 }` | `statled(1,0,0)` |
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Route following commands to the module at this chain address.
    Select(u8),
    /// Move the servo on `pin` of the selected module to `angle` degrees.
    Servo { pin: u8, angle: i32 },
    /// Fan speed in percent; 0 stops it.
    Fan(u8),
    /// Read the distance sensor (centimetres). The only command with a reply.
    Distance,
    RightEye(Rgb),
    LeftEye(Rgb),
    /// On-board status LED: high period, low period, repeat count.
    StatusLed { high: u32, low: u32, count: u32 },
}

impl Command {
    /// Whether the board answers this command with a value.
    pub fn expects_reply(&self) -> bool {
        matches!(self, Command::Distance)
    }

    /// Recognise a typed selection, `sel 3` or `sel(3)`. `None` when the
    /// line is something else; `Some(Err(_))` when the address is not a
    /// valid module number.
    pub fn parse_select(line: &str) -> Option<Result<u8, ParseIntError>> {
        let line = line.trim();
        let addr = line
            .strip_prefix("sel(")
            .and_then(|s| s.strip_suffix(')'))
            .or_else(|| line.strip_prefix("sel "))?;
        Some(addr.trim().parse())
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Select(addr)         => write!(f, "sel({})", addr),
            Command::Servo { pin, angle } => write!(f, "servost({},{})", pin, angle),
            Command::Fan(speed)           => write!(f, "fan({})", speed),
            Command::Distance             => write!(f, "distance()"),
            Command::RightEye(c)          => write!(f, "REye({})", c),
            Command::LeftEye(c)           => write!(f, "LEye({})", c),
            Command::StatusLed { high, low, count } =>
                write!(f, "statled({},{},{})", high, low, count),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_text() {
        assert_eq!(Command::Select(4).to_string(), "sel(4)");
        assert_eq!(Command::Servo { pin: 1, angle: 20 }.to_string(), "servost(1,20)");
        assert_eq!(Command::Fan(60).to_string(), "fan(60)");
        assert_eq!(Command::Distance.to_string(), "distance()");
        assert_eq!(Command::RightEye(Rgb::WHITE).to_string(), "REye(255,255,255)");
        assert_eq!(Command::LeftEye(Rgb::OFF).to_string(), "LEye(0,0,0)");
        assert_eq!(
            Command::StatusLed { high: 0, low: 1, count: 0 }.to_string(),
            "statled(0,1,0)"
        );
    }

    #[test]
    fn only_distance_has_a_reply() {
        assert!(Command::Distance.expects_reply());
        assert!(!Command::Fan(0).expects_reply());
        assert!(!Command::Select(1).expects_reply());
    }

    #[test]
    fn typed_selections() {
        assert_eq!(Command::parse_select("sel 3"), Some(Ok(3)));
        assert_eq!(Command::parse_select("sel(3)"), Some(Ok(3)));
        assert_eq!(Command::parse_select(" sel( 12 ) "), Some(Ok(12)));
        assert!(matches!(Command::parse_select("sel(999)"), Some(Err(_))));
        assert_eq!(Command::parse_select("servost(1,20)"), None);
        assert_eq!(Command::parse_select("select"), None);
    }

    #[test]
    fn grey_levels() {
        assert_eq!(Rgb::grey(255), Rgb::WHITE);
        assert_eq!(Rgb::grey(0), Rgb::OFF);
        assert_eq!(Rgb(10, 20, 30).to_string(), "10,20,30");
    }
}
