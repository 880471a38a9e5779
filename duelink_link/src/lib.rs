//! # duelink_link
//!
//! Text-command link to a chain of DUELink modules.
//!
//! Every module on the chain has an address. A command reaches a module by
//! first selecting it with `sel(n)`, then sending the verb. [`Link`] keeps
//! track of the current selection so repeated commands to one module only
//! select it once.
//!
//! ## Modules used by the Ghizzy demos
//!
//! | Module | Verb | Reply |
//! |---|---|---|
//! | Servo | `servost(1,angle)` | — |
//! | Fan | `fan(speed)` | — |
//! | Distance sensor | `distance()` | integer centimetres |
//! | Ghizzy head | `REye(r,g,b)`, `LEye(r,g,b)`, `statled(h,l,n)` | — |
//!
//! ## Feature flags
//!
//! * (default): **Simulation mode**: [`SimulatedBoard`] records commands and
//!   answers `distance()` from a script.
//! * `serial`: **Hardware mode**: [`serial::SerialTransport`] talks to a
//!   real board over USB serial.
//!
//! ## Quick start
//!
//! ```rust
//! use duelink_link::{Link, SimulatedBoard};
//!
//! let mut link = Link::new(SimulatedBoard::with_readings([42]));
//! link.set_servo(1, 90).unwrap();
//! assert_eq!(link.read_distance(2).unwrap(), 42);
//! ```

pub mod command;
pub mod error;
pub mod link;
pub mod reply;
pub mod transport;

#[cfg(feature = "serial")]
pub mod serial;

pub use command::{Command, Rgb};
pub use error::LinkError;
pub use link::Link;
pub use transport::{SimulatedBoard, Transport};
