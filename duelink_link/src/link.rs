//! `Link`: addressed command sending with memoised device selection.

use crate::command::Command;
use crate::error::LinkError;
use crate::reply::parse_int;
use crate::transport::Transport;

/// Servo output pin used on servo modules.
pub const SERVO_PIN: u8 = 1;

/// Sends commands to addressed modules on a daisy chain.
///
/// A `sel(n)` line is only written when the target address differs from the
/// one selected last, so a burst of commands to the same module costs one
/// selection. Address `0` is the power-on state: nothing has been selected
/// yet, and the first select of any non-zero module always goes out.
pub struct Link<T> {
    transport:       T,
    current_address: u8,
}

impl<T: Transport> Link<T> {
    pub fn new(transport: T) -> Self {
        Link { transport, current_address: 0 }
    }

    /// Send one command to whichever module is currently selected.
    pub fn send(&mut self, command: Command) -> Result<String, LinkError> {
        let line = command.to_string();
        tracing::debug!(target: "duelink", "→ {}", line);
        let reply = self.transport.execute(&line)?;
        if command.expects_reply() {
            tracing::debug!(target: "duelink", "← {}", reply);
        } else if !reply.is_empty() {
            tracing::warn!(target: "duelink", "discarding output after `{}`: {}", line, reply);
        }
        Ok(reply)
    }

    /// Send a raw line, bypassing the command vocabulary.
    pub fn send_raw(&mut self, line: &str) -> Result<String, LinkError> {
        tracing::debug!(target: "duelink", "→ {}", line);
        self.transport.execute(line)
    }

    /// Select `address` unless it is already selected.
    pub fn select(&mut self, address: u8) -> Result<(), LinkError> {
        if self.current_address != address {
            self.send(Command::Select(address))?;
            self.current_address = address;
        }
        Ok(())
    }

    /// Select `address`, then send `command` to it.
    pub fn send_to(&mut self, address: u8, command: Command) -> Result<String, LinkError> {
        self.select(address)?;
        self.send(command)
    }

    /// Move the servo module at `address` to `angle` degrees.
    pub fn set_servo(&mut self, address: u8, angle: i32) -> Result<(), LinkError> {
        self.send_to(address, Command::Servo { pin: SERVO_PIN, angle }).map(drop)
    }

    /// Set the fan module at `address` to `speed` percent.
    pub fn set_fan(&mut self, address: u8, speed: u8) -> Result<(), LinkError> {
        self.send_to(address, Command::Fan(speed)).map(drop)
    }

    /// Read the distance module at `address`, in centimetres.
    pub fn read_distance(&mut self, address: u8) -> Result<i32, LinkError> {
        let reply = self.send_to(address, Command::Distance)?;
        parse_int(&Command::Distance.to_string(), &reply)
    }

    pub fn current_address(&self) -> u8 { self.current_address }
    pub fn transport(&self) -> &T { &self.transport }
    pub fn transport_mut(&mut self) -> &mut T { &mut self.transport }
    pub fn into_transport(self) -> T { self.transport }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
