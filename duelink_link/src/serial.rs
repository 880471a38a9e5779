//! USB serial backend, only compiled with the `serial` feature.
//!
//! The board enumerates as a USB CDC device. On open we send ESC to stop
//! any script the board may be running and wait for its prompt; afterwards
//! every command is a `line\n` write followed by a read up to the next
//! prompt.

use std::io::{ErrorKind, Read, Write};
use std::time::Duration;

use serialport::{ClearBuffer, SerialPort, SerialPortType};

use crate::error::LinkError;
use crate::reply::{clean_reply, ends_with_prompt};
use crate::transport::Transport;

/// GHI Electronics USB vendor id.
pub const USB_VID: u16 = 0x1B9F;
/// DUELink product id.
pub const USB_PID: u16 = 0xF300;

pub const BAUD_RATE:    u32      = 115_200;
pub const READ_TIMEOUT: Duration = Duration::from_millis(1000);

const ESCAPE: u8 = 0x1B;

// ════════════════════════════════════════════════════════════════════════════
// Port discovery
// ════════════════════════════════════════════════════════════════════════════

/// Name of the first USB serial port that looks like a DUELink board.
pub fn find_port() -> Result<String, LinkError> {
    let ports = serialport::available_ports()?;
    ports.into_iter()
        .find(|p| matches!(
            &p.port_type,
            SerialPortType::UsbPort(info) if info.vid == USB_VID && info.pid == USB_PID
        ))
        .map(|p| p.port_name)
        .ok_or(LinkError::PortNotFound)
}

// ════════════════════════════════════════════════════════════════════════════
// SerialTransport
// ════════════════════════════════════════════════════════════════════════════

pub struct SerialTransport {
    port: Box<dyn SerialPort>,
}

impl SerialTransport {
    /// Open `path` and synchronise with the board's prompt.
    pub fn open(path: &str) -> Result<Self, LinkError> {
        let port = serialport::new(path, BAUD_RATE)
            .timeout(READ_TIMEOUT)
            .open()?;
        tracing::info!("opened DUELink board on {}", path);

        let mut t = SerialTransport { port };
        t.synchronize()?;
        Ok(t)
    }

    /// Open the first discovered board.
    pub fn discover() -> Result<Self, LinkError> {
        let path = find_port()?;
        Self::open(&path)
    }

    fn synchronize(&mut self) -> Result<(), LinkError> {
        self.port.write_all(&[ESCAPE])?;
        self.port.flush()?;
        self.read_until_prompt("<escape>")?;
        self.port.clear(ClearBuffer::Input)?;
        Ok(())
    }

    fn read_until_prompt(&mut self, command: &str) -> Result<String, LinkError> {
        let mut buf = Vec::with_capacity(64);
        let mut byte = [0u8; 1];
        loop {
            match self.port.read(&mut byte) {
                Ok(0) => return Err(LinkError::Disconnected),
                Ok(_) => {
                    buf.push(byte[0]);
                    if ends_with_prompt(&buf) { break; }
                }
                Err(e) if e.kind() == ErrorKind::TimedOut => {
                    return Err(LinkError::Timeout { command: command.to_string() });
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

impl Transport for SerialTransport {
    fn execute(&mut self, line: &str) -> Result<String, LinkError> {
        self.port.write_all(line.as_bytes())?;
        self.port.write_all(b"\n")?;
        self.port.flush()?;
        let raw = self.read_until_prompt(line)?;
        Ok(clean_reply(line, &raw))
    }
}
