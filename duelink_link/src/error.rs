use thiserror::Error;

/// Failures talking to the board. None of them are retried.
#[derive(Error, Debug)]
pub enum LinkError {
    #[error("serial I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serial")]
    #[error("serial port error: {0}")]
    Port(#[from] serialport::Error),

    #[error("no DUELink board found on any USB serial port")]
    PortNotFound,

    #[error("timed out waiting for the reply to `{command}`")]
    Timeout { command: String },

    #[error("board disconnected")]
    Disconnected,

    #[error("malformed reply to `{command}`: {reply:?}")]
    MalformedReply { command: String, reply: String },
}
