use std::io;

use duelink_link::LinkError;
use landmark_signal::SignalError;
use thiserror::Error;

use crate::perception::PerceptionError;

/// Anything that ends a session early.
#[derive(Error, Debug)]
pub enum GhizzyError {
    #[error(transparent)]
    Link(#[from] LinkError),

    #[error(transparent)]
    Perception(#[from] PerceptionError),

    #[error(transparent)]
    Signal(#[from] SignalError),

    #[error("cannot open observation stream '{path}': {source}")]
    OpenStream {
        path:   String,
        #[source]
        source: io::Error,
    },

    #[error("cannot write transition log: {0}")]
    Output(#[from] io::Error),
}
