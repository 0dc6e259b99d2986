use crate::addressing_mode;
use std::error;
use std::fmt;

#[derive(Debug)]
pub enum MicrocodeError {
    Resolution(addressing_mode::ResolutionError),
}

pub type Result<T> = std::result::Result<T, MicrocodeError>;

impl fmt::Display for MicrocodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            MicrocodeError::Resolution(e) => {
                write!(f, "resolution error caught in microcode operation: {}", e)
            }
        }
    }
}

impl error::Error for MicrocodeError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        None
    }
}

impl std::convert::From<addressing_mode::ResolutionError> for MicrocodeError {
    fn from(err: addressing_mode::ResolutionError) -> MicrocodeError {
        MicrocodeError::Resolution(err)
    }
}
