use access_transformer::at;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Ways a run can go wrong
pub enum CliError {
    Io(io::Error),
    Walk(walkdir::Error),

    /// Rule files could not be loaded
    Rules(at::Error),

    /// One of the classes could not be transformed
    Class { path: PathBuf, error: at::Error },
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> CliError {
        CliError::Io(err)
    }
}

impl From<walkdir::Error> for CliError {
    fn from(err: walkdir::Error) -> CliError {
        CliError::Walk(err)
    }
}

impl From<at::Error> for CliError {
    fn from(err: at::Error) -> CliError {
        CliError::Rules(err)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(err) => write!(f, "IO - {}", err),
            CliError::Walk(err) => write!(f, "Walking input - {}", err),
            CliError::Rules(err) => write!(f, "Rules - {}", err),
            CliError::Class { path, error } => write!(f, "{} - {}", path.display(), error),
        }
    }
}

/// `main` reports errors with `Debug`, so make that the readable message
impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
