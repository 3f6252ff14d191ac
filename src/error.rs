use thiserror::Error;

/// Failure taxonomy for the comparison core.
///
/// Rollup-code and panel lookup misses are not represented here: both are
/// recovered in place with a fallback value and a warn log.
#[derive(Error, Debug)]
pub enum CompareError {
    #[error("{path}: {message}")]
    Parse { path: String, message: String },

    #[error("zero eligible samples: {what}")]
    DivisionUndefined { what: String },

    #[error("reference fetch failed for '{code}': {message}")]
    RemoteFetch { code: String, message: String },
}

impl CompareError {
    pub fn parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn division_undefined(what: impl Into<String>) -> Self {
        Self::DivisionUndefined { what: what.into() }
    }

    pub fn remote_fetch(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RemoteFetch {
            code: code.into(),
            message: message.into(),
        }
    }
}
