//! Type-erased errors with a chain of sources.
use crate::SharedString;
use std::{error, fmt, iter};

/// An error type backed by an allocation-optimized string.
#[derive(Debug)]
pub struct Error {
    /// Error message.
    message: SharedString,
    /// Error source.
    source: Option<Box<Error>>,
}

impl Error {
    /// Creates a new instance with the supplied message.
    #[inline]
    pub fn new(message: impl Into<SharedString>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new instance with the supplied message and the error source.
    #[inline]
    pub fn with_source(message: impl Into<SharedString>, source: impl Into<Error>) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source.into())),
        }
    }

    /// Returns a new instance with the supplied message and `self` as the error source.
    #[inline]
    pub fn wrap(self, message: impl Into<SharedString>) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(self)),
        }
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        self.message.as_ref()
    }

    /// Returns the source.
    #[inline]
    pub fn source(&self) -> Option<&Error> {
        self.source.as_deref()
    }

    /// Returns an iterator over `self` followed by its chain of sources.
    #[inline]
    pub fn sources(&self) -> impl Iterator<Item = &Error> {
        iter::successors(Some(self), |err| err.source())
    }

    /// Returns the lowest level error in the chain, which is `self` if there is no source.
    #[inline]
    pub fn root_source(&self) -> Option<&Error> {
        self.sources().last()
    }
}

impl<E: error::Error + 'static> From<E> for Error {
    #[inline]
    /// Keeps the messages of the whole source chain.
    fn from(err: E) -> Self {
        let messages = iter::successors(err.source(), |err| err.source())
            .map(|err| err.to_string())
            .collect::<Vec<_>>();
        let source = messages.into_iter().rev().fold(None, |source, message| {
            Some(Box::new(Self {
                message: message.into(),
                source,
            }))
        });
        Self {
            message: err.to_string().into(),
            source,
        }
    }
}

impl fmt::Display for Error {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = &self.message;
        if let Some(source) = &self.source {
            write!(f, "{message}: {source}")
        } else {
            write!(f, "{message}")
        }
    }
}

/// Returns early with an [`Error`] built from the format arguments.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)+) => {
        return Err($crate::error::Error::new(format!($($arg)+)).into())
    };
}

#[cfg(test)]
mod tests {
    use super::Error;
    use std::{error, fmt};

    fn parse_port(s: &str) -> Result<u16, Error> {
        if s.is_empty() {
            crate::bail!("the port `{s}` is empty");
        }
        let port = s.parse::<u16>()?;
        Ok(port)
    }

    #[test]
    fn it_wraps_sources() {
        let err = Error::new("connection refused")
            .wrap("fail to post the message")
            .wrap("submission failed");
        assert_eq!(err.message(), "submission failed");
        assert_eq!(
            err.to_string(),
            "submission failed: fail to post the message: connection refused"
        );

        let messages = err.sources().map(|e| e.message()).collect::<Vec<_>>();
        assert_eq!(
            messages,
            ["submission failed", "fail to post the message", "connection refused"]
        );
        assert_eq!(
            err.root_source().map(|e| e.message()),
            Some("connection refused")
        );
    }

    #[derive(Debug)]
    struct Layer {
        message: &'static str,
        source: Option<Box<Layer>>,
    }

    impl fmt::Display for Layer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.message)
        }
    }

    impl error::Error for Layer {
        fn source(&self) -> Option<&(dyn error::Error + 'static)> {
            self.source.as_deref().map(|err| err as &(dyn error::Error + 'static))
        }
    }

    #[test]
    fn it_keeps_the_whole_source_chain() {
        let layer = Layer {
            message: "error sending request",
            source: Some(Box::new(Layer {
                message: "client error (Connect)",
                source: Some(Box::new(Layer {
                    message: "invalid URL, scheme is not http",
                    source: None,
                })),
            })),
        };
        let err = Error::from(layer).wrap("Request failed");
        let messages = err.sources().map(|e| e.message()).collect::<Vec<_>>();
        assert_eq!(
            messages,
            [
                "Request failed",
                "error sending request",
                "client error (Connect)",
                "invalid URL, scheme is not http"
            ]
        );
        assert_eq!(
            err.root_source().map(|e| e.message()),
            Some("invalid URL, scheme is not http")
        );
    }

    #[test]
    fn it_converts_std_errors() {
        assert_eq!(parse_port("8080").ok(), Some(8080));
        assert_eq!(
            parse_port("").map_err(|e| e.to_string()),
            Err("the port `` is empty".to_owned())
        );
        assert!(parse_port("http").is_err());
    }
}
