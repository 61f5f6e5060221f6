//! Invocation requests and responses exchanged with the hosting runtime.

use bytes::Bytes;

/// A single request: a function name plus ordered string arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    function: String,
    args: Vec<String>,
}

impl Invocation {
    /// Creates an invocation of `function` with `args`.
    pub fn new(
        function: impl Into<String>,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self { function: function.into(), args: args.into_iter().map(Into::into).collect() }
    }

    /// Creates an invocation from a flat parameter list whose first element
    /// is the function name. An empty list yields an empty function name,
    /// which dispatch rejects as unknown.
    pub fn from_parameters(params: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut params = params.into_iter().map(Into::into);
        let function = params.next().unwrap_or_default();
        Self { function, args: params.collect() }
    }

    /// The function name.
    #[must_use]
    pub fn function(&self) -> &str {
        &self.function
    }

    /// The ordered arguments.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

/// Response status codes, matching the hosting platform's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Status {
    /// The invocation succeeded.
    Ok = 200,
    /// The invocation failed; see the message.
    Error = 500,
}

impl Status {
    /// The numeric status code.
    #[must_use]
    pub const fn code(self) -> u16 {
        self as u16
    }
}

/// Outcome of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: Status,
    message: String,
    payload: Bytes,
}

impl Response {
    /// A success response carrying `payload`.
    #[must_use]
    pub fn success(payload: impl Into<Bytes>) -> Self {
        Self { status: Status::Ok, message: String::new(), payload: payload.into() }
    }

    /// An error response carrying `message` and no payload.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self { status: Status::Error, message: message.into(), payload: Bytes::new() }
    }

    /// Returns `true` for a success response.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == Status::Ok
    }

    /// The response status.
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// The error message. Empty on success.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The success payload. Empty on error.
    #[must_use]
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Consumes the response, returning the payload on success and the
    /// message on error.
    pub fn into_result(self) -> Result<Bytes, String> {
        match self.status {
            Status::Ok => Ok(self.payload),
            Status::Error => Err(self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parameters_splits_function() {
        let invocation = Invocation::from_parameters(["queryPoints", "3"]);
        assert_eq!(invocation.function(), "queryPoints");
        assert_eq!(invocation.args(), ["3"]);
    }

    #[test]
    fn test_from_empty_parameters() {
        let invocation = Invocation::from_parameters(Vec::<String>::new());
        assert_eq!(invocation.function(), "");
        assert!(invocation.args().is_empty());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(Status::Ok.code(), 200);
        assert_eq!(Status::Error.code(), 500);
    }

    #[test]
    fn test_response_shapes() {
        let ok = Response::success(&b"payload"[..]);
        assert!(ok.is_success());
        assert_eq!(ok.message(), "");
        assert_eq!(ok.into_result(), Ok(Bytes::from_static(b"payload")));

        let err = Response::error("boom");
        assert!(!err.is_success());
        assert_eq!(err.status(), Status::Error);
        assert!(err.payload().is_empty());
        assert_eq!(err.into_result(), Err("boom".to_owned()));
    }
}
