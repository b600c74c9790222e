/// Classification of a failed request.
///
/// Used to word failure messages and pick log levels. The client never
/// retries on its own, whatever the class.
///
/// | Class | Typical cause |
/// |-------|---------------|
/// | `Server` | Non-2xx status from the API |
/// | `Connectivity` | Timeout, refused connection, DNS |
/// | `Payload` | Body does not match the expected JSON shape |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FailureClass {
    /// The server answered but refused or failed the request.
    Server,

    /// No usable answer arrived.
    Connectivity,

    /// An answer arrived but could not be understood.
    Payload,
}

impl FailureClass {
    /// Short hint shown next to the failure message.
    pub fn hint(&self) -> &'static str {
        match self {
            Self::Server => "the API rejected the request",
            Self::Connectivity => "check that the API server is reachable",
            Self::Payload => "the API returned an unexpected payload",
        }
    }
}
