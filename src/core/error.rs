use thiserror::Error;

/// Failures at the remote API boundary: building the client, moving bytes,
/// or decoding what came back.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    /// The request never completed (DNS, TLS, connect, timeout).
    #[error("{message}")]
    Network {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The API answered with a non-success status. `message` carries the
    /// response body verbatim.
    #[error("{message}")]
    Api {
        message: String,
        status_code: Option<u16>,
    },

    /// The response body was not the expected JSON shape.
    #[error("{message}")]
    Parse {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The event stream produced an undecodable event.
    #[error("{message}")]
    Stream { message: String },
}

/// Everything a probe can fail with. Probes catch every variant at their own
/// boundary and render it into a [`ProbeReport`](crate::probes::ProbeReport);
/// no variant ever crosses a public probe function.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// No credential was configured.
    #[error("API key not found")]
    Configuration,

    /// The underlying call failed; the collaborator's message is passed
    /// through unchanged.
    #[error(transparent)]
    Transport(#[from] ApiError),

    /// The call succeeded but produced no usable text.
    #[error("model returned an empty reply")]
    EmptyResponse,

    /// The call succeeded but the output lacked the mandated keyword.
    #[error("instruction not followed strictly")]
    InstructionIgnored,

    /// The call succeeded but the response lacked an expected field.
    #[error("response is missing `{field}`")]
    MalformedResponse { field: &'static str },
}
