use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("component ID must not be zero")]
    ErrInvalidComponentId,
    #[error("port must be set for non-host candidates")]
    ErrPortEmpty,
    #[error("base address must be set for non-host candidates")]
    ErrBaseAddrEmpty,
    #[error("address family of candidate and base address differ")]
    ErrAddressFamilyMismatch,
    #[error("unsupported TCP candidate type")]
    ErrTcpTypeUnsupported,
    #[error("local ufrag is too short")]
    ErrLocalUfragInsufficientBits,
    #[error("local pwd is too short")]
    ErrLocalPwdInsufficientBits,
    #[error("remote ufrag is empty")]
    ErrRemoteUfragEmpty,
    #[error("remote pwd is empty")]
    ErrRemotePwdEmpty,
    #[error("no active checklist")]
    ErrNoChecklist,
    #[error("username mismatch")]
    ErrMismatchUsername,
    #[error("stun message is not handled")]
    ErrUnhandledStunpacket,
    #[error("non-stun message")]
    ErrNonStunmessage,
    #[error("binding request timed out")]
    ErrBindingRequestTimeout,
    #[error("binding error response")]
    ErrBindingErrorResponse,
    #[error("{0}")]
    Other(String),
}

impl From<shared::error::Error> for Error {
    fn from(e: shared::error::Error) -> Self {
        Error::Other(e.to_string())
    }
}
