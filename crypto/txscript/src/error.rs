use thiserror::Error;

#[derive(Error, PartialEq, Eq, Debug, Clone)]
pub enum TxScriptError {
    #[error("invalid opcode length: {0:02x?}")]
    MalformedPushSize(Vec<u8>),

    #[error("opcode requires {0} bytes, but script only has {1} remaining")]
    MalformedPush(usize, usize),

    #[error("script size {0} > max allowed {1}")]
    ScriptSize(usize, usize),

    #[error("element size {0} exceeds max allowed size {1}")]
    ElementTooBig(usize, usize),

    #[error("script does not match template at position {position}: {reason}")]
    TemplateMismatch { position: usize, reason: String },
}
