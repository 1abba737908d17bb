//!
//! Handshake script support for the witness scripts this workspace spends:
//! parsing raw scripts into opcodes, matching parsed scripts against
//! templates, and the standard scripts themselves.
//!

pub mod error;
pub mod opcodes;
pub mod standard;
pub mod template;

pub use error::TxScriptError;
pub use opcodes::Opcode;
pub use template::ScriptTemplate;

use itertools::Itertools;
use opcodes::deserialize_next_opcode;

/// Maximum size of a script in bytes.
pub const MAX_SCRIPT_SIZE: usize = 10_000;
/// Maximum size of a single pushed element.
pub const MAX_SCRIPT_PUSH: usize = 520;

/// Lazily parses a raw script into opcodes.
pub fn parse_script(script: &[u8]) -> impl Iterator<Item = Result<Opcode, TxScriptError>> + '_ {
    script.iter().batching(|it| deserialize_next_opcode(it))
}

/// Parses a complete raw script, failing on the first malformed push.
pub fn decode_script(script: &[u8]) -> Result<Vec<Opcode>, TxScriptError> {
    if script.len() > MAX_SCRIPT_SIZE {
        return Err(TxScriptError::ScriptSize(script.len(), MAX_SCRIPT_SIZE));
    }
    parse_script(script).collect()
}

/// Serializes opcodes back into a raw script.
pub fn encode_script(ops: &[Opcode]) -> Vec<u8> {
    let mut out = Vec::with_capacity(ops.iter().map(Opcode::encoded_len).sum());
    ops.iter().for_each(|op| op.write_to(&mut out));
    out
}

/// Human readable form of a script, as used in log lines.
pub fn disassemble(script: &[u8]) -> String {
    parse_script(script)
        .map(|op| match op {
            Ok(op) => op.to_string(),
            Err(err) => format!("[error: {err}]"),
        })
        .join(" ")
}
