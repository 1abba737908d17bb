use crate::{decode_script, Opcode, TxScriptError};

/// One slot of a [`ScriptTemplate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TemplateEntry {
    /// The script opcode at this position must encode to the same bytes.
    Op(Opcode),
    /// Any opcode (or data push) is accepted.
    Any,
}

/// An ordered list of expected opcodes and wildcards.
///
/// Matching is a linear scan: every non-wildcard position must be present in
/// the script and byte-identical to the expected opcode's encoding. Opcodes
/// past the end of the template are not inspected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptTemplate {
    entries: Vec<TemplateEntry>,
}

impl ScriptTemplate {
    pub fn new(entries: Vec<TemplateEntry>) -> Self {
        Self { entries }
    }

    /// Checks parsed opcodes against the template.
    pub fn verify(&self, ops: &[Opcode]) -> Result<(), TxScriptError> {
        for (position, entry) in self.entries.iter().enumerate() {
            let TemplateEntry::Op(expected) = entry else { continue };
            match ops.get(position) {
                None => {
                    return Err(TxScriptError::TemplateMismatch { position, reason: format!("expected {expected}, script ended") })
                }
                Some(actual) if actual.encode() != expected.encode() => {
                    return Err(TxScriptError::TemplateMismatch { position, reason: format!("expected {expected}, found {actual}") })
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Parses a raw script and checks it against the template.
    pub fn verify_script(&self, script: &[u8]) -> Result<Vec<Opcode>, TxScriptError> {
        let ops = decode_script(script)?;
        self.verify(&ops)?;
        Ok(ops)
    }
}
