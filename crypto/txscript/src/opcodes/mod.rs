#[macro_use]
mod macros;

use crate::{TxScriptError, MAX_SCRIPT_PUSH};
use std::fmt::{Display, Formatter};

/// First value in the range formed by OpData# opcodes (where opcode == value)
pub const OP_DATA_MIN_VAL: u8 = 0x01;
/// Last value in the range formed by OpData# opcodes (where opcode == value)
pub const OP_DATA_MAX_VAL: u8 = 0x4b;

opcode_list! {
    // Push
    Op0 = 0x00 as "OP_0",
    OpPushData1 = 0x4c as "OP_PUSHDATA1",
    OpPushData2 = 0x4d as "OP_PUSHDATA2",
    OpPushData4 = 0x4e as "OP_PUSHDATA4",
    Op1Negate = 0x4f as "OP_1NEGATE",
    OpReserved = 0x50 as "OP_RESERVED",
    Op1 = 0x51 as "OP_1",
    Op2 = 0x52 as "OP_2",
    Op3 = 0x53 as "OP_3",
    Op4 = 0x54 as "OP_4",
    Op5 = 0x55 as "OP_5",
    Op6 = 0x56 as "OP_6",
    Op7 = 0x57 as "OP_7",
    Op8 = 0x58 as "OP_8",
    Op9 = 0x59 as "OP_9",
    Op10 = 0x5a as "OP_10",
    Op11 = 0x5b as "OP_11",
    Op12 = 0x5c as "OP_12",
    Op13 = 0x5d as "OP_13",
    Op14 = 0x5e as "OP_14",
    Op15 = 0x5f as "OP_15",
    Op16 = 0x60 as "OP_16",

    // Control
    OpNop = 0x61 as "OP_NOP",
    OpIf = 0x63 as "OP_IF",
    OpNotIf = 0x64 as "OP_NOTIF",
    OpElse = 0x67 as "OP_ELSE",
    OpEndIf = 0x68 as "OP_ENDIF",
    OpVerify = 0x69 as "OP_VERIFY",
    OpReturn = 0x6a as "OP_RETURN",

    // Stack
    OpToAltStack = 0x6b as "OP_TOALTSTACK",
    OpFromAltStack = 0x6c as "OP_FROMALTSTACK",
    Op2Drop = 0x6d as "OP_2DROP",
    Op2Dup = 0x6e as "OP_2DUP",
    OpIfDup = 0x73 as "OP_IFDUP",
    OpDepth = 0x74 as "OP_DEPTH",
    OpDrop = 0x75 as "OP_DROP",
    OpDup = 0x76 as "OP_DUP",
    OpNip = 0x77 as "OP_NIP",
    OpOver = 0x78 as "OP_OVER",
    OpSwap = 0x7c as "OP_SWAP",
    OpSize = 0x82 as "OP_SIZE",

    // Bitwise logic
    OpEqual = 0x87 as "OP_EQUAL",
    OpEqualVerify = 0x88 as "OP_EQUALVERIFY",

    // Crypto
    OpRipemd160 = 0xa6 as "OP_RIPEMD160",
    OpSha1 = 0xa7 as "OP_SHA1",
    OpSha256 = 0xa8 as "OP_SHA256",
    OpHash160 = 0xa9 as "OP_HASH160",
    OpHash256 = 0xaa as "OP_HASH256",
    OpCodeSeparator = 0xab as "OP_CODESEPARATOR",
    OpCheckSig = 0xac as "OP_CHECKSIG",
    OpCheckSigVerify = 0xad as "OP_CHECKSIGVERIFY",
    OpCheckMultiSig = 0xae as "OP_CHECKMULTISIG",
    OpCheckMultiSigVerify = 0xaf as "OP_CHECKMULTISIGVERIFY",

    // Locktime
    OpCheckLockTimeVerify = 0xb1 as "OP_CHECKLOCKTIMEVERIFY",
    OpCheckSequenceVerify = 0xb2 as "OP_CHECKSEQUENCEVERIFY",

    // Covenant introspection
    OpType = 0xd0 as "OP_TYPE",

    OpInvalidOpCode = 0xff as "OP_INVALIDOPCODE",
}

use codes::*;

/// A single parsed script element: an opcode byte plus the payload of a data push.
///
/// The push opcode is kept exactly as it appeared in the script, so
/// [`Opcode::encode`] reproduces the original bytes even for non-minimal pushes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Opcode {
    value: u8,
    data: Option<Vec<u8>>,
}

impl Opcode {
    /// A non-push opcode.
    pub const fn from_op(value: u8) -> Self {
        Self { value, data: None }
    }

    /// The opcode pushing a small integer: `OP_0`, `OP_1NEGATE` or `OP_1`..`OP_16`.
    ///
    /// # Panics
    /// Panics if `n` is outside `-1..=16`.
    pub fn from_int(n: i8) -> Self {
        match n {
            0 => Self { value: Op0, data: Some(vec![]) },
            -1 => Self::from_op(Op1Negate),
            1..=16 => Self::from_op(Op1 - 1 + n as u8),
            _ => panic!("{n} is not a small integer"),
        }
    }

    /// A canonical push of `data`.
    pub fn from_push(data: &[u8]) -> Self {
        let value = match data.len() {
            0 => Op0,
            len if len <= OP_DATA_MAX_VAL as usize => len as u8,
            len if len <= u8::MAX as usize => OpPushData1,
            len if len <= u16::MAX as usize => OpPushData2,
            _ => OpPushData4,
        };
        Self { value, data: Some(data.to_vec()) }
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    /// Serialized form of the opcode, including push length prefix and payload.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.write_to(&mut out);
        out
    }

    pub fn encoded_len(&self) -> usize {
        let data_len = self.data.as_ref().map_or(0, |d| d.len());
        1 + data_len
            + match self.value {
                OpPushData1 => 1,
                OpPushData2 => 2,
                OpPushData4 => 4,
                _ => 0,
            }
    }

    pub(crate) fn write_to(&self, out: &mut Vec<u8>) {
        out.push(self.value);
        let Some(data) = &self.data else { return };
        match self.value {
            OpPushData1 => out.push(data.len() as u8),
            OpPushData2 => out.extend((data.len() as u16).to_le_bytes()),
            OpPushData4 => out.extend((data.len() as u32).to_le_bytes()),
            _ => {}
        }
        out.extend_from_slice(data);
    }
}

impl Display for Opcode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (&self.data, symbol(self.value)) {
            (Some(data), _) if !data.is_empty() => write!(f, "{}", hex::encode(data)),
            (_, Some(symbol)) => f.write_str(symbol),
            _ => write!(f, "0x{:02x}", self.value),
        }
    }
}

/// Reads the next opcode from the iterator, returning `None` at the end of the script.
pub(crate) fn deserialize_next_opcode<'i, I: Iterator<Item = &'i u8>>(it: &mut I) -> Option<Result<Opcode, TxScriptError>> {
    let value = *it.next()?;
    let length = match value {
        OP_DATA_MIN_VAL..=OP_DATA_MAX_VAL => Ok(value as usize),
        OpPushData1 => read_length(it, 1),
        OpPushData2 => read_length(it, 2),
        OpPushData4 => read_length(it, 4),
        Op0 => return Some(Ok(Opcode::from_int(0))),
        _ => return Some(Ok(Opcode::from_op(value))),
    };
    Some(length.and_then(|length| {
        if length > MAX_SCRIPT_PUSH {
            return Err(TxScriptError::ElementTooBig(length, MAX_SCRIPT_PUSH));
        }
        let data: Vec<u8> = it.take(length).copied().collect();
        if data.len() != length {
            return Err(TxScriptError::MalformedPush(length, data.len()));
        }
        Ok(Opcode { value, data: Some(data) })
    }))
}

fn read_length<'i, I: Iterator<Item = &'i u8>>(it: &mut I, width: usize) -> Result<usize, TxScriptError> {
    let bytes: Vec<u8> = it.take(width).copied().collect();
    if bytes.len() != width {
        return Err(TxScriptError::MalformedPushSize(bytes));
    }
    Ok(bytes.iter().rev().fold(0usize, |acc, b| (acc << 8) | *b as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_ints() {
        assert_eq!(Opcode::from_int(0).encode(), vec![Op0]);
        assert_eq!(Opcode::from_int(-1).encode(), vec![Op1Negate]);
        assert_eq!(Opcode::from_int(8).encode(), vec![0x58]);
        assert_eq!(Opcode::from_int(9).encode(), vec![0x59]);
        assert_eq!(Opcode::from_int(10).encode(), vec![0x5a]);
        assert_eq!(Opcode::from_int(16).encode(), vec![Op16]);
    }

    #[test]
    fn test_push_encoding() {
        assert_eq!(Opcode::from_push(&[0xaa; 33]).encode()[0], 33);
        assert_eq!(Opcode::from_push(&[0xaa; 33]).encoded_len(), 34);
        let push = Opcode::from_push(&[0xbb; 76]);
        assert_eq!(&push.encode()[..2], &[OpPushData1, 76]);
        let push = Opcode::from_push(&[0xcc; 300]);
        assert_eq!(&push.encode()[..3], &[OpPushData2, 0x2c, 0x01]);
        assert_eq!(push.encoded_len(), 303);
    }

    #[test]
    fn test_display() {
        assert_eq!(Opcode::from_op(OpType).to_string(), "OP_TYPE");
        assert_eq!(Opcode::from_push(&[0x01, 0x02]).to_string(), "0102");
        assert_eq!(Opcode::from_op(0xfe).to_string(), "0xfe");
    }
}
