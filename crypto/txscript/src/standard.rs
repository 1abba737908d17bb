//! Standard witness scripts for name coins.

use crate::{
    opcodes::{codes::*, Opcode},
    template::{ScriptTemplate, TemplateEntry},
};
use hns_addresses::{Address, Prefix};
use hns_consensus_core::covenant::CovenantType;
use hns_hashes::Hash;

/// `OP_TYPE OP_8 OP_EQUAL`: spendable by anyone, but only into a RENEW covenant.
pub const ANYONE_CAN_RENEW_SCRIPT: [u8; 3] = [OpType, Op8, OpEqual];

/// SHA3-256 of [`ANYONE_CAN_RENEW_SCRIPT`].
pub const ANYONE_CAN_RENEW_HASH: Hash = Hash::from_bytes([
    0xe4, 0x66, 0x31, 0x0e, 0x56, 0x6f, 0x8f, 0x14, 0xac, 0x36, 0xf7, 0xeb, 0x76, 0x07, 0xa5, 0xd7, 0x7a, 0x23, 0x51, 0xad, 0x6b,
    0xb5, 0xab, 0xa2, 0x0a, 0x17, 0x39, 0x6c, 0x5b, 0x18, 0xb8, 0xc1,
]);

/// Index of the owner pubkey push inside the HIP-1 script.
pub const HIP1_PUBKEY_POSITION: usize = 4;

pub fn anyone_can_renew_address(prefix: Prefix) -> Address {
    Address::from_script_hash(prefix, &ANYONE_CAN_RENEW_HASH.as_bytes())
}

pub fn is_anyone_can_renew_address(address: &Address) -> bool {
    address.version == 0 && address.hash.as_slice() == ANYONE_CAN_RENEW_HASH.as_ref()
}

/// The HIP-1 transfer script:
///
/// ```text
/// OP_TYPE OP_9 OP_EQUAL
/// OP_IF
///     <pubkey> OP_CHECKSIG
/// OP_ELSE
///     OP_TYPE OP_10 OP_EQUAL
/// OP_ENDIF
/// ```
///
/// It lets the owner key spend the coin freely, while anyone may spend it
/// into a FINALIZE covenant once the TRANSFER has matured.
pub fn hip1_template() -> ScriptTemplate {
    let op = |code: u8| TemplateEntry::Op(Opcode::from_op(code));
    let int = |n: CovenantType| TemplateEntry::Op(Opcode::from_int(n as i8));
    ScriptTemplate::new(vec![
        op(OpType),
        int(CovenantType::Transfer),
        op(OpEqual),
        op(OpIf),
        TemplateEntry::Any,
        op(OpCheckSig),
        op(OpElse),
        op(OpType),
        int(CovenantType::Finalize),
        op(OpEqual),
        op(OpEndIf),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decode_script, encode_script, TxScriptError};
    use hns_hashes::sha3_256;

    fn hip1_script(pubkey: &[u8]) -> Vec<u8> {
        let mut ops = vec![Opcode::from_op(OpType), Opcode::from_int(9), Opcode::from_op(OpEqual), Opcode::from_op(OpIf)];
        ops.push(Opcode::from_push(pubkey));
        ops.extend([OpCheckSig, OpElse, OpType].map(Opcode::from_op));
        ops.extend([Opcode::from_int(10), Opcode::from_op(OpEqual), Opcode::from_op(OpEndIf)]);
        encode_script(&ops)
    }

    #[test]
    fn test_anyone_can_renew() {
        assert_eq!(hex::encode(ANYONE_CAN_RENEW_SCRIPT), "d05887");
        assert_eq!(ANYONE_CAN_RENEW_SCRIPT[1], Opcode::from_int(CovenantType::Renew as i8).value());
        assert_eq!(sha3_256(&ANYONE_CAN_RENEW_SCRIPT), ANYONE_CAN_RENEW_HASH);
        assert_eq!(
            anyone_can_renew_address(Prefix::Mainnet).to_string(),
            "hs1qu3nrzrjkd783ftpk7l4hvpa96aazx5dddw66hgs2zuukckcchrqsw3f8kc"
        );
        assert!(is_anyone_can_renew_address(&anyone_can_renew_address(Prefix::Simnet)));
        assert!(!is_anyone_can_renew_address(&Address::from_pubkey_hash(Prefix::Simnet, &[0; 20])));
    }

    #[test]
    fn test_hip1_script_matches_template() {
        let script = hip1_script(&[0x03; 33]);
        assert_eq!(script.len(), 44);
        assert_eq!(&script[..4], &[0xd0, 0x59, 0x87, 0x63]);
        assert_eq!(&script[38..], &[0xac, 0x67, 0xd0, 0x5a, 0x87, 0x68]);
        let ops = hip1_template().verify_script(&script).unwrap();
        assert_eq!(ops[HIP1_PUBKEY_POSITION].data(), Some(&[0x03; 33][..]));
    }

    #[test]
    fn test_hip1_wildcard_is_only_the_pubkey() {
        let template = hip1_template();
        // any pubkey push, even a non-standard one, fills the wildcard
        assert!(template.verify_script(&hip1_script(&[0xff; 65])).is_ok());

        // flipping any other position is rejected
        let ops = decode_script(&hip1_script(&[0x02; 33])).unwrap();
        for position in (0..ops.len()).filter(|p| *p != HIP1_PUBKEY_POSITION) {
            let mut tampered = ops.clone();
            tampered[position] = Opcode::from_op(OpNop);
            let err = template.verify(&tampered).unwrap_err();
            assert!(matches!(err, TxScriptError::TemplateMismatch { position: p, .. } if p == position));
        }

        // the renewal script is not HIP-1
        assert!(template.verify_script(&ANYONE_CAN_RENEW_SCRIPT).is_err());
    }
}
