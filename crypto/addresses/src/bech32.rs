use crate::{AddressError, PayloadVec};

const CHARSET: &[u8] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";
const REV_CHARSET: [u8; 123] = [
    100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100,
    100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100,
    100, 100, 15, 100, 10, 17, 21, 20, 26, 30, 7, 5, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100,
    100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100,
    100, 100, 100, 29, 100, 24, 13, 25, 9, 8, 23, 100, 18, 22, 31, 27, 19, 100, 1, 0, 3, 16, 11, 28, 12, 14, 6, 4, 2,
];

const SEPARATOR: char = '1';
const CHECKSUM_LENGTH: usize = 6;
const MAX_LENGTH: usize = 90;
const GENERATOR: [u32; 5] = [0x3b6a57b2, 0x26508e6d, 0x1ea119fa, 0x3d4233dd, 0x2a1462b3];

// BIP173 checksum
fn polymod<I>(values: I) -> u32
where
    I: IntoIterator<Item = u8>,
{
    let mut c = 1u32;
    for d in values {
        let c0 = c >> 25;
        c = ((c & 0x01ffffff) << 5) ^ (d as u32);
        for (i, g) in GENERATOR.iter().enumerate() {
            if (c0 >> i) & 1 != 0 {
                c ^= g;
            }
        }
    }
    c
}

fn expand_hrp(hrp: &str) -> impl Iterator<Item = u8> + '_ {
    hrp.bytes().map(|c| c >> 5).chain(std::iter::once(0)).chain(hrp.bytes().map(|c| c & 0x1f))
}

fn checksum(hrp: &str, data: &[u8]) -> [u8; CHECKSUM_LENGTH] {
    let modulus = polymod(expand_hrp(hrp).chain(data.iter().copied()).chain([0u8; CHECKSUM_LENGTH])) ^ 1;
    let mut out = [0u8; CHECKSUM_LENGTH];
    for (i, x) in out.iter_mut().enumerate() {
        *x = ((modulus >> (5 * (5 - i))) & 0x1f) as u8;
    }
    out
}

/// Regroups a bit stream from `from`-bit to `to`-bit words. Without padding a
/// trailing group must be shorter than `from` bits and all zero.
fn convert_bits(data: &[u8], from: u32, to: u32, pad: bool) -> Result<Vec<u8>, AddressError> {
    let mut acc = 0u32;
    let mut bits = 0u32;
    let max = (1u32 << to) - 1;
    let max_acc = (1u32 << (from + to - 1)) - 1;
    let mut out = Vec::with_capacity(data.len() * from as usize / to as usize + 1);
    for &value in data {
        acc = ((acc << from) | value as u32) & max_acc;
        bits += from;
        while bits >= to {
            bits -= to;
            out.push(((acc >> bits) & max) as u8);
        }
    }
    if pad {
        if bits > 0 {
            out.push(((acc << (to - bits)) & max) as u8);
        }
    } else if bits >= from || ((acc << (to - bits)) & max) != 0 {
        return Err(AddressError::InvalidPadding);
    }
    Ok(out)
}

pub(crate) fn encode(hrp: &str, version: u8, hash: &[u8]) -> String {
    let mut data = Vec::with_capacity(1 + hash.len() * 8 / 5 + 1);
    data.push(version);
    data.extend(convert_bits(hash, 8, 5, true).expect("padding never fails"));
    let checksum = checksum(hrp, &data);

    let mut out = String::with_capacity(hrp.len() + 1 + data.len() + CHECKSUM_LENGTH);
    out.push_str(hrp);
    out.push(SEPARATOR);
    out.extend(data.iter().chain(checksum.iter()).map(|c| CHARSET[*c as usize] as char));
    out
}

/// Decodes into `(hrp, version, hash)`. The hrp is returned lowercased.
pub(crate) fn decode(address: &str) -> Result<(String, u8, PayloadVec), AddressError> {
    if address.len() > MAX_LENGTH {
        return Err(AddressError::InvalidLength(address.len()));
    }
    let has_lower = address.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = address.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        return Err(AddressError::MixedCase);
    }
    let address = address.to_ascii_lowercase();

    let (hrp, payload) = address.rsplit_once(SEPARATOR).ok_or(AddressError::MissingPrefix)?;
    if hrp.is_empty() {
        return Err(AddressError::MissingPrefix);
    }
    if payload.len() < CHECKSUM_LENGTH + 1 {
        return Err(AddressError::InvalidLength(address.len()));
    }

    let data = payload
        .chars()
        .map(|c| match REV_CHARSET.get(c as usize) {
            Some(&i) if i != 100 => Ok(i),
            _ => Err(AddressError::DecodingError(c)),
        })
        .collect::<Result<Vec<u8>, _>>()?;

    if polymod(expand_hrp(hrp).chain(data.iter().copied())) != 1 {
        return Err(AddressError::BadChecksum);
    }

    let (data, _) = data.split_at(data.len() - CHECKSUM_LENGTH);
    let version = data[0];
    let hash = convert_bits(&data[1..], 5, 8, false)?;
    Ok((hrp.to_string(), version, PayloadVec::from_vec(hash)))
}
