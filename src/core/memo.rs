//! Decoding of memo.cash "post" OP_RETURN outputs carrying message signals.
//!
//! Script layout: `OP_RETURN <push 0x6d02> <push "MSG IPFS <cid> <subject>">`.

use crate::utils::error::Result;

const OP_RETURN: u8 = 0x6a;
const OP_PUSHDATA1: u8 = 0x4c;
const OP_PUSHDATA2: u8 = 0x4d;
const OP_PUSHDATA4: u8 = 0x4e;

pub const MEMO_POST_PREFIX: [u8; 2] = [0x6d, 0x02];
const MSG_TAG: &str = "MSG";
const IPFS_TAG: &str = "IPFS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalPayload {
    pub ipfs_hash: String,
    pub subject: String,
}

/// Splits an OP_RETURN script into its data pushes. Returns `None` for
/// anything that is not a well-formed, push-only OP_RETURN.
pub fn op_return_pushes(script: &[u8]) -> Option<Vec<&[u8]>> {
    let (&first, mut rest) = script.split_first()?;
    if first != OP_RETURN {
        return None;
    }

    let mut pushes = Vec::new();
    while let Some((&opcode, tail)) = rest.split_first() {
        let (len, tail) = match opcode {
            0x01..=0x4b => (opcode as usize, tail),
            OP_PUSHDATA1 => {
                let (&len, tail) = tail.split_first()?;
                (len as usize, tail)
            }
            OP_PUSHDATA2 => {
                let bytes = tail.get(..2)?;
                (u16::from_le_bytes([bytes[0], bytes[1]]) as usize, &tail[2..])
            }
            OP_PUSHDATA4 => {
                let bytes = tail.get(..4)?;
                let len = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
                (len as usize, &tail[4..])
            }
            _ => return None,
        };

        pushes.push(tail.get(..len)?);
        rest = &tail[len..];
    }

    Some(pushes)
}

/// Parses a scriptPubKey hex string. `Ok(None)` when the output is not a
/// message signal.
pub fn parse_msg_signal(script_hex: &str) -> Result<Option<SignalPayload>> {
    let script = hex::decode(script_hex)?;

    let pushes = match op_return_pushes(&script) {
        Some(pushes) if pushes.len() >= 2 => pushes,
        _ => return Ok(None),
    };

    if pushes[0] != MEMO_POST_PREFIX {
        return Ok(None);
    }

    let text = match std::str::from_utf8(pushes[1]) {
        Ok(text) => text,
        Err(_) => return Ok(None),
    };

    Ok(parse_signal_text(text))
}

fn parse_signal_text(text: &str) -> Option<SignalPayload> {
    let mut parts = text.splitn(4, ' ');
    if parts.next()? != MSG_TAG || parts.next()? != IPFS_TAG {
        return None;
    }

    let ipfs_hash = parts.next().filter(|hash| !hash.is_empty())?;
    let subject = parts.next().unwrap_or("").trim();

    Some(SignalPayload {
        ipfs_hash: ipfs_hash.to_string(),
        subject: subject.to_string(),
    })
}

#[cfg(test)]
pub(crate) fn memo_script_hex(text: &str) -> String {
    let body = text.as_bytes();
    let mut script = vec![OP_RETURN, 0x02, MEMO_POST_PREFIX[0], MEMO_POST_PREFIX[1]];
    if body.len() <= 0x4b {
        script.push(body.len() as u8);
    } else {
        script.push(OP_PUSHDATA1);
        script.push(body.len() as u8);
    }
    script.extend_from_slice(body);
    hex::encode(script)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_msg_signal() {
        let script = memo_script_hex("MSG IPFS bafyfakehash Hello there");
        let payload = parse_msg_signal(&script).unwrap().unwrap();

        assert_eq!(payload.ipfs_hash, "bafyfakehash");
        assert_eq!(payload.subject, "Hello there");
    }

    #[test]
    fn test_parse_long_subject_uses_pushdata1() {
        let subject = "s".repeat(100);
        let script = memo_script_hex(&format!("MSG IPFS bafyfakehash {}", subject));
        assert!(script.starts_with("6a026d024c"));

        let payload = parse_msg_signal(&script).unwrap().unwrap();
        assert_eq!(payload.subject, subject);
    }

    #[test]
    fn test_signal_without_subject() {
        let script = memo_script_hex("MSG IPFS bafyfakehash");
        let payload = parse_msg_signal(&script).unwrap().unwrap();
        assert_eq!(payload.subject, "");
    }

    #[test]
    fn test_other_memo_posts_are_ignored() {
        let script = memo_script_hex("just a regular memo post");
        assert_eq!(parse_msg_signal(&script).unwrap(), None);
    }

    #[test]
    fn test_non_op_return_is_ignored() {
        // P2PKH output
        let p2pkh = "76a914000000000000000000000000000000000000000088ac";
        assert_eq!(parse_msg_signal(p2pkh).unwrap(), None);
    }

    #[test]
    fn test_truncated_push_is_ignored() {
        // Declares 5 bytes but carries 2.
        assert_eq!(op_return_pushes(&[0x6a, 0x05, 0x01, 0x02]), None);
        assert_eq!(parse_msg_signal("6a05aabb").unwrap(), None);
    }

    #[test]
    fn test_invalid_hex_is_an_error() {
        assert!(parse_msg_signal("zz").is_err());
    }

    #[test]
    fn test_op_return_pushes() {
        let pushes = op_return_pushes(&[0x6a, 0x02, 0x6d, 0x02, 0x01, 0xff]).unwrap();
        assert_eq!(pushes, vec![&[0x6du8, 0x02][..], &[0xffu8][..]]);
    }
}
