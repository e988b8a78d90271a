// src/pass/obfs.rs
use bytes::BytesMut;
use crate::error::Result;
use crate::swap::byte_swap_in_place;
use super::{IoVec, Pass};

/// Obfuscates a payload by reversing all of its bytes.
///
/// Encoding and decoding are the same operation; applying either twice gives
/// back the original payload.
#[derive(Debug, Default, Clone, Copy)]
pub struct FastObfs;

impl FastObfs {
    pub fn encode(&self, mut buf: BytesMut) -> Result<BytesMut> {
        byte_swap_in_place(&mut buf);
        Ok(buf)
    }

    pub fn decode(&self, mut buf: BytesMut) -> Result<BytesMut> {
        byte_swap_in_place(&mut buf);
        Ok(buf)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ObfsEncoder {
    obfs: FastObfs,
}

impl ObfsEncoder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Pass for ObfsEncoder {
    fn run(&mut self, b: &mut IoVec) -> Result<()> {
        let buf = self.obfs.encode(b.consume())?;
        b.take(buf);
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ObfsDecoder {
    obfs: FastObfs,
}

impl ObfsDecoder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Pass for ObfsDecoder {
    fn run(&mut self, b: &mut IoVec) -> Result<()> {
        let buf = self.obfs.decode(b.consume())?;
        b.take(buf);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_reverses() {
        let out = FastObfs.encode(BytesMut::from(&[1u8, 2, 3, 4][..])).unwrap();
        assert_eq!(&out[..], &[4, 3, 2, 1]);
    }

    #[test]
    fn test_encode_twice_is_identity() {
        let original = BytesMut::from(&b"obfuscate me"[..]);
        let once = FastObfs.encode(original.clone()).unwrap();
        assert_ne!(once, original);

        let twice = FastObfs.encode(once).unwrap();
        assert_eq!(twice, original);
    }

    #[test]
    fn test_decode_inverts_encode() {
        let original = BytesMut::from(&b"abcdefg"[..]);
        let encoded = FastObfs.encode(original.clone()).unwrap();
        assert_eq!(FastObfs.decode(encoded).unwrap(), original);
    }

    #[test]
    fn test_encoder_flattens_segments() {
        let mut v = IoVec::new();
        v.take_slice(&[1, 2]);
        v.take_slice(&[3, 4, 5]);

        ObfsEncoder::new().run(&mut v).unwrap();

        assert_eq!(v.segment_count(), 1);
        assert_eq!(&v.consume()[..], &[5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_empty_payload() {
        let mut v = IoVec::new();
        ObfsEncoder::new().run(&mut v).unwrap();
        ObfsDecoder::new().run(&mut v).unwrap();
        assert!(v.is_empty());
    }

    #[test]
    fn test_pair_roundtrip() {
        for len in 24..32 {
            let payload: Vec<u8> = (0..len as u8).collect();
            let mut v = IoVec::from(payload.clone());

            ObfsEncoder::new().run(&mut v).unwrap();
            ObfsDecoder::new().run(&mut v).unwrap();

            assert_eq!(&v.consume()[..], &payload[..]);
        }
    }
}
