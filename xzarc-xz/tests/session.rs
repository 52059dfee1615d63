//! End-to-end sessions through the real liblzma engine.

use std::io::{self, Read};
use xzarc_core::config::{
    CompressOptions, CompressionLevel, DEFAULT_BUFFER_SIZE, DecompressOptions, Direction,
    IntegrityCheck, SessionConfig,
};
use xzarc_core::error::StatusKind;
use xzarc_core::pump::PumpSession;
use xzarc_core::traits::CodecEngine;
use xzarc_xz::{XzEngine, compress, decompress, run_session};

/// Deterministic, poorly compressible bytes.
fn noise(len: usize) -> Vec<u8> {
    let mut seed: u64 = 0x9E37_79B9_7F4A_7C15;
    (0..len)
        .map(|_| {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (seed >> 33) as u8
        })
        .collect()
}

fn text(len: usize) -> Vec<u8> {
    b"the quick brown fox jumps over the lazy dog. "
        .iter()
        .copied()
        .cycle()
        .take(len)
        .collect()
}

fn roundtrip_with(data: &[u8], buffer_size: usize) -> Vec<u8> {
    let mut packed = Vec::new();
    let outcome = run_session(
        &SessionConfig::compress(CompressOptions::default()).with_buffer_size(buffer_size),
        data,
        &mut packed,
    );
    assert!(outcome.is_ok(), "compress failed: {:?}", outcome.error());
    assert_eq!(outcome.bytes_in, data.len() as u64);
    assert_eq!(outcome.bytes_out, packed.len() as u64);

    let mut unpacked = Vec::new();
    let outcome = run_session(
        &SessionConfig::decompress(DecompressOptions::default()).with_buffer_size(buffer_size),
        &packed[..],
        &mut unpacked,
    );
    assert!(outcome.is_ok(), "decompress failed: {:?}", outcome.error());
    assert_eq!(outcome.bytes_in, packed.len() as u64);
    assert_eq!(outcome.bytes_out, unpacked.len() as u64);
    unpacked
}

#[test]
fn test_roundtrip_sizes() {
    let sizes = [
        0,
        1,
        DEFAULT_BUFFER_SIZE - 1,
        DEFAULT_BUFFER_SIZE,
        DEFAULT_BUFFER_SIZE + 1,
        3 * DEFAULT_BUFFER_SIZE,
        100_000,
    ];
    for size in sizes {
        let data = noise(size);
        assert_eq!(roundtrip_with(&data, DEFAULT_BUFFER_SIZE), data, "size {size}");
    }
}

#[test]
fn test_roundtrip_tiny_buffers() {
    let data = text(10_000);
    for buffer_size in [1, 2, 13, 64] {
        assert_eq!(roundtrip_with(&data, buffer_size), data, "buffer {buffer_size}");
    }
}

#[test]
fn test_ten_thousand_zeros() {
    let data = vec![0u8; 10_000];
    let mut packed = Vec::new();
    let outcome = run_session(
        &SessionConfig::compress(CompressOptions::default()),
        &data[..],
        &mut packed,
    );
    assert!(outcome.is_ok());
    assert!(packed.len() < 128, "packed to {} bytes", packed.len());

    let ratio = outcome.ratio().unwrap();
    assert!(ratio >= 98, "ratio {ratio}");

    assert_eq!(decompress(&packed).unwrap(), data);
}

#[test]
fn test_levels_and_checks() {
    let data = text(20_000);
    for level in [0u8, 1, 5, 6, 9] {
        for check in [
            IntegrityCheck::None,
            IntegrityCheck::Crc32,
            IntegrityCheck::Crc64,
            IntegrityCheck::Sha256,
        ] {
            let options = CompressOptions::from_level(CompressionLevel::new(level)).with_check(check);
            let packed = compress(&data, options).unwrap();
            assert_eq!(decompress(&packed).unwrap(), data, "level {level} {check:?}");
        }
    }
}

#[test]
fn test_concatenated_streams() {
    let first = text(5_000);
    let second = noise(5_000);
    let mut packed = compress(&first, CompressOptions::default()).unwrap();
    packed.extend(compress(&second, CompressOptions::default()).unwrap());

    let mut expected = first;
    expected.extend(second);
    assert_eq!(decompress(&packed).unwrap(), expected);
}

#[test]
fn test_truncated_stream_fails() {
    let packed = compress(&noise(20_000), CompressOptions::default()).unwrap();
    for cut in [1, 10, packed.len() / 2] {
        let err = decompress(&packed[..packed.len() - cut]).unwrap_err();
        assert_eq!(err.kind(), StatusKind::Decompress, "cut {cut}");
    }
}

#[test]
fn test_corrupted_stream_fails() {
    let mut packed = compress(&noise(20_000), CompressOptions::default()).unwrap();
    let mid = packed.len() / 2;
    packed[mid] ^= 0xFF;
    let err = decompress(&packed).unwrap_err();
    assert_eq!(err.kind(), StatusKind::Decompress);
    assert_eq!(err.exit_code(), 6);
}

#[test]
fn test_memlimit_exceeded() {
    let packed = compress(&text(1_000), CompressOptions::default()).unwrap();
    let mut out = Vec::new();
    let outcome = run_session(
        &SessionConfig::decompress(DecompressOptions::default().with_memlimit(1)),
        &packed[..],
        &mut out,
    );
    assert_eq!(outcome.kind(), StatusKind::Decompress);
}

#[test]
fn test_init_failure() {
    let options = DecompressOptions {
        flags: xzarc_core::DecoderFlags::from_bits(1 << 30),
        ..DecompressOptions::default()
    };
    let mut out = Vec::new();
    let outcome = run_session(&SessionConfig::decompress(options), &b"xyz"[..], &mut out);
    assert_eq!(outcome.kind(), StatusKind::Init);
    assert_eq!(outcome.bytes_in, 0);
    assert!(out.is_empty());
}

/// Serves `data` in `chunk`-sized reads and fails on the second read.
struct FailsOnSecondRead {
    data: Vec<u8>,
    chunk: usize,
    calls: usize,
}

impl Read for FailsOnSecondRead {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.calls += 1;
        if self.calls == 2 {
            return Err(io::Error::other("read failed"));
        }
        let n = buf.len().min(self.chunk).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data.drain(..n);
        Ok(n)
    }
}

#[test]
fn test_input_failure_releases_engine() {
    let mut reader = FailsOnSecondRead {
        data: noise(50_000),
        chunk: DEFAULT_BUFFER_SIZE,
        calls: 0,
    };
    let mut engine = XzEngine::encoder(&CompressOptions::default()).unwrap();
    let mut out = Vec::new();

    let outcome = PumpSession::new(
        Direction::Compress,
        &mut engine,
        &mut reader,
        &mut out,
        DEFAULT_BUFFER_SIZE,
    )
    .run();

    assert_eq!(outcome.kind(), StatusKind::Input);
    assert_eq!(outcome.exit_code(), 2);
    assert_eq!(reader.calls, 2);
    assert!(engine.is_released());
    assert_eq!(outcome.bytes_in, DEFAULT_BUFFER_SIZE as u64);
    // Only what the encoder flushed for the first chunk reached the output.
    assert_eq!(outcome.bytes_out, out.len() as u64);
    assert!(out.len() <= DEFAULT_BUFFER_SIZE + 64);
}
