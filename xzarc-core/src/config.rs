//! Session configuration.
//!
//! A [`SessionConfig`] fully describes one transform: the direction, the
//! codec parameters for that direction and the staging buffer capacity.
//! Nothing here is process-wide; the driver builds a config and hands it to
//! every session explicitly.

/// Capacity of each of the two staging buffers, in bytes.
pub const DEFAULT_BUFFER_SIZE: usize = 0x1000;

/// liblzma preset flag selecting the slower "extreme" variant of a level.
pub const PRESET_EXTREME: u32 = 0x8000_0000;

/// Direction of a transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Plain data in, container out.
    Compress,
    /// Container in, plain data out.
    Decompress,
}

impl Direction {
    /// Present participle used in progress messages.
    pub fn verb(self) -> &'static str {
        match self {
            Self::Compress => "Compressing",
            Self::Decompress => "Decompressing",
        }
    }

    /// Noun used in ratio messages.
    pub fn ratio_label(self) -> &'static str {
        match self {
            Self::Compress => "compression",
            Self::Decompress => "decompression",
        }
    }
}

/// Compression preset level (0-9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CompressionLevel(u8);

impl CompressionLevel {
    /// Fastest preset.
    pub const FAST: Self = Self(0);
    /// Default preset.
    pub const DEFAULT: Self = Self(5);
    /// Best (slowest) preset.
    pub const BEST: Self = Self(9);
    /// Highest level that does not imply the extreme flag.
    pub const EXTREME_THRESHOLD: Self = Self(5);

    /// Create a level, clamping to 9.
    pub fn new(level: u8) -> Self {
        Self(level.min(9))
    }

    /// Create a level, rejecting values above 9.
    pub fn try_new(level: u8) -> Option<Self> {
        (level <= 9).then_some(Self(level))
    }

    /// Get the level value.
    pub fn level(&self) -> u8 {
        self.0
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<u8> for CompressionLevel {
    fn from(level: u8) -> Self {
        Self::new(level)
    }
}

/// Integrity check stored in the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegrityCheck {
    /// No check.
    None,
    /// CRC-32.
    Crc32,
    /// CRC-64.
    #[default]
    Crc64,
    /// SHA-256.
    Sha256,
}

impl IntegrityCheck {
    /// Parse a check name as used on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "none" => Some(Self::None),
            "crc32" => Some(Self::Crc32),
            "crc64" => Some(Self::Crc64),
            "sha256" => Some(Self::Sha256),
            _ => None,
        }
    }

    /// Canonical name.
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Crc32 => "crc32",
            Self::Crc64 => "crc64",
            Self::Sha256 => "sha256",
        }
    }
}

/// Encoder parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompressOptions {
    /// Preset level.
    pub level: CompressionLevel,
    /// Use the extreme variant of the preset.
    pub extreme: bool,
    /// Integrity check written into each block.
    pub check: IntegrityCheck,
}

impl CompressOptions {
    /// Options for `level`, enabling extreme mode above level 5.
    pub fn from_level(level: CompressionLevel) -> Self {
        Self {
            level,
            extreme: level > CompressionLevel::EXTREME_THRESHOLD,
            check: IntegrityCheck::default(),
        }
    }

    /// Set the integrity check.
    pub fn with_check(mut self, check: IntegrityCheck) -> Self {
        self.check = check;
        self
    }

    /// Preset word understood by liblzma: level bits plus the extreme flag.
    pub fn preset(&self) -> u32 {
        let extreme = if self.extreme { PRESET_EXTREME } else { 0 };
        u32::from(self.level.level()) | extreme
    }
}

/// Decoder flag bits, as understood by liblzma's stream decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecoderFlags(u32);

impl DecoderFlags {
    /// No flags.
    pub const NONE: Self = Self(0);
    /// Report containers whose integrity check cannot be verified.
    pub const TELL_UNSUPPORTED_CHECK: Self = Self(0x02);
    /// Decode concatenated streams until end of input.
    pub const CONCATENATED: Self = Self(0x08);

    /// Raw flags, unchecked.
    pub fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw flag bits.
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Whether all bits of `other` are set.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for DecoderFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl Default for DecoderFlags {
    fn default() -> Self {
        Self::TELL_UNSUPPORTED_CHECK | Self::CONCATENATED
    }
}

/// Decoder parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecompressOptions {
    /// Upper bound on decoder memory use, in bytes.
    pub memlimit: u64,
    /// Decoder flags.
    pub flags: DecoderFlags,
}

impl DecompressOptions {
    /// Set the memory limit.
    pub fn with_memlimit(mut self, memlimit: u64) -> Self {
        self.memlimit = memlimit;
        self
    }
}

impl Default for DecompressOptions {
    fn default() -> Self {
        Self {
            memlimit: u64::MAX,
            flags: DecoderFlags::default(),
        }
    }
}

/// Direction plus the codec parameters for that direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecConfig {
    /// Encode with these options.
    Compress(CompressOptions),
    /// Decode with these options.
    Decompress(DecompressOptions),
}

impl CodecConfig {
    /// Direction of the transform.
    pub fn direction(&self) -> Direction {
        match self {
            Self::Compress(_) => Direction::Compress,
            Self::Decompress(_) => Direction::Decompress,
        }
    }
}

/// Everything one session needs besides its streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Codec direction and parameters.
    pub codec: CodecConfig,
    /// Capacity of each staging buffer.
    pub buffer_size: usize,
}

impl SessionConfig {
    /// Compression session with default buffer size.
    pub fn compress(options: CompressOptions) -> Self {
        Self {
            codec: CodecConfig::Compress(options),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    /// Decompression session with default buffer size.
    pub fn decompress(options: DecompressOptions) -> Self {
        Self {
            codec: CodecConfig::Decompress(options),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    /// Override the staging buffer capacity (at least one byte).
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.max(1);
        self
    }

    /// Direction of the transform.
    pub fn direction(&self) -> Direction {
        self.codec.direction()
    }
}
