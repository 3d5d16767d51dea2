use std::fmt;

/// Axis sizes of the 5-dimensional decision grid, listed outermost to
/// innermost: ball x, ball y, ball x velocity, ball y velocity, paddle y.
///
/// The flat offset of an entry is
/// `((((bx * ball_y + by) * vel_x + vx) * vel_y + vy) * paddle_y + ay)`,
/// matching the generator's loop nesting. The order is a contract with the
/// generator; it cannot be recovered from the table bytes alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dims {
    pub ball_x: usize,
    pub ball_y: usize,
    pub vel_x: usize,
    pub vel_y: usize,
    pub paddle_y: usize,
}

impl Dims {
    pub const fn entries(&self) -> usize {
        self.ball_x * self.ball_y * self.vel_x * self.vel_y * self.paddle_y
    }

    /// Inverts the flattening formula, returning the five bucket indices
    /// `[bx, by, vx, vy, ay]` for a flat offset.
    pub fn coords(&self, mut index: usize) -> [usize; 5] {
        let ay = index % self.paddle_y;
        index /= self.paddle_y;
        let vy = index % self.vel_y;
        index /= self.vel_y;
        let vx = index % self.vel_x;
        index /= self.vel_x;
        let by = index % self.ball_y;
        index /= self.ball_y;
        [index, by, vx, vy, ay]
    }
}

/// Full-resolution table: one decision byte per entry.
pub const RAW_DIMS: Dims = Dims {
    ball_x: 40,
    ball_y: 28,
    vel_x: 9,
    vel_y: 9,
    paddle_y: 28,
};

/// Compressed v3 table: four 2-bit decisions per byte, reduced axes.
pub const PACKED_V3_DIMS: Dims = Dims {
    ball_x: 7,
    ball_y: 18,
    vel_x: 4,
    vel_y: 9,
    paddle_y: 24,
};

/// On-disk layout of a lookup table file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// One byte per entry, values 0..=2.
    Raw,
    /// Four entries per byte, two bits each, high bits first:
    /// `(a0 << 6) | (a1 << 4) | (a2 << 2) | a3`.
    PackedV3,
}

impl TableFormat {
    pub const fn dims(self) -> Dims {
        match self {
            Self::Raw => RAW_DIMS,
            Self::PackedV3 => PACKED_V3_DIMS,
        }
    }

    /// Exact byte length a table file of this format must have.
    pub const fn expected_bytes(self) -> usize {
        match self {
            Self::Raw => RAW_DIMS.entries(),
            Self::PackedV3 => PACKED_V3_DIMS.entries().div_ceil(4),
        }
    }
}

/// One entry of the table: the action the AI takes in that state bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Up,
    Stay,
    Down,
    /// Any byte outside 0..=2. Kept visible, never collapsed into a default.
    Invalid(u8),
}

impl Decision {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0 => Self::Up,
            1 => Self::Stay,
            2 => Self::Down,
            other => Self::Invalid(other),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Stay => "STAY",
            Self::Down => "DOWN",
            Self::Invalid(_) => "INVALID",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    SizeMismatch { expected: usize, actual: usize },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => write!(
                f,
                "lookup table size mismatch: expected {expected} bytes, found {actual} bytes"
            ),
        }
    }
}

impl std::error::Error for TableError {}

/// A validated, immutable lookup table. Packed input is unpacked once at
/// construction, so downstream stages always see one decision byte per entry.
#[derive(Debug)]
pub struct LookupTable {
    format: TableFormat,
    decisions: Vec<u8>,
}

impl LookupTable {
    /// Validates the byte length against the format and takes ownership of
    /// the decisions. Length is a hard precondition: a truncated or oversized
    /// file is rejected before any decoding happens.
    pub fn from_bytes(format: TableFormat, bytes: &[u8]) -> Result<Self, TableError> {
        let expected = format.expected_bytes();
        if bytes.len() != expected {
            return Err(TableError::SizeMismatch {
                expected,
                actual: bytes.len(),
            });
        }
        let entries = format.dims().entries();
        let decisions = match format {
            TableFormat::Raw => bytes.to_vec(),
            TableFormat::PackedV3 => {
                let mut out = Vec::with_capacity(bytes.len() * 4);
                for &byte in bytes {
                    out.push(byte >> 6);
                    out.push((byte >> 4) & 0x3);
                    out.push((byte >> 2) & 0x3);
                    out.push(byte & 0x3);
                }
                // The final byte may carry zero-filled slack fields.
                out.truncate(entries);
                out
            }
        };
        debug_assert_eq!(decisions.len(), entries);
        Ok(Self { format, decisions })
    }

    pub fn format(&self) -> TableFormat {
        self.format
    }

    pub fn dims(&self) -> Dims {
        self.format.dims()
    }

    /// Number of entries, not file bytes.
    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }

    pub fn get(&self, index: usize) -> Decision {
        Decision::from_byte(self.decisions[index])
    }

    pub fn decisions(&self) -> impl Iterator<Item = Decision> + '_ {
        self.decisions.iter().map(|&b| Decision::from_byte(b))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.decisions
    }
}
