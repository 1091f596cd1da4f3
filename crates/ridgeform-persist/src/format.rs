/// Magic bytes identifying a ridgeform terrain snapshot.
pub const MAGIC: [u8; 4] = *b"RDGF";

/// Current snapshot format version.
pub const FORMAT_VERSION: u16 = 1;

/// Size of the file header in bytes.
pub const HEADER_SIZE: usize = 48;

/// `flags` bit set when `seed` holds a real generation seed.
pub const FLAG_HAS_SEED: u16 = 1;

/// Snapshot header. Fixed 48 bytes, repr(C) for byte-level serialization.
///
/// Followed by `payload_len` bytes of size-prepended LZ4 holding
/// `(divisions + 1)^2` little-endian f32 heights, row-major.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SnapshotHeader {
    pub magic: [u8; 4],
    pub version: u16,
    pub flags: u16,
    pub seed: u64,
    pub stroke_count: u64,
    pub divisions: u32,
    pub mesh_size: f32,
    pub base_amplitude: f32,
    pub max_height: f32,
    pub peak_index: u32,
    pub payload_len: u32,
}

impl SnapshotHeader {
    pub fn seed(&self) -> Option<u64> {
        (self.flags & FLAG_HAS_SEED != 0).then_some(self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_size() {
        assert_eq!(std::mem::size_of::<SnapshotHeader>(), HEADER_SIZE);
    }

    #[test]
    fn test_seed_flag() {
        let mut header: SnapshotHeader = bytemuck::Zeroable::zeroed();
        header.seed = 77;
        assert_eq!(header.seed(), None);
        header.flags = FLAG_HAS_SEED;
        assert_eq!(header.seed(), Some(77));
    }
}
