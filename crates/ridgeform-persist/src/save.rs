use ridgeform_world::Terrain;

use crate::compress;
use crate::format::*;

/// Serialize a terrain into the snapshot binary format.
///
/// Layout: header (48B) + LZ4 height payload.
pub fn save(terrain: &Terrain) -> Vec<u8> {
    let field = terrain.height_field();
    let payload = compress::compress_heights(field.heights());
    let peak = field.peak();

    let (flags, seed) = match terrain.seed() {
        Some(seed) => (FLAG_HAS_SEED, seed),
        None => (0, 0),
    };

    let header = SnapshotHeader {
        magic: MAGIC,
        version: FORMAT_VERSION,
        flags,
        seed,
        stroke_count: terrain.stroke_count(),
        divisions: field.divisions(),
        mesh_size: field.mesh_size(),
        base_amplitude: terrain.config().base_amplitude,
        max_height: peak.height,
        peak_index: peak.index,
        payload_len: payload.len() as u32,
    };

    let mut output = Vec::with_capacity(HEADER_SIZE + payload.len());
    output.extend_from_slice(bytemuck::bytes_of(&header));
    output.extend_from_slice(&payload);

    log::debug!(
        "Saved terrain snapshot: {} divisions, {} bytes ({} payload)",
        header.divisions,
        output.len(),
        payload.len()
    );
    output
}
