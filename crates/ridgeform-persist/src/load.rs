use ridgeform_core::math::vertex_count;
use ridgeform_core::{TerrainConfig, TerrainError};
use ridgeform_world::heightfield::HeightField;
use ridgeform_world::Terrain;

use crate::compat;
use crate::compress;
use crate::error::PersistError;
use crate::format::*;

/// Parsed snapshot ready for editing.
pub struct SaveData {
    pub header: SnapshotHeader,
    pub terrain: Terrain,
    /// Compatibility warnings (e.g., mesh size drift).
    pub warnings: Vec<String>,
}

/// Load a snapshot from raw bytes and rebuild the terrain under `config`.
pub fn load(bytes: &[u8], config: &TerrainConfig) -> Result<SaveData, PersistError> {
    config.validate().map_err(TerrainError::from)?;
    if bytes.len() < HEADER_SIZE {
        return Err(PersistError::FileTooSmall(bytes.len(), HEADER_SIZE));
    }

    let header: SnapshotHeader = bytemuck::pod_read_unaligned(&bytes[..HEADER_SIZE]);
    let mut warnings = compat::validate_header(&header, config)?;

    let payload_end = HEADER_SIZE + header.payload_len as usize;
    if bytes.len() < payload_end {
        return Err(PersistError::TruncatedFile {
            expected: payload_end,
            actual: bytes.len(),
        });
    }
    if bytes.len() > payload_end {
        warnings.push(format!(
            "Ignoring {} trailing bytes after the height payload.",
            bytes.len() - payload_end
        ));
    }

    let expected = vertex_count(header.divisions) as usize;
    let heights = compress::decompress_heights(&bytes[HEADER_SIZE..payload_end], expected)?;

    let loaded_config = TerrainConfig {
        mesh_size: header.mesh_size,
        base_amplitude: header.base_amplitude,
        random_seed: header.seed(),
        ..config.clone()
    };
    let field = HeightField::from_heights(header.divisions, header.mesh_size, heights)?;
    if let Some(warning) = compat::check_peak(&header, field.peak()) {
        warnings.push(warning);
    }

    let mut terrain = Terrain::from_height_field(loaded_config, header.seed(), field)?;
    terrain.set_stroke_count(header.stroke_count);

    for warning in &warnings {
        log::warn!("{warning}");
    }
    log::info!(
        "Loaded terrain snapshot: {} divisions, {} strokes",
        header.divisions,
        header.stroke_count
    );

    Ok(SaveData {
        header,
        terrain,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::save::save;

    fn config() -> TerrainConfig {
        TerrainConfig {
            divisions: 32,
            ..TerrainConfig::seeded(99)
        }
    }

    #[test]
    fn test_save_load_preserves_edits() {
        let mut terrain = Terrain::new(config()).expect("valid config");
        let peak = terrain.peak().index;
        terrain.apply_displacements(&[(peak, 5.0), (0, 2.0)]).expect("in range");
        terrain.apply_displacements(&[(7, 1.0)]).expect("in range");

        let bytes = save(&terrain);
        let loaded = load(&bytes, &config()).expect("load should succeed");

        assert!(loaded.warnings.is_empty(), "{:?}", loaded.warnings);
        assert_eq!(loaded.terrain.height_field(), terrain.height_field());
        assert_eq!(loaded.terrain.seed(), Some(99));
        assert_eq!(loaded.terrain.stroke_count(), 2);
        assert_eq!(loaded.terrain.peak(), terrain.peak());
        assert_eq!(loaded.terrain.colors(), terrain.colors());
    }

    #[test]
    fn test_invalid_config_rejected_before_sizing() {
        let terrain = Terrain::new(config()).expect("valid config");
        let mut bytes = save(&terrain);
        // divisions lives at byte offset 24.
        bytes[24..28].copy_from_slice(&(1u32 << 31).to_le_bytes());
        let huge = TerrainConfig {
            divisions: 1 << 31,
            ..config()
        };
        assert!(matches!(
            load(&bytes, &huge),
            Err(PersistError::Terrain(TerrainError::InvalidConfig(_)))
        ));
    }

    #[test]
    fn test_too_small_rejected() {
        assert!(matches!(
            load(&[0u8; 10], &config()),
            Err(PersistError::FileTooSmall(10, HEADER_SIZE))
        ));
    }

    #[test]
    fn test_truncated_payload_rejected() {
        let terrain = Terrain::new(config()).expect("valid config");
        let bytes = save(&terrain);
        let cut = &bytes[..bytes.len() - 5];
        assert!(matches!(
            load(cut, &config()),
            Err(PersistError::TruncatedFile { .. })
        ));
    }

    #[test]
    fn test_divisions_mismatch_rejected() {
        let terrain = Terrain::new(config()).expect("valid config");
        let bytes = save(&terrain);
        let other = TerrainConfig {
            divisions: 64,
            ..config()
        };
        assert!(matches!(
            load(&bytes, &other),
            Err(PersistError::DivisionsMismatch { saved: 32, current: 64 })
        ));
    }

    #[test]
    fn test_mesh_size_drift_uses_saved_size() {
        let terrain = Terrain::new(config()).expect("valid config");
        let bytes = save(&terrain);
        let other = TerrainConfig {
            mesh_size: 250.0,
            ..config()
        };
        let loaded = load(&bytes, &other).expect("load should succeed");
        assert_eq!(loaded.warnings.len(), 1);
        assert_eq!(loaded.terrain.height_field().mesh_size(), 100.0);
        assert_eq!(loaded.terrain.config().mesh_size, 100.0);
    }

    #[test]
    fn test_tampered_peak_warns() {
        let terrain = Terrain::new(config()).expect("valid config");
        let mut bytes = save(&terrain);
        // max_height lives at byte offset 36.
        bytes[36..40].copy_from_slice(&1234.5f32.to_le_bytes());
        let loaded = load(&bytes, &config()).expect("load should succeed");
        assert_eq!(loaded.warnings.len(), 1);
        assert!(loaded.warnings[0].contains("Stored peak"));
    }

    #[test]
    fn test_trailing_bytes_warn() {
        let terrain = Terrain::new(config()).expect("valid config");
        let mut bytes = save(&terrain);
        bytes.extend_from_slice(&[0, 0, 0]);
        let loaded = load(&bytes, &config()).expect("load should succeed");
        assert_eq!(loaded.warnings.len(), 1);
        assert!(loaded.warnings[0].contains("trailing"));
    }
}
