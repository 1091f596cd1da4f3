use ridgeform_core::TerrainConfig;
use ridgeform_world::heightfield::Peak;

use crate::error::PersistError;
use crate::format::{SnapshotHeader, FORMAT_VERSION, MAGIC};

/// Validate a snapshot header against the running config.
///
/// Returns Ok(warnings) on success, Err on fatal errors. Only a divisions
/// mismatch is fatal; other parameter drift is reported and the saved value wins.
pub fn validate_header(
    header: &SnapshotHeader,
    config: &TerrainConfig,
) -> Result<Vec<String>, PersistError> {
    if header.magic != MAGIC {
        return Err(PersistError::InvalidMagic);
    }

    if header.version != FORMAT_VERSION {
        return Err(PersistError::UnsupportedVersion(header.version));
    }

    if header.divisions != config.divisions {
        return Err(PersistError::DivisionsMismatch {
            saved: header.divisions,
            current: config.divisions,
        });
    }

    let mut warnings = Vec::new();

    if header.mesh_size != config.mesh_size {
        warnings.push(format!(
            "Mesh size differs (save: {}, current: {}). Using the saved size.",
            header.mesh_size, config.mesh_size
        ));
    }

    if header.base_amplitude != config.base_amplitude {
        warnings.push(format!(
            "Base amplitude differs (save: {}, current: {}). \
             Regenerating will not reproduce the saved terrain.",
            header.base_amplitude, config.base_amplitude
        ));
    }

    Ok(warnings)
}

/// Compare the stored peak with the one found in the decoded heights.
pub fn check_peak(header: &SnapshotHeader, peak: Peak) -> Option<String> {
    if header.max_height == peak.height && header.peak_index == peak.index {
        return None;
    }
    Some(format!(
        "Stored peak {} at vertex {} does not match heights (found {} at vertex {}).",
        header.max_height, header.peak_index, peak.height, peak.index
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FLAG_HAS_SEED;

    fn test_header(config: &TerrainConfig) -> SnapshotHeader {
        SnapshotHeader {
            magic: MAGIC,
            version: FORMAT_VERSION,
            flags: FLAG_HAS_SEED,
            seed: 5,
            stroke_count: 0,
            divisions: config.divisions,
            mesh_size: config.mesh_size,
            base_amplitude: config.base_amplitude,
            max_height: 0.0,
            peak_index: 0,
            payload_len: 0,
        }
    }

    #[test]
    fn test_valid_header_no_warnings() {
        let config = TerrainConfig::default();
        let warnings = validate_header(&test_header(&config), &config).expect("should succeed");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_parameter_drift_warns() {
        let config = TerrainConfig::default();
        let mut header = test_header(&config);
        header.mesh_size = 50.0;
        header.base_amplitude = 3.0;
        let warnings = validate_header(&header, &config).expect("should succeed with warnings");
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("Mesh size differs"));
    }

    #[test]
    fn test_divisions_mismatch_rejected() {
        let config = TerrainConfig::default();
        let mut header = test_header(&config);
        header.divisions = 64;
        assert!(matches!(
            validate_header(&header, &config),
            Err(PersistError::DivisionsMismatch {
                saved: 64,
                current: 128
            })
        ));
    }

    #[test]
    fn test_invalid_magic_rejected() {
        let config = TerrainConfig::default();
        let mut header = test_header(&config);
        header.magic = *b"NOPE";
        assert!(matches!(
            validate_header(&header, &config),
            Err(PersistError::InvalidMagic)
        ));
    }

    #[test]
    fn test_future_version_rejected() {
        let config = TerrainConfig::default();
        let mut header = test_header(&config);
        header.version = 99;
        assert!(matches!(
            validate_header(&header, &config),
            Err(PersistError::UnsupportedVersion(99))
        ));
    }

    #[test]
    fn test_peak_mismatch_warns() {
        let config = TerrainConfig::default();
        let header = test_header(&config);
        assert!(check_peak(&header, Peak { height: 0.0, index: 0 }).is_none());
        assert!(check_peak(&header, Peak { height: 1.0, index: 3 }).is_some());
    }
}
