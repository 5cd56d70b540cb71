//! Face-to-vertex averaging of boundary field values.
//!
//! Every face of an included patch contributes its value to each of its
//! vertices; a vertex ends up with the arithmetic mean of the faces touching
//! it, or zero if no face touched it. The mean is accumulated incrementally,
//! so a vertex whose faces all carry the same value gets that value exactly.

use crate::algs::renumber::PointMap;
use crate::data::field::{FieldValue, PatchField};
use crate::topology::patch::{Patch, PatchFilter};

/// Average the per-face values of `patch_fields` onto the points of `map`.
///
/// `patch_fields[i]` holds the face values of `patches[i]`. Patches rejected by
/// `filter`, patches without faces, and degenerate or missing patch fields
/// contribute nothing. Faces beyond the end of a value array are skipped.
pub fn aggregate_patch_values<T: FieldValue>(
    field_name: &str,
    patches: &[Patch],
    patch_fields: &[PatchField<T>],
    filter: &PatchFilter,
    map: &PointMap,
) -> Vec<T> {
    let mut means = vec![T::ZERO; map.len()];
    let mut counts = vec![0usize; map.len()];

    for (patch_index, patch) in filter.included(patches) {
        if patch.n_faces() == 0 {
            continue;
        }
        let Some(patch_field) = patch_fields.get(patch_index) else {
            log::warn!(
                "Field {field_name} has no boundary values for patch {}; skipping",
                patch.name()
            );
            continue;
        };
        if patch_field.is_degenerate() {
            log::warn!(
                "Skipping {} boundary condition of {field_name} on patch {} ({} values)",
                patch_field.bc_type,
                patch.name(),
                patch_field.values.len()
            );
            continue;
        }
        for (face_index, face) in patch.faces().iter().enumerate() {
            let Some(&value) = patch_field.values.get(face_index) else {
                log::warn!(
                    "Face index {face_index} out of range for {field_name} on patch {} ({} values)",
                    patch.name(),
                    patch_field.values.len()
                );
                continue;
            };
            for &p in face {
                let Some(local) = map.get(p) else {
                    continue;
                };
                counts[local] += 1;
                let delta = value.difference(means[local]).scaled(1.0 / counts[local] as f64);
                means[local].accumulate(delta);
            }
        }
        log::debug!("Patch {} processed for {field_name}", patch.name());
    }

    means
}

/// Multiply every value by `factor`.
pub fn scale_values<T: FieldValue>(values: &mut [T], factor: f64) {
    for v in values {
        *v = v.scaled(factor);
    }
}
