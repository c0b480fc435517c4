//! Angular slice partitioning
//!
//! The view cone is cut into [`SLICE_COUNT`] concentric rings by off-axis
//! angle: slice `i` covers angles in `[i * φ / N, (i + 1) * φ / N]`, where φ
//! is the cone half-angle. A light joins every slice its influence sphere
//! overlaps, so boundary lights show up in adjacent slices. Directional
//! lights join all slices.
//!
//! The result is serialized CSR style: `first[i]` is where slice `i` starts
//! in the index pool and `first[N]` is the total count, so slice `i` has
//! `first[i + 1] - first[i]` entries.

use std::ops::RangeInclusive;

use super::record::LightRecord;
use super::{MAX_LIGHTS, SLICE_COUNT, SLICE_TABLE_SIZE};
use crate::core::types::Mat4;

/// View cone used for classification
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewCone {
    /// cos² of the half-angle
    pub squared_cos: f32,
    /// Half-angle in radians
    pub half_angle: f32,
}

impl ViewCone {
    /// Build from the squared cosine of the half-angle.
    ///
    /// The half-angle must be below 90 degrees, which keeps the cosine positive.
    pub fn from_squared_cos(squared_cos: f32) -> Self {
        let squared_cos = squared_cos.clamp(0.0, 1.0);
        Self {
            squared_cos,
            half_angle: squared_cos.sqrt().acos(),
        }
    }

    /// Slice an off-axis angle falls into, clamped to the last slice
    fn slice_of(&self, angle: f32) -> usize {
        if self.half_angle <= 0.0 {
            return 0;
        }
        let slice = (angle / self.half_angle * SLICE_COUNT as f32).floor();
        (slice.max(0.0) as usize).min(SLICE_COUNT - 1)
    }
}

const ALL_SLICES: RangeInclusive<usize> = 0..=SLICE_COUNT - 1;

/// Slices a light belongs to, or `None` when it lies outside the view cone.
pub fn classify(record: &LightRecord, view: &Mat4, cone: &ViewCone) -> Option<RangeInclusive<usize>> {
    let Some((center, radius)) = record.influence_sphere() else {
        return Some(ALL_SLICES);
    };

    let p = view.transform_point3(center);
    let dist_sq = p.length_squared();
    if dist_sq <= radius * radius {
        // Camera inside the light's reach
        return Some(ALL_SLICES);
    }

    // Camera looks down -Z
    let depth = -p.z;
    // Center test without a square root
    let center_inside = depth > 0.0 && depth * depth >= cone.squared_cos * dist_sq;
    if !center_inside && radius <= 0.0 {
        return None;
    }

    let dist = dist_sq.sqrt();
    let theta = (depth / dist).clamp(-1.0, 1.0).acos();
    let alpha = (radius / dist).clamp(0.0, 1.0).asin();
    if !center_inside && theta - alpha > cone.half_angle {
        return None;
    }

    let lo = (theta - alpha).max(0.0);
    let hi = (theta + alpha).min(cone.half_angle);
    Some(cone.slice_of(lo)..=cone.slice_of(hi))
}

/// Outcome of writing the slices into the fixed-size GPU tables
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CsrStats {
    /// Index pool entries written
    pub used: usize,
    /// Slice memberships that did not fit
    pub dropped: usize,
}

/// Per-slice light index lists, reused across frames
#[derive(Clone, Debug, Default)]
pub struct SlicePartitioner {
    slices: [Vec<u32>; SLICE_COUNT],
    /// Lights inside the cone after the last run
    visible: usize,
}

impl SlicePartitioner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild all slices from the catalog for the given view.
    ///
    /// A slice never holds more than [`MAX_LIGHTS`] entries.
    pub fn repartition(&mut self, lights: &[LightRecord], view: &Mat4, squared_cos: f32) {
        let cone = ViewCone::from_squared_cos(squared_cos);
        for slice in &mut self.slices {
            slice.clear();
        }
        self.visible = 0;

        for (index, record) in lights.iter().enumerate() {
            let Some(range) = classify(record, view, &cone) else {
                continue;
            };
            self.visible += 1;
            for slice in range {
                let entries = &mut self.slices[slice];
                if entries.len() < MAX_LIGHTS {
                    entries.push(index as u32);
                }
            }
        }

        log::trace!(
            "Repartitioned {} lights: {} visible, {} slice entries",
            lights.len(),
            self.visible,
            self.total_entries()
        );
    }

    /// Light indices of one slice
    pub fn slice(&self, index: usize) -> &[u32] {
        &self.slices[index]
    }

    pub fn slices(&self) -> &[Vec<u32>; SLICE_COUNT] {
        &self.slices
    }

    /// Lights that landed in at least one slice during the last run
    pub fn visible(&self) -> usize {
        self.visible
    }

    /// Slice memberships across all slices, duplicates included
    pub fn total_entries(&self) -> usize {
        self.slices.iter().map(Vec::len).sum()
    }

    /// Serialize into the start table and index pool.
    ///
    /// Slices are written in order; once the pool is full the remaining
    /// memberships are dropped. Unused pool entries are zeroed.
    pub fn write_csr(&self, first: &mut [u32; SLICE_TABLE_SIZE], pool: &mut [u32; MAX_LIGHTS]) -> CsrStats {
        let mut stats = CsrStats::default();

        for (i, slice) in self.slices.iter().enumerate() {
            first[i] = stats.used as u32;
            let take = slice.len().min(MAX_LIGHTS - stats.used);
            pool[stats.used..stats.used + take].copy_from_slice(&slice[..take]);
            stats.used += take;
            stats.dropped += slice.len() - take;
        }
        // Sentinel, then padding
        for entry in &mut first[SLICE_COUNT..] {
            *entry = stats.used as u32;
        }
        pool[stats.used..].fill(0);

        if stats.dropped > 0 {
            log::warn!(
                "Light index pool full: dropped {} slice entries (capacity {})",
                stats.dropped,
                MAX_LIGHTS
            );
        }
        stats
    }
}
