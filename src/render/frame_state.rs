//! CPU side of the per-frame lighting synchronization
//!
//! Runs the three change checks in fixed order (projection, view, level),
//! rebuilds the catalog on level change, repartitions on view or level
//! change, and keeps the [`FrameBlock`] current. Nothing here touches the GPU.

use crate::core::frame::FrameDesc;
use crate::core::types::{Mat4, Vec4};
use crate::core::Result;
use crate::lighting::{
    ChangeDetector, CsrStats, LightCatalog, LightKind, LightRecord, LightRegistry,
    LightingConfig, SlicePartitioner,
};
use crate::render::buffer::FrameBlock;

/// What the last [`FrameState::prepare`] call recomputed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameChanges {
    pub projection: bool,
    pub view: bool,
    pub level: bool,
    pub repartitioned: bool,
}

impl FrameChanges {
    pub fn any(&self) -> bool {
        self.projection || self.view || self.level
    }
}

/// Cached lighting state plus the block that gets uploaded every frame
pub struct FrameState {
    detector: ChangeDetector,
    catalog: LightCatalog,
    partitioner: SlicePartitioner,
    block: Box<FrameBlock>,
    csr: CsrStats,
}

impl FrameState {
    /// Rejects a config the change detector cannot work with.
    pub fn new(config: LightingConfig) -> Result<Self> {
        Ok(Self {
            detector: ChangeDetector::new(config)?,
            catalog: LightCatalog::new(),
            partitioner: SlicePartitioner::new(),
            block: Box::default(),
            csr: CsrStats::default(),
        })
    }

    /// Bring the block up to date with this frame.
    ///
    /// The registry is only queried when the level changed.
    pub fn prepare(&mut self, frame: &FrameDesc, registry: &dyn LightRegistry) -> FrameChanges {
        let projection = self.detector.check_projection(frame);
        let view = self.detector.check_view(frame);
        let level = self.detector.check_level(frame);

        if level {
            self.catalog.rebuild(registry);
        }

        let repartitioned = view || level;
        if repartitioned {
            self.repartition();
        }

        self.block.resolution = frame.resolution();
        self.block.projection = self.detector.projection_matrix().to_cols_array_2d();
        self.block.view = self.detector.view_matrix().to_cols_array_2d();

        FrameChanges { projection, view, level, repartitioned }
    }

    fn repartition(&mut self) {
        let view = *self.detector.view_matrix();
        self.partitioner.repartition(
            self.catalog.records(),
            &view,
            self.detector.squared_view_cone_cos(),
        );
        self.csr = self.partitioner.write_csr(
            &mut self.block.slices_first_index,
            &mut self.block.light_index_pool,
        );

        let records = self.catalog.records();
        for (slot, record) in self.block.light_vector_pool.iter_mut().zip(records) {
            *slot = light_vector(record, &view).to_array();
        }
        for slot in self.block.light_vector_pool.iter_mut().skip(records.len()) {
            *slot = [0.0; 4];
        }

        let light_dir = self
            .catalog
            .primary_direction()
            .map(|dir| view.transform_vector3(dir).normalize_or_zero().extend(0.0))
            .unwrap_or(Vec4::ZERO);
        self.block.light_dir = light_dir.to_array();
    }

    pub fn block(&self) -> &FrameBlock {
        &self.block
    }

    pub fn catalog(&self) -> &LightCatalog {
        &self.catalog
    }

    pub fn partitioner(&self) -> &SlicePartitioner {
        &self.partitioner
    }

    /// Pool usage from the last repartition
    pub fn csr_stats(&self) -> CsrStats {
        self.csr
    }
}

/// Shader-facing vector for one light, in view space
fn light_vector(record: &LightRecord, view: &Mat4) -> Vec4 {
    match record.kind {
        LightKind::Directional => view.transform_vector3(record.direction.truncate()).extend(0.0),
        LightKind::Point | LightKind::Spot => {
            view.transform_point3(record.position()).extend(record.radius())
        }
    }
}
