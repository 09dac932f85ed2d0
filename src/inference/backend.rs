use std::fmt;

use burn::backend::ndarray::{NdArray, NdArrayDevice};
use burn::backend::wgpu::{Wgpu, WgpuDevice};
use serde::{Deserialize, Serialize};

pub(super) type CpuBackend = NdArray<f32>;
pub(super) type CpuDevice = NdArrayDevice;
pub(super) type GpuBackend = Wgpu;
pub(super) type GpuDevice = WgpuDevice;

/// Compute backend the classifier runs on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Portable CPU execution via ndarray.
    #[default]
    #[serde(alias = "ndarray")]
    Cpu,
    /// GPU execution via wgpu (Vulkan/Metal/DX12).
    #[serde(alias = "gpu", alias = "vulkan", alias = "metal")]
    Wgpu,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cpu => f.write_str("cpu"),
            Self::Wgpu => f.write_str("wgpu"),
        }
    }
}
