// ============================================================
// Layer 5 — Backend Selection
// ============================================================
// The model and trainer are generic over Burn's Backend trait.
// This file names the two concrete backends the binary ships
// with and how the user picks between them.
//
//   Gpu → Wgpu     (Vulkan / Metal / DX12 through wgpu)
//   Cpu → NdArray  (pure Rust, always available)
//
// Training wraps either one in Autodiff for gradients.

use serde::{Deserialize, Serialize};

pub type CpuBackend = burn::backend::NdArray;
pub type GpuBackend = burn::backend::Wgpu;

pub type CpuTrainBackend = burn::backend::Autodiff<CpuBackend>;
pub type GpuTrainBackend = burn::backend::Autodiff<GpuBackend>;

/// Which compute device a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Cpu,
    Gpu,
}

impl DeviceKind {
    pub fn cpu_device() -> burn::backend::ndarray::NdArrayDevice {
        burn::backend::ndarray::NdArrayDevice::Cpu
    }

    pub fn gpu_device() -> burn::backend::wgpu::WgpuDevice {
        burn::backend::wgpu::WgpuDevice::default()
    }
}
