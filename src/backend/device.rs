//! Host-side contract for an offloaded dense matrix multiply.
//!
//! `spec.md` §1 treats the device-side compute API as an external
//! collaborator: this module specifies the contract a device back end
//! must satisfy — capacity queries at init, the same `matmul` grid
//! contract as the CPU kernels, and the reserved error surface — and
//! ships one concrete implementation on top of OpenCL behind the
//! `device` feature. The vocabulary `spec.md` §6 uses for device
//! capacity ("max allocation size", "global memory size", "max
//! work-group size") is OpenCL's own device-info triple
//! (`CL_DEVICE_MAX_MEM_ALLOC_SIZE`, `CL_DEVICE_GLOBAL_MEM_SIZE`,
//! `CL_DEVICE_MAX_WORK_GROUP_SIZE`), which is the basis for that choice.

use crate::error::{PositError, Result};

/// Capacity limits reported by a device at initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceCapabilities {
    /// Largest single buffer allocation the device permits, in bytes.
    pub max_alloc_bytes: usize,
    /// Total global memory on the device, in bytes.
    pub global_mem_bytes: usize,
    /// Largest work-group size the device supports.
    pub max_work_group_size: usize,
}

/// A device capable of running the `matmul` kernel.
///
/// Implementations are expected to have already uploaded the
/// 256-entry `to_double` table at construction time, since it is
/// shared, read-only state across every `matmul` call (`spec.md` §5).
pub trait DeviceBackend {
    /// Capacity limits this device reported at initialization.
    fn capabilities(&self) -> DeviceCapabilities;

    /// Dense matrix multiply with the identical contract as
    /// [`crate::kernels::matmul::matmul`], executed on the device.
    fn matmul(&self, a: &[u8], b: &[u8], c: &mut [u8], m: usize, k: usize, n: usize) -> Result<()>;
}

/// Validate `m*k`, `k*n`, `m*n` against the buffers and the device's
/// reported allocation limit, before any device call is made.
fn check_capacity(
    a_len: usize,
    b_len: usize,
    c_len: usize,
    m: usize,
    k: usize,
    n: usize,
    caps: DeviceCapabilities,
) -> Result<()> {
    let expected_a = m * k;
    if a_len != expected_a {
        return Err(PositError::DimensionMismatch {
            expected: expected_a,
            actual: a_len,
        });
    }
    let expected_b = k * n;
    if b_len != expected_b {
        return Err(PositError::DimensionMismatch {
            expected: expected_b,
            actual: b_len,
        });
    }
    let expected_c = m * n;
    if c_len != expected_c {
        return Err(PositError::DimensionMismatch {
            expected: expected_c,
            actual: c_len,
        });
    }

    let largest_buffer = expected_a.max(expected_b).max(expected_c);
    if largest_buffer > caps.max_alloc_bytes {
        return Err(PositError::DeviceCapacity {
            requested: largest_buffer,
            limit: caps.max_alloc_bytes,
        });
    }
    let total = expected_a + expected_b + expected_c;
    if total > caps.global_mem_bytes {
        return Err(PositError::DeviceCapacity {
            requested: total,
            limit: caps.global_mem_bytes,
        });
    }
    Ok(())
}

/// The OpenCL C source for the device-side `matmul` kernel.
///
/// `to_double` arrives pre-uploaded as a `__constant double[256]`
/// buffer built from the host's own table (`spec.md` §4.5), so the
/// kernel only needs to re-implement `encode` — the decode side is a
/// single table lookup. The regime/rounding algorithm mirrors
/// `crate::codec::encode` exactly, including the floor-division
/// definition of `k` for negative `scale` (never the arithmetic-shift
/// variant `spec.md` §9 flags as a source bug).
pub const KERNEL_SOURCE: &str = r#"
#pragma OPENCL EXTENSION cl_khr_fp64 : enable

inline uchar encode_p8(double x) {
    if (x == 0.0) {
        return 0x00;
    }
    if (isnan(x) || isinf(x)) {
        return 0x80;
    }

    ulong bits = as_ulong(x);
    int sign = (bits >> 63) & 1;
    int exp_field = (int)((bits >> 52) & 0x7FF);
    ulong mantissa = bits & ((1UL << 52) - 1);

    if (exp_field == 0) {
        return 0x00;
    }

    int scale = exp_field - 1023;
    int k = (scale >= 0) ? (scale / 2) : -(((-scale) + 1) >> 1);
    int e = scale - 2 * k;

    int l = (k >= 0) ? (k + 2) : (-k + 1);
    if (k >= 0 && l > 7) {
        return sign ? 0x81 : 0x7F;
    }
    if (k < 0 && l > 7) {
        return 0x00;
    }

    uint regime_value = (k >= 0) ? ((1u << l) - 2) : 1u;
    uint regime_shifted = regime_value << (7 - l);
    int f = 6 - l;

    uint raw;
    int guard;
    int sticky;
    if (f >= 0) {
        uint exponent_shifted = ((uint)e) << f;
        uint frac_value = (f > 0) ? (uint)(mantissa >> (52 - f)) : 0u;
        raw = regime_shifted | exponent_shifted | frac_value;
        guard = (mantissa >> (51 - f)) & 1UL;
        ulong sticky_mask = (1UL << (51 - f)) - 1UL;
        sticky = (mantissa & sticky_mask) != 0;
    } else {
        raw = regime_shifted;
        guard = (mantissa >> 51) & 1UL;
        sticky = (mantissa & ((1UL << 51) - 1UL)) != 0;
    }

    int round_up = guard && (sticky || (raw & 1));
    uint magnitude = raw + (round_up ? 1u : 0u);
    if (magnitude >= 0x80u) {
        magnitude = 0x7Fu;
    }

    uchar result = (uchar)magnitude;
    return sign ? (uchar)(-(int)result) : result;
}

__kernel void matmul(
    __global const uchar* a,
    __global const uchar* b,
    __global uchar* c,
    __constant double* to_double,
    const uint m,
    const uint k,
    const uint n)
{
    uint i = get_global_id(0);
    uint j = get_global_id(1);
    if (i >= m || j >= n) {
        return;
    }

    double acc = 0.0;
    for (uint t = 0; t < k; t++) {
        double av = to_double[a[i * k + t]];
        double bv = to_double[b[t * n + j]];
        acc += av * bv;
    }
    c[i * n + j] = encode_p8(acc);
}
"#;

#[cfg(feature = "device")]
mod ocl_backend {
    use super::{check_capacity, DeviceBackend, DeviceCapabilities, KERNEL_SOURCE};
    use crate::error::{PositError, Result};
    use crate::tables::tables;
    use ocl::{Buffer, ProQue};

    /// A [`DeviceBackend`] that runs the `matmul` kernel through OpenCL.
    pub struct OclBackend {
        pro_que: ProQue,
        to_double: Buffer<f64>,
        caps: DeviceCapabilities,
    }

    impl OclBackend {
        /// Initialize against the platform's default device, uploading
        /// the host's `to_double` table and querying capacity limits.
        pub fn new() -> Result<Self> {
            let pro_que = ProQue::builder()
                .src(KERNEL_SOURCE)
                .build()
                .map_err(|e| PositError::DeviceUnavailable {
                    message: e.to_string(),
                })?;

            let device = pro_que.device();
            let max_alloc_bytes = device
                .info(ocl::enums::DeviceInfo::MaxMemAllocSize)
                .map_err(|e| PositError::DeviceUnavailable {
                    message: e.to_string(),
                })?
                .to_string()
                .parse::<usize>()
                .unwrap_or(0);
            let global_mem_bytes = device
                .info(ocl::enums::DeviceInfo::GlobalMemSize)
                .map_err(|e| PositError::DeviceUnavailable {
                    message: e.to_string(),
                })?
                .to_string()
                .parse::<usize>()
                .unwrap_or(0);
            let max_work_group_size = device
                .info(ocl::enums::DeviceInfo::MaxWorkGroupSize)
                .map_err(|e| PositError::DeviceUnavailable {
                    message: e.to_string(),
                })?
                .to_string()
                .parse::<usize>()
                .unwrap_or(1);

            let caps = DeviceCapabilities {
                max_alloc_bytes,
                global_mem_bytes,
                max_work_group_size,
            };

            let to_double_host = tables().to_double;
            let to_double = Buffer::builder()
                .queue(pro_que.queue().clone())
                .len(256)
                .copy_host_slice(&to_double_host)
                .build()
                .map_err(|e| PositError::DeviceUnavailable {
                    message: e.to_string(),
                })?;

            tracing::debug!(?caps, "initialized OpenCL matmul backend");

            Ok(Self {
                pro_que,
                to_double,
                caps,
            })
        }
    }

    impl DeviceBackend for OclBackend {
        fn capabilities(&self) -> DeviceCapabilities {
            self.caps
        }

        fn matmul(&self, a: &[u8], b: &[u8], c: &mut [u8], m: usize, k: usize, n: usize) -> Result<()> {
            check_capacity(a.len(), b.len(), c.len(), m, k, n, self.caps)?;

            let a_buf = Buffer::<u8>::builder()
                .queue(self.pro_que.queue().clone())
                .len(a.len())
                .copy_host_slice(a)
                .build()
                .map_err(|e| PositError::BufferTransfer {
                    message: e.to_string(),
                })?;
            let b_buf = Buffer::<u8>::builder()
                .queue(self.pro_que.queue().clone())
                .len(b.len())
                .copy_host_slice(b)
                .build()
                .map_err(|e| PositError::BufferTransfer {
                    message: e.to_string(),
                })?;
            let c_buf = Buffer::<u8>::builder()
                .queue(self.pro_que.queue().clone())
                .len(c.len())
                .build()
                .map_err(|e| PositError::BufferTransfer {
                    message: e.to_string(),
                })?;

            let kernel = self
                .pro_que
                .kernel_builder("matmul")
                .arg(&a_buf)
                .arg(&b_buf)
                .arg(&c_buf)
                .arg(&self.to_double)
                .arg(m as u32)
                .arg(k as u32)
                .arg(n as u32)
                .global_work_size([m, n])
                .build()
                .map_err(|e| PositError::KernelLaunch {
                    message: e.to_string(),
                })?;

            unsafe {
                kernel.enq().map_err(|e| PositError::KernelLaunch {
                    message: e.to_string(),
                })?;
            }

            c_buf.read(c).enq().map_err(|e| PositError::BufferTransfer {
                message: e.to_string(),
            })?;

            Ok(())
        }
    }
}

#[cfg(feature = "device")]
pub use ocl_backend::OclBackend;
