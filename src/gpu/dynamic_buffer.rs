//! Dynamic GPU buffer management with automatic resizing
//!
//! Scene geometry is rebuilt wholesale on every render, so buffers grow to
//! the largest scene seen and are reused afterwards.

use std::marker::PhantomData;

/// Smallest allocation, in bytes.
const MIN_CAPACITY: u64 = 256;

/// A GPU buffer that can grow dynamically
///
/// Uses a 2x growth strategy when capacity is exceeded.
/// Never shrinks (GPU buffers cannot be resized in place).
pub struct DynamicBuffer {
    buffer: wgpu::Buffer,
    capacity: u64,
    max_size: u64,
    len: u64,
    usage: wgpu::BufferUsages,
    label: String,
}

impl DynamicBuffer {
    /// Buffer with the given initial byte capacity.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        initial_capacity: u64,
        usage: wgpu::BufferUsages,
    ) -> Self {
        let max_size = device.limits().max_buffer_size;
        let capacity = initial_capacity.max(MIN_CAPACITY).min(max_size);
        Self {
            buffer: Self::allocate(device, label, capacity, usage),
            capacity,
            max_size,
            len: 0,
            usage,
            label: label.to_owned(),
        }
    }

    fn allocate(
        device: &wgpu::Device,
        label: &str,
        size: u64,
        usage: wgpu::BufferUsages,
    ) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size,
            usage: usage | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Write raw bytes to buffer, growing if necessary.
    ///
    /// `data` must not exceed the device's `max_buffer_size`.
    /// Returns `true` if buffer was reallocated.
    pub fn write_bytes(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[u8],
    ) -> bool {
        let needed = data.len() as u64;
        let reallocated = needed > self.capacity;
        if reallocated {
            let new_capacity =
                grown_capacity(self.capacity, needed, self.max_size);
            self.buffer =
                Self::allocate(device, &self.label, new_capacity, self.usage);
            self.capacity = new_capacity;
            log::debug!("Grew {} to {new_capacity} bytes", self.label);
        }
        // Writes must be a multiple of COPY_BUFFER_ALIGNMENT; every vertex
        // and index type used here is a multiple of 4 bytes.
        if needed > 0 {
            queue.write_buffer(&self.buffer, 0, data);
        }
        self.len = needed;
        reallocated
    }

    /// The underlying GPU buffer.
    #[must_use]
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Bytes written by the last write.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Whether the last write was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocated bytes.
    #[must_use]
    pub fn capacity(&self) -> u64 {
        self.capacity
    }
}

/// Capacity after growing to hold `needed` bytes: doubled, but never past
/// the device limit `max`.
fn grown_capacity(current: u64, needed: u64, max: u64) -> u64 {
    needed
        .saturating_mul(2)
        .max(current + 1024)
        .min(max)
        .max(needed)
}

/// Typed wrapper for DynamicBuffer with cleaner API
///
/// Tracks item count rather than byte length.
pub struct TypedBuffer<T> {
    inner: DynamicBuffer,
    count: usize,
    _marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> TypedBuffer<T> {
    /// Buffer with room for `capacity` items.
    #[must_use]
    pub fn with_capacity(
        device: &wgpu::Device,
        label: &str,
        capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> Self {
        let bytes = (size_of::<T>() * capacity) as u64;
        Self {
            inner: DynamicBuffer::new(device, label, bytes, usage),
            count: 0,
            _marker: PhantomData,
        }
    }

    /// Write data to buffer, growing if necessary
    ///
    /// Returns `true` if buffer was reallocated.
    pub fn write(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> bool {
        self.count = data.len();
        self.inner
            .write_bytes(device, queue, bytemuck::cast_slice(data))
    }

    /// The underlying GPU buffer.
    #[must_use]
    pub fn buffer(&self) -> &wgpu::Buffer {
        self.inner.buffer()
    }

    /// Items written by the last write.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether the last write was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `wgpu::Limits::default().max_buffer_size`.
    const DEFAULT_MAX: u64 = 256 << 20;

    #[test]
    fn growth_doubles_small_requests() {
        assert_eq!(grown_capacity(256, 300, DEFAULT_MAX), 1280);
        assert_eq!(grown_capacity(1024, 4096, DEFAULT_MAX), 8192);
    }

    #[test]
    fn growth_stops_at_the_device_limit() {
        // 25k sphere atoms at the default tessellation.
        let needed = 145_800_000;
        assert!(needed * 2 > DEFAULT_MAX);
        assert_eq!(grown_capacity(8192, needed, DEFAULT_MAX), DEFAULT_MAX);
        assert_eq!(grown_capacity(8192, DEFAULT_MAX, DEFAULT_MAX), DEFAULT_MAX);
    }
}
