//! Work-group padding

use log::debug;

use crate::config::validate_workgroup_size;
use crate::error::Result;

/// Records how a dataset was padded to a whole number of work-groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaddingDescriptor {
    /// Number of real elements
    pub original_length: usize,
    /// Smallest multiple of the work-group size `>= original_length`
    pub padded_length: usize,
    /// Value appended at the tail
    pub neutral_value: i32,
}

impl PaddingDescriptor {
    /// Number of neutral elements appended.
    #[inline]
    pub fn padding_len(&self) -> usize {
        self.padded_length - self.original_length
    }
}

/// A copy of a dataset padded to a multiple of the work-group size.
///
/// The first `real_len()` values are the real elements; the rest are copies of
/// the neutral value chosen by the consuming operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaddedDataset {
    values: Vec<i32>,
    local_size: usize,
    descriptor: PaddingDescriptor,
}

impl PaddedDataset {
    /// Pad `values` to a multiple of `local_size` with `neutral`.
    ///
    /// The input is not modified. An empty input gives an empty result with
    /// zero work-groups.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` unless `local_size` is a power of two
    /// no larger than [`crate::config::MAX_WORKGROUP_SIZE`].
    pub fn pad(values: &[i32], local_size: u32, neutral: i32) -> Result<Self> {
        validate_workgroup_size(local_size)?;
        let local_size = local_size as usize;

        let original_length = values.len();
        let padded_length = original_length.div_ceil(local_size) * local_size;

        let mut padded = Vec::with_capacity(padded_length);
        padded.extend_from_slice(values);
        padded.resize(padded_length, neutral);

        if padded_length != original_length {
            debug!(
                "padded {} elements with {} x {} to fit work-groups of {}",
                original_length,
                padded_length - original_length,
                neutral,
                local_size
            );
        }

        Ok(Self {
            values: padded,
            local_size,
            descriptor: PaddingDescriptor {
                original_length,
                padded_length,
                neutral_value: neutral,
            },
        })
    }

    /// All values, real elements first.
    #[inline]
    pub fn as_slice(&self) -> &[i32] {
        &self.values
    }

    /// How the padding was applied.
    #[inline]
    pub fn descriptor(&self) -> PaddingDescriptor {
        self.descriptor
    }

    /// Number of real (non-padding) elements.
    #[inline]
    pub fn real_len(&self) -> usize {
        self.descriptor.original_length
    }

    /// Total length including padding.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there is nothing to dispatch.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Lanes per work-group.
    #[inline]
    pub fn local_size(&self) -> usize {
        self.local_size
    }

    /// Number of work-groups covering the padded data.
    #[inline]
    pub fn num_groups(&self) -> usize {
        self.values.len() / self.local_size
    }

    /// Disjoint work-group chunks in order.
    pub fn groups(&self) -> std::slice::ChunksExact<'_, i32> {
        self.values.chunks_exact(self.local_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_to_next_multiple() {
        let p = PaddedDataset::pad(&[1, 2, 3, 4, 5], 4, 0).unwrap();
        assert_eq!(p.as_slice(), &[1, 2, 3, 4, 5, 0, 0, 0]);
        assert_eq!(p.num_groups(), 2);
        assert_eq!(p.real_len(), 5);
        assert_eq!(p.descriptor().padding_len(), 3);
    }

    #[test]
    fn test_exact_multiple_adds_nothing() {
        let p = PaddedDataset::pad(&[7; 64], 32, i32::MIN).unwrap();
        assert_eq!(p.len(), 64);
        assert_eq!(p.descriptor().padding_len(), 0);
        assert_eq!(p.groups().count(), 2);
    }

    #[test]
    fn test_empty_input() {
        let p = PaddedDataset::pad(&[], 32, 0).unwrap();
        assert!(p.is_empty());
        assert_eq!(p.num_groups(), 0);
        assert_eq!(p.descriptor().padded_length, 0);
    }

    #[test]
    fn test_neutral_fills_tail() {
        let p = PaddedDataset::pad(&[3], 4, i32::MAX).unwrap();
        assert_eq!(p.as_slice(), &[3, i32::MAX, i32::MAX, i32::MAX]);
        assert_eq!(p.descriptor().neutral_value, i32::MAX);
    }

    #[test]
    fn test_rejects_invalid_group_sizes() {
        for local_size in [0, 3, 6, 100, 512] {
            let err = PaddedDataset::pad(&[1, 2, 9], local_size, i32::MIN).unwrap_err();
            assert!(err.is_configuration(), "size {local_size}: {err}");
        }
    }
}
