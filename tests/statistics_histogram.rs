//! Tests for range-derived histogram operations

mod common;

use wgstat::dataset::{Dataset, PaddedDataset};
use wgstat::ops::{BinRange, HistogramOps};

use common::{create_cpu_client, random_dataset};

// ============================================================================
// Histogram Tests
// ============================================================================

#[test]
fn test_histogram_basic() {
    let (client, _) = create_cpu_client();
    let d = Dataset::from_scaled(vec![10, 20, 30, 40]);
    let range = BinRange::new(10, 40).unwrap();

    let hist = client.histogram(&d, range, 2, 4).unwrap();
    assert_eq!(hist, vec![2, 2]);
}

#[test]
fn test_histogram_one_per_bin() {
    let (client, _) = create_cpu_client();
    let d = Dataset::from_scaled(vec![0, 10, 20, 30, 40, 49]);
    let range = BinRange::new(0, 50).unwrap();

    let hist = client.histogram(&d, range, 5, 32).unwrap();
    assert_eq!(hist, vec![1, 1, 1, 1, 2]);
}

#[test]
fn test_histogram_max_lands_in_last_bin() {
    let (client, _) = create_cpu_client();
    let d = Dataset::from_scaled(vec![0, 100]);
    let range = BinRange::new(0, 100).unwrap();

    let hist = client.histogram(&d, range, 10, 2).unwrap();
    assert_eq!(hist[0], 1);
    assert_eq!(hist[9], 1);
}

#[test]
fn test_histogram_degenerate_range() {
    let (client, _) = create_cpu_client();
    let d = Dataset::from_scaled(vec![42; 37]);
    let range = BinRange::new(42, 42).unwrap();

    let hist = client.histogram(&d, range, 4, 8).unwrap();
    assert_eq!(hist, vec![37, 0, 0, 0]);
}

#[test]
fn test_histogram_padding_not_counted() {
    let (client, _) = create_cpu_client();
    // 0 is inside the range, so unmasked zero padding would land in a bin
    let d = Dataset::from_scaled(vec![-10, 0, 10]);
    let range = BinRange::new(-10, 10).unwrap();

    let hist = client.histogram(&d, range, 2, 32).unwrap();
    assert_eq!(hist.iter().sum::<u32>(), 3);
    assert_eq!(hist, vec![1, 2]);
}

#[test]
fn test_histogram_counts_masks_by_real_len() {
    let (client, _) = create_cpu_client();
    let padded = PaddedDataset::pad(&[5, 5, 5], 4, 5).unwrap();
    let range = BinRange::new(0, 10).unwrap();

    let counts = client.histogram_counts(&padded, range, 2).unwrap();
    assert_eq!(counts, vec![0, 3]);
}

#[test]
fn test_histogram_total_matches_count() {
    let (client, _) = create_cpu_client();
    for (seed, len, bins) in [(1u64, 1usize, 1usize), (2, 33, 7), (3, 1000, 16), (4, 4097, 100)] {
        let d = random_dataset(seed, len, -300, 300);
        let min = *d.values().iter().min().unwrap();
        let max = *d.values().iter().max().unwrap();
        let range = BinRange::new(min, max).unwrap();

        let hist = client.histogram(&d, range, bins, 32).unwrap();
        assert_eq!(hist.len(), bins);
        assert_eq!(
            hist.iter().map(|&c| c as usize).sum::<usize>(),
            len,
            "seed={seed} bins={bins}"
        );
    }
}

#[test]
fn test_histogram_matches_sequential_binning() {
    let (client, _) = create_cpu_client();
    let d = random_dataset(11, 5000, -1000, 1000);
    let range = BinRange::new(-1000, 1000).unwrap();
    let bins = 13;

    let mut expected = vec![0u32; bins];
    for &v in d.values() {
        expected[range.bin_index(v, bins)] += 1;
    }

    assert_eq!(client.histogram(&d, range, bins, 64).unwrap(), expected);
}

#[test]
fn test_histogram_empty_dataset() {
    let (client, _) = create_cpu_client();
    let range = BinRange::new(0, 10).unwrap();
    let hist = client.histogram(&Dataset::default(), range, 3, 32).unwrap();
    assert_eq!(hist, vec![0, 0, 0]);
}

#[test]
fn test_histogram_zero_bins() {
    let (client, _) = create_cpu_client();
    let d = Dataset::from_scaled(vec![1, 2, 3]);
    let range = BinRange::new(1, 3).unwrap();

    let result = client.histogram(&d, range, 0, 32);
    assert!(result.is_err());
}
