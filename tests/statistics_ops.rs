//! Integration tests for the two-stage statistics pipeline

mod common;

use wgstat::config::StatsConfig;
use wgstat::dataset::{Dataset, unscale};
use wgstat::ops::StatisticalOps;
use wgstat::summary::summarize;

use common::{create_cpu_client, random_dataset, reference_stats};

#[test]
fn test_summary_four_elements() {
    let (client, _) = create_cpu_client();
    let d = Dataset::from_scaled(vec![10, 20, 30, 40]);
    let config = StatsConfig::new(2).with_workgroup_size(4);

    let s = client.summarize(&d, &config).unwrap();
    assert_eq!(s.max, 4.0);
    assert_eq!(s.min, 1.0);
    assert_eq!(s.mean, 2.5);
    assert_eq!(s.histogram, vec![2, 2]);
    assert_eq!(s.count, 4);
}

#[test]
fn test_summary_repeated_value() {
    let (client, _) = create_cpu_client();
    let d = Dataset::from_scaled(vec![-37; 100]);
    let config = StatsConfig::new(5);

    let s = client.summarize(&d, &config).unwrap();
    assert_eq!(s.max, -3.7);
    assert_eq!(s.min, -3.7);
    assert!((s.mean - (-3.7)).abs() < 1e-9);
    assert_eq!(s.histogram, vec![100, 0, 0, 0, 0]);
}

#[test]
fn test_summary_mean_of_large_values() {
    let (client, _) = create_cpu_client();
    let d = Dataset::from_scaled(vec![1_000_000_000; 8]);
    let config = StatsConfig::new(2).with_workgroup_size(4);

    let s = client.summarize(&d, &config).unwrap();
    assert_eq!(s.mean, 1e8);
    assert_eq!(s.max, 1e8);
    assert_eq!(s.histogram, vec![8, 0]);
}

#[test]
fn test_summary_extreme_bounds() {
    let (client, _) = create_cpu_client();
    let d = Dataset::from_scaled(vec![i32::MIN, 0, i32::MAX]);
    let config = StatsConfig::new(2).with_workgroup_size(4);

    let s = client.summarize(&d, &config).unwrap();
    assert_eq!(s.max, unscale(i64::from(i32::MAX)));
    assert_eq!(s.min, unscale(i64::from(i32::MIN)));
    assert_eq!(s.histogram, vec![1, 2]);
}

#[test]
fn test_summary_single_bin() {
    let (client, _) = create_cpu_client();
    let d = random_dataset(5, 777, -200, 350);

    let s = client.summarize(&d, &StatsConfig::new(1)).unwrap();
    assert_eq!(s.histogram, vec![777]);
}

#[test]
fn test_summary_matches_sequential() {
    let (client, _) = create_cpu_client();
    for (seed, len) in [(21u64, 1usize), (22, 31), (23, 32), (24, 33), (25, 10_000)] {
        let d = random_dataset(seed, len, -150, 350);
        let (max, min, sum) = reference_stats(&d);
        let config = StatsConfig::new(10);

        let s = client.summarize(&d, &config).unwrap();
        assert_eq!(s.max, unscale(max), "seed={seed}");
        assert_eq!(s.min, unscale(min), "seed={seed}");

        let expected_mean = unscale(sum) / len as f64;
        assert!(
            (s.mean - expected_mean).abs() < 0.05,
            "seed={seed}: mean {} vs {}",
            s.mean,
            expected_mean
        );
        assert_eq!(s.histogram_total(), len as u64);
    }
}

#[test]
fn test_summary_independent_of_workgroup_size() {
    let (client, _) = create_cpu_client();
    let d = random_dataset(99, 2500, -400, 400);

    let baseline = client.summarize(&d, &StatsConfig::new(8)).unwrap();
    for wg in [1u32, 8, 64, 256] {
        let config = StatsConfig::new(8).with_workgroup_size(wg);
        assert_eq!(client.summarize(&d, &config).unwrap(), baseline, "wg={wg}");
    }
}

#[test]
fn test_summarize_free_function() {
    let (client, _) = create_cpu_client();
    let d = Dataset::from_measurements(&[1.0, 2.0, 3.0, 4.0]);

    let s = summarize(&client, &d, &StatsConfig::new(2).with_workgroup_size(4)).unwrap();
    assert_eq!(s.to_string(), "Max = 4\nMin = 1\nMean = 2.5\nHist = [2, 2]");
}

#[test]
fn test_summary_configuration_errors() {
    let (client, _) = create_cpu_client();
    let d = Dataset::from_scaled(vec![1, 2, 3]);

    let zero_bins = client.summarize(&d, &StatsConfig::new(0)).unwrap_err();
    assert!(zero_bins.is_configuration());

    let bad_wg = StatsConfig::new(4).with_workgroup_size(12);
    assert!(client.summarize(&d, &bad_wg).unwrap_err().is_configuration());

    let empty = client
        .summarize(&Dataset::default(), &StatsConfig::new(4))
        .unwrap_err();
    assert!(empty.is_configuration());
}
