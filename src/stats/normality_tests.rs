use super::*;

#[test]
fn test_shapiro_textbook_weights() {
    // Shapiro & Wilk (1965) weight example
    let weights = [
        148.0, 154.0, 158.0, 160.0, 161.0, 162.0, 166.0, 170.0, 182.0, 195.0, 236.0,
    ];
    let r = shapiro(&weights).expect("valid input");
    assert!((r.statistic - 0.7888).abs() < 1e-3, "W = {}", r.statistic);
    assert!((r.pvalue - 0.0067).abs() < 5e-4, "p = {}", r.pvalue);
}

#[test]
fn test_shapiro_symmetric_sample_is_normal() {
    let r = shapiro(&[-1.5, -1.0, -0.5, 0.0, 0.5, 1.0, 1.5]).expect("valid input");
    assert!((r.statistic - 0.9780).abs() < 1e-3);
    assert!(r.pvalue > 0.9);
}

#[test]
fn test_shapiro_normal_quantiles() {
    let data: Vec<f64> = (0..50)
        .map(|i| normal_ppf((f64::from(i) + 0.5) / 50.0))
        .collect();
    let r = shapiro(&data).expect("valid input");
    assert!(r.statistic > 0.99);
    assert!(r.pvalue > 0.99);
}

#[test]
fn test_shapiro_outlier_is_not_normal() {
    let r = shapiro(&[1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 50.0]).expect("valid input");
    assert!(r.pvalue < 1e-4);
}

#[test]
fn test_shapiro_n3_exact() {
    let r = shapiro(&[1.0, 2.0, 10.0]).expect("valid input");
    assert!((r.statistic - 0.8322).abs() < 1e-3);
    assert!((r.pvalue - 0.1939).abs() < 1e-3);

    let evenly = shapiro(&[1.0, 2.0, 3.0]).expect("valid input");
    assert!((evenly.statistic - 1.0).abs() < 1e-12);
    assert!((evenly.pvalue - 1.0).abs() < 1e-9);
}

#[test]
fn test_shapiro_constant_sample() {
    let r = shapiro(&[4.0; 10]).expect("zero range is reported, not rejected");
    assert_eq!(r.statistic, 1.0);
    assert_eq!(r.pvalue, 1.0);
}

#[test]
fn test_shapiro_too_small() {
    let err = shapiro(&[1.0, 2.0]).expect_err("two observations");
    assert!(matches!(
        err,
        HypothesisError::InsufficientData { required: 3, got: 2, .. }
    ));
}

#[test]
fn test_shapiro_rejects_nan() {
    assert!(shapiro(&[1.0, f64::NAN, 2.0, 3.0]).is_err());
}

#[test]
fn test_kstest_matching_reference() {
    let data: Vec<f64> = (0..1000)
        .map(|i| normal_ppf((f64::from(i) + 0.5) / 1000.0))
        .collect();
    let r = kstest_normal(&data, 0.0, 1.0).expect("valid input");
    assert!(r.statistic < 0.001);
    assert!(r.pvalue > 0.99);
}

#[test]
fn test_kstest_shifted_reference() {
    let data: Vec<f64> = (0..1000)
        .map(|i| normal_ppf((f64::from(i) + 0.5) / 1000.0))
        .collect();
    let r = kstest_normal(&data, 1.0, 1.0).expect("valid input");
    // D is Φ(0.5) - Φ(-0.5) over the overlap, roughly 0.38
    assert!(r.statistic > 0.3);
    assert!(r.pvalue < 1e-10);
}

#[test]
fn test_kstest_invalid_scale() {
    assert!(kstest_normal(&[1.0, 2.0], 0.0, 0.0).is_err());
    assert!(kstest_normal(&[], 0.0, 1.0).is_err());
}
