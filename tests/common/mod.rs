//! Shared datasets and helpers for the integration tests

#![allow(dead_code)]

use std::io::Write;
use tempfile::NamedTempFile;

/// Three class dataset: 3 x class 0, 5 x class 1, 7 x class 2
pub fn three_class_data() -> (Vec<Vec<f64>>, Vec<i32>) {
    let x = vec![
        vec![1.17737838, -0.2002118],
        vec![0.4960075, 0.86130762],
        vec![-0.05903827, 0.10947647],
        vec![0.91464286, 1.61369212],
        vec![-0.54619583, 1.73009918],
        vec![-0.60413357, 0.24628718],
        vec![0.45713638, 1.31069295],
        vec![-0.04032409, 3.01186964],
        vec![0.03142011, 0.12323596],
        vec![0.50701028, -0.17636928],
        vec![-0.80809175, -1.09917302],
        vec![-0.20497017, -0.26630228],
        vec![0.99272351, -0.11631728],
        vec![-1.95581933, 0.69609604],
        vec![1.15157493, -1.2981518],
    ];
    let y = vec![1, 2, 1, 0, 2, 1, 2, 2, 1, 2, 0, 0, 2, 1, 2];
    (x, y)
}

/// Binary dataset: 3 x class 0, 7 x class 1
pub fn binary_data() -> (Vec<Vec<f64>>, Vec<i32>) {
    let x = vec![
        vec![0.04352327, -0.20515826],
        vec![0.92923648, 0.76103773],
        vec![0.20792588, 1.49407907],
        vec![0.47104475, 0.44386323],
        vec![0.22950086, 0.33367433],
        vec![0.15490546, 0.3130677],
        vec![0.09125309, -0.85409574],
        vec![0.12372842, 0.6536186],
        vec![0.13347175, 0.12167502],
        vec![0.094035, -2.55298982],
    ];
    let y = vec![1, 0, 1, 0, 1, 1, 1, 1, 0, 1];
    (x, y)
}

/// Larger deterministic dataset with `sizes[c]` samples of class `c`
pub fn blobs(sizes: &[usize]) -> (Vec<Vec<f64>>, Vec<i32>) {
    let mut state: u64 = 42;
    let mut next = move || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (state >> 33) as f64 / (u32::MAX as f64)
    };

    let mut x = Vec::new();
    let mut y = Vec::new();
    for (class, &n) in sizes.iter().enumerate() {
        let center = class as f64 * 2.0;
        for _ in 0..n {
            x.push(vec![center + next(), center - next()]);
            y.push(class as i32);
        }
    }
    (x, y)
}

/// Write a configuration to a temporary file with the given extension
pub fn config_file(extension: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("imbrs_test_")
        .suffix(&format!(".{}", extension))
        .tempfile()
        .expect("Failed to create temporary config file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temporary config file");
    file
}
