//! Writes demo model artifacts into `models/` plus a small measurement CSV,
//! so the app has something to load out of the box.

use serde_json::json;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform draw in [lo, hi].
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

/// Feature columns with their plausible ranges, in training order.
const FEATURES: [(&str, f64, f64); 11] = [
    ("fixed acidity", 4.8, 9.6),
    ("volatile acidity", 0.1, 0.65),
    ("citric acid", 0.06, 0.57),
    ("residual sugar", 1.0, 17.2),
    ("chlorides", 0.01, 0.8),
    ("free_sulfur_dioxide", 2.0, 77.0),
    ("total_sulfur_dioxide", 6.0, 251.0),
    ("density", 0.98, 1.0),
    ("pH", 2.8, 3.6),
    ("sulphates", 0.22, 0.82),
    ("alcohol", 8.4, 14.0),
];

/// Linear coefficients in the ballpark of an OLS fit on the red-wine
/// quality dataset.
const WEIGHTS: [f64; 11] = [
    0.025, -1.08, -0.18, 0.016, -1.87, 0.004, -0.003, -17.9, -0.41, 0.92, 0.29,
];
const INTERCEPT: f64 = 21.9;

fn feature_names() -> Vec<&'static str> {
    FEATURES.iter().map(|&(name, _, _)| name).collect()
}

fn linear_artifact() -> serde_json::Value {
    json!({
        "kind": "linear",
        "features": feature_names(),
        "weights": WEIGHTS,
        "intercept": INTERCEPT,
    })
}

/// A hand-built stump adjusting the base score on one feature.
fn stump(feature: usize, threshold: f64, below: f64, above: f64) -> serde_json::Value {
    json!({
        "nodes": [
            { "branch": { "feature": feature, "threshold": threshold, "left": 1, "right": 2 } },
            { "leaf": { "value": below } },
            { "leaf": { "value": above } },
        ]
    })
}

fn tree_artifact() -> serde_json::Value {
    json!({
        "kind": "tree_ensemble",
        "features": feature_names(),
        "base_score": 5.6,
        "trees": [
            stump(10, 10.5, -0.4, 0.5),   // alcohol
            stump(1, 0.4, 0.3, -0.4),     // volatile acidity
            stump(9, 0.6, -0.2, 0.3),     // sulphates
        ],
    })
}

fn linear_score(row: &[f64]) -> f64 {
    INTERCEPT
        + row
            .iter()
            .zip(WEIGHTS.iter())
            .map(|(x, w)| x * w)
            .sum::<f64>()
}

fn main() {
    std::fs::create_dir_all("models").expect("Failed to create models directory");

    for (name, artifact) in [("linear.json", linear_artifact()), ("tree.json", tree_artifact())] {
        let path = format!("models/{name}");
        let text = serde_json::to_string_pretty(&artifact).expect("Failed to serialize model");
        std::fs::write(&path, text).expect("Failed to write model file");
        println!("Wrote {path}");
    }

    // ---- Demo measurement CSV ----
    let mut rng = SimpleRng::new(42);
    let output_path = "sample_wines.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create CSV");

    let mut header: Vec<&str> = feature_names();
    header.push("quality");
    writer.write_record(&header).expect("Failed to write header");

    let n_rows = 20;
    for _ in 0..n_rows {
        let row: Vec<f64> = FEATURES
            .iter()
            .map(|&(_, lo, hi)| rng.uniform(lo, hi))
            .collect();
        let quality = linear_score(&row).round().clamp(3.0, 8.0);

        let mut record: Vec<String> = row.iter().map(|v| format!("{v:.3}")).collect();
        record.push(format!("{quality:.0}"));
        writer.write_record(&record).expect("Failed to write row");
    }
    writer.flush().expect("Failed to flush CSV");

    println!("Wrote {n_rows} rows to {output_path}");
}
